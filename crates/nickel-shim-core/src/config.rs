//! Context configuration
//!
//! A [`Config`] is fixed for the lifetime of a context. It can be built in
//! code, deserialized from JSON (the FFI layer does this) or from any serde
//! format, and overridden from the environment.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default name under which source text is registered with the interpreter
pub const DEFAULT_SOURCE_NAME: &str = "<input>";

/// Default upper bound, in bytes, on a diagnostic message
pub const DEFAULT_MAX_DIAGNOSTIC_LEN: usize = 4096;

/// Configuration of one evaluation context
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Name of the source as it appears in diagnostics
    pub source_name: String,

    /// Strictness applied at the top level by `typecheck`
    pub typecheck_mode: TypecheckMode,

    /// Layout of the JSON returned by `evaluate`
    pub json_style: JsonStyle,

    /// Destination of the language's trace output
    pub trace: TraceTarget,

    /// Maximum number of bytes kept for one diagnostic message
    pub max_diagnostic_len: usize,
}

/// Typechecking strictness at the top level of a program
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypecheckMode {
    /// Only annotated parts of the program are checked
    #[default]
    Walk,
    /// The whole program is checked as if it were statically typed
    Enforce,
}

/// Layout of evaluation results
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JsonStyle {
    /// The interpreter's own export, unchanged
    #[default]
    Pretty,
    /// Single line, no insignificant whitespace
    Compact,
}

/// Where `std.trace` output goes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TraceTarget {
    #[default]
    Stderr,
    Discard,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_name: DEFAULT_SOURCE_NAME.to_string(),
            typecheck_mode: TypecheckMode::default(),
            json_style: JsonStyle::default(),
            trace: TraceTarget::default(),
            max_diagnostic_len: DEFAULT_MAX_DIAGNOSTIC_LEN,
        }
    }
}

impl Config {
    /// Parse a configuration from JSON and validate it
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Config = serde_json::from_str(json)
            .map_err(|e| Error::configuration(format!("invalid config JSON: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Check the invariants serde cannot express
    pub fn validate(&self) -> Result<()> {
        if self.source_name.trim().is_empty() {
            return Err(Error::configuration("source_name must not be empty"));
        }
        if self.max_diagnostic_len == 0 {
            return Err(Error::configuration(
                "max_diagnostic_len must be greater than zero",
            ));
        }
        Ok(())
    }

    /// Apply `NICKEL_SHIM_*` environment overrides
    ///
    /// Unknown values are reported with a warning and leave the field as is.
    pub fn merge_with_env(&mut self) {
        if let Ok(name) = std::env::var("NICKEL_SHIM_SOURCE_NAME") {
            if name.trim().is_empty() {
                tracing::warn!("Ignoring empty NICKEL_SHIM_SOURCE_NAME");
            } else {
                self.source_name = name;
            }
        }

        if let Ok(mode) = std::env::var("NICKEL_SHIM_TYPECHECK_MODE") {
            match mode.to_lowercase().as_str() {
                "walk" => self.typecheck_mode = TypecheckMode::Walk,
                "enforce" => self.typecheck_mode = TypecheckMode::Enforce,
                _ => tracing::warn!("Invalid typecheck mode: {}, using {:?}", mode, self.typecheck_mode),
            }
        }

        if let Ok(style) = std::env::var("NICKEL_SHIM_JSON_STYLE") {
            match style.to_lowercase().as_str() {
                "pretty" => self.json_style = JsonStyle::Pretty,
                "compact" => self.json_style = JsonStyle::Compact,
                _ => tracing::warn!("Invalid JSON style: {}, using {:?}", style, self.json_style),
            }
        }

        if let Ok(trace) = std::env::var("NICKEL_SHIM_TRACE") {
            match trace.to_lowercase().as_str() {
                "stderr" => self.trace = TraceTarget::Stderr,
                "discard" | "off" => self.trace = TraceTarget::Discard,
                _ => tracing::warn!("Invalid trace target: {}, using {:?}", trace, self.trace),
            }
        }
    }
}

/// Builder for creating configurations programmatically
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn source_name(mut self, name: impl Into<String>) -> Self {
        self.config.source_name = name.into();
        self
    }

    pub fn typecheck_mode(mut self, mode: TypecheckMode) -> Self {
        self.config.typecheck_mode = mode;
        self
    }

    pub fn json_style(mut self, style: JsonStyle) -> Self {
        self.config.json_style = style;
        self
    }

    pub fn trace(mut self, trace: TraceTarget) -> Self {
        self.config.trace = trace;
        self
    }

    pub fn max_diagnostic_len(mut self, len: usize) -> Self {
        self.config.max_diagnostic_len = len;
        self
    }

    /// Validate and return the configuration
    pub fn build(self) -> Result<Config> {
        self.config.validate()?;
        Ok(self.config)
    }
}
