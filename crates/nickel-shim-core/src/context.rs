//! Evaluation contexts
//!
//! A [`Context`] pairs an interpreter with its configuration and remembers the
//! diagnostic of its most recent failure. It is `Send` but not `Sync`: move it
//! between threads freely, but use it from one thread at a time.

use std::fmt;

use crate::config::{Config, JsonStyle};
use crate::error::{Diagnostic, Error, Result};
use crate::interpreter::{compact_json, default_interpreter, Interpreter, Source};

/// One instance of embedded interpreter state
pub struct Context {
    interpreter: Box<dyn Interpreter>,
    config: Config,
    last_error: Option<Diagnostic>,
}

impl Context {
    /// Create a context with the default configuration and the compiled-in interpreter
    pub fn new() -> Result<Self> {
        Self::with_config(Config::default())
    }

    /// Create a context with the compiled-in interpreter
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate()?;
        let interpreter = default_interpreter(&config)?;
        Ok(Self::build(config, interpreter))
    }

    /// Create a context around a caller-supplied interpreter
    pub fn with_interpreter(config: Config, interpreter: Box<dyn Interpreter>) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(config, interpreter))
    }

    fn build(config: Config, interpreter: Box<dyn Interpreter>) -> Self {
        tracing::debug!(
            interpreter = interpreter.name(),
            version = interpreter.version(),
            source_name = %config.source_name,
            "Context created"
        );

        Self {
            interpreter,
            config,
            last_error: None,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn interpreter_name(&self) -> &str {
        self.interpreter.name()
    }

    pub fn interpreter_version(&self) -> &'static str {
        self.interpreter.version()
    }

    /// Evaluate `text` and return the resulting value as JSON
    ///
    /// On failure the error is logged and kept as the context's last
    /// diagnostic before being returned.
    pub fn evaluate(&mut self, text: &str) -> Result<String> {
        self.last_error = None;
        let source = Source::new(&self.config.source_name, text);

        let result = self
            .interpreter
            .evaluate(&source)
            .and_then(|json| match self.config.json_style {
                JsonStyle::Pretty => Ok(json),
                JsonStyle::Compact => compact_json(&json),
            });

        result.map_err(|error| self.record("evaluate", error))
    }

    /// Check `text` statically
    ///
    /// Only the last diagnostic is touched; nothing a later `evaluate` observes
    /// changes.
    pub fn typecheck(&mut self, text: &str) -> Result<()> {
        self.last_error = None;
        let source = Source::new(&self.config.source_name, text);

        self.interpreter
            .typecheck(&source)
            .map_err(|error| self.record("typecheck", error))
    }

    /// `true` when `text` typechecks, `false` on any failure
    pub fn is_well_typed(&mut self, text: &str) -> bool {
        self.typecheck(text).is_ok()
    }

    /// Diagnostic of the most recent failed operation, if the last operation failed
    pub fn last_error(&self) -> Option<&Diagnostic> {
        self.last_error.as_ref()
    }

    pub fn clear_error(&mut self) {
        self.last_error = None;
    }

    fn record(&mut self, operation: &'static str, error: Error) -> Error {
        let diagnostic = Diagnostic::from_error(&error, self.config.max_diagnostic_len);
        tracing::debug!(
            operation,
            kind = %diagnostic.kind,
            message = %diagnostic.message,
            "Operation failed"
        );
        self.last_error = Some(diagnostic);
        error
    }
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("interpreter", &self.interpreter.name())
            .field("config", &self.config)
            .field("last_error", &self.last_error)
            .finish()
    }
}
