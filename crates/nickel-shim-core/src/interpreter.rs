//! The interpreter capability
//!
//! The embedding layer only ever talks to an interpreter through the
//! [`Interpreter`] trait. Nothing about the language's terms, types or
//! evaluation strategy leaks through it: programs go in as text, values come
//! out as JSON text.

use crate::config::Config;
use crate::error::{Error, Result};

/// A borrowed program handed to an interpreter for the duration of one call
#[derive(Debug, Clone, Copy)]
pub struct Source<'a> {
    /// Name used in diagnostics
    pub name: &'a str,
    /// Program text
    pub text: &'a str,
}

impl<'a> Source<'a> {
    pub fn new(name: &'a str, text: &'a str) -> Self {
        Self { name, text }
    }
}

/// An embedded language interpreter
///
/// Implementations must not keep references to the source after a call
/// returns, and `typecheck` must not change what later calls to `evaluate`
/// produce.
pub trait Interpreter: Send {
    /// Short name of the backend
    fn name(&self) -> &str;

    /// Version of the backend
    fn version(&self) -> &'static str;

    /// Evaluate `source` completely and return its value encoded as JSON
    fn evaluate(&self, source: &Source<'_>) -> Result<String>;

    /// Statically check `source` without evaluating it
    fn typecheck(&self, source: &Source<'_>) -> Result<()>;
}

/// Version string reported when no backend is compiled in
pub const UNAVAILABLE_VERSION: &str = "unavailable";

/// Build the interpreter compiled into this crate
#[cfg(feature = "nickel")]
pub fn default_interpreter(config: &Config) -> Result<Box<dyn Interpreter>> {
    Ok(Box::new(crate::nickel::NickelInterpreter::new(config)))
}

/// Build the interpreter compiled into this crate
#[cfg(not(feature = "nickel"))]
pub fn default_interpreter(_config: &Config) -> Result<Box<dyn Interpreter>> {
    Err(Error::unavailable(
        "built without an interpreter backend (enable the `nickel` feature)",
    ))
}

/// Version of the compiled-in interpreter
pub fn interpreter_version() -> &'static str {
    #[cfg(feature = "nickel")]
    {
        crate::nickel::NICKEL_VERSION
    }
    #[cfg(not(feature = "nickel"))]
    {
        UNAVAILABLE_VERSION
    }
}

/// Re-encode exported JSON on a single line
pub(crate) fn compact_json(json: &str) -> Result<String> {
    let value: serde_json::Value = serde_json::from_str(json)
        .map_err(|e| Error::serialization(format!("interpreter produced invalid JSON: {}", e)))?;
    Ok(serde_json::to_string(&value)?)
}
