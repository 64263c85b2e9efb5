//! nickel-shim core - embedding layer for the Nickel configuration language
//!
//! This crate owns everything the C boundary needs that is not about raw
//! pointers: evaluation contexts, their configuration, the interpreter
//! capability and the error taxonomy.
//!
//! # Main Components
//!
//! - **Context**: one instance of interpreter state with its last diagnostic
//! - **Interpreter**: the narrow trait every backend implements
//! - **Config**: per-context settings, serde-friendly
//! - **Error Handling**: `thiserror` errors collapsed into [`ErrorKind`]s
//!
//! # Example
//!
//! ```no_run
//! use nickel_shim_core::{Context, Result};
//!
//! fn example() -> Result<()> {
//!     let mut ctx = Context::new()?;
//!     let json = ctx.evaluate("{ port = 80 + 8000 }")?;
//!     println!("{}", json);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod context;
pub mod error;
pub mod interpreter;
#[cfg(feature = "nickel")]
pub mod nickel;

pub use config::{Config, ConfigBuilder, JsonStyle, TraceTarget, TypecheckMode};
pub use context::Context;
pub use error::{Diagnostic, Error, ErrorKind, Result};
pub use interpreter::{default_interpreter, interpreter_version, Interpreter, Source};
#[cfg(feature = "nickel")]
pub use nickel::NickelInterpreter;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
