//! Command handlers for CLI subcommands
//!
//! This module contains the implementation logic for each CLI subcommand.

mod completions;
mod config;
mod eval;
mod typecheck;
mod utils;
mod version;

pub use completions::handle_completions;
pub use config::handle_config;
pub use eval::handle_eval;
pub use typecheck::handle_typecheck;
pub use version::handle_version;
