//! Shared utilities for command handlers

use crate::error::{Error, Result};
use std::io::Read;
use std::path::Path;

/// Program text together with the name used in diagnostics
#[derive(Debug)]
pub struct Input {
    pub name: Option<String>,
    pub text: String,
}

/// Read a program from a file, or from stdin when the path is `-`
///
/// Stdin input has no name of its own; the configured source name applies.
pub fn read_input(path: &Path) -> Result<Input> {
    if path.as_os_str() == "-" {
        let mut bytes = Vec::new();
        std::io::stdin().read_to_end(&mut bytes)?;
        tracing::debug!(bytes = bytes.len(), "Read program from stdin");
        let text = decode(bytes, "<stdin>")?;
        return Ok(Input { name: None, text });
    }

    if !path.exists() {
        return Err(Error::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let bytes = std::fs::read(path)?;
    tracing::debug!(path = %path.display(), bytes = bytes.len(), "Read program");
    let name = path.display().to_string();
    let text = decode(bytes, &name)?;
    Ok(Input {
        name: Some(name),
        text,
    })
}

/// Programs must be UTF-8 text; anything else is rejected before evaluation
fn decode(bytes: Vec<u8>, origin: &str) -> Result<String> {
    String::from_utf8(bytes).map_err(|e| {
        let message = format!("{} is not valid UTF-8: {}", origin, e.utf8_error());
        Error::Core(nickel_shim_core::Error::invalid_source(message))
    })
}

/// Engine settings for one input, naming the source after its file
pub fn engine_config(base: &nickel_shim_core::Config, input: &Input) -> nickel_shim_core::Config {
    let mut engine = base.clone();
    if let Some(name) = &input.name {
        engine.source_name = name.clone();
    }
    engine
}
