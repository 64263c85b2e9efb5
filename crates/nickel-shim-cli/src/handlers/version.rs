//! Version command handler

use crate::cli::OutputFormat;
use crate::error::Result;
use crate::output::OutputWriter;
use nickel_shim_core::interpreter::UNAVAILABLE_VERSION;
use serde::Serialize;

#[derive(Debug, Serialize)]
struct VersionInfo {
    shim: &'static str,
    interpreter: &'static str,
    backend_available: bool,
}

/// Handle the version command
pub fn handle_version(output: &mut OutputWriter) -> Result<()> {
    let interpreter = nickel_shim_core::interpreter_version();
    let info = VersionInfo {
        shim: nickel_shim_core::VERSION,
        interpreter,
        backend_available: interpreter != UNAVAILABLE_VERSION,
    };

    if output.format() != OutputFormat::Human {
        return output.data(&info);
    }

    output.writeln(&format!("nickel-shim {}", info.shim))?;
    output.writeln(&format!("nickel {}", info.interpreter))?;
    if !info.backend_available {
        output.warning("built without an interpreter backend")?;
    }
    Ok(())
}
