//! Output formatting and writing utilities
//!
//! Program values arrive as JSON text from the engine and are re-rendered in
//! the requested output format. Status messages only appear in human mode.

use crate::cli::OutputFormat;
use crate::error::Result;
use colored::Colorize;
use serde::Serialize;
use serde_json::Value;
use std::io::{self, Write};

/// Output writer that handles different output formats and colors
pub struct OutputWriter {
    format: OutputFormat,
    use_color: bool,
    quiet: bool,
    writer: Box<dyn Write>,
}

impl OutputWriter {
    /// Create a new output writer on stdout
    pub fn new(format: OutputFormat, use_color: bool, quiet: bool) -> Self {
        Self::with_writer(format, use_color, quiet, Box::new(io::stdout()))
    }

    /// Create an output writer with a custom writer
    pub fn with_writer(
        format: OutputFormat,
        use_color: bool,
        quiet: bool,
        writer: Box<dyn Write>,
    ) -> Self {
        Self {
            format,
            use_color,
            quiet,
            writer,
        }
    }

    /// Get the output format
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Write a line of output
    pub fn writeln(&mut self, content: &str) -> Result<()> {
        writeln!(self.writer, "{}", content)?;
        self.writer.flush()?;
        Ok(())
    }

    /// Write a success message
    pub fn success(&mut self, message: &str) -> Result<()> {
        if self.quiet || self.format != OutputFormat::Human {
            return Ok(());
        }

        if self.use_color {
            self.writeln(&message.green().to_string())
        } else {
            self.writeln(message)
        }
    }

    /// Write a warning message
    pub fn warning(&mut self, message: &str) -> Result<()> {
        if self.format != OutputFormat::Human {
            return Ok(());
        }

        if self.use_color {
            self.writeln(&message.yellow().to_string())
        } else {
            self.writeln(&format!("WARNING: {}", message))
        }
    }

    /// Write a program value produced by the engine
    ///
    /// Human output keeps the engine's text, including its key order; the
    /// other formats re-encode it.
    pub fn value(&mut self, json: &str) -> Result<()> {
        if self.format == OutputFormat::Human {
            return self.writeln(json.trim_end());
        }

        let value: Value = serde_json::from_str(json)?;
        self.data(&value)
    }

    /// Write data in the configured format
    pub fn data<T: Serialize>(&mut self, value: &T) -> Result<()> {
        let formatted = match self.format {
            OutputFormat::Json => serde_json::to_string(value)?,
            OutputFormat::JsonPretty | OutputFormat::Human => serde_json::to_string_pretty(value)?,
            OutputFormat::Yaml => serde_yaml::to_string(value)?,
        };

        self.writeln(formatted.trim_end())
    }
}


#[cfg(test)]
mod tests {
    use super::testing::writer;
    use super::*;
    use pretty_assertions::assert_eq;

    const VALUE: &str = "{\n  \"a\": [true, null],\n  \"b\": 1\n}";

    #[test]
    fn test_human_value_is_verbatim() {
        let (mut output, buffer) = writer(OutputFormat::Human, false);
        output.value(VALUE).unwrap();
        assert_eq!(buffer.contents(), format!("{}\n", VALUE));
    }

    #[test]
    fn test_json_value_is_compact() {
        let (mut output, buffer) = writer(OutputFormat::Json, false);
        output.value(VALUE).unwrap();
        assert_eq!(buffer.contents(), "{\"a\":[true,null],\"b\":1}\n");
    }

    #[test]
    fn test_yaml_value() {
        let (mut output, buffer) = writer(OutputFormat::Yaml, false);
        output.value("{\"name\": \"shim\"}").unwrap();
        assert_eq!(buffer.contents(), "name: shim\n");
    }

    #[test]
    fn test_messages_respect_mode() {
        let (mut quiet, quiet_buffer) = writer(OutputFormat::Human, true);
        quiet.success("done").unwrap();
        assert_eq!(quiet_buffer.contents(), "");

        let (mut json, json_buffer) = writer(OutputFormat::Json, false);
        json.success("done").unwrap();
        json.warning("careful").unwrap();
        assert_eq!(json_buffer.contents(), "");

        let (mut human, human_buffer) = writer(OutputFormat::Human, false);
        human.success("done").unwrap();
        human.warning("careful").unwrap();
        assert_eq!(human_buffer.contents(), "done\nWARNING: careful\n");
    }
}
