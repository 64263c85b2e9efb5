//! Error types for the embedding layer
//!
//! Every failure the interpreter can report is collapsed into one of a small
//! set of [`ErrorKind`]s. Messages are rendered through a bounded writer so
//! that building a diagnostic never allocates more than the configured limit.

use std::fmt::{self, Write as _};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for embedding operations
#[derive(Error, Debug)]
pub enum Error {
    /// The source text could not be parsed
    #[error("Parse error: {message}")]
    Parse { message: String },

    /// The source text is not well-typed
    #[error("Type error: {message}")]
    Typecheck { message: String },

    /// Evaluation failed at runtime (contract violation, missing field, ...)
    #[error("Evaluation error: {message}")]
    Evaluation { message: String },

    /// An import could not be resolved
    #[error("Import error: {message}")]
    Import { message: String },

    /// The value has no JSON representation (functions, ...)
    #[error("Serialization error: {message}")]
    Serialization { message: String },

    /// The source text itself is unusable (invalid UTF-8, interior NUL, ...)
    #[error("Invalid source: {message}")]
    InvalidSource { message: String },

    /// No interpreter backend is available
    #[error("Interpreter unavailable: {message}")]
    Unavailable { message: String },

    /// Invalid configuration
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// The interpreter failed for a reason unrelated to the program
    #[error("Internal error: {message}")]
    Internal { message: String },

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON errors while reading configuration or re-encoding output
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience type alias for Results using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Coarse classification of an [`Error`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Parse,
    Typecheck,
    Evaluation,
    Import,
    Serialization,
    InvalidSource,
    Unavailable,
    Configuration,
    Internal,
}

impl Error {
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
        }
    }

    pub fn typecheck(message: impl Into<String>) -> Self {
        Self::Typecheck {
            message: message.into(),
        }
    }

    pub fn evaluation(message: impl Into<String>) -> Self {
        Self::Evaluation {
            message: message.into(),
        }
    }

    pub fn import(message: impl Into<String>) -> Self {
        Self::Import {
            message: message.into(),
        }
    }

    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization {
            message: message.into(),
        }
    }

    pub fn invalid_source(message: impl Into<String>) -> Self {
        Self::InvalidSource {
            message: message.into(),
        }
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Classify this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Parse { .. } => ErrorKind::Parse,
            Self::Typecheck { .. } => ErrorKind::Typecheck,
            Self::Evaluation { .. } => ErrorKind::Evaluation,
            Self::Import { .. } => ErrorKind::Import,
            Self::Serialization { .. } => ErrorKind::Serialization,
            Self::InvalidSource { .. } => ErrorKind::InvalidSource,
            Self::Unavailable { .. } => ErrorKind::Unavailable,
            Self::Configuration { .. } => ErrorKind::Configuration,
            Self::Internal { .. } | Self::Io(_) => ErrorKind::Internal,
            Self::Json(_) => ErrorKind::Serialization,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::Parse => "parse",
            ErrorKind::Typecheck => "typecheck",
            ErrorKind::Evaluation => "evaluation",
            ErrorKind::Import => "import",
            ErrorKind::Serialization => "serialization",
            ErrorKind::InvalidSource => "invalid_source",
            ErrorKind::Unavailable => "unavailable",
            ErrorKind::Configuration => "configuration",
            ErrorKind::Internal => "internal",
        };
        f.write_str(name)
    }
}

/// Structured detail of the most recent failure on a context
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub kind: ErrorKind,
    pub message: String,
}

impl Diagnostic {
    /// Build a diagnostic from an error, keeping at most `limit` bytes of message
    pub fn from_error(error: &Error, limit: usize) -> Self {
        Self {
            kind: error.kind(),
            message: bounded_display(error, limit),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.kind, self.message)
    }
}

/// `fmt::Write` sink that refuses input past `limit` bytes.
///
/// Once full, it reports `fmt::Error`, which makes the formatting machinery
/// stop walking the value instead of rendering it completely.
struct BoundedWriter {
    buf: String,
    limit: usize,
    truncated: bool,
}

impl BoundedWriter {
    fn new(limit: usize) -> Self {
        Self {
            buf: String::new(),
            limit,
            truncated: false,
        }
    }

    fn finish(mut self) -> String {
        if self.truncated {
            self.buf.push_str("...");
        }
        self.buf
    }
}

impl fmt::Write for BoundedWriter {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let room = self.limit.saturating_sub(self.buf.len());
        if s.len() <= room {
            self.buf.push_str(s);
            return Ok(());
        }

        self.buf.push_str(&s[..floor_char_boundary(s, room)]);
        self.truncated = true;
        Err(fmt::Error)
    }
}

fn floor_char_boundary(s: &str, index: usize) -> usize {
    let mut index = index.min(s.len());
    while !s.is_char_boundary(index) {
        index -= 1;
    }
    index
}

/// Render `value` with `Display`, keeping at most `limit` bytes (plus a `...` marker)
pub fn bounded_display(value: &impl fmt::Display, limit: usize) -> String {
    let mut writer = BoundedWriter::new(limit);
    // A formatting error here only means the limit was hit.
    let _ = write!(writer, "{value}");
    writer.finish()
}

/// Render `value` with `Debug`, keeping at most `limit` bytes (plus a `...` marker)
pub fn bounded_debug(value: &impl fmt::Debug, limit: usize) -> String {
    let mut writer = BoundedWriter::new(limit);
    let _ = write!(writer, "{value:?}");
    writer.finish()
}
