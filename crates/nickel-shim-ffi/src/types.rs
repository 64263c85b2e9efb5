//! FFI-safe type definitions
//!
//! All types in this module are designed to be safely passed across
//! the FFI boundary with C ABI compatibility.

use nickel_shim_core::{Context, ErrorKind};

/// Status codes returned by the `_ex` entry points
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NickelResult {
    /// Operation completed successfully
    Success = 0,
    /// A required pointer was null
    NullPointer = -1,
    /// The source text is not valid UTF-8
    Utf8Error = -2,
    /// The source text could not be parsed
    ParseError = -3,
    /// The source text is not well-typed
    TypeError = -4,
    /// Evaluation failed at runtime
    EvalError = -5,
    /// An import could not be resolved
    ImportError = -6,
    /// The value has no JSON representation
    SerializationError = -7,
    /// The configuration is invalid
    ConfigError = -8,
    /// No interpreter backend is compiled in
    Unavailable = -9,
    /// The result buffer could not be allocated
    MemoryError = -10,
    /// Internal error, including caught panics
    InternalError = -11,
}

/// Opaque handle to an evaluation context
///
/// Created by `nickel_context_new`, destroyed exactly once by
/// `nickel_context_free`. Not safe for concurrent use from several threads.
pub struct NickelContext {
    pub(crate) inner: Context,
}

impl NickelResult {
    /// Check if the result indicates success
    pub fn is_success(self) -> bool {
        self == NickelResult::Success
    }

    /// Get a human-readable error message
    pub fn error_message(self) -> &'static str {
        match self {
            NickelResult::Success => "Success",
            NickelResult::NullPointer => "Null pointer provided",
            NickelResult::Utf8Error => "Invalid UTF-8 string",
            NickelResult::ParseError => "Parse error",
            NickelResult::TypeError => "Type error",
            NickelResult::EvalError => "Evaluation error",
            NickelResult::ImportError => "Import error",
            NickelResult::SerializationError => "Value cannot be serialized to JSON",
            NickelResult::ConfigError => "Invalid configuration",
            NickelResult::Unavailable => "Interpreter unavailable",
            NickelResult::MemoryError => "Memory allocation failed",
            NickelResult::InternalError => "Internal error",
        }
    }
}

impl From<ErrorKind> for NickelResult {
    fn from(kind: ErrorKind) -> Self {
        match kind {
            ErrorKind::Parse => NickelResult::ParseError,
            ErrorKind::Typecheck => NickelResult::TypeError,
            ErrorKind::Evaluation => NickelResult::EvalError,
            ErrorKind::Import => NickelResult::ImportError,
            ErrorKind::Serialization => NickelResult::SerializationError,
            ErrorKind::InvalidSource => NickelResult::Utf8Error,
            ErrorKind::Unavailable => NickelResult::Unavailable,
            ErrorKind::Configuration => NickelResult::ConfigError,
            ErrorKind::Internal => NickelResult::InternalError,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kind_mapping() {
        assert_eq!(NickelResult::from(ErrorKind::Parse), NickelResult::ParseError);
        assert_eq!(NickelResult::from(ErrorKind::Typecheck), NickelResult::TypeError);
        assert_eq!(
            NickelResult::from(ErrorKind::Serialization),
            NickelResult::SerializationError
        );
        assert!(!NickelResult::from(ErrorKind::Internal).is_success());
    }

    #[test]
    fn test_codes_are_stable() {
        assert_eq!(NickelResult::Success as i32, 0);
        assert_eq!(NickelResult::NullPointer as i32, -1);
        assert_eq!(NickelResult::InternalError as i32, -11);
    }
}
