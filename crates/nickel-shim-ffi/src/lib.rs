//! Nickel FFI - C ABI for embedding the Nickel configuration language
//!
//! The minimal contract mirrors `include/nickel_ffi.h`:
//!
//! | Function | Returns | Ownership |
//! |---|---|---|
//! | `nickel_context_new` | context or null | caller frees with `nickel_context_free` |
//! | `nickel_eval` | JSON string or null | caller frees with `nickel_string_free` |
//! | `nickel_typecheck` | 1 valid / 0 invalid or error | none |
//! | `nickel_version` | static string | never freed |
//!
//! The `_ex` variants, `nickel_context_new_with_config` and
//! `nickel_get_last_error` extend it with status codes and error messages.
//!
//! # Safety
//!
//! All FFI functions are marked `unsafe` as they deal with raw pointers
//! and cross-language boundaries. Users must ensure:
//! - Every returned string is freed exactly once with `nickel_string_free`,
//!   and static strings (versions, last error) are never freed
//! - A context is used by one thread at a time and never after
//!   `nickel_context_free`
//! - String arguments are NUL-terminated

#![warn(missing_docs)]

#[macro_use]
mod error;
mod api;
mod memory;
mod types;

pub use api::*;
pub use memory::{nickel_clear_error, nickel_get_last_error, nickel_string_free};
pub use types::{NickelContext, NickelResult};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        unsafe {
            let version = nickel_version();
            assert!(!version.is_null());
        }
    }
}
