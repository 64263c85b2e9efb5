//! Error handling for FFI boundary
//!
//! Nothing may unwind into foreign frames. Every entry point runs its body
//! through [`catch_panic`], and every core error is logged, copied into the
//! thread-local last error and reduced to a [`NickelResult`].

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use nickel_shim_core::Error;

use crate::memory::set_last_error;
use crate::types::NickelResult;

/// Convert a core error to an FFI result code
pub fn map_core_error(error: Error) -> NickelResult {
    let code = NickelResult::from(error.kind());
    tracing::debug!(code = ?code, "Boundary call failed: {}", error);
    set_last_error(error.to_string());
    code
}

/// Safely execute a closure that might panic
///
/// A panic is turned into `InternalError`. The closure is asserted unwind
/// safe: after a panic the only context state that may be stale is its last
/// diagnostic.
pub fn catch_panic<F, R>(f: F) -> Result<R, NickelResult>
where
    F: FnOnce() -> Result<R, NickelResult>,
{
    match panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(result) => result,
        Err(panic_info) => {
            let msg = get_panic_message(&panic_info);
            tracing::error!("Panic caught at FFI boundary: {}", msg);
            set_last_error(format!("Panic occurred: {}", msg));
            Err(NickelResult::InternalError)
        }
    }
}

/// Extract a message from panic info
fn get_panic_message(panic_info: &Box<dyn Any + Send>) -> String {
    if let Some(s) = panic_info.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = panic_info.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "Unknown panic".to_string()
    }
}

/// Run a status-returning FFI body, converting `Err` and panics into codes
#[macro_export]
macro_rules! ffi_boundary {
    ($body:expr) => {{
        match $crate::error::catch_panic(|| $body) {
            Ok(code) => code,
            Err(code) => code,
        }
    }};
}

/// Validate that a pointer is not null
pub fn validate_ptr<T>(ptr: *const T, name: &str) -> Result<(), NickelResult> {
    if ptr.is_null() {
        set_last_error(format!("{} is null", name));
        Err(NickelResult::NullPointer)
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::clear_last_error;
    use std::ffi::CStr;

    #[test]
    fn test_panic_catching() {
        let result: Result<i32, NickelResult> = catch_panic(|| panic!("Test panic"));
        assert_eq!(result.unwrap_err(), NickelResult::InternalError);

        let message = unsafe { CStr::from_ptr(crate::memory::nickel_get_last_error()) };
        assert!(message.to_str().unwrap().contains("Test panic"));
    }

    #[test]
    fn test_boundary_macro() {
        let ok = ffi_boundary!({ Ok::<_, NickelResult>(NickelResult::Success) });
        assert_eq!(ok, NickelResult::Success);

        let err = ffi_boundary!({ Err::<NickelResult, _>(NickelResult::NullPointer) });
        assert_eq!(err, NickelResult::NullPointer);
    }

    #[test]
    fn test_map_core_error_sets_message() {
        clear_last_error();
        let code = map_core_error(Error::typecheck("expected Number"));
        assert_eq!(code, NickelResult::TypeError);

        let message = unsafe { CStr::from_ptr(crate::memory::nickel_get_last_error()) };
        assert_eq!(message.to_str().unwrap(), "Type error: expected Number");
    }

    #[test]
    fn test_ptr_validation() {
        let value = 42;
        assert!(validate_ptr(&value as *const i32, "value").is_ok());
        assert_eq!(
            validate_ptr(std::ptr::null::<i32>(), "null_ptr").unwrap_err(),
            NickelResult::NullPointer
        );
    }
}
