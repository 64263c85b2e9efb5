//! Memory management utilities for FFI
//!
//! Strings returned to C callers are `CString`s leaked with `into_raw` and
//! reclaimed by `nickel_string_free`. The thread-local last error message is
//! owned here and only ever lent out.

use std::cell::RefCell;
use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::ptr;

use crate::types::NickelResult;

/// Bytes kept for the thread-local error message
const MAX_LAST_ERROR_LEN: usize = 4096;

thread_local! {
    static LAST_ERROR: RefCell<Option<CString>> = const { RefCell::new(None) };
}

/// Set the last error message for the current thread
pub fn set_last_error<S: Into<String>>(err: S) {
    let mut message = err.into();
    if message.len() > MAX_LAST_ERROR_LEN {
        let mut end = MAX_LAST_ERROR_LEN;
        while !message.is_char_boundary(end) {
            end -= 1;
        }
        message.truncate(end);
    }
    // Interior NULs would cut the message short on the C side anyway
    let message = message.replace('\0', "\u{FFFD}");
    let error_string = CString::new(message).unwrap_or_default();

    LAST_ERROR.with(|e| {
        *e.borrow_mut() = Some(error_string);
    });
}

/// Clear the last error message
pub fn clear_last_error() {
    LAST_ERROR.with(|e| {
        *e.borrow_mut() = None;
    });
}

/// Hand ownership of `s` to the caller as a NUL-terminated string
///
/// The caller must free the result with `nickel_string_free`.
pub fn allocate_string(s: &str) -> Result<*mut c_char, NickelResult> {
    let mut bytes = reserve_buffer(s.len())?;
    bytes.extend_from_slice(s.as_bytes());

    match CString::new(bytes) {
        Ok(c_str) => Ok(c_str.into_raw()),
        Err(_) => {
            set_last_error("Result contains an interior NUL byte");
            Err(NickelResult::SerializationError)
        }
    }
}

/// Room for `len` bytes plus the terminator, or `MemoryError`
fn reserve_buffer(len: usize) -> Result<Vec<u8>, NickelResult> {
    let mut bytes = Vec::new();
    bytes.try_reserve_exact(len.saturating_add(1)).map_err(|e| {
        set_last_error(format!("Failed to allocate {} bytes for the result: {}", len, e));
        NickelResult::MemoryError
    })?;
    Ok(bytes)
}

/// Borrow a C string as UTF-8 for the duration of a call
///
/// # Safety
/// The pointer must be null or a valid NUL-terminated C string that outlives `'a`
pub unsafe fn c_str_to_str<'a>(s: *const c_char, name: &str) -> Result<&'a str, NickelResult> {
    if s.is_null() {
        set_last_error(format!("{} is null", name));
        return Err(NickelResult::NullPointer);
    }

    CStr::from_ptr(s).to_str().map_err(|e| {
        set_last_error(format!("Invalid UTF-8 in {}: {}", name, e));
        NickelResult::Utf8Error
    })
}

/// Free a string returned by `nickel_eval` or `nickel_eval_ex`
///
/// Null is accepted and ignored. Never pass the result of `nickel_version`,
/// `nickel_shim_version` or `nickel_get_last_error`: those are not owned by
/// the caller.
///
/// # Safety
/// The pointer must be null or have been returned by this library and not
/// freed yet.
#[no_mangle]
pub unsafe extern "C" fn nickel_string_free(s: *mut c_char) {
    if s.is_null() {
        return;
    }

    drop(CString::from_raw(s));
}

/// Get the last error message of the calling thread
///
/// Returns null when the last call succeeded or the error was cleared. The
/// pointer stays valid until the next call into this library on the same
/// thread.
///
/// # Safety
/// Returns a pointer that must NOT be freed by the caller
#[no_mangle]
pub unsafe extern "C" fn nickel_get_last_error() -> *const c_char {
    LAST_ERROR.with(|e| match &*e.borrow() {
        Some(err) => err.as_ptr(),
        None => ptr::null(),
    })
}

/// Clear the last error message of the calling thread
#[no_mangle]
pub extern "C" fn nickel_clear_error() {
    clear_last_error();
}
