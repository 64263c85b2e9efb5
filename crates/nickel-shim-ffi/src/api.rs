//! FFI API function definitions
//!
//! This module contains the extern "C" functions that form
//! the public API of the Nickel FFI layer.
//!
//! # Handle lifecycle
//!
//! `nickel_context_new` -> live handle -> `nickel_context_free` -> freed.
//! Passing a freed handle to any function is undefined behavior; it is not
//! detected at runtime.

use std::ffi::CString;
use std::os::raw::{c_char, c_int};
use std::ptr;
use std::sync::OnceLock;

use nickel_shim_core::{interpreter_version, Config, Context};

use crate::error::{catch_panic, map_core_error, validate_ptr};
use crate::ffi_boundary;
use crate::memory::{allocate_string, c_str_to_str, clear_last_error};
use crate::types::{NickelContext, NickelResult};

/// Hand a Rust-built context to C code
///
/// Lets a Rust host pick its own interpreter or configuration and then pass
/// the handle to foreign code. The handle must be released with
/// `nickel_context_free`.
pub fn into_handle(context: Context) -> *mut NickelContext {
    Box::into_raw(Box::new(NickelContext { inner: context }))
}

/// Borrow the context behind a handle
///
/// # Safety
/// `ctx` must be null or a live handle not used concurrently elsewhere
unsafe fn context_mut<'a>(ctx: *mut NickelContext) -> Result<&'a mut Context, NickelResult> {
    validate_ptr(ctx as *const NickelContext, "ctx")?;
    Ok(&mut (*ctx).inner)
}

fn new_context(config: Config) -> Result<*mut NickelContext, NickelResult> {
    let context = Context::with_config(config).map_err(map_core_error)?;
    Ok(into_handle(context))
}

/// Initialize a new Nickel context with the default configuration
///
/// Returns null if the context cannot be created, for example when the
/// library was built without an interpreter backend. The reason is available
/// from `nickel_get_last_error`.
///
/// # Safety
/// The returned context must be freed with `nickel_context_free`
#[no_mangle]
pub unsafe extern "C" fn nickel_context_new() -> *mut NickelContext {
    clear_last_error();
    catch_panic(|| new_context(Config::default())).unwrap_or(ptr::null_mut())
}

/// Initialize a new Nickel context from a JSON configuration
///
/// Recognized keys: `source_name`, `typecheck_mode` (`"walk"` or
/// `"enforce"`), `json_style` (`"pretty"` or `"compact"`), `trace`
/// (`"stderr"` or `"discard"`), `max_diagnostic_len`. Missing keys take
/// their defaults. Returns null on invalid JSON or configuration.
///
/// # Safety
/// - `config_json` must be null or a valid NUL-terminated C string
/// - The returned context must be freed with `nickel_context_free`
#[no_mangle]
pub unsafe extern "C" fn nickel_context_new_with_config(
    config_json: *const c_char,
) -> *mut NickelContext {
    clear_last_error();
    catch_panic(|| {
        let json = c_str_to_str(config_json, "config_json")?;
        let config = Config::from_json_str(json).map_err(map_core_error)?;
        new_context(config)
    })
    .unwrap_or(ptr::null_mut())
}

/// Free a Nickel context
///
/// Null is a no-op. Must not be called while another call on the same
/// handle is in flight; the handle is invalid afterwards.
///
/// # Safety
/// The context pointer must have been created by this library and not freed yet
#[no_mangle]
pub unsafe extern "C" fn nickel_context_free(ctx: *mut NickelContext) {
    if ctx.is_null() {
        return;
    }

    let _ = catch_panic(|| {
        drop(Box::from_raw(ctx));
        Ok(())
    });
}

/// Evaluate Nickel source code and return the value as JSON
///
/// Returns null on any error (null arguments, invalid UTF-8, parse, type or
/// runtime errors, values without a JSON representation such as functions).
/// Use `nickel_eval_ex` to learn which one.
///
/// Numbers are encoded as JSON numbers: `1 + 1` yields `2`. Each call
/// evaluates in a fresh program, so nothing carries over between calls.
///
/// # Safety
/// - `ctx` must be null or a live context, not used concurrently
/// - `source` must be null or a valid NUL-terminated C string; it is not
///   retained after the call
/// - The result must be freed with `nickel_string_free`
#[no_mangle]
pub unsafe extern "C" fn nickel_eval(ctx: *mut NickelContext, source: *const c_char) -> *mut c_char {
    let mut out: *mut c_char = ptr::null_mut();
    match nickel_eval_ex(ctx, source, &mut out) {
        NickelResult::Success => out,
        _ => ptr::null_mut(),
    }
}

/// Evaluate Nickel source code, reporting a status code
///
/// On success `*out_json` receives a JSON string owned by the caller. On
/// failure `*out_json` is set to null and the message is available from
/// `nickel_get_last_error`.
///
/// # Safety
/// - `ctx` must be null or a live context, not used concurrently
/// - `source` must be null or a valid NUL-terminated C string
/// - `out_json` must be null or valid for writes
/// - The output string must be freed with `nickel_string_free`
#[no_mangle]
pub unsafe extern "C" fn nickel_eval_ex(
    ctx: *mut NickelContext,
    source: *const c_char,
    out_json: *mut *mut c_char,
) -> NickelResult {
    ffi_boundary!({
        clear_last_error();

        validate_ptr(out_json, "out_json")?;
        *out_json = ptr::null_mut();

        let context = context_mut(ctx)?;
        let text = c_str_to_str(source, "source")?;

        let json = context.evaluate(text).map_err(map_core_error)?;

        *out_json = allocate_string(&json)?;
        Ok(NickelResult::Success)
    })
}

/// Type-check Nickel source code
///
/// Returns 1 if the source is well-formed and well-typed, 0 if it is not or
/// if checking itself failed. Never affects later evaluations.
///
/// # Safety
/// - `ctx` must be null or a live context, not used concurrently
/// - `source` must be null or a valid NUL-terminated C string
#[no_mangle]
pub unsafe extern "C" fn nickel_typecheck(ctx: *mut NickelContext, source: *const c_char) -> c_int {
    match nickel_typecheck_ex(ctx, source) {
        NickelResult::Success => 1,
        _ => 0,
    }
}

/// Type-check Nickel source code, reporting a status code
///
/// `Success` when well-typed; otherwise the failure class (`ParseError`,
/// `TypeError`, `InternalError`, ...) with the message in
/// `nickel_get_last_error`.
///
/// # Safety
/// - `ctx` must be null or a live context, not used concurrently
/// - `source` must be null or a valid NUL-terminated C string
#[no_mangle]
pub unsafe extern "C" fn nickel_typecheck_ex(
    ctx: *mut NickelContext,
    source: *const c_char,
) -> NickelResult {
    ffi_boundary!({
        clear_last_error();

        let context = context_mut(ctx)?;
        let text = c_str_to_str(source, "source")?;

        context.typecheck(text).map_err(map_core_error)?;
        Ok(NickelResult::Success)
    })
}

/// Get the version of the embedded Nickel interpreter
///
/// The same static string is returned on every call; it is valid for the
/// lifetime of the process.
///
/// # Safety
/// The returned string must NOT be freed, in particular not with
/// `nickel_string_free`
#[no_mangle]
pub unsafe extern "C" fn nickel_version() -> *const c_char {
    static VERSION: OnceLock<CString> = OnceLock::new();
    VERSION
        .get_or_init(|| CString::new(interpreter_version()).unwrap_or_default())
        .as_ptr()
}

/// Get the version of this library
///
/// # Safety
/// The returned string must NOT be freed
#[no_mangle]
pub unsafe extern "C" fn nickel_shim_version() -> *const c_char {
    concat!(env!("CARGO_PKG_NAME"), " ", env!("CARGO_PKG_VERSION"), "\0").as_ptr() as *const c_char
}
