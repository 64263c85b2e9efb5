//! FFI boundary tests
//!
//! These tests verify the safety and correctness of the FFI layer,
//! including null pointer handling, memory management, and error propagation.

use nickel_ffi::*;
use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::ptr;

/// Helper to convert Rust string to C string
fn to_c_string(s: &str) -> CString {
    CString::new(s).unwrap()
}

/// Helper to convert C string pointer to Rust string
unsafe fn from_c_string(s: *const c_char) -> String {
    if s.is_null() {
        String::new()
    } else {
        CStr::from_ptr(s).to_string_lossy().into_owned()
    }
}

/// Evaluate through the minimal contract and take ownership of the result
unsafe fn eval_owned(ctx: *mut NickelContext, source: &str) -> Option<String> {
    let source = to_c_string(source);
    let out = nickel_eval(ctx, source.as_ptr());
    if out.is_null() {
        return None;
    }
    let json = from_c_string(out);
    nickel_string_free(out);
    Some(json)
}

unsafe fn quiet_context() -> *mut NickelContext {
    let config = to_c_string(r#"{"trace": "discard"}"#);
    nickel_context_new_with_config(config.as_ptr())
}

#[test]
fn test_null_frees_are_noops() {
    unsafe {
        nickel_context_free(ptr::null_mut());
        nickel_string_free(ptr::null_mut());
    }
}

#[test]
fn test_null_handle_rejected() {
    unsafe {
        let source = to_c_string("1 + 1");
        assert!(nickel_eval(ptr::null_mut(), source.as_ptr()).is_null());
        assert_eq!(nickel_typecheck(ptr::null_mut(), source.as_ptr()), 0);

        let mut out: *mut c_char = ptr::null_mut();
        let result = nickel_eval_ex(ptr::null_mut(), source.as_ptr(), &mut out);
        assert_eq!(result, NickelResult::NullPointer);
        assert!(out.is_null());

        let error = from_c_string(nickel_get_last_error());
        assert!(error.contains("ctx"));

        nickel_clear_error();
        assert!(nickel_get_last_error().is_null());
    }
}

#[test]
fn test_version_is_static_and_stable() {
    unsafe {
        let first = nickel_version();
        let second = nickel_version();
        assert!(!first.is_null());
        assert_eq!(first, second);

        let before = from_c_string(first);
        assert!(!before.is_empty());

        // Other operations never touch it
        let ctx = nickel_context_new();
        if !ctx.is_null() {
            let _ = eval_owned(ctx, "{ a = 1 }");
            nickel_context_free(ctx);
        }
        assert_eq!(from_c_string(nickel_version()), before);
    }
}

#[test]
fn test_invalid_config_json() {
    unsafe {
        let bad = to_c_string("{ not json");
        assert!(nickel_context_new_with_config(bad.as_ptr()).is_null());
        assert!(!nickel_get_last_error().is_null());

        let empty_name = to_c_string(r#"{"source_name": ""}"#);
        assert!(nickel_context_new_with_config(empty_name.as_ptr()).is_null());

        assert!(nickel_context_new_with_config(ptr::null()).is_null());
    }
}

#[cfg(not(feature = "nickel"))]
#[test]
fn test_context_creation_fails_without_backend() {
    unsafe {
        assert!(nickel_context_new().is_null());
        let error = from_c_string(nickel_get_last_error());
        assert!(error.contains("unavailable"));
        assert_eq!(from_c_string(nickel_version()), "unavailable");
    }
}

#[cfg(feature = "nickel")]
mod nickel_backend {
    use super::*;

    #[test]
    fn test_context_lifecycle() {
        unsafe {
            let ctx = nickel_context_new();
            assert!(!ctx.is_null());
            nickel_context_free(ctx);
        }
    }

    #[test]
    fn test_round_trip() {
        unsafe {
            let ctx = quiet_context();
            assert!(!ctx.is_null());

            let source = to_c_string("1 + 1");
            let result = nickel_eval(ctx, source.as_ptr());
            assert!(!result.is_null());
            assert_eq!(CStr::from_ptr(result).to_str().unwrap(), "2");
            nickel_string_free(result);

            nickel_context_free(ctx);
        }
    }

    #[test]
    fn test_record_evaluates_to_json_object() {
        unsafe {
            let ctx = quiet_context();
            let json = eval_owned(ctx, r#"{ host = "localhost", port = 8000 + 80 }"#).unwrap();
            let value: serde_json::Value = serde_json::from_str(&json).unwrap();
            assert_eq!(value, serde_json::json!({ "host": "localhost", "port": 8080 }));
            nickel_context_free(ctx);
        }
    }

    #[test]
    fn test_compact_config() {
        unsafe {
            let config = to_c_string(r#"{"json_style": "compact", "trace": "discard"}"#);
            let ctx = nickel_context_new_with_config(config.as_ptr());
            assert!(!ctx.is_null());
            assert_eq!(eval_owned(ctx, "{ a = [1, 2] }").unwrap(), r#"{"a":[1,2]}"#);
            nickel_context_free(ctx);
        }
    }

    #[test]
    fn test_malformed_source() {
        unsafe {
            let ctx = quiet_context();
            let source = to_c_string("{ a = ");

            assert!(nickel_eval(ctx, source.as_ptr()).is_null());
            assert_eq!(nickel_typecheck(ctx, source.as_ptr()), 0);

            let mut out: *mut c_char = ptr::null_mut();
            assert_eq!(
                nickel_eval_ex(ctx, source.as_ptr(), &mut out),
                NickelResult::ParseError
            );
            assert!(out.is_null());
            assert!(!nickel_get_last_error().is_null());

            nickel_context_free(ctx);
        }
    }

    #[test]
    fn test_unserializable_value() {
        unsafe {
            let ctx = quiet_context();
            let source = to_c_string("fun x => x");
            let mut out: *mut c_char = ptr::null_mut();
            assert_eq!(
                nickel_eval_ex(ctx, source.as_ptr(), &mut out),
                NickelResult::SerializationError
            );
            assert!(out.is_null());
            nickel_context_free(ctx);
        }
    }

    #[test]
    fn test_typecheck() {
        unsafe {
            let ctx = quiet_context();

            let good = to_c_string("let x : Number = 1 in x + 1");
            assert_eq!(nickel_typecheck(ctx, good.as_ptr()), 1);

            let bad = to_c_string(r#"let x : Number = "a" in x"#);
            assert_eq!(nickel_typecheck(ctx, bad.as_ptr()), 0);
            assert_eq!(nickel_typecheck_ex(ctx, bad.as_ptr()), NickelResult::TypeError);

            // Typechecking leaves later evaluations untouched
            assert_eq!(eval_owned(ctx, "let x : Number = 1 in x + 1").unwrap(), "2");

            nickel_context_free(ctx);
        }
    }

    #[test]
    fn test_invalid_utf8_handling() {
        unsafe {
            let ctx = quiet_context();
            let invalid_utf8 = [0xFFu8, 0xFE, 0x00];
            let invalid_ptr = invalid_utf8.as_ptr() as *const c_char;

            assert!(nickel_eval(ctx, invalid_ptr).is_null());
            assert_eq!(nickel_typecheck_ex(ctx, invalid_ptr), NickelResult::Utf8Error);

            nickel_context_free(ctx);
        }
    }

    #[test]
    fn test_null_source() {
        unsafe {
            let ctx = quiet_context();
            assert!(nickel_eval(ctx, ptr::null()).is_null());
            assert_eq!(nickel_typecheck_ex(ctx, ptr::null()), NickelResult::NullPointer);
            nickel_context_free(ctx);
        }
    }

    #[test]
    fn test_concurrent_contexts() {
        use std::thread;

        let programs = [
            ("{ worker = \"one\" }", serde_json::json!({ "worker": "one" })),
            ("[1, 2, 3] |> std.array.map (fun n => n * 10)", serde_json::json!([10, 20, 30])),
        ];

        let threads: Vec<_> = programs
            .into_iter()
            .map(|(program, expected)| {
                thread::spawn(move || unsafe {
                    let ctx = quiet_context();
                    assert!(!ctx.is_null());
                    for _ in 0..10 {
                        let json = eval_owned(ctx, program).unwrap();
                        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
                        assert_eq!(value, expected);
                    }
                    nickel_context_free(ctx);
                })
            })
            .collect();

        for t in threads {
            t.join().unwrap();
        }
    }

    #[test]
    fn test_repeated_allocations() {
        for _ in 0..100 {
            unsafe {
                let ctx = nickel_context_new();
                assert!(!ctx.is_null());
                nickel_context_free(ctx);
            }
        }
    }
}
