//! C entry points matching `<cutils/properties.h>`.

use crate::properties::{self, PropertyValue, PROPERTY_VALUE_MAX};
use std::ffi::CStr;
use std::os::raw::{c_char, c_int};
use std::ptr;
use std::slice;

/// Borrow a nullable C string.
unsafe fn optional_c_str<'a>(string: *const c_char) -> Option<&'a CStr> {
    if string.is_null() {
        None
    } else {
        Some(CStr::from_ptr(string))
    }
}

/// Borrow at most `max_len` bytes of a nullable C string, like `strnlen`. Never reads past
/// the terminator or past `max_len` bytes.
unsafe fn bounded_c_bytes<'a>(string: *const c_char, max_len: usize) -> Option<&'a [u8]> {
    if string.is_null() {
        return None;
    }
    let string = string as *const u8;
    let mut len = 0;
    while len < max_len && *string.add(len) != 0 {
        len += 1;
    }
    Some(slice::from_raw_parts(string, len))
}

/// Copy `value` and a terminating NUL into `out`, which must hold `PROPERTY_VALUE_MAX` bytes.
unsafe fn write_value(value: &PropertyValue, out: *mut c_char) {
    let bytes = value.as_bytes();
    ptr::copy_nonoverlapping(bytes.as_ptr() as *const c_char, out, bytes.len());
    *out.add(bytes.len()) = 0;
}

/// `int property_get(const char* key, char* value, const char* default_value)`.
///
/// Writes the property, or `default_value` if it is unset, into `value` and returns its
/// length. Writes nothing and returns 0 when neither exists or `value` is null.
#[no_mangle]
pub unsafe extern "C" fn property_get(
    key: *const c_char,
    value: *mut c_char,
    default_value: *const c_char,
) -> c_int {
    let default_value = bounded_c_bytes(default_value, PROPERTY_VALUE_MAX - 1);
    let result = match properties::get(optional_c_str(key), default_value) {
        Some(result) => result,
        None => return 0,
    };
    if value.is_null() {
        return 0;
    }
    write_value(&result, value);
    result.len() as c_int
}

/// `int8_t property_get_bool(const char* key, int8_t default_value)`.
///
/// Returns 0 or 1 for a recognised value and `default_value` unchanged otherwise.
#[no_mangle]
pub unsafe extern "C" fn property_get_bool(key: *const c_char, default_value: i8) -> i8 {
    let key = match optional_c_str(key) {
        Some(key) => key,
        None => return default_value,
    };
    match properties::get(Some(key), Some(&b""[..])) {
        Some(value) => match properties::parse_bool(value.as_bytes()) {
            Some(flag) => flag as i8,
            None => default_value,
        },
        None => default_value,
    }
}

/// `int64_t property_get_int64(const char* key, int64_t default_value)`.
#[no_mangle]
pub unsafe extern "C" fn property_get_int64(key: *const c_char, default_value: i64) -> i64 {
    properties::get_int64(optional_c_str(key), default_value, i64::MIN, i64::MAX)
}

/// `int32_t property_get_int32(const char* key, int32_t default_value)`.
#[no_mangle]
pub unsafe extern "C" fn property_get_int32(key: *const c_char, default_value: i32) -> i32 {
    properties::get_int32(optional_c_str(key), default_value, i32::MIN, i32::MAX)
}
