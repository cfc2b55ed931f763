//! A `libcutils`-compatible view of Android system properties.
//!
//! Values come from [`crate::system_properties`]. Unless the crate is built for Android
//! with the `system-properties` feature, that store is empty and every lookup resolves
//! to the default supplied by the caller. Check [`is_backed_by_system`] before relying
//! on a value being live.

use crate::system_properties;
use std::borrow::Cow;
use std::ffi::CStr;
use std::fmt;
use tracing::trace;

/// Maximum length of a property value, terminating NUL included.
pub const PROPERTY_VALUE_MAX: usize = 92;

/// A property value: at most `PROPERTY_VALUE_MAX - 1` bytes, never containing a NUL.
#[derive(Clone, PartialEq, Eq, Default)]
pub struct PropertyValue {
    bytes: Vec<u8>,
}

impl PropertyValue {
    /// Build a value from `bytes`, cut at the first NUL or at `PROPERTY_VALUE_MAX - 1` bytes.
    pub fn new(bytes: &[u8]) -> Self {
        let len = bytes
            .iter()
            .position(|&byte| byte == 0)
            .unwrap_or(bytes.len())
            .min(PROPERTY_VALUE_MAX - 1);
        Self {
            bytes: bytes[..len].to_vec(),
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn to_string_lossy(&self) -> Cow<str> {
        String::from_utf8_lossy(&self.bytes)
    }
}

impl fmt::Debug for PropertyValue {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        fmt::Debug::fmt(&self.to_string_lossy(), formatter)
    }
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str(&self.to_string_lossy())
    }
}

/// Whether property lookups read a live system store.
///
/// When `false` the lookups are stubs: [`get`] only ever returns the default it is given.
pub fn is_backed_by_system() -> bool {
    system_properties::IS_LIVE
}

/// Look up `key`, falling back to `default_value`.
///
/// Returns `None` only when the property is unset and there is no default. A missing key
/// skips the store entirely.
pub fn get(key: Option<&CStr>, default_value: Option<&[u8]>) -> Option<PropertyValue> {
    if let Some(value) = key.and_then(system_properties::lookup) {
        return Some(value);
    }
    trace!(key = ?key, "using default property value");
    default_value.map(PropertyValue::new)
}

/// Parse a boolean flag the way `libcutils` does. `None` means the value is not a
/// recognised token.
pub fn parse_bool(value: &[u8]) -> Option<bool> {
    match value {
        b"0" | b"n" => Some(false),
        b"1" | b"y" => Some(true),
        b"no" | b"false" | b"off" => Some(false),
        b"yes" | b"true" | b"on" => Some(true),
        _ => None,
    }
}

/// Read `key` as a boolean flag, returning `default_value` when it is missing or
/// unrecognised.
pub fn get_bool(key: Option<&CStr>, default_value: bool) -> bool {
    let key = match key {
        Some(key) => key,
        None => return default_value,
    };
    get(Some(key), Some(&b""[..]))
        .and_then(|value| parse_bool(value.as_bytes()))
        .unwrap_or(default_value)
}

fn is_c_space(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\n' | b'\r' | 0x0b | 0x0c)
}

/// Parse the leading integer of `value` like C's `strtoimax(value, &end, 0)`.
///
/// Skips leading whitespace, accepts an optional sign and picks the radix from the
/// prefix (`0x` hex, `0` octal, decimal otherwise). Trailing characters are ignored.
/// Returns `None` if no digit was read or the value does not fit in an `i64`.
pub fn parse_integer(value: &[u8]) -> Option<i64> {
    let start = value
        .iter()
        .position(|&byte| !is_c_space(byte))
        .unwrap_or(value.len());
    let mut rest = &value[start..];

    let negative = match rest.first() {
        Some(b'-') => {
            rest = &rest[1..];
            true
        }
        Some(b'+') => {
            rest = &rest[1..];
            false
        }
        _ => false,
    };

    let has_hex_prefix = rest.len() > 2
        && rest[0] == b'0'
        && (rest[1] == b'x' || rest[1] == b'X')
        && rest[2].is_ascii_hexdigit();
    let (radix, digits) = if has_hex_prefix {
        (16, &rest[2..])
    } else if rest.first() == Some(&b'0') {
        (8, rest)
    } else {
        (10, rest)
    };

    let digits = digits
        .iter()
        .map_while(|&byte| (byte as char).to_digit(radix))
        .collect::<Vec<_>>();
    if digits.is_empty() {
        return None;
    }
    // Accumulate towards the sign so that `i64::MIN` is representable.
    digits.into_iter().try_fold(0i64, |value, digit| {
        let value = value.checked_mul(i64::from(radix))?;
        if negative {
            value.checked_sub(i64::from(digit))
        } else {
            value.checked_add(i64::from(digit))
        }
    })
}

/// Read `key` as an integer in `[min_value, max_value]`, returning `default_value` when it
/// is missing, malformed or out of range.
pub fn get_int64(key: Option<&CStr>, default_value: i64, min_value: i64, max_value: i64) -> i64 {
    let key = match key {
        Some(key) => key,
        None => return default_value,
    };
    get(Some(key), Some(&b""[..]))
        .and_then(|value| parse_integer(value.as_bytes()))
        .filter(|value| (min_value..=max_value).contains(value))
        .unwrap_or(default_value)
}

/// 32-bit variant of [`get_int64`].
pub fn get_int32(key: Option<&CStr>, default_value: i32, min_value: i32, max_value: i32) -> i32 {
    // The range check keeps the result within `i32`.
    get_int64(
        key,
        i64::from(default_value),
        i64::from(min_value),
        i64::from(max_value),
    ) as i32
}
