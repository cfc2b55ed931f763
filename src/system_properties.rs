//! Access to the raw Android property store.
//!
//! The live store is only compiled in with the `system-properties` feature on Android.
//! Everywhere else the store behaves as if no property were ever set, so every lookup
//! falls back to the caller's default.

use crate::properties::{PropertyValue, PROPERTY_VALUE_MAX};
use cfg_if::cfg_if;
use std::ffi::CStr;
use std::os::raw::{c_char, c_int};
use tracing::trace;

#[cfg(test)]
use mockall::automock;

#[cfg_attr(test, automock)]
// The bionic symbol is only called on Android with the `system-properties` feature.
#[allow(dead_code)]
pub(crate) mod ffi {
    extern "C" {
        pub fn __system_property_get(
            name: *const std::os::raw::c_char,
            value: *mut std::os::raw::c_char,
        ) -> std::os::raw::c_int;
    }
}

cfg_if! {
    if #[cfg(test)] {
        use self::mock_ffi::__system_property_get;
    } else if #[cfg(all(feature = "system-properties", target_os = "android"))] {
        use self::ffi::__system_property_get;
    } else {
        /// Stands in for bionic's `__system_property_get` where there is no property store.
        unsafe fn __system_property_get(_name: *const c_char, value: *mut c_char) -> c_int {
            *value = 0;
            0
        }
    }
}

/// Whether lookups reach a live property store.
pub const IS_LIVE: bool = cfg!(all(feature = "system-properties", target_os = "android"));

/// Read `key` from the property store. Unset and empty properties both yield `None`.
#[allow(unused_unsafe)]
pub(crate) fn lookup(key: &CStr) -> Option<PropertyValue> {
    let mut buffer = [0 as c_char; PROPERTY_VALUE_MAX];
    // bionic writes at most PROPERTY_VALUE_MAX bytes, terminator included.
    let len = unsafe { __system_property_get(key.as_ptr(), buffer.as_mut_ptr()) };
    if len <= 0 {
        trace!(key = ?key, live = IS_LIVE, "property not set");
        return None;
    }
    let len = (len as usize).min(PROPERTY_VALUE_MAX - 1);
    let bytes = unsafe { std::slice::from_raw_parts(buffer.as_ptr() as *const u8, len) };
    Some(PropertyValue::new(bytes))
}

/// Install a mocked property store holding `properties` for the lifetime of the returned guard.
///
/// Tests using it must be `#[serial]`: the mock is process-wide.
#[cfg(test)]
pub(crate) fn mock_store(properties: &'static [(&'static str, &'static str)]) -> impl Sized {
    let context = mock_ffi::__system_property_get_context();
    context.expect().returning(move |name, value| {
        let name = unsafe { CStr::from_ptr(name) };
        let stored = properties
            .iter()
            .find(|(key, _)| key.as_bytes() == name.to_bytes())
            .map_or("", |(_, stored)| *stored);
        unsafe {
            std::ptr::copy_nonoverlapping(stored.as_ptr() as *const c_char, value, stored.len());
            *value.add(stored.len()) = 0;
        }
        stored.len() as c_int
    });
    context
}
