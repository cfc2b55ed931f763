//! Native side of `dalvik.system.NativeArray`, used by tests to check that values
//! written to native memory are visible to Java after crossing the JNI boundary.

use crate::error::{check_status, NativeError};
use crate::java_string::to_java_string;
use crate::jni_bool::to_jni;
use jni_sys;
use std::os::raw::{c_char, c_void};
use std::slice;
use tracing::{debug, warn};

/// The Java class owning the native method.
pub const NATIVE_ARRAY_CLASS: &str = "dalvik/system/NativeArray";
/// Name of the registered native method.
pub const NATIVE_ARRAY_METHOD: &str = "nativeWriteIntArray";
/// JNI signature of the registered native method: `boolean (long)`.
pub const NATIVE_ARRAY_SIGNATURE: &str = "(J)Z";
/// Values written at the start of the buffer.
pub const NATIVE_ARRAY_VALUES: [u32; 3] = [1, 2, 3];

/// Write [`NATIVE_ARRAY_VALUES`] into the first three elements of `values`.
///
/// Elements past the third are left untouched. Always returns `true`.
///
/// # Panics
///
/// If `values` holds fewer than three elements.
pub fn write_int_array(values: &mut [u32]) -> bool {
    assert!(
        values.len() >= NATIVE_ARRAY_VALUES.len(),
        "native array needs at least {} elements, got {}",
        NATIVE_ARRAY_VALUES.len(),
        values.len()
    );
    values[..NATIVE_ARRAY_VALUES.len()].copy_from_slice(&NATIVE_ARRAY_VALUES);
    true
}

/// `static native boolean nativeWriteIntArray(long memoryAddress)`.
///
/// Unsafe because `memory_address` must point to at least three writable, aligned `u32`s
/// owned by the caller. A zero address is rejected with `false`; nothing else can be checked.
pub unsafe extern "system" fn native_write_int_array(
    _env: *mut jni_sys::JNIEnv,
    _class: jni_sys::jclass,
    memory_address: jni_sys::jlong,
) -> jni_sys::jboolean {
    let values = memory_address as usize as *mut u32;
    if values.is_null() {
        warn!("nativeWriteIntArray called with a null address");
        return to_jni(false);
    }
    let values = slice::from_raw_parts_mut(values, NATIVE_ARRAY_VALUES.len());
    to_jni(write_int_array(values))
}

/// Bind [`native_write_int_array`] to `dalvik.system.NativeArray.nativeWriteIntArray`.
///
/// Unsafe because `raw_env` must be a valid `JNIEnv` for the current thread.
pub unsafe fn register_native_array(raw_env: *mut jni_sys::JNIEnv) -> Result<(), NativeError> {
    let class_name = to_java_string(NATIVE_ARRAY_CLASS);
    let find_class = (**raw_env).FindClass.unwrap();
    let class = find_class(raw_env, class_name.as_ptr() as *const c_char);
    if class.is_null() {
        return Err(NativeError::ClassNotFound(NATIVE_ARRAY_CLASS));
    }

    let name = to_java_string(NATIVE_ARRAY_METHOD);
    let signature = to_java_string(NATIVE_ARRAY_SIGNATURE);
    let methods = [jni_sys::JNINativeMethod {
        name: name.as_ptr() as *mut c_char,
        signature: signature.as_ptr() as *mut c_char,
        fnPtr: native_write_int_array as *mut c_void,
    }];
    let register_natives = (**raw_env).RegisterNatives.unwrap();
    let status = register_natives(
        raw_env,
        class,
        methods.as_ptr(),
        methods.len() as jni_sys::jint,
    );

    let delete_local_ref = (**raw_env).DeleteLocalRef.unwrap();
    delete_local_ref(raw_env, class);

    check_status(status)?;
    debug!(
        class = NATIVE_ARRAY_CLASS,
        method = NATIVE_ARRAY_METHOD,
        "registered native method"
    );
    Ok(())
}

/// C entry point for hosts that register natives themselves.
///
/// Returns `JNI_OK`, `JNI_ERR` if the class is missing, or the failing JNI status.
// Name fixed by the Android runtime convention.
#[allow(non_snake_case)]
#[no_mangle]
pub unsafe extern "C" fn register_dalvik_system_NativeArray(
    env: *mut jni_sys::JNIEnv,
) -> jni_sys::jint {
    match register_native_array(env) {
        Ok(()) => jni_sys::JNI_OK,
        Err(error) => error.to_raw(),
    }
}
