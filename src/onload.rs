use crate::error::{check_status, NativeError};
use crate::native_array::register_native_array;
use crate::version::JniVersion;
use jni_sys;
use std::os::raw::c_void;
use std::ptr;
use tracing::error;

/// The JNI version this library requires from the loading VM.
pub const REQUIRED_VERSION: JniVersion = JniVersion::V6;

unsafe fn load(java_vm: *mut jni_sys::JavaVM) -> Result<JniVersion, NativeError> {
    let mut env: *mut c_void = ptr::null_mut();
    let get_env = (**java_vm).GetEnv.unwrap();
    check_status(get_env(java_vm, &mut env, REQUIRED_VERSION.to_raw()))?;
    register_native_array(env as *mut jni_sys::JNIEnv)?;
    Ok(REQUIRED_VERSION)
}

/// Called by the VM from `System.loadLibrary`. Registers every native method of this library.
#[allow(non_snake_case)]
#[no_mangle]
pub unsafe extern "system" fn JNI_OnLoad(
    java_vm: *mut jni_sys::JavaVM,
    _reserved: *mut c_void,
) -> jni_sys::jint {
    match load(java_vm) {
        Ok(version) => version.to_raw(),
        Err(err) => {
            error!(error = ?err, "failed to load native library");
            jni_sys::JNI_ERR
        }
    }
}
