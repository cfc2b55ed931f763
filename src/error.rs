use jni_sys;

/// Errors returned by JNI functions.
///
/// [JNI documentation](https://docs.oracle.com/javase/10/docs/specs/jni/functions.html#return-codes)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JniError {
    /// Unknown error.
    /// Needed for forward compability.
    Unknown(i32),
    /// Returned when the currect thread is not attached to a Java VM.
    ThreadDetached,
    /// Returned when requesting an unsupported JNI version.
    UnsupportedVersion,
    /// Returned when there isn't enough memory for the operation.
    NotEnoughMemory,
    /// Returned when a Java VM already exists in the current process.
    VmExists,
    /// Returned when passing invalid arguments to JNI calls.
    InvalidArguments,
}

impl JniError {
    /// Convert from a raw `jint` status. `JNI_OK` maps to `None`.
    pub(crate) fn from_raw(error: jni_sys::jint) -> Option<JniError> {
        match error {
            jni_sys::JNI_OK => None,
            jni_sys::JNI_EDETACHED => Some(JniError::ThreadDetached),
            jni_sys::JNI_EVERSION => Some(JniError::UnsupportedVersion),
            jni_sys::JNI_ENOMEM => Some(JniError::NotEnoughMemory),
            jni_sys::JNI_EEXIST => Some(JniError::VmExists),
            jni_sys::JNI_EINVAL => Some(JniError::InvalidArguments),
            error => Some(JniError::Unknown(error)),
        }
    }

    /// Convert back to the raw `jint` status.
    pub(crate) fn to_raw(self) -> jni_sys::jint {
        match self {
            JniError::ThreadDetached => jni_sys::JNI_EDETACHED,
            JniError::UnsupportedVersion => jni_sys::JNI_EVERSION,
            JniError::NotEnoughMemory => jni_sys::JNI_ENOMEM,
            JniError::VmExists => jni_sys::JNI_EEXIST,
            JniError::InvalidArguments => jni_sys::JNI_EINVAL,
            JniError::Unknown(error) => error,
        }
    }
}

/// Errors produced while wiring native methods into a Java VM.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NativeError {
    /// `FindClass` returned null. The VM leaves a `NoClassDefFoundError` pending.
    ClassNotFound(&'static str),
    /// A JNI call returned a non-`JNI_OK` status.
    Jni(JniError),
}

impl NativeError {
    /// The status reported to C callers.
    pub(crate) fn to_raw(self) -> jni_sys::jint {
        match self {
            NativeError::ClassNotFound(_) => jni_sys::JNI_ERR,
            NativeError::Jni(error) => error.to_raw(),
        }
    }
}

impl From<JniError> for NativeError {
    fn from(error: JniError) -> Self {
        NativeError::Jni(error)
    }
}

/// Turn a raw JNI status into a `Result`.
pub(crate) fn check_status(status: jni_sys::jint) -> Result<(), JniError> {
    match JniError::from_raw(status) {
        None => Ok(()),
        Some(error) => Err(error),
    }
}
