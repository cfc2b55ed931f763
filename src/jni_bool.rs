use jni_sys;

pub(crate) fn to_jni(value: bool) -> jni_sys::jboolean {
    match value {
        true => jni_sys::JNI_TRUE,
        false => jni_sys::JNI_FALSE,
    }
}
