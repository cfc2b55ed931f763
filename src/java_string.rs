/// JNI names classes, methods and signatures with null-terminated
/// [modified UTF-8 strings](https://docs.oracle.com/javase/10/docs/specs/jni/types.html#modified-utf-8-strings).
/// The `cesu8` crate handles the encoding; this module adds the terminator.
use cesu8;
#[cfg(test)]
use cesu8::Cesu8DecodingError;
#[cfg(test)]
use std::borrow::Cow;

/// Convert a Rust UTF-8 string into a null-terminated Java modified UTF-8 buffer.
pub fn to_java_string(string: &str) -> Vec<u8> {
    let mut buffer = cesu8::to_java_cesu8(string).into_owned();
    buffer.push(0);
    buffer
}

/// Decode a null-terminated Java modified UTF-8 buffer, as handed to the mocked JNI table.
#[cfg(test)]
pub fn from_java_string(buffer: &[u8]) -> Result<Cow<str>, Cesu8DecodingError> {
    let end = buffer.len().saturating_sub(1);
    cesu8::from_java_cesu8(&buffer[..end])
}
