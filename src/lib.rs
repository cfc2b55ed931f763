//! Native glue for layoutlib tests.
//!
//! * [`native_array`]: the `dalvik.system.NativeArray` JNI shim that writes `1, 2, 3`
//!   into a native buffer, registered from [`JNI_OnLoad`].
//! * [`properties`]: a `libcutils`-style system property reader, exported to C by
//!   [`cutils`]. Without the `system-properties` feature on Android it never sees a
//!   live value and always yields the caller's default.

extern crate cesu8;
extern crate jni_sys;
#[cfg(test)]
#[macro_use]
extern crate lazy_static;

#[cfg(test)]
#[macro_use]
mod testing;

mod error;
mod java_string;
mod jni_bool;
mod system_properties;
mod version;

pub mod cutils;
pub mod native_array;
mod onload;
pub mod properties;

pub use error::{JniError, NativeError};
pub use onload::{JNI_OnLoad, REQUIRED_VERSION};
pub use version::JniVersion;
