/// A module with tools used in unit tests.
use crate::java_string::*;
use jni_sys;
use std::ffi::CStr;
use std::mem;
use std::os::raw::{c_char, c_void};
use std::ptr;
use std::sync::{Mutex, MutexGuard};
use std::thread;

pub fn empty_raw_java_vm() -> jni_sys::JNIInvokeInterface_ {
    jni_sys::JNIInvokeInterface_ {
        reserved0: ptr::null_mut(),
        reserved1: ptr::null_mut(),
        reserved2: ptr::null_mut(),
        DestroyJavaVM: None,
        AttachCurrentThread: None,
        DetachCurrentThread: None,
        GetEnv: None,
        AttachCurrentThreadAsDaemon: None,
    }
}

/// A JNI function table with every entry unset.
pub fn empty_raw_jni_env() -> jni_sys::JNINativeInterface_ {
    // All fields are raw pointers or `Option`s of function pointers, for which
    // all-zeroes is `null`/`None`.
    unsafe { mem::zeroed() }
}

fn java_string_arg(string: *const c_char) -> String {
    let bytes = unsafe { CStr::from_ptr(string) }.to_bytes_with_nul();
    from_java_string(bytes).unwrap().into_owned()
}

#[derive(Debug)]
pub struct FindClass {
    pub name: String,
    pub result: jni_sys::jclass,
}

impl FindClass {
    fn check(&self, name: *const c_char) -> jni_sys::jclass {
        assert_eq!(java_string_arg(name), self.name);
        self.result
    }
}

#[derive(Debug, PartialEq, Eq)]
pub struct NativeMethod {
    pub name: String,
    pub signature: String,
    pub function: *mut c_void,
}

#[derive(Debug)]
pub struct RegisterNatives {
    pub class: jni_sys::jclass,
    pub methods: Vec<NativeMethod>,
    pub result: jni_sys::jint,
}

impl RegisterNatives {
    fn check(
        &self,
        class: jni_sys::jclass,
        methods: *const jni_sys::JNINativeMethod,
        count: jni_sys::jint,
    ) -> jni_sys::jint {
        assert_eq!(class, self.class);
        assert_eq!(count as usize, self.methods.len());
        let methods = unsafe { std::slice::from_raw_parts(methods, count as usize) };
        let methods = methods
            .iter()
            .map(|method| NativeMethod {
                name: java_string_arg(method.name),
                signature: java_string_arg(method.signature),
                function: method.fnPtr,
            })
            .collect::<Vec<_>>();
        assert_eq!(methods, self.methods);
        self.result
    }
}

#[derive(Debug)]
pub struct DeleteLocalRef {
    pub object: jni_sys::jobject,
}

impl DeleteLocalRef {
    fn check(&self, object: jni_sys::jobject) {
        assert_eq!(object, self.object);
    }
}

#[derive(Debug)]
pub enum JniCall {
    FindClass(FindClass),
    RegisterNatives(RegisterNatives),
    DeleteLocalRef(DeleteLocalRef),
}

/// The ordered list of JNI calls a test expects.
#[derive(Debug)]
pub struct JniCalls {
    pub calls: Vec<JniCall>,
    pub current_call: usize,
    pub env: *mut jni_sys::JNIEnv,
}

// Only used from tests, each with its own static.
unsafe impl Send for JniCalls {}

impl JniCalls {
    pub fn new() -> Self {
        Self {
            calls: vec![],
            current_call: 0,
            env: ptr::null_mut(),
        }
    }

    fn next_call(&mut self, env: *mut jni_sys::JNIEnv, method_name: &str) -> &JniCall {
        assert_eq!(env, self.env);
        let current_call = self.current_call;
        if current_call >= self.calls.len() {
            panic!("Unexpected {} method call.", method_name);
        }
        self.current_call += 1;
        &self.calls[current_call]
    }

    pub fn find_class(
        &mut self,
        env: *mut jni_sys::JNIEnv,
        name: *const c_char,
    ) -> jni_sys::jclass {
        match self.next_call(env, "FindClass") {
            JniCall::FindClass(call) => call.check(name),
            call => panic!("Unexpected call {:?}, actual call: FindClass.", call),
        }
    }

    pub fn register_natives(
        &mut self,
        env: *mut jni_sys::JNIEnv,
        class: jni_sys::jclass,
        methods: *const jni_sys::JNINativeMethod,
        count: jni_sys::jint,
    ) -> jni_sys::jint {
        match self.next_call(env, "RegisterNatives") {
            JniCall::RegisterNatives(call) => call.check(class, methods, count),
            call => panic!("Unexpected call {:?}, actual call: RegisterNatives.", call),
        }
    }

    pub fn delete_local_ref(&mut self, env: *mut jni_sys::JNIEnv, object: jni_sys::jobject) {
        match self.next_call(env, "DeleteLocalRef") {
            JniCall::DeleteLocalRef(call) => call.check(object),
            call => panic!("Unexpected call {:?}, actual call: DeleteLocalRef.", call),
        }
    }
}

/// A fake `JNIEnv` backed by a function table whose entries check a [`JniCalls`] list.
///
/// Checks that every expected call has happened when dropped.
pub struct TestJniEnv {
    calls: &'static Mutex<JniCalls>,
    // Boxed so that `env` keeps pointing at `table` after a move.
    _table: Box<jni_sys::JNINativeInterface_>,
    env: Box<jni_sys::JNIEnv>,
}

impl TestJniEnv {
    pub fn new(
        calls: &'static Mutex<JniCalls>,
        expected: Vec<JniCall>,
        table: jni_sys::JNINativeInterface_,
    ) -> Self {
        let table = Box::new(table);
        let mut env: Box<jni_sys::JNIEnv> = Box::new(&*table as *const _);
        {
            let mut calls = lock(calls);
            calls.calls = expected;
            calls.current_call = 0;
            calls.env = &mut *env as *mut jni_sys::JNIEnv;
        }
        Self {
            calls,
            _table: table,
            env,
        }
    }

    pub fn raw_env(&mut self) -> *mut jni_sys::JNIEnv {
        &mut *self.env as *mut jni_sys::JNIEnv
    }
}

impl Drop for TestJniEnv {
    fn drop(&mut self) {
        if thread::panicking() {
            return;
        }
        let calls = lock(self.calls);
        // Test that all expected calls have happened.
        assert_eq!(calls.current_call, calls.calls.len());
    }
}

pub fn lock(calls: &'static Mutex<JniCalls>) -> MutexGuard<'static, JniCalls> {
    calls.lock().unwrap_or_else(|error| error.into_inner())
}

/// Build a [`TestJniEnv`] expecting `$calls` in order.
macro_rules! test_raw_jni_env {
    ($calls:expr) => {{
        lazy_static! {
            static ref CALLS: ::std::sync::Mutex<$crate::testing::JniCalls> =
                ::std::sync::Mutex::new($crate::testing::JniCalls::new());
        }
        unsafe extern "system" fn find_class(
            env: *mut ::jni_sys::JNIEnv,
            name: *const ::std::os::raw::c_char,
        ) -> ::jni_sys::jclass {
            $crate::testing::lock(&CALLS).find_class(env, name)
        }
        unsafe extern "system" fn register_natives(
            env: *mut ::jni_sys::JNIEnv,
            class: ::jni_sys::jclass,
            methods: *const ::jni_sys::JNINativeMethod,
            count: ::jni_sys::jint,
        ) -> ::jni_sys::jint {
            $crate::testing::lock(&CALLS).register_natives(env, class, methods, count)
        }
        unsafe extern "system" fn delete_local_ref(
            env: *mut ::jni_sys::JNIEnv,
            object: ::jni_sys::jobject,
        ) {
            $crate::testing::lock(&CALLS).delete_local_ref(env, object)
        }
        let raw_env = ::jni_sys::JNINativeInterface_ {
            FindClass: Some(find_class),
            RegisterNatives: Some(register_natives),
            DeleteLocalRef: Some(delete_local_ref),
            ..$crate::testing::empty_raw_jni_env()
        };
        $crate::testing::TestJniEnv::new(&CALLS, $calls, raw_env)
    }};
}
