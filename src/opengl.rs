use std::{
    ffi::{c_void, CStr},
    ptr,
};

use gl::types::{GLchar, GLenum, GLsizei, GLuint};
use log::{debug, error, info, warn};

/// The GL entry points a shader program needs.
pub mod driver;

/// `GlApi` over the `gl` crate.
pub mod gl_driver;

#[cfg(test)]
pub mod recording;

/// Routes driver debug output into `log`.
/// Does nothing on contexts without `KHR_debug` (pre-4.3).
pub fn init_debug() {
    if !gl::DebugMessageCallback::is_loaded() {
        debug!("glDebugMessageCallback isn't available, driver debug output stays off");
        return;
    }

    unsafe {
        gl::Enable(gl::DEBUG_OUTPUT);
        gl::Enable(gl::DEBUG_OUTPUT_SYNCHRONOUS);
        gl::DebugMessageCallback(Some(gl_debug_callback), ptr::null());
        gl::DebugMessageControl(
            gl::DONT_CARE,
            gl::DONT_CARE,
            gl::DONT_CARE,
            0,
            ptr::null(),
            gl::TRUE,
        );
    };
}

extern "system" fn gl_debug_callback(
    _src: GLenum,
    _typ: GLenum,
    id: GLuint,
    severity: GLenum,
    _len: GLsizei,
    msg: *const GLchar,
    _user_param: *mut c_void,
) {
    // Buffer creation on NVidia cards
    if id == 131185 {
        return;
    }

    let msg = unsafe { CStr::from_ptr(msg) };
    let msg = msg.to_string_lossy();

    match severity {
        gl::DEBUG_SEVERITY_NOTIFICATION => debug!("OpenGL - notification: '{msg}'"),
        gl::DEBUG_SEVERITY_LOW => info!("OpenGL - low: '{msg}'"),
        gl::DEBUG_SEVERITY_MEDIUM => warn!("OpenGL - medium: '{msg}'"),
        gl::DEBUG_SEVERITY_HIGH => error!("OpenGL - high: '{msg}'"),
        _ => warn!("OpenGL - unknown severity {severity}: '{msg}'"),
    }
}
