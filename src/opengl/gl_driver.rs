use std::ffi::CStr;

use gl::types::{GLchar, GLint, GLsizei, GLuint};

use super::driver::{GlApi, ShaderKind};

/// `GlApi` backed by the global function pointers of the `gl` crate.
/// `gl::load_with` has to be called on a current context before any of these are used.
#[derive(Debug, Clone, Copy, Default)]
pub struct GlDriver;

/// Reads an info log of `len` bytes (null-terminator included) with `read`
fn read_info_log(len: GLint, read: impl FnOnce(GLsizei, *mut GLsizei, *mut GLchar)) -> String {
    let mut info_log = vec![0u8; len.max(1) as usize];
    let mut info_len: GLsizei = 0;

    read(
        info_log.len() as GLsizei,
        &mut info_len,
        info_log.as_mut_ptr() as *mut GLchar,
    );

    info_log.truncate(info_len.max(0) as usize);
    String::from_utf8_lossy(&info_log).into_owned()
}

impl GlApi for GlDriver {
    fn create_program(&self) -> GLuint {
        unsafe { gl::CreateProgram() }
    }

    fn delete_program(&self, program: GLuint) {
        unsafe { gl::DeleteProgram(program) }
    }

    fn create_shader(&self, kind: ShaderKind) -> GLuint {
        unsafe { gl::CreateShader(kind.gl_enum()) }
    }

    fn delete_shader(&self, shader: GLuint) {
        unsafe { gl::DeleteShader(shader) }
    }

    fn shader_source(&self, shader: GLuint, sources: &[&str]) {
        // Explicit lengths, so the strings don't need null-terminators
        let ptrs: Vec<*const GLchar> = sources.iter().map(|s| s.as_ptr() as _).collect();
        let lens: Vec<GLint> = sources.iter().map(|s| s.len() as GLint).collect();

        unsafe {
            gl::ShaderSource(
                shader,
                sources.len() as GLsizei,
                ptrs.as_ptr(),
                lens.as_ptr(),
            );
        }
    }

    fn compile_shader(&self, shader: GLuint) {
        unsafe { gl::CompileShader(shader) }
    }

    fn shader_compile_status(&self, shader: GLuint) -> bool {
        let mut res = 0;
        unsafe { gl::GetShaderiv(shader, gl::COMPILE_STATUS, &mut res) };
        res != 0
    }

    fn shader_info_log_length(&self, shader: GLuint) -> GLint {
        let mut len = 0;
        unsafe { gl::GetShaderiv(shader, gl::INFO_LOG_LENGTH, &mut len) };
        len
    }

    fn shader_info_log(&self, shader: GLuint, len: GLint) -> String {
        read_info_log(len, |buf_len, info_len, buf| unsafe {
            gl::GetShaderInfoLog(shader, buf_len, info_len, buf)
        })
    }

    fn attach_shader(&self, program: GLuint, shader: GLuint) {
        unsafe { gl::AttachShader(program, shader) }
    }

    fn detach_shader(&self, program: GLuint, shader: GLuint) {
        unsafe { gl::DetachShader(program, shader) }
    }

    fn link_program(&self, program: GLuint) {
        unsafe { gl::LinkProgram(program) }
    }

    fn program_link_status(&self, program: GLuint) -> bool {
        let mut res = 0;
        unsafe { gl::GetProgramiv(program, gl::LINK_STATUS, &mut res) };
        res != 0
    }

    fn program_info_log_length(&self, program: GLuint) -> GLint {
        let mut len = 0;
        unsafe { gl::GetProgramiv(program, gl::INFO_LOG_LENGTH, &mut len) };
        len
    }

    fn program_info_log(&self, program: GLuint, len: GLint) -> String {
        read_info_log(len, |buf_len, info_len, buf| unsafe {
            gl::GetProgramInfoLog(program, buf_len, info_len, buf)
        })
    }

    fn use_program(&self, program: GLuint) {
        unsafe { gl::UseProgram(program) }
    }

    fn current_program(&self) -> GLuint {
        let mut current = 0;
        unsafe { gl::GetIntegerv(gl::CURRENT_PROGRAM, &mut current) };
        current as GLuint
    }

    fn uniform_location(&self, program: GLuint, name: &CStr) -> GLint {
        unsafe { gl::GetUniformLocation(program, name.as_ptr()) }
    }

    fn uniform_1f(&self, location: GLint, x: f32) {
        unsafe { gl::Uniform1f(location, x) }
    }

    fn uniform_2f(&self, location: GLint, x: f32, y: f32) {
        unsafe { gl::Uniform2f(location, x, y) }
    }

    fn uniform_3f(&self, location: GLint, x: f32, y: f32, z: f32) {
        unsafe { gl::Uniform3f(location, x, y, z) }
    }

    fn uniform_4f(&self, location: GLint, x: f32, y: f32, z: f32, w: f32) {
        unsafe { gl::Uniform4f(location, x, y, z, w) }
    }

    fn uniform_1fv(&self, location: GLint, values: &[f32]) {
        unsafe { gl::Uniform1fv(location, values.len() as GLsizei, values.as_ptr()) }
    }

    fn uniform_1i(&self, location: GLint, x: i32) {
        unsafe { gl::Uniform1i(location, x) }
    }

    fn uniform_2i(&self, location: GLint, x: i32, y: i32) {
        unsafe { gl::Uniform2i(location, x, y) }
    }

    fn uniform_3i(&self, location: GLint, x: i32, y: i32, z: i32) {
        unsafe { gl::Uniform3i(location, x, y, z) }
    }

    fn uniform_4i(&self, location: GLint, x: i32, y: i32, z: i32, w: i32) {
        unsafe { gl::Uniform4i(location, x, y, z, w) }
    }

    fn uniform_1iv(&self, location: GLint, values: &[i32]) {
        unsafe { gl::Uniform1iv(location, values.len() as GLsizei, values.as_ptr()) }
    }

    fn uniform_matrix_4fv(&self, location: GLint, count: GLsizei, transpose: bool, values: &[f32]) {
        let transpose = if transpose { gl::TRUE } else { gl::FALSE };
        unsafe { gl::UniformMatrix4fv(location, count, transpose, values.as_ptr()) }
    }
}

