use std::{ffi::CStr, fmt};

use gl::types::{GLenum, GLint, GLsizei, GLuint};

/// Location returned by the driver for uniforms that aren't active in the program.
/// Uploads to it are silently ignored.
pub const INACTIVE_UNIFORM: GLint = -1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderKind {
    Vertex,
    Fragment,
    Geometry,
}

impl ShaderKind {
    /// Stages in the order they are compiled and attached
    pub const ALL: [ShaderKind; 3] = [
        ShaderKind::Vertex,
        ShaderKind::Fragment,
        ShaderKind::Geometry,
    ];

    pub const fn gl_enum(self) -> GLenum {
        match self {
            ShaderKind::Vertex => gl::VERTEX_SHADER,
            ShaderKind::Fragment => gl::FRAGMENT_SHADER,
            ShaderKind::Geometry => gl::GEOMETRY_SHADER,
        }
    }
}

impl fmt::Display for ShaderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ShaderKind::Vertex => "vertex",
            ShaderKind::Fragment => "fragment",
            ShaderKind::Geometry => "geometry",
        };
        f.write_str(name)
    }
}

/// The subset of the OpenGL API a `ShaderProgram` talks to.
///
/// Every method maps to one GL entry point (or a `Get*iv` query for one parameter).
/// All calls have to happen on the thread that owns the GL context.
pub trait GlApi {
    fn create_program(&self) -> GLuint;
    fn delete_program(&self, program: GLuint);

    fn create_shader(&self, kind: ShaderKind) -> GLuint;
    fn delete_shader(&self, shader: GLuint);
    /// Uploads all strings at once, the driver concatenates them into one compilation unit
    fn shader_source(&self, shader: GLuint, sources: &[&str]);
    fn compile_shader(&self, shader: GLuint);
    fn shader_compile_status(&self, shader: GLuint) -> bool;
    /// Length of the info log including the null-terminator
    fn shader_info_log_length(&self, shader: GLuint) -> GLint;
    fn shader_info_log(&self, shader: GLuint, len: GLint) -> String;

    fn attach_shader(&self, program: GLuint, shader: GLuint);
    fn detach_shader(&self, program: GLuint, shader: GLuint);
    fn link_program(&self, program: GLuint);
    fn program_link_status(&self, program: GLuint) -> bool;
    fn program_info_log_length(&self, program: GLuint) -> GLint;
    fn program_info_log(&self, program: GLuint, len: GLint) -> String;

    /// `0` unbinds whatever program is current
    fn use_program(&self, program: GLuint);
    fn current_program(&self) -> GLuint;

    fn uniform_location(&self, program: GLuint, name: &CStr) -> GLint;

    fn uniform_1f(&self, location: GLint, x: f32);
    fn uniform_2f(&self, location: GLint, x: f32, y: f32);
    fn uniform_3f(&self, location: GLint, x: f32, y: f32, z: f32);
    fn uniform_4f(&self, location: GLint, x: f32, y: f32, z: f32, w: f32);
    fn uniform_1fv(&self, location: GLint, values: &[f32]);

    fn uniform_1i(&self, location: GLint, x: i32);
    fn uniform_2i(&self, location: GLint, x: i32, y: i32);
    fn uniform_3i(&self, location: GLint, x: i32, y: i32, z: i32);
    fn uniform_4i(&self, location: GLint, x: i32, y: i32, z: i32, w: i32);
    fn uniform_1iv(&self, location: GLint, values: &[i32]);

    fn uniform_matrix_4fv(&self, location: GLint, count: GLsizei, transpose: bool, values: &[f32]);
}
