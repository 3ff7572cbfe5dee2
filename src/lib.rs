/// Errors returned while building or feeding a shader program.
pub mod error;

/// Driver seam and the OpenGL bindings behind it.
pub mod opengl;

/// Construction options.
pub mod settings;

/// The shader program wrapper itself.
pub mod shader;

pub use error::ShaderError;
pub use opengl::{
    driver::{GlApi, ShaderKind},
    gl_driver::GlDriver,
};
pub use settings::{LinkPolicy, ShaderSettings};
pub use shader::{unbind, ShaderProgram, ShaderSources};
