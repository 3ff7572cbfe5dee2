use std::{ffi::NulError, io, path::PathBuf};

use thiserror::Error;

use crate::opengl::driver::ShaderKind;

#[derive(Debug, Error)]
pub enum ShaderError {
    /// A stage failed to compile, the program was never linked
    #[error("Failed to compile the {stage} shader: '{log}'")]
    Compile { stage: ShaderKind, log: String },
    #[error("Failed to link the shader program: '{log}'")]
    Link { log: String },
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    #[error("Uniform name contains a null byte: {0}")]
    InvalidName(#[from] NulError),
    #[error("Couldn't load the shader file '{}'", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
