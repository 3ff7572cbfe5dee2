use std::{
    cell::RefCell,
    collections::HashMap,
    ffi::CString,
    fs,
    path::Path,
};

use gl::types::{GLint, GLuint};
use glam::{Mat4, Vec2, Vec3, Vec4};
use log::{debug, error, warn};

use crate::{
    error::ShaderError,
    opengl::{
        driver::{GlApi, ShaderKind, INACTIVE_UNIFORM},
        gl_driver::GlDriver,
    },
    settings::{LinkPolicy, ShaderSettings},
};

/// Source strings for each stage.
/// The strings of one stage are concatenated by the driver into a single compilation unit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShaderSources {
    vertex: Vec<String>,
    fragment: Vec<String>,
    geometry: Vec<String>,
}

impl ShaderSources {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn vertex(mut self, src: impl Into<String>) -> Self {
        self.vertex.push(src.into());
        self
    }

    pub fn fragment(mut self, src: impl Into<String>) -> Self {
        self.fragment.push(src.into());
        self
    }

    pub fn geometry(mut self, src: impl Into<String>) -> Self {
        self.geometry.push(src.into());
        self
    }

    pub fn stage(&self, kind: ShaderKind) -> &[String] {
        match kind {
            ShaderKind::Vertex => &self.vertex,
            ShaderKind::Fragment => &self.fragment,
            ShaderKind::Geometry => &self.geometry,
        }
    }

    /// A stage with no strings, or only empty ones, contributes no shader
    pub fn is_empty_stage(&self, kind: ShaderKind) -> bool {
        self.stage(kind).iter().all(String::is_empty)
    }

    pub fn pair(vs_src: impl Into<String>, fs_src: impl Into<String>) -> Self {
        Self::new().vertex(vs_src).fragment(fs_src)
    }

    /// Reads a vertex and a fragment shader from disk
    pub fn from_files(
        vs_path: impl AsRef<Path>,
        fs_path: impl AsRef<Path>,
    ) -> Result<Self, ShaderError> {
        let vs_src = read_source(vs_path.as_ref())?;
        let fs_src = read_source(fs_path.as_ref())?;
        Ok(Self::pair(vs_src, fs_src))
    }
}

fn read_source(path: &Path) -> Result<String, ShaderError> {
    fs::read_to_string(path).map_err(|source| ShaderError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Represents a created OpenGL shader program.
///
/// Stages are compiled, attached and linked in `new`. Uniforms are set with
/// `uniformf`, `uniformi`, `uniform_matrixf` or the typed `set_<>` methods,
/// all of which expect the program to be bound.
///
/// The program handle and every attached stage are released on drop.
pub struct ShaderProgram<D: GlApi = GlDriver> {
    driver: D,
    handle: GLuint,
    linked: bool,
    sources: ShaderSources,
    stages: Vec<GLuint>,
    locations: RefCell<HashMap<String, GLint>>,
}

impl ShaderProgram<GlDriver> {
    pub fn from_sources(
        vs_src: &str,
        fs_src: &str,
        settings: &ShaderSettings,
    ) -> Result<Self, ShaderError> {
        Self::new(GlDriver, ShaderSources::pair(vs_src, fs_src), settings)
    }

    pub fn from_files(
        vs_path: impl AsRef<Path>,
        fs_path: impl AsRef<Path>,
        settings: &ShaderSettings,
    ) -> Result<Self, ShaderError> {
        let sources = ShaderSources::from_files(vs_path, fs_path)?;
        Self::new(GlDriver, sources, settings)
    }
}

impl<D: GlApi> ShaderProgram<D> {
    /// Creates the program, compiles and attaches every non-empty stage (vertex, fragment,
    /// then geometry if enabled) and links once.
    ///
    /// A compile error releases everything created so far and is returned before linking.
    /// What happens on a link error depends on `settings.link_policy`.
    pub fn new(
        driver: D,
        sources: ShaderSources,
        settings: &ShaderSettings,
    ) -> Result<Self, ShaderError> {
        let handle = driver.create_program();
        debug!("Created shader program {handle}");

        let mut program = Self {
            driver,
            handle,
            linked: false,
            sources,
            stages: Vec::new(),
            locations: RefCell::new(HashMap::new()),
        };

        for kind in ShaderKind::ALL {
            if kind == ShaderKind::Geometry && !settings.geometry_stage {
                if !program.sources.is_empty_stage(kind) {
                    debug!("Geometry stage is disabled, ignoring its sources");
                }
                continue;
            }

            // On error `program` is dropped, which releases the stages attached so far
            program.compile_stage(kind)?;
        }

        if let Err(err) = program.link() {
            if settings.link_policy == LinkPolicy::Strict {
                return Err(err);
            }
        }

        Ok(program)
    }

    fn compile_stage(&mut self, kind: ShaderKind) -> Result<(), ShaderError> {
        if self.sources.is_empty_stage(kind) {
            return Ok(());
        }
        let sources = self.sources.stage(kind);

        let gl = &self.driver;
        let shader = gl.create_shader(kind);
        let srcs: Vec<&str> = sources.iter().map(String::as_str).collect();
        gl.shader_source(shader, &srcs);
        gl.compile_shader(shader);

        if !gl.shader_compile_status(shader) {
            let len = gl.shader_info_log_length(shader);
            let log = gl.shader_info_log(shader, len);
            gl.delete_shader(shader);

            error!("Failed to compile the {kind} shader: '{log}'");
            return Err(ShaderError::Compile { stage: kind, log });
        }

        gl.attach_shader(self.handle, shader);
        self.stages.push(shader);
        debug!("Attached {kind} shader {shader} to program {}", self.handle);
        Ok(())
    }

    /// Links the program and records the outcome in `is_linked()`.
    ///
    /// Can be called again, the flag always reflects the latest attempt.
    /// Cached uniform locations are dropped since they only hold for one link.
    pub fn link(&mut self) -> Result<(), ShaderError> {
        self.driver.link_program(self.handle);
        self.locations.get_mut().clear();

        if self.driver.program_link_status(self.handle) {
            self.linked = true;
            debug!("Linked shader program {}", self.handle);
            return Ok(());
        }

        self.linked = false;
        let len = self.driver.program_info_log_length(self.handle);
        let log = self.driver.program_info_log(self.handle, len);
        warn!("Failed to link shader program {}: '{log}'", self.handle);
        Err(ShaderError::Link { log })
    }

    pub fn handle(&self) -> GLuint {
        self.handle
    }

    pub fn is_linked(&self) -> bool {
        self.linked
    }

    pub fn sources(&self) -> &ShaderSources {
        &self.sources
    }

    pub fn bind(&self) {
        self.driver.use_program(self.handle);
    }

    pub fn is_bound(&self) -> bool {
        self.driver.current_program() == self.handle
    }

    fn location(&self, name: &str) -> Result<GLint, ShaderError> {
        let cached = self.locations.borrow().get(name).copied();
        if let Some(loc) = cached {
            return Ok(loc);
        }

        let c_name = CString::new(name)?;
        let loc = self.driver.uniform_location(self.handle, &c_name);
        if loc == INACTIVE_UNIFORM {
            debug!("Uniform '{name}' isn't active in program {}", self.handle);
        }

        self.locations.borrow_mut().insert(name.to_owned(), loc);
        Ok(loc)
    }

    /// Uploads 1 to 4 floats with `Uniform{1,2,3,4}f`, or more with `Uniform1fv`
    pub fn uniformf(&self, name: &str, values: &[f32]) -> Result<(), ShaderError> {
        if values.is_empty() {
            return Err(ShaderError::InvalidArgument(format!(
                "no values given for uniform '{name}'"
            )));
        }

        let loc = self.location(name)?;
        let gl = &self.driver;
        match *values {
            [x] => gl.uniform_1f(loc, x),
            [x, y] => gl.uniform_2f(loc, x, y),
            [x, y, z] => gl.uniform_3f(loc, x, y, z),
            [x, y, z, w] => gl.uniform_4f(loc, x, y, z, w),
            _ => gl.uniform_1fv(loc, values),
        }

        Ok(())
    }

    /// Uploads 1 to 4 ints with `Uniform{1,2,3,4}i`, or more with `Uniform1iv`
    pub fn uniformi(&self, name: &str, values: &[i32]) -> Result<(), ShaderError> {
        if values.is_empty() {
            return Err(ShaderError::InvalidArgument(format!(
                "no values given for uniform '{name}'"
            )));
        }

        let loc = self.location(name)?;
        let gl = &self.driver;
        match *values {
            [x] => gl.uniform_1i(loc, x),
            [x, y] => gl.uniform_2i(loc, x, y),
            [x, y, z] => gl.uniform_3i(loc, x, y, z),
            [x, y, z, w] => gl.uniform_4i(loc, x, y, z, w),
            _ => gl.uniform_1iv(loc, values),
        }

        Ok(())
    }

    /// Uploads one 4x4 matrix, `mat` must hold exactly 16 floats (not transposed)
    pub fn uniform_matrixf(&self, name: &str, mat: &[f32]) -> Result<(), ShaderError> {
        if mat.len() != 16 {
            return Err(ShaderError::InvalidArgument(format!(
                "uniform '{name}' expects 16 matrix elements, got {}",
                mat.len()
            )));
        }

        let loc = self.location(name)?;
        self.driver.uniform_matrix_4fv(loc, 1, false, mat);
        Ok(())
    }

    pub fn set_mat4(&self, name: &str, mat: Mat4) -> Result<(), ShaderError> {
        self.uniform_matrixf(name, &mat.to_cols_array())
    }

    pub fn set_vec2(&self, name: &str, vec: Vec2) -> Result<(), ShaderError> {
        self.uniformf(name, &vec.to_array())
    }

    pub fn set_vec3(&self, name: &str, vec: Vec3) -> Result<(), ShaderError> {
        self.uniformf(name, &vec.to_array())
    }

    pub fn set_vec4(&self, name: &str, vec: Vec4) -> Result<(), ShaderError> {
        self.uniformf(name, &vec.to_array())
    }

    pub fn set_f32(&self, name: &str, v: f32) -> Result<(), ShaderError> {
        self.uniformf(name, &[v])
    }

    pub fn set_i32(&self, name: &str, v: i32) -> Result<(), ShaderError> {
        self.uniformi(name, &[v])
    }
}

impl<D: GlApi> Drop for ShaderProgram<D> {
    fn drop(&mut self) {
        for shader in self.stages.drain(..) {
            self.driver.detach_shader(self.handle, shader);
            self.driver.delete_shader(shader);
        }
        self.driver.delete_program(self.handle);
        debug!("Deleted shader program {}", self.handle);
    }
}

/// Unbinds whatever program is current, not just a particular one
pub fn unbind<D: GlApi>(driver: &D) {
    driver.use_program(0);
}
