//! In-memory `GlApi` that journals every call, for tests that have no GL context.

use std::{
    cell::RefCell,
    collections::{HashMap, HashSet},
    ffi::CStr,
    rc::Rc,
};

use gl::types::{GLint, GLsizei, GLuint};

use super::driver::{GlApi, ShaderKind, INACTIVE_UNIFORM};

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    CreateProgram(GLuint),
    DeleteProgram(GLuint),
    CreateShader(ShaderKind, GLuint),
    DeleteShader(GLuint),
    ShaderSource(GLuint, Vec<String>),
    CompileShader(GLuint),
    AttachShader { program: GLuint, shader: GLuint },
    DetachShader { program: GLuint, shader: GLuint },
    LinkProgram(GLuint),
    UseProgram(GLuint),
    UniformLocation(String),
    Uniform1f(GLint, f32),
    Uniform2f(GLint, f32, f32),
    Uniform3f(GLint, f32, f32, f32),
    Uniform4f(GLint, f32, f32, f32, f32),
    Uniform1fv(GLint, Vec<f32>),
    Uniform1i(GLint, i32),
    Uniform2i(GLint, i32, i32),
    Uniform3i(GLint, i32, i32, i32),
    Uniform4i(GLint, i32, i32, i32, i32),
    Uniform1iv(GLint, Vec<i32>),
    UniformMatrix4fv {
        location: GLint,
        count: GLsizei,
        transpose: bool,
        values: Vec<f32>,
    },
}

impl Call {
    pub fn is_upload(&self) -> bool {
        matches!(
            self,
            Call::Uniform1f(..)
                | Call::Uniform2f(..)
                | Call::Uniform3f(..)
                | Call::Uniform4f(..)
                | Call::Uniform1fv(..)
                | Call::Uniform1i(..)
                | Call::Uniform2i(..)
                | Call::Uniform3i(..)
                | Call::Uniform4i(..)
                | Call::Uniform1iv(..)
                | Call::UniformMatrix4fv { .. }
        )
    }
}

#[derive(Default)]
struct State {
    calls: Vec<Call>,
    next_id: GLuint,
    current_program: GLuint,
    shader_kinds: HashMap<GLuint, ShaderKind>,
    live_programs: HashSet<GLuint>,
    live_shaders: HashSet<GLuint>,
    compile_failures: HashMap<ShaderKind, String>,
    link_failure: Option<String>,
    uniforms: HashMap<String, GLint>,
}

impl State {
    fn next_id(&mut self) -> GLuint {
        self.next_id += 1;
        self.next_id
    }
}

/// Clones share the same journal, so a test can keep one and hand the other to a program
#[derive(Clone, Default)]
pub struct RecordingDriver {
    state: Rc<RefCell<State>>,
}

impl RecordingDriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes `name` an active uniform at `location`
    pub fn with_uniform(self, name: &str, location: GLint) -> Self {
        self.state
            .borrow_mut()
            .uniforms
            .insert(name.to_owned(), location);
        self
    }

    /// Every shader of `kind` fails to compile with `log`
    pub fn fail_compile(&self, kind: ShaderKind, log: &str) {
        self.state
            .borrow_mut()
            .compile_failures
            .insert(kind, log.to_owned());
    }

    /// `None` makes subsequent links succeed again
    pub fn set_link_failure(&self, log: Option<&str>) {
        self.state.borrow_mut().link_failure = log.map(str::to_owned);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.borrow().calls.clone()
    }

    pub fn uploads(&self) -> Vec<Call> {
        self.calls().into_iter().filter(Call::is_upload).collect()
    }

    pub fn clear_calls(&self) {
        self.state.borrow_mut().calls.clear();
    }

    pub fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.state.borrow().calls.iter().filter(|c| pred(c)).count()
    }

    pub fn live_programs(&self) -> usize {
        self.state.borrow().live_programs.len()
    }

    pub fn live_shaders(&self) -> usize {
        self.state.borrow().live_shaders.len()
    }

    fn record(&self, call: Call) {
        self.state.borrow_mut().calls.push(call);
    }

    fn log_len(log: &str) -> GLint {
        if log.is_empty() {
            0
        } else {
            log.len() as GLint + 1
        }
    }

    /// Mimics `Get*InfoLog` writing at most `len - 1` characters
    fn truncated(log: &str, len: GLint) -> String {
        let max = (len - 1).max(0) as usize;
        log.chars().take(max).collect()
    }
}

impl GlApi for RecordingDriver {
    fn create_program(&self) -> GLuint {
        let mut state = self.state.borrow_mut();
        let id = state.next_id();
        state.live_programs.insert(id);
        state.calls.push(Call::CreateProgram(id));
        id
    }

    fn delete_program(&self, program: GLuint) {
        let mut state = self.state.borrow_mut();
        state.live_programs.remove(&program);
        state.calls.push(Call::DeleteProgram(program));
    }

    fn create_shader(&self, kind: ShaderKind) -> GLuint {
        let mut state = self.state.borrow_mut();
        let id = state.next_id();
        state.live_shaders.insert(id);
        state.shader_kinds.insert(id, kind);
        state.calls.push(Call::CreateShader(kind, id));
        id
    }

    fn delete_shader(&self, shader: GLuint) {
        let mut state = self.state.borrow_mut();
        state.live_shaders.remove(&shader);
        state.calls.push(Call::DeleteShader(shader));
    }

    fn shader_source(&self, shader: GLuint, sources: &[&str]) {
        let sources = sources.iter().map(|s| s.to_string()).collect();
        self.record(Call::ShaderSource(shader, sources));
    }

    fn compile_shader(&self, shader: GLuint) {
        self.record(Call::CompileShader(shader));
    }

    fn shader_compile_status(&self, shader: GLuint) -> bool {
        let state = self.state.borrow();
        let kind = state.shader_kinds[&shader];
        !state.compile_failures.contains_key(&kind)
    }

    fn shader_info_log_length(&self, shader: GLuint) -> GLint {
        let state = self.state.borrow();
        let kind = state.shader_kinds[&shader];
        state
            .compile_failures
            .get(&kind)
            .map_or(0, |log| Self::log_len(log))
    }

    fn shader_info_log(&self, shader: GLuint, len: GLint) -> String {
        let state = self.state.borrow();
        let kind = state.shader_kinds[&shader];
        state
            .compile_failures
            .get(&kind)
            .map(|log| Self::truncated(log, len))
            .unwrap_or_default()
    }

    fn attach_shader(&self, program: GLuint, shader: GLuint) {
        self.record(Call::AttachShader { program, shader });
    }

    fn detach_shader(&self, program: GLuint, shader: GLuint) {
        self.record(Call::DetachShader { program, shader });
    }

    fn link_program(&self, program: GLuint) {
        self.record(Call::LinkProgram(program));
    }

    fn program_link_status(&self, _program: GLuint) -> bool {
        self.state.borrow().link_failure.is_none()
    }

    fn program_info_log_length(&self, _program: GLuint) -> GLint {
        self.state
            .borrow()
            .link_failure
            .as_deref()
            .map_or(0, Self::log_len)
    }

    fn program_info_log(&self, _program: GLuint, len: GLint) -> String {
        self.state
            .borrow()
            .link_failure
            .as_deref()
            .map(|log| Self::truncated(log, len))
            .unwrap_or_default()
    }

    fn use_program(&self, program: GLuint) {
        let mut state = self.state.borrow_mut();
        state.current_program = program;
        state.calls.push(Call::UseProgram(program));
    }

    fn current_program(&self) -> GLuint {
        self.state.borrow().current_program
    }

    fn uniform_location(&self, _program: GLuint, name: &CStr) -> GLint {
        let name = name.to_string_lossy().into_owned();
        let mut state = self.state.borrow_mut();
        let location = state
            .uniforms
            .get(&name)
            .copied()
            .unwrap_or(INACTIVE_UNIFORM);
        state.calls.push(Call::UniformLocation(name));
        location
    }

    fn uniform_1f(&self, location: GLint, x: f32) {
        self.record(Call::Uniform1f(location, x));
    }

    fn uniform_2f(&self, location: GLint, x: f32, y: f32) {
        self.record(Call::Uniform2f(location, x, y));
    }

    fn uniform_3f(&self, location: GLint, x: f32, y: f32, z: f32) {
        self.record(Call::Uniform3f(location, x, y, z));
    }

    fn uniform_4f(&self, location: GLint, x: f32, y: f32, z: f32, w: f32) {
        self.record(Call::Uniform4f(location, x, y, z, w));
    }

    fn uniform_1fv(&self, location: GLint, values: &[f32]) {
        self.record(Call::Uniform1fv(location, values.to_vec()));
    }

    fn uniform_1i(&self, location: GLint, x: i32) {
        self.record(Call::Uniform1i(location, x));
    }

    fn uniform_2i(&self, location: GLint, x: i32, y: i32) {
        self.record(Call::Uniform2i(location, x, y));
    }

    fn uniform_3i(&self, location: GLint, x: i32, y: i32, z: i32) {
        self.record(Call::Uniform3i(location, x, y, z));
    }

    fn uniform_4i(&self, location: GLint, x: i32, y: i32, z: i32, w: i32) {
        self.record(Call::Uniform4i(location, x, y, z, w));
    }

    fn uniform_1iv(&self, location: GLint, values: &[i32]) {
        self.record(Call::Uniform1iv(location, values.to_vec()));
    }

    fn uniform_matrix_4fv(&self, location: GLint, count: GLsizei, transpose: bool, values: &[f32]) {
        self.record(Call::UniformMatrix4fv {
            location,
            count,
            transpose,
            values: values.to_vec(),
        });
    }
}
