use std::{
    env, thread,
    time::{Duration, Instant},
};

use eyre::{Result, WrapErr};
use glam::{Mat4, Vec2};
use log::info;
use shader_program::{opengl, unbind, GlDriver, ShaderProgram, ShaderSettings};

use window::PreviewWindow;

mod window;

const DEFAULT_VS: &str = "shaders/preview.vert";
const DEFAULT_FS: &str = "shaders/preview.frag";

/// Usage: shader-preview [vertex shader] [fragment shader]
///
/// Draws one fullscreen triangle per frame with the given shaders and feeds them
/// the `time`, `resolution` and `transform` uniforms.
fn main() -> Result<()> {
    env_logger::init();

    let mut args = env::args().skip(1);
    let vs_path = args.next().unwrap_or_else(|| DEFAULT_VS.to_owned());
    let fs_path = args.next().unwrap_or_else(|| DEFAULT_FS.to_owned());

    let mut window = PreviewWindow::new("Shader preview", (1280, 720))?;
    opengl::init_debug();

    let shader = ShaderProgram::from_files(&vs_path, &fs_path, &ShaderSettings::strict())
        .wrap_err_with(|| format!("Couldn't build the shader from '{vs_path}' and '{fs_path}'"))?;
    info!("Loaded '{vs_path}' and '{fs_path}' into program {}", shader.handle());

    // Core profile refuses to draw without a VAO, the vertex shader generates the positions itself
    let mut vao = 0;
    unsafe {
        gl::GenVertexArrays(1, &mut vao);
    }

    let start = Instant::now();

    let res = 'render_loop: loop {
        let (width, height) = window.drawable_size();
        let time = start.elapsed().as_secs_f32();

        unsafe {
            gl::Viewport(0, 0, width as i32, height as i32);
            gl::ClearColor(0.1, 0.1, 0.1, 1.0);
            gl::Clear(gl::COLOR_BUFFER_BIT);
        }

        shader.bind();
        let uploaded = shader
            .set_f32("time", time)
            .and_then(|_| shader.set_vec2("resolution", Vec2::new(width as f32, height as f32)))
            .and_then(|_| shader.set_mat4("transform", Mat4::from_rotation_z(time * 0.25)));
        if let Err(e) = uploaded {
            break 'render_loop Err(e.into());
        }

        unsafe {
            gl::BindVertexArray(vao);
            gl::DrawArrays(gl::TRIANGLES, 0, 3);
            gl::BindVertexArray(0);
        }
        unbind(&GlDriver);

        if window.end_frame() {
            break 'render_loop Ok(());
        }

        thread::sleep(Duration::from_millis(10));
    };

    unsafe {
        gl::DeleteVertexArrays(1, &vao);
    }

    res
}
