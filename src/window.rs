use eyre::{eyre, Result};
use sdl2::{
    event::Event,
    keyboard::Keycode,
    video::Window,
    video::{GLContext, GLProfile, SwapInterval},
    EventPump, Sdl, VideoSubsystem,
};

pub struct PreviewWindow {
    _sdl_context: Sdl,
    _video_subsystem: VideoSubsystem,
    window: Window,
    _gl_ctx: GLContext,
    event_pump: EventPump,
}

impl PreviewWindow {
    pub fn new(title: &str, dim: (u32, u32)) -> Result<Self> {
        let sdl_context = sdl2::init().map_err(|e| eyre!("{e}"))?;
        let video_subsystem = sdl_context.video().map_err(|e| eyre!("{e}"))?;

        // Has to be set before the context is created
        let gl_attr = video_subsystem.gl_attr();
        gl_attr.set_context_major_version(3);
        gl_attr.set_context_minor_version(3);
        gl_attr.set_context_profile(GLProfile::Core);
        gl_attr.set_context_flags().debug().set();
        gl_attr.set_double_buffer(true);

        let window = video_subsystem
            .window(title, dim.0, dim.1)
            .opengl()
            .resizable()
            .position_centered()
            .allow_highdpi()
            .build()?;

        // Init OpenGL
        let gl_ctx = window.gl_create_context().map_err(|e| eyre!("{e}"))?;
        gl::load_with(|name| video_subsystem.gl_get_proc_address(name) as _);

        window
            .subsystem()
            .gl_set_swap_interval(SwapInterval::VSync)
            .map_err(|e| eyre!("{e}"))?;

        let event_pump = sdl_context.event_pump().map_err(|e| eyre!("{e}"))?;

        Ok(Self {
            _sdl_context: sdl_context,
            _video_subsystem: video_subsystem,
            window,
            _gl_ctx: gl_ctx,
            event_pump,
        })
    }

    pub fn drawable_size(&self) -> (u32, u32) {
        self.window.drawable_size()
    }

    /// Presents the frame and returns if the render loop should terminate
    pub fn end_frame(&mut self) -> bool {
        self.window.gl_swap_window();

        for event in self.event_pump.poll_iter() {
            match event {
                Event::Quit { .. }
                | Event::KeyDown {
                    keycode: Some(Keycode::Escape),
                    ..
                } => return true,
                _ => (),
            }
        }

        false
    }
}
