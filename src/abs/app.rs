//! SDL2 and OpenGL application management.
//!
//! This module defines the [`App`] struct which encapsulates the SDL2
//! and OpenGL context necessary for creating a windowed application.

use std::sync::Arc;

use glow::HasContext;

use crate::error::HarnessError;
use crate::settings::WindowSettings;

/// The [`App`] struct encapsulates the SDL2 and OpenGL context.
///
/// Field order matters: the GL context is dropped before the window it was
/// created for.
pub struct App {
    pub gl: Arc<glow::Context>,
    pub gl_context: sdl2::video::GLContext,
    pub event_pump: sdl2::EventPump,
    pub window: sdl2::video::Window,
    pub video_subsystem: sdl2::VideoSubsystem,
    pub sdl: sdl2::Sdl,
}

impl App {
    /// Creates a window centered on the primary display with a current
    /// OpenGL core context of the requested version.
    pub fn new(settings: &WindowSettings) -> Result<Self, HarnessError> {
        let sdl = sdl2::init().map_err(HarnessError::Window)?;
        let video_subsystem = sdl.video().map_err(HarnessError::Window)?;
        let gl_attr = video_subsystem.gl_attr();
        gl_attr.set_context_profile(sdl2::video::GLProfile::Core);
        gl_attr.set_context_version(settings.gl_version.0, settings.gl_version.1);
        gl_attr.set_double_buffer(true);

        let mut builder = video_subsystem.window(&settings.title, settings.width, settings.height);
        builder.opengl().resizable().position_centered();
        if !settings.visible {
            builder.hidden();
        }
        let window = builder
            .build()
            .map_err(|e| HarnessError::Window(e.to_string()))?;

        let gl_context = window.gl_create_context().map_err(HarnessError::Window)?;
        window
            .gl_make_current(&gl_context)
            .map_err(HarnessError::Window)?;
        let gl = unsafe {
            glow::Context::from_loader_function(|s| {
                video_subsystem.gl_get_proc_address(s) as *const _
            })
        };
        unsafe {
            log::info!(
                "OpenGL {} on {}",
                gl.get_parameter_string(glow::VERSION),
                gl.get_parameter_string(glow::RENDERER)
            );
        }
        let event_pump = sdl.event_pump().map_err(HarnessError::Window)?;

        Ok(Self {
            gl: Arc::new(gl),
            gl_context,
            event_pump,
            window,
            video_subsystem,
            sdl,
        })
    }
}
