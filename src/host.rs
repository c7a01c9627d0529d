//! The host side of the harness: window lifecycle callbacks driving a
//! [`ShaderPipeline`].

use std::path::Path;
use std::sync::Arc;

use crate::abs::GraphicsDevice;
use crate::error::HarnessError;
use crate::frame::{FrameClock, RayMarchSettings, UniformSet, ViewportSize};
use crate::pipeline::ShaderPipeline;
use crate::settings::WindowSettings;

/// Something a finished frame can be presented to.
pub trait FrameTarget {
    /// Makes the back buffer visible.
    fn present(&mut self);
}

impl FrameTarget for sdl2::video::Window {
    fn present(&mut self) {
        self.gl_swap_window();
    }
}

/// Callbacks fired by the event loop, in the order load, then any number of
/// resize/update/render, then unload exactly once.
pub trait WindowHandler {
    fn on_load(&mut self) -> Result<(), HarnessError>;
    fn on_resize(&mut self, size: ViewportSize);
    fn on_update(&mut self, delta_time: f64);
    fn on_render(&mut self, target: &mut impl FrameTarget) -> Result<(), HarnessError>;
    fn on_unload(&mut self);
}

/// Owns the per-frame state and the pipeline for one window.
pub struct GraphicsHost<D: GraphicsDevice> {
    gl: Arc<D>,
    pipeline: ShaderPipeline<D>,
    settings: WindowSettings,
    ray_march: RayMarchSettings,
    viewport: ViewportSize,
    clock: FrameClock,
}

impl<D: GraphicsDevice> GraphicsHost<D> {
    pub fn new(gl: &Arc<D>, settings: WindowSettings) -> Self {
        Self {
            gl: Arc::clone(gl),
            pipeline: ShaderPipeline::new(gl),
            viewport: ViewportSize::new(settings.width, settings.height),
            settings,
            ray_march: RayMarchSettings::default(),
            clock: FrameClock::new(),
        }
    }

    pub fn viewport(&self) -> ViewportSize {
        self.viewport
    }

    /// Seconds accumulated from update ticks since load.
    pub fn elapsed_time(&self) -> f64 {
        self.clock.elapsed()
    }

    pub fn pipeline(&self) -> &ShaderPipeline<D> {
        &self.pipeline
    }

    /// The values the next render will push to the shader.
    pub fn current_uniforms(&self) -> UniformSet {
        UniformSet::new(self.viewport, &self.clock, self.ray_march)
    }
}

fn read_shader_source(path: &Path) -> Result<String, HarnessError> {
    std::fs::read_to_string(path).map_err(|source| HarnessError::ShaderSource {
        path: path.to_path_buf(),
        source,
    })
}

impl<D: GraphicsDevice> WindowHandler for GraphicsHost<D> {
    fn on_load(&mut self) -> Result<(), HarnessError> {
        self.gl.set_clear_color(self.settings.clear_color);

        self.pipeline.initialize()?;
        let vertex = read_shader_source(&self.settings.vertex_shader)?;
        let fragment = read_shader_source(&self.settings.fragment_shader)?;
        self.pipeline.compile_and_link(&vertex, &fragment)?;

        log::info!(
            "Loaded shaders {} and {}",
            self.settings.vertex_shader.display(),
            self.settings.fragment_shader.display()
        );
        Ok(())
    }

    fn on_resize(&mut self, size: ViewportSize) {
        log::debug!("Viewport resized to {}x{}", size.width, size.height);
        self.viewport = size;
        let (width, height) = size.gl_size();
        self.gl.set_viewport(width, height);
    }

    fn on_update(&mut self, delta_time: f64) {
        if !self.clock.advance(delta_time) {
            log::debug!("Ignoring frame delta {delta_time}");
        }
    }

    fn on_render(&mut self, target: &mut impl FrameTarget) -> Result<(), HarnessError> {
        self.gl.clear_color_buffer();

        self.pipeline
            .bind_and_set_uniforms(&self.current_uniforms())?;
        self.pipeline.draw()?;

        target.present();
        Ok(())
    }

    fn on_unload(&mut self) {
        self.pipeline.release();
    }
}

/// What the event loop reports to [`drive`] between frames.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FrameEvent {
    Resize(ViewportSize),
    /// Time to advance the clock by `delta_time` seconds and render.
    Frame { delta_time: f64 },
    Quit,
}

/// Runs one window's lifecycle: load, an initial resize to `initial`, then
/// the events in order until [`FrameEvent::Quit`], the events run out or a
/// render fails. `on_unload` runs exactly once on every path after load was
/// attempted, and the first error is returned.
pub fn drive<H, T>(
    handler: &mut H,
    target: &mut T,
    initial: ViewportSize,
    events: impl IntoIterator<Item = FrameEvent>,
) -> Result<(), HarnessError>
where
    H: WindowHandler,
    T: FrameTarget,
{
    if let Err(e) = handler.on_load() {
        handler.on_unload();
        return Err(e);
    }
    handler.on_resize(initial);

    let mut result = Ok(());
    for event in events {
        match event {
            FrameEvent::Resize(size) => handler.on_resize(size),
            FrameEvent::Frame { delta_time } => {
                handler.on_update(delta_time);
                if let Err(e) = handler.on_render(target) {
                    result = Err(e);
                    break;
                }
            }
            FrameEvent::Quit => break,
        }
    }

    handler.on_unload();
    result
}
