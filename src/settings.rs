//! Startup settings for the window and the shader files.
//!
//! There is no command line, environment or on-disk configuration; the values
//! here are the whole of it.

use std::path::PathBuf;

use glam::Vec4;

/// Window and context parameters read once at startup.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowSettings {
    pub title: String,
    pub width: u32,
    pub height: u32,
    /// Hidden windows are only used for off-screen readback.
    pub visible: bool,
    pub clear_color: Vec4,
    pub gl_version: (u8, u8),
    pub vertex_shader: PathBuf,
    pub fragment_shader: PathBuf,
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            title: "voxelmarch".to_string(),
            width: 1280,
            height: 720,
            visible: true,
            clear_color: Vec4::new(0.3, 0.4, 0.5, 1.0),
            gl_version: (3, 3),
            vertex_shader: PathBuf::from("shaders/shader.vert"),
            fragment_shader: PathBuf::from("shaders/shader.frag"),
        }
    }
}
