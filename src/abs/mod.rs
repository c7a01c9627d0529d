//! This module contains the thin OpenGL layer of the harness: window and
//! context setup, the graphics device seam and shader uniforms.

pub mod app;
pub mod device;
#[cfg(test)]
pub(crate) mod recording;
pub mod shader;

pub use app::*;
pub use device::*;
pub use shader::*;
