//! A small OpenGL harness that ray-marches a voxel object in a fragment shader.
//!
//! The window host ([`host::GraphicsHost`]) drives a [`pipeline::ShaderPipeline`]
//! that draws one full-screen quad and streams the shader's uniforms
//! ([`frame::UniformSet`]) every frame.

pub mod abs;
pub mod error;
pub mod frame;
pub mod host;
pub mod pipeline;
pub mod settings;

pub use error::HarnessError;
