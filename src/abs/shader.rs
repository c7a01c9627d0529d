//! OpenGL Shaders
//!
//! This module defines [`ShaderStage`] and the [`Uniform`] trait for setting
//! uniform variables in a linked shader program.

use std::fmt;

use glam::Vec2;

use crate::abs::GraphicsDevice;

/// A programmable stage of the OpenGL pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl ShaderStage {
    /// The `glCreateShader` enum for this stage.
    pub fn gl_enum(self) -> u32 {
        match self {
            ShaderStage::Vertex => glow::VERTEX_SHADER,
            ShaderStage::Fragment => glow::FRAGMENT_SHADER,
        }
    }
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderStage::Vertex => f.write_str("vertex"),
            ShaderStage::Fragment => f.write_str("fragment"),
        }
    }
}

/// Represents a uniform variable in a shader program.
///
/// The location is resolved by name on every call. A name the program doesn't
/// declare resolves to nothing and the write is skipped.
pub trait Uniform {
    /// Sets the value of the uniform variable in the given shader program.
    fn set_uniform<D: GraphicsDevice>(&self, gl: &D, program: D::Program, name: &str);
}

impl Uniform for bool {
    fn set_uniform<D: GraphicsDevice>(&self, gl: &D, program: D::Program, name: &str) {
        if let Some(loc) = gl.uniform_location(program, name) {
            gl.uniform_1_i32(&loc, *self as i32);
        }
    }
}

impl Uniform for f32 {
    fn set_uniform<D: GraphicsDevice>(&self, gl: &D, program: D::Program, name: &str) {
        if let Some(loc) = gl.uniform_location(program, name) {
            gl.uniform_1_f32(&loc, *self);
        }
    }
}

impl Uniform for i32 {
    fn set_uniform<D: GraphicsDevice>(&self, gl: &D, program: D::Program, name: &str) {
        if let Some(loc) = gl.uniform_location(program, name) {
            gl.uniform_1_i32(&loc, *self);
        }
    }
}

impl Uniform for Vec2 {
    fn set_uniform<D: GraphicsDevice>(&self, gl: &D, program: D::Program, name: &str) {
        if let Some(loc) = gl.uniform_location(program, name) {
            gl.uniform_2_f32(&loc, self.x, self.y);
        }
    }
}
