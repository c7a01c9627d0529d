//! The shader pipeline: a full-screen quad and the program that shades it.
//!
//! [`ShaderPipeline`] owns every GPU object the harness allocates. Each handle
//! is released exactly once, by [`ShaderPipeline::release`] or on drop.

use std::sync::Arc;

use crate::abs::{GraphicsDevice, ShaderStage};
use crate::error::HarnessError;
use crate::frame::UniformSet;

/// Two triangles covering `[-1, 1] x [-1, 1]` in normalized device coordinates.
#[rustfmt::skip]
pub const QUAD_VERTICES: [f32; 18] = [
    -1.0,  1.0, 0.0,
     1.0,  1.0, 0.0,
    -1.0, -1.0, 0.0,
     1.0,  1.0, 0.0,
     1.0, -1.0, 0.0,
    -1.0, -1.0, 0.0,
];

pub const POSITION_ATTRIBUTE: u32 = 0;
pub const POSITION_COMPONENTS: i32 = 3;
pub const QUAD_VERTEX_COUNT: i32 = QUAD_VERTICES.len() as i32 / POSITION_COMPONENTS;

/// Lifecycle of a [`ShaderPipeline`]. `Released` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    Uninitialized,
    Initialized,
    Released,
}

struct QuadGeometry<D: GraphicsDevice> {
    buffer: D::Buffer,
    vertex_array: D::VertexArray,
}

pub struct ShaderPipeline<D: GraphicsDevice> {
    gl: Arc<D>,
    quad: Option<QuadGeometry<D>>,
    program: Option<D::Program>,
    released: bool,
}

impl<D: GraphicsDevice> ShaderPipeline<D> {
    /// Creates an empty pipeline. Nothing is allocated until
    /// [`initialize`](Self::initialize) and
    /// [`compile_and_link`](Self::compile_and_link).
    pub fn new(gl: &Arc<D>) -> Self {
        Self {
            gl: Arc::clone(gl),
            quad: None,
            program: None,
            released: false,
        }
    }

    pub fn state(&self) -> PipelineState {
        if self.released {
            PipelineState::Released
        } else if self.quad.is_some() && self.program.is_some() {
            PipelineState::Initialized
        } else {
            PipelineState::Uninitialized
        }
    }

    /// Uploads the quad and describes its single position attribute.
    pub fn initialize(&mut self) -> Result<(), HarnessError> {
        if self.released || self.quad.is_some() {
            return Err(self.invalid("initialize the quad"));
        }

        let buffer = self
            .gl
            .create_vertex_buffer(&QUAD_VERTICES)
            .map_err(HarnessError::Device)?;
        let vertex_array =
            match self
                .gl
                .create_vertex_array(buffer, POSITION_ATTRIBUTE, POSITION_COMPONENTS)
            {
                Ok(vertex_array) => vertex_array,
                Err(e) => {
                    self.gl.delete_buffer(buffer);
                    return Err(HarnessError::Device(e));
                }
            };

        self.quad = Some(QuadGeometry {
            buffer,
            vertex_array,
        });
        Ok(())
    }

    /// Compiles both stages and links them. The stage objects are deleted
    /// once linking is done, whether it succeeded or not.
    pub fn compile_and_link(
        &mut self,
        vertex_source: &str,
        fragment_source: &str,
    ) -> Result<(), HarnessError> {
        if self.released || self.program.is_some() {
            return Err(self.invalid("compile and link"));
        }

        let vertex = self.compile(ShaderStage::Vertex, vertex_source)?;
        let fragment = match self.compile(ShaderStage::Fragment, fragment_source) {
            Ok(fragment) => fragment,
            Err(e) => {
                self.gl.delete_shader(vertex);
                return Err(e);
            }
        };

        let linked = self.gl.link_program(&[vertex, fragment]);
        self.gl.delete_shader(vertex);
        self.gl.delete_shader(fragment);

        let program = linked.map_err(HarnessError::Link)?;
        log::debug!("Linked shader program {program:?}");
        self.program = Some(program);
        Ok(())
    }

    fn compile(&self, stage: ShaderStage, source: &str) -> Result<D::Shader, HarnessError> {
        let shader = self
            .gl
            .compile_shader(stage, source)
            .map_err(|log| HarnessError::Compile { stage, log })?;
        log::debug!("Compiled {stage} shader {shader:?}");
        Ok(shader)
    }

    /// Makes the program current and writes every uniform.
    pub fn bind_and_set_uniforms(&self, uniforms: &UniformSet) -> Result<(), HarnessError> {
        let program = self.ready("set uniforms")?.1;
        self.gl.use_program(Some(program));
        uniforms.apply(&*self.gl, program);
        Ok(())
    }

    /// Draws the quad as a triangle list of six vertices.
    pub fn draw(&self) -> Result<(), HarnessError> {
        let (quad, _) = self.ready("draw")?;
        self.gl.draw_triangles(quad.vertex_array, QUAD_VERTEX_COUNT);
        Ok(())
    }

    /// Deletes the program, the vertex array and the vertex buffer. Calling it
    /// again does nothing.
    pub fn release(&mut self) {
        if self.released {
            return;
        }

        if let Some(program) = self.program.take() {
            self.gl.use_program(None);
            self.gl.delete_program(program);
        }
        if let Some(quad) = self.quad.take() {
            self.gl.delete_vertex_array(quad.vertex_array);
            self.gl.delete_buffer(quad.buffer);
        }

        self.released = true;
        log::debug!("Released shader pipeline");
    }

    fn ready(
        &self,
        operation: &'static str,
    ) -> Result<(&QuadGeometry<D>, D::Program), HarnessError> {
        match (&self.quad, self.program, self.released) {
            (Some(quad), Some(program), false) => Ok((quad, program)),
            _ => Err(self.invalid(operation)),
        }
    }

    fn invalid(&self, operation: &'static str) -> HarnessError {
        HarnessError::InvalidState {
            operation,
            state: self.state(),
        }
    }
}

impl<D: GraphicsDevice> Drop for ShaderPipeline<D> {
    fn drop(&mut self) {
        self.release();
    }
}
