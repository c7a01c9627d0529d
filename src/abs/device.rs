//! The graphics device seam.
//!
//! [`GraphicsDevice`] is the narrow set of OpenGL calls the harness issues. It is
//! implemented for [`glow::Context`]; everything above this module talks to the
//! trait so it can be driven without a GPU.

use glam::Vec4;
use glow::HasContext;

use crate::abs::ShaderStage;

/// OpenGL operations used to draw one full-screen quad with one program.
pub trait GraphicsDevice {
    type Buffer: Copy + std::fmt::Debug;
    type VertexArray: Copy + std::fmt::Debug;
    type Shader: Copy + std::fmt::Debug;
    type Program: Copy + std::fmt::Debug;
    type UniformLocation;

    /// Sets the color used by [`GraphicsDevice::clear_color_buffer`].
    fn set_clear_color(&self, color: Vec4);

    fn clear_color_buffer(&self);

    /// Maps the rasterizer to `(0, 0, width, height)`.
    fn set_viewport(&self, width: i32, height: i32);

    /// Allocates an array buffer and uploads `data` into it. The buffer is left unbound.
    fn create_vertex_buffer(&self, data: &[f32]) -> Result<Self::Buffer, String>;

    /// Creates a vertex array reading tightly packed `components` floats per
    /// vertex from `buffer` at `attribute`. The vertex array is left unbound.
    fn create_vertex_array(
        &self,
        buffer: Self::Buffer,
        attribute: u32,
        components: i32,
    ) -> Result<Self::VertexArray, String>;

    /// Compiles one shader stage. On failure the stage object is already
    /// deleted and the driver's info log is returned.
    fn compile_shader(&self, stage: ShaderStage, source: &str) -> Result<Self::Shader, String>;

    /// Links the given stages into a program and detaches them again. On
    /// failure the program object is already deleted.
    fn link_program(&self, shaders: &[Self::Shader]) -> Result<Self::Program, String>;

    fn use_program(&self, program: Option<Self::Program>);

    /// Resolves a uniform by name. `None` means the program doesn't declare it.
    fn uniform_location(&self, program: Self::Program, name: &str)
    -> Option<Self::UniformLocation>;

    fn uniform_1_f32(&self, location: &Self::UniformLocation, value: f32);
    fn uniform_1_i32(&self, location: &Self::UniformLocation, value: i32);
    fn uniform_2_f32(&self, location: &Self::UniformLocation, x: f32, y: f32);

    /// Draws `vertex_count` vertices from `vertex_array` as a triangle list.
    fn draw_triangles(&self, vertex_array: Self::VertexArray, vertex_count: i32);

    fn delete_shader(&self, shader: Self::Shader);
    fn delete_program(&self, program: Self::Program);
    fn delete_buffer(&self, buffer: Self::Buffer);
    fn delete_vertex_array(&self, vertex_array: Self::VertexArray);
}

impl GraphicsDevice for glow::Context {
    type Buffer = glow::Buffer;
    type VertexArray = glow::VertexArray;
    type Shader = glow::Shader;
    type Program = glow::Program;
    type UniformLocation = glow::UniformLocation;

    fn set_clear_color(&self, color: Vec4) {
        unsafe {
            self.clear_color(color.x, color.y, color.z, color.w);
        }
    }

    fn clear_color_buffer(&self) {
        unsafe {
            self.clear(glow::COLOR_BUFFER_BIT);
        }
    }

    fn set_viewport(&self, width: i32, height: i32) {
        unsafe {
            self.viewport(0, 0, width, height);
        }
    }

    fn create_vertex_buffer(&self, data: &[f32]) -> Result<Self::Buffer, String> {
        unsafe {
            let vbo = self.create_buffer()?;
            self.bind_buffer(glow::ARRAY_BUFFER, Some(vbo));
            self.buffer_data_u8_slice(
                glow::ARRAY_BUFFER,
                std::slice::from_raw_parts(
                    data.as_ptr() as *const u8,
                    std::mem::size_of_val(data),
                ),
                glow::STATIC_DRAW,
            );
            self.bind_buffer(glow::ARRAY_BUFFER, None);
            Ok(vbo)
        }
    }

    fn create_vertex_array(
        &self,
        buffer: Self::Buffer,
        attribute: u32,
        components: i32,
    ) -> Result<Self::VertexArray, String> {
        unsafe {
            let vao = HasContext::create_vertex_array(self)?;
            self.bind_vertex_array(Some(vao));
            self.bind_buffer(glow::ARRAY_BUFFER, Some(buffer));
            self.vertex_attrib_pointer_f32(
                attribute,
                components,
                glow::FLOAT,
                false,
                components * std::mem::size_of::<f32>() as i32,
                0,
            );
            self.enable_vertex_attrib_array(attribute);
            self.bind_vertex_array(None);
            self.bind_buffer(glow::ARRAY_BUFFER, None);
            Ok(vao)
        }
    }

    fn compile_shader(&self, stage: ShaderStage, source: &str) -> Result<Self::Shader, String> {
        unsafe {
            let shader = self.create_shader(stage.gl_enum())?;
            self.shader_source(shader, source);
            HasContext::compile_shader(self, shader);

            if !self.get_shader_compile_status(shader) {
                let log = self.get_shader_info_log(shader);
                HasContext::delete_shader(self, shader);
                return Err(log);
            }

            Ok(shader)
        }
    }

    fn link_program(&self, shaders: &[Self::Shader]) -> Result<Self::Program, String> {
        unsafe {
            let program = self.create_program()?;

            for shader in shaders {
                self.attach_shader(program, *shader);
            }

            HasContext::link_program(self, program);

            if !self.get_program_link_status(program) {
                let log = self.get_program_info_log(program);
                HasContext::delete_program(self, program);
                return Err(log);
            }

            for shader in shaders {
                self.detach_shader(program, *shader);
            }

            Ok(program)
        }
    }

    fn use_program(&self, program: Option<Self::Program>) {
        unsafe {
            HasContext::use_program(self, program);
        }
    }

    fn uniform_location(
        &self,
        program: Self::Program,
        name: &str,
    ) -> Option<Self::UniformLocation> {
        unsafe { self.get_uniform_location(program, name) }
    }

    fn uniform_1_f32(&self, location: &Self::UniformLocation, value: f32) {
        unsafe {
            HasContext::uniform_1_f32(self, Some(location), value);
        }
    }

    fn uniform_1_i32(&self, location: &Self::UniformLocation, value: i32) {
        unsafe {
            HasContext::uniform_1_i32(self, Some(location), value);
        }
    }

    fn uniform_2_f32(&self, location: &Self::UniformLocation, x: f32, y: f32) {
        unsafe {
            HasContext::uniform_2_f32(self, Some(location), x, y);
        }
    }

    fn draw_triangles(&self, vertex_array: Self::VertexArray, vertex_count: i32) {
        unsafe {
            self.bind_vertex_array(Some(vertex_array));
            self.draw_arrays(glow::TRIANGLES, 0, vertex_count);
            self.bind_vertex_array(None);
        }
    }

    fn delete_shader(&self, shader: Self::Shader) {
        unsafe {
            HasContext::delete_shader(self, shader);
        }
    }

    fn delete_program(&self, program: Self::Program) {
        unsafe {
            HasContext::delete_program(self, program);
        }
    }

    fn delete_buffer(&self, buffer: Self::Buffer) {
        unsafe {
            self.bind_buffer(glow::ARRAY_BUFFER, None);
            HasContext::delete_buffer(self, buffer);
        }
    }

    fn delete_vertex_array(&self, vertex_array: Self::VertexArray) {
        unsafe {
            HasContext::delete_vertex_array(self, vertex_array);
        }
    }
}
