//! A [`GraphicsDevice`] that records every call instead of talking to a GPU.

use std::collections::BTreeSet;
use std::sync::Mutex;

use glam::Vec4;

use crate::abs::{GraphicsDevice, ShaderStage};

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    ClearColor(Vec4),
    Clear,
    Viewport(i32, i32),
    CreateBuffer { buffer: u32, floats: Vec<f32> },
    CreateVertexArray {
        vertex_array: u32,
        buffer: u32,
        attribute: u32,
        components: i32,
    },
    CompileShader { shader: u32, stage: ShaderStage, source: String },
    LinkProgram { program: u32, shaders: Vec<u32> },
    UseProgram(Option<u32>),
    UniformF32(String, f32),
    UniformI32(String, i32),
    Uniform2F32(String, f32, f32),
    DrawTriangles { vertex_array: u32, vertex_count: i32 },
    DeleteShader(u32),
    DeleteProgram(u32),
    DeleteBuffer(u32),
    DeleteVertexArray(u32),
}

#[derive(Default)]
struct State {
    calls: Vec<Call>,
    next_handle: u32,
    live: BTreeSet<u32>,
}

#[derive(Default)]
pub struct RecordingDevice {
    state: Mutex<State>,
    declared: Option<Vec<String>>,
    failing_stage: Option<ShaderStage>,
    failing_link: bool,
}

impl RecordingDevice {
    /// A device on which every uniform name resolves.
    pub fn new() -> Self {
        Self::default()
    }

    /// A device on which only `names` resolve to a location.
    pub fn with_declared_uniforms(names: &[&str]) -> Self {
        Self {
            declared: Some(names.iter().map(|n| n.to_string()).collect()),
            ..Self::default()
        }
    }

    pub fn failing_compile(stage: ShaderStage) -> Self {
        Self {
            failing_stage: Some(stage),
            ..Self::default()
        }
    }

    pub fn failing_link() -> Self {
        Self {
            failing_link: true,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn clear_calls(&self) {
        self.state.lock().unwrap().calls.clear();
    }

    pub fn count(&self, predicate: impl Fn(&Call) -> bool) -> usize {
        self.state
            .lock()
            .unwrap()
            .calls
            .iter()
            .filter(|c| predicate(c))
            .count()
    }

    /// Handles created and not yet deleted.
    pub fn live_handles(&self) -> BTreeSet<u32> {
        self.state.lock().unwrap().live.clone()
    }

    fn record(&self, call: Call) {
        self.state.lock().unwrap().calls.push(call);
    }

    fn allocate(&self) -> u32 {
        let mut state = self.state.lock().unwrap();
        state.next_handle += 1;
        let handle = state.next_handle;
        state.live.insert(handle);
        handle
    }

    fn free(&self, handle: u32, call: Call) {
        let mut state = self.state.lock().unwrap();
        assert!(state.live.remove(&handle), "handle {handle} deleted twice");
        state.calls.push(call);
    }
}

impl GraphicsDevice for RecordingDevice {
    type Buffer = u32;
    type VertexArray = u32;
    type Shader = u32;
    type Program = u32;
    type UniformLocation = String;

    fn set_clear_color(&self, color: Vec4) {
        self.record(Call::ClearColor(color));
    }

    fn clear_color_buffer(&self) {
        self.record(Call::Clear);
    }

    fn set_viewport(&self, width: i32, height: i32) {
        self.record(Call::Viewport(width, height));
    }

    fn create_vertex_buffer(&self, data: &[f32]) -> Result<u32, String> {
        let buffer = self.allocate();
        self.record(Call::CreateBuffer {
            buffer,
            floats: data.to_vec(),
        });
        Ok(buffer)
    }

    fn create_vertex_array(
        &self,
        buffer: u32,
        attribute: u32,
        components: i32,
    ) -> Result<u32, String> {
        let vertex_array = self.allocate();
        self.record(Call::CreateVertexArray {
            vertex_array,
            buffer,
            attribute,
            components,
        });
        Ok(vertex_array)
    }

    fn compile_shader(&self, stage: ShaderStage, source: &str) -> Result<u32, String> {
        if self.failing_stage == Some(stage) {
            return Err(format!("0:1(1): error: bad {stage} shader"));
        }
        let shader = self.allocate();
        self.record(Call::CompileShader {
            shader,
            stage,
            source: source.to_string(),
        });
        Ok(shader)
    }

    fn link_program(&self, shaders: &[u32]) -> Result<u32, String> {
        if self.failing_link {
            return Err("error: unresolved varying".to_string());
        }
        let program = self.allocate();
        self.record(Call::LinkProgram {
            program,
            shaders: shaders.to_vec(),
        });
        Ok(program)
    }

    fn use_program(&self, program: Option<u32>) {
        self.record(Call::UseProgram(program));
    }

    fn uniform_location(&self, _program: u32, name: &str) -> Option<String> {
        match &self.declared {
            Some(names) if !names.iter().any(|n| n == name) => None,
            _ => Some(name.to_string()),
        }
    }

    fn uniform_1_f32(&self, location: &String, value: f32) {
        self.record(Call::UniformF32(location.clone(), value));
    }

    fn uniform_1_i32(&self, location: &String, value: i32) {
        self.record(Call::UniformI32(location.clone(), value));
    }

    fn uniform_2_f32(&self, location: &String, x: f32, y: f32) {
        self.record(Call::Uniform2F32(location.clone(), x, y));
    }

    fn draw_triangles(&self, vertex_array: u32, vertex_count: i32) {
        self.record(Call::DrawTriangles {
            vertex_array,
            vertex_count,
        });
    }

    fn delete_shader(&self, shader: u32) {
        self.free(shader, Call::DeleteShader(shader));
    }

    fn delete_program(&self, program: u32) {
        self.free(program, Call::DeleteProgram(program));
    }

    fn delete_buffer(&self, buffer: u32) {
        self.free(buffer, Call::DeleteBuffer(buffer));
    }

    fn delete_vertex_array(&self, vertex_array: u32) {
        self.free(vertex_array, Call::DeleteVertexArray(vertex_array));
    }
}
