//! Per-frame state: the viewport, the clock and the uniform values pushed to
//! the ray-marching shader every frame.

use glam::Vec2;

use crate::abs::{GraphicsDevice, Uniform};

pub const RESOLUTION: &str = "resolution";
pub const TIME: &str = "iTime";
pub const VOXEL_TRACING: &str = "voxelTracing";
pub const VOXEL_NORMAL: &str = "voxelNormal";
pub const MAX_MARCHING_STEPS: &str = "MAX_MARCHING_STEPS";
pub const CAMERA_DISTANCE: &str = "cameraDistance";
pub const OBJECT_SIZE: &str = "objectSize";

/// Size of the drawable area in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ViewportSize {
    pub width: u32,
    pub height: u32,
}

impl ViewportSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// SDL reports window sizes as `i32`; anything negative becomes 0.
    pub fn from_signed(width: i32, height: i32) -> Self {
        Self {
            width: width.max(0) as u32,
            height: height.max(0) as u32,
        }
    }

    /// The size as `glViewport` takes it, saturating at `i32::MAX`.
    pub fn gl_size(&self) -> (i32, i32) {
        (
            i32::try_from(self.width).unwrap_or(i32::MAX),
            i32::try_from(self.height).unwrap_or(i32::MAX),
        )
    }

    pub fn as_vec2(&self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32)
    }
}

/// Seconds accumulated from update ticks since load. Never reset.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameClock {
    elapsed: f64,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one tick. Negative or non-finite deltas are dropped so the clock
    /// never runs backwards; returns whether the delta was applied.
    pub fn advance(&mut self, delta_time: f64) -> bool {
        if !delta_time.is_finite() || delta_time < 0.0 {
            return false;
        }
        self.elapsed += delta_time;
        true
    }

    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }
}

/// Fixed ray-marching parameters of the fragment shader.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayMarchSettings {
    pub voxel_tracing: bool,
    pub voxel_normal: bool,
    pub max_marching_steps: i32,
    pub camera_distance: f32,
    pub object_size: f32,
}

impl Default for RayMarchSettings {
    fn default() -> Self {
        Self {
            voxel_tracing: true,
            voxel_normal: false,
            max_marching_steps: 400,
            camera_distance: 120.0,
            object_size: 140.0,
        }
    }
}

/// Every uniform the fragment shader declares, with this frame's values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UniformSet {
    pub resolution: Vec2,
    pub time: f32,
    pub ray_march: RayMarchSettings,
}

impl UniformSet {
    pub fn new(viewport: ViewportSize, clock: &FrameClock, ray_march: RayMarchSettings) -> Self {
        Self {
            resolution: viewport.as_vec2(),
            time: clock.elapsed() as f32,
            ray_march,
        }
    }

    /// Writes every value into `program`, which must be the program in use.
    pub fn apply<D: GraphicsDevice>(&self, gl: &D, program: D::Program) {
        self.resolution.set_uniform(gl, program, RESOLUTION);
        self.time.set_uniform(gl, program, TIME);
        self.ray_march
            .voxel_tracing
            .set_uniform(gl, program, VOXEL_TRACING);
        self.ray_march
            .voxel_normal
            .set_uniform(gl, program, VOXEL_NORMAL);
        self.ray_march
            .max_marching_steps
            .set_uniform(gl, program, MAX_MARCHING_STEPS);
        self.ray_march
            .camera_distance
            .set_uniform(gl, program, CAMERA_DISTANCE);
        self.ray_march
            .object_size
            .set_uniform(gl, program, OBJECT_SIZE);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::abs::recording::{Call, RecordingDevice};

    #[test]
    fn clock_is_exact_sum_of_deltas() {
        let mut clock = FrameClock::new();
        let deltas = [0.016, 0.017, 0.0, 0.25, 1.0];
        let mut previous = clock.elapsed();
        for dt in deltas {
            assert!(clock.advance(dt));
            assert!(clock.elapsed() >= previous);
            previous = clock.elapsed();
        }
        assert_eq!(clock.elapsed(), deltas.iter().sum::<f64>());
    }

    #[test]
    fn clock_ignores_backwards_ticks() {
        let mut clock = FrameClock::new();
        clock.advance(2.0);
        assert!(!clock.advance(-1.0));
        assert!(!clock.advance(f64::NAN));
        assert!(!clock.advance(f64::INFINITY));
        assert_eq!(clock.elapsed(), 2.0);
    }

    #[test]
    fn negative_window_sizes_clamp_to_zero() {
        assert_eq!(ViewportSize::from_signed(-5, 600), ViewportSize::new(0, 600));
        assert_eq!(ViewportSize::from_signed(800, 600).as_vec2(), Vec2::new(800.0, 600.0));
    }

    #[test]
    fn oversized_viewport_saturates_for_gl() {
        assert_eq!(ViewportSize::new(800, 600).gl_size(), (800, 600));
        assert_eq!(
            ViewportSize::new(u32::MAX, i32::MAX as u32 + 1).gl_size(),
            (i32::MAX, i32::MAX)
        );
    }

    #[test]
    fn default_ray_march_constants() {
        let settings = RayMarchSettings::default();
        assert!(settings.voxel_tracing);
        assert!(!settings.voxel_normal);
        assert_eq!(settings.max_marching_steps, 400);
        assert_eq!(settings.camera_distance, 120.0);
        assert_eq!(settings.object_size, 140.0);
    }

    #[test]
    fn apply_writes_the_full_shader_contract() {
        let gl = RecordingDevice::new();
        let mut clock = FrameClock::new();
        clock.advance(0.5);
        clock.advance(0.5);
        let uniforms = UniformSet::new(
            ViewportSize::new(1280, 720),
            &clock,
            RayMarchSettings::default(),
        );
        uniforms.apply(&gl, 3);

        assert_eq!(
            gl.calls(),
            vec![
                Call::Uniform2F32(RESOLUTION.to_string(), 1280.0, 720.0),
                Call::UniformF32(TIME.to_string(), 1.0),
                Call::UniformI32(VOXEL_TRACING.to_string(), 1),
                Call::UniformI32(VOXEL_NORMAL.to_string(), 0),
                Call::UniformI32(MAX_MARCHING_STEPS.to_string(), 400),
                Call::UniformF32(CAMERA_DISTANCE.to_string(), 120.0),
                Call::UniformF32(OBJECT_SIZE.to_string(), 140.0),
            ]
        );
    }
}
