use glam::{Vec2, Vec3};
use stardrift_common::{approach, ease_out_cubic, lerp};
use stardrift_render::PerspectiveCamera;

use crate::config::CameraConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraPhase {
    /// Eased dolly from the start Z toward the scene.
    Intro,
    /// Pointer parallax plus scroll-driven dolly.
    Normal,
}

/// Drives the camera: a one-shot intro, then smoothed parallax and dolly.
///
/// The intro advances by a fixed simulated step per frame, not by wall
/// time, so it always takes the same number of frames.
#[derive(Debug, Clone)]
pub struct CameraController {
    config: CameraConfig,
    camera: PerspectiveCamera,
    phase: CameraPhase,
    intro_progress: f32,
}

impl CameraController {
    pub fn new(config: CameraConfig, aspect: f32) -> Self {
        let camera = PerspectiveCamera {
            position: Vec3::new(0.0, 0.0, config.intro_start_z),
            target: Vec3::ZERO,
            fov_degrees: config.fov_degrees,
            aspect,
            near: config.near,
            far: config.far,
        };
        Self {
            config,
            camera,
            phase: CameraPhase::Intro,
            intro_progress: 0.0,
        }
    }

    /// Advance one frame. Returns `true` on the single frame the intro
    /// finishes.
    pub fn update(&mut self, parallax_target: Vec2, scroll_progress: f32) -> bool {
        let finished = match self.phase {
            CameraPhase::Intro => self.step_intro(),
            CameraPhase::Normal => {
                self.step_normal(parallax_target, scroll_progress);
                false
            }
        };
        self.camera.target = Vec3::ZERO;
        finished
    }

    fn step_intro(&mut self) -> bool {
        let c = &self.config;
        self.intro_progress = (self.intro_progress + c.frame_delta / c.intro_duration).min(1.0);
        let eased = ease_out_cubic(self.intro_progress);
        self.camera.position.z = lerp(c.intro_start_z, c.intro_end_z, eased);

        if self.intro_progress >= 1.0 {
            self.phase = CameraPhase::Normal;
            tracing::info!(z = self.camera.position.z, "camera intro complete");
            return true;
        }
        false
    }

    fn step_normal(&mut self, parallax_target: Vec2, scroll_progress: f32) {
        let c = &self.config;
        let p = &mut self.camera.position;
        p.x = approach(p.x, parallax_target.x, c.parallax_smoothing);
        p.y = approach(p.y, parallax_target.y, c.parallax_smoothing);
        let target_z = c.rest_z - scroll_progress * c.scroll_dolly;
        p.z = approach(p.z, target_z, c.dolly_smoothing);
    }

    pub fn set_aspect(&mut self, aspect: f32) {
        self.camera.aspect = aspect;
    }

    pub fn camera(&self) -> &PerspectiveCamera {
        &self.camera
    }

    pub fn phase(&self) -> CameraPhase {
        self.phase
    }

    pub fn intro_progress(&self) -> f32 {
        self.intro_progress
    }

    pub fn intro_complete(&self) -> bool {
        self.phase == CameraPhase::Normal
    }
}
