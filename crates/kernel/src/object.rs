use glam::Vec3;
use stardrift_common::{Color, ObjectId, ShapeKind, Transform};

/// Amplitudes of the idle float motion per axis.
const FLOAT_AMPLITUDE: Vec3 = Vec3::new(0.5, 0.8, 0.6);
/// Angular frequency multipliers of the float motion per axis.
const FLOAT_FREQUENCY: [f64; 3] = [0.7, 1.0, 0.5];

/// One wireframe primitive of the object field.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneObject {
    pub id: ObjectId,
    pub kind: ShapeKind,
    /// Current transform, rewritten every frame.
    pub transform: Transform,
    pub original_position: Vec3,
    /// Fixed origin the float motion oscillates around.
    pub base_position: Vec3,
    /// Radians per frame at scroll speed 1.
    pub rotation_speed: Vec3,
    pub float_phase: f32,
    pub original_color: Color,
    pub hover_color: Color,
    pub opacity: f32,
    color: Color,
    highlighted: bool,
}

impl SceneObject {
    pub fn new(
        id: ObjectId,
        kind: ShapeKind,
        transform: Transform,
        rotation_speed: Vec3,
        float_phase: f32,
        hover_color: Color,
    ) -> Self {
        Self {
            id,
            kind,
            transform,
            original_position: transform.position,
            base_position: transform.position,
            rotation_speed,
            float_phase,
            original_color: Color::WHITE,
            hover_color,
            opacity: 0.8,
            color: Color::WHITE,
            highlighted: false,
        }
    }

    /// Current display color.
    pub fn color(&self) -> Color {
        self.color
    }

    pub fn is_highlighted(&self) -> bool {
        self.highlighted
    }

    pub fn highlight(&mut self) {
        self.color = self.hover_color;
        self.highlighted = true;
    }

    pub fn restore_color(&mut self) {
        self.color = self.original_color;
        self.highlighted = false;
    }

    /// Float-motion displacement from the base position at `time` seconds.
    pub fn float_offset(&self, time: f64) -> Vec3 {
        let phase = self.float_phase as f64;
        Vec3::new(
            (time * FLOAT_FREQUENCY[0] + phase).cos() as f32 * FLOAT_AMPLITUDE.x,
            (time * FLOAT_FREQUENCY[1] + phase).sin() as f32 * FLOAT_AMPLITUDE.y,
            (time * FLOAT_FREQUENCY[2] + phase).sin() as f32 * FLOAT_AMPLITUDE.z,
        )
    }

    /// One frame of animation: spin scaled by scroll speed, float around the
    /// base position, then advance along +Z by scroll progress.
    pub fn animate(
        &mut self,
        time: f64,
        scroll_speed: f32,
        scroll_progress: f32,
        forward_advance: f32,
    ) {
        self.transform.rotation += self.rotation_speed * scroll_speed;

        let mut position = self.base_position + self.float_offset(time);
        position.z += scroll_progress * forward_advance;
        self.transform.position = position;
    }
}
