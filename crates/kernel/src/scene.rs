use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use stardrift_common::ObjectId;

use crate::field::{ObjectFieldConfig, generate_objects};
use crate::object::SceneObject;
use crate::starfield::{Starfield, StarfieldConfig};

/// Per-frame motion constants shared by the starfield and the object field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionConfig {
    /// Starfield yaw added every frame, radians.
    pub star_yaw_rate: f32,
    /// Starfield pitch added every frame, radians.
    pub star_pitch_rate: f32,
    pub twinkle_base: f32,
    pub twinkle_amplitude: f32,
    /// Angular frequency of the twinkle in radians per second.
    pub twinkle_frequency: f64,
    /// Z displacement of every object at scroll progress 1.
    pub forward_advance: f32,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            star_yaw_rate: 0.0002,
            star_pitch_rate: 0.0001,
            twinkle_base: 0.8,
            twinkle_amplitude: 0.2,
            twinkle_frequency: 2.0,
            forward_advance: 25.0,
        }
    }
}

impl MotionConfig {
    /// Starfield opacity at `time` seconds.
    pub fn twinkle(&self, time: f64) -> f32 {
        self.twinkle_base + self.twinkle_amplitude * (time * self.twinkle_frequency).sin() as f32
    }
}

/// The authoritative scene: a fixed object field plus the starfield.
///
/// Objects are stored in creation order and addressed by [`ObjectId`].
#[derive(Debug, Clone)]
pub struct Scene {
    objects: Vec<SceneObject>,
    starfield: Starfield,
    motion: MotionConfig,
}

impl Scene {
    /// Generate the starfield first, then the object field, from one RNG
    /// stream. `None` seeds from the OS.
    pub fn generate(
        starfield: &StarfieldConfig,
        field: &ObjectFieldConfig,
        motion: MotionConfig,
        seed: Option<u64>,
    ) -> Self {
        let mut rng = seed.map_or_else(StdRng::from_os_rng, StdRng::seed_from_u64);
        let starfield = Starfield::generate(starfield, &mut rng);
        let objects = generate_objects(field, &mut rng);
        tracing::info!(
            stars = starfield.len(),
            objects = objects.len(),
            ?seed,
            "scene generated"
        );
        Self::from_parts(objects, starfield, motion)
    }

    /// Assemble a scene from already-built parts.
    pub fn from_parts(objects: Vec<SceneObject>, starfield: Starfield, motion: MotionConfig) -> Self {
        Self {
            objects,
            starfield,
            motion,
        }
    }

    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    pub fn objects(&self) -> &[SceneObject] {
        &self.objects
    }

    pub fn object(&self, id: ObjectId) -> Option<&SceneObject> {
        self.objects.get(id.index())
    }

    pub fn object_mut(&mut self, id: ObjectId) -> Option<&mut SceneObject> {
        self.objects.get_mut(id.index())
    }

    pub fn starfield(&self) -> &Starfield {
        &self.starfield
    }

    pub fn motion(&self) -> &MotionConfig {
        &self.motion
    }

    /// Ids of every object currently showing its hover color.
    pub fn highlighted(&self) -> impl Iterator<Item = ObjectId> + '_ {
        self.objects
            .iter()
            .filter(|o| o.is_highlighted())
            .map(|o| o.id)
    }

    /// Advance the starfield drift and every object by one frame.
    pub fn animate(&mut self, time: f64, scroll_speed: f32, scroll_progress: f32) {
        self.starfield.advance(time, &self.motion);
        let advance = self.motion.forward_advance;
        for object in &mut self.objects {
            object.animate(time, scroll_speed, scroll_progress, advance);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scene(seed: u64) -> Scene {
        Scene::generate(
            &StarfieldConfig::default(),
            &ObjectFieldConfig::default(),
            MotionConfig::default(),
            Some(seed),
        )
    }

    #[test]
    fn generate_defaults() {
        let s = scene(42);
        assert_eq!(s.object_count(), 69);
        assert_eq!(s.starfield().len(), 500);
        assert_eq!(s.highlighted().count(), 0);
    }

    #[test]
    fn lookup_by_id() {
        let s = scene(1);
        let id = ObjectId(10);
        assert_eq!(s.object(id).map(|o| o.id), Some(id));
        assert!(s.object(ObjectId(69)).is_none());
    }

    #[test]
    fn deterministic_with_seed() {
        let a = scene(5);
        let b = scene(5);
        assert_eq!(a.objects(), b.objects());
        assert_eq!(a.starfield().stars(), b.starfield().stars());
    }

    #[test]
    fn animate_keeps_count_and_applies_advance() {
        let mut s = scene(8);
        let time = 12.0;
        s.animate(time, 1.0, 0.5);
        assert_eq!(s.object_count(), 69);
        for o in s.objects() {
            let expected = (o.base_position + o.float_offset(time)).z + 0.5 * 25.0;
            assert!((o.transform.position.z - expected).abs() < 1e-4);
        }
        assert!((s.starfield().rotation.y - 0.0002).abs() < 1e-9);
    }

    #[test]
    fn highlighted_reports_hovered_objects() {
        let mut s = scene(3);
        if let Some(o) = s.object_mut(ObjectId(4)) {
            o.highlight();
        }
        assert_eq!(s.highlighted().collect::<Vec<_>>(), vec![ObjectId(4)]);
    }

    #[test]
    fn twinkle_range() {
        let m = MotionConfig::default();
        for i in 0..100 {
            let v = m.twinkle(i as f64 * 0.1);
            assert!((0.6 - 1e-6..=1.0 + 1e-6).contains(&v));
        }
    }
}
