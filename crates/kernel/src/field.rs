use glam::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};
use stardrift_common::{Color, ObjectId, ShapeKind, Transform};
use std::f32::consts::TAU;

use crate::object::SceneObject;

/// Colors an object may light up with while hovered.
pub const HOVER_PALETTE: [Color; 6] = [
    Color(0xff0080),
    Color(0x00ff80),
    Color(0x8000ff),
    Color(0xff8000),
    Color(0x0080ff),
    Color(0x80ff00),
];

/// Parameters for the object field layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObjectFieldConfig {
    pub count: usize,
    /// Radius of the innermost ring of the angular sweep.
    pub base_radius: f32,
    /// Radius added per ring; rings cycle every `ring_count` indices.
    pub ring_step: f32,
    pub ring_count: usize,
    pub height_amplitude: f32,
    /// Radians of the height sine per index.
    pub height_frequency: f32,
    pub height_jitter: f32,
    /// Full width of the uniform jitter applied to X and Z.
    pub planar_jitter: f32,
    pub min_scale: f32,
    pub max_scale: f32,
    /// Rotation speeds are drawn from `[-max, max)` per axis.
    pub max_rotation_speed: f32,
    pub opacity: f32,
}

impl Default for ObjectFieldConfig {
    fn default() -> Self {
        Self {
            count: 69,
            base_radius: 15.0,
            ring_step: 8.0,
            ring_count: 3,
            height_amplitude: 10.0,
            height_frequency: 0.7,
            height_jitter: 5.0,
            planar_jitter: 6.0,
            min_scale: 1.5,
            max_scale: 2.3,
            max_rotation_speed: 0.0075,
            opacity: 0.8,
        }
    }
}

/// Position on the angular sweep before side balancing.
///
/// `jitter` components are unit-centered samples in `[-0.5, 0.5)`; X and Z
/// use `planar_jitter`, Y uses `height_jitter`.
pub fn sweep_position(config: &ObjectFieldConfig, index: usize, jitter: Vec3) -> Vec3 {
    let angle = index as f32 / config.count as f32 * TAU;
    let ring = (index % config.ring_count.max(1)) as f32;
    let radius = config.base_radius + ring * config.ring_step;
    let height = (index as f32 * config.height_frequency).sin() * config.height_amplitude
        + jitter.y * config.height_jitter;

    Vec3::new(
        angle.cos() * radius + jitter.x * config.planar_jitter,
        height,
        angle.sin() * radius + jitter.z * config.planar_jitter,
    )
}

/// Side balancing: keeps `|x|` and assigns the sign from `coin`, with the
/// convention inverted for the second half of the indices.
pub fn balance_side(x: f32, index: usize, count: usize, coin: bool) -> f32 {
    let first_half = (index as f32) < count as f32 / 2.0;
    let sign = if coin == first_half { 1.0 } else { -1.0 };
    x.abs() * sign
}

/// Build the object field in creation order.
pub fn generate_objects(config: &ObjectFieldConfig, rng: &mut impl Rng) -> Vec<SceneObject> {
    (0..config.count)
        .map(|i| {
            let kind = ShapeKind::ALL[rng.random_range(0..ShapeKind::ALL.len())];

            let jitter = Vec3::new(
                rng.random::<f32>() - 0.5,
                rng.random::<f32>() - 0.5,
                rng.random::<f32>() - 0.5,
            );
            let mut position = sweep_position(config, i, jitter);
            position.x = balance_side(position.x, i, config.count, rng.random_bool(0.5));

            let rotation = Vec3::new(
                rng.random_range(0.0..TAU),
                rng.random_range(0.0..TAU),
                rng.random_range(0.0..TAU),
            );
            let scale = rng.random_range(config.min_scale..config.max_scale);

            let speed = config.max_rotation_speed;
            let rotation_speed = Vec3::new(
                rng.random_range(-speed..speed),
                rng.random_range(-speed..speed),
                rng.random_range(-speed..speed),
            );
            let float_phase = rng.random_range(0.0..TAU);
            let hover_color = HOVER_PALETTE[rng.random_range(0..HOVER_PALETTE.len())];

            let mut object = SceneObject::new(
                ObjectId(i as u32),
                kind,
                Transform {
                    position,
                    rotation,
                    scale: Vec3::splat(scale),
                },
                rotation_speed,
                float_phase,
                hover_color,
            );
            object.opacity = config.opacity;
            object
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn objects(seed: u64) -> Vec<SceneObject> {
        let mut rng = StdRng::seed_from_u64(seed);
        generate_objects(&ObjectFieldConfig::default(), &mut rng)
    }

    #[test]
    fn default_count_and_order() {
        let objs = objects(1);
        assert_eq!(objs.len(), 69);
        for (i, o) in objs.iter().enumerate() {
            assert_eq!(o.id, ObjectId(i as u32));
        }
    }

    #[test]
    fn scale_and_rotation_speed_in_range() {
        for o in objects(2) {
            let s = o.transform.scale;
            assert!(s.x >= 1.5 && s.x <= 2.3, "scale {s}");
            assert_eq!(s.x, s.y);
            assert_eq!(s.y, s.z);
            for v in o.rotation_speed.to_array() {
                assert!((-0.0075..=0.0075).contains(&v), "speed {v}");
            }
        }
    }

    #[test]
    fn stored_attributes() {
        for o in objects(3) {
            assert_eq!(o.original_position, o.transform.position);
            assert_eq!(o.base_position, o.transform.position);
            assert_eq!(o.original_color, Color::WHITE);
            assert!(HOVER_PALETTE.contains(&o.hover_color));
            assert!(o.float_phase >= 0.0 && o.float_phase < TAU);
            for r in o.transform.rotation.to_array() {
                assert!((0.0..TAU).contains(&r));
            }
            assert_eq!(o.opacity, 0.8);
        }
    }

    #[test]
    fn balance_keeps_magnitude_for_both_halves() {
        let count = 69;
        for index in 0..count {
            for coin in [false, true] {
                for x in [-12.5_f32, -0.25, 0.0, 3.0, 31.0] {
                    let balanced = balance_side(x, index, count, coin);
                    assert_eq!(balanced.abs(), x.abs());
                }
            }
        }
    }

    #[test]
    fn balance_sign_convention_inverts_at_half() {
        // 69 / 2 = 34.5, so index 34 is in the first half and 35 in the second
        assert_eq!(balance_side(-4.0, 34, 69, true), 4.0);
        assert_eq!(balance_side(-4.0, 34, 69, false), -4.0);
        assert_eq!(balance_side(4.0, 35, 69, true), -4.0);
        assert_eq!(balance_side(4.0, 35, 69, false), 4.0);
    }

    #[test]
    fn generated_x_magnitude_matches_sweep() {
        // Without jitter the sweep is deterministic, so |x| of the balanced
        // value must equal |cos(angle) * radius|.
        let config = ObjectFieldConfig::default();
        for i in 0..config.count {
            let raw = sweep_position(&config, i, Vec3::ZERO);
            for coin in [false, true] {
                let x = balance_side(raw.x, i, config.count, coin);
                assert_eq!(x.abs(), raw.x.abs());
            }
        }
    }

    #[test]
    fn sweep_rings_cycle_every_three() {
        let config = ObjectFieldConfig::default();
        let radius = |i: usize| {
            let p = sweep_position(&config, i, Vec3::ZERO);
            (p.x * p.x + p.z * p.z).sqrt()
        };
        assert!((radius(0) - 15.0).abs() < 1e-4);
        assert!((radius(1) - 23.0).abs() < 1e-4);
        assert!((radius(2) - 31.0).abs() < 1e-4);
        assert!((radius(3) - 15.0).abs() < 1e-4);
    }

    #[test]
    fn sweep_height_is_damped_sine_plus_jitter() {
        let config = ObjectFieldConfig::default();
        let p = sweep_position(&config, 4, Vec3::new(0.0, 0.5, 0.0));
        let expected = (4.0_f32 * 0.7).sin() * 10.0 + 2.5;
        assert!((p.y - expected).abs() < 1e-5);
    }

    #[test]
    fn objects_cover_both_sides() {
        let objs = objects(9);
        assert!(objs.iter().any(|o| o.base_position.x > 0.0));
        assert!(objs.iter().any(|o| o.base_position.x < 0.0));
    }

    #[test]
    fn same_seed_same_layout() {
        assert_eq!(objects(77), objects(77));
    }
}
