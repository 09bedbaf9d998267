use glam::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::f32::consts::{PI, TAU};

use crate::scene::MotionConfig;

/// Parameters for the background point cloud.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StarfieldConfig {
    pub count: usize,
    pub min_radius: f32,
    pub max_radius: f32,
    /// Probability that a star gets the pale blue tint instead of pure white.
    pub tint_probability: f64,
    pub min_size: f32,
    pub max_size: f32,
    pub opacity: f32,
}

impl Default for StarfieldConfig {
    fn default() -> Self {
        Self {
            count: 500,
            min_radius: 200.0,
            max_radius: 300.0,
            tint_probability: 0.1,
            min_size: 0.5,
            max_size: 2.5,
            opacity: 0.8,
        }
    }
}

/// One point of the starfield. Fixed at creation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Star {
    pub position: Vec3,
    /// Sampled shell radius; `position.length()` up to rounding.
    pub radius: f32,
    pub color: [f32; 3],
    pub size: f32,
}

/// The point cloud as a single entity. Only whole-field rotation and opacity
/// change after generation.
#[derive(Debug, Clone)]
pub struct Starfield {
    stars: Vec<Star>,
    /// Euler XYZ rotation of the whole field.
    pub rotation: Vec3,
    pub opacity: f32,
}

impl Default for Starfield {
    /// An empty field at the default opacity.
    fn default() -> Self {
        Self {
            stars: Vec::new(),
            rotation: Vec3::ZERO,
            opacity: StarfieldConfig::default().opacity,
        }
    }
}

impl Starfield {
    /// Sample `config.count` stars on the spherical shell.
    pub fn generate(config: &StarfieldConfig, rng: &mut impl Rng) -> Self {
        let stars = (0..config.count)
            .map(|_| {
                let radius = rng.random_range(config.min_radius..config.max_radius);
                let theta = rng.random_range(0.0..TAU);
                let phi = rng.random_range(0.0..PI);
                let position = Vec3::new(
                    radius * phi.sin() * theta.cos(),
                    radius * phi.sin() * theta.sin(),
                    radius * phi.cos(),
                );

                let color = if rng.random_bool(config.tint_probability) {
                    [rng.random_range(0.8..1.0), rng.random_range(0.8..1.0), 1.0]
                } else {
                    [1.0, 1.0, 1.0]
                };
                let size = rng.random_range(config.min_size..config.max_size);

                Star {
                    position,
                    radius,
                    color,
                    size,
                }
            })
            .collect();

        Self {
            stars,
            rotation: Vec3::ZERO,
            opacity: config.opacity,
        }
    }

    pub fn stars(&self) -> &[Star] {
        &self.stars
    }

    pub fn len(&self) -> usize {
        self.stars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stars.is_empty()
    }

    /// Per-frame drift: fixed rotation increments plus the opacity twinkle
    /// keyed by wall-clock seconds.
    pub fn advance(&mut self, time: f64, motion: &MotionConfig) {
        self.rotation.y += motion.star_yaw_rate;
        self.rotation.x += motion.star_pitch_rate;
        self.opacity = motion.twinkle(time);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn field(seed: u64) -> Starfield {
        let mut rng = StdRng::seed_from_u64(seed);
        Starfield::generate(&StarfieldConfig::default(), &mut rng)
    }

    #[test]
    fn default_count() {
        assert_eq!(field(1).len(), 500);
    }

    #[test]
    fn stars_lie_on_the_shell() {
        for star in field(7).stars() {
            assert!(star.radius >= 200.0 && star.radius < 300.0);
            let len = star.position.length();
            assert!(
                (len - star.radius).abs() < 1e-3,
                "magnitude {len} vs sampled radius {}",
                star.radius
            );
        }
    }

    #[test]
    fn colors_are_white_or_pale_blue() {
        let stars = field(3);
        let mut tinted = 0;
        for star in stars.stars() {
            let [r, g, b] = star.color;
            assert_eq!(b, 1.0);
            if star.color != [1.0, 1.0, 1.0] {
                tinted += 1;
                assert!((0.8..1.0).contains(&r));
                assert!((0.8..1.0).contains(&g));
            }
        }
        // ~10% of 500; loose bounds
        assert!(tinted > 10 && tinted < 120, "tinted = {tinted}");
    }

    #[test]
    fn sizes_in_range() {
        for star in field(11).stars() {
            assert!(star.size >= 0.5 && star.size < 2.5);
        }
    }

    #[test]
    fn same_seed_same_field() {
        let a = field(42);
        let b = field(42);
        assert_eq!(a.stars(), b.stars());
    }

    #[test]
    fn advance_rotates_and_twinkles() {
        let mut f = field(5);
        let motion = MotionConfig::default();
        f.advance(0.0, &motion);
        f.advance(0.0, &motion);
        assert!((f.rotation.y - 0.0004).abs() < 1e-9);
        assert!((f.rotation.x - 0.0002).abs() < 1e-9);
        assert!((f.opacity - 0.8).abs() < 1e-6);

        // sin(2t) = 1 at t = pi/4
        f.advance(std::f64::consts::FRAC_PI_4, &motion);
        assert!((f.opacity - 1.0).abs() < 1e-6);
    }

    #[test]
    fn empty_config_is_empty_field() {
        let mut rng = StdRng::seed_from_u64(0);
        let config = StarfieldConfig {
            count: 0,
            ..StarfieldConfig::default()
        };
        assert!(Starfield::generate(&config, &mut rng).is_empty());
    }
}
