//! Scene Kernel: the starfield, the object field, and their per-frame animation.
//!
//! # Invariants
//! - Generation happens once; object count is fixed afterwards.
//! - At most one object is highlighted at any time (enforced by the picker,
//!   observable through [`Scene::highlighted`]).
//! - Given the same seed, generation produces identical scenes.

pub mod field;
pub mod object;
pub mod scene;
pub mod starfield;

pub use field::{ObjectFieldConfig, HOVER_PALETTE};
pub use object::SceneObject;
pub use scene::{MotionConfig, Scene};
pub use starfield::{Star, Starfield, StarfieldConfig};

pub fn crate_info() -> &'static str {
    "stardrift-kernel v0.1.0"
}
