//! Shared types and utilities for the stardrift scene.
//!
//! # Invariants
//! - Types here carry no behavior that depends on the renderer or the host.

pub mod math;
pub mod types;

pub use math::{approach, ease_out_cubic, lerp};
pub use types::{Color, ObjectId, Ray, ShapeKind, Transform};

pub fn crate_info() -> &'static str {
    "stardrift-common v0.1.0"
}
