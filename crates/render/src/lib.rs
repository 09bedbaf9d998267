//! Rendering Adapter: the minimal capability surface the scene needs from a
//! renderer.
//!
//! # Invariants
//! - The renderer never mutates scene truth; it mirrors what it is told.
//! - Ray queries answer nearest-first with a stable order for equal distances.
//!
//! # Backends
//! Ships a [`HeadlessRenderer`] that keeps the retained node table in memory
//! and answers ray queries against the real shape geometry. A GPU backend can
//! implement [`Renderer`] without changing the frame driver.

mod camera;
mod geometry;
mod renderer;

pub use camera::PerspectiveCamera;
pub use geometry::{ShapeMesh, intersect_shape};
pub use renderer::{FrameSummary, HeadlessRenderer, Hit, NodeDesc, NodeHandle, RenderError, Renderer};

pub fn crate_info() -> &'static str {
    "stardrift-render v0.1.0"
}
