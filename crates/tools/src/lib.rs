//! Developer Tooling: on-screen readouts and a read-only scene inspector.
//!
//! # Invariants
//! - Readouts are write-only from the core's point of view.
//! - The inspector never mutates the scene.

mod inspector;
mod readout;

pub use inspector::{ObjectInfo, SceneInspector, SceneSummary};
pub use readout::{ReadoutBoard, ReadoutError, ReadoutKey, ReadoutSink};

pub fn crate_info() -> &'static str {
    "stardrift-tools v0.1.0"
}
