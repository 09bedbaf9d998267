//! Frame Driver: owns the session state and runs one update per host frame.
//!
//! # Invariants
//! - Within a frame: input drain, camera, scene animation, hover picking,
//!   readouts, submission. Later steps see what earlier steps wrote.
//! - The camera intro runs once and never re-enters.
//! - At most one object shows its hover color.

pub mod camera;
pub mod config;
pub mod picker;
pub mod session;

pub use camera::{CameraController, CameraPhase};
pub use config::{CameraConfig, ConfigError, SessionConfig};
pub use picker::HoverPicker;
pub use session::{FrameOutput, HostCommand, Session};

pub fn crate_info() -> &'static str {
    "stardrift-driver v0.1.0"
}
