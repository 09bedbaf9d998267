//! Input Tracker: raw host events queued and folded into normalized state.
//!
//! # Invariants
//! - Handlers never touch scene state; events are queued and applied once per
//!   frame, so input state is stable for the whole frame.
//! - Scroll progress is always finite and within [0, 1].

pub mod event;
pub mod tracker;

pub use event::{InputEvent, InputQueue, Viewport};
pub use tracker::{InputConfig, InputEffect, InputTracker, scroll_progress};

pub fn crate_info() -> &'static str {
    "stardrift-input v0.1.0"
}
