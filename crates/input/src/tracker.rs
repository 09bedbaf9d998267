use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::event::{InputEvent, Viewport};

/// Tunables for turning raw events into camera and animation targets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Camera parallax target per unit of pointer NDC.
    pub parallax_strength: f32,
    /// Base scroll speed gained at full scroll progress.
    pub scroll_speed_gain: f32,
    /// Speed boost per unit of wheel delta.
    pub wheel_boost_factor: f32,
    /// Seconds a wheel boost lasts after the most recent wheel event.
    pub wheel_boost_duration: f64,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            parallax_strength: 3.0,
            scroll_speed_gain: 1.5,
            wheel_boost_factor: 0.002,
            wheel_boost_duration: 0.2,
        }
    }
}

/// Side effects an event asks of the rest of the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEffect {
    /// Scroll progress was reset; the host page should scroll to the top.
    ResetScroll,
    /// The viewport changed size.
    Resized(Viewport),
}

/// Normalized scroll position. A document no taller than the viewport has
/// nothing to scroll and reports 0.
pub fn scroll_progress(offset: f32, document_height: f32, viewport_height: f32) -> f32 {
    let max_scroll = document_height - viewport_height;
    if max_scroll.is_nan() || max_scroll <= 0.0 || !offset.is_finite() {
        return 0.0;
    }
    (offset / max_scroll).clamp(0.0, 1.0)
}

/// Input state read by the frame driver.
#[derive(Debug, Clone)]
pub struct InputTracker {
    config: InputConfig,
    viewport: Viewport,
    pointer: Vec2,
    parallax_target: Vec2,
    scroll_progress: f32,
    base_scroll_speed: f32,
    wheel_boost: f32,
    boost_expires_at: Option<f64>,
}

impl InputTracker {
    pub fn new(config: InputConfig, viewport: Viewport) -> Self {
        Self {
            config,
            viewport,
            pointer: Vec2::ZERO,
            parallax_target: Vec2::ZERO,
            scroll_progress: 0.0,
            base_scroll_speed: 1.0,
            wheel_boost: 0.0,
            boost_expires_at: None,
        }
    }

    /// Fold one event into the state. `now` is the frame clock in seconds.
    pub fn apply(&mut self, event: &InputEvent, now: f64) -> Option<InputEffect> {
        match *event {
            InputEvent::PointerMoved { x, y } => {
                self.pointer = Vec2::new(
                    x / self.viewport.width as f32 * 2.0 - 1.0,
                    -(y / self.viewport.height as f32) * 2.0 + 1.0,
                );
                self.parallax_target = self.pointer * self.config.parallax_strength;
                None
            }
            InputEvent::Scrolled {
                offset,
                document_height,
                viewport_height,
            } => {
                self.scroll_progress = scroll_progress(offset, document_height, viewport_height);
                self.base_scroll_speed = 1.0 + self.scroll_progress * self.config.scroll_speed_gain;
                // Scrolling settles the speed back to base
                self.wheel_boost = 0.0;
                self.boost_expires_at = None;
                None
            }
            InputEvent::Wheel { delta_y } => {
                self.wheel_boost = delta_y.abs() * self.config.wheel_boost_factor;
                // Latest wheel event owns the expiry
                self.boost_expires_at = Some(now + self.config.wheel_boost_duration);
                None
            }
            InputEvent::KeyDown(key) if key.eq_ignore_ascii_case(&'r') => {
                self.scroll_progress = 0.0;
                tracing::debug!("scroll reset requested");
                Some(InputEffect::ResetScroll)
            }
            InputEvent::KeyDown(_) => None,
            InputEvent::Resized { width, height } => {
                self.viewport = Viewport::new(width, height);
                Some(InputEffect::Resized(self.viewport))
            }
        }
    }

    /// Drop the wheel boost once its deadline has passed.
    pub fn expire(&mut self, now: f64) {
        if let Some(deadline) = self.boost_expires_at {
            if now >= deadline {
                self.wheel_boost = 0.0;
                self.boost_expires_at = None;
            }
        }
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Pointer position in normalized device coordinates.
    pub fn pointer_ndc(&self) -> Vec2 {
        self.pointer
    }

    pub fn parallax_target(&self) -> Vec2 {
        self.parallax_target
    }

    pub fn scroll_progress(&self) -> f32 {
        self.scroll_progress
    }

    pub fn base_scroll_speed(&self) -> f32 {
        self.base_scroll_speed
    }

    /// Rotation multiplier for this frame: base speed plus any live boost.
    pub fn scroll_speed(&self) -> f32 {
        self.base_scroll_speed + self.wheel_boost
    }

    pub fn boost_active(&self) -> bool {
        self.boost_expires_at.is_some()
    }
}

impl Default for InputTracker {
    fn default() -> Self {
        Self::new(InputConfig::default(), Viewport::default())
    }
}
