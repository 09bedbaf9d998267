use std::collections::VecDeque;

/// A raw event delivered by the host page.
///
/// The frame driver consumes these, never the host callbacks themselves.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Pointer moved to client coordinates (pixels from the top-left).
    PointerMoved { x: f32, y: f32 },
    /// Page scrolled. `offset` is the current vertical scroll position.
    Scrolled {
        offset: f32,
        document_height: f32,
        viewport_height: f32,
    },
    /// Mouse wheel turned by `delta_y` (sign ignored).
    Wheel { delta_y: f32 },
    /// A key was pressed. Only the single-character reset command is bound.
    KeyDown(char),
    /// Viewport resized to the given size in pixels.
    Resized { width: u32, height: u32 },
}

/// Drawable viewport size in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    /// Zero dimensions are raised to 1 so ratios stay finite.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: width.max(1),
            height: height.max(1),
        }
    }

    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height as f32
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1280, 720)
    }
}

/// FIFO of events received between two frames.
#[derive(Debug, Default)]
pub struct InputQueue {
    pending: VecDeque<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: InputEvent) {
        self.pending.push_back(event);
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Take every queued event in arrival order.
    pub fn drain(&mut self) -> impl Iterator<Item = InputEvent> + '_ {
        self.pending.drain(..)
    }
}
