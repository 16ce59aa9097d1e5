/// Host notifications the session understands.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// The viewport changed size (CSS pixels).
    Resize { width: f32, height: f32 },
    /// The cursor moved to viewport coordinates (x, y).
    PointerMove { x: f32, y: f32 },
    /// The document scrolled to vertical offset `y`.
    Scroll { y: f32 },
    /// Document-space layout of a tracked section, reported after layout.
    SectionLayout { index: u32, top: f32, height: f32 },
}

/// A queue of input events.
/// JS pushes events as they arrive; the session drains them once per frame.
pub struct InputQueue {
    events: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(32),
        }
    }

    /// Push a new input event (called from JS via wasm-bindgen).
    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    /// Drain all pending events. Returns a Vec and clears the queue.
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }

    /// Check if there are pending events.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Number of pending events.
    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new()
    }
}
