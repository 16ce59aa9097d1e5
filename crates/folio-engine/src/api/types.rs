use bytemuck::{Pod, Zeroable};
use glam::Vec2;

/// Size of the host viewport in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    /// Finite and non-negative in both dimensions.
    pub fn is_valid(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width >= 0.0 && self.height >= 0.0
    }
}

/// Something the host page should react to, emitted during a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    /// The typed text changed; read it back through the text accessor.
    TextChanged,
    /// The loading splash finished.
    Loaded,
    /// A new section became active (index into the configured section ids).
    SectionChanged(u32),
}

impl SessionEvent {
    pub const KIND_TEXT_CHANGED: f32 = 1.0;
    pub const KIND_LOADED: f32 = 2.0;
    pub const KIND_SECTION_CHANGED: f32 = 3.0;

    /// Flatten into the wire record read by the host.
    pub fn to_record(self) -> EventRecord {
        match self {
            SessionEvent::TextChanged => EventRecord { kind: Self::KIND_TEXT_CHANGED, ..Default::default() },
            SessionEvent::Loaded => EventRecord { kind: Self::KIND_LOADED, ..Default::default() },
            SessionEvent::SectionChanged(index) => EventRecord {
                kind: Self::KIND_SECTION_CHANGED,
                a: index as f32,
                ..Default::default()
            },
        }
    }
}

/// A session event as read from linear memory by the host.
/// `kind` identifies the event, `a/b/c` carry payload.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct EventRecord {
    pub kind: f32,
    pub a: f32,
    pub b: f32,
    pub c: f32,
}

impl EventRecord {
    pub const FLOATS: usize = 4;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_record_is_four_floats() {
        assert_eq!(std::mem::size_of::<EventRecord>(), EventRecord::FLOATS * 4);
    }

    #[test]
    fn section_change_carries_index() {
        let rec = SessionEvent::SectionChanged(3).to_record();
        assert_eq!(rec.kind, SessionEvent::KIND_SECTION_CHANGED);
        assert_eq!(rec.a, 3.0);
    }

    #[test]
    fn viewport_rejects_nan() {
        assert!(Viewport::new(800.0, 600.0).is_valid());
        assert!(!Viewport::new(f32::NAN, 600.0).is_valid());
        assert!(!Viewport::new(800.0, -1.0).is_valid());
    }
}
