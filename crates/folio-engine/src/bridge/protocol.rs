/// Frame buffer layout shared with the host page.
/// Must stay in sync with the TypeScript reader.
///
/// Layout (all values in f32 / 4 bytes):
/// ```text
/// [Header: 16 floats]
/// [Decor: 10 floats]
/// [Vectors: max_vector_vertices × 6 floats]
/// [Events: max_events × 4 floats]
/// ```
///
/// Capacities are written into the header every frame.
/// The host reads them from the header to compute offsets dynamically.

use crate::api::config::SessionConfig;

/// Counters in the header (frame, text revision) wrap at this value so they
/// stay exact in an f32. Readers compare them for inequality only.
pub const COUNTER_WRAP: u64 = 1 << 24;

/// Number of floats in the header section.
pub const HEADER_FLOATS: usize = 16;

/// Header field indices.
pub const HEADER_PROTOCOL_VERSION: usize = 0;
pub const HEADER_FRAME_COUNTER: usize = 1;
pub const HEADER_VIEW_WIDTH: usize = 2;
pub const HEADER_VIEW_HEIGHT: usize = 3;
pub const HEADER_MAX_VECTOR_VERTICES: usize = 4;
pub const HEADER_VECTOR_VERTEX_COUNT: usize = 5;
pub const HEADER_MAX_EVENTS: usize = 6;
pub const HEADER_EVENT_COUNT: usize = 7;
pub const HEADER_TEXT_REVISION: usize = 8;
pub const HEADER_TEXT_CHARS: usize = 9;
pub const HEADER_LOADED: usize = 10;
pub const HEADER_ACTIVE_SECTION: usize = 11;
pub const HEADER_RUNNING: usize = 12;
pub const HEADER_PARTICLE_COUNT: usize = 13;
pub const HEADER_PENDING_TIMERS: usize = 14;
pub const HEADER_DROPPED_SHAPES: usize = 15;

/// Protocol version written into the header.
pub const PROTOCOL_VERSION: f32 = 1.0;

/// Floats of decor transforms (see `Decor::to_floats`).
pub const DECOR_FLOATS: usize = 10;

/// Floats per vector vertex: x, y, r, g, b, a (wire format, never changes).
pub const VECTOR_VERTEX_FLOATS: usize = 6;

/// Floats per session event: kind, a, b, c (wire format, never changes).
pub const EVENT_FLOATS: usize = 4;

/// Runtime-computed buffer layout.
#[derive(Debug, Clone, PartialEq)]
pub struct ProtocolLayout {
    /// Maximum vector vertices per frame.
    pub max_vector_vertices: usize,
    /// Maximum session events per frame.
    pub max_events: usize,

    /// Size of vector data section in floats.
    pub vector_data_floats: usize,
    /// Size of event data section in floats.
    pub event_data_floats: usize,

    /// Offset (in floats) where decor data begins.
    pub decor_data_offset: usize,
    /// Offset (in floats) where vector data begins.
    pub vector_data_offset: usize,
    /// Offset (in floats) where event data begins.
    pub event_data_offset: usize,

    /// Total buffer size in floats.
    pub buffer_total_floats: usize,
    /// Total buffer size in bytes.
    pub buffer_total_bytes: usize,
}

impl ProtocolLayout {
    /// Compute layout from raw capacity values.
    pub fn new(max_vector_vertices: usize, max_events: usize) -> Self {
        let vector_data_floats = max_vector_vertices * VECTOR_VERTEX_FLOATS;
        let event_data_floats = max_events * EVENT_FLOATS;

        let decor_data_offset = HEADER_FLOATS;
        let vector_data_offset = decor_data_offset + DECOR_FLOATS;
        let event_data_offset = vector_data_offset + vector_data_floats;

        let buffer_total_floats = event_data_offset + event_data_floats;
        let buffer_total_bytes = buffer_total_floats * 4;

        Self {
            max_vector_vertices,
            max_events,
            vector_data_floats,
            event_data_floats,
            decor_data_offset,
            vector_data_offset,
            event_data_offset,
            buffer_total_floats,
            buffer_total_bytes,
        }
    }

    /// Compute layout from a SessionConfig.
    pub fn from_config(config: &SessionConfig) -> Self {
        Self::new(config.max_vector_vertices, config.max_events)
    }
}
