use folio_engine::bridge::protocol::*;
use folio_engine::{
    EventRecord, InputEvent, InputQueue, ProtocolLayout, Session, SessionConfig, SessionError, Viewport,
};

/// Owns the mounted session and packs each frame into one flat buffer.
///
/// Lives in a `thread_local!` in `lib.rs`, because wasm-bindgen exports are
/// free functions and the browser calls them one at a time.
pub struct SessionRunner {
    session: Session,
    input: InputQueue,
    layout: ProtocolLayout,
    /// Header, decor, vertices and events, laid out per `ProtocolLayout`.
    frame_buffer: Vec<f32>,
}

impl SessionRunner {
    pub fn mount(config: SessionConfig, viewport: Viewport, surface_available: bool) -> Result<Self, SessionError> {
        let session = Session::mount(config, viewport, surface_available)?;
        let layout = ProtocolLayout::from_config(session.config());
        let mut runner = Self {
            session,
            input: InputQueue::new(),
            frame_buffer: vec![0.0; layout.buffer_total_floats],
            layout,
        };
        runner.pack_frame();
        Ok(runner)
    }

    /// Queue an input event for the next tick.
    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Run one frame tick: drain input, advance the session, repack the buffer.
    pub fn tick(&mut self, dt: f32) {
        if !self.session.is_running() {
            return;
        }
        let input = self.input.drain();
        self.session.tick(dt, &input);
        self.pack_frame();
    }

    /// Cancel every pending timer and release the particle field.
    pub fn teardown(&mut self) {
        self.input.drain();
        self.session.teardown();
        self.pack_frame();
    }

    fn pack_frame(&mut self) {
        let session = &self.session;
        let layout = &self.layout;
        let buf = &mut self.frame_buffer;

        let vertices = session.surface().map_or(&[][..], |s| s.data());
        let vertex_floats = vertices.len().min(layout.vector_data_floats);
        buf[layout.vector_data_offset..layout.vector_data_offset + vertex_floats]
            .copy_from_slice(&vertices[..vertex_floats]);

        let events = &session.events()[..session.events().len().min(layout.max_events)];
        for (i, event) in events.iter().enumerate() {
            let offset = layout.event_data_offset + i * EVENT_FLOATS;
            let record: EventRecord = event.to_record();
            buf[offset..offset + EVENT_FLOATS].copy_from_slice(bytemuck_floats(&record));
        }

        let decor = session.decor().to_floats();
        buf[layout.decor_data_offset..layout.decor_data_offset + DECOR_FLOATS].copy_from_slice(&decor);

        let viewport = session.viewport();
        buf[HEADER_PROTOCOL_VERSION] = PROTOCOL_VERSION;
        buf[HEADER_FRAME_COUNTER] = wrap_counter(session.frame());
        buf[HEADER_VIEW_WIDTH] = viewport.width;
        buf[HEADER_VIEW_HEIGHT] = viewport.height;
        buf[HEADER_MAX_VECTOR_VERTICES] = layout.max_vector_vertices as f32;
        buf[HEADER_VECTOR_VERTEX_COUNT] = (vertex_floats / VECTOR_VERTEX_FLOATS) as f32;
        buf[HEADER_MAX_EVENTS] = layout.max_events as f32;
        buf[HEADER_EVENT_COUNT] = events.len() as f32;
        buf[HEADER_TEXT_REVISION] = wrap_counter(session.text_revision() as u64);
        buf[HEADER_TEXT_CHARS] = session.typewriter().char_index() as f32;
        buf[HEADER_LOADED] = if session.is_loaded() { 1.0 } else { 0.0 };
        buf[HEADER_ACTIVE_SECTION] = session.active_section() as f32;
        buf[HEADER_RUNNING] = if session.is_running() { 1.0 } else { 0.0 };
        buf[HEADER_PARTICLE_COUNT] = session.field().map_or(0, |f| f.len()) as f32;
        buf[HEADER_PENDING_TIMERS] = session.pending_timers() as f32;
        buf[HEADER_DROPPED_SHAPES] = session.surface().map_or(0, |s| s.dropped()) as f32;
    }

    // ---- Accessors for host reads ----

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn frame_buffer(&self) -> &[f32] {
        &self.frame_buffer
    }

    pub fn frame_buffer_ptr(&self) -> *const f32 {
        self.frame_buffer.as_ptr()
    }

    pub fn layout(&self) -> &ProtocolLayout {
        &self.layout
    }

    pub fn text(&self) -> String {
        self.session.text().to_string()
    }

    pub fn active_section_id(&self) -> String {
        self.session.active_section_id().unwrap_or_default().to_string()
    }
}

fn wrap_counter(value: u64) -> f32 {
    (value % COUNTER_WRAP) as f32
}

fn bytemuck_floats(record: &EventRecord) -> &[f32] {
    bytemuck::cast_slice(std::slice::from_ref(record))
}
