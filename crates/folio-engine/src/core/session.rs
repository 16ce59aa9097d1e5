//! One page session: mount, per-frame tick, teardown.
//!
//! The session owns every component and every pending timer. The host calls
//! `tick` once per animation frame with the elapsed time and the inputs that
//! arrived since the previous frame; `teardown` releases everything, after
//! which the session is inert.

use crate::api::config::SessionConfig;
use crate::api::error::{Result, SessionError};
use crate::api::types::{SessionEvent, Viewport};
use crate::core::context::SessionContext;
use crate::core::schedule::{Scheduler, TimerId};
use crate::core::time::FixedTimestep;
use crate::input::queue::InputEvent;
use crate::renderer::traits::Surface;
use crate::systems::decor::Decor;
use crate::systems::particles::{ParticleField, Rng};
use crate::systems::sections::SectionTracker;
use crate::systems::typewriter::Typewriter;
use crate::systems::vector::VectorState;

/// What a pending session timer does when it fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SessionTimer {
    Typewriter,
    Loading,
}

/// Everything alive for one page load.
pub struct Session {
    config: SessionConfig,
    ctx: SessionContext,
    /// Particle background; `None` when the host had no drawing surface.
    field: Option<(ParticleField, VectorState)>,
    typewriter: Typewriter,
    typewriter_timer: Option<TimerId>,
    sections: SectionTracker,
    scheduler: Scheduler<SessionTimer>,
    timestep: FixedTimestep,
    events: Vec<SessionEvent>,
    loaded: bool,
    text_revision: u32,
    /// Parallax transforms, recomputed when pointer or scroll change.
    decor: Decor,
    /// Pointer and scroll versions `decor` was computed from.
    decor_seen: (u64, u64),
    frame: u64,
    overflow_warned: bool,
}

impl Session {
    /// Start a session.
    ///
    /// With `surface_available == false` the particle field never starts and
    /// the background stays blank; everything else runs normally.
    pub fn mount(config: SessionConfig, viewport: Viewport, surface_available: bool) -> Result<Self> {
        config.validate()?;
        if !viewport.is_valid() {
            return Err(SessionError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }

        let typewriter = Typewriter::new(&config.typewriter)?;

        let field = if surface_available {
            let mut rng = Rng::new(config.seed);
            let field = ParticleField::new(&config.field, viewport, &mut rng);
            let surface = VectorState::new(viewport, config.max_vector_vertices);
            Some((field, surface))
        } else {
            log::warn!("session: no drawing surface, particle background disabled");
            None
        };

        let mut scheduler = Scheduler::new();
        let typewriter_timer =
            scheduler.schedule(typewriter.initial_delay_ms() as f64, SessionTimer::Typewriter);
        scheduler.schedule(config.loading_ms, SessionTimer::Loading);

        log::info!(
            "session: mounted {}x{}, {} particles, {} phrases",
            viewport.width,
            viewport.height,
            field.as_ref().map_or(0, |(f, _)| f.len()),
            typewriter.phrase_count(),
        );

        let ctx = SessionContext::new(viewport);
        let mut session = Self {
            decor: Decor::from_context(&ctx),
            decor_seen: (ctx.pointer.version(), ctx.scroll_y.version()),
            ctx,
            field,
            typewriter,
            typewriter_timer,
            sections: SectionTracker::new(&config.sections),
            scheduler,
            timestep: FixedTimestep::new(config.fixed_dt),
            events: Vec::with_capacity(config.max_events),
            loaded: false,
            text_revision: 0,
            frame: 0,
            overflow_warned: false,
            config,
        };
        session.render();
        Ok(session)
    }

    /// Run one frame: apply inputs, step particles, fire due timers, redraw.
    ///
    /// `dt` is the time since the previous frame in seconds. Does nothing
    /// after teardown.
    pub fn tick(&mut self, dt: f32, input: &[InputEvent]) {
        if !self.is_running() {
            return;
        }
        self.events.clear();

        for event in input {
            self.apply_input(*event);
        }
        self.refresh_decor();

        let steps = self.timestep.accumulate(dt);
        if let Some((field, _)) = self.field.as_mut() {
            for _ in 0..steps {
                field.step();
            }
        }

        let typewriter = &mut self.typewriter;
        let typewriter_timer = &mut self.typewriter_timer;
        let events = &mut self.events;
        let loaded = &mut self.loaded;
        let text_revision = &mut self.text_revision;
        let max_events = self.config.max_events;
        self.scheduler.advance(dt.max(0.0) as f64 * 1000.0, |scheduler, timer| match timer {
            SessionTimer::Typewriter => {
                let tick = typewriter.advance();
                if tick.changed {
                    *text_revision = text_revision.wrapping_add(1);
                    push_event(events, max_events, SessionEvent::TextChanged);
                }
                *typewriter_timer = scheduler.schedule(tick.delay_ms as f64, SessionTimer::Typewriter);
            }
            SessionTimer::Loading => {
                *loaded = true;
                push_event(events, max_events, SessionEvent::Loaded);
                log::debug!("session: loading splash done");
            }
        });

        self.render();
        self.frame += 1;
    }

    fn apply_input(&mut self, event: InputEvent) {
        match event {
            InputEvent::Resize { width, height } => {
                let viewport = Viewport::new(width, height);
                if !viewport.is_valid() {
                    log::warn!("session: ignoring invalid resize {}x{}", width, height);
                    return;
                }
                if self.ctx.viewport.set(viewport) {
                    if let Some((field, surface)) = self.field.as_mut() {
                        field.resize(viewport);
                        surface.resize(viewport);
                    }
                    log::debug!("session: resized to {}x{}", width, height);
                }
            }
            InputEvent::PointerMove { x, y } => {
                self.ctx.pointer.set(glam::Vec2::new(x, y));
            }
            InputEvent::Scroll { y } => {
                self.ctx.scroll_y.set(y);
                self.refresh_section();
            }
            InputEvent::SectionLayout { index, top, height } => {
                self.sections.set_layout(index as usize, top, height);
                self.refresh_section();
            }
        }
    }

    fn refresh_decor(&mut self) {
        let (pointer_seen, scroll_seen) = self.decor_seen;
        if self.ctx.pointer.changed_since(pointer_seen) || self.ctx.scroll_y.changed_since(scroll_seen) {
            self.decor = Decor::from_context(&self.ctx);
            self.decor_seen = (self.ctx.pointer.version(), self.ctx.scroll_y.version());
        }
    }

    fn refresh_section(&mut self) {
        if let Some(index) = self.sections.update(self.ctx.scroll_y.get()) {
            log::debug!("session: active section {:?}", self.sections.active_id());
            push_event(&mut self.events, self.config.max_events, SessionEvent::SectionChanged(index as u32));
        }
    }

    fn render(&mut self) {
        if let Some((field, surface)) = self.field.as_mut() {
            field.render(surface);
            if surface.dropped() > 0 && !self.overflow_warned {
                log::warn!(
                    "session: vertex buffer full ({} max), {} shapes dropped",
                    surface.max_vertices(),
                    surface.dropped()
                );
                self.overflow_warned = true;
            }
        }
    }

    /// End the session: cancel every pending timer and drop the particle
    /// field and its surface. Safe to call more than once.
    pub fn teardown(&mut self) {
        if !self.is_running() {
            return;
        }
        let mut cancelled = 0;
        if let Some(id) = self.typewriter_timer.take() {
            cancelled += usize::from(self.scheduler.cancel(id));
        }
        cancelled += self.scheduler.close();
        self.field = None;
        self.events.clear();
        log::info!("session: torn down after {} frames, {} timers cancelled", self.frame, cancelled);
    }

    // ---- Read accessors ----

    pub fn is_running(&self) -> bool {
        !self.scheduler.is_closed()
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn context(&self) -> &SessionContext {
        &self.ctx
    }

    pub fn viewport(&self) -> Viewport {
        self.ctx.viewport.get()
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Current typed text.
    pub fn text(&self) -> &str {
        self.typewriter.text()
    }

    /// Bumps every time the typed text changes.
    pub fn text_revision(&self) -> u32 {
        self.text_revision
    }

    pub fn typewriter(&self) -> &Typewriter {
        &self.typewriter
    }

    pub fn field(&self) -> Option<&ParticleField> {
        self.field.as_ref().map(|(f, _)| f)
    }

    pub fn surface(&self) -> Option<&VectorState> {
        self.field.as_ref().map(|(_, s)| s)
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn active_section(&self) -> usize {
        self.sections.active()
    }

    pub fn active_section_id(&self) -> Option<&str> {
        self.sections.active_id()
    }

    pub fn decor(&self) -> Decor {
        self.decor
    }

    /// Events emitted during the most recent tick.
    pub fn events(&self) -> &[SessionEvent] {
        &self.events
    }

    pub fn pending_timers(&self) -> usize {
        self.scheduler.pending_len()
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.teardown();
    }
}

fn push_event(events: &mut Vec<SessionEvent>, max: usize, event: SessionEvent) {
    if events.len() < max {
        events.push(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::config::TypewriterConfig;

    const FRAME: f32 = 1.0 / 60.0;

    fn config(phrases: &[&str]) -> SessionConfig {
        SessionConfig {
            typewriter: TypewriterConfig {
                phrases: phrases.iter().map(|p| p.to_string()).collect(),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    fn mount(phrases: &[&str]) -> Session {
        Session::mount(config(phrases), Viewport::new(800.0, 600.0), true).unwrap()
    }

    /// Tick in 10ms frames, collecting each distinct text.
    fn texts_over(session: &mut Session, ms: u32) -> Vec<String> {
        let mut seen = vec![session.text().to_string()];
        for _ in 0..ms / 10 {
            session.tick(0.010, &[]);
            if session.events().contains(&SessionEvent::TextChanged) {
                seen.push(session.text().to_string());
            }
        }
        seen
    }

    #[test]
    fn mount_draws_initial_frame() {
        let session = mount(&["Hi"]);
        assert!(session.is_running());
        assert_eq!(session.field().unwrap().len(), 100);
        assert!(session.surface().unwrap().vertex_count() > 0);
        assert_eq!(session.pending_timers(), 2);
    }

    #[test]
    fn empty_phrases_refuse_to_mount() {
        let err = Session::mount(config(&[]), Viewport::new(800.0, 600.0), true).err().unwrap();
        assert!(matches!(err, SessionError::EmptyPhrases));
    }

    #[test]
    fn invalid_viewport_refuses_to_mount() {
        let err = Session::mount(SessionConfig::default(), Viewport::new(f32::NAN, 1.0), true)
            .err()
            .unwrap();
        assert!(matches!(err, SessionError::InvalidViewport { .. }));
    }

    #[test]
    fn missing_surface_degrades_to_text_only() {
        let mut session = Session::mount(config(&["Hi"]), Viewport::new(800.0, 600.0), false).unwrap();
        assert!(session.field().is_none());
        for _ in 0..20 {
            session.tick(FRAME, &[]);
        }
        assert_eq!(session.text(), "Hi");
    }

    #[test]
    fn typewriter_follows_hi_go_sequence() {
        let mut session = mount(&["Hi", "Go"]);
        // 80 + 80 reveal, 3000 hold, 30 + 30 erase, 500 hold, 80 + 80 reveal
        let seen = texts_over(&mut session, 3900);
        assert_eq!(seen, vec!["", "H", "Hi", "H", "", "G", "Go"]);
        assert_eq!(session.typewriter().phrase_index(), 1);
    }

    #[test]
    fn long_frame_catches_up_on_timers() {
        let mut session = mount(&["Hello"]);
        session.tick(0.5, &[]);
        // 80ms cadence: five reveals by 400ms, then the hold
        assert_eq!(session.text(), "Hello");
        assert_eq!(session.text_revision(), 5);
    }

    #[test]
    fn loading_flag_flips_after_splash() {
        let mut session = mount(&["Hi"]);
        session.tick(1.9, &[]);
        assert!(!session.is_loaded());
        session.tick(0.2, &[]);
        assert!(session.is_loaded());
        assert!(session.events().contains(&SessionEvent::Loaded));
    }

    #[test]
    fn resize_updates_field_bounds_without_moving_particles() {
        let mut session = mount(&["Hi"]);
        let before: Vec<_> = session.field().unwrap().particles().iter().map(|p| p.pos).collect();
        session.tick(0.0, &[InputEvent::Resize { width: 400.0, height: 300.0 }]);
        let field = session.field().unwrap();
        assert_eq!(field.bounds(), glam::Vec2::new(400.0, 300.0));
        let after: Vec<_> = field.particles().iter().map(|p| p.pos).collect();
        assert_eq!(before, after);
        assert_eq!(session.surface().unwrap().viewport(), Viewport::new(400.0, 300.0));
    }

    #[test]
    fn scroll_changes_active_section() {
        let mut session = mount(&["Hi"]);
        let layout = [
            InputEvent::SectionLayout { index: 0, top: 0.0, height: 800.0 },
            InputEvent::SectionLayout { index: 1, top: 800.0, height: 800.0 },
        ];
        session.tick(FRAME, &layout);
        session.tick(FRAME, &[InputEvent::Scroll { y: 750.0 }]);
        assert_eq!(session.active_section_id(), Some("about"));
        assert!(session.events().contains(&SessionEvent::SectionChanged(1)));
    }

    #[test]
    fn pointer_feeds_decor() {
        let mut session = mount(&["Hi"]);
        session.tick(FRAME, &[InputEvent::PointerMove { x: 700.0, y: 500.0 }]);
        assert_eq!(session.decor().outer_glow, glam::Vec2::new(100.0, -100.0));
    }

    #[test]
    fn zero_delay_typewriter_refuses_to_mount() {
        let json = r#"{ "typewriter": { "phrases": ["Hi"], "type_ms": 0, "delete_ms": 0,
            "pause_full_ms": 0, "pause_empty_ms": 0 } }"#;
        let mut config = config(&["Hi"]);
        assert!(SessionConfig::from_json(json).is_err());
        config.typewriter.type_ms = 0;
        let err = Session::mount(config, Viewport::new(800.0, 600.0), true).err().unwrap();
        assert!(matches!(err, SessionError::OutOfRange { .. }));
    }

    #[test]
    fn oversized_vertex_buffer_refuses_to_mount() {
        let mut config = config(&["Hi"]);
        config.max_vector_vertices = usize::MAX;
        let err = Session::mount(config, Viewport::new(800.0, 600.0), true).err().unwrap();
        assert!(matches!(err, SessionError::OutOfRange { field: "max_vector_vertices", .. }));
    }

    #[test]
    fn decor_follows_scroll_after_pointer() {
        let mut session = mount(&["Hi"]);
        session.tick(FRAME, &[InputEvent::PointerMove { x: 700.0, y: 500.0 }]);
        session.tick(FRAME, &[]);
        assert_eq!(session.decor().outer_glow, glam::Vec2::new(100.0, -100.0));
        session.tick(FRAME, &[InputEvent::Scroll { y: 100.0 }]);
        assert!((session.decor().inner_rotation - 10.0).abs() < 1e-4);
        assert_eq!(session.decor().outer_glow, glam::Vec2::new(100.0, -100.0));
    }

    #[test]
    fn teardown_mid_animation_cancels_everything() {
        let mut session = mount(&["Hello"]);
        session.tick(0.1, &[]);
        let text = session.text().to_string();
        let revision = session.text_revision();
        assert!(session.pending_timers() > 0);

        session.teardown();
        assert!(!session.is_running());
        assert_eq!(session.pending_timers(), 0);
        assert!(session.field().is_none());

        for _ in 0..600 {
            session.tick(FRAME, &[]);
        }
        assert_eq!(session.text(), text);
        assert_eq!(session.text_revision(), revision);
        assert!(!session.is_loaded());
        assert!(session.events().is_empty());

        session.teardown();
    }

    #[test]
    fn remount_starts_from_scratch() {
        let mut first = mount(&["Hi", "Go"]);
        first.tick(5.0, &[]);
        first.teardown();
        let second = mount(&["Hi", "Go"]);
        assert_eq!(second.text(), "");
        assert_eq!(second.typewriter().phrase_index(), 0);
        assert!(!second.is_loaded());
    }

    #[test]
    fn particles_move_on_fixed_steps() {
        let mut session = mount(&["Hi"]);
        let before = session.field().unwrap().particles()[0].pos;
        session.tick(FRAME * 3.0, &[]);
        let after = session.field().unwrap().particles()[0].pos;
        assert_ne!(before, after);
    }
}
