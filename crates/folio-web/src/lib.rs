//! WASM bridge: mounts one effects session per page load.
//!
//! The page calls `session_mount` once its canvas exists (or not) and
//! `session_unmount` on teardown. Between the two, input arrives through
//! window listeners or the `session_*` push functions, and frames run either
//! from the built-in `requestAnimationFrame` loop or from `session_tick`.
//! Everything the page needs to draw is read back from one flat f32 buffer.

pub mod host;
pub mod runner;

use std::cell::RefCell;

use wasm_bindgen::prelude::*;

use folio_engine::{InputEvent, SessionConfig, SessionError, Viewport};

pub use host::{EventSubscription, FrameLoop, HostBindings};
pub use runner::SessionRunner;

thread_local! {
    static RUNNER: RefCell<Option<SessionRunner>> = RefCell::new(None);
    static HOST: RefCell<Option<HostBindings>> = RefCell::new(None);
}

/// Run `f` against the mounted runner, or return `None` when nothing is mounted.
fn with_runner<R>(f: impl FnOnce(&mut SessionRunner) -> R) -> Option<R> {
    RUNNER.with(|cell| cell.borrow_mut().as_mut().map(f))
}

pub(crate) fn push_input(event: InputEvent) {
    with_runner(|r| r.push_input(event));
}

pub(crate) fn tick_runner(dt: f32) {
    with_runner(|r| r.tick(dt));
}

fn to_js(err: SessionError) -> JsValue {
    log::error!("folio-web: {}", err);
    JsValue::from_str(&err.to_string())
}

/// Start a session.
///
/// `config_json` may be empty for the defaults. Pass `surface_available =
/// false` when the canvas context could not be created: the background then
/// stays blank. With `drive_frames` the session schedules its own animation
/// frames; otherwise the page calls `session_tick`.
#[wasm_bindgen]
pub fn session_mount(config_json: &str, surface_available: bool, drive_frames: bool) -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    // Remount starts from scratch.
    session_unmount();

    let config = if config_json.trim().is_empty() {
        SessionConfig::default()
    } else {
        SessionConfig::from_json(config_json).map_err(to_js)?
    };

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("folio-web: no window"))?;
    let (width, height) = host::viewport_size(&window)
        .ok_or_else(|| JsValue::from_str("folio-web: viewport size unavailable"))?;

    let runner = SessionRunner::mount(config, Viewport::new(width, height), surface_available).map_err(to_js)?;
    RUNNER.with(|cell| *cell.borrow_mut() = Some(runner));

    match HostBindings::attach(&window, drive_frames) {
        Ok(bindings) => HOST.with(|cell| *cell.borrow_mut() = Some(bindings)),
        Err(err) => {
            session_unmount();
            return Err(err);
        }
    }

    log::info!("folio-web: mounted");
    Ok(())
}

/// End the session: drop listeners and the frame loop, cancel every timer.
/// Safe to call when nothing is mounted.
#[wasm_bindgen]
pub fn session_unmount() {
    // Taken out of the cells first so drops run without a borrow held.
    let bindings = HOST.with(|cell| cell.borrow_mut().take());
    drop(bindings);

    let runner = RUNNER.with(|cell| cell.borrow_mut().take());
    if let Some(mut runner) = runner {
        runner.teardown();
        log::info!("folio-web: unmounted");
    }
}

#[wasm_bindgen]
pub fn session_tick(dt: f32) {
    tick_runner(dt);
}

#[wasm_bindgen]
pub fn session_resize(width: f32, height: f32) {
    push_input(InputEvent::Resize { width, height });
}

#[wasm_bindgen]
pub fn session_pointer_move(x: f32, y: f32) {
    push_input(InputEvent::PointerMove { x, y });
}

#[wasm_bindgen]
pub fn session_scroll(y: f32) {
    push_input(InputEvent::Scroll { y });
}

#[wasm_bindgen]
pub fn session_section_layout(index: u32, top: f32, height: f32) {
    push_input(InputEvent::SectionLayout { index, top, height });
}

// ---- Data accessors ----

#[wasm_bindgen]
pub fn is_mounted() -> bool {
    with_runner(|r| r.session().is_running()).unwrap_or(false)
}

#[wasm_bindgen]
pub fn get_frame_buffer_ptr() -> *const f32 {
    with_runner(|r| r.frame_buffer_ptr()).unwrap_or(std::ptr::null())
}

#[wasm_bindgen]
pub fn get_buffer_total_floats() -> u32 {
    with_runner(|r| r.layout().buffer_total_floats as u32).unwrap_or(0)
}

#[wasm_bindgen]
pub fn get_decor_data_offset() -> u32 {
    with_runner(|r| r.layout().decor_data_offset as u32).unwrap_or(0)
}

#[wasm_bindgen]
pub fn get_vector_data_offset() -> u32 {
    with_runner(|r| r.layout().vector_data_offset as u32).unwrap_or(0)
}

#[wasm_bindgen]
pub fn get_event_data_offset() -> u32 {
    with_runner(|r| r.layout().event_data_offset as u32).unwrap_or(0)
}

#[wasm_bindgen]
pub fn get_typed_text() -> String {
    with_runner(|r| r.text()).unwrap_or_default()
}

#[wasm_bindgen]
pub fn get_active_section_id() -> String {
    with_runner(|r| r.active_section_id()).unwrap_or_default()
}

#[wasm_bindgen]
pub fn is_loaded() -> bool {
    with_runner(|r| r.session().is_loaded()).unwrap_or(false)
}
