//! Browser-side resources owned by a mounted session.
//!
//! Each guard releases exactly what it acquired when dropped, so dropping
//! `HostBindings` on unmount leaves no frame request or listener behind.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Event, EventTarget, MouseEvent, Window};

use folio_engine::InputEvent;

use crate::{push_input, tick_runner};

/// A `requestAnimationFrame` loop that re-arms itself until dropped.
pub struct FrameLoop {
    window: Window,
    running: Rc<Cell<bool>>,
    handle: Rc<Cell<Option<i32>>>,
    callback: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>,
}

impl FrameLoop {
    /// Request the first frame. `on_frame` gets seconds since the previous frame.
    pub fn start(window: Window, mut on_frame: impl FnMut(f32) + 'static) -> Result<Self, JsValue> {
        let running = Rc::new(Cell::new(true));
        let handle = Rc::new(Cell::new(None));
        let callback: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>> = Rc::new(RefCell::new(None));

        let closure = {
            let running = Rc::clone(&running);
            let handle = Rc::clone(&handle);
            // Weak, so the closure does not keep itself alive.
            let this = Rc::downgrade(&callback);
            let window = window.clone();
            let mut last: Option<f64> = None;
            Closure::<dyn FnMut(f64)>::new(move |now: f64| {
                handle.set(None);
                if !running.get() {
                    return;
                }
                let dt = last.map_or(0.0, |prev| ((now - prev) / 1000.0) as f32);
                last = Some(now);
                on_frame(dt);

                if !running.get() {
                    return;
                }
                let Some(cell) = this.upgrade() else { return };
                let cell = cell.borrow();
                let Some(cb) = cell.as_ref() else { return };
                match window.request_animation_frame(cb.as_ref().unchecked_ref()) {
                    Ok(id) => handle.set(Some(id)),
                    Err(err) => log::error!("frame loop: requestAnimationFrame failed: {:?}", err),
                }
            })
        };

        let id = window.request_animation_frame(closure.as_ref().unchecked_ref())?;
        handle.set(Some(id));
        *callback.borrow_mut() = Some(closure);

        Ok(Self { window, running, handle, callback })
    }
}

impl Drop for FrameLoop {
    fn drop(&mut self) {
        self.running.set(false);
        if let Some(id) = self.handle.take() {
            if let Err(err) = self.window.cancel_animation_frame(id) {
                log::warn!("frame loop: cancelAnimationFrame failed: {:?}", err);
            }
        }
        self.callback.borrow_mut().take();
    }
}

/// One `addEventListener` registration, removed on drop.
pub struct EventSubscription {
    target: EventTarget,
    event: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

impl EventSubscription {
    pub fn listen(
        target: &EventTarget,
        event: &'static str,
        handler: impl FnMut(Event) + 'static,
    ) -> Result<Self, JsValue> {
        let callback = Closure::<dyn FnMut(Event)>::new(handler);
        target.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref::<js_sys::Function>())?;
        Ok(Self {
            target: target.clone(),
            event,
            callback,
        })
    }
}

impl Drop for EventSubscription {
    fn drop(&mut self) {
        let result = self
            .target
            .remove_event_listener_with_callback(self.event, self.callback.as_ref().unchecked_ref::<js_sys::Function>());
        if let Err(err) = result {
            log::warn!("listener {}: removeEventListener failed: {:?}", self.event, err);
        }
    }
}

/// All browser subscriptions of one session.
pub struct HostBindings {
    // Listeners first: on drop nothing can enqueue input for a frame that will never run.
    _listeners: Vec<EventSubscription>,
    _frame_loop: Option<FrameLoop>,
}

impl HostBindings {
    /// Subscribe to resize, pointer and scroll events, and optionally drive
    /// frames from `requestAnimationFrame`.
    pub fn attach(window: &Window, drive_frames: bool) -> Result<Self, JsValue> {
        let target: &EventTarget = window.as_ref();
        let mut listeners = Vec::with_capacity(3);

        let win = window.clone();
        listeners.push(EventSubscription::listen(target, "resize", move |_| {
            if let Some((width, height)) = viewport_size(&win) {
                push_input(InputEvent::Resize { width, height });
            }
        })?);

        listeners.push(EventSubscription::listen(target, "mousemove", |event| {
            if let Some(mouse) = event.dyn_ref::<MouseEvent>() {
                push_input(InputEvent::PointerMove {
                    x: mouse.client_x() as f32,
                    y: mouse.client_y() as f32,
                });
            }
        })?);

        let win = window.clone();
        listeners.push(EventSubscription::listen(target, "scroll", move |_| {
            if let Ok(y) = win.scroll_y() {
                push_input(InputEvent::Scroll { y: y as f32 });
            }
        })?);

        let frame_loop = if drive_frames {
            Some(FrameLoop::start(window.clone(), tick_runner)?)
        } else {
            None
        };

        Ok(Self {
            _listeners: listeners,
            _frame_loop: frame_loop,
        })
    }
}

/// Current `innerWidth` x `innerHeight`, if the browser reports numbers.
pub fn viewport_size(window: &Window) -> Option<(f32, f32)> {
    let width = window.inner_width().ok()?.as_f64()?;
    let height = window.inner_height().ok()?.as_f64()?;
    Some((width as f32, height as f32))
}
