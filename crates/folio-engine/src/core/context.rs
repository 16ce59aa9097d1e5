use glam::Vec2;

use crate::api::types::Viewport;
use crate::core::watch::Watch;

/// Per-session inputs shared by every component: viewport, pointer and
/// scroll position. Components get it by reference; only the session writes.
#[derive(Debug, Clone)]
pub struct SessionContext {
    pub viewport: Watch<Viewport>,
    pub pointer: Watch<Vec2>,
    pub scroll_y: Watch<f32>,
}

impl SessionContext {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport: Watch::new(viewport),
            pointer: Watch::new(Vec2::ZERO),
            scroll_y: Watch::new(0.0),
        }
    }
}
