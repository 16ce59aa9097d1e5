//! Which page section the navigation should highlight.
//!
//! The host reports each section's document-space box once laid out; on every
//! scroll the first section whose on-screen box spans the probe line wins.

use crate::api::config::SectionConfig;

#[derive(Debug, Clone, Copy, PartialEq)]
struct Layout {
    top: f32,
    height: f32,
}

/// Tracks the active section from scroll position and section layouts.
#[derive(Debug, Clone)]
pub struct SectionTracker {
    ids: Vec<String>,
    layouts: Vec<Option<Layout>>,
    probe_y: f32,
    active: usize,
}

impl SectionTracker {
    /// The first configured section starts active.
    pub fn new(config: &SectionConfig) -> Self {
        Self {
            ids: config.ids.clone(),
            layouts: vec![None; config.ids.len()],
            probe_y: config.probe_y,
            active: 0,
        }
    }

    pub fn active(&self) -> usize {
        self.active
    }

    pub fn active_id(&self) -> Option<&str> {
        self.ids.get(self.active).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Record a section's document-space box. Unknown indices are ignored.
    pub fn set_layout(&mut self, index: usize, top: f32, height: f32) {
        if let Some(slot) = self.layouts.get_mut(index) {
            *slot = Some(Layout { top, height: height.max(0.0) });
        }
    }

    /// Re-evaluate for a scroll offset. Returns the new index if it changed.
    ///
    /// When no section spans the probe line the previous one stays active.
    pub fn update(&mut self, scroll_y: f32) -> Option<usize> {
        let probe = self.probe_y;
        let hit = self.layouts.iter().position(|layout| match layout {
            Some(l) => {
                let top = l.top - scroll_y;
                top <= probe && top + l.height >= probe
            }
            None => false,
        })?;
        if hit == self.active {
            return None;
        }
        self.active = hit;
        Some(hit)
    }
}
