//! Drawing surface contract.
//!
//! Systems draw through `Surface` instead of a concrete buffer so the
//! particle field can be rendered into the lyon vertex buffer in production
//! and into a call recorder in tests.

use glam::Vec2;

use crate::api::types::Viewport;
use crate::systems::vector::VectorColor;

/// A 2D surface that is fully redrawn every frame.
pub trait Surface {
    /// Match the surface dimensions to the viewport.
    fn resize(&mut self, viewport: Viewport);

    /// Erase everything drawn since the last clear.
    fn clear(&mut self);

    /// Filled circle; `color.a` carries the opacity.
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: VectorColor);

    /// Straight line segment of the given width.
    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, color: VectorColor);
}

#[cfg(test)]
pub(crate) mod recording {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    pub enum DrawCall {
        Clear,
        Circle { center: Vec2, radius: f32, color: VectorColor },
        Line { from: Vec2, to: Vec2, width: f32, color: VectorColor },
    }

    /// Surface that records every call, for asserting on draw order.
    #[derive(Debug, Default)]
    pub struct RecordingSurface {
        pub calls: Vec<DrawCall>,
        pub viewport: Option<Viewport>,
    }

    impl RecordingSurface {
        pub fn circles(&self) -> usize {
            self.calls.iter().filter(|c| matches!(c, DrawCall::Circle { .. })).count()
        }

        pub fn lines(&self) -> Vec<&DrawCall> {
            self.calls.iter().filter(|c| matches!(c, DrawCall::Line { .. })).collect()
        }
    }

    impl Surface for RecordingSurface {
        fn resize(&mut self, viewport: Viewport) {
            self.viewport = Some(viewport);
        }

        fn clear(&mut self) {
            self.calls.clear();
            self.calls.push(DrawCall::Clear);
        }

        fn fill_circle(&mut self, center: Vec2, radius: f32, color: VectorColor) {
            self.calls.push(DrawCall::Circle { center, radius, color });
        }

        fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, color: VectorColor) {
            self.calls.push(DrawCall::Line { from, to, width, color });
        }
    }
}
