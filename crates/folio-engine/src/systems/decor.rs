//! Pointer and scroll driven transforms for the decorative glow layers.

use glam::Vec2;

use crate::core::context::SessionContext;

const PARALLAX: f32 = 0.02;
const OUTER_GLOW_RADIUS: f32 = 600.0;
const INNER_GLOW_RADIUS: f32 = 400.0;
const INNER_SPIN: f32 = 0.1;
const CORNER_SPIN: f32 = -0.05;

/// Layer transforms derived from the current pointer and scroll position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Decor {
    /// Top-left of the large glow that follows the cursor.
    pub outer_glow: Vec2,
    /// Top-left of the smaller glow that follows the cursor.
    pub inner_glow: Vec2,
    /// Inner glow rotation in degrees.
    pub inner_rotation: f32,
    /// Bottom-right inset of the corner glow.
    pub corner_offset: Vec2,
    /// Corner glow rotation in degrees.
    pub corner_rotation: f32,
    /// Translation applied to the hero content.
    pub hero_offset: Vec2,
}

impl Decor {
    pub fn from_context(ctx: &SessionContext) -> Self {
        let pointer = ctx.pointer.get();
        let scroll = ctx.scroll_y.get();
        Self {
            outer_glow: pointer - Vec2::splat(OUTER_GLOW_RADIUS),
            inner_glow: pointer - Vec2::splat(INNER_GLOW_RADIUS),
            inner_rotation: scroll * INNER_SPIN,
            corner_offset: pointer * PARALLAX,
            corner_rotation: scroll * CORNER_SPIN,
            hero_offset: pointer * PARALLAX,
        }
    }

    /// Flat layout for host reads: 10 floats in field order.
    pub fn to_floats(&self) -> [f32; 10] {
        [
            self.outer_glow.x,
            self.outer_glow.y,
            self.inner_glow.x,
            self.inner_glow.y,
            self.inner_rotation,
            self.corner_offset.x,
            self.corner_offset.y,
            self.corner_rotation,
            self.hero_offset.x,
            self.hero_offset.y,
        ]
    }
}
