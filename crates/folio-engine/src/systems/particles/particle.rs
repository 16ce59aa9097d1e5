//! A single drifting point of the background field.

use glam::Vec2;

use super::rng::Rng;
use crate::api::config::FieldConfig;

/// A point-particle with constant speed that reflects off the viewport edges.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub opacity: f32,
    /// Index into the field palette.
    pub color: usize,
}

impl Particle {
    pub fn new(pos: Vec2, vel: Vec2, radius: f32, opacity: f32, color: usize) -> Self {
        Self { pos, vel, radius, opacity, color }
    }

    /// Random particle inside `[0, bounds)`, with attributes drawn from the config ranges.
    pub fn random(bounds: Vec2, config: &FieldConfig, rng: &mut Rng) -> Self {
        let pos = Vec2::new(rng.next_f32() * bounds.x, rng.next_f32() * bounds.y);
        let vel = Vec2::new(
            rng.range(-config.max_speed, config.max_speed),
            rng.range(-config.max_speed, config.max_speed),
        );
        let (r0, r1) = config.radius_range;
        let (o0, o1) = config.opacity_range;
        let color = rng.next_int(config.palette.len().max(1) as u32) as usize;
        Self {
            pos,
            vel,
            radius: rng.range(r0, r1),
            opacity: rng.range(o0, o1).clamp(0.0, 1.0),
            color,
        }
    }

    /// Advance one frame and reflect off the `[0, bounds]` box.
    ///
    /// The position is never clamped: a particle may overshoot an edge by at
    /// most one frame of travel. On the overshooting axis the velocity is
    /// pointed back inside, which also brings particles home after the
    /// viewport shrinks underneath them.
    pub fn step(&mut self, bounds: Vec2) {
        self.pos += self.vel;
        self.vel.x = reflect(self.pos.x, self.vel.x, bounds.x);
        self.vel.y = reflect(self.pos.y, self.vel.y, bounds.y);
    }
}

fn reflect(pos: f32, vel: f32, max: f32) -> f32 {
    if pos < 0.0 {
        vel.abs()
    } else if pos > max {
        -vel.abs()
    } else {
        vel
    }
}
