//! Background particle field: drifting points joined by proximity lines.
//!
//! `ParticleField` owns its particles outright. Callers step it once per
//! frame and render it into any `Surface`; nothing outside the field can
//! move a particle.

mod particle;
mod rng;

pub use particle::Particle;
pub use rng::Rng;

use glam::Vec2;

use crate::api::config::FieldConfig;
use crate::api::types::Viewport;
use crate::renderer::traits::Surface;
use crate::systems::vector::VectorColor;

/// Fixed-size set of particles bouncing inside the viewport.
pub struct ParticleField {
    particles: Vec<Particle>,
    bounds: Vec2,
    palette: Vec<VectorColor>,
    link_distance: f32,
    link_opacity: f32,
    link_width: f32,
    link_color: VectorColor,
}

impl ParticleField {
    /// Scatter `config.particle_count` particles uniformly over the viewport.
    pub fn new(config: &FieldConfig, viewport: Viewport, rng: &mut Rng) -> Self {
        let bounds = viewport.size();
        let particles = (0..config.particle_count)
            .map(|_| Particle::random(bounds, config, rng))
            .collect();
        Self::from_particles(config, viewport, particles)
    }

    /// Build a field from explicit particles (deterministic layouts, tests).
    pub fn from_particles(config: &FieldConfig, viewport: Viewport, particles: Vec<Particle>) -> Self {
        Self {
            particles,
            bounds: viewport.size(),
            palette: config.palette.clone(),
            link_distance: config.link_distance,
            link_opacity: config.link_opacity,
            link_width: config.link_width,
            link_color: config.link_color,
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn bounds(&self) -> Vec2 {
        self.bounds
    }

    /// Advance every particle by one frame.
    pub fn step(&mut self) {
        let bounds = self.bounds;
        for p in &mut self.particles {
            p.step(bounds);
        }
    }

    /// Track a new viewport size. Positions are left alone; particles now
    /// outside drift back in through the reflection rule.
    pub fn resize(&mut self, viewport: Viewport) {
        self.bounds = viewport.size();
    }

    /// Opacity of the line joining two particles `distance` apart.
    ///
    /// Linear falloff: `link_opacity` at 0, exactly 0 at and past the threshold.
    pub fn link_alpha(&self, distance: f32) -> f32 {
        if self.link_distance <= 0.0 || distance >= self.link_distance {
            return 0.0;
        }
        self.link_opacity * (1.0 - distance.max(0.0) / self.link_distance)
    }

    /// Redraw the whole field: clear, particles, then proximity links.
    pub fn render<S: Surface>(&self, surface: &mut S) {
        surface.clear();

        for p in &self.particles {
            let base = self.palette.get(p.color).copied().unwrap_or_default();
            surface.fill_circle(p.pos, p.radius, base.with_alpha(p.opacity));
        }

        let max_sq = self.link_distance * self.link_distance;
        for (i, a) in self.particles.iter().enumerate() {
            for b in &self.particles[i + 1..] {
                let dist_sq = a.pos.distance_squared(b.pos);
                if dist_sq >= max_sq {
                    continue;
                }
                let alpha = self.link_alpha(dist_sq.sqrt());
                if alpha > 0.0 {
                    surface.stroke_line(a.pos, b.pos, self.link_width, self.link_color.with_alpha(alpha));
                }
            }
        }
    }
}
