//! Background particle field.
//!
//! Point masses drift inside the viewport, reflect off its edges, and
//! are pushed away from the pointer. Rendering is split out: `step`
//! advances the simulation, `render_extract` fills flat command buffers
//! the DOM renderer (or a JS embedder) consumes.

mod render_extract;

pub use render_extract::{RenderBuffers, CIRCLE_STRIDE, LINE_STRIDE};

use crate::core::{Rng32, Vec2};
use crate::domain::config::ParticleConfig;

/// A single point mass.
#[derive(Clone, Copy, Debug)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
}

pub struct ParticleField {
    particles: Vec<Particle>,
    width: f32,
    height: f32,
    pointer: Option<Vec2>,
    config: ParticleConfig,
}

impl ParticleField {
    /// Create a field for the given viewport, already populated.
    pub fn new(width: f32, height: f32, config: ParticleConfig, rng: &mut Rng32) -> Self {
        let mut field = Self {
            particles: Vec::new(),
            width,
            height,
            pointer: None,
            config,
        };
        field.reseed(rng);
        field
    }

    pub fn particle_count(&self) -> usize {
        self.particles.len()
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn config(&self) -> &ParticleConfig {
        &self.config
    }

    pub fn set_pointer(&mut self, x: f32, y: f32) {
        self.pointer = Some(Vec2::new(x, y));
    }

    pub fn clear_pointer(&mut self) {
        self.pointer = None;
    }

    /// Discard all particles and repopulate for the current viewport.
    fn reseed(&mut self, rng: &mut Rng32) {
        let count = self.config.count_for_width(self.width) as usize;
        self.particles.clear();
        self.particles.reserve(count);
        for _ in 0..count {
            let speed = self.config.max_speed;
            self.particles.push(Particle {
                pos: Vec2::new(
                    rng.range_f32(0.0, self.width),
                    rng.range_f32(0.0, self.height),
                ),
                vel: Vec2::new(
                    rng.range_f32(-speed, speed),
                    rng.range_f32(-speed, speed),
                ),
                radius: rng.range_f32(self.config.min_radius, self.config.max_radius),
            });
        }
    }

    /// Viewport changed: the whole population is rebuilt, not moved,
    /// so the count tier and placement always match the new size.
    pub fn resize(&mut self, width: f32, height: f32, rng: &mut Rng32) {
        self.width = width;
        self.height = height;
        self.reseed(rng);
    }

    /// Advance every particle one step: pointer repulsion, then drift,
    /// then elastic reflection at the viewport edges.
    pub fn step(&mut self) {
        let repulse = if self.config.repulsion_enabled {
            self.pointer
        } else {
            None
        };

        for p in &mut self.particles {
            if let Some(pointer) = repulse {
                let away = p.pos - pointer;
                let dist = away.length();
                let radius = self.config.repulse_radius;
                if dist < radius && dist > 0.0001 {
                    let strength = (radius - dist) / radius * self.config.repulse_force;
                    p.pos += away.normalize() * strength;
                }
            }

            p.pos += p.vel;

            if p.pos.x <= 0.0 || p.pos.x >= self.width {
                p.vel.x = -p.vel.x;
                p.pos.x = p.pos.x.clamp(0.0, self.width);
            }
            if p.pos.y <= 0.0 || p.pos.y >= self.height {
                p.vel.y = -p.vel.y;
                p.pos.y = p.pos.y.clamp(0.0, self.height);
            }
        }
    }

    /// Connection edge opacity: 1 at distance 0, linearly down to 0 at
    /// the cutoff, `None` past it.
    pub fn connection_alpha(&self, dist: f32) -> Option<f32> {
        let cutoff = self.config.connect_distance;
        if dist < cutoff {
            Some(1.0 - dist / cutoff)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_field(width: f32, height: f32) -> (ParticleField, Rng32) {
        let mut rng = Rng32::new(12345);
        let field = ParticleField::new(width, height, ParticleConfig::default(), &mut rng);
        (field, rng)
    }

    #[test]
    fn new_field_populates_in_bounds() {
        let (field, _) = test_field(1280.0, 720.0);
        assert_eq!(field.particle_count(), 80);
        for p in field.particles() {
            assert!((0.0..1280.0).contains(&p.pos.x));
            assert!((0.0..720.0).contains(&p.pos.y));
            assert!((0.5..2.5).contains(&p.radius));
            assert!(p.vel.x.abs() <= 0.25);
            assert!(p.vel.y.abs() <= 0.25);
        }
    }

    #[test]
    fn narrow_viewport_halves_the_count() {
        let (field, _) = test_field(375.0, 667.0);
        assert_eq!(field.particle_count(), 40);
    }

    #[test]
    fn resize_discards_and_reseeds() {
        let (mut field, mut rng) = test_field(1280.0, 720.0);
        let before: Vec<_> = field.particles().iter().map(|p| p.pos).collect();

        field.resize(375.0, 667.0, &mut rng);

        assert_eq!(field.particle_count(), 40);
        for p in field.particles() {
            assert!((0.0..375.0).contains(&p.pos.x));
            assert!((0.0..667.0).contains(&p.pos.y));
        }
        // wholesale reeseed, not a reposition of survivors
        let after: Vec<_> = field.particles().iter().map(|p| p.pos).collect();
        assert_ne!(&before[..40], &after[..]);
    }

    #[test]
    fn right_boundary_reflects_and_clamps() {
        let (mut field, _) = test_field(100.0, 100.0);
        field.particles.clear();
        field.particles.push(Particle {
            pos: Vec2::new(99.9, 50.0),
            vel: Vec2::new(0.25, 0.0),
            radius: 1.0,
        });

        field.step();

        let p = field.particles()[0];
        assert_eq!(p.vel.x, -0.25);
        assert!((0.0..=100.0).contains(&p.pos.x));
    }

    #[test]
    fn left_and_top_boundaries_reflect() {
        let (mut field, _) = test_field(100.0, 100.0);
        field.particles.clear();
        field.particles.push(Particle {
            pos: Vec2::new(0.1, 0.1),
            vel: Vec2::new(-0.2, -0.2),
            radius: 1.0,
        });

        field.step();

        let p = field.particles()[0];
        assert_eq!(p.vel.x, 0.2);
        assert_eq!(p.vel.y, 0.2);
        assert!(p.pos.x >= 0.0 && p.pos.y >= 0.0);
    }

    #[test]
    fn pointer_pushes_particles_away() {
        let (mut field, _) = test_field(200.0, 200.0);
        field.particles.clear();
        field.particles.push(Particle {
            pos: Vec2::new(110.0, 100.0),
            vel: Vec2::zero(),
            radius: 1.0,
        });
        field.set_pointer(100.0, 100.0);

        field.step();

        // pointer sits left of the particle, so it moves right
        assert!(field.particles()[0].pos.x > 110.0);
        assert_eq!(field.particles()[0].pos.y, 100.0);
    }

    #[test]
    fn pointer_outside_repulse_radius_is_ignored() {
        let (mut field, _) = test_field(400.0, 400.0);
        field.particles.clear();
        field.particles.push(Particle {
            pos: Vec2::new(300.0, 200.0),
            vel: Vec2::zero(),
            radius: 1.0,
        });
        field.set_pointer(100.0, 200.0);

        field.step();

        assert_eq!(field.particles()[0].pos, Vec2::new(300.0, 200.0));
    }

    #[test]
    fn connection_alpha_is_linear_to_cutoff() {
        let (field, _) = test_field(800.0, 600.0);
        assert_eq!(field.connection_alpha(0.0), Some(1.0));
        assert_eq!(field.connection_alpha(50.0), Some(0.5));
        let near = field.connection_alpha(99.9).unwrap();
        assert!(near > 0.0 && near < 0.002);
        assert_eq!(field.connection_alpha(100.0), None);
        assert_eq!(field.connection_alpha(250.0), None);
    }
}
