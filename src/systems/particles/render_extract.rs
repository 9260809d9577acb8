//! Extracts per-frame draw commands into flat f32 buffers.
//!
//! Layout mirrors how the engine hands pixel data to a renderer: the
//! buffers are refilled every frame and exposed as ptr/len pairs through
//! the facade so a JS embedder can view them as a `Float32Array` without
//! copies. The in-crate canvas renderer reads them directly.

use super::ParticleField;

/// Floats per circle command: x, y, radius
pub const CIRCLE_STRIDE: usize = 3;
/// Floats per line command: x1, y1, x2, y2, alpha
pub const LINE_STRIDE: usize = 5;

#[derive(Default)]
pub struct RenderBuffers {
    pub circles: Vec<f32>,
    pub lines: Vec<f32>,
}

impl RenderBuffers {
    pub fn with_capacity(particle_count: usize) -> Self {
        Self {
            circles: Vec::with_capacity(particle_count * CIRCLE_STRIDE),
            lines: Vec::new(),
        }
    }

    pub fn circle_count(&self) -> usize {
        self.circles.len() / CIRCLE_STRIDE
    }

    pub fn line_count(&self) -> usize {
        self.lines.len() / LINE_STRIDE
    }
}

impl ParticleField {
    /// Fill `out` with this frame's draw commands: one circle per
    /// particle, plus one line per unordered pair within the connection
    /// cutoff (alpha fading linearly with distance).
    pub fn render_extract(&self, out: &mut RenderBuffers) {
        out.circles.clear();
        out.lines.clear();

        let particles = self.particles();
        for p in particles {
            out.circles.extend_from_slice(&[p.pos.x, p.pos.y, p.radius]);
        }

        if !self.config().connections_enabled {
            return;
        }

        for i in 0..particles.len() {
            for j in (i + 1)..particles.len() {
                let a = particles[i].pos;
                let b = particles[j].pos;
                if let Some(alpha) = self.connection_alpha(a.distance(b)) {
                    out.lines.extend_from_slice(&[a.x, a.y, b.x, b.y, alpha]);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Rng32, Vec2};
    use crate::domain::config::ParticleConfig;
    use crate::systems::particles::Particle;

    fn two_particle_field(dist: f32, config: ParticleConfig) -> ParticleField {
        let mut rng = Rng32::new(1);
        let mut field = ParticleField::new(500.0, 500.0, config, &mut rng);
        // replace the seeded population with a known pair
        let particles = vec![
            Particle { pos: Vec2::new(100.0, 100.0), vel: Vec2::zero(), radius: 1.5 },
            Particle { pos: Vec2::new(100.0 + dist, 100.0), vel: Vec2::zero(), radius: 2.0 },
        ];
        field.set_particles_for_test(particles);
        field
    }

    impl ParticleField {
        fn set_particles_for_test(&mut self, particles: Vec<Particle>) {
            self.particles = particles;
        }
    }

    #[test]
    fn extract_emits_one_circle_per_particle() {
        let field = two_particle_field(300.0, ParticleConfig::default());
        let mut out = RenderBuffers::default();
        field.render_extract(&mut out);

        assert_eq!(out.circle_count(), 2);
        assert_eq!(&out.circles[..3], &[100.0, 100.0, 1.5]);
        // pair is farther than the cutoff: no edge
        assert_eq!(out.line_count(), 0);
    }

    #[test]
    fn close_pair_gets_an_edge_with_linear_alpha() {
        let field = two_particle_field(50.0, ParticleConfig::default());
        let mut out = RenderBuffers::default();
        field.render_extract(&mut out);

        assert_eq!(out.line_count(), 1);
        let alpha = out.lines[4];
        assert!((alpha - 0.5).abs() < 1e-6);
    }

    #[test]
    fn connections_flag_suppresses_edges() {
        let config = ParticleConfig { connections_enabled: false, ..ParticleConfig::default() };
        let field = two_particle_field(10.0, config);
        let mut out = RenderBuffers::default();
        field.render_extract(&mut out);

        assert_eq!(out.circle_count(), 2);
        assert_eq!(out.line_count(), 0);
    }

    #[test]
    fn buffers_are_cleared_between_frames() {
        let field = two_particle_field(50.0, ParticleConfig::default());
        let mut out = RenderBuffers::default();
        field.render_extract(&mut out);
        field.render_extract(&mut out);

        assert_eq!(out.circle_count(), 2);
        assert_eq!(out.line_count(), 1);
    }
}
