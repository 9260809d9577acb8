//! Page orchestration.
//!
//! `PageCore` owns every subsystem of the launch page and advances them
//! from a single `tick(now_ms)`. It is pure Rust on virtual time: the
//! DOM layer (or a JS embedder through the `Page` facade) feeds it
//! events and a clock, and reads visual state back out after each tick.
//!
//! Submit is two-phase so the network call can live outside the core:
//! `begin_submit` validates and yields the wire payload, and
//! `finish_submit` reports how the transport fared.

use crate::core::Rng32;
use crate::domain::config::PageConfig;
use crate::domain::fields::FieldId;
use crate::systems::form::FormController;
use crate::systems::matrix::MatrixReveal;
use crate::systems::modal::ModalController;
use crate::systems::particles::{ParticleField, RenderBuffers};
use crate::systems::tween::Tween;

#[path = "init/init.rs"]
mod init;
#[path = "step/tick.rs"]
mod tick;
#[path = "commands/commands.rs"]
mod commands;
#[path = "submit/submit.rs"]
mod submit;
mod facade;
#[cfg(test)]
#[path = "tests/tests.rs"]
mod tests;

pub use facade::Page;

/// The launch page's whole client-side state.
pub struct PageCore {
    config: PageConfig,
    rng: Rng32,

    field: ParticleField,
    render: RenderBuffers,
    matrix: MatrixReveal,
    modal: ModalController,
    form: FormController,

    // Entrance/reaction tweens
    hero_opacity: Tween,
    hero_rise: Tween,
    subtext: Option<SubtextFade>,
    shake: Option<FieldShake>,

    /// The particle field holds still until this instant
    field_starts_at: f64,
    frame: u64,
}

struct SubtextFade {
    opacity: Tween,
    rise: Tween,
}

struct FieldShake {
    field: FieldId,
    offset: Tween,
}

impl PageCore {
    /// Build the page state for a viewport, with `now_ms` as the boot
    /// instant (entrance animations are scheduled relative to it).
    pub fn new(width: f32, height: f32, now_ms: f64) -> Self {
        init::create_page_core(width, height, now_ms, PageConfig::default())
    }

    pub fn new_with_config(width: f32, height: f32, now_ms: f64, config: PageConfig) -> Self {
        init::create_page_core(width, height, now_ms, config)
    }

    pub fn config(&self) -> &PageConfig {
        &self.config
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn particle_count(&self) -> usize {
        self.field.particle_count()
    }

    /// Draw commands extracted on the last tick.
    pub fn render_buffers(&self) -> &RenderBuffers {
        &self.render
    }

    pub fn matrix(&self) -> &MatrixReveal {
        &self.matrix
    }

    pub fn modal(&self) -> &ModalController {
        &self.modal
    }

    pub fn form(&self) -> &FormController {
        &self.form
    }

    /// Advance everything to `now_ms`.
    pub fn tick(&mut self, now_ms: f64) {
        tick::tick(self, now_ms);
    }
}
