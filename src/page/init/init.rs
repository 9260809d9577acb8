use crate::core::easing::Ease;
use crate::core::Rng32;
use crate::domain::config::PageConfig;
use crate::systems::form::FormController;
use crate::systems::matrix::MatrixReveal;
use crate::systems::modal::ModalController;
use crate::systems::particles::{ParticleField, RenderBuffers};
use crate::systems::tween::Tween;

use super::PageCore;

pub(super) fn create_page_core(
    width: f32,
    height: f32,
    now_ms: f64,
    config: PageConfig,
) -> PageCore {
    let mut rng = Rng32::new(0x4E47_5244);
    let field = ParticleField::new(width, height, config.particles.clone(), &mut rng);
    let render = RenderBuffers::with_capacity(field.particle_count());

    let hero_start = now_ms + config.hero.delay_ms;
    let hero_opacity = Tween::new(0.0, 1.0, hero_start, config.hero.duration_ms, Ease::Power3Out);
    let hero_rise = Tween::new(config.hero.rise_px, 0.0, hero_start, config.hero.duration_ms, Ease::Power3Out);

    PageCore {
        rng,
        field,
        render,
        matrix: MatrixReveal::new(config.matrix.clone()),
        modal: ModalController::new(config.modal.clone()),
        form: FormController::new(config.form.clone()),
        hero_opacity,
        hero_rise,
        subtext: None,
        shake: None,
        field_starts_at: now_ms + config.particles.start_delay_ms,
        frame: 0,
        config,
    }
}
