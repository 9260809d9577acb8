use crate::core::easing::Ease;
use crate::systems::tween::Tween;

use super::{PageCore, SubtextFade};

pub(super) fn tick(page: &mut PageCore, now_ms: f64) {
    page.modal.tick(now_ms);

    // The field idles through the entrance beat, then steps every frame.
    if now_ms >= page.field_starts_at {
        page.field.step();
        page.field.render_extract(&mut page.render);
    }

    let reveal_completed = page.matrix.tick(now_ms, &mut page.rng);
    if reveal_completed {
        // Last cell settled: fade the subtext in beneath the headline.
        let fade = page.config.matrix.subtext_fade_ms;
        page.subtext = Some(SubtextFade {
            opacity: Tween::new(0.0, 1.0, now_ms, fade, Ease::Power3Out),
            rise: Tween::new(0.0, -10.0, now_ms, fade, Ease::Power3Out),
        });
    }

    if let Some(shake) = &page.shake {
        if shake.offset.is_done(now_ms) {
            page.shake = None;
        }
    }

    page.frame += 1;
}

impl PageCore {
    pub fn hero_opacity(&self, now_ms: f64) -> f32 {
        self.hero_opacity.value_at(now_ms)
    }

    pub fn hero_offset_y(&self, now_ms: f64) -> f32 {
        self.hero_rise.value_at(now_ms)
    }

    /// Subtext style once the reveal has completed; `None` before that.
    pub fn subtext_style(&self, now_ms: f64) -> Option<(f32, f32)> {
        self.subtext
            .as_ref()
            .map(|s| (s.opacity.value_at(now_ms), s.rise.value_at(now_ms)))
    }
}
