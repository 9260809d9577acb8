//! Modal visibility controller.
//!
//! A single phase enum replaces the source page's pile of redundant
//! display/opacity/class flags. The container is interactive from the
//! moment `open` is called; on `close` it stays visible until the exit
//! tween finishes, so the content never pops out of existence.

use crate::core::easing::Ease;
use crate::domain::config::ModalConfig;
use crate::systems::tween::Tween;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModalPhase {
    Hidden,
    Opening,
    Visible,
    Closing,
}

pub struct ModalController {
    phase: ModalPhase,
    scale: Tween,
    opacity: Tween,
    config: ModalConfig,
}

impl ModalController {
    pub fn new(config: ModalConfig) -> Self {
        Self {
            phase: ModalPhase::Hidden,
            scale: Tween::new(config.collapsed_scale, config.collapsed_scale, 0.0, 0.0, Ease::Linear),
            opacity: Tween::new(0.0, 0.0, 0.0, 0.0, Ease::Linear),
            config,
        }
    }

    pub fn phase(&self) -> ModalPhase {
        self.phase
    }

    /// Whether the container should be displayed and accept pointer
    /// events right now.
    pub fn is_interactive(&self) -> bool {
        self.phase != ModalPhase::Hidden
    }

    /// Content transform/opacity for the current frame.
    pub fn content_scale(&self, now_ms: f64) -> f32 {
        self.scale.value_at(now_ms)
    }

    pub fn content_opacity(&self, now_ms: f64) -> f32 {
        self.opacity.value_at(now_ms)
    }

    pub fn open(&mut self, now_ms: f64) {
        self.phase = ModalPhase::Opening;
        let ease = Ease::BackOut(self.config.open_overshoot);
        let dur = self.config.open_duration_ms;
        self.scale = Tween::new(self.config.collapsed_scale, 1.0, now_ms, dur, ease);
        self.opacity = Tween::new(0.0, 1.0, now_ms, dur, ease);
    }

    pub fn close(&mut self, now_ms: f64) {
        if self.phase == ModalPhase::Hidden {
            return;
        }
        self.phase = ModalPhase::Closing;
        let dur = self.config.close_duration_ms;
        self.scale = Tween::new(self.scale.value_at(now_ms), self.config.collapsed_scale, now_ms, dur, Ease::Power3Out);
        self.opacity = Tween::new(self.opacity.value_at(now_ms), 0.0, now_ms, dur, Ease::Power3Out);
    }

    /// Advance phase transitions that depend on tween completion.
    pub fn tick(&mut self, now_ms: f64) {
        match self.phase {
            ModalPhase::Opening => {
                if self.scale.is_done(now_ms) {
                    self.phase = ModalPhase::Visible;
                }
            }
            ModalPhase::Closing => {
                if self.scale.is_done(now_ms) {
                    self.phase = ModalPhase::Hidden;
                }
            }
            ModalPhase::Hidden | ModalPhase::Visible => {}
        }
    }
}
