use crate::domain::fields::FieldId;
use crate::systems::form::FormPhase;

use super::PageCore;

impl PageCore {
    /// Viewport changed: the particle population is rebuilt for the new
    /// size (count tier included), never repositioned in place.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.field.resize(width, height, &mut self.rng);
    }

    pub fn set_pointer(&mut self, x: f32, y: f32) {
        self.field.set_pointer(x, y);
    }

    pub fn clear_pointer(&mut self) {
        self.field.clear_pointer();
    }

    /// Open the registration modal. Reopening after a completed
    /// submission resets the view back to the form.
    pub fn open_modal(&mut self, now_ms: f64) {
        if self.form.phase() == FormPhase::Success {
            self.form.reset();
            self.matrix = crate::systems::matrix::MatrixReveal::new(self.config.matrix.clone());
            self.subtext = None;
        }
        self.modal.open(now_ms);
    }

    pub fn close_modal(&mut self, now_ms: f64) {
        self.modal.close(now_ms);
    }

    /// The form view shows while there is no completed submission.
    pub fn form_view_visible(&self) -> bool {
        self.form.phase() != FormPhase::Success
    }

    pub fn success_view_visible(&self) -> bool {
        self.form.phase() == FormPhase::Success
    }

    /// Horizontal shake offset for the field that failed validation,
    /// while the shake is running.
    pub fn shake_offset(&self, now_ms: f64) -> Option<(FieldId, f32)> {
        self.shake
            .as_ref()
            .filter(|s| !s.offset.is_done(now_ms))
            .map(|s| (s.field, s.offset.value_at(now_ms)))
    }
}
