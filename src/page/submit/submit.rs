use crate::core::easing::Ease;
use crate::domain::fields::FormFields;
use crate::systems::form::{FormError, SubmissionPayload, SubmitOutcome};
use crate::systems::tween::Tween;

use super::{FieldShake, PageCore};

impl PageCore {
    /// Validate and stage a submission. On success the returned payload
    /// is ready for the transport and the submit control switches to its
    /// in-progress state. On a validation error the offending field
    /// starts shaking and nothing goes on the wire.
    pub fn begin_submit(
        &mut self,
        fields: &FormFields,
        timestamp: &str,
        now_ms: f64,
    ) -> Result<SubmissionPayload, FormError> {
        match self.form.begin_submit(fields, timestamp) {
            Ok(payload) => Ok(payload),
            Err(err) => {
                if let Some(field) = err.offending_field() {
                    let cfg = &self.config.form;
                    let amp = cfg.shake_amplitude;
                    self.shake = Some(FieldShake {
                        field,
                        offset: Tween::new(-amp, amp, now_ms, cfg.shake_cycle_ms, Ease::Linear)
                            .with_repeat(cfg.shake_repeats, true),
                    });
                }
                Err(err)
            }
        }
    }

    /// Record the transport result. A successful (or ambiguous) send
    /// flips the modal to the success view and starts the matrix reveal.
    pub fn finish_submit(&mut self, outcome: SubmitOutcome, now_ms: f64) {
        self.form.finish_submit(outcome);
        if self.success_view_visible() {
            self.matrix.begin(&self.config.form.success_text, now_ms);
        }
    }
}
