//! Registration form controller.
//!
//! Validation, payload construction, and the submit state machine
//! (`Idle -> Submitting -> {Success, Idle}`). The network call itself
//! lives in the DOM layer; the controller hands out a ready payload from
//! `begin_submit` and is told what happened through `finish_submit`, so
//! the whole flow is testable without a browser.

use thiserror::Error;

use crate::domain::config::FormConfig;
use crate::domain::fields::{sanitize, FieldId, FormFields};

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum FormError {
    #[error("ERROR: Mobile number must be exactly 10 digits.")]
    InvalidMobile,
    #[error("ERROR: Please enter a valid email address.")]
    InvalidEmail,
    #[error("a submission is already in progress")]
    Busy,
}

impl FormError {
    /// The input to shake when validation fails.
    pub fn offending_field(&self) -> Option<FieldId> {
        match self {
            FormError::InvalidMobile => Some(FieldId::Mobile),
            FormError::InvalidEmail => Some(FieldId::Email),
            FormError::Busy => None,
        }
    }
}

/// What came back from the best-effort POST.
///
/// The transport runs in opaque-response mode, so the endpoint can never
/// confirm receipt. A fetch that resolves is `Sent`; a fetch that threw
/// at the network layer is `NetworkAmbiguous` (the request may still
/// have reached the server); anything else is `Failed`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    Sent,
    NetworkAmbiguous,
    Failed(String),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormPhase {
    Idle,
    Submitting,
    Success,
}

/// Wire payload: ordered (column, value) pairs, already sanitized.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubmissionPayload {
    pairs: Vec<(String, String)>,
}

impl SubmissionPayload {
    pub fn pairs(&self) -> &[(String, String)] {
        &self.pairs
    }

    pub fn value_of(&self, column: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == column)
            .map(|(_, v)| v.as_str())
    }
}

pub struct FormController {
    phase: FormPhase,
    status: String,
    last_outcome: Option<SubmitOutcome>,
    config: FormConfig,
}

impl FormController {
    pub fn new(config: FormConfig) -> Self {
        Self {
            phase: FormPhase::Idle,
            status: String::new(),
            last_outcome: None,
            config,
        }
    }

    pub fn phase(&self) -> FormPhase {
        self.phase
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn last_outcome(&self) -> Option<&SubmitOutcome> {
        self.last_outcome.as_ref()
    }

    /// Label the submit control should show right now.
    pub fn submit_label(&self) -> &str {
        match self.phase {
            FormPhase::Submitting => &self.config.submitting_label,
            _ => &self.config.idle_label,
        }
    }

    pub fn submit_enabled(&self) -> bool {
        self.phase != FormPhase::Submitting
    }

    /// Validate and, on success, build the wire payload and move to
    /// `Submitting`. On a validation error the status message is set
    /// and no payload exists, so no network call can be made.
    ///
    /// `timestamp` is the client-clock ISO-8601 instant, supplied by the
    /// caller so the controller stays clock-free.
    pub fn begin_submit(
        &mut self,
        fields: &FormFields,
        timestamp: &str,
    ) -> Result<SubmissionPayload, FormError> {
        if self.phase != FormPhase::Idle {
            return Err(FormError::Busy);
        }

        self.status.clear();
        if let Err(err) = validate(fields) {
            self.status = err.to_string();
            return Err(err);
        }

        self.phase = FormPhase::Submitting;
        Ok(build_payload(fields, timestamp))
    }

    /// Record the transport result and transition the view state.
    /// `Sent` and `NetworkAmbiguous` both land on the success view (the
    /// opaque transport cannot do better); `Failed` restores `Idle` with
    /// the message shown verbatim in the status region.
    pub fn finish_submit(&mut self, outcome: SubmitOutcome) {
        match &outcome {
            SubmitOutcome::Sent | SubmitOutcome::NetworkAmbiguous => {
                self.phase = FormPhase::Success;
                self.status.clear();
            }
            SubmitOutcome::Failed(message) => {
                self.phase = FormPhase::Idle;
                self.status = format!("Error: {message}");
            }
        }
        self.last_outcome = Some(outcome);
    }

    /// Back to the form view (modal reopen after a success).
    pub fn reset(&mut self) {
        self.phase = FormPhase::Idle;
        self.status.clear();
    }
}

/// Field validation: mobile is exactly 10 ASCII digits; email is a
/// permissive `local@domain.tld` shape with no whitespace.
pub fn validate(fields: &FormFields) -> Result<(), FormError> {
    let mobile = fields.mobile.trim();
    if mobile.len() != 10 || !mobile.bytes().all(|b| b.is_ascii_digit()) {
        return Err(FormError::InvalidMobile);
    }

    if !email_is_valid(fields.email.trim()) {
        return Err(FormError::InvalidEmail);
    }
    Ok(())
}

// Equivalent to /^[^\s@]+@[^\s@]+\.[^\s@]+$/: no whitespace, exactly one
// '@', and a '.' in the domain with characters on both sides.
fn email_is_valid(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let mut parts = email.split('@');
    let (Some(local), Some(domain), None) = (parts.next(), parts.next(), parts.next()) else {
        return false;
    };
    if local.is_empty() || domain.is_empty() {
        return false;
    }
    match domain.find('.') {
        Some(dot) => dot > 0 && dot < domain.len() - 1,
        None => false,
    }
}

/// Sanitize every value and map it to its spreadsheet column. The
/// optional transaction id is skipped when empty; the client timestamp
/// rides along as its own column.
fn build_payload(fields: &FormFields, timestamp: &str) -> SubmissionPayload {
    const COLUMNS: [FieldId; 9] = [
        FieldId::Name,
        FieldId::RollNumber,
        FieldId::Year,
        FieldId::Branch,
        FieldId::Section,
        FieldId::Email,
        FieldId::Mobile,
        FieldId::TransactionId,
        FieldId::Expectations,
    ];

    let mut pairs = Vec::with_capacity(COLUMNS.len() + 1);
    for field in COLUMNS {
        let raw = fields.value(field);
        if field == FieldId::TransactionId && raw.is_empty() {
            continue;
        }
        pairs.push((field.wire_name().to_string(), sanitize(raw)));
    }
    pairs.push(("Timestamp".to_string(), timestamp.to_string()));

    SubmissionPayload { pairs }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_fields() -> FormFields {
        FormFields {
            name: "Ada Lovelace".to_string(),
            roll_number: "23CS042".to_string(),
            year: "2".to_string(),
            branch: "CSE".to_string(),
            section: "B".to_string(),
            email: "ada@example.edu".to_string(),
            mobile: "9876543210".to_string(),
            transaction_id: String::new(),
            expectations: "=HYPERLINK(\"x\")".to_string(),
        }
    }

    #[test]
    fn mobile_accepts_exactly_ten_digits() {
        let mut fields = valid_fields();
        for good in ["0000000000", "9876543210"] {
            fields.mobile = good.to_string();
            assert_eq!(validate(&fields), Ok(()));
        }
        for bad in ["12345", "98765432100", "98765o3210", "987654321 ", ""] {
            fields.mobile = bad.to_string();
            assert_eq!(validate(&fields), Err(FormError::InvalidMobile));
        }
    }

    #[test]
    fn email_requires_at_and_domain_dot() {
        let mut fields = valid_fields();
        for good in ["a@b.c", "ada@example.edu", "x.y@sub.domain.tld"] {
            fields.email = good.to_string();
            assert_eq!(validate(&fields), Ok(()));
        }
        for bad in [
            "plain",
            "no-dot@domain",
            "two@@b.c",
            "spaced name@b.c",
            "@b.c",
            "a@",
            "a@.c",
            "a@b.",
        ] {
            fields.email = bad.to_string();
            assert_eq!(validate(&fields), Err(FormError::InvalidEmail), "{bad}");
        }
    }

    #[test]
    fn validation_failure_sets_status_and_keeps_idle() {
        let mut form = FormController::new(FormConfig::default());
        let mut fields = valid_fields();
        fields.mobile = "12345".to_string();

        let err = form.begin_submit(&fields, "2026-08-30T10:00:00Z").unwrap_err();
        assert_eq!(err, FormError::InvalidMobile);
        assert_eq!(err.offending_field(), Some(FieldId::Mobile));
        assert_eq!(form.phase(), FormPhase::Idle);
        assert_eq!(form.status(), "ERROR: Mobile number must be exactly 10 digits.");
        assert!(form.submit_enabled());
    }

    #[test]
    fn payload_uses_wire_names_and_sanitizes() {
        let mut form = FormController::new(FormConfig::default());
        let payload = form
            .begin_submit(&valid_fields(), "2026-08-30T10:00:00Z")
            .unwrap();

        assert_eq!(payload.value_of("Name"), Some("Ada Lovelace"));
        assert_eq!(payload.value_of("RollNumber"), Some("23CS042"));
        assert_eq!(payload.value_of("Mobile"), Some("9876543210"));
        assert_eq!(payload.value_of("Expectations"), Some("'=HYPERLINK(\"x\")"));
        assert_eq!(payload.value_of("Timestamp"), Some("2026-08-30T10:00:00Z"));
        // optional and empty: not on the wire
        assert_eq!(payload.value_of("TransactionID"), None);
        assert_eq!(form.phase(), FormPhase::Submitting);
        assert_eq!(form.submit_label(), "COMPILING...");
        assert!(!form.submit_enabled());
    }

    #[test]
    fn transaction_id_rides_along_when_present() {
        let mut form = FormController::new(FormConfig::default());
        let mut fields = valid_fields();
        fields.transaction_id = "TXN-0042".to_string();

        let payload = form.begin_submit(&fields, "t").unwrap();
        assert_eq!(payload.value_of("TransactionID"), Some("TXN-0042"));
    }

    #[test]
    fn double_submit_is_rejected_while_in_flight() {
        let mut form = FormController::new(FormConfig::default());
        form.begin_submit(&valid_fields(), "t").unwrap();
        assert_eq!(form.begin_submit(&valid_fields(), "t"), Err(FormError::Busy));
    }

    #[test]
    fn sent_and_ambiguous_both_reach_success_but_stay_distinct() {
        let mut form = FormController::new(FormConfig::default());
        form.begin_submit(&valid_fields(), "t").unwrap();
        form.finish_submit(SubmitOutcome::Sent);
        assert_eq!(form.phase(), FormPhase::Success);
        assert_eq!(form.last_outcome(), Some(&SubmitOutcome::Sent));

        let mut form = FormController::new(FormConfig::default());
        form.begin_submit(&valid_fields(), "t").unwrap();
        form.finish_submit(SubmitOutcome::NetworkAmbiguous);
        assert_eq!(form.phase(), FormPhase::Success);
        assert_eq!(form.last_outcome(), Some(&SubmitOutcome::NetworkAmbiguous));
    }

    #[test]
    fn failure_restores_idle_and_reports_verbatim() {
        let mut form = FormController::new(FormConfig::default());
        form.begin_submit(&valid_fields(), "t").unwrap();
        form.finish_submit(SubmitOutcome::Failed("boom".to_string()));

        assert_eq!(form.phase(), FormPhase::Idle);
        assert_eq!(form.status(), "Error: boom");
        assert_eq!(form.submit_label(), "REGISTER NOW");
        assert!(form.submit_enabled());
    }

    #[test]
    fn reset_returns_to_the_form_view_after_success() {
        let mut form = FormController::new(FormConfig::default());
        form.begin_submit(&valid_fields(), "t").unwrap();
        form.finish_submit(SubmitOutcome::Sent);

        form.reset();
        assert_eq!(form.phase(), FormPhase::Idle);
        assert_eq!(form.status(), "");
    }
}
