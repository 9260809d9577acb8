//! Registration form domain model: field identities, wire names, and
//! the spreadsheet-formula sanitization applied before transmission.

use serde::Deserialize;

/// The named inputs of the registration form.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldId {
    Name,
    RollNumber,
    Year,
    Branch,
    Section,
    Email,
    Mobile,
    TransactionId,
    Expectations,
}

impl FieldId {
    /// The DOM `name` attribute of the input.
    pub fn dom_name(&self) -> &'static str {
        match self {
            FieldId::Name => "name",
            FieldId::RollNumber => "roll_number",
            FieldId::Year => "year",
            FieldId::Branch => "branch",
            FieldId::Section => "section",
            FieldId::Email => "email",
            FieldId::Mobile => "mobile",
            FieldId::TransactionId => "transaction_id",
            FieldId::Expectations => "expectations",
        }
    }

    /// The capitalized column name expected by the spreadsheet backend.
    pub fn wire_name(&self) -> &'static str {
        match self {
            FieldId::Name => "Name",
            FieldId::RollNumber => "RollNumber",
            FieldId::Year => "Year",
            FieldId::Branch => "Branch",
            FieldId::Section => "Section",
            FieldId::Email => "Email",
            FieldId::Mobile => "Mobile",
            FieldId::TransactionId => "TransactionID",
            FieldId::Expectations => "Expectations",
        }
    }
}

/// Raw values as read from the DOM, prior to validation/sanitization.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct FormFields {
    pub name: String,
    pub roll_number: String,
    pub year: String,
    pub branch: String,
    pub section: String,
    pub email: String,
    pub mobile: String,
    /// Optional; omitted from the payload when empty
    pub transaction_id: String,
    pub expectations: String,
}

impl FormFields {
    pub fn from_json(json: &str) -> Result<Self, String> {
        serde_json::from_str(json).map_err(|e| e.to_string())
    }

    pub fn value(&self, field: FieldId) -> &str {
        match field {
            FieldId::Name => &self.name,
            FieldId::RollNumber => &self.roll_number,
            FieldId::Year => &self.year,
            FieldId::Branch => &self.branch,
            FieldId::Section => &self.section,
            FieldId::Email => &self.email,
            FieldId::Mobile => &self.mobile,
            FieldId::TransactionId => &self.transaction_id,
            FieldId::Expectations => &self.expectations,
        }
    }
}

/// Neutralize values the spreadsheet backend would interpret as a
/// formula. Exactly one leading quote is added; everything else passes
/// through untouched.
pub fn sanitize(value: &str) -> String {
    match value.chars().next() {
        Some('=') | Some('+') | Some('-') | Some('@') => format!("'{value}"),
        _ => value.to_string(),
    }
}
