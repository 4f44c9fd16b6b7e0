//! Draft validation
//!
//! Pure function over a draft. Only first name, last name and date of birth
//! are required; mobile and email formats are the input widgets' concern
//! and are not re-checked here, and the bio cap is enforced at input time
//! by the draft store.

use crate::domain::profile::ProfileDraft;

/// Outcome of validating a draft.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Validation {
    pub reasons: Vec<String>,
}

impl Validation {
    pub fn is_valid(&self) -> bool {
        self.reasons.is_empty()
    }
}

/// Check the required fields, collecting one reason per missing field.
pub fn validate(draft: &ProfileDraft) -> Validation {
    let mut reasons = Vec::new();

    if draft.first_name.is_empty() {
        reasons.push("First name is required.".to_string());
    }
    if draft.last_name.is_empty() {
        reasons.push("Last name is required.".to_string());
    }
    if draft.date_of_birth.is_none() {
        reasons.push("Date of birth is required.".to_string());
    }

    Validation { reasons }
}
