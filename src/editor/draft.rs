//! Draft store
//!
//! Exclusive owner of the editable [`ProfileDraft`]. Seeding replaces the
//! whole draft atomically; edits touch exactly one field. This component
//! never fails and performs no validation.

use crate::domain::profile::{DraftEdit, ProfileDraft, ProfileRecord, BIO_MAX_CHARS};

#[derive(Debug, Default)]
pub struct DraftStore {
    draft: ProfileDraft,
}

impl DraftStore {
    pub fn new() -> Self {
        Self {
            draft: ProfileDraft::empty(),
        }
    }

    pub fn draft(&self) -> &ProfileDraft {
        &self.draft
    }

    /// Replace the entire draft from a source snapshot.
    pub fn seed(&mut self, record: &ProfileRecord) {
        self.draft = ProfileDraft::from_record(record);
    }

    /// Discard the draft, back to the unseeded sentinel.
    pub fn reset(&mut self) {
        self.draft = ProfileDraft::empty();
    }

    /// Apply a single-field edit, leaving every other field untouched.
    ///
    /// The bio cap is enforced here, at input time, not by the validator.
    pub fn apply(&mut self, edit: DraftEdit) {
        match edit {
            DraftEdit::FirstName(v) => self.draft.first_name = v,
            DraftEdit::LastName(v) => self.draft.last_name = v,
            DraftEdit::Gender(v) => self.draft.gender_id = v,
            DraftEdit::DateOfBirth(v) => self.draft.date_of_birth = v,
            DraftEdit::MobileNumber(v) => self.draft.mobile_no = v,
            DraftEdit::Bio(v) => {
                self.draft.bio = if v.chars().count() > BIO_MAX_CHARS {
                    v.chars().take(BIO_MAX_CHARS).collect()
                } else {
                    v
                };
            }
        }
    }

    /// Image-field feedback path, used by the upload manager only.
    pub fn set_image_url(&mut self, url: impl Into<String>) {
        self.draft.profile_img_url = url.into();
    }
}
