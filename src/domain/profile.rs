//! Profile domain types
//!
//! The remote snapshot a draft is seeded from, the editable draft itself,
//! and the payload sent to the update endpoint. Wire names follow the
//! profile service contract (`first_name`, `gender`, `dob`, ...).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Number of characters the bio field accepts. Enforced at input time by
/// the draft store; the validator does not re-check it.
pub const BIO_MAX_CHARS: usize = 300;

/// Gender as referenced from a profile snapshot (display title only).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GenderRef {
    pub title: String,
}

/// One entry of the server's gender option list, in server order.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GenderOption {
    pub id: i64,
    pub title: String,
}

/// The last-known-persisted profile snapshot, as supplied by the caller.
///
/// Every field except `id` may be absent in the snapshot; seeding defaults
/// them to their zero values.
#[derive(Debug, Clone, Deserialize)]
pub struct ProfileRecord {
    pub id: i64,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default, rename = "gender")]
    pub gender_id: Option<i64>,
    #[serde(default)]
    pub user_gender: Option<GenderRef>,
    #[serde(default)]
    pub dob: Option<NaiveDate>,
    #[serde(default)]
    pub profile_img_url: Option<String>,
    #[serde(default)]
    pub mobile_no: Option<String>,
    #[serde(default)]
    pub email_address: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
}

impl ProfileRecord {
    /// Title of the persisted gender, for labelling the gender control
    /// before the option list has loaded.
    pub fn gender_title(&self) -> Option<&str> {
        self.user_gender.as_ref().map(|g| g.title.as_str())
    }
}

/// The editable working copy of a profile.
///
/// Always fully defined once seeded: strings default to `""`, the gender id
/// to `0` (the wire contract's unset sentinel) and the date of birth to
/// `None`. The unseeded state is [`ProfileDraft::empty`], never a partial
/// value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileDraft {
    pub first_name: String,
    pub last_name: String,
    pub gender_id: i64,
    pub date_of_birth: Option<NaiveDate>,
    pub profile_img_url: String,
    pub mobile_no: String,
    /// Display-only; never part of the commit payload.
    pub email_address: String,
    pub bio: String,
}

impl ProfileDraft {
    /// The explicit "not seeded yet" sentinel.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a draft from a source snapshot, defaulting missing fields.
    pub fn from_record(record: &ProfileRecord) -> Self {
        Self {
            first_name: record.first_name.clone().unwrap_or_default(),
            last_name: record.last_name.clone().unwrap_or_default(),
            gender_id: record.gender_id.unwrap_or_default(),
            date_of_birth: record.dob,
            profile_img_url: record.profile_img_url.clone().unwrap_or_default(),
            mobile_no: record.mobile_no.clone().unwrap_or_default(),
            email_address: record.email_address.clone().unwrap_or_default(),
            bio: record.bio.clone().unwrap_or_default(),
        }
    }
}

/// A single-field edit of the draft.
///
/// There is deliberately no variant for the email address (read-only) and
/// none for the image URL: the image field is owned by the upload manager.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DraftEdit {
    FirstName(String),
    LastName(String),
    Gender(i64),
    DateOfBirth(Option<NaiveDate>),
    MobileNumber(String),
    Bio(String),
}

/// The JSON body of `PUT /user/update/{id}`.
///
/// Derived from the draft at submit time, never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommitPayload {
    pub first_name: String,
    pub last_name: String,
    #[serde(rename = "gender")]
    pub gender_id: i64,
    pub dob: NaiveDate,
    pub profile_img_url: String,
    pub mobile_no: String,
    pub bio: String,
}

impl CommitPayload {
    /// Derive the outbound payload from a draft.
    ///
    /// `uploaded_url` is the upload manager's settled remote URL, if any; it
    /// wins over the draft's stored URL, which itself preserves the prior
    /// image when no new selection was made. An empty draft URL means
    /// explicit removal. Returns `None` when the draft has no date of birth,
    /// which validation rules out before any payload is built.
    pub fn build(draft: &ProfileDraft, uploaded_url: Option<&str>) -> Option<Self> {
        let dob = draft.date_of_birth?;
        Some(Self {
            first_name: draft.first_name.clone(),
            last_name: draft.last_name.clone(),
            gender_id: draft.gender_id,
            dob,
            profile_img_url: uploaded_url
                .map(str::to_string)
                .unwrap_or_else(|| draft.profile_img_url.clone()),
            mobile_no: draft.mobile_no.clone(),
            bio: draft.bio.clone(),
        })
    }
}
