//! Editable-draft / upload / commit controller for a user's profile record.
//!
//! This crate owns the state coordination behind a profile-edit dialog:
//! seeding a local draft from a remote snapshot, running the asynchronous
//! image-upload sub-process, validating the draft, and committing it as one
//! atomic update to the remote store. The visual layer (dialog chrome, phone
//! widget, toast renderer) stays outside; it drives [`EditProfileDialog`] and
//! listens on the notification channel.

pub mod config;
pub mod domain;
pub mod editor;
pub mod error;
pub mod logging;
pub mod services;

pub use domain::image::{ImageFile, LocalPreview};
pub use domain::notifications::{Notification, NotificationVariant, Notifier};
pub use domain::profile::{CommitPayload, DraftEdit, GenderOption, ProfileDraft, ProfileRecord};
pub use editor::dialog::{EditProfileDialog, SubmitOutcome};
pub use editor::upload::ImageUploadState;
pub use error::{ApiError, EditorError};
pub use services::ApiClient;
