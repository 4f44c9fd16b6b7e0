//! The editable-draft / upload / commit core.
//!
//! Each submodule owns one piece of state: the draft itself, the image
//! upload lifecycle, the one-shot option cache, the submit state machine,
//! and the dialog that wires them to the service client.

pub mod commit;
pub mod dialog;
pub mod draft;
pub mod options;
pub mod upload;
pub mod validate;

pub use commit::{CommitController, SubmitDecision};
pub use dialog::{EditProfileDialog, SubmitOutcome};
pub use draft::DraftStore;
pub use options::OptionLoader;
pub use upload::{ImageUploadManager, ImageUploadState, UploadResolution};
pub use validate::{validate, Validation};
