//! Dialog lifecycle and orchestration
//!
//! [`EditProfileDialog`] is the caller-facing surface of the editor: it owns
//! open/closed state and wires the draft store, upload manager, option
//! loader and commit controller to the service client. The UI trigger
//! element and all rendering stay outside; callers drive the methods here
//! and drain the notification channel.
//!
//! Every asynchronous resolution (upload, submit) carries the epoch it was
//! issued under. A reset (close, cancel, or a source-record identity
//! change) bumps the epoch, so resolutions from before the reset are
//! detected and dropped instead of mutating the new dialog state.

use std::sync::Arc;

use parking_lot::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::domain::image::ImageFile;
use crate::domain::notifications::{Notification, Notifier};
use crate::domain::profile::{CommitPayload, DraftEdit, GenderOption, ProfileDraft, ProfileRecord};
use crate::editor::commit::{CommitController, SubmitDecision};
use crate::editor::draft::DraftStore;
use crate::editor::options::OptionLoader;
use crate::editor::upload::{ImageUploadManager, ImageUploadState, UploadResolution};
use crate::error::EditorError;
use crate::services::ApiClient;

/// How a call to [`EditProfileDialog::submit`] ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The update was accepted; the dialog closed and the refetch callback
    /// fired.
    Completed,
    /// Validation failed; no network call was made and the dialog stays
    /// open.
    Rejected(Vec<String>),
    /// A submission was already in flight; this call was a no-op.
    InFlight,
    /// The update was rejected or its transport failed. The draft is
    /// preserved so the user can retry without re-entering data.
    Failed(String),
    /// The dialog was reset while the request was in flight; the result was
    /// discarded.
    Stale,
}

struct DialogState {
    open: bool,
    epoch: u64,
    source: ProfileRecord,
    drafts: DraftStore,
    uploads: ImageUploadManager,
    options: OptionLoader,
    commit: CommitController,
}

impl DialogState {
    /// Close and invalidate everything issued under the current epoch.
    fn reset_closed(&mut self) {
        self.open = false;
        self.epoch += 1;
        self.uploads.reset();
        self.commit.reset();
        self.drafts.seed(&self.source);
    }
}

struct Shared {
    api: ApiClient,
    notifier: Notifier,
    on_refetch: Box<dyn Fn() + Send + Sync>,
    state: Mutex<DialogState>,
}

enum SubmitGate {
    Send {
        epoch: u64,
        record_id: i64,
        payload: CommitPayload,
    },
    InFlight,
    Rejected(Vec<String>),
}

/// The profile-edit dialog controller.
#[derive(Clone)]
pub struct EditProfileDialog {
    shared: Arc<Shared>,
}

impl EditProfileDialog {
    /// Mount the dialog over a source record.
    ///
    /// `on_refetch` is invoked after a successful commit so the caller can
    /// pull the server's new snapshot and hand it back via
    /// [`set_source`](Self::set_source).
    pub fn new(
        api: ApiClient,
        source: ProfileRecord,
        notifier: Notifier,
        on_refetch: impl Fn() + Send + Sync + 'static,
    ) -> Self {
        Self {
            shared: Arc::new(Shared {
                api,
                notifier,
                on_refetch: Box::new(on_refetch),
                state: Mutex::new(DialogState {
                    open: false,
                    epoch: 0,
                    source,
                    drafts: DraftStore::new(),
                    uploads: ImageUploadManager::new(),
                    options: OptionLoader::new(),
                    commit: CommitController::new(),
                }),
            }),
        }
    }

    pub fn is_open(&self) -> bool {
        self.shared.state.lock().open
    }

    pub fn is_submitting(&self) -> bool {
        self.shared.state.lock().commit.is_submitting()
    }

    /// Snapshot of the current draft.
    pub fn draft(&self) -> ProfileDraft {
        self.shared.state.lock().drafts.draft().clone()
    }

    /// Snapshot of the upload lifecycle state.
    pub fn upload_state(&self) -> ImageUploadState {
        self.shared.state.lock().uploads.state().clone()
    }

    /// The gender option list; empty until its one-shot fetch resolves.
    pub fn gender_options(&self) -> Vec<GenderOption> {
        self.shared.state.lock().options.options().to_vec()
    }

    /// Persisted gender title from the source snapshot, for labelling the
    /// gender control before the options load.
    pub fn source_gender_title(&self) -> Option<String> {
        let guard = self.shared.state.lock();
        guard.source.gender_title().map(str::to_string)
    }

    /// Open the dialog: seed the draft from the source record, reset the
    /// upload manager, and start the option fetch if this instance has not
    /// fetched yet. Returns the handle of the fetch task it started, if any.
    pub fn open(&self) -> Option<JoinHandle<()>> {
        let start_fetch = {
            let mut guard = self.shared.state.lock();
            let st = &mut *guard;
            if !st.open {
                st.open = true;
                st.drafts.seed(&st.source);
                st.uploads.reset();
                st.commit.reset();
                debug!(record_id = st.source.id, "Dialog opened; draft seeded");
            }
            st.options.begin()
        };

        start_fetch.then(|| {
            let shared = Arc::clone(&self.shared);
            tokio::spawn(async move {
                let result = shared.api.fetch_gender_options().await;
                shared.state.lock().options.resolve(result);
            })
        })
    }

    /// Close without committing. Draft and upload state are discarded, and
    /// any upload or submit still in flight resolves into the void.
    pub fn close(&self) {
        let mut guard = self.shared.state.lock();
        guard.reset_closed();
        debug!("Dialog closed");
    }

    /// Cancel is a close: nothing from the draft or the upload state is
    /// persisted to the source record.
    pub fn cancel(&self) {
        self.close();
    }

    /// Replace the source record. A different record identity resets the
    /// draft and upload state and invalidates in-flight resolutions; the
    /// same identity (e.g. a refreshed snapshot after commit) is stored
    /// as-is for the next open.
    pub fn set_source(&self, record: ProfileRecord) {
        let mut guard = self.shared.state.lock();
        let st = &mut *guard;
        let changed = record.id != st.source.id;
        st.source = record;
        if changed {
            st.epoch += 1;
            st.uploads.reset();
            st.commit.reset();
            if st.open {
                st.drafts.seed(&st.source);
            }
            debug!(record_id = st.source.id, "Source record changed; dialog state reset");
        }
    }

    /// Apply a single-field edit to the draft.
    pub fn edit(&self, edit: DraftEdit) {
        self.shared.state.lock().drafts.apply(edit);
    }

    /// Select a new profile image and immediately begin uploading it.
    ///
    /// A selection made while a previous upload is still in flight
    /// supersedes it: only the newest selection's result can settle into
    /// state, whichever order the responses arrive in.
    pub fn select_image(&self, file: ImageFile) -> JoinHandle<()> {
        let (epoch, generation) = {
            let mut guard = self.shared.state.lock();
            let generation = guard.uploads.select(&file);
            guard.uploads.mark_uploading();
            (guard.epoch, generation)
        };

        let shared = Arc::clone(&self.shared);
        tokio::spawn(async move {
            let result = shared.api.upload_profile_image(&file).await;

            let mut guard = shared.state.lock();
            if guard.epoch != epoch {
                debug!("Discarding upload resolution from a reset dialog");
                return;
            }
            let st = &mut *guard;
            let notification = match result {
                Ok(remote_url) => {
                    match st.uploads.resolve(generation, Ok(remote_url), &mut st.drafts) {
                        UploadResolution::Uploaded(_) => Some(Notification::info(
                            "Image Upload Successful",
                            "Your profile image has been uploaded.",
                        )),
                        _ => None,
                    }
                }
                Err(err) => {
                    let err = EditorError::Upload(err);
                    match st.uploads.resolve(generation, Err(err.reason()), &mut st.drafts) {
                        UploadResolution::Failed(_) => err.notification(),
                        _ => None,
                    }
                }
            };
            drop(guard);

            if let Some(notification) = notification {
                shared.notifier.notify(notification);
            }
        })
    }

    /// Remove the selected/uploaded image: upload state to `Empty`, draft
    /// URL to `""` (explicit delete intent, distinct from "unchanged").
    pub fn clear_image(&self) {
        let mut guard = self.shared.state.lock();
        let st = &mut *guard;
        st.uploads.clear(&mut st.drafts);
    }

    /// Validate the draft and, if it passes, commit it as one atomic update.
    ///
    /// Repeated calls while a submission is in flight are no-ops. On
    /// success the dialog closes and the refetch callback fires; on failure
    /// the dialog stays open with the draft preserved for retry.
    pub async fn submit(&self) -> SubmitOutcome {
        let gate = {
            let mut guard = self.shared.state.lock();
            let st = &mut *guard;
            match st.commit.begin(st.drafts.draft(), st.uploads.remote_url()) {
                SubmitDecision::Send(payload) => SubmitGate::Send {
                    epoch: st.epoch,
                    record_id: st.source.id,
                    payload,
                },
                SubmitDecision::InFlight => SubmitGate::InFlight,
                SubmitDecision::Rejected(reasons) => SubmitGate::Rejected(reasons),
            }
        };

        let (epoch, record_id, payload) = match gate {
            SubmitGate::Send {
                epoch,
                record_id,
                payload,
            } => (epoch, record_id, payload),
            SubmitGate::InFlight => {
                debug!("Submit ignored; a submission is already in flight");
                return SubmitOutcome::InFlight;
            }
            SubmitGate::Rejected(reasons) => {
                let err = EditorError::Validation {
                    reasons: reasons.clone(),
                };
                if let Some(notification) = err.notification() {
                    self.shared.notifier.notify(notification);
                }
                return SubmitOutcome::Rejected(reasons);
            }
        };

        let result = self.shared.api.update_profile(record_id, &payload).await;

        let mut guard = self.shared.state.lock();
        if guard.epoch != epoch {
            debug!("Discarding submit resolution from a reset dialog");
            return SubmitOutcome::Stale;
        }
        guard.commit.resolve();

        match result {
            Ok(()) => {
                guard.reset_closed();
                drop(guard);
                self.shared
                    .notifier
                    .info("Success", "Profile Info updated successfully.");
                (self.shared.on_refetch)();
                info!(record_id, "Profile update committed");
                SubmitOutcome::Completed
            }
            Err(err) => {
                drop(guard);
                let err = EditorError::Commit(err);
                let reason = err.reason();
                if let Some(notification) = err.notification() {
                    self.shared.notifier.notify(notification);
                }
                SubmitOutcome::Failed(reason)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn record(id: i64, first_name: &str) -> ProfileRecord {
        ProfileRecord {
            id,
            first_name: Some(first_name.to_string()),
            last_name: Some("B.".to_string()),
            gender_id: Some(2),
            user_gender: None,
            dob: NaiveDate::from_ymd_opt(1990, 1, 1),
            profile_img_url: Some("https://cdn.example.com/a.png".to_string()),
            mobile_no: Some("+212600000000".to_string()),
            email_address: Some("amal@example.com".to_string()),
            bio: None,
        }
    }

    fn dialog() -> EditProfileDialog {
        // Nothing here performs a request; the port is intentionally dead.
        let api = ApiClient::new("http://127.0.0.1:9", 1).expect("api client");
        let (notifier, _rx) = Notifier::channel();
        EditProfileDialog::new(api, record(7, "Amal"), notifier, || {})
    }

    #[tokio::test]
    async fn open_seeds_the_draft_from_the_source() {
        let dialog = dialog();
        assert!(!dialog.is_open());
        assert_eq!(dialog.draft(), ProfileDraft::empty());

        dialog.open();
        assert!(dialog.is_open());
        assert_eq!(dialog.draft().first_name, "Amal");
        assert_eq!(dialog.draft().email_address, "amal@example.com");
    }

    #[tokio::test]
    async fn cancel_discards_edits() {
        let dialog = dialog();
        dialog.open();
        dialog.edit(DraftEdit::FirstName("Edited".to_string()));

        dialog.cancel();
        assert!(!dialog.is_open());

        dialog.open();
        assert_eq!(dialog.draft().first_name, "Amal");
    }

    #[tokio::test]
    async fn source_identity_change_reseeds_an_open_dialog() {
        let dialog = dialog();
        dialog.open();
        dialog.edit(DraftEdit::FirstName("Edited".to_string()));

        dialog.set_source(record(8, "Nora"));
        assert_eq!(dialog.draft().first_name, "Nora");
        assert!(dialog.is_open());
    }

    #[tokio::test]
    async fn same_identity_snapshot_is_stored_without_a_reset() {
        let dialog = dialog();
        dialog.open();
        dialog.edit(DraftEdit::FirstName("Edited".to_string()));

        dialog.set_source(record(7, "Refreshed"));
        // Draft untouched now; the new snapshot is picked up on next open.
        assert_eq!(dialog.draft().first_name, "Edited");

        dialog.close();
        dialog.open();
        assert_eq!(dialog.draft().first_name, "Refreshed");
    }

    #[tokio::test]
    async fn source_gender_title_comes_from_the_snapshot() {
        let mut source = record(7, "Amal");
        source.user_gender = Some(crate::domain::profile::GenderRef {
            title: "Female".to_string(),
        });
        let api = ApiClient::new("http://127.0.0.1:9", 1).expect("api client");
        let (notifier, _rx) = Notifier::channel();
        let dialog = EditProfileDialog::new(api, source, notifier, || {});

        assert_eq!(dialog.source_gender_title().as_deref(), Some("Female"));
    }
}
