//! Image upload manager
//!
//! Owns the lifecycle of selecting, uploading, previewing and clearing the
//! profile image, independent of the rest of the draft. Exactly one
//! [`ImageUploadState`] holds at a time, and the manager is the only writer
//! of the draft's image URL.
//!
//! Last-writer-wins: every `select` (and every `clear`/`reset`) bumps a
//! generation counter, and a resolution is applied only if it still carries
//! the current generation. A superseded upload's response is discarded no
//! matter when or in what order it arrives.

use tracing::debug;

use crate::domain::image::{ImageFile, LocalPreview};
use crate::editor::draft::DraftStore;

/// Upload lifecycle state. The preview is owned here and dropped whenever
/// the state moves to a variant that does not carry it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ImageUploadState {
    #[default]
    Empty,
    Selected(LocalPreview),
    Uploading(LocalPreview),
    Uploaded {
        remote_url: String,
        preview: LocalPreview,
    },
    Failed {
        reason: String,
    },
}

/// What a call to [`ImageUploadManager::resolve`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadResolution {
    /// The upload settled; the draft now holds `remote_url`.
    Uploaded(String),
    /// The upload failed; the draft's prior image URL is untouched.
    Failed(String),
    /// A newer selection (or a reset) superseded this upload. Discarded.
    Stale,
}

#[derive(Debug, Default)]
pub struct ImageUploadManager {
    state: ImageUploadState,
    generation: u64,
}

impl ImageUploadManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &ImageUploadState {
        &self.state
    }

    /// Remote URL of a settled upload, the only output the draft store ever
    /// consumes from this component.
    pub fn remote_url(&self) -> Option<&str> {
        match &self.state {
            ImageUploadState::Uploaded { remote_url, .. } => Some(remote_url),
            _ => None,
        }
    }

    /// Take a new selection and return the generation token its upload must
    /// present to [`resolve`](Self::resolve). Any earlier in-flight upload
    /// is superseded from this point on.
    pub fn select(&mut self, file: &ImageFile) -> u64 {
        self.generation += 1;
        self.state = ImageUploadState::Selected(LocalPreview::render(file));
        self.generation
    }

    /// The upload request for the current selection has been issued.
    pub fn mark_uploading(&mut self) {
        match std::mem::take(&mut self.state) {
            ImageUploadState::Selected(preview) => {
                self.state = ImageUploadState::Uploading(preview);
            }
            other => self.state = other,
        }
    }

    /// Apply an upload result, unless a newer selection or a reset has made
    /// it stale. On success the draft's image URL is updated; on failure the
    /// draft keeps whatever URL it had.
    pub fn resolve(
        &mut self,
        generation: u64,
        outcome: Result<String, String>,
        drafts: &mut DraftStore,
    ) -> UploadResolution {
        if generation != self.generation {
            debug!(
                generation,
                current = self.generation,
                "Discarding stale upload resolution"
            );
            return UploadResolution::Stale;
        }

        match outcome {
            Ok(remote_url) => {
                let preview = match std::mem::take(&mut self.state) {
                    ImageUploadState::Selected(p)
                    | ImageUploadState::Uploading(p)
                    | ImageUploadState::Uploaded { preview: p, .. } => p,
                    _ => LocalPreview::default(),
                };
                self.state = ImageUploadState::Uploaded {
                    remote_url: remote_url.clone(),
                    preview,
                };
                drafts.set_image_url(remote_url.clone());
                UploadResolution::Uploaded(remote_url)
            }
            Err(reason) => {
                self.state = ImageUploadState::Failed {
                    reason: reason.clone(),
                };
                UploadResolution::Failed(reason)
            }
        }
    }

    /// Force `Empty` from any state and record explicit delete intent on the
    /// draft (empty URL, distinct from "unchanged"). Also supersedes any
    /// upload still in flight.
    pub fn clear(&mut self, drafts: &mut DraftStore) {
        self.generation += 1;
        self.state = ImageUploadState::Empty;
        drafts.set_image_url("");
    }

    /// Dialog-reset path: back to `Empty` without touching the draft, which
    /// is reseeded separately.
    pub fn reset(&mut self) {
        self.generation += 1;
        self.state = ImageUploadState::Empty;
    }
}
