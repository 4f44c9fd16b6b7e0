//! Error taxonomy for the profile editor
//!
//! Two layers: [`ApiError`] covers the HTTP boundary to the consumed
//! services, [`EditorError`] classifies failures by the component that owns
//! them. Every kind is terminal at its owner and is turned into a
//! user-facing notification (or silently degraded, for option fetches);
//! nothing propagates past the dialog as an uncaught failure.

use reqwest::StatusCode;
use thiserror::Error;

use crate::domain::notifications::Notification;

/// Errors from the consumed HTTP services.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request could not be built or sent (network, timeout, TLS).
    #[error("service unavailable: {0}")]
    Transport(#[source] reqwest::Error),

    /// The service answered with an unexpected HTTP status.
    #[error("service responded with status {0}")]
    Status(StatusCode),

    /// The service answered 200 but flagged the operation as failed.
    #[error("{}", message.as_deref().unwrap_or("request rejected"))]
    Rejected { message: Option<String> },

    /// The service answered with a body this client could not decode.
    #[error("invalid service response: {0}")]
    InvalidResponse(String),
}

/// Editor-level failures, one variant per owning component.
#[derive(Debug, Error)]
pub enum EditorError {
    /// Required draft fields are missing. Never reaches the network.
    #[error("validation failed: {}", reasons.join(" "))]
    Validation { reasons: Vec<String> },

    /// The image upload was rejected or its transport failed. Scoped to the
    /// upload manager; the rest of the form stays editable.
    #[error("image upload failed")]
    Upload(#[source] ApiError),

    /// The profile update was rejected or its transport failed. The draft is
    /// preserved so the user can retry.
    #[error("profile update failed")]
    Commit(#[source] ApiError),

    /// The gender option list could not be fetched. Degrades silently.
    #[error("gender options unavailable")]
    OptionFetch(#[source] ApiError),
}

impl EditorError {
    /// Map the error to the notification shown to the user, if any.
    ///
    /// Option-fetch failures return `None`: the form stays usable with an
    /// empty gender list. Transport details are logged where they occur and
    /// never shown verbatim.
    pub fn notification(&self) -> Option<Notification> {
        match self {
            Self::Validation { reasons } => Some(Notification::error(
                "Validation Error",
                reasons.join(" "),
            )),
            Self::Upload(api) => Some(match api {
                ApiError::Rejected { message } => Notification::error(
                    "Image Upload Failed",
                    message
                        .as_deref()
                        .unwrap_or("Something went wrong while uploading the image."),
                ),
                _ => Notification::error(
                    "Error",
                    "An error occurred while uploading the image.",
                ),
            }),
            Self::Commit(api) => Some(match api {
                ApiError::Rejected { message } => Notification::error(
                    "Failed",
                    message.as_deref().unwrap_or("Something went wrong."),
                ),
                _ => Notification::error("Error", "Failed to update Profile Info."),
            }),
            Self::OptionFetch(_) => None,
        }
    }

    /// Short reason recorded in component state (e.g. the upload manager's
    /// `Failed` state), matching what the notification shows.
    pub fn reason(&self) -> String {
        match self {
            Self::Validation { reasons } => reasons.join(" "),
            Self::Upload(api) => match api {
                ApiError::Rejected { message } => message
                    .as_deref()
                    .unwrap_or("Something went wrong while uploading the image.")
                    .to_string(),
                _ => "An error occurred while uploading the image.".to_string(),
            },
            Self::Commit(api) => match api {
                ApiError::Rejected { message } => message
                    .as_deref()
                    .unwrap_or("Something went wrong.")
                    .to_string(),
                _ => "Failed to update Profile Info.".to_string(),
            },
            Self::OptionFetch(api) => api.to_string(),
        }
    }
}
