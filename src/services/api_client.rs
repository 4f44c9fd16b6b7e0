//! HTTP client for the consumed profile services.
//!
//! Three black-box endpoints, all wrapped in the service's
//! `{ success, data, message }` envelope:
//! - `GET /gender/get`: enumerated gender options
//! - `POST /upload/single`: multipart single-file upload
//! - `PUT /user/update/{id}`: atomic profile update
//!
//! Timeout semantics live here (via the reqwest client); callers treat "no
//! response" the same as an error response.

use anyhow::{Context, Result};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response};
use serde::de::{DeserializeOwned, IgnoredAny};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, error, instrument};

use crate::config::Settings;
use crate::domain::image::ImageFile;
use crate::domain::profile::{CommitPayload, GenderOption};
use crate::error::ApiError;

/// Client for the profile services.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

/// Response envelope shared by all three endpoints.
#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
struct Envelope<T> {
    success: bool,
    #[serde(default)]
    data: Option<T>,
    #[serde(default)]
    message: Option<String>,
}

/// `data` object of a successful upload.
#[derive(Debug, Deserialize)]
struct UploadData {
    #[serde(rename = "fileUrl")]
    file_url: String,
}

impl ApiClient {
    /// Create a new profile service client.
    pub fn new(base_url: &str, timeout_seconds: u64) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .build()
            .context("Failed to create HTTP client")?;

        tracing::info!(base_url = base_url, "Profile service client initialized");

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn from_settings(settings: &Settings) -> Result<Self> {
        Self::new(&settings.api_base_url, settings.api_timeout_seconds)
    }

    /// Unwrap the service envelope, mapping error statuses and
    /// `success: false` bodies to typed errors.
    async fn decode<T: DeserializeOwned>(
        response: Response,
        endpoint: &'static str,
    ) -> Result<Option<T>, ApiError> {
        let status = response.status();

        if !status.is_success() {
            error!(endpoint, status = %status, "Profile service returned an error status");
            return Err(ApiError::Status(status));
        }

        let envelope: Envelope<T> = response.json().await.map_err(|e| {
            error!(endpoint, error = %e, "Failed to parse profile service response");
            ApiError::InvalidResponse(e.to_string())
        })?;

        if !envelope.success {
            return Err(ApiError::Rejected {
                message: envelope.message,
            });
        }

        Ok(envelope.data)
    }

    /// Fetch the enumerated gender options, in server order.
    pub async fn fetch_gender_options(&self) -> Result<Vec<GenderOption>, ApiError> {
        let url = format!("{}/gender/get", self.base_url);
        debug!(url = %url, "Fetching gender options");

        let response = self.client.get(&url).send().await.map_err(|e| {
            error!(error = %e, "Gender option request failed");
            ApiError::Transport(e)
        })?;

        let data = Self::decode::<Vec<GenderOption>>(response, "/gender/get").await?;
        Ok(data.unwrap_or_default())
    }

    /// Upload a profile image and return the remote file URL.
    #[instrument(skip(self, file), fields(file_name = %file.file_name))]
    pub async fn upload_profile_image(&self, file: &ImageFile) -> Result<String, ApiError> {
        let url = format!("{}/upload/single", self.base_url);

        let part = Part::bytes(file.bytes.clone())
            .file_name(file.file_name.clone())
            .mime_str(&file.content_type)
            .map_err(ApiError::Transport)?;
        let form = Form::new().part("file", part).text("upload_for", "profile");

        debug!(url = %url, size = file.bytes.len(), "Uploading profile image");

        let response = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, "Image upload request failed");
                ApiError::Transport(e)
            })?;

        let data = Self::decode::<UploadData>(response, "/upload/single").await?;
        data.map(|d| d.file_url).ok_or_else(|| {
            ApiError::InvalidResponse("upload response is missing data.fileUrl".to_string())
        })
    }

    /// Send the commit payload for the record identified by `id`.
    #[instrument(skip(self, payload))]
    pub async fn update_profile(&self, id: i64, payload: &CommitPayload) -> Result<(), ApiError> {
        let url = format!("{}/user/update/{}", self.base_url, id);
        debug!(url = %url, "Updating profile");

        let response = self
            .client
            .put(&url)
            .json(payload)
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, "Profile update request failed");
                ApiError::Transport(e)
            })?;

        // The update body carries only { success, message }.
        Self::decode::<IgnoredAny>(response, "/user/update").await?;
        Ok(())
    }
}
