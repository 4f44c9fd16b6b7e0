//! Service layer modules for external integrations.
//!
//! Contains the HTTP client for the consumed profile services (gender
//! options, single-file upload, profile update).

pub mod api_client;

pub use api_client::ApiClient;
