//! Domain types for the profile editor
//!
//! The editable draft, its source snapshot, the outbound commit payload,
//! and the notification events surfaced to the embedding UI.

pub mod image;
pub mod notifications;
pub mod profile;

pub use image::*;
pub use profile::*;
