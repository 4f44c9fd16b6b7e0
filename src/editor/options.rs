//! Gender option loader
//!
//! A read-only cache fetched once per dialog instance. The list stays empty
//! until the fetch resolves; a failure leaves it empty for good (gender
//! simply becomes unset-able) and is never retried automatically.

use tracing::warn;

use crate::domain::profile::GenderOption;
use crate::error::{ApiError, EditorError};

#[derive(Debug, Default)]
enum OptionsState {
    #[default]
    Idle,
    InFlight,
    Ready(Vec<GenderOption>),
}

#[derive(Debug, Default)]
pub struct OptionLoader {
    state: OptionsState,
}

impl OptionLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true exactly once per loader instance: when the fetch should
    /// be started. Later calls (in flight, settled, or settled-empty after a
    /// failure) return false.
    pub fn begin(&mut self) -> bool {
        match self.state {
            OptionsState::Idle => {
                self.state = OptionsState::InFlight;
                true
            }
            _ => false,
        }
    }

    /// Settle the fetch. A failure degrades silently to an empty list.
    pub fn resolve(&mut self, result: Result<Vec<GenderOption>, ApiError>) {
        let options = match result {
            Ok(options) => options,
            Err(err) => {
                let err = EditorError::OptionFetch(err);
                warn!(error = ?err, "Gender option fetch failed; continuing with an empty list");
                Vec::new()
            }
        };
        self.state = OptionsState::Ready(options);
    }

    /// Empty until the fetch resolves successfully.
    pub fn options(&self) -> &[GenderOption] {
        match &self.state {
            OptionsState::Ready(options) => options,
            _ => &[],
        }
    }
}
