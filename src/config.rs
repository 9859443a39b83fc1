//! Resolved runtime configuration.
//!
//! Flags and their `QUIZBOARD_*` environment fallbacks are parsed by clap in
//! `main`; this module turns them into one value the commands share.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::path::PathBuf;

use crate::CliError;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:3000";
pub const DEFAULT_DRAFT: &str = "assessment.json";

#[derive(Debug, Clone)]
pub struct Config {
    pub base_url: String,
    pub token: Option<String>,
    pub draft: PathBuf,
}

impl Config {
    #[must_use]
    pub fn new(base_url: impl Into<String>, token: Option<String>, draft: impl Into<PathBuf>) -> Self {
        let token = token.filter(|t| !t.trim().is_empty());
        Self { base_url: base_url.into(), token, draft: draft.into() }
    }

    /// Absolute URL for an API path.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path.trim_start_matches('/'))
    }

    /// The bearer credential, required by every network command.
    ///
    /// # Errors
    ///
    /// Returns [`CliError::MissingToken`] when none was configured.
    pub fn token(&self) -> Result<&str, CliError> {
        self.token.as_deref().ok_or(CliError::MissingToken)
    }
}
