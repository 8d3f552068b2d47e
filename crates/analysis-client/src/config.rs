//! Client configuration.
//!
//! Values come from defaults, optionally a TOML file, then environment
//! overrides (`DOCIQ_API_URL`, `DOCIQ_TOKEN`, `DOCIQ_TIMEOUT_SECS`).

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const DEFAULT_BASE_URL: &str = "https://dociq-backend.onrender.com";
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub base_url: String,
    /// Bearer token attached to every request when set.
    pub token: Option<String>,
    pub timeout_secs: u64,
    /// Retry analyses against the demo endpoints when the token is rejected.
    pub demo_fallback: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            token: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            demo_fallback: true,
        }
    }
}

impl ClientConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid TOML.
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Parse configuration from a TOML string. Missing keys take their defaults.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> anyhow::Result<Self> {
        toml::from_str(s).context("Failed to parse TOML configuration")
    }

    /// Apply `DOCIQ_*` environment variables.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary lookup, keyed like the environment.
    pub fn with_overrides_from<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("DOCIQ_API_URL").filter(|v| !v.is_empty()) {
            self.base_url = url;
        }
        if let Some(token) = lookup("DOCIQ_TOKEN").filter(|v| !v.is_empty()) {
            self.token = Some(token);
        }
        if let Some(raw) = lookup("DOCIQ_TIMEOUT_SECS") {
            match raw.parse() {
                Ok(secs) => self.timeout_secs = secs,
                Err(_) => tracing::warn!(value = %raw, "ignoring invalid DOCIQ_TIMEOUT_SECS"),
            }
        }
        self
    }

    /// `base_url` joined with `path`, without doubling the slash.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }
}
