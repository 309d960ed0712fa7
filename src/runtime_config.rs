// =============================================================================
// Runtime Configuration — JSON settings file with per-field defaults
// =============================================================================
//
// All fields carry `#[serde(default)]` so that adding new fields never breaks
// loading an older config file, and an empty `{}` yields the defaults.
//
// =============================================================================

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::signals::RulePolicy;

// =============================================================================
// Default-value helpers (required by serde `default = "..."` attribute)
// =============================================================================

fn default_source_url() -> String {
    "https://bondsignal.onrender.com/api/yields".to_string()
}

fn default_request_timeout_secs() -> u64 {
    10
}

// =============================================================================
// RuntimeConfig
// =============================================================================

/// Top-level configuration for the bond signal service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuntimeConfig {
    /// Endpoint returning the indicator JSON document.
    #[serde(default = "default_source_url")]
    pub source_url: String,

    /// HTTP timeout for one fetch, in seconds.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Read the document from this file instead of `source_url`.
    #[serde(default)]
    pub fixture_path: Option<PathBuf>,

    /// Sign conventions and levels used by the rule table.
    #[serde(default)]
    pub rules: RulePolicy,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            source_url: default_source_url(),
            request_timeout_secs: default_request_timeout_secs(),
            fixture_path: None,
            rules: RulePolicy::default(),
        }
    }
}

impl RuntimeConfig {
    /// Load configuration from a JSON file at `path`.
    ///
    /// If the file does not exist, returns an error so the caller can fall
    /// back to defaults with a warning.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read runtime config from {}", path.display()))?;

        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse runtime config from {}", path.display()))?;

        info!(
            path = %path.display(),
            source_url = %config.source_url,
            spread_polarity = %config.rules.spread_polarity,
            "runtime config loaded"
        );

        Ok(config)
    }

    /// Apply `BONDSIGNAL_SOURCE_URL` / `BONDSIGNAL_FIXTURE` style overrides.
    pub fn apply_overrides(&mut self, source_url: Option<String>, fixture: Option<String>) {
        if let Some(url) = source_url.map(|s| s.trim().to_string()).filter(|s| !s.is_empty()) {
            self.source_url = url;
        }
        if let Some(path) = fixture.map(|s| s.trim().to_string()).filter(|s| !s.is_empty()) {
            self.fixture_path = Some(PathBuf::from(path));
        }
    }
}
