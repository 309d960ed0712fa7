// =============================================================================
// Snapshot Source
// =============================================================================
//
// Where the indicator document comes from: the remote API, or a local fixture
// file for offline use.

pub mod client;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::info;

pub use client::YieldsClient;

use crate::runtime_config::RuntimeConfig;

#[derive(Clone)]
pub enum SnapshotSource {
    Remote(YieldsClient),
    Fixture(PathBuf),
}

impl SnapshotSource {
    /// Pick the source described by `config`; a fixture path wins.
    pub fn from_config(config: &RuntimeConfig) -> Result<Self> {
        if let Some(path) = &config.fixture_path {
            info!(path = %path.display(), "reading indicators from fixture file");
            return Ok(Self::Fixture(path.clone()));
        }
        let client = YieldsClient::new(
            config.source_url.clone(),
            Duration::from_secs(config.request_timeout_secs),
        )?;
        info!(url = %client.url(), "reading indicators from remote API");
        Ok(Self::Remote(client))
    }

    /// Load one raw JSON document.
    pub async fn load(&self) -> Result<serde_json::Value> {
        match self {
            Self::Remote(client) => client.fetch().await,
            Self::Fixture(path) => {
                let content = tokio::fs::read_to_string(path)
                    .await
                    .with_context(|| format!("failed to read fixture {}", path.display()))?;
                serde_json::from_str(&content)
                    .with_context(|| format!("failed to parse fixture {}", path.display()))
            }
        }
    }
}
