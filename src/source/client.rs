// =============================================================================
// Yields API Client — fetches the indicator document over HTTP
// =============================================================================
//
// One GET per fetch cycle.  No retry or backoff: a failed fetch surfaces as a
// single "data unavailable" state upstream.
// =============================================================================

use std::time::Duration;

use anyhow::{Context, Result};
use tracing::{debug, instrument};

/// HTTP client for the remote indicator endpoint.
#[derive(Clone)]
pub struct YieldsClient {
    url: String,
    client: reqwest::Client,
}

impl YieldsClient {
    /// Create a client for `url` with the given request timeout.
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("failed to build reqwest client")?;

        let url = url.into();
        debug!(url = %url, "YieldsClient initialised");
        Ok(Self { url, client })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// GET the document and decode it as JSON.
    #[instrument(skip(self), fields(url = %self.url), name = "yields::fetch")]
    pub async fn fetch(&self) -> Result<serde_json::Value> {
        let resp = self
            .client
            .get(&self.url)
            .send()
            .await
            .with_context(|| format!("GET {} request failed", self.url))?;

        let status = resp.status();
        if !status.is_success() {
            anyhow::bail!("yields API returned {}", status);
        }

        let body: serde_json::Value = resp
            .json()
            .await
            .context("failed to parse yields response body")?;

        debug!("yields document retrieved");
        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_with_timeout() {
        let c = YieldsClient::new("http://127.0.0.1:9/api/yields", Duration::from_secs(1)).unwrap();
        assert_eq!(c.url(), "http://127.0.0.1:9/api/yields");
    }

    #[tokio::test]
    async fn unreachable_endpoint_is_an_error() {
        // Port 9 (discard) is closed on any sane test host.
        let c = YieldsClient::new("http://127.0.0.1:9/api/yields", Duration::from_secs(2)).unwrap();
        assert!(c.fetch().await.is_err());
    }
}
