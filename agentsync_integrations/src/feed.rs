//! HTTP source feed.

use agentsync_core::catalog::models::{parse_feed, SourceAgentRecord};
use agentsync_core::sync::traits::AgentFeed;
use agentsync_core::{Error, Result};
use async_trait::async_trait;
use std::time::Duration;
use tracing::instrument;

/// Fetches the marketplace feed with a plain uncached GET.
#[derive(Clone)]
pub struct HttpAgentFeed {
    client: reqwest::Client,
    url: String,
}

impl HttpAgentFeed {
    #[instrument(level = "debug")]
    pub fn new(url: impl Into<String> + std::fmt::Debug) -> Result<Self> {
        let url = url.into();
        if url.trim().is_empty() {
            return Err(Error::InvalidInput("feed url is empty".to_string()));
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(20))
            .build()
            .map_err(|e| Error::backend("build reqwest client", e))?;

        Ok(Self { client, url })
    }
}

#[async_trait]
impl AgentFeed for HttpAgentFeed {
    #[instrument(level = "info", skip(self), fields(url = %self.url))]
    async fn fetch(&self) -> Result<Vec<SourceAgentRecord>> {
        let resp = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(Error::backend_reqwest)?;

        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            return Err(Error::http(self.url.clone(), status.as_u16(), text));
        }

        let body: serde_json::Value = resp.json().await.map_err(Error::backend_reqwest)?;
        Ok(parse_feed(body))
    }
}
