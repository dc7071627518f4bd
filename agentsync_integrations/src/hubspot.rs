//! HubSpot CRM client.
//!
//! Thin bearer-authenticated wrapper over the CRM v3 generic object API:
//! identity search, create, and update on the custom agent object type.

use agentsync_core::catalog::models::AgentProperties;
use agentsync_core::sync::traits::{CrmApi, CrmObject};
use agentsync_core::{Error, Result};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::instrument;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(20);

/// Bounded retry for transient failures. Client errors never retry.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            backoff: Duration::from_millis(250),
        }
    }
}

#[derive(Debug, Serialize)]
struct SearchRequest {
    #[serde(rename = "filterGroups")]
    filter_groups: Vec<FilterGroup>,
    properties: Vec<String>,
    limit: u32,
}

#[derive(Debug, Serialize)]
struct FilterGroup {
    filters: Vec<Filter>,
}

#[derive(Debug, Serialize)]
struct Filter {
    #[serde(rename = "propertyName")]
    property_name: String,
    operator: String,
    value: String,
}

impl Filter {
    fn eq(property_name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            property_name: property_name.into(),
            operator: "EQ".to_string(),
            value: value.into(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<CrmObject>,
}

#[derive(Debug, Serialize)]
struct PropertiesEnvelope<'a> {
    properties: &'a AgentProperties,
}

#[derive(Clone)]
pub struct HubSpotClient {
    client: reqwest::Client,
    base_url: String,
    token: String,
    retry: RetryPolicy,
}

impl HubSpotClient {
    #[instrument(level = "debug", skip(token))]
    pub fn new(base_url: impl Into<String> + std::fmt::Debug, token: impl Into<String>) -> Result<Self> {
        let base_url = base_url.into();
        if base_url.trim().is_empty() {
            return Err(Error::InvalidInput("hubspot base_url is empty".to_string()));
        }
        let token = token.into();
        if token.trim().is_empty() {
            return Err(Error::InvalidInput("hubspot token is empty".to_string()));
        }

        let client = reqwest::Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .build()
            .map_err(|e| Error::backend("build reqwest client", e))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
            retry: RetryPolicy::default(),
        })
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn object_path(object_type: &str) -> String {
        format!("/crm/v3/objects/{object_type}")
    }

    /// Issue one request; non-success statuses surface path, status, and body.
    async fn send_once<T: DeserializeOwned>(
        &self,
        method: reqwest::Method,
        path: &str,
        body: &impl Serialize,
    ) -> Result<T> {
        let resp = self
            .client
            .request(method, self.url(path))
            .bearer_auth(&self.token)
            .json(body)
            .send()
            .await
            .map_err(Error::backend_reqwest)?;

        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            return Err(Error::http(path, status.as_u16(), text));
        }

        resp.json::<T>().await.map_err(Error::backend_reqwest)
    }

    /// Request with bounded retry: transient errors (5xx, transport) back off
    /// exponentially; 4xx fails immediately.
    async fn send<T: DeserializeOwned>(
        &self,
        method: reqwest::Method,
        path: &str,
        body: &impl Serialize,
    ) -> Result<T> {
        let attempts = self.retry.max_attempts.max(1);
        let mut backoff = self.retry.backoff;

        for attempt in 1..=attempts {
            match self.send_once(method.clone(), path, body).await {
                Ok(v) => return Ok(v),
                Err(e) => {
                    let retryable = e.is_transient() || matches!(e, Error::Backend { .. });
                    if attempt >= attempts || !retryable {
                        return Err(e);
                    }
                    tracing::warn!(path, attempt, error = %e, "hubspot request failed, retrying");
                    if !backoff.is_zero() {
                        tokio::time::sleep(backoff).await;
                        backoff *= 2;
                    }
                }
            }
        }

        Err(Error::BackendMessage("unreachable retry loop".to_string()))
    }

    async fn search(&self, object_type: &str, request: &SearchRequest) -> Result<Option<String>> {
        let path = format!("{}/search", Self::object_path(object_type));
        let resp: SearchResponse = self.send(reqwest::Method::POST, &path, request).await?;
        Ok(resp.results.into_iter().next().map(|o| o.id))
    }
}

#[async_trait]
impl CrmApi for HubSpotClient {
    #[instrument(level = "debug", skip(self))]
    async fn search_by_external_id(
        &self,
        object_type: &str,
        external_id: &str,
    ) -> Result<Option<String>> {
        let request = SearchRequest {
            filter_groups: vec![FilterGroup {
                filters: vec![Filter::eq("external_agent_id", external_id)],
            }],
            properties: vec!["external_agent_id".to_string()],
            limit: 1,
        };
        self.search(object_type, &request).await
    }

    #[instrument(level = "debug", skip(self))]
    async fn search_by_name_vendor(
        &self,
        object_type: &str,
        name: &str,
        vendor: &str,
    ) -> Result<Option<String>> {
        let request = SearchRequest {
            filter_groups: vec![FilterGroup {
                filters: vec![
                    Filter::eq("ai_agent_name", name),
                    Filter::eq("vendor_name", vendor),
                ],
            }],
            properties: vec!["ai_agent_name".to_string(), "vendor_name".to_string()],
            limit: 1,
        };
        self.search(object_type, &request).await
    }

    #[instrument(level = "info", skip(self, properties), fields(external_agent_id = %properties.external_agent_id))]
    async fn create(&self, object_type: &str, properties: &AgentProperties) -> Result<CrmObject> {
        let path = Self::object_path(object_type);
        self.send(
            reqwest::Method::POST,
            &path,
            &PropertiesEnvelope { properties },
        )
        .await
    }

    #[instrument(level = "info", skip(self, properties), fields(external_agent_id = %properties.external_agent_id))]
    async fn update(
        &self,
        object_type: &str,
        id: &str,
        properties: &AgentProperties,
    ) -> Result<CrmObject> {
        let path = format!("{}/{id}", Self::object_path(object_type));
        self.send(
            reqwest::Method::PATCH,
            &path,
            &PropertiesEnvelope { properties },
        )
        .await
    }
}
