//! Process configuration.
//!
//! All environment reads happen once, at startup, through `ConfigSnapshot`.
//! The snapshot itself is total; `require()` performs the fail-fast
//! validation so a partially configured process can still serve diagnostics.

use crate::{Error, Result};
use serde::Serialize;
use std::time::Duration;

pub const DEFAULT_CRM_BASE_URL: &str = "https://api.hubapi.com";
pub const DEFAULT_PACING_MS: u64 = 120;

/// Raw configuration as read from the environment. Never fails to construct.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigSnapshot {
    pub hubspot_token: Option<String>,
    pub agent_object_type: Option<String>,
    pub feed_url: Option<String>,
    pub crm_base_url: Option<String>,
    pub pacing_ms: Option<u64>,
}

/// Validated configuration required to run a sync.
#[derive(Debug, Clone, PartialEq)]
pub struct SyncConfig {
    pub hubspot_token: String,
    pub agent_object_type: String,
    pub feed_url: String,
    pub crm_base_url: String,
    pub pacing: Duration,
}

/// Diagnostics view of the snapshot. Secret values are reduced to presence.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConfigPresence {
    pub has_hubspot_token: bool,
    pub agent_object_type: Option<String>,
    pub feed_url: Option<String>,
}

impl ConfigSnapshot {
    #[tracing::instrument(level = "debug")]
    pub fn from_env() -> Self {
        let mut cfg = Self::default();

        if let Ok(v) = std::env::var("HUBSPOT_TOKEN") {
            if !v.trim().is_empty() {
                cfg.hubspot_token = Some(v);
            }
        }
        if let Ok(v) = std::env::var("HS_AI_AGENT_TYPE_ID") {
            if !v.trim().is_empty() {
                cfg.agent_object_type = Some(v);
            }
        }
        if let Ok(v) = std::env::var("AGENTS_JSON_URL") {
            if !v.trim().is_empty() {
                cfg.feed_url = Some(v);
            }
        }
        if let Ok(v) = std::env::var("AGENTSYNC_CRM_BASE_URL") {
            if !v.trim().is_empty() {
                cfg.crm_base_url = Some(v);
            }
        }
        if let Ok(v) = std::env::var("AGENTSYNC_PACING_MS") {
            if let Ok(ms) = v.trim().parse::<u64>() {
                cfg.pacing_ms = Some(ms);
            }
        }

        cfg
    }

    /// Validate the values required for a sync run.
    ///
    /// Fails before any network call, naming the missing variable.
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn require(&self) -> Result<SyncConfig> {
        let hubspot_token = self
            .hubspot_token
            .clone()
            .ok_or_else(|| Error::Config("HUBSPOT_TOKEN".to_string()))?;
        let agent_object_type = self
            .agent_object_type
            .clone()
            .ok_or_else(|| Error::Config("HS_AI_AGENT_TYPE_ID".to_string()))?;
        let feed_url = self
            .feed_url
            .clone()
            .ok_or_else(|| Error::Config("AGENTS_JSON_URL".to_string()))?;

        Ok(SyncConfig {
            hubspot_token,
            agent_object_type,
            feed_url,
            crm_base_url: self
                .crm_base_url
                .clone()
                .unwrap_or_else(|| DEFAULT_CRM_BASE_URL.to_string()),
            pacing: Duration::from_millis(self.pacing_ms.unwrap_or(DEFAULT_PACING_MS)),
        })
    }

    #[tracing::instrument(level = "debug", skip(self))]
    pub fn presence(&self) -> ConfigPresence {
        ConfigPresence {
            has_hubspot_token: self.hubspot_token.is_some(),
            agent_object_type: self.agent_object_type.clone(),
            feed_url: self.feed_url.clone(),
        }
    }
}
