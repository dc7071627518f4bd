use serde::{Deserialize, Serialize};

/// A loosely-typed agent record as published by the marketplace feed.
///
/// The feed guarantees nothing: every field may be absent or malformed.
/// List-valued and numeric fields stay as raw JSON so the normalizer can
/// coerce whatever shape actually arrives.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct SourceAgentRecord {
    pub id: Option<String>,
    pub name: Option<String>,
    pub vendor: Option<String>,
    pub category: Option<String>,
    pub industries: Option<serde_json::Value>,
    pub integrations: Option<serde_json::Value>,
    pub compliance: Option<serde_json::Value>,
    pub price_tier: Option<String>,
    pub price_value: Option<serde_json::Value>,
    pub deployment_stats: Option<String>,
    pub demo_url: Option<String>,
}

/// Canonical property set pushed to the CRM, immutable once produced.
///
/// Field names match the CRM property names on the custom agent object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentProperties {
    pub external_agent_id: String,
    pub ai_agent_name: String,
    pub vendor_name: String,
    pub category: String,
    pub industries_supported: Vec<String>,
    pub supported_integrations: Vec<String>,
    pub compliance_certifications: Vec<String>,
    pub price_tier: Option<String>,
    pub price_value: Option<f64>,
    pub deployment_stats: String,
    pub demo_url: String,
}

/// Extract the record list from a feed body.
///
/// Accepts either a bare JSON array or an object with an `items` array; any
/// other shape is an empty record set. Elements that fail typed
/// deserialization degrade to the all-default record rather than aborting
/// the run.
#[tracing::instrument(level = "debug", skip(body))]
pub fn parse_feed(body: serde_json::Value) -> Vec<SourceAgentRecord> {
    let items = match body {
        serde_json::Value::Array(items) => items,
        serde_json::Value::Object(mut map) => match map.remove("items") {
            Some(serde_json::Value::Array(items)) => items,
            _ => Vec::new(),
        },
        _ => Vec::new(),
    };

    items
        .into_iter()
        .map(|item| serde_json::from_value(item).unwrap_or_default())
        .collect()
}
