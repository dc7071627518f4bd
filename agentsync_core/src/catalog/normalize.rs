//! Pure, total normalization of feed records into canonical CRM properties.
//!
//! Missing or malformed fields degrade to defaults; nothing here fails and
//! nothing here touches the network.

use crate::catalog::models::{AgentProperties, SourceAgentRecord};

/// Sentinel for values present in the feed but outside a vocabulary.
pub const OTHER: &str = "other";

pub const INDUSTRIES: &[&str] = &[
    "saas",
    "ecommerce",
    "manufacturing",
    "healthcare",
    "finance",
    "other",
];
pub const INTEGRATIONS: &[&str] = &["salesforce", "shopify", "netsuite", "slack", "other"];
pub const COMPLIANCE: &[&str] = &["gdpr", "soc2", "hipaa", "other"];
pub const PRICE_TIERS: &[&str] = &["free", "trial", "standard", "enterprise"];

/// Clamp a single value to a vocabulary.
///
/// Trims and lower-cases; empty input is None, a recognized value is itself,
/// anything else is the `"other"` sentinel.
pub fn normalize_enum(value: Option<&str>, allowed: &[&str]) -> Option<String> {
    let v = value?.trim().to_lowercase();
    if v.is_empty() {
        return None;
    }
    if allowed.contains(&v.as_str()) {
        Some(v)
    } else {
        Some(OTHER.to_string())
    }
}

/// Clamp a list value to a vocabulary.
///
/// Non-array input yields an empty set. Applies the single-value rule
/// elementwise, drops empties, and deduplicates preserving first occurrence.
/// Scalar elements that are not strings still count as present (and clamp to
/// `"other"` unless their textual form is in the vocabulary).
pub fn normalize_multi(value: Option<&serde_json::Value>, allowed: &[&str]) -> Vec<String> {
    let Some(serde_json::Value::Array(items)) = value else {
        return Vec::new();
    };

    let mut out = Vec::new();
    for item in items {
        let text = match item {
            serde_json::Value::String(s) => s.clone(),
            serde_json::Value::Number(n) => n.to_string(),
            serde_json::Value::Bool(b) => b.to_string(),
            _ => continue,
        };
        let Some(normalized) = normalize_enum(Some(text.as_str()), allowed) else {
            continue;
        };
        if !out.contains(&normalized) {
            out.push(normalized);
        }
    }
    out
}

/// Durable identity for a record: the explicit source id when present,
/// else `"<name>::<vendor>"` over the trimmed fields.
pub fn external_agent_id(record: &SourceAgentRecord) -> String {
    if let Some(id) = record.id.as_deref() {
        if !id.is_empty() {
            return id.to_string();
        }
    }
    let name = record.name.as_deref().unwrap_or("").trim();
    let vendor = record.vendor.as_deref().unwrap_or("").trim();
    format!("{name}::{vendor}")
}

/// Map a feed record onto the canonical property set.
#[tracing::instrument(level = "debug", skip(record))]
pub fn normalize_agent(record: &SourceAgentRecord) -> AgentProperties {
    AgentProperties {
        external_agent_id: external_agent_id(record),
        ai_agent_name: record.name.clone().unwrap_or_default(),
        vendor_name: record.vendor.clone().unwrap_or_default(),
        category: record.category.clone().unwrap_or_default(),
        industries_supported: normalize_multi(record.industries.as_ref(), INDUSTRIES),
        supported_integrations: normalize_multi(record.integrations.as_ref(), INTEGRATIONS),
        compliance_certifications: normalize_multi(record.compliance.as_ref(), COMPLIANCE),
        price_tier: normalize_enum(record.price_tier.as_deref(), PRICE_TIERS),
        price_value: record.price_value.as_ref().and_then(|v| v.as_f64()),
        deployment_stats: record.deployment_stats.clone().unwrap_or_default(),
        demo_url: record.demo_url.clone().unwrap_or_default(),
    }
}
