use crate::catalog::models::{AgentProperties, SourceAgentRecord};
use crate::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Opaque reference to a remote CRM object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrmObject {
    pub id: String,
    #[serde(default)]
    pub properties: serde_json::Value,
}

/// Remote CRM object API: identity search plus create/update.
///
/// Every call is an independent, stateless network round-trip; implementations
/// live in `agentsync_integrations` or test code.
#[async_trait]
pub trait CrmApi: Send + Sync {
    /// Find an object by the `external_agent_id` identity property.
    async fn search_by_external_id(
        &self,
        object_type: &str,
        external_id: &str,
    ) -> Result<Option<String>>;

    /// Fallback identity search over the name and vendor property pair.
    async fn search_by_name_vendor(
        &self,
        object_type: &str,
        name: &str,
        vendor: &str,
    ) -> Result<Option<String>>;

    /// Create an object; the returned reference carries the assigned id.
    async fn create(&self, object_type: &str, properties: &AgentProperties) -> Result<CrmObject>;

    /// Replace the supplied property keys on an existing object.
    async fn update(
        &self,
        object_type: &str,
        id: &str,
        properties: &AgentProperties,
    ) -> Result<CrmObject>;
}

/// Source of marketplace agent records.
#[async_trait]
pub trait AgentFeed: Send + Sync {
    async fn fetch(&self) -> Result<Vec<SourceAgentRecord>>;
}
