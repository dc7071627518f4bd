//! Upsert-by-identity against the CRM.

use crate::catalog::models::AgentProperties;
use crate::sync::models::{RecordOutcome, SyncAction};
use crate::sync::traits::CrmApi;
use crate::Result;

/// Create-or-update one canonical record, keyed by external identity.
///
/// Lookup goes through `external_agent_id` whenever the identity is
/// non-empty; the name+vendor pair is the secondary path. Under the current
/// identity derivation the synthesized id is never empty, so the secondary
/// path is defensive only. Do not remove it without confirming every feed
/// variant keeps the identity non-empty.
///
/// In dry-run mode nothing is mutated; the outcome reports what a real run
/// would have done, without an id.
#[tracing::instrument(level = "debug", skip(crm, props), fields(external_agent_id = %props.external_agent_id))]
pub async fn reconcile(
    crm: &dyn CrmApi,
    object_type: &str,
    props: &AgentProperties,
    dry_run: bool,
) -> Result<RecordOutcome> {
    let matched = if !props.external_agent_id.is_empty() {
        crm.search_by_external_id(object_type, &props.external_agent_id)
            .await?
    } else {
        crm.search_by_name_vendor(object_type, &props.ai_agent_name, &props.vendor_name)
            .await?
    };

    if dry_run {
        let action = if matched.is_some() {
            SyncAction::WouldUpdate
        } else {
            SyncAction::WouldCreate
        };
        return Ok(RecordOutcome {
            action,
            id: None,
            name: props.ai_agent_name.clone(),
        });
    }

    match matched {
        Some(id) => {
            crm.update(object_type, &id, props).await?;
            Ok(RecordOutcome {
                action: SyncAction::Updated,
                id: Some(id),
                name: props.ai_agent_name.clone(),
            })
        }
        None => {
            let created = crm.create(object_type, props).await?;
            Ok(RecordOutcome {
                action: SyncAction::Created,
                id: Some(created.id),
                name: props.ai_agent_name.clone(),
            })
        }
    }
}
