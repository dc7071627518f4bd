//! The sync pipeline: fetch feed, normalize, reconcile against the CRM.

pub mod job;
pub mod models;
pub mod pacer;
pub mod reconciler;
#[cfg(test)]
pub(crate) mod test_support;
pub mod traits;

pub use job::SyncJob;
pub use models::{RecordOutcome, SyncAction, SyncReport, SyncRun, SyncRunStatus};
pub use pacer::Pacer;
pub use reconciler::reconcile;
pub use traits::{AgentFeed, CrmApi, CrmObject};
