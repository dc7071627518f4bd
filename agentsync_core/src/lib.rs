//! Agentsync core library: catalog normalization and CRM sync primitives
//! shared across all crates.

pub mod catalog;
pub mod config;
pub mod error;
pub mod o11y;
pub mod sync;

pub use catalog::models::{AgentProperties, SourceAgentRecord};
pub use catalog::normalize::normalize_agent;
pub use config::{ConfigPresence, ConfigSnapshot, SyncConfig};
pub use error::{Error, Result};
pub use sync::job::SyncJob;
pub use sync::models::{RecordOutcome, SyncAction, SyncReport, SyncRun, SyncRunStatus};
pub use sync::pacer::Pacer;
pub use sync::traits::{AgentFeed, CrmApi, CrmObject};
