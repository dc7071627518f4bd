//! Marketplace catalog records and their canonical CRM projection.

pub mod models;
pub mod normalize;

pub use models::{parse_feed, AgentProperties, SourceAgentRecord};
pub use normalize::normalize_agent;
