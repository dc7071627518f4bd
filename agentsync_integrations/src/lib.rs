//! Outbound connectors for the sync pipeline.

pub mod feed;
pub mod hubspot;

pub use feed::HttpAgentFeed;
pub use hubspot::HubSpotClient;
