use agentsync_core::config::ConfigSnapshot;
use agentsync_core::{Pacer, SyncJob};
use agentsync_integrations::{HttpAgentFeed, HubSpotClient};
use agentsync_server::cli::{Cli, Commands};
use agentsync_server::server::{serve, AppState};
use clap::Parser;
use std::net::SocketAddr;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    agentsync_core::o11y::init_tracing()?;
    let cli = Cli::parse();

    let cmd = cli.command.unwrap_or(Commands::Serve {
        host: "0.0.0.0".to_string(),
        port: 8000,
    });

    match cmd {
        Commands::Serve { host, port } => {
            let addr: SocketAddr = format!("{host}:{port}").parse()?;
            let state = AppState::new(ConfigSnapshot::from_env());
            serve(addr, state).await?;
        }
        Commands::Sync { dry_run } => {
            let cfg = ConfigSnapshot::from_env().require()?;
            let feed = HttpAgentFeed::new(cfg.feed_url.clone())?;
            let crm = HubSpotClient::new(cfg.crm_base_url.clone(), cfg.hubspot_token.clone())?;
            let job = SyncJob::new(
                Arc::new(feed),
                Arc::new(crm),
                cfg.agent_object_type.clone(),
                Pacer::new(cfg.pacing),
            );
            let report = job.run(dry_run).await?;
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Commands::Config => {
            let presence = ConfigSnapshot::from_env().presence();
            println!("{}", serde_json::to_string_pretty(&presence)?);
        }
    }

    Ok(())
}
