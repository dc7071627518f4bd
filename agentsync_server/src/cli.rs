use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "agentsync", version, about = "Marketplace-to-CRM agent sync")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Start the HTTP server (default if no subcommand given).
    Serve {
        #[arg(long, default_value = "0.0.0.0")]
        host: String,
        #[arg(long, default_value = "8000")]
        port: u16,
    },

    /// Run one sync pass from the terminal and print the JSON report.
    Sync {
        /// Compute and report intended actions without mutating the CRM.
        #[arg(long)]
        dry_run: bool,
    },

    /// Print current configuration presence (secrets redacted).
    Config,
}
