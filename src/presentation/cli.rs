use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[clap(name = "fitness-telemetry")]
#[clap(about = "Fetch wearable fitness metrics and render them as SVG charts")]
#[clap(version)]
pub struct Cli {
    /// Configuration file, without extension
    #[clap(long, global = true, default_value = "config/app")]
    pub config: String,

    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Commands {
    /// Authorize this machine and store the resulting tokens
    Auth,
    /// Download every metric category into the data directory
    Fetch,
    /// Render charts from previously fetched data
    Render,
    /// Fetch, then render
    Sync,
}
