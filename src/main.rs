// Main entry point - Dependency injection and command dispatch
mod domain;
mod application;
mod infrastructure;
mod presentation;

use std::sync::Arc;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::application::auth_service::AuthService;
use crate::application::fetch_service::FetchService;
use crate::application::pipeline::ChartPipeline;
use crate::infrastructure::config::{load_app_config, AppConfig};
use crate::infrastructure::json_store::JsonFileStore;
use crate::infrastructure::oauth_client::OAuthClient;
use crate::infrastructure::svg_output::SvgFileSink;
use crate::infrastructure::whoop_repository::WhoopApiClient;
use crate::presentation::browser;
use crate::presentation::callback::CallbackListener;
use crate::presentation::cli::{Cli, Commands};
use crate::presentation::report;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let config = load_app_config(&cli.config)?;

    match cli.command {
        Commands::Auth => authenticate(&config).await,
        Commands::Fetch => fetch(&config).await,
        Commands::Render => render(&config).await,
        Commands::Sync => {
            fetch(&config).await?;
            render(&config).await
        }
    }
}

fn file_store(config: &AppConfig) -> Arc<JsonFileStore> {
    Arc::new(JsonFileStore::new(
        config.storage.data_dir.clone(),
        config.storage.token_file.clone(),
    ))
}

async fn authenticate(config: &AppConfig) -> anyhow::Result<()> {
    config.oauth.require_credentials()?;

    let store = file_store(config);
    let oauth = Arc::new(OAuthClient::new(reqwest::Client::new(), config.oauth.clone()));
    let service = AuthService::new(oauth, store.clone());

    println!("{}", report::banner("Authorization"));

    // Listen before the user can be redirected
    let listener = CallbackListener::bind(&config.oauth.redirect_uri).await?;
    let request = service.begin();
    println!("\n1. Opening browser for authorization...");
    browser::open_authorization_url(&request.url);
    println!("\nIf the browser doesn't open automatically, visit:\n{}\n", request.url);
    println!("2. Waiting for authorization callback on {}...", listener.local_addr()?);

    let code = listener.wait_for_code(request.state).await?;
    println!("3. Authorization code received, exchanging for tokens...");

    let tokens = service.complete(&code).await?;
    println!("\n{}", report::token_summary(&tokens));
    println!("\u{2713} Tokens saved to {}", store.token_path().display());
    Ok(())
}

async fn fetch(config: &AppConfig) -> anyhow::Result<()> {
    config.oauth.require_credentials()?;

    let http = reqwest::Client::new();
    let store = file_store(config);
    let oauth = Arc::new(OAuthClient::new(http.clone(), config.oauth.clone()));
    let api = Arc::new(WhoopApiClient::new(
        http,
        config.api.base_url.clone(),
        oauth,
        store.clone(),
    ));
    let service = FetchService::new(api, store, config.api.record_limit);

    println!("{}", report::banner("Data Fetch"));
    println!("Fetching most recent data (up to {} records per category)...", config.api.record_limit);

    let summary = service.fetch_all().await?;
    println!("\n{}", report::fetch_summary(&summary));
    Ok(())
}

async fn render(config: &AppConfig) -> anyhow::Result<()> {
    let sink = Arc::new(SvgFileSink::new(config.storage.output_dir.clone()));
    let pipeline = ChartPipeline::new(file_store(config), sink, config.chart_specs());

    println!("{}", report::banner("Chart Rendering"));

    let outcomes = pipeline.run().await?;
    for outcome in &outcomes {
        println!("{}", report::chart_line(outcome));
    }
    println!("\nRendered into {}", config.storage.output_dir.display());
    Ok(())
}
