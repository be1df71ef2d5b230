mod api_client;
mod bootstrap;
mod config;
mod errors;
mod models;
mod prompter;
mod shell;
mod state;
mod upload;
mod views;

#[cfg(test)]
mod test_support;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::api_client::ApiClient;
use crate::config::Config;
use crate::prompter::TerminalPrompter;
use crate::shell::Shell;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // stderr for logs; stdout carries the rendered views
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("talentsync={}", &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("Starting TalentSync client v{}", env!("CARGO_PKG_VERSION"));
    info!("Backend: {}", config.api_url);

    let client = ApiClient::new(&config.api_url, config.request_timeout)
        .context("Failed to build HTTP client")?;

    let mut terminal = TerminalPrompter::new();
    shell::run(Shell::new(client), &mut terminal).await
}
