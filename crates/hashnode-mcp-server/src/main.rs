use std::path::PathBuf;

use clap::Parser;
use clap::builder::Styles;
use clap::builder::styling::{AnsiColor, Effects};
use hashnode_mcp_server::graphql::Client;
use hashnode_mcp_server::server::Server;
use runtime::Config;
use tracing::{info, warn};

mod runtime;

/// Clap styling
const STYLES: Styles = Styles::styled()
    .header(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .usage(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .literal(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
    .placeholder(AnsiColor::Cyan.on_default());

/// Arguments to the MCP server
#[derive(Debug, clap::Parser)]
#[command(
    version,
    styles = STYLES,
    about = "Hashnode MCP Server - read and write Hashnode content from an AI agent",
)]
struct Args {
    /// Path to the config file
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config: Config = match Args::parse().config {
        Some(config_path) => runtime::read_config(config_path)?,
        None => runtime::read_config_from_env()?,
    };

    // Keep the guard alive so buffered file logs are flushed on exit
    let _guard = runtime::setup_logging(&config)?;

    info!(
        "Hashnode MCP Server v{} // Licensed under MIT",
        std::env!("CARGO_PKG_VERSION")
    );
    if config.token.is_none() {
        warn!("No Hashnode personal access token configured; creating and updating articles will fail");
    }

    let client = Client::builder()
        .endpoint(config.endpoint.into_inner())
        .maybe_token(config.token)
        .headers(config.headers)
        .timeout(config.timeout)
        .build()?;

    Ok(Server::builder()
        .transport(config.transport)
        .client(client)
        .build()
        .start()
        .await?)
}
