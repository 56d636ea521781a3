use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;

mod catalog;
mod compare;
mod config;
mod error;
mod hiscores;
mod mcp;
mod model;
mod normalize;
mod service;
mod stdio;
mod tools;
mod validation;

use crate::config::Transport;
use crate::hiscores::HiscoresClient;
use crate::mcp::McpState;
use crate::service::HiscoresService;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();

    info!(
        "Starting OSRS hiscores MCP server v{}",
        env!("CARGO_PKG_VERSION")
    );

    let config = config::load()?;
    info!(
        transport = ?config.server.transport,
        base_url = %config.upstream.base_url,
        "Configuration loaded"
    );

    let client = HiscoresClient::new(
        &config.upstream.base_url,
        config.upstream.timeout_secs,
        &config.upstream.user_agent,
    )?;
    let service = Arc::new(HiscoresService::new(Arc::new(client)));
    let state = Arc::new(McpState { service });

    match config.server.transport {
        Transport::Stdio => stdio::serve_stdio(state).await?,
        Transport::Http => {
            let app = mcp::http_app(state, &config.server.mcp_path);

            let addr = format!("{}:{}", config.server.host, config.server.port);
            let listener = TcpListener::bind(&addr).await?;
            info!(path = %config.server.mcp_path, "Listening on {}", addr);

            axum::serve(listener, app).await?;
        }
    }

    Ok(())
}

fn init_logging() {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let format = fmt::format()
        .with_target(true)
        .with_thread_ids(true)
        .compact();

    // Use RUST_LOG if set, otherwise default to info level for our crate
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("hiscores_service=info"));

    // stdout carries the stdio protocol, so logs go to stderr
    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .event_format(format)
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}
