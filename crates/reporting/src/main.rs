//! Device reporting server.
//!
//! Serves device attribute searches over per-tenant Elasticsearch indices.

use clap::Parser;
use reporting_rest::{ServerConfig, create_app_with_config, init_logging};
use tracing::info;

/// Starts the Axum HTTP server.
async fn serve(app: axum::Router, config: &ServerConfig) -> anyhow::Result<()> {
    let addr = config.socket_addr();
    info!(address = %addr, "Server listening");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServerConfig::parse();
    init_logging(&config.log_level);

    if let Err(errors) = config.validate() {
        for error in &errors {
            eprintln!("Configuration error: {}", error);
        }
        std::process::exit(1);
    }

    info!(
        port = config.port,
        host = %config.host,
        default_page_size = config.default_page_size,
        max_page_size = config.max_page_size,
        "Starting device reporting server"
    );

    start(config).await
}

/// Starts the server with the Elasticsearch search client.
#[cfg(feature = "elasticsearch")]
async fn start(config: ServerConfig) -> anyhow::Result<()> {
    use reporting_search::SearchClient;
    use reporting_search::client::ElasticsearchClient;

    let es_config = config.elasticsearch_config();
    info!(
        nodes = ?es_config.nodes,
        index_prefix = %es_config.index_prefix,
        "Initializing Elasticsearch client"
    );

    let client = ElasticsearchClient::new(es_config)?;

    // Not fatal: the readiness probe reports the search engine state
    if let Err(e) = client.health_check().await {
        tracing::warn!(error = %e, "Elasticsearch is not reachable yet");
    }

    let app = create_app_with_config(client, config.clone());
    serve(app, &config).await
}

/// Fallback when the elasticsearch feature is not enabled.
#[cfg(not(feature = "elasticsearch"))]
async fn start(_config: ServerConfig) -> anyhow::Result<()> {
    anyhow::bail!(
        "The server requires the 'elasticsearch' feature. \
         Build with: cargo build -p reporting-server --features elasticsearch"
    )
}
