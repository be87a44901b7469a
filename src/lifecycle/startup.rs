//! Startup orchestration.
//!
//! Config is loaded and logging initialised by the binary; this module
//! builds the server, binds the listener last and serves until a signal.

use tokio::net::TcpListener;

use crate::config::ProxyConfig;
use crate::http::HttpServer;
use crate::lifecycle::Shutdown;

#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("failed to build upstream client: {0}")]
    Client(#[from] reqwest::Error),

    #[error("failed to bind {address}: {source}")]
    Bind {
        address: String,
        source: std::io::Error,
    },

    #[error("server error: {0}")]
    Serve(#[from] std::io::Error),
}

/// Build, bind and serve. Returns after graceful shutdown.
pub async fn serve(config: ProxyConfig) -> Result<(), StartupError> {
    let address = config.listener.bind_address();

    tracing::info!(
        bind_address = %address,
        base_url = %config.upstream.base_url,
        api_key_configured = config.upstream.api_key.is_some(),
        upstream_timeout_secs = ?config.upstream.timeout_secs,
        "Configuration loaded"
    );
    if config.upstream.api_key.is_none() {
        tracing::warn!("API_KEY is not set; upstream calls will be sent without a key");
    }

    let server = HttpServer::new(config)?;
    let listener = TcpListener::bind(&address)
        .await
        .map_err(|source| StartupError::Bind { address, source })?;

    let shutdown = Shutdown::new();
    let receiver = shutdown.subscribe();
    let _signals = shutdown.trigger_on_signal();

    server.run(listener, receiver).await?;
    Ok(())
}
