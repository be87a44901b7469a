//! Weather Proxy
//!
//! Forwards city search and forecast queries to the weather provider,
//! injecting the server-held API key.
//!
//! ```text
//!   Browser ──GET /search.json?q=…──▶ ┌──────────────────┐ ──GET …&key=***──▶ Provider
//!           ◀── JSON / error ──────── │  weather-proxy   │ ◀── JSON / error ─
//!                                     └──────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;
use weather_proxy::config::load_config;
use weather_proxy::lifecycle;
use weather_proxy::observability::init_logging;

#[derive(Parser)]
#[command(name = "weather-proxy")]
#[command(about = "Credential-injecting proxy for a weather data provider", version)]
struct Cli {
    /// Optional TOML config file; environment variables override it.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Listening port (overrides PORT).
    #[arg(short, long)]
    port: Option<u16>,

    /// Bind interface (overrides HOST).
    #[arg(long)]
    host: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    dotenvy::dotenv().ok();

    let mut config = load_config(cli.config.as_deref())?;
    if let Some(port) = cli.port {
        config.listener.port = port;
    }
    if let Some(host) = cli.host {
        config.listener.host = host;
    }

    init_logging(&config.observability)?;
    tracing::info!("weather-proxy v{} starting", env!("CARGO_PKG_VERSION"));

    lifecycle::serve(config).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
