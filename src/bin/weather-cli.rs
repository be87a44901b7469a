use clap::{Parser, Subcommand};
use serde_json::Value;

#[derive(Parser)]
#[command(name = "weather-cli")]
#[command(about = "Query a running weather proxy", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:9000")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check that the proxy is up
    Status,
    /// Search for matching cities
    Search {
        query: String,
    },
    /// Fetch a forecast
    Forecast {
        query: String,
        #[arg(short, long, default_value_t = 14)]
        days: i64,
        #[arg(long, default_value = "yes")]
        aqi: String,
        #[arg(long, default_value = "no")]
        alerts: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let base = cli.url.trim_end_matches('/');

    let request = match cli.command {
        Commands::Status => client.get(format!("{}/", base)),
        Commands::Search { query } => client
            .get(format!("{}/search.json", base))
            .query(&[("q", query)]),
        Commands::Forecast {
            query,
            days,
            aqi,
            alerts,
        } => client.get(format!("{}/forecast.json", base)).query(&[
            ("q", query),
            ("days", days.to_string()),
            ("aqi", aqi),
            ("alerts", alerts),
        ]),
    };

    print_response(request.send().await?).await
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: proxy returned status {}", status);
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text);
        }
        std::process::exit(1);
    }

    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
