use std::str::FromStr;
use std::sync::Arc;

use clap::{Parser, Subcommand};

use prism::api::{AppState, create_router};
use prism::config::Config;
use prism::models::ProviderKind;
use prism::providers::{SearchOptions, build_provider};

#[derive(Parser)]
#[command(name = "prism", about = "Search gateway normalizing two backends into one schema")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP gateway
    Serve {
        #[arg(long, default_value = "0.0.0.0:8000")]
        addr: String,
    },
    /// Query one backend directly and print the normalized result (debug tool)
    Search {
        query: String,
        /// bing-v7 or serpapi-bing
        #[arg(long, default_value = "bing-v7")]
        provider: String,
        #[arg(long, default_value_t = 5, value_parser = clap::value_parser!(u32).range(1..=50))]
        count: u32,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing subscriber
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_target(true)
        .init();

    let config = Config::from_env();

    match Cli::parse().command {
        Command::Serve { addr } => {
            let router = create_router(Arc::new(AppState::new(config)));
            let listener = tokio::net::TcpListener::bind(&addr).await?;
            tracing::info!(%addr, "listening");
            axum::serve(listener, router).await?;
        }
        Command::Search {
            query,
            provider,
            count,
        } => {
            let kind = ProviderKind::from_str(&provider)?;
            let options = SearchOptions {
                count,
                ..SearchOptions::default()
            };
            let result = build_provider(kind, &config).search(&query, &options).await?;
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
    }
    Ok(())
}
