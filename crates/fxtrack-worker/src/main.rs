//! fxtrack worker - queue-driven metadata resolution daemon.

use clap::Parser;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use fxtrack_core::{PreviewQueue, PreviewStore};
use fxtrack_worker::browser::BrowserExtractor;
use fxtrack_worker::resolve::ApiExtractor;
use fxtrack_worker::upstream::SolarClient;
use fxtrack_worker::{Config, Engine, Strategy};

/// fxtrack worker - resolves furtrack link previews.
#[derive(Parser, Debug)]
#[command(name = "fxtrack-worker")]
#[command(about = "Link-preview resolution worker", long_about = None)]
struct Args {
    /// Path to .env file (optional).
    #[arg(long, env = "DOTENV_PATH", default_value = ".env")]
    dotenv: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if std::path::Path::new(&args.dotenv).exists() {
        dotenvy::from_path(&args.dotenv)?;
        eprintln!("Loaded environment from {}", args.dotenv);
    }

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    let queue = PreviewQueue::connect(&config.redis_url).await?;
    let store = PreviewStore::connect(&config.redis_url).await?;

    match config.strategy {
        Strategy::Api => {
            // Presence enforced by Config::from_env for this strategy.
            let token = config.token.as_deref().unwrap_or_default();
            let client = SolarClient::new(&config.upstream_url, token)?;
            Engine::new(queue, store, ApiExtractor::new(client)).run().await
        }
        Strategy::Browser => {
            let extractor = BrowserExtractor::new(&config.site_url);
            Engine::new(queue, store, extractor).run().await
        }
    }
}
