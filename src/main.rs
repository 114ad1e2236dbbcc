use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use readaloud::cli::{self, Args};
use readaloud::error::AppError;
use readaloud::infrastructure::audio::{AudioPlayer, NullPlayer, RodioPlayer};
use readaloud::infrastructure::config::{Config, LogFormat};
use readaloud::infrastructure::tts_api::HttpTtsApi;

#[tokio::main]
async fn main() {
    let args = Args::parse();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            let error = AppError::Config(e.to_string());
            eprintln!("{error}");
            std::process::exit(error.exit_code());
        }
    };

    init_logging(&config);

    tracing::info!(base_url = %config.base_url, "Starting readaloud");

    let tts_api = Arc::new(HttpTtsApi::new(config.base_url.clone()));
    let player: Arc<dyn AudioPlayer> = if args.no_play {
        Arc::new(NullPlayer)
    } else {
        Arc::new(RodioPlayer)
    };

    if let Err(error) = cli::run(args, &config, tts_api, player).await {
        tracing::error!(error = %error, "Conversion failed");
        eprintln!("Error: {error}");
        std::process::exit(error.exit_code());
    }
}

fn init_logging(config: &Config) {
    if config.log_format == LogFormat::Json {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "readaloud=info".into()),
            )
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "readaloud=info".into()),
            )
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }
}
