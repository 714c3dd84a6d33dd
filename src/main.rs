use std::process::ExitCode;

use clap::Parser;
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use contentscore::app::{AppOptions, AppState};
use contentscore::model::Config;

#[derive(Parser)]
#[command(
    name = "contentscore",
    version,
    about = "Scan web pages and compute a 0-100 SEO content quality score"
)]
struct Cli {
    /// Pages to scan, one JSON result per URL
    #[arg(required = true, value_name = "URL")]
    urls: Vec<String>,

    /// Pretty-print JSON output
    #[arg(long)]
    pretty: bool,

    /// Skip the Redis result cache
    #[arg(long, env = "CONTENTSCORE_NO_CACHE")]
    no_cache: bool,
}

/// Printed in place of a result when a scan fails
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ScanFailure<'a> {
    url: &'a str,
    error: String,
}

#[tokio::main]
async fn main() -> ExitCode {
    // Load .env file if present (ignore if missing)
    let _ = dotenvy::dotenv();

    // Logs go to stderr, stdout carries the JSON results
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = Config::from_env();

    let state = match AppState::new(config, AppOptions { no_cache: cli.no_cache }).await {
        Ok(state) => state,
        Err(e) => {
            tracing::error!(error = %e, "Failed to initialize application");
            return ExitCode::FAILURE;
        }
    };

    tracing::info!(
        urls = cli.urls.len(),
        judge_available = state.judge_available,
        "Starting scans"
    );

    let mut failures = 0usize;
    for url in &cli.urls {
        let output = match state.pipeline.run_pipeline(url).await {
            Ok(result) => render(&result, cli.pretty),
            Err(e) => {
                failures += 1;
                tracing::error!(url = %url, error = %e, "Scan failed");
                render(
                    &ScanFailure {
                        url,
                        error: e.to_string(),
                    },
                    cli.pretty,
                )
            }
        };

        match output {
            Ok(json) => println!("{}", json),
            Err(e) => {
                failures += 1;
                tracing::error!(url = %url, error = %e, "Failed to serialize scan output");
            }
        }
    }

    if failures > 0 {
        tracing::warn!(failures = failures, total = cli.urls.len(), "Some scans failed");
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn render<T: Serialize>(value: &T, pretty: bool) -> serde_json::Result<String> {
    if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    }
}
