use std::{path::PathBuf, process::ExitCode};

use anyhow::{Context, Result};
use font_sync::{
    core::{
        cli::{self, Command},
        settings::SyncConfig,
    },
    fonts::{FontSync, HttpFetcher},
};
use tracing::metadata::LevelFilter;

const ENV_LOG: &str = "FONT_SYNC_LOG";
const ENV_REPORT: &str = "FONT_SYNC_REPORT";

fn setup_logging() {
    let filter = std::env::var(ENV_LOG)
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(LevelFilter::INFO);

    let subscriber = tracing_subscriber::fmt()
        .with_max_level(filter)
        .with_target(false)
        .compact()
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}

fn run(fonts: Vec<String>) -> Result<bool> {
    let config = SyncConfig::load();

    let fetcher = HttpFetcher::new(&config.user_agent, config.request_timeout())
        .context("prepare font downloads")?;
    let sync = FontSync::new(&config, fetcher);
    tracing::info!("Syncing fonts into {}", sync.cache().root().display());

    let report = if fonts.is_empty() {
        sync.run()
    } else {
        sync.run_fonts(&fonts)
    };

    if let Some(path) = std::env::var_os(ENV_REPORT).map(PathBuf::from) {
        if let Err(error) = report.write_json(&path) {
            tracing::warn!("Failed to write sync report: {error:?}");
        }
    }

    println!("{}", report.summary());
    Ok(!report.has_failures())
}

fn main() -> ExitCode {
    let fonts = match cli::parse_args(std::env::args().skip(1)) {
        Ok(Command::Sync(fonts)) => fonts,
        Ok(Command::Help) => {
            println!("{}", cli::USAGE);
            return ExitCode::SUCCESS;
        }
        Err(error) => {
            eprintln!("{error}\n\n{}", cli::USAGE);
            return ExitCode::from(2);
        }
    };

    setup_logging();

    match run(fonts) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(error) => {
            tracing::error!("Font sync could not start: {error:?}");
            ExitCode::FAILURE
        }
    }
}
