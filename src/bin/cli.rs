//! Soccer history CLI
//!
//! Crawls configured competitions and stores their history locally or in
//! MySQL (feature `mysql`).

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use soccer_history::{
    error::{AppError, Result},
    models::{Competition, Config, LoggingConfig},
    pipeline,
    storage::{HistoryStorage, LocalStorage},
    utils::http::HttpFetcher,
};

/// soccer-history - Football Competition History Extractor
#[derive(Parser, Debug)]
#[command(
    name = "soccer-history",
    version,
    about = "Extracts standings, results and podiums from soccer365.ru"
)]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "data/config.toml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Crawl competitions and store their history
    Run {
        /// Only crawl the competition with this site index
        #[arg(long)]
        competition: Option<u32>,

        /// Storage backend
        #[arg(long, value_enum, default_value_t = Backend::Local)]
        backend: Backend,

        /// Output directory for the local backend (default: storage.output_dir)
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Validate the configuration file
    Validate,

    /// List configured competitions
    List,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Backend {
    /// JSON files on disk
    Local,
    /// MySQL tables (requires the `mysql` feature)
    Mysql,
}

/// Initialize logging with the given default filter.
fn init_logging(level: &str) {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Competitions selected by `--competition`, or all configured ones.
fn select_competitions(config: &Config, site_index: Option<u32>) -> Result<Vec<Competition>> {
    match site_index {
        Some(index) => config
            .competition(index)
            .cloned()
            .map(|c| vec![c])
            .ok_or_else(|| AppError::config(format!("competition {index} is not configured"))),
        None => Ok(config.competitions.clone()),
    }
}

async fn open_storage(
    config: &Config,
    backend: Backend,
    output: Option<PathBuf>,
) -> Result<Box<dyn HistoryStorage>> {
    match backend {
        Backend::Local => {
            let dir = output.unwrap_or_else(|| PathBuf::from(&config.storage.output_dir));
            log::info!("Writing JSON output to {}", dir.display());
            Ok(Box::new(LocalStorage::new(dir)))
        }
        #[cfg(feature = "mysql")]
        Backend::Mysql => {
            let storage =
                soccer_history::storage::MySqlStorage::from_env(&config.storage.database_url_env)
                    .await?;
            Ok(Box::new(storage))
        }
        #[cfg(not(feature = "mysql"))]
        Backend::Mysql => Err(AppError::config(
            "mysql backend requires building with --features mysql",
        )),
    }
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    #[cfg(feature = "mysql")]
    let _ = dotenvy::dotenv();

    let loaded = Config::load(&cli.config);
    let level = match (&loaded, cli.verbose) {
        (_, true) => "debug".to_string(),
        (Ok(config), false) => config.logging.level.clone(),
        (Err(_), false) => LoggingConfig::default().level,
    };
    init_logging(&level);

    let config = loaded.inspect_err(|e| {
        log::error!("Config load failed from {}: {}", cli.config.display(), e);
    })?;

    match cli.command {
        Command::Run {
            competition,
            backend,
            output,
        } => {
            config.validate()?;
            let competitions = select_competitions(&config, competition)?;
            let fetcher = HttpFetcher::new(&config.crawler)?;
            let storage = open_storage(&config, backend, output).await?;

            let summaries =
                pipeline::run_crawler(&config, &fetcher, storage.as_ref(), &competitions).await?;
            for summary in &summaries {
                log::info!(
                    "{}: {} tables, {} rows → {}",
                    summary.competition,
                    summary.tables_written,
                    summary.rows_written,
                    summary.location
                );
            }
        }

        Command::Validate => {
            log::info!("Validating {}...", cli.config.display());

            if let Err(e) = config.validate() {
                log::error!("Config validation failed: {}", e);
                return Err(e);
            }
            log::info!(
                "✓ Config OK ({} competitions, selectors compile)",
                config.competitions.len()
            );
        }

        Command::List => {
            for c in &config.competitions {
                log::info!(
                    "#{:<5} {:<28} {:>3} seasons  {:?}{}{}",
                    c.site_index,
                    c.display_name,
                    c.season_count,
                    c.kind,
                    if c.with_fixtures { " +fixtures" } else { "" },
                    if c.season_label_prefix { " +prefix" } else { "" },
                );
            }
        }
    }

    log::info!("Done!");

    Ok(())
}
