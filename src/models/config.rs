//! Application configuration structures.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::models::{Competition, CompetitionKind, PageSelectors};

/// Root application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// HTTP and crawling behavior settings
    #[serde(default)]
    pub crawler: CrawlerConfig,

    /// Source site settings
    #[serde(default)]
    pub site: SiteConfig,

    /// CSS selectors per page shape
    #[serde(default)]
    pub selectors: PageSelectors,

    /// Persistence settings
    #[serde(default)]
    pub storage: StorageConfig,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Competitions to crawl
    #[serde(default = "defaults::competitions")]
    pub competitions: Vec<Competition>,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Look up a configured competition by its site index.
    pub fn competition(&self, site_index: u32) -> Option<&Competition> {
        self.competitions.iter().find(|c| c.site_index == site_index)
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.crawler.user_agent.trim().is_empty() {
            return Err(AppError::validation("crawler.user_agent is empty"));
        }
        if self.crawler.timeout_secs == 0 {
            return Err(AppError::validation("crawler.timeout_secs must be > 0"));
        }
        if self.crawler.retry_initial_delay_ms > self.crawler.retry_max_delay_ms {
            return Err(AppError::validation(
                "crawler.retry_initial_delay_ms must not exceed crawler.retry_max_delay_ms",
            ));
        }
        url::Url::parse(&self.site.base_url)
            .map_err(|e| AppError::validation(format!("site.base_url is invalid: {e}")))?;

        for (name, selector) in self.selectors.all() {
            scraper::Selector::parse(selector).map_err(|e| {
                AppError::selector(format!("selectors.{name}: {selector}"), format!("{e:?}"))
            })?;
        }

        if self.competitions.is_empty() {
            return Err(AppError::validation("No competitions defined"));
        }
        let mut seen = HashSet::new();
        for competition in &self.competitions {
            if competition.display_name.trim().is_empty() {
                return Err(AppError::validation(format!(
                    "competition {} has an empty display_name",
                    competition.site_index
                )));
            }
            if competition.season_count == 0 {
                return Err(AppError::validation(format!(
                    "competition {} must have season_count > 0",
                    competition.site_index
                )));
            }
            if !seen.insert(competition.site_index) {
                return Err(AppError::validation(format!(
                    "competition {} is defined twice",
                    competition.site_index
                )));
            }
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            crawler: CrawlerConfig::default(),
            site: SiteConfig::default(),
            selectors: PageSelectors::default(),
            storage: StorageConfig::default(),
            logging: LoggingConfig::default(),
            competitions: defaults::competitions(),
        }
    }
}

/// HTTP client and crawling behavior settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlerConfig {
    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,

    /// Delay between requests in milliseconds
    #[serde(default = "defaults::request_delay")]
    pub request_delay_ms: u64,

    /// Retries after the first failed attempt
    #[serde(default = "defaults::max_retries")]
    pub max_retries: u32,

    /// First backoff delay, doubled on every retry
    #[serde(default = "defaults::retry_initial_delay")]
    pub retry_initial_delay_ms: u64,

    /// Upper bound for a single backoff delay
    #[serde(default = "defaults::retry_max_delay")]
    pub retry_max_delay_ms: u64,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
            request_delay_ms: defaults::request_delay(),
            max_retries: defaults::max_retries(),
            retry_initial_delay_ms: defaults::retry_initial_delay(),
            retry_max_delay_ms: defaults::retry_max_delay(),
        }
    }
}

/// Source site settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Site root; history and season paths are resolved against it
    #[serde(default = "defaults::base_url")]
    pub base_url: String,

    /// Kickoff texts marking a match that was never completed
    #[serde(default = "defaults::cancelled_markers")]
    pub cancelled_markers: Vec<String>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::base_url(),
            cancelled_markers: defaults::cancelled_markers(),
        }
    }
}

/// Persistence settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Root directory of the JSON backend
    #[serde(default = "defaults::output_dir")]
    pub output_dir: String,

    /// Environment variable holding the MySQL connection URL
    #[serde(default = "defaults::database_url_env")]
    pub database_url_env: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            output_dir: defaults::output_dir(),
            database_url_env: defaults::database_url_env(),
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default level when `RUST_LOG` is unset
    #[serde(default = "defaults::log_level")]
    pub level: String,

    /// Log one line per season while crawling
    #[serde(default = "defaults::show_progress")]
    pub show_progress: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: defaults::log_level(),
            show_progress: defaults::show_progress(),
        }
    }
}

mod defaults {
    use super::{Competition, CompetitionKind};

    // Crawler defaults
    pub fn user_agent() -> String {
        "Mozilla/5.0 (compatible; soccer-history/0.1)".into()
    }
    pub fn timeout() -> u64 {
        30
    }
    pub fn request_delay() -> u64 {
        250
    }
    pub fn max_retries() -> u32 {
        3
    }
    pub fn retry_initial_delay() -> u64 {
        500
    }
    pub fn retry_max_delay() -> u64 {
        30_000
    }

    // Site defaults
    pub fn base_url() -> String {
        "https://soccer365.ru/".into()
    }
    pub fn cancelled_markers() -> Vec<String> {
        vec![
            "Остановлен".into(),
            "Отменен".into(),
            "Abandoned".into(),
            "Cancelled".into(),
        ]
    }

    // Storage defaults
    pub fn output_dir() -> String {
        "storage".into()
    }
    pub fn database_url_env() -> String {
        "DATABASE_URL".into()
    }

    // Logging defaults
    pub fn log_level() -> String {
        "info".into()
    }
    pub fn show_progress() -> bool {
        true
    }

    fn top_n(site_index: u32, season_count: usize, display_name: &str) -> Competition {
        Competition {
            site_index,
            season_count,
            display_name: display_name.to_string(),
            kind: CompetitionKind::TopN,
            season_label_prefix: false,
            with_fixtures: true,
        }
    }

    // Competition defaults
    pub fn competitions() -> Vec<Competition> {
        vec![
            top_n(19, 68, "лига чемпионов уефа"),
            top_n(24, 17, "чемпионат европы"),
            top_n(742, 22, "чемпионат мира"),
            Competition {
                site_index: 13,
                season_count: 32,
                display_name: "российская премьер лига".to_string(),
                kind: CompetitionKind::Standings,
                season_label_prefix: true,
                with_fixtures: false,
            },
        ]
    }
}
