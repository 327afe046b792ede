//! HTTP client utilities.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use scraper::Html;

use crate::error::{AppError, Result};
use crate::models::CrawlerConfig;
use crate::utils::retry::{RetryPolicy, retry};

/// Source of page bodies.
///
/// The crawler only depends on this trait, so pages can come from the
/// network or from memory in tests.
#[async_trait]
pub trait DocumentFetcher: Send + Sync {
    /// Fetch the body of `url` as text.
    async fn fetch_text(&self, url: &str) -> Result<String>;
}

/// Fetch a page, parse it as HTML and hand it to `read`.
///
/// The parsed document never lives across an await point, so callers stay
/// `Send`.
pub async fn read_document<T>(
    fetcher: &dyn DocumentFetcher,
    url: &str,
    read: impl FnOnce(&Html) -> T,
) -> Result<T> {
    let text = fetcher.fetch_text(url).await?;
    let document = Html::parse_document(&text);
    Ok(read(&document))
}

/// Create a configured asynchronous HTTP client.
pub fn create_async_client(config: &CrawlerConfig) -> Result<reqwest::Client> {
    let client = reqwest::Client::builder()
        .user_agent(&config.user_agent)
        .timeout(Duration::from_secs(config.timeout_secs))
        .build()?;
    Ok(client)
}

/// Network fetcher with retries and a politeness delay between requests.
pub struct HttpFetcher {
    client: reqwest::Client,
    retry: RetryPolicy,
    request_delay: Duration,
}

impl HttpFetcher {
    pub fn new(config: &CrawlerConfig) -> Result<Self> {
        Ok(Self {
            client: create_async_client(config)?,
            retry: RetryPolicy::from_config(config),
            request_delay: Duration::from_millis(config.request_delay_ms),
        })
    }

    async fn get_once(&self, url: &str) -> Result<String> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(AppError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        Ok(response.text().await?)
    }
}

#[async_trait]
impl DocumentFetcher for HttpFetcher {
    async fn fetch_text(&self, url: &str) -> Result<String> {
        if !self.request_delay.is_zero() {
            tokio::time::sleep(self.request_delay).await;
        }
        log::debug!("GET {url}");
        retry(&self.retry, url, || self.get_once(url)).await
    }
}

/// In-memory fetcher keyed by absolute URL.
#[derive(Debug, Clone, Default)]
pub struct StaticFetcher {
    pages: HashMap<String, String>,
}

impl StaticFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a page body for `url`.
    pub fn with_page(mut self, url: impl Into<String>, body: impl Into<String>) -> Self {
        self.pages.insert(url.into(), body.into());
        self
    }
}

#[async_trait]
impl DocumentFetcher for StaticFetcher {
    async fn fetch_text(&self, url: &str) -> Result<String> {
        self.pages.get(url).cloned().ok_or_else(|| AppError::Status {
            url: url.to_string(),
            status: 404,
        })
    }
}
