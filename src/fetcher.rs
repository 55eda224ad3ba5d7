use feed_rs::model::{Entry, Feed};
use feed_rs::parser::{self, ParseFeedError};
use reqwest::{Client, StatusCode};
use thiserror::Error;
use tracing::{info, warn};

use crate::news::{NewsBatch, NewsItem};

/// Why a single category produced nothing.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("feed answered with status {0}")]
    Status(StatusCode),
    #[error("malformed feed: {0}")]
    Parse(#[from] ParseFeedError),
    #[error("entry {index} has no {field}")]
    MissingField { index: usize, field: &'static str },
}

pub struct Fetcher {
    client: Client,
}

impl Fetcher {
    pub fn new() -> Result<Self, FetchError> {
        // No timeout override, transport defaults apply
        let client = Client::builder()
            .user_agent("InkyNews/0.1 (RSS Headlines)")
            .build()
            .map_err(FetchError::Client)?;

        Ok(Self { client })
    }

    /// Best-effort fetch: failures are logged and come back as an empty batch.
    pub async fn fetch(&self, endpoint: &str, category: &str, max_items: usize) -> NewsBatch {
        match self.try_fetch(endpoint, category, max_items).await {
            Ok(batch) => batch,
            Err(e) => {
                warn!("Error fetching {}: {}", category, e);
                Vec::new()
            }
        }
    }

    pub async fn try_fetch(
        &self,
        endpoint: &str,
        category: &str,
        max_items: usize,
    ) -> Result<NewsBatch, FetchError> {
        info!("Fetching {} ({})", category, endpoint);

        let response = self.client.get(endpoint).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }
        let bytes = response.bytes().await?;

        let batch = Self::parse_batch(&bytes, category, max_items)?;
        info!("Got {} items for '{}'", batch.len(), category);
        Ok(batch)
    }

    pub fn parse_batch(
        xml_bytes: &[u8],
        category: &str,
        max_items: usize,
    ) -> Result<NewsBatch, FetchError> {
        let feed = parser::parse(xml_bytes)?;
        Self::items_from_feed(feed, category, max_items)
    }

    /// Take the first `max_items` entries in document order. Entries past the
    /// cap are never inspected, so they cannot fail the batch.
    pub fn items_from_feed(
        feed: Feed,
        category: &str,
        max_items: usize,
    ) -> Result<NewsBatch, FetchError> {
        feed.entries
            .into_iter()
            .take(max_items)
            .enumerate()
            .map(|(index, entry)| Self::item_from_entry(index, entry, category))
            .collect()
    }

    fn item_from_entry(index: usize, entry: Entry, category: &str) -> Result<NewsItem, FetchError> {
        let title = entry
            .title
            .map(|t| t.content)
            .ok_or(FetchError::MissingField { index, field: "title" })?;

        // RSS <description> lands in `summary`; Atom feeds may only carry content
        let description = entry
            .summary
            .map(|s| s.content)
            .or_else(|| entry.content.and_then(|c| c.body))
            .ok_or(FetchError::MissingField {
                index,
                field: "description",
            })?;

        Ok(NewsItem::new(title, description, category))
    }
}
