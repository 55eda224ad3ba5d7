use rand::seq::IndexedRandom;
use rand::Rng;
use tracing::{info, warn};

use crate::config::CategoryConfig;
use crate::fetcher::Fetcher;
use crate::news::{dedup, NewsBatch, NewsItem};

/// A category whose feed could not be turned into items.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceFailure {
    pub category: String,
    pub reason: String,
}

/// Result of one pass over every configured category.
#[derive(Debug, Default)]
pub struct Collection {
    /// Deduplicated items, in category order then feed order
    pub items: NewsBatch,
    pub failures: Vec<SourceFailure>,
}

pub struct Aggregator {
    fetcher: Fetcher,
    categories: Vec<CategoryConfig>,
}

impl Aggregator {
    pub fn new(fetcher: Fetcher, categories: Vec<CategoryConfig>) -> Self {
        Self {
            fetcher,
            categories,
        }
    }

    /// Fetch each category in declared order, one after the other.
    ///
    /// This is where per-source failures stop: a failing category is recorded
    /// and logged, and the remaining categories are still fetched.
    pub async fn collect(&self, max_items: usize) -> Collection {
        let mut all = Vec::new();
        let mut failures = Vec::new();

        for category in &self.categories {
            match self
                .fetcher
                .try_fetch(&category.url, &category.name, max_items)
                .await
            {
                Ok(batch) => all.extend(batch),
                Err(e) => {
                    warn!("Error fetching {}: {}", category.name, e);
                    failures.push(SourceFailure {
                        category: category.name.clone(),
                        reason: e.to_string(),
                    });
                }
            }
        }

        let fetched = all.len();
        let items = dedup(all);
        info!(
            "Collected {} items ({} duplicates dropped, {} categories failed)",
            items.len(),
            fetched - items.len(),
            failures.len()
        );

        Collection { items, failures }
    }

    pub async fn fetch_all(&self, max_items: usize) -> NewsBatch {
        self.collect(max_items).await.items
    }

    /// Fetch a single configured category by its label.
    pub async fn fetch_category(&self, name: &str, max_items: usize) -> NewsBatch {
        match self.categories.iter().find(|c| c.name == name) {
            Some(category) => {
                self.fetcher
                    .fetch(&category.url, &category.name, max_items)
                    .await
            }
            None => {
                warn!("No category named '{}' is configured", name);
                Vec::new()
            }
        }
    }

    /// One item drawn uniformly from everything available, or `None` when
    /// every feed failed or came back empty.
    pub async fn pick_one(&self, max_items: usize) -> Option<NewsItem> {
        let batch = self.fetch_all(max_items).await;
        pick(&batch, &mut rand::rng())
    }
}

pub fn pick<R: Rng + ?Sized>(batch: &[NewsItem], rng: &mut R) -> Option<NewsItem> {
    batch.choose(rng).cloned()
}
