use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// A single headline as pulled from one category feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsItem {
    pub title: String,
    pub description: String,
    pub category: String,
}

/// Items in feed order, possibly spanning several categories.
pub type NewsBatch = Vec<NewsItem>;

impl NewsItem {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            category: category.into(),
        }
    }
}

/// Drop later copies of the same `(title, description)` pair.
///
/// The category is not part of the key, so a story carried by two feeds keeps
/// the label of whichever feed came first.
pub fn dedup(batch: NewsBatch) -> NewsBatch {
    let mut seen = HashSet::new();
    batch
        .into_iter()
        .filter(|item| seen.insert((item.title.clone(), item.description.clone())))
        .collect()
}
