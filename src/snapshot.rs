use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::ser::PrettyFormatter;
use tracing::info;

use crate::news::NewsItem;

/// On-disk form of a batch. Field order here is the field order in the file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub date: String,
    pub total_items: usize,
    pub news: Vec<NewsItem>,
}

impl Snapshot {
    pub fn new(date: NaiveDate, batch: &[NewsItem]) -> Self {
        Self {
            date: date.format("%Y-%m-%d").to_string(),
            total_items: batch.len(),
            news: batch.to_vec(),
        }
    }

    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let snapshot: Snapshot = serde_json::from_str(&content)?;
        Ok(snapshot)
    }

    fn to_pretty_json(&self) -> anyhow::Result<Vec<u8>> {
        let mut buf = Vec::new();
        let mut serializer =
            serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
        self.serialize(&mut serializer)?;
        Ok(buf)
    }
}

/// Writes snapshots to `<data_root>/<YYYY-MM-DD>/<file_name>`.
pub struct SnapshotWriter {
    data_root: PathBuf,
}

impl SnapshotWriter {
    pub fn new(data_root: impl Into<PathBuf>) -> Self {
        Self {
            data_root: data_root.into(),
        }
    }

    /// Save under today's local date. Any existing file is replaced.
    pub fn save(&self, batch: &[NewsItem], file_name: &str) -> anyhow::Result<PathBuf> {
        self.save_on(Local::now().date_naive(), batch, file_name)
    }

    pub fn save_on(
        &self,
        date: NaiveDate,
        batch: &[NewsItem],
        file_name: &str,
    ) -> anyhow::Result<PathBuf> {
        let snapshot = Snapshot::new(date, batch);

        let dir = self.data_root.join(&snapshot.date);
        std::fs::create_dir_all(&dir)?;

        let path = dir.join(file_name);
        std::fs::write(&path, snapshot.to_pretty_json()?)?;

        info!("Saved {} news items to {}", snapshot.total_items, path.display());
        Ok(path)
    }
}
