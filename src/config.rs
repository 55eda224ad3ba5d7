use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Maximum number of entries taken from each category feed
    #[serde(default = "default_max_items")]
    pub max_items: usize,
    /// Per-category cap for the combined `all_news.json` run
    #[serde(default = "default_all_news_max_items")]
    pub all_news_max_items: usize,
    /// Root directory for dated snapshot folders
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Category saved on its own as `top_news.json`
    #[serde(default = "default_top_category")]
    pub top_category: String,
    /// Ordered category list; order decides which copy survives deduplication
    pub categories: Vec<CategoryConfig>,
    #[serde(default)]
    pub display: Option<DisplayConfig>,
}

fn default_max_items() -> usize {
    3
}

fn default_all_news_max_items() -> usize {
    6
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

fn default_top_category() -> String {
    "Top News".to_string()
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct CategoryConfig {
    pub name: String,
    pub url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DisplayConfig {
    #[serde(default)]
    pub accent: Accent,
    /// Face used for the category label
    pub label_font: PathBuf,
    /// Face used for title and description
    pub body_font: PathBuf,
    #[serde(default = "default_output")]
    pub output: PathBuf,
}

fn default_output() -> PathBuf {
    PathBuf::from("news.png")
}

/// Tone of the category label. Black when unset, red for unknown names.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(from = "String")]
pub enum Accent {
    #[default]
    Black,
    Yellow,
    Red,
}

impl From<String> for Accent {
    fn from(name: String) -> Self {
        match name.to_lowercase().as_str() {
            "black" => Accent::Black,
            "yellow" => Accent::Yellow,
            _ => Accent::Red,
        }
    }
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Parse config from a TOML string (useful for testing)
    pub fn from_str(content: &str) -> anyhow::Result<Self> {
        let config: Config = toml::from_str(content)?;
        Ok(config)
    }
}
