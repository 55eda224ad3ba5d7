use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use inky_news::aggregator::Aggregator;
use inky_news::config::Config;
use inky_news::display::{compose, BitmapCanvas};
use inky_news::fetcher::Fetcher;
use inky_news::snapshot::SnapshotWriter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "inky_news=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config_path = std::env::args().nth(1).unwrap_or_else(|| "feeds.toml".to_string());
    let config = Config::load(&config_path)?;
    info!(
        "Loaded {} categories from {}",
        config.categories.len(),
        config_path
    );

    let aggregator = Aggregator::new(Fetcher::new()?, config.categories.clone());
    let writer = SnapshotWriter::new(&config.data_dir);

    // All categories, deduplicated
    let all_news = aggregator.fetch_all(config.all_news_max_items).await;
    info!("Total news items: {}", all_news.len());
    writer.save(&all_news, "all_news.json")?;

    // The top category on its own
    let top_news = aggregator
        .fetch_category(&config.top_category, config.max_items)
        .await;
    for item in &top_news {
        info!("{}: {}", item.category, item.title);
    }
    writer.save(&top_news, "top_news.json")?;

    // One item for the panel
    let Some(item) = aggregator.pick_one(config.max_items).await else {
        warn!("No news available, nothing to display");
        return Ok(());
    };
    info!("Picked '{}' ({})", item.title, item.category);
    writer.save(std::slice::from_ref(&item), "random_news.json")?;

    if let Some(display) = &config.display {
        let mut canvas = BitmapCanvas::from_config(display)?;
        compose(&mut canvas, &item, display.accent);
        canvas.save_png(&display.output)?;
    }

    Ok(())
}
