//! Inky News - RSS headlines for a small e-ink panel
//!
//! Pulls a handful of items from several category feeds, drops duplicates,
//! writes dated JSON snapshots and lays a single item out on a 400x300 bitmap.

pub mod aggregator;
pub mod config;
pub mod display;
pub mod fetcher;
pub mod layout;
pub mod news;
pub mod snapshot;
