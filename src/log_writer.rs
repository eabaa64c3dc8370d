//! Text logs of scraped links.

use crate::download::sanitize_component;
use crate::filter::Category;
use crate::Result;

use chrono::NaiveDate;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{info, warn};

/// Result of [`write_link_log`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogOutcome {
    /// The log was written with `count` entries.
    Written { path: PathBuf, count: usize },
    /// Nothing to write; no file was created.
    NoLinks,
}

/// Renders the log body: each link quoted, entries separated by a blank line.
pub fn render_links(links: &[String]) -> String {
    links
        .iter()
        .map(|link| format!("\"{}\"", link))
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Writes `links` to `path`, creating parent folders as needed.
pub async fn write_link_log(links: &[String], path: &Path) -> Result<LogOutcome> {
    if links.is_empty() {
        warn!("Scrape completed but no links were found.");
        return Ok(LogOutcome::NoLinks);
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).await?;
    }
    fs::write(path, render_links(links)).await?;

    info!(path = %path.display(), total = links.len(), "Scrape completed and links saved");
    Ok(LogOutcome::Written {
        path: path.to_path_buf(),
        count: links.len(),
    })
}

/// `scrape_links_{date}[_{type}].txt`; the type suffix is omitted for [`Category::All`].
pub fn log_file_name(date: NaiveDate, category: Category) -> String {
    match category {
        Category::All => format!("scrape_links_{}.txt", date.format("%Y-%m-%d")),
        other => format!("scrape_links_{}_{}.txt", date.format("%Y-%m-%d"), other),
    }
}

/// `{root}/{guild}/{channel}`, each name sanitised.
pub fn channel_dir(root: &Path, guild: &str, channel: &str) -> PathBuf {
    root.join(sanitize_component(guild))
        .join(sanitize_component(channel))
}
