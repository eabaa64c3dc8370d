//! The scrape and download pipelines.
//!
//! Each command runs one linear pass: fetch history, extract links, filter
//! them, then either write a link log or download the files. Server-wide
//! commands repeat the pass per channel; a channel that fails is logged and
//! skipped without stopping the others. Channels of one server that share a
//! folder name are written to `{name}_{id}` instead.
//!
//! # Examples
//!
//! ```rust
//! use cdnscrape::config::Config;
//! use cdnscrape::extract::Message;
//! use cdnscrape::filter::Category;
//! use cdnscrape::pipeline::{ChannelHistory, ChannelRef, MessageAmount, Pipeline};
//! use std::sync::Arc;
//!
//! struct Fixed(Vec<Message>);
//!
//! impl ChannelHistory for Fixed {
//!     async fn fetch(&self, _: &ChannelRef, _: MessageAmount) -> cdnscrape::Result<Vec<Message>> {
//!         Ok(self.0.clone())
//!     }
//! }
//!
//! # async fn example() -> cdnscrape::Result<()> {
//! let config = Arc::new(Config::from_json(r#"{ "token": "t" }"#)?);
//! let history = Fixed(vec![Message::text("https://cdn.discordapp.com/x/a.png")]);
//! let pipeline = Pipeline::new(config, history);
//!
//! let links = pipeline
//!     .collect_links(&ChannelRef::new(1, "general"), Category::Images, MessageAmount::All)
//!     .await?;
//! assert_eq!(links.len(), 1);
//! # Ok(())
//! # }
//! ```

pub mod history;
pub mod report;

pub use history::{ChannelHistory, ChannelRef, MessageAmount};
pub use report::{ChannelLog, DownloadReport, ScrapeReport};

use crate::config::Config;
use crate::downloader::DownloaderBuilder;
use crate::extract::extract_links;
use crate::filter::{Category, FormatFilter};
use crate::download::sanitize_component;
use crate::log_writer::{channel_dir, log_file_name, write_link_log, LogOutcome};
use crate::{Error, Result};

use chrono::NaiveDate;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{error, info, warn};

/// Runs commands against a history source with an explicit configuration.
#[derive(Debug, Clone)]
pub struct Pipeline<H> {
    config: Arc<Config>,
    history: H,
}

impl<H: ChannelHistory> Pipeline<H> {
    pub fn new(config: Arc<Config>, history: H) -> Self {
        Self { config, history }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn history(&self) -> &H {
        &self.history
    }

    /// Fetches `channel`'s history and returns the filtered links, oldest first.
    pub async fn collect_links(
        &self,
        channel: &ChannelRef,
        category: Category,
        amount: MessageAmount,
    ) -> Result<Vec<String>> {
        info!(channel = %channel.name, %amount, "Fetching messages...");
        let messages = self.history.fetch(channel, amount).await?;
        let links = extract_links(&messages, &self.config.cdn_host);
        let filtered = FormatFilter::for_category(&self.config, category).apply(&links);
        info!(
            channel = %channel.name,
            messages = messages.len(),
            found = links.len(),
            kept = filtered.len(),
            %category,
            "Links filtered"
        );
        Ok(filtered)
    }

    /// Scrapes one channel into `{outputFolder}/{guild}/{channel}/`.
    pub async fn scrape_channel(
        &self,
        guild: &str,
        channel: &ChannelRef,
        category: Category,
        amount: MessageAmount,
        date: NaiveDate,
    ) -> Result<ScrapeReport> {
        let mut report = ScrapeReport::default();
        if let Some(log) = self
            .scrape_one(guild, channel, &channel.name, category, amount, date)
            .await?
        {
            report.logs.push(log);
        }
        Ok(report)
    }

    /// Scrapes every channel in `channels`, one log per channel with links.
    pub async fn scrape_server(
        &self,
        guild: &str,
        channels: &[ChannelRef],
        category: Category,
        amount: MessageAmount,
        date: NaiveDate,
    ) -> ScrapeReport {
        let mut report = ScrapeReport::default();
        for (channel, folder) in channels.iter().zip(channel_folders(channels)) {
            match self
                .scrape_one(guild, channel, &folder, category, amount, date)
                .await
            {
                Ok(Some(log)) => report.logs.push(log),
                Ok(None) => {}
                Err(e) => {
                    skip_channel(channel, &e);
                    report.skipped.push(channel.name.clone());
                }
            }
        }
        info!(
            guild,
            logs = report.logs.len(),
            total = report.total_links(),
            skipped = report.skipped.len(),
            "Server-wide scrape completed"
        );
        report
    }

    /// Downloads one channel's files into `{downloadFolder}/{guild}/{channel}/{ext}/`.
    pub async fn download_channel(
        &self,
        guild: &str,
        channel: &ChannelRef,
        category: Category,
        amount: MessageAmount,
    ) -> Result<DownloadReport> {
        let directory = channel_dir(&self.config.download_folder, guild, &channel.name);
        let mut report = DownloadReport::new(directory);
        self.download_one(guild, channel, &channel.name, category, amount, &mut report)
            .await?;
        Ok(report)
    }

    /// Downloads every channel in `channels`, each into its own folder.
    pub async fn download_server(
        &self,
        guild: &str,
        channels: &[ChannelRef],
        category: Category,
        amount: MessageAmount,
    ) -> DownloadReport {
        let directory = self.config.download_folder.join(sanitize_component(guild));
        let mut report = DownloadReport::new(directory);
        for (channel, folder) in channels.iter().zip(channel_folders(channels)) {
            if let Err(e) = self
                .download_one(guild, channel, &folder, category, amount, &mut report)
                .await
            {
                skip_channel(channel, &e);
                report.skipped.push(channel.name.clone());
            }
        }
        report
    }

    async fn scrape_one(
        &self,
        guild: &str,
        channel: &ChannelRef,
        folder: &str,
        category: Category,
        amount: MessageAmount,
        date: NaiveDate,
    ) -> Result<Option<ChannelLog>> {
        let links = self.collect_links(channel, category, amount).await?;
        let path = channel_dir(&self.config.output_folder, guild, folder)
            .join(log_file_name(date, category));
        match write_link_log(&links, &path).await? {
            LogOutcome::Written { path, count } => Ok(Some(ChannelLog {
                channel: channel.name.clone(),
                path,
                count,
            })),
            LogOutcome::NoLinks => Ok(None),
        }
    }

    async fn download_one(
        &self,
        guild: &str,
        channel: &ChannelRef,
        folder: &str,
        category: Category,
        amount: MessageAmount,
        report: &mut DownloadReport,
    ) -> Result<()> {
        let links = self.collect_links(channel, category, amount).await?;
        if links.is_empty() {
            return Ok(());
        }

        let downloader = DownloaderBuilder::from_config(&self.config)
            .directory(channel_dir(&self.config.download_folder, guild, folder))
            .build();
        let summaries = downloader.download_links(&links).await;
        let succeeded = summaries.iter().filter(|s| s.is_success()).count();

        // Links that never became a download count as failures too.
        report.succeeded += succeeded;
        report.failed += links.len() - succeeded;
        Ok(())
    }
}

/// Folder name per channel: the channel name, or `{name}_{id}` when another
/// channel in `channels` maps to the same folder.
fn channel_folders(channels: &[ChannelRef]) -> Vec<String> {
    let mut seen: HashMap<String, usize> = HashMap::new();
    for channel in channels {
        *seen.entry(sanitize_component(&channel.name)).or_default() += 1;
    }
    channels
        .iter()
        .map(|channel| match seen.get(&sanitize_component(&channel.name)) {
            Some(&count) if count > 1 => format!("{}_{}", channel.name, channel.id),
            _ => channel.name.clone(),
        })
        .collect()
}

fn skip_channel(channel: &ChannelRef, e: &Error) {
    if e.is_forbidden() {
        warn!(channel = %channel.name, "Missing permissions to read channel, skipping");
    } else {
        error!(channel = %channel.name, error = %e, "Error while processing channel, skipping");
    }
}
