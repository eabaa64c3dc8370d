//! Command outcomes and the reply text derived from them.

use std::path::PathBuf;

/// A link log written for one channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelLog {
    pub channel: String,
    pub path: PathBuf,
    pub count: usize,
}

/// Outcome of a scrape command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScrapeReport {
    /// Logs written, in channel order.
    pub logs: Vec<ChannelLog>,
    /// Channels that could not be read.
    pub skipped: Vec<String>,
}

impl ScrapeReport {
    pub fn total_links(&self) -> usize {
        self.logs.iter().map(|l| l.count).sum()
    }

    /// Reply shown to the user.
    pub fn message(&self) -> String {
        let mut text = match self.logs.as_slice() {
            [] => "Scrape completed but no links were found.".to_string(),
            [log] => format!(
                "Scrape completed and links saved to `{}`. Total links found: {}",
                log.path.display(),
                log.count
            ),
            logs => format!(
                "Scrape completed and links saved to {} files. Total links found: {}",
                logs.len(),
                self.total_links()
            ),
        };
        if !self.skipped.is_empty() {
            text.push_str(&format!(" Skipped channels: {}.", self.skipped.join(", ")));
        }
        text
    }
}

/// Outcome of a download command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DownloadReport {
    /// Root folder the files were written under.
    pub directory: PathBuf,
    pub succeeded: usize,
    pub failed: usize,
    pub skipped: Vec<String>,
}

impl DownloadReport {
    pub fn new(directory: PathBuf) -> Self {
        Self {
            directory,
            ..Self::default()
        }
    }

    /// Reply shown to the user.
    pub fn message(&self) -> String {
        let mut text = if self.succeeded + self.failed == 0 {
            "Download completed but no links were found.".to_string()
        } else {
            format!(
                "Download completed. {} file(s) saved to `{}`, {} failed.",
                self.succeeded,
                self.directory.display(),
                self.failed
            )
        };
        if !self.skipped.is_empty() {
            text.push_str(&format!(" Skipped channels: {}.", self.skipped.join(", ")));
        }
        text
    }
}
