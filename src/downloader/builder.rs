//! Builder pattern implementation for creating Downloader instances.
//!
//! # Examples
//!
//! ```rust
//! use cdnscrape::downloader::DownloaderBuilder;
//! use cdnscrape::download::Status;
//! use std::path::PathBuf;
//!
//! let downloader = DownloaderBuilder::new()
//!     .directory(PathBuf::from("output_downloaded/guild/channel"))
//!     .concurrent_downloads(4)
//!     .on_complete(|summary| {
//!         if let Status::Fail(reason) = summary.status() {
//!             eprintln!("{}: {}", summary.download().url, reason);
//!         }
//!     })
//!     .build();
//! ```

use super::{config::DownloaderConfig, downloader::Downloader};
use crate::config::Config;
use crate::download::Summary;

use std::{path::PathBuf, sync::Arc};

/// A builder used to create a [`Downloader`].
#[derive(Default)]
pub struct DownloaderBuilder {
    config: DownloaderConfig,
}

impl DownloaderBuilder {
    /// Creates a builder with the default options.
    pub fn new() -> Self {
        DownloaderBuilder::default()
    }

    /// Creates a builder carrying the retry and concurrency settings of the
    /// bot configuration.
    pub fn from_config(config: &Config) -> Self {
        DownloaderBuilder::new()
            .retries(config.retries)
            .concurrent_downloads(config.concurrent_downloads)
    }

    /// Sets the root folder of the extension buckets.
    pub fn directory(mut self, directory: PathBuf) -> Self {
        self.config.directory = directory;
        self
    }

    /// Set the number of retries per download.
    pub fn retries(mut self, retries: u32) -> Self {
        self.config.retries = retries;
        self
    }

    /// Set the number of concurrent downloads. Zero is treated as one.
    pub fn concurrent_downloads(mut self, concurrent_downloads: usize) -> Self {
        self.config.concurrent_downloads = concurrent_downloads.max(1);
        self
    }

    /// Set callback for when each download completes, successfully or not.
    pub fn on_complete<F>(mut self, callback: F) -> Self
    where
        F: Fn(&Summary) + Send + Sync + 'static,
    {
        self.config.on_complete = Some(Arc::new(Box::new(callback)));
        self
    }

    /// Create the [`Downloader`] with the specified options.
    pub fn build(self) -> Downloader {
        Downloader::new(self.config)
    }
}
