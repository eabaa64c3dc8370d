//! Configuration structures and defaults for the downloader.

use crate::download::Summary;

use std::env::current_dir;
use std::sync::Arc;

/// Callback type for download completion events
pub type DownloadCallback = Box<dyn Fn(&Summary) + Send + Sync>;

/// Configuration structure for the downloader
#[derive(Clone)]
pub struct DownloaderConfig {
    /// Root folder; one sub-folder per extension is created below it.
    pub directory: std::path::PathBuf,
    /// Number of retries per downloaded file.
    pub retries: u32,
    /// Number of maximum concurrent downloads.
    pub concurrent_downloads: usize,
    /// Callback for when each download completes.
    pub on_complete: Option<Arc<DownloadCallback>>,
}

impl std::fmt::Debug for DownloaderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DownloaderConfig")
            .field("directory", &self.directory)
            .field("retries", &self.retries)
            .field("concurrent_downloads", &self.concurrent_downloads)
            .field("on_complete", &self.on_complete.is_some())
            .finish()
    }
}

impl Default for DownloaderConfig {
    fn default() -> Self {
        Self {
            directory: current_dir().unwrap_or_default(),
            retries: 0,
            concurrent_downloads: 1,
            on_complete: None,
        }
    }
}
