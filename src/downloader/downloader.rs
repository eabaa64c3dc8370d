//! Core downloader implementation with fetch logic.

use super::config::DownloaderConfig;
use crate::download::{create_unique, Download, Status, Summary};
use crate::http::{create_http_client, HttpClientConfig};

use futures::stream::{self, StreamExt};
use reqwest::StatusCode;
use reqwest_middleware::ClientWithMiddleware;
use std::fmt;
use std::fmt::Debug;
use std::path::{Path, PathBuf};
use tokio::{fs, io::AsyncWriteExt};
use tracing::{debug, info, warn};

/// Links sharing one extension, in first-seen order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bucket {
    /// Folder name of the bucket (the extension, or `other`).
    pub folder: String,
    pub downloads: Vec<Download>,
}

/// Groups downloads by bucket folder.
///
/// Buckets appear in the order their extension was first seen, and each
/// bucket keeps the relative order of its downloads.
pub fn partition(downloads: &[Download]) -> Vec<Bucket> {
    let mut buckets: Vec<Bucket> = Vec::new();
    for download in downloads {
        match buckets.iter_mut().find(|b| b.folder == download.folder()) {
            Some(bucket) => bucket.downloads.push(download.clone()),
            None => buckets.push(Bucket {
                folder: download.folder().to_string(),
                downloads: vec![download.clone()],
            }),
        }
    }
    buckets
}

/// Represents the download controller.
///
/// ```rust
/// use cdnscrape::downloader::DownloaderBuilder;
///
/// let d = DownloaderBuilder::new().build();
/// assert_eq!(d.concurrent_downloads(), 1);
/// ```
#[derive(Clone)]
pub struct Downloader {
    config: DownloaderConfig,
}

impl Debug for Downloader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Downloader")
            .field("config", &self.config)
            .finish()
    }
}

impl Downloader {
    /// Creates a new Downloader with the given configuration.
    pub(crate) fn new(config: DownloaderConfig) -> Self {
        Self { config }
    }

    /// Gets the root folder of the buckets.
    pub fn directory(&self) -> &PathBuf {
        &self.config.directory
    }

    /// Gets the number of retries per download.
    pub fn retries(&self) -> u32 {
        self.config.retries
    }

    /// Gets the number of concurrent downloads.
    pub fn concurrent_downloads(&self) -> usize {
        self.config.concurrent_downloads
    }

    /// Parses `links` and downloads them.
    ///
    /// Links that cannot be turned into a [`Download`] are logged and left
    /// out of the returned summaries.
    pub async fn download_links(&self, links: &[String]) -> Vec<Summary> {
        let downloads: Vec<Download> = links
            .iter()
            .filter_map(|link| match Download::try_from(link.as_str()) {
                Ok(d) => Some(d),
                Err(e) => {
                    warn!(%link, error = %e, "Skipping link");
                    None
                }
            })
            .collect();
        self.download(&downloads).await
    }

    /// Downloads every file into its bucket folder.
    ///
    /// Summaries are returned bucket by bucket, in the order of [`partition`].
    pub async fn download(&self, downloads: &[Download]) -> Vec<Summary> {
        let client = match create_http_client(HttpClientConfig {
            retries: self.config.retries,
            ..HttpClientConfig::default()
        }) {
            Ok(client) => client,
            Err(e) => {
                return downloads
                    .iter()
                    .map(|d| self.failed(d, StatusCode::INTERNAL_SERVER_ERROR, &e))
                    .collect();
            }
        };

        let mut jobs: Vec<(Download, PathBuf)> = Vec::with_capacity(downloads.len());
        let mut summaries = Vec::new();

        // Every bucket folder exists before the first request goes out.
        for bucket in partition(downloads) {
            let dir = self.config.directory.join(&bucket.folder);
            debug!("Creating bucket directory {:?}", dir);
            match fs::create_dir_all(&dir).await {
                Ok(()) => jobs.extend(bucket.downloads.into_iter().map(|d| (d, dir.clone()))),
                Err(e) => summaries.extend(
                    bucket
                        .downloads
                        .iter()
                        .map(|d| self.failed(d, StatusCode::INTERNAL_SERVER_ERROR, &e)),
                ),
            }
        }

        let fetches: Vec<_> = jobs
            .iter()
            .map(|(d, dir)| self.fetch(&client, d, dir))
            .collect();
        let fetched = stream::iter(fetches)
            .buffered(self.config.concurrent_downloads.max(1))
            .collect::<Vec<_>>()
            .await;
        summaries.extend(fetched);

        let succeeded = summaries.iter().filter(|s| s.is_success()).count();
        info!(
            succeeded,
            failed = summaries.len() - succeeded,
            directory = %self.config.directory.display(),
            "Download batch finished"
        );

        summaries
    }

    /// Fetches one file and writes it to a fresh path inside `dir`.
    async fn fetch(&self, client: &ClientWithMiddleware, download: &Download, dir: &Path) -> Summary {
        debug!("Fetching {}", &download.url);
        let res = match client.get(download.url.as_str()).send().await {
            Ok(res) => res,
            Err(e) => return self.failed(download, StatusCode::BAD_REQUEST, &e),
        };

        let status = res.status();
        if status != StatusCode::OK {
            return self.failed(download, status, &format!("HTTP {}", status));
        }

        let (output, mut file) = match create_unique(dir, &download.filename).await {
            Ok(created) => created,
            Err(e) => return self.failed(download, status, &e),
        };
        debug!("Writing {} to {:?}", &download.url, &output);

        let mut size: u64 = 0;
        let mut stream = res.bytes_stream();
        while let Some(item) = stream.next().await {
            let written = match item {
                Ok(mut chunk) => {
                    size += chunk.len() as u64;
                    file.write_all_buf(&mut chunk).await.map_err(|e| e.to_string())
                }
                Err(e) => Err(e.to_string()),
            };
            if let Err(e) = written {
                drop(file);
                // Never leave a truncated file behind.
                if let Err(remove_error) = fs::remove_file(&output).await {
                    warn!(path = ?output, error = %remove_error, "Could not remove partial file");
                }
                return self.failed(download, status, &e);
            }
        }
        if let Err(e) = file.flush().await {
            return self.failed(download, status, &e);
        }

        info!(url = %download.url, path = ?output, size, "Downloaded");
        let summary = Summary::new(download.clone(), status, size)
            .with_path(output)
            .with_status(Status::Success);
        self.notify(&summary);
        summary
    }

    fn failed(&self, download: &Download, statuscode: StatusCode, error: &dyn fmt::Display) -> Summary {
        warn!(url = %download.url, %error, "Download failed");
        let summary = Summary::new(download.clone(), statuscode, 0).fail(error);
        self.notify(&summary);
        summary
    }

    fn notify(&self, summary: &Summary) {
        if let Some(ref callback) = self.config.on_complete {
            callback(summary);
        }
    }
}
