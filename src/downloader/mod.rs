//! Fan-out downloader: buckets links by extension and writes each file to a
//! collision-free path inside its bucket folder.
//!
//! - `downloader` - Core Downloader struct with the fetch logic
//! - `builder` - DownloaderBuilder for configuration
//! - `config` - Configuration structures and callback types
//!
//! # Examples
//!
//! ```rust,no_run
//! use cdnscrape::downloader::DownloaderBuilder;
//! use std::path::PathBuf;
//!
//! # async fn example() {
//! let downloader = DownloaderBuilder::new()
//!     .directory(PathBuf::from("output_downloaded/my-guild/general"))
//!     .build();
//!
//! let links = vec![
//!     "https://cdn.discordapp.com/attachments/1/2/pic.jpg".to_string(),
//!     "https://cdn.discordapp.com/attachments/1/3/clip.mp4".to_string(),
//! ];
//! // Writes jpg/pic.jpg and mp4/clip.mp4 below the directory.
//! let summaries = downloader.download_links(&links).await;
//! # }
//! ```

pub mod builder;
pub mod config;
pub mod downloader;

pub use builder::DownloaderBuilder;
pub use config::{DownloadCallback, DownloaderConfig};
pub use downloader::{partition, Bucket, Downloader};
