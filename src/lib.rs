//! cdnscrape is a Discord bot that collects attachment and CDN links from
//! channel history, then either saves them to a text log or downloads the
//! files into per-extension folders.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use cdnscrape::downloader::DownloaderBuilder;
//! use cdnscrape::extract::{extract_links, Message};
//! use cdnscrape::filter::FormatFilter;
//! use std::path::PathBuf;
//!
//! # #[tokio::main]
//! # async fn main() {
//! let messages = vec![
//!     Message::text("look https://cdn.discordapp.com/attachments/1/2/cat.png"),
//!     Message::attachment("https://cdn.discordapp.com/attachments/1/3/dog.mp4"),
//! ];
//! let links = extract_links(&messages, "discordapp");
//! let links = FormatFilter::new(Some(vec!["png".into()]), vec![]).apply(&links);
//!
//! let downloader = DownloaderBuilder::new()
//!     .directory(PathBuf::from("output_downloaded"))
//!     .build();
//! downloader.download_links(&links).await;
//! # }
//! ```
//!
//! # Module Organization
//!
//! - [`extract`] - Link extraction from message history
//! - [`filter`] - Extension derivation, categories and exclusion filtering
//! - [`download`] - The `Download` struct, summaries and unique file naming
//! - [`downloader`] - The fan-out `Downloader` and its builder
//! - [`log_writer`] - Link log files and output paths
//! - [`pipeline`] - Scrape and download commands over a history source
//! - [`bot`] - Discord command registration and handling
//! - [`config`] - Bot configuration
//! - [`error`] - Centralized error handling with the `Error` enum
//! - [`http`] - HTTP client functionality

pub mod bot;
pub mod config;
pub mod download;
pub mod downloader;
pub mod error;
pub mod extract;
pub mod filter;
pub mod http;
pub mod log_writer;
pub mod pipeline;

pub use config::Config;
pub use download::{Download, Status, Summary};
pub use downloader::{Downloader, DownloaderBuilder};
pub use error::{Error, Result};
pub use extract::{extract_links, Message};
pub use filter::{extension, Category, FormatFilter};
pub use http::{create_http_client, HttpClientConfig};
pub use log_writer::{write_link_log, LogOutcome};
pub use pipeline::{ChannelHistory, ChannelRef, DownloadReport, MessageAmount, Pipeline, ScrapeReport};
