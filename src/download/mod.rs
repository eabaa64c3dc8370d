//! Download module containing download-related functionality.
//!
//! This module provides the per-link [`Download`] description, the
//! [`Summary`] reported for each attempted link, and the collision-free
//! file naming used when writing into a bucket folder.
//!
//! # Overview
//!
//! - [`download`] - Core Download struct and URL handling
//! - [`summary`] - Download result tracking and status reporting
//! - [`naming`] - Unique file path resolution (`name.ext`, `name_1.ext`, ...)
//!
//! # Examples
//!
//! ```rust
//! use cdnscrape::download::{Download, Status, Summary};
//! use reqwest::StatusCode;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let download = Download::try_from("https://cdn.discordapp.com/attachments/1/2/cat.PNG?ex=9")?;
//! assert_eq!(download.filename, "cat.PNG");
//! assert_eq!(download.extension, "png");
//!
//! let summary = Summary::new(download, StatusCode::NOT_FOUND, 0).fail("HTTP 404");
//! assert!(matches!(summary.status(), Status::Fail(_)));
//! # Ok(())
//! # }
//! ```

pub mod download;
pub mod naming;
pub mod summary;

pub use download::Download;
pub use naming::{candidate_name, create_unique, sanitize_component};
pub use summary::{Status, Summary};
