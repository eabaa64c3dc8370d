//! Download summary functionality.
//!
//! This module contains the [`Summary`] struct and [`Status`] enum for tracking
//! the outcome of each link handed to the downloader.

use super::download::Download;
use reqwest::StatusCode;
use std::path::{Path, PathBuf};

/// Download status enumeration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    /// Download failed with error message
    Fail(String),
    /// Download not yet started
    NotStarted,
    /// Download completed successfully
    Success,
}

/// Represents a [`Download`] summary.
#[derive(Debug, Clone)]
pub struct Summary {
    /// Downloaded item.
    download: Download,
    /// HTTP status code.
    statuscode: StatusCode,
    /// Bytes written to disk.
    size: u64,
    /// Status.
    status: Status,
    /// Where the file was written.
    path: Option<PathBuf>,
}

impl Summary {
    /// Create a new [`Download`] [`Summary`].
    pub fn new(download: Download, statuscode: StatusCode, size: u64) -> Self {
        Self {
            download,
            statuscode,
            size,
            status: Status::NotStarted,
            path: None,
        }
    }

    /// Attach a status to a [`Download`] [`Summary`].
    pub fn with_status(self, status: Status) -> Self {
        Self { status, ..self }
    }

    /// Attach the resolved destination path.
    pub fn with_path(self, path: PathBuf) -> Self {
        Self {
            path: Some(path),
            ..self
        }
    }

    /// Get the summary's HTTP status code.
    pub fn statuscode(&self) -> StatusCode {
        self.statuscode
    }

    /// Get the summary's size.
    pub fn size(&self) -> u64 {
        self.size
    }

    /// Get a reference to the summary's download.
    pub fn download(&self) -> &Download {
        &self.download
    }

    /// Get a reference to the summary's status.
    pub fn status(&self) -> &Status {
        &self.status
    }

    /// Get the path the file was written to, if any.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn is_success(&self) -> bool {
        self.status == Status::Success
    }

    /// Mark the summary as failed with a message.
    pub fn fail(self, msg: impl std::fmt::Display) -> Self {
        Self {
            status: Status::Fail(format!("{}", msg)),
            ..self
        }
    }
}
