//! Error handling for cdnscrape.
//!
//! This module provides the centralized error type for everything that can
//! abort an operation: configuration loading, option parsing, filesystem
//! access, HTTP and Discord calls. Individual link download failures are
//! not errors; they are reported through [`crate::download::Status::Fail`].

use std::io;
use thiserror::Error;

/// Errors that can happen when using cdnscrape.
#[derive(Error, Debug)]
pub enum Error {
    /// Error from an underlying system.
    ///
    /// This variant captures internal errors that don't fit into other categories.
    #[error("Internal error: {0}")]
    Internal(String),

    /// The configuration file is missing a required value or holds an invalid one.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Error from the underlying URL parser or the expected URL format.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// A command option could not be interpreted.
    #[error("Invalid option `{name}`: {reason}")]
    InvalidOption { name: String, reason: String },

    /// I/O Error.
    ///
    /// This variant wraps standard I/O errors that can occur during file operations,
    /// such as creating folders, writing link logs or downloaded files.
    #[error("I/O error")]
    IOError {
        #[from]
        source: io::Error,
    },

    /// The configuration file is not valid JSON.
    #[error("JSON error")]
    Json {
        #[from]
        source: serde_json::Error,
    },

    /// Error from the Reqwest library.
    #[error("Reqwest Error")]
    Reqwest {
        #[from]
        source: reqwest::Error,
    },

    /// Error from the HTTP middleware stack.
    #[error("HTTP middleware error")]
    Middleware {
        #[from]
        source: reqwest_middleware::Error,
    },

    /// Error returned by the Discord client.
    #[error("Discord error")]
    Discord {
        #[from]
        source: serenity::Error,
    },
}

impl Error {
    /// Shorthand for [`Error::InvalidOption`].
    pub fn invalid_option(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidOption {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Whether this error comes from a missing Discord permission.
    ///
    /// Server-wide commands use it to tell a channel the bot cannot read
    /// apart from an unexpected failure.
    pub fn is_forbidden(&self) -> bool {
        match self {
            Error::Discord {
                source: serenity::Error::Http(http_error),
            } => http_error.status_code().map(|code| code.as_u16()) == Some(403),
            _ => false,
        }
    }
}

/// Result type alias for operations that can fail with a cdnscrape error.
pub type Result<T> = std::result::Result<T, Error>;
