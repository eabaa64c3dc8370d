//! Core download description.
//!
//! A [`Download`] is a scraped link resolved into a parsed URL, the file
//! name taken from its last path segment and the extension that decides
//! which bucket folder it lands in.

use super::naming::sanitize_component;
use crate::error::Error;
use crate::filter::extension;

use percent_encoding::percent_decode_str;
use reqwest::Url;
use std::convert::TryFrom;

/// Bucket folder for links whose file name carries no extension.
pub const NO_EXTENSION_FOLDER: &str = "other";

/// Represents a file to be downloaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Download {
    /// URL of the file to download.
    pub url: Url,
    /// File name used to save the file on disk.
    pub filename: String,
    /// Lower-cased extension of the URL path, empty when there is none.
    pub extension: String,
}

impl Download {
    /// Creates a new [`Download`] with an explicit file name.
    ///
    /// When using [`Download::try_from`], the file name is extracted from
    /// the URL instead.
    pub fn new(url: &Url, filename: &str) -> Self {
        Self {
            url: url.clone(),
            filename: String::from(filename),
            extension: extension(url.as_str()),
        }
    }

    /// Name of the bucket folder this download is written to.
    pub fn folder(&self) -> &str {
        if self.extension.is_empty() {
            NO_EXTENSION_FOLDER
        } else {
            &self.extension
        }
    }
}

impl TryFrom<&Url> for Download {
    type Error = crate::error::Error;

    fn try_from(value: &Url) -> Result<Self, Self::Error> {
        value
            .path_segments()
            .ok_or_else(|| {
                Error::InvalidUrl(format!(
                    "The url \"{}\" does not contain a valid path",
                    value
                ))
            })?
            .next_back()
            .filter(|segment| !segment.is_empty())
            .map(|filename| Download {
                url: value.clone(),
                // The decoded segment must stay a single component of the bucket folder.
                filename: sanitize_component(&percent_decode_str(filename).decode_utf8_lossy()),
                extension: extension(value.as_str()),
            })
            .ok_or_else(|| {
                Error::InvalidUrl(format!("The url \"{}\" does not contain a filename", value))
            })
    }
}

impl TryFrom<&str> for Download {
    type Error = crate::error::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Url::parse(value)
            .map_err(|e| {
                Error::InvalidUrl(format!("The url \"{}\" cannot be parsed: {}", value, e))
            })
            .and_then(|u| Download::try_from(&u))
    }
}
