//! File-type classification and link filtering.
//!
//! [`extension`] is the single place where a link's file extension is
//! derived; the filter, the downloader buckets and the file naming all go
//! through it.
//!
//! # Examples
//!
//! ```rust
//! use cdnscrape::filter::{extension, Category, FormatFilter};
//!
//! assert_eq!(extension("https://cdn.discordapp.com/a/B.PNG?ex=1"), "png");
//!
//! let filter = FormatFilter::new(None, vec!["avatars".into()]);
//! let kept = filter.apply(&[
//!     "https://cdn.discordapp.com/x/a.png".to_string(),
//!     "https://cdn.discordapp.com/avatars/b.png".to_string(),
//! ]);
//! assert_eq!(kept, vec!["https://cdn.discordapp.com/x/a.png".to_string()]);
//! ```

use crate::config::Config;
use crate::Error;

use reqwest::Url;
use std::fmt;
use std::str::FromStr;

/// A named file-type bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Category {
    Images,
    Audio,
    Videos,
    #[default]
    All,
}

impl Category {
    /// Every category, in the order offered to users.
    pub const ALL: [Category; 4] = [
        Category::Images,
        Category::Audio,
        Category::Videos,
        Category::All,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Images => "images",
            Category::Audio => "audio",
            Category::Videos => "videos",
            Category::All => "all",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                Error::invalid_option(
                    "file_types",
                    format!("unknown category \"{}\", expected images, audio, videos or all", s),
                )
            })
    }
}

/// Returns the lower-cased extension of the last path segment of `link`.
///
/// Query strings and fragments are ignored. A segment without a `.` yields
/// an empty string.
pub fn extension(link: &str) -> String {
    let segment = last_path_segment(link);
    match segment.rsplit_once('.') {
        Some((_, ext)) => ext.to_lowercase(),
        None => String::new(),
    }
}

/// Returns the raw (still percent-encoded) last path segment of `link`.
pub(crate) fn last_path_segment(link: &str) -> String {
    let path = match Url::parse(link) {
        Ok(url) => url.path().to_string(),
        // Bare tokens such as `cdn.discordapp.com/x/a.png` are not absolute URLs.
        Err(_) => link
            .split(['?', '#'])
            .next()
            .unwrap_or_default()
            .to_string(),
    };
    path.rsplit('/').next().unwrap_or_default().to_string()
}

/// Narrows a link list by file type and exclusion substrings.
#[derive(Debug, Clone, Default)]
pub struct FormatFilter {
    /// Accepted extensions; `None` accepts any extension.
    formats: Option<Vec<String>>,
    exclude_keywords: Vec<String>,
}

impl FormatFilter {
    /// Creates a filter from an explicit extension set and exclusion list.
    pub fn new(formats: Option<Vec<String>>, exclude_keywords: Vec<String>) -> Self {
        let formats = formats.map(|f| f.into_iter().map(|e| e.to_lowercase()).collect());
        Self {
            formats,
            exclude_keywords,
        }
    }

    /// Creates the filter for `category` using the configured extension lists.
    pub fn for_category(config: &Config, category: Category) -> Self {
        Self::new(
            config.formats(category).map(|f| f.to_vec()),
            config.exclude_keywords.clone(),
        )
    }

    /// Whether `link` survives both the extension and the exclusion checks.
    pub fn accepts(&self, link: &str) -> bool {
        if let Some(ref formats) = self.formats {
            let ext = extension(link);
            if !formats.iter().any(|f| *f == ext) {
                return false;
            }
        }
        !self
            .exclude_keywords
            .iter()
            .any(|keyword| link.contains(keyword.as_str()))
    }

    /// Returns the accepted links, in input order.
    pub fn apply(&self, links: &[String]) -> Vec<String> {
        links
            .iter()
            .filter(|link| self.accepts(link))
            .cloned()
            .collect()
    }
}
