//! Bot configuration.
//!
//! The configuration is read once at startup from a JSON file and then
//! handed to every pipeline call as an explicit value.
//!
//! # Examples
//!
//! ```rust
//! use cdnscrape::config::Config;
//!
//! let config = Config::from_json(r#"{ "token": "abc", "excludeKeywords": ["avatars"] }"#)?;
//! assert_eq!(config.prefix, "!");
//! assert_eq!(config.exclude_keywords, vec!["avatars".to_string()]);
//! # Ok::<(), cdnscrape::Error>(())
//! ```

use crate::filter::Category;
use crate::{Error, Result};

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Environment variable overriding the `token` entry.
pub const TOKEN_ENV: &str = "DISCORD_TOKEN";

/// Default configuration file name.
pub const DEFAULT_CONFIG_PATH: &str = "config.json";

/// Runtime configuration of the bot.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    /// Discord bot token.
    pub token: String,
    /// Legacy text-command prefix.
    pub prefix: String,
    /// Root folder of the link logs.
    pub output_folder: PathBuf,
    /// Root folder of downloaded files.
    pub download_folder: PathBuf,
    pub image_formats: Vec<String>,
    pub audio_formats: Vec<String>,
    pub video_formats: Vec<String>,
    /// Links containing any of these substrings are dropped.
    pub exclude_keywords: Vec<String>,
    /// Substring identifying CDN links inside message text.
    pub cdn_host: String,
    /// Number of simultaneous downloads per command.
    pub concurrent_downloads: usize,
    /// Number of retries per downloaded file.
    pub retries: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            token: String::new(),
            prefix: "!".into(),
            output_folder: PathBuf::from("output"),
            download_folder: PathBuf::from("output_downloaded"),
            image_formats: strings(&["png", "jpg", "jpeg", "gif", "webp"]),
            audio_formats: strings(&["mp3", "wav", "ogg", "flac", "m4a"]),
            video_formats: strings(&["mp4", "webm", "mov", "mkv"]),
            exclude_keywords: Vec::new(),
            cdn_host: "discordapp".into(),
            concurrent_downloads: 1,
            retries: 0,
        }
    }
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

impl Config {
    /// Parses and validates a configuration from a JSON document.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Config = serde_json::from_str(json)?;
        config.normalized().validated()
    }

    /// Loads the configuration file at `path`.
    ///
    /// The `DISCORD_TOKEN` environment variable takes precedence over the
    /// token stored in the file.
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("cannot read {}: {}", path.display(), e))
        })?;
        let mut config: Config = serde_json::from_str(&json)?;
        if let Ok(token) = std::env::var(TOKEN_ENV) {
            if !token.trim().is_empty() {
                config.token = token;
            }
        }
        config.normalized().validated()
    }

    /// The configured extensions of a category, or `None` for
    /// [`Category::All`], which accepts every extension.
    pub fn formats(&self, category: Category) -> Option<&[String]> {
        match category {
            Category::Images => Some(&self.image_formats),
            Category::Audio => Some(&self.audio_formats),
            Category::Videos => Some(&self.video_formats),
            Category::All => None,
        }
    }

    // Extensions are compared against lower-cased URL extensions.
    fn normalized(mut self) -> Self {
        for formats in [
            &mut self.image_formats,
            &mut self.audio_formats,
            &mut self.video_formats,
        ] {
            for format in formats.iter_mut() {
                *format = format.trim().trim_start_matches('.').to_lowercase();
            }
            formats.retain(|f| !f.is_empty());
        }
        self.exclude_keywords.retain(|k| !k.is_empty());
        self.token = self.token.trim().to_string();
        self
    }

    fn validated(self) -> Result<Self> {
        if self.token.is_empty() {
            return Err(Error::Config(format!(
                "missing `token` (or the {} environment variable)",
                TOKEN_ENV
            )));
        }
        if self.concurrent_downloads == 0 {
            return Err(Error::Config(
                "`concurrentDownloads` must be at least 1".into(),
            ));
        }
        if self.cdn_host.is_empty() {
            return Err(Error::Config("`cdnHost` must not be empty".into()));
        }
        Ok(self)
    }
}
