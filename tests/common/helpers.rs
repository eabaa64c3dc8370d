#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use cdnscrape::{ChannelHistory, ChannelRef, Config, Error, Message, MessageAmount};

// Common test constants
pub const TEST_GUILD: &str = "Test Guild";
pub const TEST_CDN: &str = "https://cdn.discordapp.com/attachments/111/222";

/// Creates a temporary directory for testing purposes
pub fn create_temp_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temporary directory")
}

/// Creates a temporary file with the given content
pub fn create_temp_file(dir: &Path, filename: &str, content: &[u8]) -> PathBuf {
    fs::create_dir_all(dir).expect("Failed to create directory");
    let file_path = dir.join(filename);
    fs::write(&file_path, content).expect("Failed to write temporary file");
    file_path
}

/// A CDN link for `filename`
pub fn cdn_link(filename: &str) -> String {
    format!("{}/{}", TEST_CDN, filename)
}

/// Asserts that a file exists and holds `expected`
pub fn assert_file_content(path: &Path, expected: &[u8]) {
    let content = fs::read(path).unwrap_or_else(|_| panic!("File should exist at path: {:?}", path));
    assert_eq!(content, expected, "File content mismatch at path: {:?}", path);
}

/// Sorted file names of a folder
pub fn list_files(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap_or_else(|_| panic!("Folder should exist: {:?}", dir))
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

/// A configuration writing below `root`
pub fn create_test_config(root: &Path) -> Arc<Config> {
    Arc::new(Config {
        token: "test-token".into(),
        output_folder: root.join("output"),
        download_folder: root.join("output_downloaded"),
        image_formats: vec!["png".into(), "jpg".into()],
        audio_formats: vec!["mp3".into()],
        video_formats: vec!["mp4".into()],
        exclude_keywords: vec!["avatars".into()],
        ..Config::default()
    })
}

// === Mock HTTP Helpers ===

/// Serves `body` at `route` with status 200
pub async fn mount_file(server: &MockServer, route: &str, body: &[u8]) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(body.to_vec()))
        .mount(server)
        .await;
}

/// Serves an empty response with `status` at `route`
pub async fn mount_status(server: &MockServer, route: &str, status: u16) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(status))
        .mount(server)
        .await;
}

// === History Helpers ===

/// In-memory history: messages per channel id, stored oldest first.
#[derive(Default)]
pub struct FakeHistory {
    channels: HashMap<u64, Vec<Message>>,
    failing: HashSet<u64>,
}

impl FakeHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_channel(mut self, id: u64, messages: Vec<Message>) -> Self {
        self.channels.insert(id, messages);
        self
    }

    /// Any fetch of `id` fails.
    pub fn with_failing_channel(mut self, id: u64) -> Self {
        self.failing.insert(id);
        self
    }
}

impl ChannelHistory for FakeHistory {
    async fn fetch(&self, channel: &ChannelRef, amount: MessageAmount) -> cdnscrape::Result<Vec<Message>> {
        if self.failing.contains(&channel.id) {
            return Err(Error::Internal(format!("cannot read {}", channel.name)));
        }
        let messages = self.channels.get(&channel.id).cloned().unwrap_or_default();
        // Keep the most recent messages, like the platform does.
        let skip = amount
            .limit()
            .map(|limit| messages.len().saturating_sub(limit))
            .unwrap_or(0);
        Ok(messages.into_iter().skip(skip).collect())
    }
}
