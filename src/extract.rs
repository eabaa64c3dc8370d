//! Link extraction from message history.

use tracing::info;

/// A chat message as seen by the extractor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Message {
    /// Text body.
    pub content: String,
    /// URLs of the attached files.
    pub attachments: Vec<String>,
}

impl Message {
    pub fn new(content: impl Into<String>, attachments: Vec<String>) -> Self {
        Self {
            content: content.into(),
            attachments,
        }
    }

    /// A message with a text body only.
    pub fn text(content: impl Into<String>) -> Self {
        Self::new(content, Vec::new())
    }

    /// A message with a single attachment and no text.
    pub fn attachment(url: impl Into<String>) -> Self {
        Self::new(String::new(), vec![url.into()])
    }
}

impl From<&serenity::model::channel::Message> for Message {
    fn from(message: &serenity::model::channel::Message) -> Self {
        Self {
            content: message.content.clone(),
            attachments: message.attachments.iter().map(|a| a.url.clone()).collect(),
        }
    }
}

/// Collects links from `messages`, which must be ordered oldest first.
///
/// Within a message, whitespace-separated tokens containing `cdn_host` come
/// first, followed by the attachment URLs.
pub fn extract_links(messages: &[Message], cdn_host: &str) -> Vec<String> {
    let mut links = Vec::new();

    for message in messages {
        for token in message.content.split_whitespace() {
            if token.contains(cdn_host) {
                links.push(token.to_string());
                info!(link = token, total = links.len(), "Found link");
            }
        }

        for url in &message.attachments {
            links.push(url.clone());
            info!(attachment = %url, total = links.len(), "Found attachment");
        }
    }

    links
}
