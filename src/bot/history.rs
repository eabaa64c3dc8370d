//! Channel history read through the Discord REST API.

use crate::extract::Message;
use crate::pipeline::{ChannelHistory, ChannelRef, MessageAmount};
use crate::{Error, Result};

use serenity::all::{ChannelId, GetMessages, Http};
use std::future::Future;
use std::sync::Arc;
use tracing::debug;

/// Maximum page size accepted by Discord.
const PAGE_SIZE: usize = 100;

/// [`ChannelHistory`] backed by serenity's HTTP client.
#[derive(Clone)]
pub struct DiscordHistory {
    http: Arc<Http>,
}

impl DiscordHistory {
    pub fn new(http: Arc<Http>) -> Self {
        Self { http }
    }
}

impl ChannelHistory for DiscordHistory {
    async fn fetch(&self, channel: &ChannelRef, amount: MessageAmount) -> Result<Vec<Message>> {
        let channel_id = ChannelId::new(channel.id);
        let http: &Http = &self.http;

        let messages = read_pages(
            amount.limit(),
            |message: &serenity::all::Message| message.id,
            |wanted, before| {
                let mut builder = GetMessages::new().limit(wanted as u8);
                if let Some(id) = before {
                    builder = builder.before(id);
                }
                async move { channel_id.messages(http, builder).await.map_err(Error::from) }
            },
        )
        .await?;
        debug!(channel = %channel.name, fetched = messages.len(), "Fetched history");

        Ok(messages.iter().map(Message::from).collect())
    }
}

/// Drains a newest-first paged source and returns at most `limit` items,
/// oldest first.
///
/// `fetch_page` receives the page size to request and the cursor of the
/// oldest item seen so far. Paging stops at the cap, on an empty page, or on
/// a page shorter than requested.
pub(crate) async fn read_pages<T, C, K, F, Fut>(
    limit: Option<usize>,
    cursor: K,
    mut fetch_page: F,
) -> Result<Vec<T>>
where
    C: Copy,
    K: Fn(&T) -> C,
    F: FnMut(usize, Option<C>) -> Fut,
    Fut: Future<Output = Result<Vec<T>>>,
{
    let mut collected: Vec<T> = Vec::new();
    let mut before: Option<C> = None;

    loop {
        let wanted = match limit {
            Some(limit) if collected.len() >= limit => break,
            Some(limit) => (limit - collected.len()).min(PAGE_SIZE),
            None => PAGE_SIZE,
        };

        let mut page = fetch_page(wanted, before).await?;
        page.truncate(wanted);
        let Some(oldest) = page.last() else {
            break;
        };
        before = Some(cursor(oldest));
        let exhausted = page.len() < wanted;
        collected.extend(page);

        if exhausted {
            break;
        }
    }

    collected.reverse();
    Ok(collected)
}
