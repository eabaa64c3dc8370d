//! Message history access.

use crate::extract::Message;
use crate::{Error, Result};

use std::fmt;
use std::future::Future;
use std::num::NonZeroUsize;
use std::str::FromStr;

/// How many messages to read from a channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MessageAmount {
    #[default]
    All,
    Limit(NonZeroUsize),
}

impl MessageAmount {
    /// The cap as a plain number, `None` meaning unbounded.
    pub fn limit(&self) -> Option<usize> {
        match self {
            MessageAmount::All => None,
            MessageAmount::Limit(n) => Some(n.get()),
        }
    }
}

impl FromStr for MessageAmount {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("all") {
            return Ok(MessageAmount::All);
        }
        s.parse::<NonZeroUsize>()
            .map(MessageAmount::Limit)
            .map_err(|_| {
                Error::invalid_option(
                    "message_amount",
                    format!("\"{}\" is neither \"all\" nor a positive integer", s),
                )
            })
    }
}

impl fmt::Display for MessageAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessageAmount::All => f.write_str("all"),
            MessageAmount::Limit(n) => write!(f, "{}", n),
        }
    }
}

/// A channel to read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelRef {
    pub id: u64,
    pub name: String,
}

impl ChannelRef {
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// Source of channel message history.
pub trait ChannelHistory: Send + Sync {
    /// Returns up to `amount` of the most recent messages of `channel`,
    /// ordered oldest first.
    fn fetch(
        &self,
        channel: &ChannelRef,
        amount: MessageAmount,
    ) -> impl Future<Output = Result<Vec<Message>>> + Send;
}
