//! Slash command definitions and option parsing.

use crate::filter::Category;
use crate::pipeline::MessageAmount;
use crate::Result;

use serenity::all::{CommandOptionType, CreateCommand, CreateCommandOption};

pub const FILE_TYPES_OPTION: &str = "file_types";
pub const MESSAGE_AMOUNT_OPTION: &str = "message_amount";

/// The commands the bot answers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    Scrape,
    ServerWideScrape,
    Download,
    ServerWideDownload,
}

impl CommandKind {
    pub const ALL: [CommandKind; 4] = [
        CommandKind::Scrape,
        CommandKind::ServerWideScrape,
        CommandKind::Download,
        CommandKind::ServerWideDownload,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            CommandKind::Scrape => "scrape",
            CommandKind::ServerWideScrape => "serverwidescrape",
            CommandKind::Download => "download",
            CommandKind::ServerWideDownload => "serverwidedownload",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        CommandKind::ALL.into_iter().find(|k| k.name() == name)
    }

    pub fn description(&self) -> &'static str {
        match self {
            CommandKind::Scrape => "Scrape attachment links from this channel",
            CommandKind::ServerWideScrape => "Scrape attachment links from every channel of this server",
            CommandKind::Download => "Download attachments from this channel",
            CommandKind::ServerWideDownload => "Download attachments from every channel of this server",
        }
    }

    pub fn is_server_wide(&self) -> bool {
        matches!(self, CommandKind::ServerWideScrape | CommandKind::ServerWideDownload)
    }

    pub fn is_download(&self) -> bool {
        matches!(self, CommandKind::Download | CommandKind::ServerWideDownload)
    }

    /// Registration payload of the command.
    pub fn create(&self) -> CreateCommand {
        let mut file_types = CreateCommandOption::new(
            CommandOptionType::String,
            FILE_TYPES_OPTION,
            "The files types to scrape",
        )
        .required(false);
        for category in Category::ALL {
            file_types = file_types.add_string_choice(category.as_str(), category.as_str());
        }

        let message_amount = CreateCommandOption::new(
            CommandOptionType::String,
            MESSAGE_AMOUNT_OPTION,
            "The amount of messages to scrape (\"all\" or a number)",
        )
        .required(false);

        CreateCommand::new(self.name())
            .description(self.description())
            .add_option(file_types)
            .add_option(message_amount)
    }
}

/// Registration payloads of every command.
pub fn build_commands() -> Vec<CreateCommand> {
    CommandKind::ALL.iter().map(|k| k.create()).collect()
}

/// Parsed command options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CommandOptions {
    pub category: Category,
    pub amount: MessageAmount,
}

/// Parses `(name, value)` option pairs; missing options keep their defaults
/// and unknown ones are ignored.
pub fn parse_options<'a>(options: impl IntoIterator<Item = (&'a str, &'a str)>) -> Result<CommandOptions> {
    let mut parsed = CommandOptions::default();
    for (name, value) in options {
        match name {
            FILE_TYPES_OPTION => parsed.category = value.parse()?,
            MESSAGE_AMOUNT_OPTION => parsed.amount = value.parse()?,
            _ => {}
        }
    }
    Ok(parsed)
}
