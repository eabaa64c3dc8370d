//! Discord front end: command registration, option handling and replies.
//!
//! - [`commands`] - Slash command definitions and option parsing
//! - [`history`] - Paginated channel history over the REST API

pub mod commands;
pub mod history;

pub use commands::{build_commands, parse_options, CommandKind, CommandOptions};
pub use history::DiscordHistory;

use crate::config::Config;
use crate::pipeline::{ChannelRef, Pipeline};
use crate::{Error, Result};

use chrono::Local;
use serenity::all::{
    ChannelType, Command, CommandInteraction, Context, CreateAttachment, EditInteractionResponse,
    EventHandler, GatewayIntents, GuildId, Interaction, Message, Ready,
};
use serenity::async_trait;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, error, info};

/// Folder name used for commands issued outside a server.
pub const DIRECT_MESSAGES: &str = "direct_messages";

/// Discord's limit on message content length.
const MAX_MESSAGE_LENGTH: usize = 2000;

/// Connects to Discord and serves commands until the gateway stops.
pub async fn run(config: Arc<Config>) -> Result<()> {
    let intents = GatewayIntents::GUILDS
        | GatewayIntents::GUILD_MESSAGES
        | GatewayIntents::DIRECT_MESSAGES
        | GatewayIntents::MESSAGE_CONTENT;

    let mut client = serenity::Client::builder(&config.token, intents)
        .event_handler(Handler::new(config.clone()))
        .await?;

    client.start().await?;
    Ok(())
}

/// Gateway event handler.
pub struct Handler {
    config: Arc<Config>,
}

impl Handler {
    pub fn new(config: Arc<Config>) -> Self {
        Self { config }
    }

    async fn run_command(&self, ctx: &Context, command: &CommandInteraction) -> Result<()> {
        let Some(kind) = CommandKind::from_name(&command.data.name) else {
            return Ok(());
        };
        command.defer(&ctx.http).await?;

        let options = command
            .data
            .options
            .iter()
            .filter_map(|o| o.value.as_str().map(|v| (o.name.as_str(), v)));
        let options = match parse_options(options) {
            Ok(options) => options,
            Err(e) => return reply(ctx, command, &e.to_string(), None).await,
        };
        info!(
            command = kind.name(),
            category = %options.category,
            amount = %options.amount,
            user = %command.user.name,
            "Command received"
        );

        let guild = guild_name(ctx, command.guild_id).await;
        let pipeline = Pipeline::new(self.config.clone(), DiscordHistory::new(ctx.http.clone()));
        let today = Local::now().date_naive();

        if kind.is_server_wide() {
            let Some(guild_id) = command.guild_id else {
                let text = format!("`/{}` can only be used inside a server.", kind.name());
                return reply(ctx, command, &text, None).await;
            };
            let channels = text_channels(ctx, guild_id).await?;

            if kind.is_download() {
                let report = pipeline
                    .download_server(&guild, &channels, options.category, options.amount)
                    .await;
                reply(ctx, command, &report.message(), None).await
            } else {
                let report = pipeline
                    .scrape_server(&guild, &channels, options.category, options.amount, today)
                    .await;
                let first = report.logs.first().map(|l| l.path.as_path());
                reply(ctx, command, &report.message(), first).await
            }
        } else {
            let channel = ChannelRef::new(command.channel_id.get(), channel_name(command));

            if kind.is_download() {
                let report = pipeline
                    .download_channel(&guild, &channel, options.category, options.amount)
                    .await?;
                reply(ctx, command, &report.message(), None).await
            } else {
                let report = pipeline
                    .scrape_channel(&guild, &channel, options.category, options.amount, today)
                    .await?;
                let first = report.logs.first().map(|l| l.path.as_path());
                reply(ctx, command, &report.message(), first).await
            }
        }
    }
}

#[async_trait]
impl EventHandler for Handler {
    async fn ready(&self, ctx: Context, ready: Ready) {
        info!(bot_name = %ready.user.name, guilds = ready.guilds.len(), "Logged in");

        match Command::set_global_commands(&ctx.http, build_commands()).await {
            Ok(registered) => info!(count = registered.len(), "Slash commands registered"),
            Err(error) => error!(%error, "Failed to register slash commands"),
        }
    }

    async fn message(&self, _ctx: Context, message: Message) {
        if message.author.bot || !message.content.starts_with(&self.config.prefix) {
            return;
        }
        debug!(
            author = %message.author.name,
            content = %message.content,
            "Prefix command ignored, use slash commands"
        );
    }

    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        let Interaction::Command(command) = interaction else {
            return;
        };
        if let Err(e) = self.run_command(&ctx, &command).await {
            error!(command = %command.data.name, error = %e, "Command failed");
            let text = format!("`/{}` failed: {}", command.data.name, describe(&e));
            if let Err(e) = reply(&ctx, &command, &text, None).await {
                error!(error = %e, "Could not report command failure");
            }
        }
    }
}

/// Edits the deferred response, optionally attaching a file.
async fn reply(
    ctx: &Context,
    command: &CommandInteraction,
    text: &str,
    attachment: Option<&Path>,
) -> Result<()> {
    let mut response = EditInteractionResponse::new().content(truncate(text, MAX_MESSAGE_LENGTH));
    if let Some(path) = attachment {
        response = response.new_attachment(CreateAttachment::path(path).await?);
    }
    command.edit_response(&ctx.http, response).await?;
    Ok(())
}

fn describe(e: &Error) -> String {
    if e.is_forbidden() {
        "missing permissions to read this channel".to_string()
    } else {
        e.to_string()
    }
}

async fn guild_name(ctx: &Context, guild_id: Option<GuildId>) -> String {
    let Some(guild_id) = guild_id else {
        return DIRECT_MESSAGES.to_string();
    };
    match guild_id.to_partial_guild(&ctx.http).await {
        Ok(guild) => guild.name,
        Err(error) => {
            debug!(%error, %guild_id, "Falling back to the guild id as folder name");
            guild_id.to_string()
        }
    }
}

fn channel_name(command: &CommandInteraction) -> String {
    command
        .channel
        .as_ref()
        .and_then(|c| c.name.clone())
        .unwrap_or_else(|| command.channel_id.to_string())
}

/// Text channels of a server, in their sidebar order.
async fn text_channels(ctx: &Context, guild_id: GuildId) -> Result<Vec<ChannelRef>> {
    let mut channels: Vec<_> = guild_id
        .channels(&ctx.http)
        .await?
        .into_values()
        .filter(|c| matches!(c.kind, ChannelType::Text | ChannelType::News))
        .collect();
    channels.sort_by_key(|c| (c.position, c.id));
    Ok(channels
        .into_iter()
        .map(|c| ChannelRef::new(c.id.get(), c.name))
        .collect())
}

/// Cuts `text` to at most `max` characters.
fn truncate(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((end, _)) => text[..end].to_string(),
        None => text.to_string(),
    }
}
