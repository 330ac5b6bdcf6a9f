use poise::serenity_prelude::{self as serenity, Message};
use tracing::{debug, error};

use crate::commands::{Command, CommandRouter, InboundMessage};
use crate::models::Data;

/// Route a text message to the birthday commands and dialogs, then post the replies
pub async fn handle_message(ctx: &serenity::Context, message: &Message, data: &Data) {
    if message.author.bot {
        return;
    }

    let display_name = message
        .author
        .global_name
        .as_deref()
        .unwrap_or(message.author.name.as_str());

    // Greeting generation can take a while
    if Command::parse(&message.content) == Some(Command::Congratulate)
        && let Err(e) = message.channel_id.broadcast_typing(&ctx.http).await
    {
        debug!("Failed to show typing in channel {}: {}", message.channel_id, e);
    }

    let replies = CommandRouter::new(data)
        .handle(InboundMessage {
            owner: message.author.id,
            destination: message.channel_id,
            display_name,
            text: &message.content,
        })
        .await;

    for reply in replies {
        if let Err(e) = message.channel_id.say(ctx, reply).await {
            error!(
                "Failed to reply to {} in channel {}: {}",
                message.author.id, message.channel_id, e
            );
        }
    }
}
