use async_trait::async_trait;
use poise::serenity_prelude::{ChannelId, Http};
use std::sync::Arc;

use crate::models::Error;
use crate::schedule::Notifier;

/// Posts reminders into Discord channels
pub struct DiscordNotifier {
    http: Arc<Http>,
}

impl DiscordNotifier {
    pub fn new(http: Arc<Http>) -> Self {
        Self { http }
    }
}

#[async_trait]
impl Notifier for DiscordNotifier {
    async fn notify(&self, destination: ChannelId, text: &str) -> Result<(), Error> {
        destination.say(&self.http, text).await?;
        Ok(())
    }
}
