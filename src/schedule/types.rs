use async_trait::async_trait;
use chrono::NaiveDate;
use poise::serenity_prelude::ChannelId;

use crate::models::Error;

/// Delivers a reminder text to a destination
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, destination: ChannelId, text: &str) -> Result<(), Error>;
}

/// What a single birthday check did
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TickReport {
    pub date: NaiveDate,
    pub sent: usize,
    pub failed: usize,
}
