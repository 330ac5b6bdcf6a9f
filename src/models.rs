use chrono::NaiveDate;
use poise::serenity_prelude::{ChannelId, UserId};
use std::sync::Arc;

use crate::constants::DATE_FORMAT;
use crate::conversation::Conversations;
use crate::database::BirthdayStore;
use crate::schedule::Clock;
use crate::services::Greeter;

/// One remembered birthday, owned by the user who registered it
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BirthdayEntry {
    pub id: i64,
    pub owner_id: UserId,
    pub person_name: String,
    /// Only month and day matter for reminders
    pub birthday: NaiveDate,
}

impl BirthdayEntry {
    /// Format the date the way users type it (DD.MM.YYYY)
    pub fn formatted_date(&self) -> String {
        self.birthday.format(DATE_FORMAT).to_string()
    }
}

/// A reminder to deliver today: where to send it and whom it is about
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notification {
    pub destination: ChannelId,
    pub person_name: String,
}

/// Bot state shared across all handlers
#[derive(Clone)]
pub struct Data {
    /// Birthday persistence
    pub store: Arc<dyn BirthdayStore>,
    /// Per-owner multi-step dialog state
    pub conversations: Arc<Conversations>,
    /// Celebratory phrase generator
    pub greeter: Arc<dyn Greeter>,
    pub clock: Arc<dyn Clock>,
}

impl Data {
    pub fn new(
        store: Arc<dyn BirthdayStore>,
        greeter: Arc<dyn Greeter>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            store,
            conversations: Arc::new(Conversations::new()),
            greeter,
            clock,
        }
    }
}

pub type Error = Box<dyn std::error::Error + Send + Sync>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_formatted_date_pads_day_and_month() {
        let entry = BirthdayEntry {
            id: 1,
            owner_id: UserId::new(42),
            person_name: "Ann".to_string(),
            birthday: NaiveDate::from_ymd_opt(1990, 3, 5).unwrap(),
        };
        assert_eq!(entry.formatted_date(), "05.03.1990");
    }
}
