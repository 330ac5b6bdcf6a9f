use poise::serenity_prelude::UserId;
use thiserror::Error;

/// Malformed user input. Always recoverable, the conversation is reset.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("date '{0}' is not in DD.MM.YYYY format")]
    DateFormat(String),
    #[error("date '{0}' does not exist in the calendar")]
    CalendarDate(String),
    #[error("'{0}' is not an entry id")]
    NotAnId(String),
    #[error("person name must not be empty")]
    EmptyName,
}

/// Failures reported by a [`crate::database::BirthdayStore`]
#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("owner {0} is not registered")]
    UnknownOwner(UserId),
    #[error("database error: {0}")]
    Persistence(#[from] sqlx::Error),
}

/// Outcome of a failed conversation step
#[derive(Debug, Error)]
pub enum ConversationError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// Either the entry does not exist or it belongs to someone else.
    /// Both cases map to this variant.
    #[error("entry {0} not found")]
    NotFound(i64),
    #[error(transparent)]
    Persistence(#[from] StoreError),
}

/// A birthday check that could not run at all
#[derive(Debug, Error)]
pub enum SchedulerTickError {
    #[error("failed to load today's notifications: {0}")]
    Query(#[from] StoreError),
}

#[derive(Debug, Error)]
pub enum GreetingError {
    #[error("greeting request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("greeting service answered with status {0}")]
    Status(reqwest::StatusCode),
    #[error("greeting service returned no text")]
    Empty,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} environment variable not set. Set it with: export {0}=...")]
    Missing(&'static str),
    #[error("invalid value for {name}: {reason}")]
    Invalid { name: &'static str, reason: String },
}
