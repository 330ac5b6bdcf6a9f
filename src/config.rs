use chrono::NaiveTime;
use chrono_tz::Tz;
use tracing::{info, warn};

use crate::constants::{DEFAULT_GREETING_MODEL, DEFAULT_MAX_CONNECTIONS, DEFAULT_NOTIFY_TIME};
use crate::error::ConfigError;
use crate::utils::timezone::{parse_time_string, parse_timezone};

/// Configuration loaded from environment variables
#[derive(Clone)]
pub struct Config {
    pub discord_token: String,
    /// Without it birthdays are kept in memory only
    pub database_url: Option<String>,
    pub database_max_connections: u32,
    /// Wall-clock time of the daily birthday check
    pub notify_time: NaiveTime,
    /// Zone for "today" and the check time; the process's local zone when unset
    pub timezone: Option<Tz>,
    pub hf_api_token: Option<String>,
    pub hf_model: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build the configuration from any variable source. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let discord_token = var("DISCORD_TOKEN").ok_or(ConfigError::Missing("DISCORD_TOKEN"))?;

        let database_url = var("DATABASE_URL");
        if database_url.is_none() {
            warn!("DATABASE_URL not set, birthdays will be kept in memory only");
        }

        let database_max_connections = match var("DATABASE_MAX_CONNECTIONS") {
            Some(value) => value
                .trim()
                .parse::<u32>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or_else(|| ConfigError::Invalid {
                    name: "DATABASE_MAX_CONNECTIONS",
                    reason: format!("expected a positive number, got '{}'", value),
                })?,
            None => DEFAULT_MAX_CONNECTIONS,
        };

        let notify_time = var("NOTIFY_TIME")
            .as_deref()
            .map(parse_time_string)
            .unwrap_or_else(|| parse_time_string(DEFAULT_NOTIFY_TIME))
            .map_err(|e| ConfigError::Invalid {
                name: "NOTIFY_TIME",
                reason: e.to_string(),
            })?;

        let timezone = var("BOT_TIMEZONE")
            .as_deref()
            .map(parse_timezone)
            .transpose()
            .map_err(|e| ConfigError::Invalid {
                name: "BOT_TIMEZONE",
                reason: e.to_string(),
            })?;

        let hf_api_token = var("HF_API_TOKEN");
        if hf_api_token.is_none() {
            info!("HF_API_TOKEN not set, greetings will use the built-in phrase");
        }

        Ok(Config {
            discord_token,
            database_url,
            database_max_connections,
            notify_time,
            timezone,
            hf_api_token,
            hf_model: var("HF_MODEL").unwrap_or_else(|| DEFAULT_GREETING_MODEL.to_string()),
        })
    }
}
