use chrono::{NaiveTime, Timelike};
use chrono_tz::Tz;
use thiserror::Error;

/// Error types for time and timezone settings
#[derive(Debug, Error)]
pub enum TimezoneError {
    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),
    #[error("Invalid time format: {0}")]
    InvalidTime(String),
}

/// Parse an IANA timezone name such as `Europe/Paris`
pub fn parse_timezone(tz_str: &str) -> Result<Tz, TimezoneError> {
    tz_str
        .trim()
        .parse()
        .map_err(|_| TimezoneError::InvalidTimezone(tz_str.to_string()))
}

/// Parse a time string in HH:MM format
pub fn parse_time_string(time_str: &str) -> Result<NaiveTime, TimezoneError> {
    NaiveTime::parse_from_str(time_str.trim(), "%H:%M").map_err(|_| {
        TimezoneError::InvalidTime(format!("Expected HH:MM format, got '{}'", time_str))
    })
}

/// Create a daily cron expression firing at the given wall-clock time
pub fn create_cron_expression(time: NaiveTime) -> String {
    format!("0 {} {} * * *", time.minute(), time.hour())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_time_string() {
        assert_eq!(
            parse_time_string("08:00").unwrap(),
            NaiveTime::from_hms_opt(8, 0, 0).unwrap()
        );
        assert!(parse_time_string("23:59").is_ok());
        assert!(parse_time_string("24:00").is_err());
        assert!(parse_time_string("invalid").is_err());
    }

    #[test]
    fn test_parse_timezone() {
        assert!(parse_timezone("UTC").is_ok());
        assert_eq!(parse_timezone(" Europe/Paris ").unwrap(), chrono_tz::Europe::Paris);
        assert!(matches!(
            parse_timezone("Invalid/Timezone"),
            Err(TimezoneError::InvalidTimezone(_))
        ));
    }

    #[test]
    fn test_create_cron_expression() {
        let time = NaiveTime::from_hms_opt(8, 30, 0).unwrap();
        assert_eq!(create_cron_expression(time), "0 30 8 * * *");
    }
}
