use std::time::Duration;

/// Default time of day for the birthday check (HH:MM, local time)
pub const DEFAULT_NOTIFY_TIME: &str = "09:00";

/// Period between two birthday checks
pub const TICK_PERIOD: Duration = Duration::from_secs(24 * 60 * 60);

/// How long `stop()` waits for an in-flight check before abandoning it
pub const SCHEDULER_STOP_TIMEOUT: Duration = Duration::from_secs(5);

/// Default size of the database connection pool
pub const DEFAULT_MAX_CONNECTIONS: u32 = 10;

/// Idle connections kept open in the pool
pub const MIN_IDLE_CONNECTIONS: u32 = 2;

/// Window used by /upcomingBirthdays
pub const UPCOMING_WINDOW_DAYS: i64 = 30;

/// Date format accepted from and shown to users
pub const DATE_FORMAT: &str = "%d.%m.%Y";

/// Default HuggingFace model used for greetings
pub const DEFAULT_GREETING_MODEL: &str = "microsoft/DialoGPT-large";

/// Log directive for the application
pub const LOG_DIRECTIVE: &str = "birthday_bot=info";

/// Longest person name stored (matches the column width)
pub const MAX_PERSON_NAME_LENGTH: usize = 255;
