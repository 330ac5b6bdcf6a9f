use chrono::{Local, NaiveDate, NaiveDateTime, Utc};
use chrono_tz::Tz;

/// Source of the bot's notion of "now", in wall-clock time
pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;

    fn today(&self) -> NaiveDate {
        self.now().date()
    }
}

/// Reads the system time, in the configured timezone or the process's local one.
///
/// Scheduling works on this naive wall clock. Across a DST change the daily
/// check shifts by the offset (the first delay is measured on the calendar and
/// later checks follow a fixed 24 h period) until the bot restarts.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock {
    timezone: Option<Tz>,
}

impl SystemClock {
    pub fn new(timezone: Option<Tz>) -> Self {
        Self { timezone }
    }
}

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        match self.timezone {
            Some(tz) => Utc::now().with_timezone(&tz).naive_local(),
            None => Local::now().naive_local(),
        }
    }
}

#[cfg(test)]
pub struct FixedClock(pub NaiveDateTime);

#[cfg(test)]
impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_clock_today() {
        let now = NaiveDate::from_ymd_opt(2025, 3, 5)
            .unwrap()
            .and_hms_opt(23, 59, 0)
            .unwrap();
        assert_eq!(FixedClock(now).today(), NaiveDate::from_ymd_opt(2025, 3, 5).unwrap());
    }

    #[test]
    fn test_zoned_clock_differs_from_utc_by_offset() {
        let utc = SystemClock::new(Some(chrono_tz::UTC)).now();
        let tokyo = SystemClock::new(Some(chrono_tz::Asia::Tokyo)).now();
        let offset = (tokyo - utc).num_minutes();
        // Tokyo has no DST; allow for the two reads straddling a minute
        assert!((539..=541).contains(&offset), "offset was {}", offset);
    }
}
