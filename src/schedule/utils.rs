use chrono::{NaiveDateTime, NaiveTime, TimeZone, Timelike, Utc};
use std::str::FromStr;
use std::time::Duration;

use crate::constants::TICK_PERIOD;
use crate::utils::timezone::create_cron_expression;

/// The daily moment at which reminders go out
#[derive(Clone, Debug)]
pub struct DailyTrigger {
    expression: String,
    schedule: cron::Schedule,
}

impl DailyTrigger {
    pub fn at(time: NaiveTime) -> Result<Self, cron::error::Error> {
        let expression = create_cron_expression(time);
        let schedule = cron::Schedule::from_str(&expression)?;
        Ok(Self {
            expression,
            schedule,
        })
    }

    pub fn expression(&self) -> &str {
        &self.expression
    }

    /// Time from `now` until the next trigger strictly after it.
    ///
    /// `now` is wall-clock time; the cron schedule is evaluated on the same
    /// naive calendar so no offset is applied, including across DST changes.
    /// Sub-second precision is dropped.
    pub fn delay_from(&self, now: NaiveDateTime) -> Duration {
        let now = now.with_nanosecond(0).unwrap_or(now);
        self.schedule
            .after(&Utc.from_utc_datetime(&now))
            .next()
            .and_then(|next| (next.naive_utc() - now).to_std().ok())
            .unwrap_or(TICK_PERIOD)
    }
}
