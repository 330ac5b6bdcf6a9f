/// Daily birthday reminders
mod clock;
mod manager;
mod types;
mod utils;

pub use clock::{Clock, SystemClock};
#[cfg(test)]
pub use clock::FixedClock;
pub use manager::NotificationScheduler;
pub use types::{Notifier, TickReport};
pub use utils::DailyTrigger;
