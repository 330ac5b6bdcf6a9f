use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{Instant, interval_at, timeout};
use tracing::{error, info, warn};

use super::{Clock, DailyTrigger, Notifier, TickReport};
use crate::constants::{SCHEDULER_STOP_TIMEOUT, TICK_PERIOD};
use crate::database::BirthdayStore;
use crate::error::SchedulerTickError;
use crate::utils::message_formatter::build_birthday_notification;

/// Sends today's reminders once a day at the trigger time
pub struct NotificationScheduler {
    store: Arc<dyn BirthdayStore>,
    notifier: Arc<dyn Notifier>,
    clock: Arc<dyn Clock>,
    trigger: DailyTrigger,
}

impl NotificationScheduler {
    pub fn new(
        store: Arc<dyn BirthdayStore>,
        notifier: Arc<dyn Notifier>,
        clock: Arc<dyn Clock>,
        trigger: DailyTrigger,
    ) -> Self {
        Self {
            store,
            notifier,
            clock,
            trigger,
        }
    }

    /// Spawn the daily loop. The scheduler can only be started once.
    pub fn start(self) -> SchedulerHandle {
        let (stop_tx, mut stop_rx) = watch::channel(false);
        let delay = self.trigger.delay_from(self.clock.now());

        info!(
            "Notification scheduler started (cron: '{}'), first check in {} minutes",
            self.trigger.expression(),
            delay.as_secs() / 60
        );

        let task = tokio::spawn(async move {
            let mut ticks = interval_at(Instant::now() + delay, TICK_PERIOD);

            loop {
                tokio::select! {
                    _ = ticks.tick() => {
                        match self.run_tick().await {
                            Ok(report) => info!(
                                "Birthday check for {} done: {} sent, {} failed",
                                report.date, report.sent, report.failed
                            ),
                            Err(e) => error!("Birthday check failed: {}", e),
                        }
                    }
                    // Also fires when the handle is dropped
                    _ = stop_rx.changed() => break,
                }
            }

            info!("Notification scheduler stopped");
        });

        SchedulerHandle { stop_tx, task }
    }

    /// Look up today's birthdays and send one reminder per entry.
    ///
    /// A failed send is logged and counted; the rest of the batch still goes out.
    pub async fn run_tick(&self) -> Result<TickReport, SchedulerTickError> {
        let today = self.clock.today();
        let notifications = self.store.get_today_notifications(today).await?;

        let mut report = TickReport {
            date: today,
            sent: 0,
            failed: 0,
        };

        if notifications.is_empty() {
            info!("No birthdays found for {}", today);
            return Ok(report);
        }

        info!("Found {} birthday(s) for {}", notifications.len(), today);

        for notification in notifications {
            let text = build_birthday_notification(&notification.person_name);
            match self.notifier.notify(notification.destination, &text).await {
                Ok(()) => report.sent += 1,
                Err(e) => {
                    warn!(
                        "Failed to send reminder to channel {}: {}",
                        notification.destination, e
                    );
                    report.failed += 1;
                }
            }
        }

        Ok(report)
    }
}

/// A running scheduler
pub struct SchedulerHandle {
    stop_tx: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl SchedulerHandle {
    /// Ask the loop to finish, waiting a bounded time for a check in progress
    pub async fn stop(self) {
        // Err means the loop has already exited
        let _ = self.stop_tx.send(true);

        let abort = self.task.abort_handle();
        match timeout(SCHEDULER_STOP_TIMEOUT, self.task).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => error!("Notification scheduler task failed: {}", e),
            Err(_) => {
                warn!(
                    "Notification scheduler did not stop within {:?}, aborting",
                    SCHEDULER_STOP_TIMEOUT
                );
                abort.abort();
            }
        }
    }
}
