/// Database modules organized by feature
mod birthday;
mod memory;
mod migrations;
mod owner;

pub use memory::MemoryStore;

use async_trait::async_trait;
use chrono::NaiveDate;
use poise::serenity_prelude::{ChannelId, UserId};
use sqlx::{PgPool, postgres::PgPoolOptions};
use std::time::Duration;
use tracing::info;

use crate::constants::MIN_IDLE_CONNECTIONS;
use crate::error::StoreError;
use crate::models::{BirthdayEntry, Notification};

/// Owner and birthday persistence used by the chat flows and the scheduler.
///
/// Every method must be safe to call concurrently. Reads and deletes are
/// always scoped to the owner passed in, so one owner can never see or
/// remove another owner's entries.
#[async_trait]
pub trait BirthdayStore: Send + Sync {
    /// Create the owner or point it at a new destination. Idempotent.
    async fn upsert_owner(&self, owner: UserId, destination: ChannelId) -> Result<(), StoreError>;

    /// Store a birthday for an existing owner and return its new id
    async fn add_birthday(
        &self,
        owner: UserId,
        person_name: &str,
        birthday: NaiveDate,
    ) -> Result<i64, StoreError>;

    /// All entries of an owner, ordered by (date, id)
    async fn list_by_owner(&self, owner: UserId) -> Result<Vec<BirthdayEntry>, StoreError>;

    /// Delete an entry if it belongs to `owner`. Returns whether a row was removed.
    async fn delete_birthday(&self, owner: UserId, id: i64) -> Result<bool, StoreError>;

    /// One notification per entry whose month and day equal `today`'s,
    /// ordered by destination then entry id
    async fn get_today_notifications(
        &self,
        today: NaiveDate,
    ) -> Result<Vec<Notification>, StoreError>;

    /// Release resources at shutdown
    async fn close(&self) {}
}

/// Database connection pool wrapper
///
/// Handles all database operations for the bot
#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Create a new database connection and run migrations
    pub async fn new(database_url: &str, max_connections: u32) -> Result<Self, sqlx::Error> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(MIN_IDLE_CONNECTIONS.min(max_connections))
            .acquire_timeout(Duration::from_secs(30))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .connect(database_url)
            .await?;

        let db = Self { pool };
        db.run_migrations().await?;

        info!(
            "Database connected and migrations completed (pool size {})",
            max_connections
        );
        Ok(db)
    }

    /// Get a reference to the connection pool (for internal use)
    pub(crate) fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Human readable pool usage
    pub fn pool_stats(&self) -> String {
        let total = self.pool.size();
        let idle = self.pool.num_idle() as u32;
        format!(
            "Active connections: {}, Idle connections: {}, Total connections: {}",
            total.saturating_sub(idle),
            idle,
            total
        )
    }
}

#[async_trait]
impl BirthdayStore for Database {
    async fn upsert_owner(&self, owner: UserId, destination: ChannelId) -> Result<(), StoreError> {
        Database::upsert_owner(self, owner, destination).await
    }

    async fn add_birthday(
        &self,
        owner: UserId,
        person_name: &str,
        birthday: NaiveDate,
    ) -> Result<i64, StoreError> {
        Database::add_birthday(self, owner, person_name, birthday).await
    }

    async fn list_by_owner(&self, owner: UserId) -> Result<Vec<BirthdayEntry>, StoreError> {
        Database::list_by_owner(self, owner).await
    }

    async fn delete_birthday(&self, owner: UserId, id: i64) -> Result<bool, StoreError> {
        Database::delete_birthday(self, owner, id).await
    }

    async fn get_today_notifications(
        &self,
        today: NaiveDate,
    ) -> Result<Vec<Notification>, StoreError> {
        Database::get_today_notifications(self, today).await
    }

    async fn close(&self) {
        info!("Closing database pool. {}", self.pool_stats());
        self.pool.close().await;
        info!("Database connection pool closed");
    }
}
