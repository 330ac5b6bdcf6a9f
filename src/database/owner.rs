use super::Database;
use poise::serenity_prelude::{ChannelId, UserId};

use crate::error::StoreError;

impl Database {
    /// Save an owner, or move its reminders to the channel it last wrote in
    pub async fn upsert_owner(
        &self,
        owner: UserId,
        destination: ChannelId,
    ) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO owners (owner_id, notify_destination, updated_at)
            VALUES ($1, $2, NOW())
            ON CONFLICT (owner_id)
            DO UPDATE SET
                notify_destination = $2,
                updated_at = NOW()
            "#,
        )
        .bind(owner.get() as i64)
        .bind(destination.get() as i64)
        .execute(self.pool())
        .await?;
        Ok(())
    }
}
