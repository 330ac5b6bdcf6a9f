use super::Database;
use chrono::{Datelike, NaiveDate};
use poise::serenity_prelude::{ChannelId, UserId};
use tracing::info;

use crate::error::StoreError;
use crate::models::{BirthdayEntry, Notification};
use crate::utils::validation::validate_person_name;

impl Database {
    /// Save a birthday for an owner and return the new entry id
    pub async fn add_birthday(
        &self,
        owner: UserId,
        person_name: &str,
        birthday: NaiveDate,
    ) -> Result<i64, StoreError> {
        let person_name = validate_person_name(person_name)?;

        let result: Result<(i64,), sqlx::Error> = sqlx::query_as(
            r#"
            INSERT INTO birthdays (owner_id, person_name, birthday_date)
            VALUES ($1, $2, $3)
            RETURNING id
            "#,
        )
        .bind(owner.get() as i64)
        .bind(&person_name)
        .bind(birthday)
        .fetch_one(self.pool())
        .await;

        match result {
            Ok((id,)) => {
                info!(
                    "Birthday added: id={}, owner={}, name={}, date={}",
                    id, owner, person_name, birthday
                );
                Ok(id)
            }
            Err(e)
                if e
                    .as_database_error()
                    .is_some_and(|db| db.is_foreign_key_violation()) =>
            {
                Err(StoreError::UnknownOwner(owner))
            }
            Err(e) => Err(StoreError::Persistence(e)),
        }
    }

    /// Get all birthdays registered by an owner
    pub async fn list_by_owner(&self, owner: UserId) -> Result<Vec<BirthdayEntry>, StoreError> {
        let rows: Vec<(i64, String, NaiveDate)> = sqlx::query_as(
            "SELECT id, person_name, birthday_date FROM birthdays \
             WHERE owner_id = $1 ORDER BY birthday_date, id",
        )
        .bind(owner.get() as i64)
        .fetch_all(self.pool())
        .await?;

        Ok(rows
            .into_iter()
            .map(|(id, person_name, birthday)| BirthdayEntry {
                id,
                owner_id: owner,
                person_name,
                birthday,
            })
            .collect())
    }

    /// Delete a birthday, but only if it belongs to the owner
    pub async fn delete_birthday(&self, owner: UserId, id: i64) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM birthdays WHERE id = $1 AND owner_id = $2")
            .bind(id)
            .bind(owner.get() as i64)
            .execute(self.pool())
            .await?;

        let deleted = result.rows_affected() > 0;
        if deleted {
            info!("Birthday {} deleted by owner {}", id, owner);
        } else {
            info!("Birthday {} not found for owner {}", id, owner);
        }
        Ok(deleted)
    }

    /// Get a notification for every birthday whose month and day match `today`
    pub async fn get_today_notifications(
        &self,
        today: NaiveDate,
    ) -> Result<Vec<Notification>, StoreError> {
        let rows: Vec<(i64, String)> = sqlx::query_as(
            r#"
            SELECT o.notify_destination, b.person_name
            FROM birthdays b
            JOIN owners o ON o.owner_id = b.owner_id
            WHERE EXTRACT(MONTH FROM b.birthday_date)::INTEGER = $1
              AND EXTRACT(DAY FROM b.birthday_date)::INTEGER = $2
            ORDER BY o.notify_destination, b.id
            "#,
        )
        .bind(today.month() as i32)
        .bind(today.day() as i32)
        .fetch_all(self.pool())
        .await?;

        Ok(rows
            .into_iter()
            .map(|(destination, person_name)| Notification {
                destination: ChannelId::new(destination as u64),
                person_name,
            })
            .collect())
    }
}
