use async_trait::async_trait;
use chrono::NaiveDate;
use poise::serenity_prelude::{ChannelId, UserId};
use std::collections::{BTreeMap, HashMap};
use tokio::sync::Mutex;

use super::BirthdayStore;
use crate::error::StoreError;
use crate::models::{BirthdayEntry, Notification};
use crate::utils::datetime::matches_birthday;
use crate::utils::validation::validate_person_name;

#[derive(Default)]
struct MemoryState {
    owners: HashMap<UserId, ChannelId>,
    birthdays: BTreeMap<i64, BirthdayEntry>,
    last_id: i64,
}

/// Non-persistent store with the same semantics as [`super::Database`].
///
/// Used when no `DATABASE_URL` is configured and in tests.
#[derive(Default)]
pub struct MemoryStore {
    state: Mutex<MemoryState>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BirthdayStore for MemoryStore {
    async fn upsert_owner(&self, owner: UserId, destination: ChannelId) -> Result<(), StoreError> {
        self.state.lock().await.owners.insert(owner, destination);
        Ok(())
    }

    async fn add_birthday(
        &self,
        owner: UserId,
        person_name: &str,
        birthday: NaiveDate,
    ) -> Result<i64, StoreError> {
        let person_name = validate_person_name(person_name)?;

        let mut state = self.state.lock().await;
        if !state.owners.contains_key(&owner) {
            return Err(StoreError::UnknownOwner(owner));
        }

        state.last_id += 1;
        let id = state.last_id;
        state.birthdays.insert(
            id,
            BirthdayEntry {
                id,
                owner_id: owner,
                person_name,
                birthday,
            },
        );
        Ok(id)
    }

    async fn list_by_owner(&self, owner: UserId) -> Result<Vec<BirthdayEntry>, StoreError> {
        let state = self.state.lock().await;
        let mut entries: Vec<BirthdayEntry> = state
            .birthdays
            .values()
            .filter(|entry| entry.owner_id == owner)
            .cloned()
            .collect();
        entries.sort_by_key(|entry| (entry.birthday, entry.id));
        Ok(entries)
    }

    async fn delete_birthday(&self, owner: UserId, id: i64) -> Result<bool, StoreError> {
        let mut state = self.state.lock().await;
        let owned = state
            .birthdays
            .get(&id)
            .is_some_and(|entry| entry.owner_id == owner);
        if owned {
            state.birthdays.remove(&id);
        }
        Ok(owned)
    }

    async fn get_today_notifications(
        &self,
        today: NaiveDate,
    ) -> Result<Vec<Notification>, StoreError> {
        let state = self.state.lock().await;
        let mut matches: Vec<(ChannelId, i64, String)> = state
            .birthdays
            .values()
            .filter(|entry| matches_birthday(entry.birthday, today))
            .filter_map(|entry| {
                state
                    .owners
                    .get(&entry.owner_id)
                    .map(|destination| (*destination, entry.id, entry.person_name.clone()))
            })
            .collect();
        matches.sort_by_key(|(destination, id, _)| (*destination, *id));

        Ok(matches
            .into_iter()
            .map(|(destination, _, person_name)| Notification {
                destination,
                person_name,
            })
            .collect())
    }
}
