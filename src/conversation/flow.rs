use chrono::NaiveDate;
use poise::serenity_prelude::UserId;
use tracing::{error, info};

use super::ConversationState;
use crate::database::BirthdayStore;
use crate::error::ConversationError;
use crate::models::BirthdayEntry;
use crate::utils::datetime::parse_birthday_date;
use crate::utils::validation::{parse_entry_id, validate_person_name};

/// What a successful step did
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FlowEvent {
    NameRequested,
    DateRequested {
        person_name: String,
    },
    Added {
        id: i64,
        person_name: String,
        birthday: NaiveDate,
    },
    DeleteIdRequested {
        entries: Vec<BirthdayEntry>,
    },
    NothingToDelete,
    Deleted {
        id: i64,
    },
    /// Input arrived while no exchange was in progress
    Ignored,
}

/// Result of one transition: the state to store and what happened
#[derive(Debug)]
pub struct Step {
    pub next: ConversationState,
    pub outcome: Result<FlowEvent, ConversationError>,
}

impl Step {
    fn done(outcome: Result<FlowEvent, ConversationError>) -> Self {
        Self {
            next: ConversationState::Idle,
            outcome,
        }
    }

    fn waiting(next: ConversationState, event: FlowEvent) -> Self {
        Self {
            next,
            outcome: Ok(event),
        }
    }
}

/// The add and delete dialogs of one owner.
///
/// Every path that finishes or fails returns to [`ConversationState::Idle`].
pub struct BirthdayFlow<'a> {
    store: &'a dyn BirthdayStore,
    owner: UserId,
}

impl<'a> BirthdayFlow<'a> {
    pub fn new(store: &'a dyn BirthdayStore, owner: UserId) -> Self {
        Self { store, owner }
    }

    /// `/newBirthday`
    pub fn begin_add(&self) -> Step {
        Step::waiting(ConversationState::AwaitingName, FlowEvent::NameRequested)
    }

    /// `/deleteBirthday`: show the owner's entries and wait for an id
    pub async fn begin_delete(&self) -> Step {
        match self.store.list_by_owner(self.owner).await {
            Ok(entries) if entries.is_empty() => Step::done(Ok(FlowEvent::NothingToDelete)),
            Ok(entries) => Step::waiting(
                ConversationState::AwaitingDeleteId,
                FlowEvent::DeleteIdRequested { entries },
            ),
            Err(e) => {
                error!("Failed to list birthdays of owner {}: {}", self.owner, e);
                Step::done(Err(e.into()))
            }
        }
    }

    /// Feed the next message of an exchange in progress
    pub async fn advance(&self, state: ConversationState, input: &str) -> Step {
        match state {
            ConversationState::Idle => Step::done(Ok(FlowEvent::Ignored)),
            ConversationState::AwaitingName => match validate_person_name(input) {
                Ok(person_name) => Step::waiting(
                    ConversationState::AwaitingDate {
                        person_name: person_name.clone(),
                    },
                    FlowEvent::DateRequested { person_name },
                ),
                Err(e) => Step::done(Err(e.into())),
            },
            ConversationState::AwaitingDate { person_name } => {
                Step::done(self.add(&person_name, input).await)
            }
            ConversationState::AwaitingDeleteId => Step::done(self.delete(input).await),
        }
    }

    async fn add(&self, person_name: &str, input: &str) -> Result<FlowEvent, ConversationError> {
        let birthday = parse_birthday_date(input)?;

        let id = self
            .store
            .add_birthday(self.owner, person_name, birthday)
            .await
            .inspect_err(|e| error!("Failed to add birthday for owner {}: {}", self.owner, e))?;

        Ok(FlowEvent::Added {
            id,
            person_name: person_name.to_string(),
            birthday,
        })
    }

    async fn delete(&self, input: &str) -> Result<FlowEvent, ConversationError> {
        let id = parse_entry_id(input)?;

        let deleted = self
            .store
            .delete_birthday(self.owner, id)
            .await
            .inspect_err(|e| {
                error!("Failed to delete birthday {} of owner {}: {}", id, self.owner, e)
            })?;

        if deleted {
            Ok(FlowEvent::Deleted { id })
        } else {
            info!("Owner {} asked to delete unknown entry {}", self.owner, id);
            Err(ConversationError::NotFound(id))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::MemoryStore;
    use crate::error::ValidationError;
    use poise::serenity_prelude::ChannelId;

    fn owner() -> UserId {
        UserId::new(42)
    }

    async fn store() -> MemoryStore {
        let store = MemoryStore::new();
        store.upsert_owner(owner(), ChannelId::new(7)).await.unwrap();
        store
    }

    fn awaiting_date(name: &str) -> ConversationState {
        ConversationState::AwaitingDate {
            person_name: name.to_string(),
        }
    }

    #[tokio::test]
    async fn test_begin_add_waits_for_name() {
        let store = store().await;
        let step = BirthdayFlow::new(&store, owner()).begin_add();
        assert_eq!(step.next, ConversationState::AwaitingName);
        assert_eq!(step.outcome.unwrap(), FlowEvent::NameRequested);
    }

    #[tokio::test]
    async fn test_name_moves_to_awaiting_date() {
        let store = store().await;
        let step = BirthdayFlow::new(&store, owner())
            .advance(ConversationState::AwaitingName, "Ann")
            .await;
        assert_eq!(step.next, awaiting_date("Ann"));
        assert_eq!(
            step.outcome.unwrap(),
            FlowEvent::DateRequested {
                person_name: "Ann".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_valid_date_adds_entry_and_resets() {
        let store = store().await;
        let step = BirthdayFlow::new(&store, owner())
            .advance(awaiting_date("Ann"), "05.03.1990")
            .await;

        assert_eq!(step.next, ConversationState::Idle);
        let FlowEvent::Added { id, person_name, birthday } = step.outcome.unwrap() else {
            panic!("expected an added entry");
        };
        assert_eq!(person_name, "Ann");
        assert_eq!(birthday, NaiveDate::from_ymd_opt(1990, 3, 5).unwrap());

        let entries = store.list_by_owner(owner()).await.unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].id, id);
    }

    #[tokio::test]
    async fn test_bad_date_format_resets_without_storing() {
        let store = store().await;
        let step = BirthdayFlow::new(&store, owner())
            .advance(awaiting_date("Bob"), "31-12-2020")
            .await;

        assert_eq!(step.next, ConversationState::Idle);
        assert!(matches!(
            step.outcome,
            Err(ConversationError::Validation(ValidationError::DateFormat(_)))
        ));
        assert!(store.list_by_owner(owner()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_impossible_date_resets_without_storing() {
        let store = store().await;
        let step = BirthdayFlow::new(&store, owner())
            .advance(awaiting_date("Bob"), "31.02.2024")
            .await;

        assert_eq!(step.next, ConversationState::Idle);
        assert!(matches!(
            step.outcome,
            Err(ConversationError::Validation(ValidationError::CalendarDate(_)))
        ));
        assert!(store.list_by_owner(owner()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_store_failure_resets() {
        // No owner row: the store refuses the insert
        let store = MemoryStore::new();
        let step = BirthdayFlow::new(&store, owner())
            .advance(awaiting_date("Ann"), "05.03.1990")
            .await;

        assert_eq!(step.next, ConversationState::Idle);
        assert!(matches!(step.outcome, Err(ConversationError::Persistence(_))));
    }

    #[tokio::test]
    async fn test_begin_delete_with_empty_list() {
        let store = store().await;
        let step = BirthdayFlow::new(&store, owner()).begin_delete().await;
        assert_eq!(step.next, ConversationState::Idle);
        assert_eq!(step.outcome.unwrap(), FlowEvent::NothingToDelete);
    }

    #[tokio::test]
    async fn test_delete_flow_removes_own_entry() {
        let store = store().await;
        let date = NaiveDate::from_ymd_opt(1990, 3, 5).unwrap();
        let id = store.add_birthday(owner(), "Ann", date).await.unwrap();
        let flow = BirthdayFlow::new(&store, owner());

        let step = flow.begin_delete().await;
        assert_eq!(step.next, ConversationState::AwaitingDeleteId);
        assert!(matches!(
            step.outcome,
            Ok(FlowEvent::DeleteIdRequested { ref entries }) if entries.len() == 1
        ));

        let step = flow.advance(step.next, &id.to_string()).await;
        assert_eq!(step.next, ConversationState::Idle);
        assert_eq!(step.outcome.unwrap(), FlowEvent::Deleted { id });
        assert!(store.list_by_owner(owner()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_foreign_entry_reports_not_found() {
        let store = store().await;
        let other = UserId::new(7);
        store.upsert_owner(other, ChannelId::new(8)).await.unwrap();
        let date = NaiveDate::from_ymd_opt(1990, 3, 5).unwrap();
        let id = store.add_birthday(other, "Eve", date).await.unwrap();

        let step = BirthdayFlow::new(&store, owner())
            .advance(ConversationState::AwaitingDeleteId, &id.to_string())
            .await;

        assert_eq!(step.next, ConversationState::Idle);
        assert!(matches!(
            step.outcome,
            Err(ConversationError::NotFound(missing)) if missing == id
        ));
        assert_eq!(store.list_by_owner(other).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_delete_with_non_number_resets() {
        let store = store().await;
        let step = BirthdayFlow::new(&store, owner())
            .advance(ConversationState::AwaitingDeleteId, "first one")
            .await;

        assert_eq!(step.next, ConversationState::Idle);
        assert!(matches!(
            step.outcome,
            Err(ConversationError::Validation(ValidationError::NotAnId(_)))
        ));
    }

    #[tokio::test]
    async fn test_idle_input_is_ignored() {
        let store = store().await;
        let step = BirthdayFlow::new(&store, owner())
            .advance(ConversationState::Idle, "hello")
            .await;
        assert_eq!(step.next, ConversationState::Idle);
        assert_eq!(step.outcome.unwrap(), FlowEvent::Ignored);
    }
}
