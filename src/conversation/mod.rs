/// Per-owner multi-step dialog state
mod flow;

pub use flow::{BirthdayFlow, FlowEvent, Step};

use dashmap::DashMap;
use poise::serenity_prelude::UserId;
use std::ops::{Deref, DerefMut};
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};

/// Where an owner is inside a multi-message exchange
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum ConversationState {
    /// No exchange in progress
    #[default]
    Idle,
    /// `/newBirthday` was sent, the next message is the person's name
    AwaitingName,
    /// The name is known, the next message is the date
    AwaitingDate { person_name: String },
    /// `/deleteBirthday` was sent, the next message is an entry id
    AwaitingDeleteId,
}

impl ConversationState {
    pub fn is_idle(&self) -> bool {
        matches!(self, ConversationState::Idle)
    }
}

/// Conversation states keyed by owner.
///
/// Each owner has its own lock, so two messages from the same owner are
/// applied one after the other while different owners never wait on each
/// other. Only owners in the middle of an exchange (or currently holding
/// their lock) keep an entry.
#[derive(Default)]
pub struct Conversations {
    slots: DashMap<UserId, Arc<Mutex<ConversationState>>>,
}

impl Conversations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take exclusive access to an owner's state until the guard is dropped
    pub async fn lock(&self, owner: UserId) -> ConversationGuard<'_> {
        // The map guard must be released before awaiting the owner lock
        let slot = Arc::clone(&self.slots.entry(owner).or_default());
        ConversationGuard {
            conversations: self,
            owner,
            guard: Some(slot.lock_owned().await),
        }
    }

    /// Forget an owner that is idle and that nobody holds or waits for
    fn evict_if_idle(&self, owner: UserId) {
        // Waiters clone the slot under the same shard lock, so a count of one
        // means this map holds the only reference
        self.slots.remove_if(&owner, |_, slot| {
            Arc::strong_count(slot) == 1 && slot.try_lock().is_ok_and(|state| state.is_idle())
        });
    }

    /// Snapshot of an owner's current state
    #[cfg(test)]
    pub async fn state(&self, owner: UserId) -> ConversationState {
        self.lock(owner).await.clone()
    }

    /// Number of owners with an entry
    #[cfg(test)]
    pub fn tracked_owners(&self) -> usize {
        self.slots.len()
    }
}

/// Exclusive access to one owner's state. Releasing it while the state is
/// idle drops the owner's entry.
pub struct ConversationGuard<'a> {
    conversations: &'a Conversations,
    owner: UserId,
    guard: Option<OwnedMutexGuard<ConversationState>>,
}

impl Deref for ConversationGuard<'_> {
    type Target = ConversationState;

    fn deref(&self) -> &ConversationState {
        self.guard.as_deref().expect("guard is held until drop")
    }
}

impl DerefMut for ConversationGuard<'_> {
    fn deref_mut(&mut self) -> &mut ConversationState {
        self.guard.as_deref_mut().expect("guard is held until drop")
    }
}

impl Drop for ConversationGuard<'_> {
    fn drop(&mut self) {
        // Unlock first so the slot's reference count reflects only the map
        drop(self.guard.take());
        self.conversations.evict_if_idle(self.owner);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_unseen_owner_is_idle() {
        let conversations = Conversations::new();
        assert_eq!(conversations.state(UserId::new(1)).await, ConversationState::Idle);
    }

    #[tokio::test]
    async fn test_states_are_isolated_per_owner() {
        let conversations = Conversations::new();
        *conversations.lock(UserId::new(1)).await = ConversationState::AwaitingName;

        assert_eq!(conversations.state(UserId::new(1)).await, ConversationState::AwaitingName);
        assert_eq!(conversations.state(UserId::new(2)).await, ConversationState::Idle);
    }

    #[tokio::test]
    async fn test_idle_owners_are_forgotten() {
        let conversations = Conversations::new();
        for id in 1..=1000u64 {
            let state = conversations.lock(UserId::new(id)).await;
            assert!(state.is_idle());
        }
        assert_eq!(conversations.tracked_owners(), 0);
    }

    #[tokio::test]
    async fn test_owner_mid_exchange_is_kept_until_idle() {
        let conversations = Conversations::new();
        *conversations.lock(UserId::new(1)).await = ConversationState::AwaitingName;
        assert_eq!(conversations.tracked_owners(), 1);
        assert_eq!(conversations.state(UserId::new(1)).await, ConversationState::AwaitingName);

        *conversations.lock(UserId::new(1)).await = ConversationState::Idle;
        assert_eq!(conversations.tracked_owners(), 0);
    }

    #[tokio::test]
    async fn test_waiting_owner_keeps_its_slot() {
        let conversations = Arc::new(Conversations::new());
        let held = conversations.lock(UserId::new(1)).await;

        let waiter = {
            let conversations = Arc::clone(&conversations);
            tokio::spawn(async move {
                *conversations.lock(UserId::new(1)).await = ConversationState::AwaitingDeleteId;
            })
        };
        while Arc::strong_count(&conversations.slots.get(&UserId::new(1)).unwrap()) < 3 {
            tokio::task::yield_now().await;
        }

        // Released while idle, but the waiter still needs the same slot
        drop(held);
        waiter.await.unwrap();

        assert_eq!(
            conversations.state(UserId::new(1)).await,
            ConversationState::AwaitingDeleteId
        );
    }

    #[tokio::test]
    async fn test_other_owner_is_not_blocked() {
        let conversations = Conversations::new();
        let _held = conversations.lock(UserId::new(1)).await;

        let other =
            tokio::time::timeout(Duration::from_secs(1), conversations.lock(UserId::new(2))).await;
        assert!(other.is_ok());
    }

    #[tokio::test]
    async fn test_same_owner_waits_for_current_transition() {
        let conversations = Arc::new(Conversations::new());
        let mut held = conversations.lock(UserId::new(1)).await;

        let waiter = {
            let conversations = Arc::clone(&conversations);
            tokio::spawn(async move { conversations.state(UserId::new(1)).await })
        };

        // The waiter must not see the half-finished update
        *held = ConversationState::AwaitingName;
        tokio::task::yield_now().await;
        assert!(!waiter.is_finished());
        *held = ConversationState::AwaitingDate {
            person_name: "Ann".to_string(),
        };
        drop(held);

        assert_eq!(
            waiter.await.unwrap(),
            ConversationState::AwaitingDate {
                person_name: "Ann".to_string()
            }
        );
    }
}
