use poise::serenity_prelude::{ChannelId, UserId};
use tracing::{error, info, warn};

use super::Command;
use crate::constants::UPCOMING_WINDOW_DAYS;
use crate::conversation::{BirthdayFlow, ConversationState, FlowEvent, Step};
use crate::error::{ConversationError, ValidationError};
use crate::models::Data;
use crate::services::fallback_greeting;
use crate::utils::datetime::{days_until_birthday, format_date};
use crate::utils::message_formatter::{build_entry_list, build_help_message, format_upcoming_line};
use crate::utils::messages::{
    build_add_failed, build_database_error, build_date_format_error, build_delete_success,
    build_need_number, build_not_found, build_save_success, build_unknown_command, format_error,
    format_info,
};
use crate::utils::string_utils::is_empty_or_whitespace;

/// A text message as seen by the router, independent of the transport
#[derive(Clone, Copy, Debug)]
pub struct InboundMessage<'a> {
    pub owner: UserId,
    /// Where the message was written; reminders follow the owner here
    pub destination: ChannelId,
    pub display_name: &'a str,
    pub text: &'a str,
}

/// Decides whether a message continues a dialog or runs a command,
/// and turns the result into reply texts
pub struct CommandRouter<'a> {
    data: &'a Data,
}

impl<'a> CommandRouter<'a> {
    pub fn new(data: &'a Data) -> Self {
        Self { data }
    }

    /// Handle one message and return the replies to send, in order
    pub async fn handle(&self, message: InboundMessage<'_>) -> Vec<String> {
        let text = message.text.trim();
        if is_empty_or_whitespace(text) {
            return Vec::new();
        }

        if let Err(e) = self
            .data
            .store
            .upsert_owner(message.owner, message.destination)
            .await
        {
            warn!("Failed to update owner {}: {}", message.owner, e);
        }

        let command = Command::parse(text);
        let flow = BirthdayFlow::new(self.data.store.as_ref(), message.owner);

        let mut state = self.data.conversations.lock(message.owner).await;
        // Reset before any await: if this task fails or is dropped the owner stays idle
        let current = std::mem::take(&mut *state);

        match command {
            Some(command) if command.is_known() => {
                if !current.is_idle() {
                    info!(
                        "Owner {} abandoned {:?} with {:?}",
                        message.owner, current, command
                    );
                }
                self.dispatch(command, &flow, &mut state, message).await
            }
            _ if !current.is_idle() => apply(flow.advance(current, text).await, &mut state),
            Some(Command::Unknown(raw)) => vec![build_unknown_command(&raw)],
            _ => Vec::new(),
        }
    }

    async fn dispatch(
        &self,
        command: Command,
        flow: &BirthdayFlow<'_>,
        state: &mut ConversationState,
        message: InboundMessage<'_>,
    ) -> Vec<String> {
        match command {
            Command::Start => vec![build_help_message(message.display_name)],
            Command::NewBirthday => apply(flow.begin_add(), state),
            Command::DeleteBirthday => apply(flow.begin_delete().await, state),
            Command::AllBirthdays => vec![self.all_birthdays(message.owner).await],
            Command::UpcomingBirthdays => vec![self.upcoming_birthdays(message.owner).await],
            Command::Congratulate => vec![self.congratulate(message.display_name).await],
            Command::Unknown(raw) => vec![build_unknown_command(&raw)],
        }
    }

    async fn all_birthdays(&self, owner: UserId) -> String {
        match self.data.store.list_by_owner(owner).await {
            Ok(entries) if entries.is_empty() => {
                format_info("Your list is empty. Add one with /newBirthday")
            }
            Ok(entries) => build_entry_list("Your birthdays:", &entries),
            Err(e) => {
                error!("Failed to list birthdays of owner {}: {}", owner, e);
                build_database_error()
            }
        }
    }

    async fn upcoming_birthdays(&self, owner: UserId) -> String {
        let entries = match self.data.store.list_by_owner(owner).await {
            Ok(entries) => entries,
            Err(e) => {
                error!("Failed to list birthdays of owner {}: {}", owner, e);
                return build_database_error();
            }
        };

        let today = self.data.clock.today();
        let mut upcoming: Vec<(i64, _)> = entries
            .iter()
            .filter_map(|entry| {
                days_until_birthday(entry.birthday, today)
                    .filter(|days| *days <= UPCOMING_WINDOW_DAYS)
                    .map(|days| (days, entry))
            })
            .collect();

        if upcoming.is_empty() {
            return format_info(&format!(
                "No birthdays in the next {} days.",
                UPCOMING_WINDOW_DAYS
            ));
        }

        upcoming.sort_by_key(|(days, entry)| (*days, entry.id));
        let lines: Vec<String> = upcoming
            .into_iter()
            .map(|(days, entry)| format_upcoming_line(entry, days))
            .collect();
        format!("Upcoming birthdays:\n{}", lines.join("\n"))
    }

    async fn congratulate(&self, name: &str) -> String {
        match self.data.greeter.greet(name).await {
            Ok(greeting) => greeting,
            Err(e) => {
                warn!("Greeting generation failed, using the fallback: {}", e);
                fallback_greeting(name)
            }
        }
    }
}

/// Store the step's next state and describe its outcome
fn apply(step: Step, state: &mut ConversationState) -> Vec<String> {
    *state = step.next;
    describe_outcome(step.outcome).into_iter().collect()
}

fn describe_outcome(outcome: Result<FlowEvent, ConversationError>) -> Option<String> {
    let reply = match outcome {
        Ok(FlowEvent::NameRequested) => "Whose birthday is it? (enter a name)".to_string(),
        Ok(FlowEvent::DateRequested { .. }) => {
            "When is the birthday? (date as DD.MM.YYYY)".to_string()
        }
        Ok(FlowEvent::Added {
            id,
            person_name,
            birthday,
        }) => format!(
            "{}\nid={} — {} ({})",
            build_save_success("Birthday"),
            id,
            person_name,
            format_date(birthday)
        ),
        Ok(FlowEvent::DeleteIdRequested { entries }) => {
            build_entry_list("What should I delete? Send the id:", &entries)
        }
        Ok(FlowEvent::NothingToDelete) => format_info("Nothing to delete, your list is empty."),
        Ok(FlowEvent::Deleted { .. }) => build_delete_success("Birthday"),
        Ok(FlowEvent::Ignored) => return None,
        Err(ConversationError::Validation(ValidationError::DateFormat(_))) => {
            build_date_format_error()
        }
        Err(ConversationError::Validation(ValidationError::CalendarDate(_))) => build_add_failed(),
        Err(ConversationError::Validation(ValidationError::NotAnId(_))) => build_need_number(),
        Err(ConversationError::Validation(ValidationError::EmptyName)) => {
            format_error("The name can't be empty.")
        }
        Err(ConversationError::NotFound(_)) => build_not_found(),
        Err(ConversationError::Persistence(_)) => build_database_error(),
    };
    Some(reply)
}
