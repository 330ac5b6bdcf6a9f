/// Pure functions for formatting error and success messages (Discord-agnostic)

/// Format a validation error message with emoji
pub fn format_error(message: &str) -> String {
    format!("❌ {}", message)
}

/// Format a success message with emoji
pub fn format_success(message: &str) -> String {
    format!("✅ {}", message)
}

/// Format an info message with emoji
pub fn format_info(message: &str) -> String {
    format!("ℹ️ {}", message)
}

/// Build a database error message (generic, doesn't expose internals)
pub fn build_database_error() -> String {
    format_error("A database error occurred. Please try again later.")
}

/// Build the reply for a well-formed but failed addition
pub fn build_add_failed() -> String {
    format_error("Something went wrong while adding the birthday :(")
}

/// Build the reply for a date that is not DD.MM.YYYY
pub fn build_date_format_error() -> String {
    format_error("Invalid date format. Use DD.MM.YYYY")
}

/// Build the reply for a non-numeric id in the delete flow
pub fn build_need_number() -> String {
    format_error("I need a number (the entry id).")
}

/// Build the reply for an entry that is missing or owned by someone else
pub fn build_not_found() -> String {
    format_error("No such entry (or it isn't yours).")
}

/// Build the reply for a command the bot doesn't know
pub fn build_unknown_command(command: &str) -> String {
    format_error(&format!("Unknown command: {}", command))
}

/// Build a success message for saving data
pub fn build_save_success(item_type: &str) -> String {
    format_success(&format!("{} saved successfully!", item_type))
}

/// Build a success message for deleting data
pub fn build_delete_success(item_type: &str) -> String {
    format_success(&format!("{} deleted successfully!", item_type))
}
