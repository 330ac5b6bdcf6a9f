/// Pure functions for birthday message formatting (Discord-agnostic)
use chrono::Datelike;

use crate::models::BirthdayEntry;
use crate::utils::datetime::format_date_display;

/// The reminder sent on the day, once per matching entry
pub fn build_birthday_notification(person_name: &str) -> String {
    format!("🎉 Today is {}'s birthday! Congratulations! 🎂", person_name)
}

/// Greeting and command overview for /start
pub fn build_help_message(display_name: &str) -> String {
    format!(
        "Hi, {}!\n\
        I'm a bot that helps you remember birthdays.\n\n\
        Commands:\n\
        /newBirthday — add a birthday\n\
        /allBirthdays — show my list\n\
        /upcomingBirthdays — birthdays in the next 30 days\n\
        /deleteBirthday — delete by id\n\
        /congratulate (/поздравь) — generate a birthday greeting",
        display_name
    )
}

/// Build a single list line: `id=3 — Ann — 05.03.1990`
pub fn format_entry_line(entry: &BirthdayEntry) -> String {
    format!(
        "id={} — {} — {}",
        entry.id,
        entry.person_name,
        entry.formatted_date()
    )
}

/// Build a titled list of entries, one per line
pub fn build_entry_list(title: &str, entries: &[BirthdayEntry]) -> String {
    let lines: Vec<String> = entries.iter().map(format_entry_line).collect();
    format!("{}\n{}", title, lines.join("\n"))
}

/// Build a line of the upcoming list: `• Ann — 5 March (in 3 days)`
pub fn format_upcoming_line(entry: &BirthdayEntry, days_left: i64) -> String {
    let when = match days_left {
        0 => "today".to_string(),
        1 => "tomorrow".to_string(),
        n => format!("in {} days", n),
    };
    format!(
        "• {} — {} ({})",
        entry.person_name,
        format_date_display(entry.birthday.month(), entry.birthday.day()),
        when
    )
}
