/// Commands understood outside of (and instead of) a pending dialog
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Start,
    NewBirthday,
    AllBirthdays,
    DeleteBirthday,
    UpcomingBirthdays,
    Congratulate,
    /// Text starting with `/` that matches nothing above
    Unknown(String),
}

impl Command {
    /// Parse a message. Returns `None` for text that isn't a command.
    /// Matching is case-insensitive.
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        if !text.starts_with('/') {
            return None;
        }

        let command = match text.to_lowercase().as_str() {
            "/start" => Command::Start,
            "/newbirthday" => Command::NewBirthday,
            "/allbirthdays" => Command::AllBirthdays,
            "/deletebirthday" => Command::DeleteBirthday,
            "/upcomingbirthdays" => Command::UpcomingBirthdays,
            "/congratulate" | "/поздравь" => Command::Congratulate,
            _ => Command::Unknown(text.to_string()),
        };
        Some(command)
    }

    /// Known commands interrupt a pending dialog; unknown ones don't
    pub fn is_known(&self) -> bool {
        !matches!(self, Command::Unknown(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_commands() {
        assert_eq!(Command::parse("/start"), Some(Command::Start));
        assert_eq!(Command::parse("/newBirthday"), Some(Command::NewBirthday));
        assert_eq!(Command::parse("/allBirthdays"), Some(Command::AllBirthdays));
        assert_eq!(Command::parse("/deleteBirthday"), Some(Command::DeleteBirthday));
        assert_eq!(Command::parse("/upcomingBirthdays"), Some(Command::UpcomingBirthdays));
        assert_eq!(Command::parse("/congratulate"), Some(Command::Congratulate));
        assert_eq!(Command::parse("/поздравь"), Some(Command::Congratulate));
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!(Command::parse("/NEWBIRTHDAY"), Some(Command::NewBirthday));
        assert_eq!(Command::parse("  /allbirthdays "), Some(Command::AllBirthdays));
        assert_eq!(Command::parse("/ПОЗДРАВЬ"), Some(Command::Congratulate));
    }

    #[test]
    fn test_parse_unknown_command() {
        assert_eq!(
            Command::parse("/dance"),
            Some(Command::Unknown("/dance".to_string()))
        );
        assert!(!Command::parse("/dance").unwrap().is_known());
        assert!(Command::parse("/start").unwrap().is_known());
    }

    #[test]
    fn test_plain_text_is_not_a_command() {
        assert_eq!(Command::parse("hello"), None);
        assert_eq!(Command::parse("05.03.1990"), None);
        assert_eq!(Command::parse(""), None);
    }
}
