use crate::constants::MAX_PERSON_NAME_LENGTH;
use crate::error::ValidationError;
use crate::utils::string_utils::{normalize_whitespace, take_chars};

/// Normalize a person's name, rejecting blank input.
/// Names longer than the column allows are cut.
pub fn validate_person_name(name: &str) -> Result<String, ValidationError> {
    let name = normalize_whitespace(name);
    if name.is_empty() {
        return Err(ValidationError::EmptyName);
    }
    Ok(take_chars(&name, MAX_PERSON_NAME_LENGTH))
}

/// Parse the id a user typed during the delete flow
pub fn parse_entry_id(text: &str) -> Result<i64, ValidationError> {
    let text = text.trim();
    text.parse::<i64>()
        .map_err(|_| ValidationError::NotAnId(text.to_string()))
}
