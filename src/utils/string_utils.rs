/// Pure string processing utilities (Discord-agnostic)

/// Trim and normalize whitespace in a string
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Extract the first N characters of a string
pub fn take_chars(text: &str, n: usize) -> String {
    text.chars().take(n).collect()
}

/// Check if a string is empty after trimming
pub fn is_empty_or_whitespace(text: &str) -> bool {
    text.trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_whitespace() {
        assert_eq!(normalize_whitespace("  hello   world  "), "hello world");
        assert_eq!(normalize_whitespace("multiple   spaces"), "multiple spaces");
        assert_eq!(normalize_whitespace("  "), "");
    }

    #[test]
    fn test_take_chars() {
        assert_eq!(take_chars("Hello World", 5), "Hello");
        assert_eq!(take_chars("Short", 10), "Short");
        assert_eq!(take_chars("Привет", 3), "При");
    }

    #[test]
    fn test_is_empty_or_whitespace() {
        assert!(is_empty_or_whitespace(""));
        assert!(is_empty_or_whitespace("   "));
        assert!(is_empty_or_whitespace("\t\n"));

        assert!(!is_empty_or_whitespace("text"));
        assert!(!is_empty_or_whitespace("  text  "));
    }
}
