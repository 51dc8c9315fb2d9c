//! Input validation
//!
//! Sanity checks applied to usernames and passwords arriving from clients
//! before they reach the credential store.

/// Rejects empty input, overlong input and embedded control characters.
pub fn is_valid_input(input: &str, max_length: usize) -> bool {
    !input.is_empty() && input.len() <= max_length && !input.chars().any(char::is_control)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_valid_input() {
        assert!(is_valid_input("alice", 32));
        assert!(!is_valid_input("", 32));
        assert!(!is_valid_input("a\0b", 32));
        assert!(!is_valid_input("a\r\nb", 32));
        assert!(!is_valid_input(&"x".repeat(33), 32));
        assert!(is_valid_input(&"x".repeat(32), 32));
    }
}
