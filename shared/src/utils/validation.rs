//! Common validation helpers used by request DTOs

use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    // Local part, '@', domain with at least one dot
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap()
});

/// Check that a string contains at least one non-whitespace character
pub fn not_blank(value: &str) -> bool {
    !value.trim().is_empty()
}

/// Check that an email address is plausibly valid
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_blank() {
        assert!(not_blank("drill"));
        assert!(!not_blank(""));
        assert!(!not_blank("   "));
    }

    #[test]
    fn test_valid_emails() {
        assert!(is_valid_email("user@example.com"));
        assert!(is_valid_email("first.last@sub.domain.org"));
    }

    #[test]
    fn test_invalid_emails() {
        assert!(!is_valid_email("not-an-email"));
        assert!(!is_valid_email("missing@dot"));
        assert!(!is_valid_email("spaces in@mail.com"));
        assert!(!is_valid_email("@example.com"));
    }
}
