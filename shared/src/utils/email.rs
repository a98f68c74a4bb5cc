//! Email address utilities

use once_cell::sync::Lazy;
use regex::Regex;

// One `@`, no whitespace, and a dotted domain part
static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap()
});

/// Normalize an email address for use as a record key
pub fn normalize_email(email: &str) -> String {
    email.trim().to_ascii_lowercase()
}

/// Check if an email address is syntactically valid
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email)
}

/// Check whether the address ends with one of the given domain suffixes
///
/// Suffixes are compared case-insensitively; `.gov` matches `agency@city.gov`
/// but not `agency@city.gov.example.com`.
pub fn has_allowed_suffix<S: AsRef<str>>(email: &str, suffixes: &[S]) -> bool {
    let email = email.to_ascii_lowercase();
    suffixes
        .iter()
        .any(|suffix| email.ends_with(&suffix.as_ref().to_ascii_lowercase()))
}

/// Mask an email address for logs (e.g., a***y@city.gov)
pub fn mask_email(email: &str) -> String {
    match email.split_once('@') {
        Some((local, domain)) => {
            let chars: Vec<char> = local.chars().collect();
            let masked_local = if chars.len() <= 2 {
                "***".to_string()
            } else {
                format!("{}***{}", chars[0], chars[chars.len() - 1])
            };
            format!("{}@{}", masked_local, domain)
        }
        None => "***".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_email() {
        assert_eq!(normalize_email("  Agency@City.GOV "), "agency@city.gov");
    }

    #[test]
    fn test_is_valid_email() {
        assert!(is_valid_email("agency@city.gov"));
        assert!(is_valid_email("first.last@dept.state.gov"));

        assert!(!is_valid_email("agency.city.gov"));
        assert!(!is_valid_email("agency@city"));
        assert!(!is_valid_email("agen cy@city.gov"));
        assert!(!is_valid_email("a@b@city.gov"));
        assert!(!is_valid_email(""));
    }

    #[test]
    fn test_has_allowed_suffix() {
        assert!(has_allowed_suffix("agency@city.gov", &[".gov"]));
        assert!(has_allowed_suffix("AGENCY@CITY.GOV", &[".gov"]));
        assert!(!has_allowed_suffix("agency@city.gov.example.com", &[".gov"]));
        assert!(has_allowed_suffix("tester@example.com", &[".gov", ".com"]));
        assert!(!has_allowed_suffix("tester@example.org", &[".gov", ".com"]));
    }

    #[test]
    fn test_mask_email() {
        assert_eq!(mask_email("agency@city.gov"), "a***y@city.gov");
        assert_eq!(mask_email("ab@city.gov"), "***@city.gov");
        assert_eq!(mask_email("not-an-email"), "***");
    }
}
