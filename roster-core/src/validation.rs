//! Local checks applied to a draft before any create or update request.

use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;

use crate::models::Employee;

static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\S+@\S+\.\S+").expect("email pattern must compile"));

/// Blocking validation failures. The request is never sent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please fill out all required fields ({0} is missing).")]
    MissingField(&'static str),

    #[error("Please enter a valid email address.")]
    InvalidEmail,
}

/// Validates a draft. Only names and email are checked; everything else is
/// passed through for the server to judge.
pub fn validate(draft: &Employee) -> Result<(), ValidationError> {
    let required = [
        ("first_name", &draft.first_name),
        ("last_name", &draft.last_name),
        ("email", &draft.email),
    ];
    if let Some((field, _)) = required.iter().find(|(_, value)| value.is_empty()) {
        return Err(ValidationError::MissingField(*field));
    }

    if !is_valid_email(&draft.email) {
        return Err(ValidationError::InvalidEmail);
    }

    Ok(())
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_missing_first_name() {
        let draft = Employee::new("", "B", "a@b.c");
        assert_eq!(
            validate(&draft),
            Err(ValidationError::MissingField("first_name"))
        );
    }

    #[test]
    fn test_rejects_missing_email_before_shape_check() {
        let draft = Employee::new("A", "B", "");
        assert_eq!(validate(&draft), Err(ValidationError::MissingField("email")));
    }

    #[test]
    fn test_rejects_malformed_email() {
        let draft = Employee::new("A", "B", "not-an-email");
        assert_eq!(validate(&draft), Err(ValidationError::InvalidEmail));
    }

    #[test]
    fn test_accepts_complete_draft() {
        let draft = Employee::new("Ann", "Lee", "ann@example.com");
        assert_eq!(validate(&draft), Ok(()));
    }

    #[test]
    fn test_other_fields_are_not_checked() {
        let draft = Employee::new("Ann", "Lee", "ann@example.com").with_phone_number("");
        assert!(validate(&draft).is_ok());
    }

    #[test]
    fn test_email_shapes() {
        assert!(is_valid_email("a@b.c"));
        assert!(is_valid_email("first.last@sub.example.org"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("@b.c"));
        assert!(!is_valid_email("a b@c"));
    }
}
