//! Local field validation.

use std::sync::LazyLock;

use regex::Regex;

use crate::models::{Field, FieldErrors, FormFields};

pub const TITLE_REQUIRED: &str = "Title is required.";
pub const DESCRIPTION_REQUIRED: &str = "Description is required.";
pub const EMAIL_INVALID: &str = "Enter a valid email address.";

static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("Invalid regex"));

/// Whether `email` has a `local@domain.tld` shape.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

/// Validate the user-authored fields, rewriting the annotation for each of
/// title, description and email. Returns whether the form may be submitted.
pub fn validate_fields(fields: &FormFields, errors: &mut FieldErrors) -> bool {
    let title = fields.title.trim();
    let description = fields.description.trim();
    let email = fields.email.trim();

    errors.set(Field::Title, title.is_empty().then_some(TITLE_REQUIRED));
    errors.set(
        Field::Description,
        description.is_empty().then_some(DESCRIPTION_REQUIRED),
    );

    let email_ok = email.is_empty() || is_valid_email(email);
    errors.set(Field::Email, (!email_ok).then_some(EMAIL_INVALID));

    !title.is_empty() && !description.is_empty() && email_ok
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(title: &str, description: &str, email: &str) -> FormFields {
        let mut fields = FormFields::default();
        fields.title = title.to_string();
        fields.description = description.to_string();
        fields.email = email.to_string();
        fields
    }

    #[test]
    fn email_shape() {
        assert!(is_valid_email("qa@example.com"));
        assert!(is_valid_email("a.b+c@sub.example.co"));
        assert!(!is_valid_email("not-an-email"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("a b@example.com"));
        assert!(!is_valid_email("a@@example.com"));
    }

    #[test]
    fn complete_form_is_valid_without_email() {
        let mut errors = FieldErrors::default();
        assert!(validate_fields(
            &fields("Crash on save", "App crashes when saving", ""),
            &mut errors
        ));
        assert!(errors.is_empty());
    }

    #[test]
    fn blank_required_fields_are_annotated() {
        let mut errors = FieldErrors::default();
        assert!(!validate_fields(&fields("   ", "\n", ""), &mut errors));
        assert_eq!(errors.get(Field::Title), Some(TITLE_REQUIRED));
        assert_eq!(errors.get(Field::Description), Some(DESCRIPTION_REQUIRED));
        assert_eq!(errors.get(Field::Email), None);
    }

    #[test]
    fn malformed_email_is_annotated() {
        let mut errors = FieldErrors::default();
        assert!(!validate_fields(
            &fields("Title", "Description", "not-an-email"),
            &mut errors
        ));
        assert_eq!(errors.get(Field::Email), Some(EMAIL_INVALID));
        assert_eq!(errors.get(Field::Title), None);
    }

    #[test]
    fn revalidation_clears_fixed_fields() {
        let mut errors = FieldErrors::default();
        validate_fields(&fields("", "", "bad"), &mut errors);
        assert!(validate_fields(
            &fields("Title", "Description", " qa@example.com "),
            &mut errors
        ));
        assert!(errors.is_empty());
    }
}
