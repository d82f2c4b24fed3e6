use std::{borrow::Cow, fmt};

use validator::{Validate, ValidationError};

use crate::dto::NoteTransfer;

pub const TITLE_MAX_CHARS: usize = 255;

/// Order in which field messages are reported.
const FIELDS: [&str; 2] = ["title", "body"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

/// Every rule a payload broke, in field order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationErrors(pub Vec<FieldError>);

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<&str> = self.0.iter().map(|e| e.message.as_str()).collect();
        write!(f, "{}", messages.join(" "))
    }
}

impl std::error::Error for ValidationErrors {}

fn rule_error(code: &'static str, message: &'static str) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(Cow::Borrowed(message));
    error
}

// PostgreSQL text columns cannot store NUL.
pub fn check_title(title: &str) -> Result<(), ValidationError> {
    if title.chars().count() > TITLE_MAX_CHARS {
        return Err(rule_error(
            "title_too_long",
            "Note title cannot exceed 255 characters.",
        ));
    }
    if title.contains('\0') {
        return Err(rule_error(
            "title_nul",
            "Note title cannot contain NUL characters.",
        ));
    }
    Ok(())
}

pub fn check_body(body: &str) -> Result<(), ValidationError> {
    if body.contains('\0') {
        return Err(rule_error(
            "body_nul",
            "Note body cannot contain NUL characters.",
        ));
    }
    Ok(())
}

/// Runs the payload rules and flattens the result into field order.
pub fn validate(note: &NoteTransfer) -> Result<(), ValidationErrors> {
    let Err(errors) = Validate::validate(note) else {
        return Ok(());
    };

    let by_field = errors.field_errors();
    let mut flattened = Vec::new();

    for field in FIELDS {
        for error in by_field.get(field).into_iter().flat_map(|errors| errors.iter()) {
            flattened.push(FieldError {
                field,
                message: error
                    .message
                    .as_ref()
                    .map_or_else(|| error.code.to_string(), ToString::to_string),
            });
        }
    }

    Err(ValidationErrors(flattened))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(title: &str, body: &str) -> NoteTransfer {
        NoteTransfer {
            title: title.into(),
            body: body.into(),
            ..NoteTransfer::default()
        }
    }

    #[test]
    fn accepts_filled_note() {
        assert!(validate(&payload("Sample Note Title", "Sample Note Body.")).is_ok());
    }

    #[test]
    fn rejects_empty_title() {
        let err = validate(&payload("", "body")).unwrap_err();

        assert_eq!(err.0.len(), 1);
        assert_eq!(err.0[0].field, "title");
        assert_eq!(err.to_string(), "Note title cannot be empty.");
    }

    #[test]
    fn rejects_empty_body() {
        let err = validate(&payload("title", "")).unwrap_err();

        assert_eq!(err.0[0].field, "body");
        assert_eq!(err.to_string(), "Note body cannot be empty.");
    }

    #[test]
    fn collects_all_violations() {
        let err = validate(&payload("", "")).unwrap_err();

        assert_eq!(err.0.len(), 2);
        assert_eq!(
            err.to_string(),
            "Note title cannot be empty. Note body cannot be empty."
        );
    }

    #[test]
    fn title_length_counts_characters() {
        let at_limit = "é".repeat(TITLE_MAX_CHARS);
        assert!(validate(&payload(&at_limit, "body")).is_ok());

        let too_long = "a".repeat(TITLE_MAX_CHARS + 1);
        let err = validate(&payload(&too_long, "body")).unwrap_err();
        assert_eq!(err.to_string(), "Note title cannot exceed 255 characters.");
    }

    #[test]
    fn rejects_nul_characters() {
        let err = validate(&payload("ti\0tle", "bo\0dy")).unwrap_err();

        assert_eq!(err.0.len(), 2);
        assert_eq!(err.0[0].field, "title");
        assert_eq!(err.0[1].field, "body");
        assert_eq!(
            err.to_string(),
            "Note title cannot contain NUL characters. Note body cannot contain NUL characters."
        );
    }
}
