//! Declarative request validation.
//!
//! Constraints are declared with `#[validate(...)]` on each request type and
//! every constraint carries an explicit code. [`Rules::FIELDS`] lists the
//! request's fields in declaration order together with the message for each
//! code. When a payload is invalid, the reported message is taken from the
//! first violated field and, within it, the first violated code, both in
//! table order.

use std::fmt;

use validator::{Validate, ValidationError, ValidationErrors};

/// Message used when a violation has no entry in the rule table.
pub const FALLBACK_MESSAGE: &str = "param is error";

/// Constraint codes used across request types.
pub mod code {
    pub const REQUIRED: &str = "required";
    pub const MAX_LENGTH: &str = "max_length";
    pub const MUST_MATCH: &str = "must_match";
    pub const EMAIL: &str = "email";
}

/// One constraint of a field and the message reported when it is violated.
#[derive(Debug, Clone, Copy)]
pub struct Constraint {
    pub code: &'static str,
    pub message: &'static str,
}

/// The constraints of one field, in declaration order.
#[derive(Debug, Clone, Copy)]
pub struct FieldRules {
    pub field: &'static str,
    pub constraints: &'static [Constraint],
}

/// Shorthand for building rule tables.
pub const fn rule(code: &'static str, message: &'static str) -> Constraint {
    Constraint { code, message }
}

/// A request type whose validation errors map to fixed messages.
pub trait Rules: Validate {
    /// Fields in declaration order with their constraint messages.
    const FIELDS: &'static [FieldRules];
}

/// Well-formed input that breaks a declared constraint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationFailure {
    /// The field the message refers to, if one was identified.
    pub field: Option<&'static str>,
    pub message: String,
}

impl fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ValidationFailure {}

/// Validate a bound payload, returning it unchanged when it is valid.
pub fn check<T: Rules>(payload: T) -> Result<T, ValidationFailure> {
    match payload.validate() {
        Ok(()) => Ok(payload),
        Err(errors) => Err(resolve(T::FIELDS, &errors)),
    }
}

/// Pick the message for a set of violations from a rule table.
pub fn resolve(fields: &[FieldRules], errors: &ValidationErrors) -> ValidationFailure {
    let violations = errors.field_errors();

    for rules in fields {
        let Some(found) = violations.get(rules.field) else {
            continue;
        };

        let message = rules
            .constraints
            .iter()
            .find(|c| found.iter().any(|e| e.code == c.code))
            .map_or(FALLBACK_MESSAGE, |c| c.message);

        return ValidationFailure {
            field: Some(rules.field),
            message: message.to_string(),
        };
    }

    ValidationFailure {
        field: None,
        message: FALLBACK_MESSAGE.to_string(),
    }
}

/// Rejects empty strings. Missing JSON fields bind as empty, so this covers
/// both absent and blank values.
pub fn required(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::new(code::REQUIRED));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Default, Deserialize, Validate)]
    #[serde(default)]
    struct Probe {
        #[validate(custom(function = "required"), length(max = 3, code = "max_length"))]
        first: String,
        #[validate(custom(function = "required"))]
        second: String,
        #[validate(length(max = 1, code = "unmapped"))]
        third: String,
    }

    impl Rules for Probe {
        const FIELDS: &'static [FieldRules] = &[
            FieldRules {
                field: "first",
                constraints: &[
                    rule(code::REQUIRED, "first is required"),
                    rule(code::MAX_LENGTH, "first is too long"),
                ],
            },
            FieldRules {
                field: "second",
                constraints: &[rule(code::REQUIRED, "second is required")],
            },
            FieldRules {
                field: "third",
                constraints: &[],
            },
        ];
    }

    fn probe(json: &str) -> Probe {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_valid_payload_passes_through() {
        let valid = check(probe(r#"{"first":"abc","second":"x"}"#)).unwrap();
        assert_eq!(valid.first, "abc");
    }

    #[test]
    fn test_first_field_in_declaration_order_wins() {
        let err = check(probe("{}")).unwrap_err();
        assert_eq!(err.field, Some("first"));
        assert_eq!(err.message, "first is required");
    }

    #[test]
    fn test_later_field_reported_when_earlier_ones_pass() {
        let err = check(probe(r#"{"first":"ok"}"#)).unwrap_err();
        assert_eq!(err.message, "second is required");
    }

    #[test]
    fn test_constraint_code_selects_message() {
        let err = check(probe(r#"{"first":"toolong","second":"x"}"#)).unwrap_err();
        assert_eq!(err.message, "first is too long");
    }

    #[test]
    fn test_unmapped_violation_falls_back() {
        let err = check(probe(r#"{"first":"a","second":"b","third":"long"}"#)).unwrap_err();
        assert_eq!(err.field, Some("third"));
        assert_eq!(err.message, FALLBACK_MESSAGE);
    }

    #[test]
    fn test_field_missing_from_table_falls_back() {
        let mut errors = ValidationErrors::new();
        errors.add("ghost", ValidationError::new(code::REQUIRED));

        let failure = resolve(Probe::FIELDS, &errors);
        assert_eq!(failure.field, None);
        assert_eq!(failure.message, FALLBACK_MESSAGE);
    }
}
