//! Registration field validator
//!
//! Evaluates field values against the static rule table. Checks run in a fixed
//! order (emptiness, minimum length, maximum length, pattern) and the first
//! failing check wins.

use super::credentials::{Field, UserRecord};
use super::rules::rule_for;
use crate::error::ValidationError;

/// Validates one field value, returning the first failing rule as an error.
pub fn validate_field(field: Field, value: &str) -> Option<ValidationError> {
    let rule = rule_for(field);

    if value.is_empty() {
        return Some(ValidationError::new(
            field.name(),
            format!("{} is required", field.label()),
        ));
    }

    let length = value.chars().count();

    if let Some(min) = rule.min_length {
        if length < min {
            return Some(ValidationError::new(
                field.name(),
                format!("{} must be at least {} characters", field, min),
            ));
        }
    }

    if let Some(max) = rule.max_length {
        if length > max {
            return Some(ValidationError::new(
                field.name(),
                format!("{} must be less than {} characters", field, max),
            ));
        }
    }

    if !rule.pattern_matches(value) {
        return Some(ValidationError::new(field.name(), rule.message));
    }

    None
}

/// Validates the fields present in a partial candidate, preserving their order.
pub fn validate_fields<'a, I>(fields: I) -> Vec<ValidationError>
where
    I: IntoIterator<Item = (Field, &'a str)>,
{
    fields
        .into_iter()
        .filter_map(|(field, value)| validate_field(field, value))
        .collect()
}

/// Validates a full candidate record in username, email, password order.
pub fn validate_form(record: &UserRecord) -> Vec<ValidationError> {
    validate_fields(record.fields())
}
