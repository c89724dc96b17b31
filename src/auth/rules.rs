//! Validation rule table
//!
//! Static per-field rules: length bounds and an all-of pattern set with the
//! message reported when any pattern fails.

use regex::Regex;
use std::sync::LazyLock;

use super::credentials::Field;

pub const USERNAME_MIN_LENGTH: usize = 3;
pub const USERNAME_MAX_LENGTH: usize = 20;

pub const USERNAME_MESSAGE: &str =
    "Username must be 3-20 characters and can only contain letters, numbers, and underscores";
pub const EMAIL_MESSAGE: &str = "Please enter a valid email address";
pub const PASSWORD_MESSAGE: &str =
    "Password must be at least 8 characters and contain uppercase, lowercase, and numbers";

/// Declarative rule for one field.
#[derive(Debug)]
pub struct FieldRule {
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
    /// Every pattern must match for the value to pass.
    pub patterns: Vec<Regex>,
    pub message: &'static str,
}

impl FieldRule {
    pub fn pattern_matches(&self, value: &str) -> bool {
        self.patterns.iter().all(|p| p.is_match(value))
    }
}

fn compile(patterns: &[&str]) -> Vec<Regex> {
    patterns
        .iter()
        .map(|p| Regex::new(p).expect("static validation pattern must compile"))
        .collect()
}

static USERNAME_RULE: LazyLock<FieldRule> = LazyLock::new(|| FieldRule {
    min_length: Some(USERNAME_MIN_LENGTH),
    max_length: Some(USERNAME_MAX_LENGTH),
    patterns: compile(&[r"^[a-zA-Z0-9_]+$"]),
    message: USERNAME_MESSAGE,
});

static EMAIL_RULE: LazyLock<FieldRule> = LazyLock::new(|| FieldRule {
    min_length: None,
    max_length: None,
    patterns: compile(&[r"^[^\s@]+@[^\s@]+\.[^\s@]+$"]),
    message: EMAIL_MESSAGE,
});

// Length is enforced by the alphabet pattern so short passwords report the pattern message.
static PASSWORD_RULE: LazyLock<FieldRule> = LazyLock::new(|| FieldRule {
    min_length: None,
    max_length: None,
    patterns: compile(&[r"^[a-zA-Z0-9@$!%*?&]{8,}$", r"[a-z]", r"[A-Z]", r"[0-9]"]),
    message: PASSWORD_MESSAGE,
});

/// Looks up the rule for a field.
pub fn rule_for(field: Field) -> &'static FieldRule {
    match field {
        Field::Username => &*USERNAME_RULE,
        Field::Email => &*EMAIL_RULE,
        Field::Password => &*PASSWORD_RULE,
    }
}
