//! Credential record
//!
//! The single user record persisted by the credential store, and the names of
//! the fields validated on registration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The locally registered user. Always replaced whole, never patched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl UserRecord {
    pub fn new(
        username: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            email: email.into(),
            password: password.into(),
        }
    }

    /// Field/value pairs in evaluation order.
    pub fn fields(&self) -> [(Field, &str); 3] {
        [
            (Field::Username, self.username.as_str()),
            (Field::Email, self.email.as_str()),
            (Field::Password, self.password.as_str()),
        ]
    }

    /// Exact match on both username and password.
    pub fn matches(&self, username: &str, password: &str) -> bool {
        self.username == username && self.password == password
    }
}

/// A validated registration field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Username,
    Email,
    Password,
}

impl Field {
    pub fn name(&self) -> &'static str {
        match self {
            Field::Username => "username",
            Field::Email => "email",
            Field::Password => "password",
        }
    }

    /// Name with its first letter upper-cased, as used in "is required" messages.
    pub fn label(&self) -> &'static str {
        match self {
            Field::Username => "Username",
            Field::Email => "Email",
            Field::Password => "Password",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Field {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "username" => Ok(Field::Username),
            "email" => Ok(Field::Email),
            "password" => Ok(Field::Password),
            other => Err(format!("Unknown field: {}", other)),
        }
    }
}
