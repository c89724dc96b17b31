//! Session result types
//!
//! Defines result structures returned by session operations.

/// Result of a successful registration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterResult {
    pub username: String,
}

/// Result of a successful login
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginResult {
    pub username: String,
}

/// Result of a logout operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogoutResult {
    pub was_authenticated: bool,
}
