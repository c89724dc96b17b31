//! Error types
//!
//! Defines domain-specific error types for each module of the workout core.

use std::fmt;
use std::io;

/// A single field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ValidationError {}

/// Authentication module errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    MissingCredentials,
    NoAccountFound,
    InvalidCredentials,
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthError::MissingCredentials => write!(f, "Please fill in all fields"),
            AuthError::NoAccountFound => write!(f, "No account found. Please register first."),
            AuthError::InvalidCredentials => write!(f, "Invalid username or password"),
        }
    }
}

impl std::error::Error for AuthError {}

/// Storage module errors
#[derive(Debug)]
pub enum StorageError {
    Io(io::Error),
    Serialization(serde_json::Error),
    Corrupted(String),
    Unavailable(String),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::Io(e) => write!(f, "IO error: {}", e),
            StorageError::Serialization(e) => write!(f, "Serialization error: {}", e),
            StorageError::Corrupted(key) => write!(f, "Stored value is corrupted: {}", key),
            StorageError::Unavailable(msg) => write!(f, "Storage unavailable: {}", msg),
        }
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StorageError::Io(e) => Some(e),
            StorageError::Serialization(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for StorageError {
    fn from(error: io::Error) -> Self {
        StorageError::Io(error)
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(error: serde_json::Error) -> Self {
        StorageError::Serialization(error)
    }
}

/// Remote fetch errors
///
/// The `Display` output is the message carried by `FetchState::Error`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    Transport(String),
    HttpStatus(u16),
    Decode(String),
    SuccessFlagFalse,
    InvalidStructure,
    InvalidItem { index: usize, reason: String },
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::Transport(msg) => write!(f, "Network error: {}", msg),
            FetchError::HttpStatus(status) => write!(f, "HTTP error! status: {}", status),
            FetchError::Decode(msg) => write!(f, "Invalid JSON payload: {}", msg),
            FetchError::SuccessFlagFalse => write!(f, "API success flag is false"),
            FetchError::InvalidStructure => write!(f, "Invalid data structure received from API"),
            FetchError::InvalidItem { index, reason } => {
                write!(f, "Invalid item {} received from API: {}", index, reason)
            }
        }
    }
}

impl std::error::Error for FetchError {}

impl From<reqwest::Error> for FetchError {
    fn from(error: reqwest::Error) -> Self {
        FetchError::Transport(error.to_string())
    }
}

/// Errors returned by session manager operations
#[derive(Debug)]
pub enum SessionError {
    Validation(Vec<ValidationError>),
    Auth(AuthError),
    Storage(StorageError),
}

impl SessionError {
    /// Field errors when this is a validation failure, empty otherwise.
    pub fn validation_errors(&self) -> &[ValidationError] {
        match self {
            SessionError::Validation(errors) => errors.as_slice(),
            _ => &[],
        }
    }
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::Validation(errors) => {
                write!(f, "Validation failed: ")?;
                for (i, e) in errors.iter().enumerate() {
                    if i > 0 {
                        write!(f, "; ")?;
                    }
                    write!(f, "{}", e)?;
                }
                Ok(())
            }
            SessionError::Auth(e) => write!(f, "Authentication error: {}", e),
            SessionError::Storage(e) => write!(f, "Storage error: {}", e),
        }
    }
}

impl std::error::Error for SessionError {}

impl From<AuthError> for SessionError {
    fn from(error: AuthError) -> Self {
        SessionError::Auth(error)
    }
}

impl From<StorageError> for SessionError {
    fn from(error: StorageError) -> Self {
        SessionError::Storage(error)
    }
}

impl From<Vec<ValidationError>> for SessionError {
    fn from(errors: Vec<ValidationError>) -> Self {
        SessionError::Validation(errors)
    }
}

/// Configuration errors
#[derive(Debug)]
pub enum ConfigError {
    Load(config::ConfigError),
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Load(e) => write!(f, "Failed to load configuration: {}", e),
            ConfigError::Invalid(msg) => write!(f, "Invalid configuration: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<config::ConfigError> for ConfigError {
    fn from(error: config::ConfigError) -> Self {
        ConfigError::Load(error)
    }
}
