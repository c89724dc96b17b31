//! Fetch state
//!
//! The three-state lifecycle of one fetch invocation.

use crate::error::FetchError;

/// State of a fetch invocation. Moves from `Loading` to exactly one of the others.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchState<T> {
    Loading,
    Success(Vec<T>),
    Error(String),
}

impl<T> Default for FetchState<T> {
    fn default() -> Self {
        FetchState::Loading
    }
}

impl<T> FetchState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, FetchState::Loading)
    }

    /// Items on success, empty otherwise.
    pub fn items(&self) -> &[T] {
        match self {
            FetchState::Success(items) => items.as_slice(),
            _ => &[],
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            FetchState::Error(message) => Some(message.as_str()),
            _ => None,
        }
    }
}

impl<T> From<Result<Vec<T>, FetchError>> for FetchState<T> {
    fn from(result: Result<Vec<T>, FetchError>) -> Self {
        match result {
            Ok(items) => FetchState::Success(items),
            Err(e) => FetchState::Error(e.to_string()),
        }
    }
}
