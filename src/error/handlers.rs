//! Error handlers
//!
//! Maps session errors to the single message the presentation layer shows.

use crate::error::types::SessionError;
use log::{error, warn};

pub const RETRY_MESSAGE: &str = "Something went wrong. Please try again.";

/// User-facing message for a session error.
///
/// Validation failures are reported per field, so the summary is the first
/// message. Storage details never reach the user.
pub fn session_error_message(err: &SessionError) -> String {
    match err {
        SessionError::Validation(errors) => errors
            .first()
            .map(|e| e.message.clone())
            .unwrap_or_else(|| RETRY_MESSAGE.to_string()),
        SessionError::Auth(e) => {
            warn!("Session operation rejected: {}", e);
            e.to_string()
        }
        SessionError::Storage(e) => {
            error!("Session storage failure: {}", e);
            RETRY_MESSAGE.to_string()
        }
    }
}
