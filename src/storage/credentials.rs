//! Credential store
//!
//! Owns the persisted user record, the session token and the logged-in flag.
//! All three keys are written in one batch on `put` and removed in one batch on
//! `clear`.

use log::{debug, info, warn};
use std::sync::Arc;
use uuid::Uuid;

use super::backend::KeyValueStore;
use crate::auth::UserRecord;
use crate::error::StorageError;

pub const USER_DATA_KEY: &str = "USER_DATA";
pub const USER_TOKEN_KEY: &str = "USER_TOKEN";
pub const LOGGED_IN_KEY: &str = "isLoggedIn";

const LOGGED_IN_VALUE: &str = "true";

/// Credential store over an injected key-value backend.
#[derive(Clone)]
pub struct CredentialStore {
    backend: Arc<dyn KeyValueStore>,
}

impl CredentialStore {
    pub fn new(backend: Arc<dyn KeyValueStore>) -> Self {
        Self { backend }
    }

    /// Writes the record and marks the session active.
    pub fn put(&self, record: &UserRecord) -> Result<(), StorageError> {
        let data = serde_json::to_string(record)?;
        let token = Uuid::new_v4().to_string();

        self.backend.multi_set(&[
            (USER_DATA_KEY, data),
            (USER_TOKEN_KEY, token),
            (LOGGED_IN_KEY, LOGGED_IN_VALUE.to_string()),
        ])?;

        info!("Stored credentials for user {}", record.username);
        Ok(())
    }

    /// Returns the stored record only while the session flag is set.
    pub fn get(&self) -> Result<Option<UserRecord>, StorageError> {
        let values = self.backend.multi_get(&[USER_DATA_KEY, LOGGED_IN_KEY])?;
        let (data, flag) = match values.as_slice() {
            [data, flag] => (data.as_deref(), flag.as_deref()),
            _ => {
                return Err(StorageError::Unavailable(
                    "backend returned wrong number of values".into(),
                ));
            }
        };

        match (data, flag) {
            (Some(data), Some(LOGGED_IN_VALUE)) => serde_json::from_str(data)
                .map(Some)
                .map_err(|e| {
                    warn!("Stored user record is unreadable: {}", e);
                    StorageError::Corrupted(USER_DATA_KEY.to_string())
                }),
            _ => {
                debug!("No active session in storage");
                Ok(None)
            }
        }
    }

    /// Ends the session by removing the token, the flag and the record.
    pub fn clear(&self) -> Result<(), StorageError> {
        self.backend
            .multi_remove(&[USER_TOKEN_KEY, USER_DATA_KEY, LOGGED_IN_KEY])?;
        info!("Cleared stored session");
        Ok(())
    }

    /// Lightweight token check. Backend failures count as not authenticated.
    pub fn is_authenticated(&self) -> bool {
        match self.backend.get(USER_TOKEN_KEY) {
            Ok(token) => token.is_some(),
            Err(e) => {
                warn!("Treating session as unauthenticated after storage error: {}", e);
                false
            }
        }
    }
}
