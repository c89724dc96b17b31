//! Session manager
//!
//! Drives register, login and logout over the credential store and tracks
//! whether the local user is anonymous or authenticated. Failed logins never
//! touch storage; only an explicit logout clears the session.

use log::{info, warn};

use super::results::{LoginResult, LogoutResult, RegisterResult};
use super::state::SessionState;
use crate::auth::{UserRecord, validate_form};
use crate::error::{AuthError, SessionError, StorageError, ValidationError};
use crate::storage::CredentialStore;

pub const CONFIRM_PASSWORD_FIELD: &str = "confirmPassword";
pub const PASSWORD_MISMATCH_MESSAGE: &str = "Passwords do not match";

pub struct SessionManager {
    store: CredentialStore,
    state: SessionState,
}

impl SessionManager {
    /// Starts anonymous regardless of what storage holds.
    pub fn new(store: CredentialStore) -> Self {
        Self {
            store,
            state: SessionState::Anonymous,
        }
    }

    /// Starts from whatever session storage already holds.
    ///
    /// Unreadable storage starts the manager anonymous.
    pub fn restore(store: CredentialStore) -> Self {
        let state = match store.get() {
            Ok(Some(record)) => {
                info!("Restored session for user {}", record.username);
                SessionState::Authenticated {
                    username: record.username,
                }
            }
            Ok(None) => SessionState::Anonymous,
            Err(e) => {
                warn!("Could not restore session, starting anonymous: {}", e);
                SessionState::Anonymous
            }
        };
        Self { store, state }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Validates the candidate, checks the confirmation and stores the record.
    ///
    /// On any validation error nothing is written and the state is unchanged.
    pub fn register(
        &mut self,
        candidate: UserRecord,
        confirm_password: &str,
    ) -> Result<RegisterResult, SessionError> {
        let mut errors = validate_form(&candidate);
        if candidate.password != confirm_password {
            errors.push(ValidationError::new(
                CONFIRM_PASSWORD_FIELD,
                PASSWORD_MISMATCH_MESSAGE,
            ));
        }

        if !errors.is_empty() {
            info!(
                "Registration rejected with {} validation errors",
                errors.len()
            );
            return Err(errors.into());
        }

        self.store.put(&candidate)?;
        info!("Registered user {}", candidate.username);

        self.state = SessionState::Authenticated {
            username: candidate.username.clone(),
        };
        Ok(RegisterResult {
            username: candidate.username,
        })
    }

    /// Checks the credentials against the stored record and refreshes the session.
    pub fn login(&mut self, username: &str, password: &str) -> Result<LoginResult, SessionError> {
        if username.is_empty() || password.is_empty() {
            return Err(AuthError::MissingCredentials.into());
        }

        let record = match self.current_record()? {
            Some(record) => record,
            None => {
                warn!("Login attempted for {} with no stored account", username);
                return Err(AuthError::NoAccountFound.into());
            }
        };

        if !record.matches(username, password) {
            warn!("Invalid credentials supplied for {}", username);
            return Err(AuthError::InvalidCredentials.into());
        }

        self.store.put(&record)?;
        info!("User {} logged in", record.username);

        self.state = SessionState::Authenticated {
            username: record.username.clone(),
        };
        Ok(LoginResult {
            username: record.username,
        })
    }

    /// Clears the stored session. Always ends anonymous, even if clearing fails.
    ///
    /// When the clear fails the flag may still be in storage, so
    /// [`is_authenticated`](Self::is_authenticated) can keep reporting true
    /// until a later logout succeeds. Callers that need both views to agree
    /// should retry on error.
    pub fn logout(&mut self) -> Result<LogoutResult, SessionError> {
        let was_authenticated = self.state.is_authenticated();
        self.state = SessionState::Anonymous;

        self.store.clear()?;
        info!("Logged out (was authenticated: {})", was_authenticated);
        Ok(LogoutResult { was_authenticated })
    }

    /// The stored record while a session is active.
    pub fn current_user(&mut self) -> Result<Option<UserRecord>, SessionError> {
        let record = self.current_record()?;
        if record.is_none() && self.state.is_authenticated() {
            warn!("Session flag gone from storage, dropping to anonymous");
            self.state = SessionState::Anonymous;
        }
        Ok(record)
    }

    pub fn is_authenticated(&self) -> bool {
        self.store.is_authenticated()
    }

    fn current_record(&mut self) -> Result<Option<UserRecord>, StorageError> {
        self.store.get().inspect_err(|e| {
            if matches!(e, StorageError::Corrupted(_)) {
                warn!("Stored session is corrupted, dropping to anonymous");
                self.state = SessionState::Anonymous;
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::rules::PASSWORD_MESSAGE;
    use crate::storage::credentials::{LOGGED_IN_KEY, USER_DATA_KEY};
    use crate::storage::{KeyValueStore, MemoryStore};
    use std::sync::Arc;

    // Reads through to memory, refuses removals
    struct StuckStore(MemoryStore);

    impl KeyValueStore for StuckStore {
        fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
            self.0.get(key)
        }

        fn multi_set(&self, batch: &[(&str, String)]) -> Result<(), StorageError> {
            self.0.multi_set(batch)
        }

        fn multi_remove(&self, _keys: &[&str]) -> Result<(), StorageError> {
            Err(StorageError::Unavailable("read only".into()))
        }
    }

    fn alice() -> UserRecord {
        UserRecord::new("alice_1", "a@b.com", "Abcdefg1")
    }

    fn manager() -> (SessionManager, Arc<MemoryStore>) {
        let backend = Arc::new(MemoryStore::new());
        let manager = SessionManager::new(CredentialStore::new(backend.clone()));
        (manager, backend)
    }

    #[test]
    fn test_register_authenticates() {
        let (mut manager, _) = manager();
        let result = manager.register(alice(), "Abcdefg1").unwrap();

        assert_eq!(result.username, "alice_1");
        assert_eq!(manager.state().username(), Some("alice_1"));
        assert_eq!(manager.current_user().unwrap(), Some(alice()));
        assert!(manager.is_authenticated());
    }

    #[test]
    fn test_register_short_password_leaves_storage_untouched() {
        let (mut manager, backend) = manager();
        let candidate = UserRecord::new("alice_1", "a@b.com", "short");
        let err = manager.register(candidate, "short").unwrap_err();

        assert!(
            err.validation_errors()
                .iter()
                .any(|e| e.field == "password" && e.message == PASSWORD_MESSAGE)
        );
        assert!(backend.is_empty());
        assert_eq!(manager.state(), &SessionState::Anonymous);
    }

    #[test]
    fn test_register_mismatch_appends_confirmation_error() {
        let (mut manager, backend) = manager();
        let err = manager
            .register(UserRecord::new("", "a@b.com", "Abcdefg1"), "Abcdefg2")
            .unwrap_err();

        let errors = err.validation_errors();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].field, "username");
        assert_eq!(errors[1].field, CONFIRM_PASSWORD_FIELD);
        assert_eq!(errors[1].message, PASSWORD_MISMATCH_MESSAGE);
        assert!(backend.is_empty());
    }

    #[test]
    fn test_register_overwrites_previous_record() {
        let (mut manager, _) = manager();
        manager.register(alice(), "Abcdefg1").unwrap();
        let bob = UserRecord::new("bob", "bob@b.com", "Bobpass12");
        manager.register(bob.clone(), "Bobpass12").unwrap();
        assert_eq!(manager.current_user().unwrap(), Some(bob));
    }

    #[test]
    fn test_login_without_account() {
        let (mut manager, _) = manager();
        let err = manager.login("alice_1", "Abcdefg1").unwrap_err();
        assert!(matches!(err, SessionError::Auth(AuthError::NoAccountFound)));
        assert!(!manager.state().is_authenticated());
    }

    #[test]
    fn test_login_requires_both_fields() {
        let (mut manager, _) = manager();
        manager.register(alice(), "Abcdefg1").unwrap();
        let err = manager.login("alice_1", "").unwrap_err();
        assert!(matches!(
            err,
            SessionError::Auth(AuthError::MissingCredentials)
        ));
    }

    #[test]
    fn test_wrong_password_keeps_record() {
        let (mut manager, _) = manager();
        manager.register(alice(), "Abcdefg1").unwrap();

        let err = manager.login("alice_1", "Wrongpass1").unwrap_err();
        assert!(matches!(
            err,
            SessionError::Auth(AuthError::InvalidCredentials)
        ));
        assert_eq!(manager.current_user().unwrap(), Some(alice()));
    }

    #[test]
    fn test_login_after_restart() {
        let backend = Arc::new(MemoryStore::new());
        let mut first = SessionManager::new(CredentialStore::new(backend.clone()));
        first.register(alice(), "Abcdefg1").unwrap();

        let mut second = SessionManager::new(CredentialStore::new(backend.clone()));
        assert!(!second.state().is_authenticated());
        let result = second.login("alice_1", "Abcdefg1").unwrap();
        assert_eq!(result.username, "alice_1");
        assert!(second.state().is_authenticated());
    }

    #[test]
    fn test_logout_is_idempotent() {
        let (mut manager, _) = manager();
        manager.register(alice(), "Abcdefg1").unwrap();

        assert!(manager.logout().unwrap().was_authenticated);
        assert_eq!(manager.current_user().unwrap(), None);
        assert!(!manager.is_authenticated());

        assert!(!manager.logout().unwrap().was_authenticated);
        assert_eq!(manager.state(), &SessionState::Anonymous);
    }

    #[test]
    fn test_failed_logout_is_anonymous_but_flag_remains() {
        let mut manager =
            SessionManager::new(CredentialStore::new(Arc::new(StuckStore(MemoryStore::new()))));
        manager.register(alice(), "Abcdefg1").unwrap();

        let err = manager.logout().unwrap_err();
        assert!(matches!(
            err,
            SessionError::Storage(StorageError::Unavailable(_))
        ));
        assert_eq!(manager.state(), &SessionState::Anonymous);
        assert!(manager.is_authenticated());
    }

    #[test]
    fn test_restore_reads_existing_session() {
        let backend = Arc::new(MemoryStore::new());
        CredentialStore::new(backend.clone()).put(&alice()).unwrap();

        let manager = SessionManager::restore(CredentialStore::new(backend.clone()));
        assert_eq!(manager.state().username(), Some("alice_1"));
    }

    #[test]
    fn test_corrupted_record_fails_closed() {
        let (mut manager, backend) = manager();
        manager.register(alice(), "Abcdefg1").unwrap();
        backend
            .multi_set(&[
                (USER_DATA_KEY, "garbage".to_string()),
                (LOGGED_IN_KEY, "true".to_string()),
            ])
            .unwrap();

        let err = manager.current_user().unwrap_err();
        assert!(matches!(
            err,
            SessionError::Storage(StorageError::Corrupted(_))
        ));
        assert_eq!(manager.state(), &SessionState::Anonymous);

        let restored = SessionManager::restore(CredentialStore::new(backend.clone()));
        assert_eq!(restored.state(), &SessionState::Anonymous);
    }
}
