pub mod auth;
pub mod config;
pub mod error;
pub mod exercise;
pub mod fetch;
pub mod logging;
pub mod session;
pub mod storage;

pub use auth::{Field, UserRecord, validate_field, validate_form};
pub use error::handlers::session_error_message;
pub use error::{AuthError, FetchError, SessionError, StorageError, ValidationError};
pub use exercise::Exercise;
pub use fetch::{FetchSlot, FetchState, ResourceFetcher};
pub use session::{SessionManager, SessionState};
pub use storage::{CredentialStore, FileStore, KeyValueStore, MemoryStore};
