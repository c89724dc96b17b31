//! Credential persistence
//!
//! Key-value backends and the credential store that owns the user record and
//! the session flag.

pub mod backend;
pub mod credentials;
pub mod filesystem;

pub use backend::{KeyValueStore, MemoryStore};
pub use credentials::CredentialStore;
pub use filesystem::FileStore;
