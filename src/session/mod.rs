//! Session management
//!
//! Handles registration, login, logout and the anonymous/authenticated
//! lifecycle of the single local user.

pub mod manager;
pub mod results;
pub mod state;

pub use manager::SessionManager;
pub use results::{LoginResult, LogoutResult, RegisterResult};
pub use state::SessionState;
