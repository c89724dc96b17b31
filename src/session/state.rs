//! Session state
//!
//! The two observable states of the local session.

/// Whether a user is currently authenticated on this device.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Anonymous,
    Authenticated { username: String },
}

impl SessionState {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, SessionState::Authenticated { .. })
    }

    /// Returns the username of the authenticated user, if any.
    pub fn username(&self) -> Option<&str> {
        match self {
            SessionState::Authenticated { username } => Some(username.as_str()),
            SessionState::Anonymous => None,
        }
    }
}
