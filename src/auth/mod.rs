//! Credential validation
//!
//! Holds the user record model, the static field rule table, and the pure
//! functions that validate registration candidates against it.

pub mod credentials;
pub mod rules;
pub mod validator;

pub use credentials::{Field, UserRecord};
pub use validator::{validate_field, validate_fields, validate_form};
