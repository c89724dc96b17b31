//! Logging utilities
//!
//! Provides logging setup and configuration.

/// Setup logging for the client core.
///
/// Honours `RUST_LOG` and falls back to `info`. Safe to call more than once.
pub fn init_logging() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();
}
