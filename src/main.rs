//! Workout client core - Entry Point
//!
//! Restores the local session and loads the configured exercise list once.

use log::{error, info, warn};
use std::sync::Arc;

use workout_core::config::AppConfig;
use workout_core::logging::init_logging;
use workout_core::{
    CredentialStore, Exercise, FetchSlot, FetchState, FileStore, ResourceFetcher, SessionManager,
    SessionState,
};

#[tokio::main]
async fn main() {
    // Initialize the logger (env_logger picks up RUST_LOG environment variable)
    init_logging();

    info!("Launching workout client core...");

    if let Err(e) = run().await {
        error!("{}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;

    let backend = FileStore::open(&config.storage_path())?;
    info!("Credential store: {}", backend.path().display());

    let session = SessionManager::restore(CredentialStore::new(Arc::new(backend)));
    match session.state() {
        SessionState::Authenticated { username } => info!("Welcome back, {}", username),
        SessionState::Anonymous => info!("No active session; register or log in to continue"),
    }

    let slot = FetchSlot::<Exercise>::new(ResourceFetcher::with_user_agent(&config.user_agent)?);
    slot.load(&config.exercises_url).await;

    match slot.current() {
        FetchState::Success(exercises) => {
            info!("Loaded {} exercises", exercises.len());
            for exercise in &exercises {
                info!(
                    "{} [{}] targets {}",
                    exercise.name,
                    exercise.exercise_id,
                    exercise.target_muscles_label()
                );
            }
        }
        FetchState::Error(message) => warn!("Could not load exercises: {}", message),
        FetchState::Loading => warn!("Exercise fetch did not settle"),
    }

    Ok(())
}
