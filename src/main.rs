//! RPS Arena - rock-paper-scissors against a deliberating computer
//!
//! This is the main entry point. It handles:
//! - Configuration from the environment (and `.env`)
//! - The round controller task (deliberation timers, scoring)
//! - The interactive terminal session
//! - The persisted theme preference

mod app;
mod config;
mod game;
mod store;
mod terminal;
mod util;

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::app::AppState;
use crate::config::{Config, LogFormat};
use crate::terminal::run_session;
use crate::util::time::init_session_time;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Load configuration
    let config = Config::from_env()?;

    // Initialize tracing
    init_tracing(&config);

    // Initialize session time tracking
    init_session_time();

    info!("Starting RPS Arena");

    // Create application state and spawn the round controller
    let (state, controller) = AppState::new(config);
    let controller_task = tokio::spawn(controller.run());

    // Dropping the state's handle stops the controller
    run_session(state).await?;
    controller_task.await?;

    info!("Session ended");
    Ok(())
}

/// Initialize tracing/logging (stderr, so it stays out of the game output)
fn init_tracing(config: &Config) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level));

    let registry = tracing_subscriber::registry().with(env_filter);

    match config.log_format {
        LogFormat::Text => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .with_writer(std::io::stderr),
            )
            .init(),
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init(),
    }
}
