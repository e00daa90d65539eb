//! Interactive session loop

use std::io::BufRead;

use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use crate::app::AppState;
use crate::game::RoundReply;
use crate::util::time::uptime_secs;

use super::command::{Command, CommandError};
use super::render::{notice, render_banner, render_help, render_scores, render_theme};

/// Run the prompt until the player quits, input closes or a shutdown signal arrives
pub async fn run_session(state: AppState) -> anyhow::Result<()> {
    info!(
        think_ms = state.config.timing.think_total.as_millis() as u64,
        prefs = %state.config.prefs_path.display(),
        "Session started"
    );

    let theme = *state.palette.read();
    render_banner(theme);
    render_theme(theme);
    render_help(theme);

    let mut lines = spawn_stdin_reader();
    let shutdown = shutdown_signal();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = &mut shutdown => break,
            line = lines.recv() => {
                let line = match line {
                    Some(line) => line?,
                    None => {
                        info!("Input closed, ending session");
                        break;
                    }
                };

                match line.parse::<Command>() {
                    Ok(Command::Quit) => break,
                    Ok(cmd) => handle_command(&state, cmd).await?,
                    Err(CommandError::Empty) => {}
                    Err(e) => notice(&format!("{e}. Type \"help\" for commands.")),
                }
            }
        }
    }

    Ok(())
}

async fn handle_command(state: &AppState, cmd: Command) -> anyhow::Result<()> {
    match cmd {
        Command::Throw(mv) => {
            if !state.gate.is_enabled() {
                notice("Hold on, the computer is still thinking.");
                return Ok(());
            }

            let pending = state.round.submit(mv).await?;
            tokio::spawn(async move {
                match pending.outcome().await {
                    Ok(RoundReply::Resolved(result)) => {
                        debug!(outcome = ?result.outcome, resolved_at_ms = result.resolved_at_ms, "Round finished");
                    }
                    Ok(RoundReply::Rejected) => debug!("Move rejected while opponent was thinking"),
                    Ok(RoundReply::Cancelled) => debug!("Round cancelled by reset"),
                    Err(e) => warn!(error = %e, "Round result lost"),
                }
            });
        }
        Command::PlayAgain => {
            if !state.gate.is_enabled() || !state.round.play_again().await? {
                notice("Wait for the computer to finish first.");
            }
        }
        Command::Reset => state.round.reset_all().await?,
        Command::Theme => {
            // Toggling writes the prefs file
            let store = state.theme.clone();
            let theme = tokio::task::spawn_blocking(move || store.lock().toggle()).await?;
            *state.palette.write() = theme;
            render_theme(theme);
        }
        Command::Scores => {
            let snapshot = state.round.snapshot().await?;
            let theme = *state.palette.read();
            render_scores(&snapshot.scores, theme);
            println!(
                "  {} rounds since last reset, session up {}s",
                snapshot.scores.total(),
                uptime_secs()
            );
        }
        Command::Export => {
            let snapshot = state.round.snapshot().await?;
            println!("{}", serde_json::to_string_pretty(&snapshot)?);
        }
        Command::Help => render_help(*state.palette.read()),
        Command::Quit => {}
    }

    Ok(())
}

/// Read stdin lines on a detached thread so a pending read never holds up shutdown
fn spawn_stdin_reader() -> mpsc::Receiver<std::io::Result<String>> {
    let (tx, rx) = mpsc::channel(16);

    std::thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            if tx.blocking_send(line).is_err() {
                break;
            }
        }
    });

    rx
}

/// Ctrl+C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install signal handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, ending session");
        }
        _ = terminate => {
            info!("Received terminate signal, ending session");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::game::round::RoundState;
    use crate::game::{InputGate, Move, Scoreboard};
    use crate::store::theme::THEME_KEY;
    use crate::store::{PrefsFile, Theme};
    use std::path::Path;
    use tempfile::tempdir;
    use tokio_test::assert_ok;

    fn start(prefs_path: &Path) -> AppState {
        let prefs = prefs_path.display().to_string();
        let config = assert_ok!(Config::from_lookup(|key| match key {
            "RPS_PREFS_PATH" => Some(prefs.clone()),
            "RPS_SEED" => Some("7".to_string()),
            _ => None,
        }));
        let (state, controller) = AppState::new(config);
        tokio::spawn(controller.run());
        state
    }

    #[tokio::test]
    async fn locked_gate_refuses_throws_and_play_again() {
        let dir = tempdir().unwrap();
        let state = start(&dir.path().join("prefs.json"));
        // Controller enables the gate on startup
        assert_ok!(state.round.snapshot().await);

        state.gate.clone().set_enabled(false);
        assert_ok!(handle_command(&state, Command::Throw(Move::Rock)).await);
        assert_ok!(handle_command(&state, Command::PlayAgain).await);

        let snapshot = assert_ok!(state.round.snapshot().await);
        assert_eq!(snapshot.state, RoundState::Idle);
        assert!(!snapshot.thinking);
    }

    #[tokio::test]
    async fn throw_starts_round_and_reset_clears_it() {
        let dir = tempdir().unwrap();
        let state = start(&dir.path().join("prefs.json"));
        assert_ok!(state.round.snapshot().await);
        assert!(state.gate.is_enabled());

        assert_ok!(handle_command(&state, Command::Throw(Move::Paper)).await);
        let snapshot = assert_ok!(state.round.snapshot().await);
        assert!(snapshot.thinking);
        assert!(!state.gate.is_enabled());

        assert_ok!(handle_command(&state, Command::Scores).await);
        assert_ok!(handle_command(&state, Command::Export).await);

        assert_ok!(handle_command(&state, Command::Reset).await);
        let snapshot = assert_ok!(state.round.snapshot().await);
        assert_eq!(snapshot.state, RoundState::Idle);
        assert!(!snapshot.thinking);
        assert_eq!(snapshot.scores, Scoreboard::default());
        assert!(state.gate.is_enabled());
    }

    #[tokio::test]
    async fn theme_toggle_persists_and_repaints() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        let state = start(&path);
        assert_eq!(*state.palette.read(), Theme::Dark);

        assert_ok!(handle_command(&state, Command::Theme).await);

        assert_eq!(*state.palette.read(), Theme::Light);
        assert_eq!(state.theme.lock().current(), Theme::Light);
        let stored = assert_ok!(PrefsFile::new(&path).get(THEME_KEY));
        assert_eq!(stored.as_deref(), Some("light"));
    }
}
