//! Application state shared by the session loop

use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use tracing::info;

use crate::config::Config;
use crate::game::{RandomOpponent, RoundController, RoundHandle};
use crate::store::{PrefsFile, ThemeStore};
use crate::terminal::{SharedTheme, TerminalGate, TerminalScores, TerminalSink};

/// Round controller wired to the terminal
pub type TerminalController =
    RoundController<TerminalSink, TerminalGate, TerminalScores, RandomOpponent>;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub round: RoundHandle,
    pub gate: TerminalGate,
    pub theme: Arc<Mutex<ThemeStore>>,
    pub palette: SharedTheme,
}

impl AppState {
    /// Build state and the controller that still has to be spawned
    pub fn new(config: Config) -> (Self, TerminalController) {
        let config = Arc::new(config);

        // Theme is read once at startup
        let theme_store = ThemeStore::load(PrefsFile::new(&config.prefs_path));
        let palette: SharedTheme = Arc::new(RwLock::new(theme_store.current()));
        info!(theme = %theme_store.current(), path = %config.prefs_path.display(), "Loaded theme preference");

        let opponent = match config.seed {
            Some(seed) => RandomOpponent::new(seed),
            None => RandomOpponent::from_entropy(),
        };

        let gate = TerminalGate::new();
        let (controller, round) = RoundController::new(
            TerminalSink::new(palette.clone()),
            gate.clone(),
            TerminalScores::new(palette.clone()),
            opponent,
            config.timing,
        );

        let state = Self {
            config,
            round,
            gate,
            theme: Arc::new(Mutex::new(theme_store)),
            palette,
        };

        (state, controller)
    }
}
