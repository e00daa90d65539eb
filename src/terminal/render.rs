//! Terminal implementations of the round collaborators

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use colored::{ColoredString, Colorize};
use parking_lot::RwLock;
use tracing::debug;

use crate::game::{InputGate, Move, Outcome, PresentationSink, ScoreStore, Scoreboard};
use crate::store::Theme;

use super::command::HELP;

/// Theme shared between the session loop and the renderers
pub type SharedTheme = Arc<RwLock<Theme>>;

fn accent(theme: Theme, text: &str) -> ColoredString {
    match theme {
        Theme::Dark => text.bright_cyan().bold(),
        Theme::Light => text.blue().bold(),
    }
}

fn emphasis(theme: Theme, text: &str) -> ColoredString {
    match theme {
        Theme::Dark => text.bright_yellow(),
        Theme::Light => text.magenta(),
    }
}

fn muted(text: &str) -> ColoredString {
    text.dimmed()
}

fn move_label(mv: Move) -> String {
    let name = mv.name();
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Prints opponent and round text to stdout
pub struct TerminalSink {
    theme: SharedTheme,
}

impl TerminalSink {
    pub fn new(theme: SharedTheme) -> Self {
        Self { theme }
    }
}

impl PresentationSink for TerminalSink {
    fn show_opponent_provisional(&mut self, mv: Move) {
        println!("  {} {}", muted("Computer ›"), muted(&format!("shuffling: {}", move_label(mv))));
    }

    fn show_opponent_final(&mut self, mv: Move) {
        let theme = *self.theme.read();
        println!("  {} {}", muted("Computer ›"), accent(theme, &move_label(mv)));
    }

    fn show_opponent_placeholder(&mut self) {
        println!("  {} {}", muted("Computer ›"), muted("?"));
    }

    fn set_status_text(&mut self, text: &str) {
        println!("  {}", muted(&format!("[{text}]")));
    }

    fn set_outcome_text(&mut self, text: &str) {
        let theme = *self.theme.read();
        println!("  {}", emphasis(theme, text));
    }

    fn highlight_selection(&mut self, selected: Option<Move>) {
        if let Some(mv) = selected {
            let theme = *self.theme.read();
            println!("  {} {}", muted("You      ›"), accent(theme, &move_label(mv)));
        }
    }
}

/// Input gate the session loop consults before forwarding throws
#[derive(Clone)]
pub struct TerminalGate {
    enabled: Arc<AtomicBool>,
}

impl TerminalGate {
    pub fn new() -> Self {
        Self {
            enabled: Arc::new(AtomicBool::new(true)),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Acquire)
    }
}

impl Default for TerminalGate {
    fn default() -> Self {
        Self::new()
    }
}

impl InputGate for TerminalGate {
    fn set_enabled(&mut self, enabled: bool) {
        self.enabled.store(enabled, Ordering::Release);
        debug!(enabled, "Input gate updated");
    }
}

/// Scoreboard that re-renders after every change
pub struct TerminalScores {
    board: Scoreboard,
    theme: SharedTheme,
}

impl TerminalScores {
    pub fn new(theme: SharedTheme) -> Self {
        Self {
            board: Scoreboard::new(),
            theme,
        }
    }

    fn render(&self) {
        render_scores(&self.board, *self.theme.read());
    }
}

impl ScoreStore for TerminalScores {
    fn record_result(&mut self, outcome: Outcome) {
        self.board.record(outcome);
        self.render();
    }

    fn reset(&mut self) {
        self.board.clear();
        self.render();
    }

    fn scores(&self) -> Scoreboard {
        self.board
    }
}

pub fn render_scores(board: &Scoreboard, theme: Theme) {
    println!(
        "  {} {}   {} {}   {} {}",
        muted("Wins"),
        accent(theme, &board.wins.to_string()),
        muted("Losses"),
        accent(theme, &board.losses.to_string()),
        muted("Ties"),
        accent(theme, &board.ties.to_string()),
    );
}

pub fn render_banner(theme: Theme) {
    println!("\n{}", "=".repeat(50));
    println!("{}", accent(theme, "  Rock-Paper-Scissors"));
    println!("{}", "=".repeat(50));
}

pub fn render_help(theme: Theme) {
    println!();
    for (usage, description) in HELP {
        println!("  {:<14} {}", emphasis(theme, usage), muted(description));
    }
    println!();
}

pub fn render_theme(theme: Theme) {
    println!(
        "  {} {} {}",
        muted("Theme:"),
        accent(theme, theme.as_str()),
        muted(&format!("(\"theme\" for {})", theme.toggle_label())),
    );
}

pub fn notice(text: &str) {
    println!("  {}", text.red());
}
