//! Presentation and input collaborators driven by the round controller

use super::moves::Move;

/// Status text while the opponent deliberates
pub const STATUS_THINKING: &str = "Thinking…";
/// Status text while waiting for the player
pub const STATUS_WAITING: &str = "Waiting…";
/// Outcome text once a move is locked in
pub const OUTCOME_LOCKED_IN: &str = "You locked in your throw. Computer is thinking…";
/// Outcome text before a move is made
pub const OUTCOME_PROMPT: &str = "Make your move!";

/// Status text once the opponent has chosen
pub fn chose_status(opponent: Move) -> String {
    format!("Chose {opponent}.")
}

/// Renders the opponent side and round text. Calls are fire-and-forget.
pub trait PresentationSink: Send + 'static {
    /// Cosmetic move shown during the shuffle cycle
    fn show_opponent_provisional(&mut self, mv: Move);
    fn show_opponent_final(&mut self, mv: Move);
    /// Neutral "no choice yet" display
    fn show_opponent_placeholder(&mut self);
    fn set_status_text(&mut self, text: &str);
    fn set_outcome_text(&mut self, text: &str);
    fn highlight_selection(&mut self, selected: Option<Move>);
}

/// Enables or disables the move and "play again" controls
pub trait InputGate: Send + 'static {
    fn set_enabled(&mut self, enabled: bool);
}
