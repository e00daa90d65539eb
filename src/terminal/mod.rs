//! Terminal frontend

pub mod command;
pub mod render;
pub mod session;

pub use render::{SharedTheme, TerminalGate, TerminalScores, TerminalSink};
pub use session::run_session;
