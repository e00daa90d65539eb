//! Game modules

pub mod display;
pub mod moves;
pub mod opponent;
pub mod round;
pub mod scoreboard;

pub use display::{InputGate, PresentationSink};
pub use moves::{Move, Outcome};
pub use opponent::RandomOpponent;
pub use round::{RoundController, RoundHandle, RoundReply};
pub use scoreboard::{ScoreStore, Scoreboard};
