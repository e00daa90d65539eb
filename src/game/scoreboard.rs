//! Win/loss/tie counters

use serde::Serialize;

use super::moves::Outcome;

/// Running score for the session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Scoreboard {
    pub wins: u32,
    pub losses: u32,
    pub ties: u32,
}

impl Scoreboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bump exactly one counter
    pub fn record(&mut self, outcome: Outcome) {
        let counter = match outcome {
            Outcome::PlayerWin => &mut self.wins,
            Outcome::ComputerWin => &mut self.losses,
            Outcome::Tie => &mut self.ties,
        };
        *counter = counter.saturating_add(1);
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Rounds resolved since the last reset
    pub fn total(&self) -> u32 {
        self.wins.saturating_add(self.losses).saturating_add(self.ties)
    }
}

/// Accumulates results and renders the counters
pub trait ScoreStore: Send + 'static {
    fn record_result(&mut self, outcome: Outcome);
    fn reset(&mut self);
    fn scores(&self) -> Scoreboard;
}

impl ScoreStore for Scoreboard {
    fn record_result(&mut self, outcome: Outcome) {
        self.record(outcome);
    }

    fn reset(&mut self) {
        self.clear();
    }

    fn scores(&self) -> Scoreboard {
        *self
    }
}
