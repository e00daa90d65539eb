//! Player commands typed at the prompt

use std::str::FromStr;

use crate::game::Move;

/// One line of player input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Throw a move
    Throw(Move),
    /// Clear the table for the next round
    PlayAgain,
    /// Zero the scoreboard, interrupting any round
    Reset,
    /// Toggle light/dark theme
    Theme,
    Scores,
    /// Print the round snapshot as JSON
    Export,
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
            .to_ascii_lowercase();

        if normalized.is_empty() {
            return Err(CommandError::Empty);
        }

        if let Ok(mv) = normalized.parse::<Move>() {
            return Ok(Command::Throw(mv));
        }

        match normalized.as_str() {
            "again" | "a" | "play again" => Ok(Command::PlayAgain),
            "reset" => Ok(Command::Reset),
            "theme" | "t" => Ok(Command::Theme),
            "scores" | "score" => Ok(Command::Scores),
            "export" | "scores json" => Ok(Command::Export),
            "help" | "h" | "?" => Ok(Command::Help),
            "quit" | "q" | "exit" => Ok(Command::Quit),
            _ => Err(CommandError::Unknown(normalized)),
        }
    }
}

/// Input parsing errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("Empty input")]
    Empty,

    #[error("Unknown command: {0}")]
    Unknown(String),
}

/// Help text, one (usage, description) pair per command
pub const HELP: &[(&str, &str)] = &[
    ("rock | r", "throw rock"),
    ("paper | p", "throw paper"),
    ("scissors | s", "throw scissors"),
    ("again | a", "clear the table for another round"),
    ("reset", "zero the scoreboard"),
    ("theme | t", "toggle light/dark theme"),
    ("scores", "show the scoreboard"),
    ("export", "print the current round and scores as JSON"),
    ("help | ?", "show this help"),
    ("quit | q", "leave the game"),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_throws() {
        assert_eq!("rock".parse::<Command>(), Ok(Command::Throw(Move::Rock)));
        assert_eq!("P".parse::<Command>(), Ok(Command::Throw(Move::Paper)));
        assert_eq!("  Scissors\n".parse::<Command>(), Ok(Command::Throw(Move::Scissors)));
    }

    #[test]
    fn parses_controls() {
        assert_eq!("again".parse::<Command>(), Ok(Command::PlayAgain));
        assert_eq!("Play   Again".parse::<Command>(), Ok(Command::PlayAgain));
        assert_eq!("reset".parse::<Command>(), Ok(Command::Reset));
        assert_eq!("t".parse::<Command>(), Ok(Command::Theme));
        assert_eq!("scores".parse::<Command>(), Ok(Command::Scores));
        assert_eq!("Scores  JSON".parse::<Command>(), Ok(Command::Export));
        assert_eq!("?".parse::<Command>(), Ok(Command::Help));
        assert_eq!("exit".parse::<Command>(), Ok(Command::Quit));
    }

    #[test]
    fn rejects_blank_and_unknown_input() {
        assert_eq!("   ".parse::<Command>(), Err(CommandError::Empty));
        assert_eq!(
            "Lizard".parse::<Command>(),
            Err(CommandError::Unknown("lizard".to_string()))
        );
    }
}
