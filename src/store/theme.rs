//! Theme preference

use std::fmt;

use tracing::{info, warn};

use super::prefs::PrefsFile;

/// Preference key holding the theme
pub const THEME_KEY: &str = "rps-theme";

/// Color theme
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// Parse a stored value; anything unrecognized is `None`
    pub fn from_stored(value: &str) -> Option<Self> {
        match value {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    /// Label for the toggle control (names the theme it switches to)
    pub fn toggle_label(self) -> &'static str {
        match self {
            Theme::Light => "Dark Mode",
            Theme::Dark => "Light Mode",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Theme store operations
pub struct ThemeStore {
    prefs: PrefsFile,
    current: Theme,
}

impl ThemeStore {
    /// Read the saved theme once; absent or unrecognized values fall back to dark
    pub fn load(prefs: PrefsFile) -> Self {
        let current = match prefs.get(THEME_KEY) {
            Ok(Some(value)) => Theme::from_stored(&value).unwrap_or_else(|| {
                warn!(value = %value, "Unrecognized saved theme, using default");
                Theme::default()
            }),
            Ok(None) => Theme::default(),
            Err(e) => {
                warn!(path = %prefs.path().display(), error = %e, "Could not read preferences, using default theme");
                Theme::default()
            }
        };

        Self { prefs, current }
    }

    pub fn current(&self) -> Theme {
        self.current
    }

    /// Flip the theme and persist it. The in-memory theme flips even if the write fails.
    pub fn toggle(&mut self) -> Theme {
        self.current = self.current.toggled();

        match self.prefs.set(THEME_KEY, self.current.as_str()) {
            Ok(()) => info!(theme = %self.current, "Theme changed"),
            Err(e) => warn!(theme = %self.current, error = %e, "Failed to save theme"),
        }

        self.current
    }
}
