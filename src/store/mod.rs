//! Persisted user preferences

pub mod prefs;
pub mod theme;

pub use prefs::PrefsFile;
pub use theme::{Theme, ThemeStore};
