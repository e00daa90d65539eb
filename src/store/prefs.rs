//! User-local key/value preference file

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

/// Key/value preferences persisted as a flat JSON object
#[derive(Debug, Clone)]
pub struct PrefsFile {
    path: PathBuf,
}

impl PrefsFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read a single value. A missing file reads as an empty store.
    pub fn get(&self, key: &str) -> Result<Option<String>, PrefsError> {
        Ok(self.load()?.remove(key))
    }

    /// Write a single value, keeping every other key
    pub fn set(&self, key: &str, value: &str) -> Result<(), PrefsError> {
        let mut entries = match self.load() {
            Ok(entries) => entries,
            Err(PrefsError::Json(e)) => {
                warn!(path = %self.path.display(), error = %e, "Overwriting malformed preference file");
                BTreeMap::new()
            }
            Err(e) => return Err(e),
        };
        entries.insert(key.to_string(), value.to_string());

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_vec_pretty(&entries)?)?;

        debug!(path = %self.path.display(), key, value, "Preference saved");
        Ok(())
    }

    fn load(&self) -> Result<BTreeMap<String, String>, PrefsError> {
        match fs::read(&self.path) {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Preference store errors
#[derive(Debug, thiserror::Error)]
pub enum PrefsError {
    #[error("Preference file I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Preference file is not a JSON object of strings: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_file_reads_as_empty() {
        let dir = tempdir().unwrap();
        let prefs = PrefsFile::new(dir.path().join("absent.json"));
        assert_eq!(prefs.get("rps-theme").unwrap(), None);
    }

    #[test]
    fn set_keeps_other_keys_and_creates_parents() {
        let dir = tempdir().unwrap();
        let prefs = PrefsFile::new(dir.path().join("nested/prefs.json"));

        prefs.set("volume", "low").unwrap();
        prefs.set("rps-theme", "light").unwrap();

        assert_eq!(prefs.get("volume").unwrap().as_deref(), Some("low"));
        assert_eq!(prefs.get("rps-theme").unwrap().as_deref(), Some("light"));
    }

    #[test]
    fn malformed_file_is_an_error_on_read_and_replaced_on_write() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        fs::write(&path, "{ not json").unwrap();
        let prefs = PrefsFile::new(&path);

        assert!(matches!(prefs.get("rps-theme"), Err(PrefsError::Json(_))));

        prefs.set("rps-theme", "dark").unwrap();
        assert_eq!(prefs.get("rps-theme").unwrap().as_deref(), Some("dark"));
    }
}
