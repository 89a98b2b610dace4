#![deny(warnings)]

//! Persistence layer: client-local preferences stored as JSON.

use proj_core::Locale;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

/// Preferences kept across sessions.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    /// Display language.
    pub lang: Locale,
}

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Returns the default preferences path used for local saves.
pub fn default_prefs_path() -> PathBuf {
    PathBuf::from("./saves/preferences.json")
}

/// Load preferences, falling back to defaults when the file is missing or
/// unreadable.
pub fn load_preferences(path: &Path) -> Preferences {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "no preferences file, using defaults");
            return Preferences::default();
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "preferences unreadable, using defaults");
            return Preferences::default();
        }
    };
    match serde_json::from_str(&text) {
        Ok(prefs) => prefs,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "preferences corrupt, using defaults");
            Preferences::default()
        }
    }
}

/// Write preferences, creating parent directories as needed.
pub fn save_preferences(path: &Path, prefs: &Preferences) -> Result<(), PersistError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let text = serde_json::to_string_pretty(prefs)?;
    fs::write(path, text)?;
    debug!(path = %path.display(), lang = %prefs.lang, "preferences saved");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn scratch(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("persistence-{}-{name}", std::process::id()))
            .join("preferences.json")
    }

    #[test]
    fn path_is_json() {
        assert!(default_prefs_path().to_string_lossy().ends_with(".json"));
    }

    #[test]
    fn missing_file_gives_defaults() {
        let prefs = load_preferences(&scratch("missing"));
        assert_eq!(prefs.lang, Locale::En);
    }

    #[test]
    fn save_then_load() {
        let path = scratch("roundtrip");
        save_preferences(&path, &Preferences { lang: Locale::Zh }).unwrap();
        assert_eq!(load_preferences(&path).lang, Locale::Zh);
        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn corrupt_or_unknown_language_falls_back() {
        let path = scratch("corrupt");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, r#"{"lang":"fr"}"#).unwrap();
        assert_eq!(load_preferences(&path), Preferences::default());
        fs::write(&path, "not json").unwrap();
        assert_eq!(load_preferences(&path), Preferences::default());
        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    proptest! {
        #[test]
        fn lang_field_accepts_only_known_codes(code in "[a-z]{2}") {
            let parsed = serde_json::from_str::<Preferences>(&format!(r#"{{"lang":"{code}"}}"#));
            prop_assert_eq!(parsed.is_ok(), code == "en" || code == "zh");
        }
    }
}
