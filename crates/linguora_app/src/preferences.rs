use std::fs;
use std::path::{Path, PathBuf};

use engine_logging::{engine_info, engine_warn};
use linguora_engine::{AtomicFileWriter, PersistError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

const PREFERENCES_FILENAME: &str = "preferences.ron";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Theme {
    /// Follow the operating system.
    #[default]
    System,
    Light,
    Dark,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    pub theme: Theme,
}

#[derive(Debug, Error)]
pub enum PreferencesError {
    #[error("cannot serialize preferences: {0}")]
    Serialize(#[from] ron::Error),
    #[error("cannot write preferences: {0}")]
    Write(#[from] PersistError),
}

impl Preferences {
    /// Reads `preferences.ron` from `config_dir`. A missing or unreadable
    /// file yields the defaults.
    pub fn load(config_dir: &Path) -> Self {
        let path = config_dir.join(PREFERENCES_FILENAME);
        let content = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Self::default();
            }
            Err(err) => {
                engine_warn!("Failed to read preferences from {:?}: {}", path, err);
                return Self::default();
            }
        };

        match ron::from_str(&content) {
            Ok(preferences) => preferences,
            Err(err) => {
                engine_warn!("Failed to parse preferences from {:?}: {}", path, err);
                Self::default()
            }
        }
    }

    pub fn save(&self, config_dir: &Path) -> Result<PathBuf, PreferencesError> {
        let content = ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::new())?;
        let writer = AtomicFileWriter::new(config_dir.to_path_buf());
        let path = writer.write(PREFERENCES_FILENAME, content)?;
        engine_info!("Saved preferences to {:?} (theme {:?})", path, self.theme);
        Ok(path)
    }
}
