//! User settings persisted as JSON.
//!
//! Settings live at `<config_dir>/txt-screenshot/settings.json` and only
//! provide defaults for the command line. A missing or unreadable file yields
//! [`Settings::default`]. Display size is fixed and never read from here.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::naming::MAX_COUNTER;

const SETTINGS_FILE: &str = "settings.json";

/// Defaults applied when the matching command-line option is absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Base name of the screenshot file
    pub base_name: String,
    /// Output directory (empty = current directory)
    pub directory: PathBuf,
    /// Append a `YYYY-MM-DD-HH-MM-SS` suffix to the file name
    pub include_timestamp: bool,
    /// Framebuffer device to read
    pub device: PathBuf,
    /// Highest `-N` suffix tried before giving up
    pub max_counter: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_name: "screenshot".to_string(),
            directory: PathBuf::new(),
            include_timestamp: true,
            device: PathBuf::from(crate::DEVICE_PATH),
            max_counter: MAX_COUNTER,
        }
    }
}

impl Settings {
    /// Load settings from the default config directory.
    pub fn load() -> Self {
        match Self::config_dir() {
            Some(dir) => Self::load_from_dir(&dir),
            None => Self::default(),
        }
    }

    /// `<config_dir>/txt-screenshot`, if the platform has a config dir
    pub fn config_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("txt-screenshot"))
    }

    /// Load settings from a specific directory.
    pub fn load_from_dir(dir: &Path) -> Self {
        let path = dir.join(SETTINGS_FILE);
        let contents = match std::fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Self::default(),
            Err(e) => {
                warn!("[Settings] Cannot read {}: {}; using defaults", path.display(), e);
                return Self::default();
            }
        };

        match serde_json::from_str(&contents) {
            Ok(settings) => settings,
            Err(e) => {
                warn!("[Settings] Invalid {}: {}; using defaults", path.display(), e);
                Self::default()
            }
        }
    }
}
