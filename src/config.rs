//! Host settings. Balance constants live with the game logic, not here.

use serde::Deserialize;

/// Native builds read overrides from this file in the working directory.
#[cfg(not(target_arch = "wasm32"))]
pub const CONFIG_FILE: &str = "cosmic_scrapper.json";

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Minimum seconds between economy ticks.
    pub tick_interval_secs: f64,
    pub autosave_interval_secs: f64,
    /// localStorage key (wasm).
    pub storage_key: String,
    /// Save file path (native).
    pub save_path: String,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            tick_interval_secs: 1.0,
            autosave_interval_secs: 30.0,
            storage_key: "cosmic_scrapper_save".to_string(),
            save_path: "cosmic_scrapper_save.json".to_string(),
        }
    }
}

impl GameConfig {
    /// Parse overrides; missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// The browser has no config file.
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        Self::default()
    }

    /// Read `CONFIG_FILE` if present. An unreadable or malformed file is
    /// logged and ignored.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        let text = match std::fs::read_to_string(CONFIG_FILE) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Self::default(),
            Err(e) => {
                log::warn!("could not read {CONFIG_FILE}, using defaults: {e}");
                return Self::default();
            }
        };
        Self::from_json(&text).unwrap_or_else(|e| {
            log::warn!("malformed {CONFIG_FILE}, using defaults: {e}");
            Self::default()
        })
    }
}
