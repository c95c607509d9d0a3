//! Station settings with persistence
//!
//! Settings are saved to `~/.config/central-station/settings.toml`

use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// All station settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StationSettings {
    pub content: ContentSettings,
    pub simulation: SimulationSettings,
    pub logging: LoggingSettings,
}

impl StationSettings {
    /// Get the config directory path
    fn config_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("central-station"))
    }

    /// Get the settings file path
    fn settings_path() -> Option<PathBuf> {
        Self::config_dir().map(|p| p.join("settings.toml"))
    }

    /// Load settings from disk, or return defaults if not found
    pub fn load() -> Self {
        let Some(path) = Self::settings_path() else {
            warn!("Could not determine config directory");
            return Self::default();
        };

        if !path.exists() {
            info!("No settings file found, using defaults");
            return Self::default();
        }

        match fs::read_to_string(&path) {
            Ok(content) => match Self::parse(&content) {
                Ok(settings) => {
                    info!("Loaded settings from {:?}", path);
                    settings
                }
                Err(e) => {
                    warn!("Failed to parse settings: {}, using defaults", e);
                    Self::default()
                }
            },
            Err(e) => {
                warn!("Failed to read settings file: {}, using defaults", e);
                Self::default()
            }
        }
    }

    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Whether a settings file has been written
    pub fn is_saved() -> bool {
        Self::settings_path().map(|p| p.exists()).unwrap_or(false)
    }

    /// Save settings to disk
    pub fn save(&self) -> anyhow::Result<()> {
        let Some(dir) = Self::config_dir() else {
            anyhow::bail!("Could not determine config directory");
        };

        let path = dir.join("settings.toml");

        if !dir.exists() {
            fs::create_dir_all(&dir)?;
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(&path, content)?;
        info!("Saved settings to {:?}", path);
        Ok(())
    }
}

/// Where the content pack lives
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentSettings {
    /// Content pack directory
    pub path: PathBuf,
    /// Reload the content pack at the end of every simulated day
    pub hot_reload: bool,
    /// Flags raised for stop and tourist conditions
    pub flags: Vec<String>,
}

impl Default for ContentSettings {
    fn default() -> Self {
        Self {
            path: PathBuf::from("content"),
            hot_reload: true,
            flags: Vec::new(),
        }
    }
}

/// Scripted simulation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationSettings {
    /// Random seed; a fresh seed is picked when unset
    pub seed: Option<u64>,
    /// Number of local split-screen players
    pub screens: u32,
    /// Number of in-game days to play
    pub days: u32,
    /// Station area tourists are spawned into
    pub area: String,
    /// Money each player starts with
    pub starting_money: u32,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            seed: None,
            screens: 1,
            days: 3,
            area: "Lobby".to_string(),
            starting_money: 1000,
        }
    }
}

/// Log output settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Default filter directive, overridden by `RUST_LOG`
    pub level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}
