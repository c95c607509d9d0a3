//! Save/load of the persisted station counters
//!
//! Stores each screen's visit count in a JSON file under the local data directory.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use station_core::ScreenId;
use station_game::{VisitSaveData, VISITS_SAVE_KEY};

/// Current save format version
pub const SAVE_VERSION: u32 = 1;

/// Top-level save data structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveData {
    /// Save format version (for future migration)
    pub version: u32,
    /// Human-readable timestamp
    pub timestamp: String,
    /// Per-screen station counters
    #[serde(default)]
    pub screens: Vec<ScreenSaveData>,
}

/// Saved state for one screen
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScreenSaveData {
    pub screen: ScreenId,
    pub visits: VisitSaveData,
}

impl SaveData {
    pub fn new(screens: Vec<ScreenSaveData>) -> Self {
        Self {
            version: SAVE_VERSION,
            timestamp: chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            screens,
        }
    }

    /// Saved visits for a screen, if any
    pub fn visits_for(&self, screen: ScreenId) -> Option<&VisitSaveData> {
        self.screens
            .iter()
            .find(|s| s.screen == screen)
            .map(|s| &s.visits)
    }
}

/// Get the save directory path, creating it if it doesn't exist
fn save_dir() -> Result<PathBuf> {
    let dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("central-station")
        .join("saves");
    fs::create_dir_all(&dir).context("Failed to create save directory")?;
    Ok(dir)
}

fn save_path() -> Result<PathBuf> {
    Ok(save_dir()?.join(format!("{}.json", VISITS_SAVE_KEY)))
}

/// Save the station counters
pub fn save_game(data: &SaveData) -> Result<()> {
    write_save(&save_path()?, data)
}

/// Load the station counters
pub fn load_game() -> Result<SaveData> {
    read_save(&save_path()?)
}

/// Check if a save file exists
pub fn has_save() -> bool {
    save_path().map(|p| p.exists()).unwrap_or(false)
}

// --- Internal helpers ---

fn write_save(path: &Path, data: &SaveData) -> Result<()> {
    let json = serde_json::to_string_pretty(data).context("Failed to serialize save data")?;
    fs::write(path, json).context("Failed to write save file")?;
    Ok(())
}

fn read_save(path: &Path) -> Result<SaveData> {
    let json = fs::read_to_string(path).context("Failed to read save file")?;
    let data: SaveData = serde_json::from_str(&json).context("Failed to deserialize save data")?;
    Ok(data)
}
