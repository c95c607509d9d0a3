//! Core identifier types

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifies a local player screen in split-screen play
///
/// The main player is screen 0. Each screen owns independent station state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ScreenId(pub u32);

impl ScreenId {
    /// The main player's screen
    pub const MAIN: ScreenId = ScreenId(0);
}

impl Default for ScreenId {
    fn default() -> Self {
        Self::MAIN
    }
}

impl fmt::Display for ScreenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "screen {}", self.0)
    }
}
