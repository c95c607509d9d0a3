//! Persisted count of visits to the station

use serde::{Deserialize, Serialize};

/// Save data key under which the visit count is stored
pub const VISITS_SAVE_KEY: &str = "central-station.visits";

/// Serializable snapshot of the visit counter
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisitSaveData {
    pub visits: u32,
    /// Day of the most recent visit
    #[serde(default)]
    pub last_visit_day: Option<u32>,
}

/// Counts entries into the station
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VisitCounter {
    visits: u32,
    last_visit_day: Option<u32>,
}

impl VisitCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one entry into the station and return the new count
    pub fn record_entry(&mut self, day: u32) -> u32 {
        self.visits = self.visits.saturating_add(1);
        self.last_visit_day = Some(day);
        self.visits
    }

    pub fn visits(&self) -> u32 {
        self.visits
    }

    pub fn last_visit_day(&self) -> Option<u32> {
        self.last_visit_day
    }

    pub fn to_save_data(&self) -> VisitSaveData {
        VisitSaveData {
            visits: self.visits,
            last_visit_day: self.last_visit_day,
        }
    }

    pub fn from_save_data(data: &VisitSaveData) -> Self {
        Self {
            visits: data.visits,
            last_visit_day: data.last_visit_day,
        }
    }
}
