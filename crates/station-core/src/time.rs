//! Game clock for the host game's day cycle
//!
//! Time of day uses the host game's 24-hour "HHMM" encoding, which runs past
//! midnight: 600 is 6:00 AM, 2400 is midnight, and 2600 is 2:00 AM.

use serde::{Deserialize, Serialize};

/// Midnight in HHMM encoding
pub const MIDNIGHT: u32 = 2400;

/// First time of day in a new day (6:00 AM)
pub const DAY_START: u32 = 600;

/// Latest representable time (2:00 AM, when the player passes out)
pub const DAY_END: u32 = 2600;

/// Current in-game day and time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameClock {
    /// Days elapsed since the save was created (starting at 1)
    pub day: u32,
    /// Time of day in HHMM encoding
    pub time_of_day: u32,
}

impl Default for GameClock {
    fn default() -> Self {
        Self {
            day: 1,
            time_of_day: DAY_START,
        }
    }
}

impl GameClock {
    /// Create a clock at a specific day and time
    pub fn new(day: u32, time_of_day: u32) -> Self {
        Self {
            day,
            time_of_day: time_of_day.clamp(DAY_START, DAY_END),
        }
    }

    /// Whether the clock has reached midnight or later
    pub fn is_past_midnight(&self) -> bool {
        self.time_of_day >= MIDNIGHT
    }

    /// Advance by the given number of minutes, saturating at the end of the day
    pub fn advance_minutes(&mut self, minutes: u32) {
        let total = to_minutes(self.time_of_day) + minutes;
        self.time_of_day = from_minutes(total).min(DAY_END);
    }

    /// Roll over to the next day at the day start time
    pub fn start_next_day(&mut self) {
        self.day += 1;
        self.time_of_day = DAY_START;
    }
}

fn to_minutes(hhmm: u32) -> u32 {
    (hhmm / 100) * 60 + hhmm % 100
}

fn from_minutes(minutes: u32) -> u32 {
    (minutes / 60) * 100 + minutes % 60
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_morning_of_day_one() {
        let clock = GameClock::default();
        assert_eq!(clock.day, 1);
        assert_eq!(clock.time_of_day, 600);
        assert!(!clock.is_past_midnight());
    }

    #[test]
    fn test_midnight_boundary() {
        assert!(!GameClock::new(1, 2350).is_past_midnight());
        assert!(GameClock::new(1, 2400).is_past_midnight());
        assert!(GameClock::new(1, 2550).is_past_midnight());
    }

    #[test]
    fn test_advance_carries_hours() {
        let mut clock = GameClock::new(1, 2350);
        clock.advance_minutes(20);
        assert_eq!(clock.time_of_day, 2410);
    }

    #[test]
    fn test_advance_saturates_at_day_end() {
        let mut clock = GameClock::new(1, 2500);
        clock.advance_minutes(600);
        assert_eq!(clock.time_of_day, DAY_END);
    }

    #[test]
    fn test_next_day() {
        let mut clock = GameClock::new(3, 2200);
        clock.start_next_day();
        assert_eq!(clock, GameClock::new(4, 600));
    }
}
