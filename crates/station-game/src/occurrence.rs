//! Rare "strange occurrences" and the odds of each

use rand::Rng;
use serde::{Deserialize, Serialize};
use station_core::GameClock;

/// A rare event that can fire when the player interacts with the station
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Occurrence {
    /// The cola machine drops a free drink with a message
    ColaMachine,
    /// Strange sounds behind the exit door
    ExitDoorSounds,
    /// The ticket booth or machine shows a strange message
    TicketStrangeMessage,
    /// The station goes dark for the rest of the visit
    DarkStation,
}

impl Occurrence {
    /// Station visits needed before this can fire
    pub fn min_visits(&self) -> u32 {
        match self {
            Occurrence::ColaMachine => 1,
            Occurrence::ExitDoorSounds => 1,
            Occurrence::TicketStrangeMessage => 5,
            Occurrence::DarkStation => 15,
        }
    }

    /// Chance per qualifying interaction (0.0 - 1.0)
    pub fn chance(&self) -> f64 {
        match self {
            Occurrence::ColaMachine => 0.05,
            Occurrence::ExitDoorSounds => 0.05,
            Occurrence::TicketStrangeMessage => 0.05,
            Occurrence::DarkStation => 0.005,
        }
    }

    /// Whether the visit count and time of day allow this to fire at all
    pub fn is_eligible(&self, visits: u32, clock: &GameClock) -> bool {
        if visits < self.min_visits() {
            return false;
        }
        match self {
            Occurrence::DarkStation => clock.is_past_midnight(),
            _ => true,
        }
    }

    /// Roll for this occurrence
    pub fn roll<R: Rng + ?Sized>(&self, visits: u32, clock: &GameClock, rng: &mut R) -> bool {
        self.is_eligible(visits, clock) && rng.gen_bool(self.chance())
    }

    /// Translation key prefix of the messages shown for this occurrence
    pub fn message_prefix(&self) -> &'static str {
        match self {
            Occurrence::ColaMachine => "strange-occurrences.cola",
            Occurrence::ExitDoorSounds => "strange-occurrences.exit-door",
            Occurrence::TicketStrangeMessage => "strange-occurrences.ticket",
            Occurrence::DarkStation => "strange-occurrences.dark-station",
        }
    }
}
