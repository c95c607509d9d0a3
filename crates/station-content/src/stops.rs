//! Stops registry — destinations reachable from the transit networks

use std::collections::{BTreeMap, HashSet};
use std::fmt;

use serde::{Deserialize, Serialize};
use station_core::LogOnce;

/// A transit network a stop can belong to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransportNetwork {
    #[serde(alias = "train")]
    Train,
    #[serde(alias = "boat")]
    Boat,
    #[serde(alias = "bus")]
    Bus,
}

impl TransportNetwork {
    pub const ALL: [TransportNetwork; 3] = [
        TransportNetwork::Train,
        TransportNetwork::Boat,
        TransportNetwork::Bus,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            TransportNetwork::Train => "Train",
            TransportNetwork::Boat => "Boat",
            TransportNetwork::Bus => "Bus",
        }
    }
}

impl fmt::Display for TransportNetwork {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Direction the player faces after arriving
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Facing {
    Up,
    Right,
    #[default]
    Down,
    Left,
}

/// Raw stop entry as written by content authors
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct StopData {
    networks: Vec<TransportNetwork>,
    to_location: Option<String>,
    to_tile: Option<[i32; 2]>,
    to_facing: Facing,
    cost: u32,
    display_name: Option<String>,
    display_name_in_combined_lists: Option<String>,
    condition: Option<String>,
}

/// A validated stop
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Stop {
    pub id: String,
    pub networks: Vec<TransportNetwork>,
    pub to_location: String,
    /// Arrival tile; `None` uses the location's default warp arrival
    pub to_tile: Option<(i32, i32)>,
    pub to_facing: Facing,
    pub cost: u32,
    pub display_name: String,
    /// Name shown when several networks are merged into one list
    pub display_name_in_combined_lists: Option<String>,
    pub condition: Option<String>,
}

impl Stop {
    pub fn is_on(&self, network: TransportNetwork) -> bool {
        self.networks.contains(&network)
    }

    /// Display name to use in a list showing the given number of networks
    pub fn name_for_list(&self, network_count: usize) -> &str {
        match &self.display_name_in_combined_lists {
            Some(name) if network_count > 1 => name,
            _ => &self.display_name,
        }
    }
}

/// All stops provided by a content pack, ordered by ID
#[derive(Debug, Clone, Default)]
pub struct StopRegistry {
    stops: Vec<Stop>,
}

impl StopRegistry {
    /// Parse a stops file. Entries that fail validation are logged and skipped.
    pub fn from_json(namespace: &str, json: &str, log: &LogOnce) -> Result<Self, serde_json::Error> {
        let raw: BTreeMap<String, serde_json::Value> = serde_json::from_str(json)?;
        let mut stops = Vec::with_capacity(raw.len());

        for (id, value) in raw {
            let data: StopData = match serde_json::from_value(value) {
                Ok(data) => data,
                Err(e) => {
                    log.warn(format!("Ignored stop '{}': {}", id, e));
                    continue;
                }
            };
            match validate_stop(namespace, id, data) {
                Ok(stop) => stops.push(stop),
                Err(reason) => {
                    log.warn(reason);
                }
            }
        }

        Ok(Self { stops })
    }

    pub fn get(&self, id: &str) -> Option<&Stop> {
        self.stops.iter().find(|s| s.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Stop> {
        self.stops.iter()
    }

    /// Stops that belong to a network
    pub fn on_network(&self, network: TransportNetwork) -> impl Iterator<Item = &Stop> {
        self.stops.iter().filter(move |s| s.is_on(network))
    }

    pub fn len(&self) -> usize {
        self.stops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }
}

fn validate_stop(namespace: &str, id: String, data: StopData) -> Result<Stop, String> {
    let prefix = format!("{}_", namespace);
    if id.trim().is_empty() {
        return Err("Ignored stop with an empty ID".into());
    }
    if !id.starts_with(&prefix) || id.len() == prefix.len() {
        return Err(format!(
            "Ignored stop '{}': ID must be prefixed with '{}'",
            id, prefix
        ));
    }
    if data.networks.is_empty() {
        return Err(format!("Ignored stop '{}': no networks specified", id));
    }
    let Some(to_location) = data.to_location.filter(|l| !l.trim().is_empty()) else {
        return Err(format!("Ignored stop '{}': missing target location", id));
    };
    let Some(display_name) = data.display_name.filter(|n| !n.trim().is_empty()) else {
        return Err(format!("Ignored stop '{}': missing display name", id));
    };

    let mut seen = HashSet::new();
    let mut networks = data.networks;
    networks.retain(|n| seen.insert(*n));

    Ok(Stop {
        id,
        networks,
        to_location,
        to_tile: data.to_tile.map(|[x, y]| (x, y)),
        to_facing: data.to_facing,
        cost: data.cost,
        display_name,
        display_name_in_combined_lists: data
            .display_name_in_combined_lists
            .filter(|n| !n.trim().is_empty()),
        condition: data.condition.filter(|c| !c.trim().is_empty()),
    })
}
