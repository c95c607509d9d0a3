//! Tourists registry — data-driven NPCs that wander the station

use std::collections::BTreeMap;

use serde::Deserialize;
use station_core::{LogOnce, Message};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct TouristMapData {
    from_map: Option<String>,
    condition: Option<String>,
    tourists: BTreeMap<String, TouristData>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct TouristData {
    index: u32,
    dialogue: Vec<String>,
    dialogue_repeats: bool,
    only_in_areas: Vec<String>,
}

/// A single tourist definition
#[derive(Debug, Clone, PartialEq)]
pub struct Tourist {
    pub id: String,
    /// Sprite index within the tourist sheet of the source map
    pub index: u32,
    pub dialogue: Vec<String>,
    /// Whether dialogue starts over once every line was said
    pub dialogue_repeats: bool,
    /// Station areas this tourist may appear in; empty means anywhere
    pub only_in_areas: Vec<String>,
}

impl Tourist {
    /// Whether this tourist may appear in the given area
    pub fn allowed_in(&self, area: &str) -> bool {
        self.only_in_areas.is_empty()
            || self.only_in_areas.iter().any(|a| a.eq_ignore_ascii_case(area))
    }

    pub fn has_dialogue(&self) -> bool {
        !self.dialogue.is_empty()
    }

    /// Dialogue lines as messages keyed by their position
    pub fn dialogue_messages(&self, map_id: &str) -> Vec<Message> {
        self.dialogue
            .iter()
            .enumerate()
            .map(|(i, line)| Message::new(format!("{}/{}/{}", map_id, self.id, i), line.clone()))
            .collect()
    }
}

/// A group of tourists loaded from the same source map
#[derive(Debug, Clone, PartialEq)]
pub struct TouristMap {
    pub id: String,
    /// Asset path of the map containing the tourists' sprites
    pub from_map: String,
    pub condition: Option<String>,
    pub tourists: Vec<Tourist>,
}

impl TouristMap {
    pub fn tourist(&self, id: &str) -> Option<&Tourist> {
        self.tourists.iter().find(|t| t.id == id)
    }
}

/// All tourist maps provided by a content pack, ordered by ID
#[derive(Debug, Clone, Default)]
pub struct TouristRegistry {
    maps: Vec<TouristMap>,
}

impl TouristRegistry {
    /// Parse a tourists file. Maps that fail validation are logged and skipped.
    pub fn from_json(json: &str, log: &LogOnce) -> Result<Self, serde_json::Error> {
        let raw: BTreeMap<String, serde_json::Value> = serde_json::from_str(json)?;
        let mut maps = Vec::with_capacity(raw.len());

        for (id, value) in raw {
            let data: TouristMapData = match serde_json::from_value(value) {
                Ok(data) => data,
                Err(e) => {
                    log.warn(format!("Ignored tourist map '{}': {}", id, e));
                    continue;
                }
            };
            let Some(from_map) = data.from_map.filter(|m| !m.trim().is_empty()) else {
                log.warn(format!("Ignored tourist map '{}': missing source map", id));
                continue;
            };

            let tourists = data
                .tourists
                .into_iter()
                .map(|(tourist_id, t)| Tourist {
                    id: tourist_id,
                    index: t.index,
                    dialogue: t.dialogue,
                    dialogue_repeats: t.dialogue_repeats,
                    only_in_areas: t.only_in_areas,
                })
                .collect();

            maps.push(TouristMap {
                id,
                from_map,
                condition: data.condition.filter(|c| !c.trim().is_empty()),
                tourists,
            });
        }

        Ok(Self { maps })
    }

    pub fn get(&self, map_id: &str) -> Option<&TouristMap> {
        self.maps.iter().find(|m| m.id == map_id)
    }

    /// Look up a single tourist by map and tourist ID
    pub fn tourist(&self, map_id: &str, tourist_id: &str) -> Option<&Tourist> {
        self.get(map_id)?.tourist(tourist_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &TouristMap> {
        self.maps.iter()
    }

    pub fn len(&self) -> usize {
        self.maps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.maps.is_empty()
    }
}
