//! Tourist spawning — picks which content-pack tourists appear in the station

use station_content::{ConditionEvaluator, TouristRegistry};
use tracing::{debug, warn};

/// Loads the source maps tourists take their sprites from
pub trait MapLoader {
    /// Load a map asset, returning a description of the failure if it can't be read
    fn load_map(&self, asset_path: &str) -> Result<(), String>;
}

impl<F> MapLoader for F
where
    F: Fn(&str) -> Result<(), String>,
{
    fn load_map(&self, asset_path: &str) -> Result<(), String> {
        self(asset_path)
    }
}

/// A tourist placed in the station for the day
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpawnedTourist {
    pub map_id: String,
    pub tourist_id: String,
    pub sprite_index: u32,
    pub has_dialogue: bool,
}

/// Choose the tourists to spawn in a station area
///
/// Tourist maps whose condition fails are skipped silently. Maps whose source
/// map can't be loaded are logged and skipped; the rest still spawn.
pub fn spawn_tourists(
    registry: &TouristRegistry,
    area: &str,
    conditions: &impl ConditionEvaluator,
    loader: &impl MapLoader,
) -> Vec<SpawnedTourist> {
    let mut spawned = Vec::new();

    for map in registry.iter() {
        if !conditions.check_optional(map.condition.as_deref()) {
            debug!("Tourist map '{}' skipped: condition not met", map.id);
            continue;
        }
        if let Err(e) = loader.load_map(&map.from_map) {
            warn!(
                "Failed to load source map '{}' for tourist map '{}': {}",
                map.from_map, map.id, e
            );
            continue;
        }

        spawned.extend(
            map.tourists
                .iter()
                .filter(|t| t.allowed_in(area))
                .map(|t| SpawnedTourist {
                    map_id: map.id.clone(),
                    tourist_id: t.id.clone(),
                    sprite_index: t.index,
                    has_dialogue: t.has_dialogue(),
                }),
        );
    }

    spawned
}

#[cfg(test)]
mod tests {
    use super::*;

    use station_content::{AlwaysTrue, FlagConditions};
    use station_core::LogOnce;

    const TOURISTS: &str = r#"{
        "Station_Locals": {
            "from_map": "tourists/locals.tmx",
            "tourists": {
                "Gus": { "index": 3, "dialogue": ["Snack?"] },
                "Quiet": { "index": 4, "only_in_areas": ["Platform"] }
            }
        },
        "Station_Broken": {
            "from_map": "tourists/missing.tmx",
            "tourists": { "Lost": { "index": 1 } }
        },
        "Station_Festival": {
            "from_map": "tourists/festival.tmx",
            "condition": "festivalDay",
            "tourists": { "Dancer": { "index": 7 } }
        }
    }"#;

    fn registry() -> TouristRegistry {
        TouristRegistry::from_json(TOURISTS, &LogOnce::new()).unwrap()
    }

    fn loader(path: &str) -> Result<(), String> {
        if path.contains("missing") {
            Err("file not found".into())
        } else {
            Ok(())
        }
    }

    fn ids(spawned: &[SpawnedTourist]) -> Vec<&str> {
        spawned.iter().map(|t| t.tourist_id.as_str()).collect()
    }

    #[test]
    fn test_broken_map_skipped_others_spawn() {
        let spawned = spawn_tourists(&registry(), "Platform", &AlwaysTrue, &loader);
        assert_eq!(ids(&spawned), vec!["Dancer", "Gus", "Quiet"]);
    }

    #[test]
    fn test_condition_and_area_filters() {
        let spawned = spawn_tourists(&registry(), "Lobby", &FlagConditions::new(), &loader);
        assert_eq!(ids(&spawned), vec!["Gus"]);
        assert!(spawned[0].has_dialogue);
        assert_eq!(spawned[0].sprite_index, 3);
        assert_eq!(spawned[0].map_id, "Station_Locals");
    }
}
