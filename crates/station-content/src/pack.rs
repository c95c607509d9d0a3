//! Content pack loading and the shared, hot-reloadable content handle
//!
//! A content pack is a directory with these optional files:
//! - `manifest.json` — pack ID used as the stop ID namespace
//! - `stops.json`, `tourists.json`, `bookshelf.json`
//! - `i18n/default.json` — translation strings
//!
//! Missing files load as empty registries.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::{RwLock, RwLockReadGuard};
use serde::{Deserialize, Serialize};
use station_core::{LogOnce, Message};
use tracing::{debug, info};

use crate::error::ContentError;
use crate::messages::{BookshelfMessages, Translations};
use crate::stops::StopRegistry;
use crate::tourists::TouristRegistry;

/// Identity of a content pack
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PackManifest {
    pub id: String,
    #[serde(default)]
    pub name: String,
}

/// Everything a content pack provides
#[derive(Debug, Clone, Default)]
pub struct ContentPack {
    pub manifest: PackManifest,
    pub stops: StopRegistry,
    pub tourists: TouristRegistry,
    pub bookshelf: BookshelfMessages,
    pub translations: Translations,
}

impl ContentPack {
    /// Keys of every message this pack can feed into a queue
    pub fn message_keys(&self) -> HashSet<String> {
        let mut keys: HashSet<String> = self
            .bookshelf
            .messages()
            .iter()
            .map(|m| m.key.clone())
            .collect();
        for map in self.tourists.iter() {
            for tourist in &map.tourists {
                keys.extend(tourist.dialogue_messages(&map.id).into_iter().map(|m| m.key));
            }
        }
        keys
    }
}

/// Loads a content pack from a directory
pub struct ContentLoader {
    root: PathBuf,
    log: LogOnce,
}

impl ContentLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            log: LogOnce::new(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Read and validate every file of the pack
    pub fn load(&self) -> Result<ContentPack, ContentError> {
        if !self.root.is_dir() {
            return Err(ContentError::NotFound(self.root.clone()));
        }

        let manifest = match self.read_optional("manifest.json")? {
            Some((path, json)) => {
                serde_json::from_str(&json).map_err(|e| ContentError::Parse(path, e))?
            }
            None => PackManifest {
                id: self.default_id(),
                name: String::new(),
            },
        };

        let stops = match self.read_optional("stops.json")? {
            Some((path, json)) => StopRegistry::from_json(&manifest.id, &json, &self.log)
                .map_err(|e| ContentError::Parse(path, e))?,
            None => StopRegistry::default(),
        };

        let tourists = match self.read_optional("tourists.json")? {
            Some((path, json)) => TouristRegistry::from_json(&json, &self.log)
                .map_err(|e| ContentError::Parse(path, e))?,
            None => TouristRegistry::default(),
        };

        let bookshelf = match self.read_optional("bookshelf.json")? {
            Some((path, json)) => BookshelfMessages::from_json(&json, &self.log)
                .map_err(|e| ContentError::Parse(path, e))?,
            None => BookshelfMessages::default(),
        };

        let translations = match self.read_optional("i18n/default.json")? {
            Some((path, json)) => {
                Translations::from_json(&json).map_err(|e| ContentError::Parse(path, e))?
            }
            None => Translations::default(),
        };

        info!(
            "Loaded content pack '{}': {} stops, {} tourist maps, {} bookshelf messages, {} translations",
            manifest.id,
            stops.len(),
            tourists.len(),
            bookshelf.len(),
            translations.len()
        );

        Ok(ContentPack {
            manifest,
            stops,
            tourists,
            bookshelf,
            translations,
        })
    }

    fn read_optional(&self, relative: &str) -> Result<Option<(PathBuf, String)>, ContentError> {
        let path = self.root.join(relative);
        if !path.exists() {
            debug!("No {} in content pack, using empty defaults", relative);
            return Ok(None);
        }
        let content = fs::read_to_string(&path).map_err(|e| ContentError::Io(path.clone(), e))?;
        Ok(Some((path, content)))
    }

    fn default_id(&self) -> String {
        self.root
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

/// What changed when the shared content was replaced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReloadOutcome {
    /// None of the previous message keys survived the reload
    pub keys_replaced: bool,
}

/// Shared handle to the current content pack
///
/// Message sources hold a clone and read through it on every fetch, so a
/// reload is picked up the next time a queue starts a pass.
#[derive(Debug, Clone, Default)]
pub struct SharedContent {
    pack: Arc<RwLock<ContentPack>>,
}

impl SharedContent {
    pub fn new(pack: ContentPack) -> Self {
        Self {
            pack: Arc::new(RwLock::new(pack)),
        }
    }

    pub fn read(&self) -> RwLockReadGuard<'_, ContentPack> {
        self.pack.read()
    }

    /// Swap in a new pack
    pub fn replace(&self, pack: ContentPack) -> ReloadOutcome {
        let mut current = self.pack.write();
        let old_keys = current.message_keys();
        let new_keys = pack.message_keys();
        *current = pack;

        ReloadOutcome {
            keys_replaced: !old_keys.is_empty() && old_keys.is_disjoint(&new_keys),
        }
    }

    /// Reload from disk. On failure the current pack is kept.
    pub fn reload(&self, loader: &ContentLoader) -> Result<ReloadOutcome, ContentError> {
        let pack = loader.load()?;
        let outcome = self.replace(pack);
        info!("Reloaded content from {}", loader.root().display());
        Ok(outcome)
    }

    /// Live source for the bookshelf messages
    pub fn bookshelf_source(&self) -> impl Fn() -> Vec<Message> {
        let content = self.clone();
        move || content.read().bookshelf.messages().to_vec()
    }

    /// Live source for one tourist's dialogue
    pub fn tourist_dialogue_source(&self, map_id: &str, tourist_id: &str) -> impl Fn() -> Vec<Message> {
        let content = self.clone();
        let map_id = map_id.to_string();
        let tourist_id = tourist_id.to_string();
        move || {
            content
                .read()
                .tourists
                .tourist(&map_id, &tourist_id)
                .map(|t| t.dialogue_messages(&map_id))
                .unwrap_or_default()
        }
    }

    /// Live source for a numbered translation pool
    pub fn numbered_source(&self, prefix: &str, min: u32, max: u32) -> impl Fn() -> Vec<Message> {
        let content = self.clone();
        let prefix = prefix.to_string();
        move || content.read().translations.numbered(&prefix, min, max)
    }
}
