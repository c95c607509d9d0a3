//! Per-context message queues, created on first use

use std::collections::HashMap;

use rand::Rng;

use crate::queue::{LiveMessageQueue, QueuedMessage};

/// Identifies the conversation context a queue belongs to
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum QueueKey {
    /// The bookshelf messages, shared by every bookshelf in the station
    Bookshelf,
    /// One tourist's dialogue
    Tourist { map_id: String, tourist_id: String },
    /// A numbered translation pool `{prefix}.{min..=max}`
    Rare {
        prefix: String,
        min: u32,
        max: u32,
        shuffle: bool,
    },
}

impl QueueKey {
    pub fn tourist(map_id: impl Into<String>, tourist_id: impl Into<String>) -> Self {
        QueueKey::Tourist {
            map_id: map_id.into(),
            tourist_id: tourist_id.into(),
        }
    }

    pub fn rare(prefix: impl Into<String>, min: u32, max: u32, shuffle: bool) -> Self {
        QueueKey::Rare {
            prefix: prefix.into(),
            min,
            max,
            shuffle,
        }
    }
}

/// Owns one queue per context so non-repeat tracking never crosses contexts
#[derive(Debug, Default)]
pub struct QueueRegistry {
    queues: HashMap<QueueKey, LiveMessageQueue>,
}

impl QueueRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the queue for a context, creating it with `make_queue` if needed
    pub fn get_or_create(
        &mut self,
        key: QueueKey,
        make_queue: impl FnOnce(&QueueKey) -> LiveMessageQueue,
    ) -> &mut LiveMessageQueue {
        self.queues.entry(key).or_insert_with_key(|key| make_queue(key))
    }

    /// Next message for a context, creating its queue if needed
    pub fn next_for<R: Rng + ?Sized>(
        &mut self,
        key: QueueKey,
        make_queue: impl FnOnce(&QueueKey) -> LiveMessageQueue,
        rng: &mut R,
    ) -> Option<QueuedMessage> {
        self.get_or_create(key, make_queue).next(rng)
    }

    /// Drop every queue (e.g. when a new day starts)
    pub fn clear(&mut self) {
        self.queues.clear();
    }

    pub fn len(&self) -> usize {
        self.queues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queues.is_empty()
    }
}
