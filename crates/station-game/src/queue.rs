//! Live message queue — non-repeating, optionally shuffled and looping
//!
//! The queue snapshots its source at the start of each pass and hands out
//! that snapshot one message at a time. The source is only consulted again
//! once the pass is used up, so edits to the content show up on the next
//! pass without ever repeating a key inside the current one.

use std::collections::{HashSet, VecDeque};
use std::fmt;

use rand::seq::SliceRandom;
use rand::Rng;
use station_core::{Message, MessageSource};

/// A message returned by [`LiveMessageQueue::next`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueuedMessage {
    pub message: Message,
    /// Whether another call would return a message
    /// (more left in this pass, or the queue loops)
    pub has_more: bool,
}

/// Serves messages from a live source without repeats within a pass
pub struct LiveMessageQueue {
    source: Box<dyn MessageSource>,
    looping: bool,
    shuffle: bool,
    remaining: VecDeque<Message>,
    /// Whether a pass has ever been started
    started: bool,
}

impl LiveMessageQueue {
    pub fn new(looping: bool, shuffle: bool, source: impl MessageSource + 'static) -> Self {
        Self {
            source: Box::new(source),
            looping,
            shuffle,
            remaining: VecDeque::new(),
            started: false,
        }
    }

    /// Get the next message, starting a new pass if needed.
    ///
    /// Returns `None` when there's nothing to show: the source is empty, or a
    /// non-looping queue already finished its only pass.
    pub fn next<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<QueuedMessage> {
        if self.remaining.is_empty() && !self.start_pass(rng) {
            return None;
        }

        let message = self.remaining.pop_front()?;
        Some(QueuedMessage {
            message,
            has_more: !self.remaining.is_empty() || self.looping,
        })
    }

    /// Refill `remaining` from the source. Returns false if no pass could start.
    fn start_pass<R: Rng + ?Sized>(&mut self, rng: &mut R) -> bool {
        if self.started && !self.looping {
            return false;
        }

        let mut seen = HashSet::new();
        let mut messages: Vec<Message> = self
            .source
            .fetch()
            .into_iter()
            .filter(|m| seen.insert(m.key.clone()))
            .collect();
        if messages.is_empty() {
            return false;
        }

        if self.shuffle {
            messages.shuffle(rng);
        }
        self.remaining = messages.into();
        self.started = true;
        true
    }

    /// Whether the queue will never return another message
    pub fn is_exhausted(&self) -> bool {
        self.started && !self.looping && self.remaining.is_empty()
    }
}

impl fmt::Debug for LiveMessageQueue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LiveMessageQueue")
            .field("looping", &self.looping)
            .field("shuffle", &self.shuffle)
            .field("remaining", &self.remaining.len())
            .field("started", &self.started)
            .finish()
    }
}
