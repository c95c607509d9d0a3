//! Bookshelf messages and translation strings

use std::collections::{BTreeMap, HashSet};
use std::fmt;

use serde::de::{Deserializer, MapAccess, Visitor};
use serde::Deserialize;
use serde_json::Value;
use station_core::{LogOnce, Message};

/// A JSON object's entries in file order, duplicates included
struct OrderedEntries(Vec<(String, Value)>);

impl<'de> Deserialize<'de> for OrderedEntries {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct EntriesVisitor;

        impl<'de> Visitor<'de> for EntriesVisitor {
            type Value = OrderedEntries;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("an object of message keys to texts")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<OrderedEntries, A::Error> {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some(entry) = map.next_entry::<String, serde_json::Value>()? {
                    entries.push(entry);
                }
                Ok(OrderedEntries(entries))
            }
        }

        deserializer.deserialize_map(EntriesVisitor)
    }
}

/// Messages shown when the player reads a station bookshelf, in file order
#[derive(Debug, Clone, Default)]
pub struct BookshelfMessages {
    messages: Vec<Message>,
}

impl BookshelfMessages {
    pub fn new(messages: Vec<Message>) -> Self {
        Self { messages }
    }

    /// Parse a bookshelf file (`{ "<key>": "<text>" }`, kept in file order).
    /// Entries with an empty key, a repeated key, or a non-string text are
    /// logged and skipped.
    pub fn from_json(json: &str, log: &LogOnce) -> Result<Self, serde_json::Error> {
        let OrderedEntries(entries) = serde_json::from_str(json)?;
        let mut seen = HashSet::new();
        let mut messages = Vec::with_capacity(entries.len());

        for (i, (key, value)) in entries.into_iter().enumerate() {
            if key.trim().is_empty() {
                log.warn(format!("Ignored bookshelf message #{}: missing key", i));
                continue;
            }
            let Value::String(text) = value else {
                log.warn(format!("Ignored bookshelf message '{}': text is not a string", key));
                continue;
            };
            if !seen.insert(key.clone()) {
                log.warn(format!("Ignored bookshelf message '{}': duplicate key", key));
                continue;
            }
            messages.push(Message::new(key, text));
        }

        Ok(Self { messages })
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

/// Translation strings for the current locale
#[derive(Debug, Clone, Default)]
pub struct Translations {
    entries: BTreeMap<String, String>,
}

impl Translations {
    pub fn new(entries: BTreeMap<String, String>) -> Self {
        Self { entries }
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        Ok(Self {
            entries: serde_json::from_str(json)?,
        })
    }

    /// Messages for the numbered keys `{prefix}.{n}` with `n` in `min..=max`.
    /// Numbers with no translation are left out.
    pub fn numbered(&self, prefix: &str, min: u32, max: u32) -> Vec<Message> {
        (min..=max)
            .filter_map(|n| {
                let key = format!("{}.{}", prefix, n);
                let text = self.entries.get(&key)?.clone();
                Some(Message::new(key, text))
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
