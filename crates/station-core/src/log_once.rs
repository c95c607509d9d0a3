//! Deduplicated warnings for content validation
//!
//! Content packs are re-read on every reload, so the same broken entry would
//! otherwise log the same warning over and over.

use std::collections::HashSet;

use parking_lot::Mutex;

/// Remembers which warnings were already logged
#[derive(Debug, Default)]
pub struct LogOnce {
    seen: Mutex<HashSet<String>>,
}

impl LogOnce {
    pub fn new() -> Self {
        Self::default()
    }

    /// Log a warning unless the same text was logged before.
    /// Returns whether the warning was emitted.
    pub fn warn(&self, message: impl Into<String>) -> bool {
        let message = message.into();
        let mut seen = self.seen.lock();
        if seen.contains(&message) {
            return false;
        }
        tracing::warn!("{}", message);
        seen.insert(message);
        true
    }

    pub fn len(&self) -> usize {
        self.seen.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.lock().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_warning_suppressed() {
        let log = LogOnce::new();
        assert!(log.warn("stop 'x' is missing a location"));
        assert!(!log.warn("stop 'x' is missing a location"));
        assert!(log.warn("stop 'y' is missing a location"));
        assert_eq!(log.len(), 2);
    }
}
