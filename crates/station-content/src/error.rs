use std::path::PathBuf;

/// Errors that can occur while loading a content pack.
///
/// Only whole-file failures surface here; a malformed entry inside an
/// otherwise valid file is logged and skipped.
#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    #[error("content directory not found: {0}")]
    NotFound(PathBuf),

    #[error("I/O error reading '{0}': {1}")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("failed to parse '{0}': {1}")]
    Parse(PathBuf, #[source] serde_json::Error),
}
