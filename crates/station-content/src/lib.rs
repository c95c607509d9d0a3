//! Station Content - Content-pack registries and loading
//!
//! Reads the JSON files of a content pack (stops, tourists, bookshelf
//! messages, translations), validates each entry, and exposes the result
//! through a shared handle that can be hot-reloaded while queues read from it.

mod condition;
mod error;
mod messages;
mod pack;
mod stops;
mod tourists;

pub use condition::{AlwaysTrue, ConditionEvaluator, FlagConditions};
pub use error::ContentError;
pub use messages::{BookshelfMessages, Translations};
pub use pack::{ContentLoader, ContentPack, PackManifest, ReloadOutcome, SharedContent};
pub use stops::{Facing, Stop, StopRegistry, TransportNetwork};
pub use tourists::{Tourist, TouristMap, TouristRegistry};
