//! Station Game - Gameplay systems for Central Station
//!
//! Provides the live message queues behind bookshelves, tourist dialogue and
//! strange occurrences, plus ticket menus, tourist spawning, and the
//! per-screen session that ties them to player interactions.

pub mod occurrence;
pub mod queue;
pub mod queue_registry;
pub mod session;
pub mod tickets;
pub mod tourists;
pub mod visits;

pub use occurrence::Occurrence;
pub use queue::{LiveMessageQueue, QueuedMessage};
pub use queue_registry::{QueueKey, QueueRegistry};
pub use session::{
    ColaOutcome, EntryOutcome, SessionManager, StationSession, TicketInteraction, RARE_POOL_MAX,
};
pub use tickets::{purchase, PurchaseResult, TicketMenu, TicketOption, WarpTarget};
pub use tourists::{spawn_tourists, MapLoader, SpawnedTourist};
pub use visits::{VisitCounter, VisitSaveData, VISITS_SAVE_KEY};
