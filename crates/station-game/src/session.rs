//! Per-screen station state and the interactions that drive it
//!
//! Each local player screen gets its own [`StationSession`] with its own RNG,
//! visit counter, dark-station flag and message queues, so split-screen
//! players never affect each other's rolls or message order.

use std::collections::HashMap;

use rand::rngs::StdRng;
use rand::SeedableRng;
use station_content::{ConditionEvaluator, ReloadOutcome, SharedContent, TransportNetwork};
use station_core::{GameClock, ScreenId};
use tracing::{debug, info};

use crate::occurrence::Occurrence;
use crate::queue::{LiveMessageQueue, QueuedMessage};
use crate::queue_registry::{QueueKey, QueueRegistry};
use crate::tickets::TicketMenu;
use crate::visits::{VisitCounter, VisitSaveData};

/// Highest number looked up in a strange-occurrence message pool
pub const RARE_POOL_MAX: u32 = 50;

/// Result of entering the station
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryOutcome {
    pub visits: u32,
    pub is_dark: bool,
    /// Message shown when the station just went dark
    pub dark_message: Option<QueuedMessage>,
}

/// Result of using the cola machine
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColaOutcome {
    /// Regular vending
    Normal,
    /// A free drink drops out, sometimes with a message
    FreeDrink { message: Option<QueuedMessage> },
}

/// Result of opening a ticket booth or machine
#[derive(Debug, Clone)]
pub enum TicketInteraction {
    /// A strange message is shown instead of the menu
    StrangeMessage(QueuedMessage),
    Menu(TicketMenu),
}

/// Station state for one player screen
pub struct StationSession {
    screen: ScreenId,
    content: SharedContent,
    rng: StdRng,
    visits: VisitCounter,
    is_dark: bool,
    queues: QueueRegistry,
}

impl StationSession {
    pub fn new(screen: ScreenId, content: SharedContent, seed: u64) -> Self {
        Self {
            screen,
            content,
            rng: StdRng::seed_from_u64(seed),
            visits: VisitCounter::new(),
            is_dark: false,
            queues: QueueRegistry::new(),
        }
    }

    pub fn screen(&self) -> ScreenId {
        self.screen
    }

    pub fn visits(&self) -> u32 {
        self.visits.visits()
    }

    pub fn is_dark(&self) -> bool {
        self.is_dark
    }

    /// Number of message queues created so far today
    pub fn queue_count(&self) -> usize {
        self.queues.len()
    }

    /// Reset per-day state when a new in-game day starts
    pub fn start_day(&mut self) {
        self.queues.clear();
        self.is_dark = false;
        debug!("{}: station state reset for new day", self.screen);
    }

    /// Record a visit and roll for the station going dark
    pub fn enter_station(&mut self, clock: &GameClock) -> EntryOutcome {
        let visits = self.visits.record_entry(clock.day);

        let mut dark_message = None;
        if !self.is_dark && Occurrence::DarkStation.roll(visits, clock, &mut self.rng) {
            self.is_dark = true;
            info!("{}: the station went dark (visit {})", self.screen, visits);
            dark_message = self.occurrence_message(Occurrence::DarkStation);
        }

        EntryOutcome {
            visits,
            is_dark: self.is_dark,
            dark_message,
        }
    }

    /// The dark state only lasts for the current visit
    pub fn leave_station(&mut self) {
        self.is_dark = false;
    }

    /// Next bookshelf message
    pub fn read_bookshelf(&mut self) -> Option<QueuedMessage> {
        let content = &self.content;
        self.queues.next_for(
            QueueKey::Bookshelf,
            |_| LiveMessageQueue::new(true, true, content.bookshelf_source()),
            &mut self.rng,
        )
    }

    pub fn use_cola_machine(&mut self, clock: &GameClock) -> ColaOutcome {
        if !Occurrence::ColaMachine.roll(self.visits(), clock, &mut self.rng) {
            return ColaOutcome::Normal;
        }
        debug!("{}: cola machine dropped a free drink", self.screen);
        ColaOutcome::FreeDrink {
            message: self.occurrence_message(Occurrence::ColaMachine),
        }
    }

    /// Strange sounds behind the exit door, if they happen this time
    pub fn use_exit_door(&mut self, clock: &GameClock) -> Option<QueuedMessage> {
        if !Occurrence::ExitDoorSounds.roll(self.visits(), clock, &mut self.rng) {
            return None;
        }
        self.occurrence_message(Occurrence::ExitDoorSounds)
    }

    /// Open a ticket booth or machine for the given networks
    ///
    /// Occasionally shows a strange message instead of the menu. If the
    /// message pool is empty the menu is shown as usual.
    pub fn open_ticket_machine(
        &mut self,
        networks: &[TransportNetwork],
        current_location: &str,
        conditions: &impl ConditionEvaluator,
        clock: &GameClock,
    ) -> TicketInteraction {
        if Occurrence::TicketStrangeMessage.roll(self.visits(), clock, &mut self.rng) {
            if let Some(message) = self.occurrence_message(Occurrence::TicketStrangeMessage) {
                return TicketInteraction::StrangeMessage(message);
            }
        }

        let content = self.content.read();
        TicketInteraction::Menu(TicketMenu::build(
            &content.stops,
            networks,
            current_location,
            conditions,
        ))
    }

    /// Next dialogue line for a tourist, or `None` if they have nothing (more) to say
    pub fn talk_to_tourist(&mut self, map_id: &str, tourist_id: &str) -> Option<QueuedMessage> {
        let repeats = self
            .content
            .read()
            .tourists
            .tourist(map_id, tourist_id)?
            .dialogue_repeats;

        let content = &self.content;
        self.queues.next_for(
            QueueKey::tourist(map_id, tourist_id),
            |_| {
                LiveMessageQueue::new(
                    repeats,
                    false,
                    content.tourist_dialogue_source(map_id, tourist_id),
                )
            },
            &mut self.rng,
        )
    }

    /// Next message from a numbered translation pool `{prefix}.{min..=max}`
    pub fn rare_message(&mut self, prefix: &str, min: u32, max: u32, shuffle: bool) -> Option<QueuedMessage> {
        let content = &self.content;
        self.queues.next_for(
            QueueKey::rare(prefix, min, max, shuffle),
            |_| LiveMessageQueue::new(true, shuffle, content.numbered_source(prefix, min, max)),
            &mut self.rng,
        )
    }

    fn occurrence_message(&mut self, occurrence: Occurrence) -> Option<QueuedMessage> {
        self.rare_message(occurrence.message_prefix(), 1, RARE_POOL_MAX, true)
    }

    /// Drop queues whose keys no longer exist after a content reload
    pub fn on_content_reloaded(&mut self, outcome: ReloadOutcome) {
        if outcome.keys_replaced {
            info!("{}: content keys replaced, resetting message queues", self.screen);
            self.queues.clear();
        }
    }

    pub fn to_save_data(&self) -> VisitSaveData {
        self.visits.to_save_data()
    }

    pub fn restore(&mut self, data: &VisitSaveData) {
        self.visits = VisitCounter::from_save_data(data);
    }
}

/// Owns the station session of every local screen
pub struct SessionManager {
    content: SharedContent,
    base_seed: u64,
    sessions: HashMap<ScreenId, StationSession>,
}

impl SessionManager {
    pub fn new(content: SharedContent, base_seed: u64) -> Self {
        Self {
            content,
            base_seed,
            sessions: HashMap::new(),
        }
    }

    /// Get a screen's session, creating it on first use
    pub fn session(&mut self, screen: ScreenId) -> &mut StationSession {
        let content = &self.content;
        let seed = screen_seed(self.base_seed, screen);
        self.sessions
            .entry(screen)
            .or_insert_with(|| StationSession::new(screen, content.clone(), seed))
    }

    pub fn get(&self, screen: ScreenId) -> Option<&StationSession> {
        self.sessions.get(&screen)
    }

    /// Remove a screen's session when that player leaves
    pub fn remove(&mut self, screen: ScreenId) -> Option<StationSession> {
        self.sessions.remove(&screen)
    }

    pub fn start_day(&mut self) {
        for session in self.sessions.values_mut() {
            session.start_day();
        }
    }

    pub fn on_content_reloaded(&mut self, outcome: ReloadOutcome) {
        for session in self.sessions.values_mut() {
            session.on_content_reloaded(outcome);
        }
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

fn screen_seed(base_seed: u64, screen: ScreenId) -> u64 {
    base_seed ^ u64::from(screen.0).wrapping_mul(0x9E37_79B9_7F4A_7C15)
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::BTreeMap;

    use station_content::{
        AlwaysTrue, BookshelfMessages, ContentPack, StopRegistry, TouristRegistry, Translations,
    };
    use station_core::{LogOnce, Message};

    fn content() -> SharedContent {
        let log = LogOnce::new();
        let mut translations = BTreeMap::new();
        for n in 1..=3 {
            translations.insert(format!("strange-occurrences.ticket.{}", n), format!("Ticket {}", n));
            translations.insert(format!("strange-occurrences.cola.{}", n), format!("Cola {}", n));
            translations.insert(format!("strange-occurrences.exit-door.{}", n), format!("Door {}", n));
            translations.insert(
                format!("strange-occurrences.dark-station.{}", n),
                format!("Dark {}", n),
            );
        }

        SharedContent::new(ContentPack {
            stops: StopRegistry::from_json(
                "Station",
                r#"{ "Station_Town": { "networks": ["Train"], "to_location": "Town", "cost": 100, "display_name": "Town" } }"#,
                &log,
            )
            .unwrap(),
            tourists: TouristRegistry::from_json(
                r#"{ "Station_Locals": { "from_map": "locals.tmx", "tourists": {
                    "Gus": { "index": 1, "dialogue": ["One", "Two"] },
                    "Loop": { "index": 2, "dialogue": ["Again"], "dialogue_repeats": true }
                } } }"#,
                &log,
            )
            .unwrap(),
            bookshelf: BookshelfMessages::new(vec![
                Message::new("b1", "Timetable"),
                Message::new("b2", "Novel"),
                Message::new("b3", "Atlas"),
            ]),
            translations: Translations::new(translations),
            ..Default::default()
        })
    }

    fn midnight() -> GameClock {
        GameClock::new(1, 2400)
    }

    #[test]
    fn test_bookshelf_cycles_without_repeats() {
        let mut session = StationSession::new(ScreenId::MAIN, content(), 1);
        let mut keys: Vec<_> = (0..3).map(|_| session.read_bookshelf().unwrap().message.key).collect();
        keys.sort();
        assert_eq!(keys, vec!["b1", "b2", "b3"]);

        // Bookshelf loops
        let next = session.read_bookshelf().unwrap();
        assert!(next.has_more);
    }

    #[test]
    fn test_tourist_dialogue_in_order_then_stops() {
        let mut session = StationSession::new(ScreenId::MAIN, content(), 1);

        let first = session.talk_to_tourist("Station_Locals", "Gus").unwrap();
        assert_eq!(first.message.text, "One");
        assert!(first.has_more);

        let second = session.talk_to_tourist("Station_Locals", "Gus").unwrap();
        assert_eq!(second.message.text, "Two");
        assert!(!second.has_more);

        assert!(session.talk_to_tourist("Station_Locals", "Gus").is_none());
    }

    #[test]
    fn test_repeating_tourist() {
        let mut session = StationSession::new(ScreenId::MAIN, content(), 1);
        for _ in 0..5 {
            let line = session.talk_to_tourist("Station_Locals", "Loop").unwrap();
            assert_eq!(line.message.text, "Again");
            assert!(line.has_more);
        }
    }

    #[test]
    fn test_unknown_tourist() {
        let mut session = StationSession::new(ScreenId::MAIN, content(), 1);
        assert!(session.talk_to_tourist("Station_Locals", "Nobody").is_none());
        assert_eq!(session.queue_count(), 0);
    }

    #[test]
    fn test_new_day_resets_dialogue() {
        let mut session = StationSession::new(ScreenId::MAIN, content(), 1);
        session.talk_to_tourist("Station_Locals", "Gus");
        session.talk_to_tourist("Station_Locals", "Gus");
        assert!(session.talk_to_tourist("Station_Locals", "Gus").is_none());

        session.start_day();
        assert_eq!(session.queue_count(), 0);
        assert_eq!(session.talk_to_tourist("Station_Locals", "Gus").unwrap().message.text, "One");
    }

    #[test]
    fn test_visits_counted_per_entry() {
        let mut session = StationSession::new(ScreenId::MAIN, content(), 1);
        let clock = GameClock::new(1, 1200);
        for expected in 1..=3 {
            assert_eq!(session.enter_station(&clock).visits, expected);
            session.leave_station();
        }
        assert_eq!(session.to_save_data().visits, 3);
    }

    #[test]
    fn test_station_never_dark_before_threshold() {
        let mut session = StationSession::new(ScreenId::MAIN, content(), 1);
        for _ in 0..14 {
            let outcome = session.enter_station(&midnight());
            assert!(!outcome.is_dark);
            session.leave_station();
        }
    }

    #[test]
    fn test_station_eventually_dark_after_threshold() {
        let mut session = StationSession::new(ScreenId::MAIN, content(), 1);
        session.restore(&VisitSaveData { visits: 15, last_visit_day: None });

        let mut went_dark = None;
        for _ in 0..10_000 {
            let outcome = session.enter_station(&midnight());
            if outcome.is_dark {
                went_dark = Some(outcome);
                break;
            }
            session.leave_station();
        }

        let outcome = went_dark.expect("station should go dark eventually");
        assert!(outcome.dark_message.unwrap().message.text.starts_with("Dark"));
        assert!(session.is_dark());

        session.start_day();
        assert!(!session.is_dark());
    }

    #[test]
    fn test_ticket_machine_shows_menu_or_strange_message() {
        let mut session = StationSession::new(ScreenId::MAIN, content(), 1);
        session.restore(&VisitSaveData { visits: 5, last_visit_day: None });
        let clock = GameClock::new(1, 1200);

        let mut menus = 0;
        let mut strange = 0;
        for _ in 0..2_000 {
            match session.open_ticket_machine(&[TransportNetwork::Train], "CentralStation", &AlwaysTrue, &clock) {
                TicketInteraction::Menu(menu) => {
                    assert_eq!(menu.options[0].label, "Town - 100g");
                    menus += 1;
                }
                TicketInteraction::StrangeMessage(message) => {
                    assert!(message.message.key.starts_with("strange-occurrences.ticket."));
                    strange += 1;
                }
            }
        }
        assert!(menus > strange);
        assert!(strange > 0);
    }

    #[test]
    fn test_no_strange_ticket_before_five_visits() {
        let mut session = StationSession::new(ScreenId::MAIN, content(), 1);
        session.restore(&VisitSaveData { visits: 4, last_visit_day: None });
        let clock = GameClock::new(1, 1200);
        for _ in 0..2_000 {
            assert!(matches!(
                session.open_ticket_machine(&[TransportNetwork::Train], "CentralStation", &AlwaysTrue, &clock),
                TicketInteraction::Menu(_)
            ));
        }
    }

    #[test]
    fn test_cola_and_door_need_a_visit() {
        let mut session = StationSession::new(ScreenId::MAIN, content(), 1);
        let clock = GameClock::new(1, 1200);
        for _ in 0..2_000 {
            assert_eq!(session.use_cola_machine(&clock), ColaOutcome::Normal);
            assert!(session.use_exit_door(&clock).is_none());
        }
    }

    #[test]
    fn test_reload_with_new_keys_resets_queues() {
        let shared = content();
        let mut session = StationSession::new(ScreenId::MAIN, shared.clone(), 1);
        session.read_bookshelf();
        assert_eq!(session.queue_count(), 1);

        let outcome = shared.replace(ContentPack {
            bookshelf: BookshelfMessages::new(vec![Message::new("new", "Fresh")]),
            ..Default::default()
        });
        session.on_content_reloaded(outcome);
        assert_eq!(session.queue_count(), 0);
        assert_eq!(session.read_bookshelf().unwrap().message.text, "Fresh");
    }

    #[test]
    fn test_sessions_are_seeded_per_screen() {
        let mut manager = SessionManager::new(content(), 99);
        let order = |session: &mut StationSession| {
            (0..3).map(|_| session.read_bookshelf().unwrap().message.key).collect::<Vec<_>>()
        };

        let main = order(manager.session(ScreenId::MAIN));
        let again = {
            let mut other = SessionManager::new(content(), 99);
            order(other.session(ScreenId::MAIN))
        };
        assert_eq!(main, again);

        manager.session(ScreenId(1));
        assert_eq!(manager.len(), 2);
        assert_eq!(manager.get(ScreenId(1)).unwrap().queue_count(), 0);
    }

    #[test]
    fn test_screens_have_independent_visits() {
        let mut manager = SessionManager::new(content(), 7);
        let clock = GameClock::new(1, 1200);
        manager.session(ScreenId::MAIN).enter_station(&clock);
        manager.session(ScreenId::MAIN).enter_station(&clock);
        manager.session(ScreenId(1)).enter_station(&clock);

        assert_eq!(manager.get(ScreenId::MAIN).unwrap().visits(), 2);
        assert_eq!(manager.get(ScreenId(1)).unwrap().visits(), 1);

        manager.start_day();
        assert!(manager.remove(ScreenId(1)).is_some());
        assert_eq!(manager.len(), 1);
    }
}
