//! Central Station - hub station content for a life-simulation game
//!
//! Loads a content pack and plays scripted station days: players arrive,
//! read bookshelves, talk to tourists, use the cola machine and ticket booth,
//! and occasionally run into something strange.

mod save;
mod settings;

use std::env;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use station_content::{
    ConditionEvaluator, ContentLoader, FlagConditions, SharedContent, TransportNetwork,
};
use station_core::{GameClock, ScreenId};
use station_game::{
    purchase, spawn_tourists, ColaOutcome, PurchaseResult, QueuedMessage, SessionManager,
    StationSession, TicketInteraction,
};
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, reload, EnvFilter};

use save::{SaveData, ScreenSaveData};
use settings::StationSettings;

/// Location name of the station itself
const STATION_LOCATION: &str = "CentralStation";

/// Maximum lines read from one tourist per visit
const MAX_TOURIST_LINES: usize = 3;

/// Minutes from the start of the day to the evening visit (6:00 PM)
const EVENING_VISIT_DELAY: u32 = 12 * 60;

/// Minutes from the evening visit to the late visit (midnight)
const LATE_VISIT_DELAY: u32 = 6 * 60;

fn main() -> Result<()> {
    // Start with RUST_LOG (or info) until the settings say otherwise
    let env_filter = EnvFilter::try_from_default_env();
    let from_env = env_filter.is_ok();
    let (filter, filter_handle) =
        reload::Layer::new(env_filter.unwrap_or_else(|_| EnvFilter::new("info")));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false))
        .init();

    let mut settings = StationSettings::load();
    if !StationSettings::is_saved() {
        if let Err(e) = settings.save() {
            warn!("Failed to write default settings: {}", e);
        }
    }
    if !from_env {
        match EnvFilter::try_new(&settings.logging.level) {
            Ok(filter) => {
                if let Err(e) = filter_handle.reload(filter) {
                    warn!("Failed to apply log level: {}", e);
                }
            }
            Err(e) => warn!("Invalid log level '{}': {}", settings.logging.level, e),
        }
    }

    if let Some(path) = env::args().nth(1) {
        settings.content.path = PathBuf::from(path);
    }

    info!("Starting Central Station...");

    let loader = ContentLoader::new(&settings.content.path);
    let pack = loader
        .load()
        .with_context(|| format!("Failed to load content pack {:?}", settings.content.path))?;
    let content = SharedContent::new(pack);

    let seed = settings.simulation.seed.unwrap_or_else(rand::random);
    info!("Using seed {}", seed);

    let mut sessions = SessionManager::new(content.clone(), seed);
    let screens: Vec<ScreenId> = (0..settings.simulation.screens.max(1)).map(ScreenId).collect();

    if save::has_save() {
        match save::load_game() {
            Ok(data) => {
                for &screen in &screens {
                    if let Some(visits) = data.visits_for(screen) {
                        sessions.session(screen).restore(visits);
                    }
                }
                info!("Restored station counters from {}", data.timestamp);
            }
            Err(e) => warn!("Failed to load save: {:#}", e),
        }
    }

    let mut conditions = FlagConditions::new();
    for flag in &settings.content.flags {
        conditions.set(flag.clone());
    }

    let mut money = vec![settings.simulation.starting_money; screens.len()];
    let mut clock = GameClock::default();

    for _ in 0..settings.simulation.days {
        info!("=== Day {} ===", clock.day);
        sessions.start_day();

        clock.advance_minutes(EVENING_VISIT_DELAY);
        for (i, &screen) in screens.iter().enumerate() {
            play_evening_visit(
                sessions.session(screen),
                &content,
                &loader,
                &settings,
                &conditions,
                &clock,
                &mut money[i],
            );
        }

        clock.advance_minutes(LATE_VISIT_DELAY);
        for &screen in &screens {
            play_late_visit(sessions.session(screen), &clock);
        }

        if settings.content.hot_reload {
            match content.reload(&loader) {
                Ok(outcome) => sessions.on_content_reloaded(outcome),
                Err(e) => warn!("Content reload failed, keeping previous content: {}", e),
            }
        }

        clock.start_next_day();
    }

    let data = SaveData::new(
        screens
            .iter()
            .filter_map(|&screen| {
                sessions.get(screen).map(|session| ScreenSaveData {
                    screen,
                    visits: session.to_save_data(),
                })
            })
            .collect(),
    );
    save::save_game(&data).context("Failed to save station counters")?;

    info!("Central Station shutting down");
    Ok(())
}

/// A regular visit: browse, chat, and buy a ticket
fn play_evening_visit(
    session: &mut StationSession,
    content: &SharedContent,
    loader: &ContentLoader,
    settings: &StationSettings,
    conditions: &impl ConditionEvaluator,
    clock: &GameClock,
    money: &mut u32,
) {
    let screen = session.screen();
    let entry = session.enter_station(clock);
    info!("[{}] Entered the station (visit {})", screen, entry.visits);

    let tourists = {
        let pack = content.read();
        let map_loader = |asset: &str| check_asset(loader.root(), asset);
        spawn_tourists(&pack.tourists, &settings.simulation.area, conditions, &map_loader)
    };
    info!("[{}] {} tourists in the {}", screen, tourists.len(), settings.simulation.area);

    for _ in 0..2 {
        match session.read_bookshelf() {
            Some(shelf) => show(screen, "Bookshelf", &shelf),
            None => info!("[{}] The bookshelf is empty", screen),
        }
    }

    for tourist in tourists.iter().filter(|t| t.has_dialogue) {
        for _ in 0..MAX_TOURIST_LINES {
            let Some(line) = session.talk_to_tourist(&tourist.map_id, &tourist.tourist_id) else {
                break;
            };
            show(screen, &tourist.tourist_id, &line);
            if !line.has_more {
                break;
            }
        }
    }

    if let ColaOutcome::FreeDrink { message } = session.use_cola_machine(clock) {
        info!("[{}] The cola machine drops a free drink!", screen);
        if let Some(message) = message {
            show(screen, "Cola machine", &message);
        }
    }

    match session.open_ticket_machine(&TransportNetwork::ALL, STATION_LOCATION, conditions, clock) {
        TicketInteraction::StrangeMessage(message) => show(screen, "Ticket machine", &message),
        TicketInteraction::Menu(menu) => {
            for option in &menu.options {
                info!("[{}]   {} ({})", screen, option.label, option.network);
            }
            if let Some(option) = menu.options.first() {
                match purchase(option, *money) {
                    PurchaseResult::Travel { target, remaining_money } => {
                        *money = remaining_money;
                        info!(
                            "[{}] Bought a ticket to {} ({}g left)",
                            screen, target.location, remaining_money
                        );
                    }
                    PurchaseResult::NotEnoughMoney { cost } => {
                        info!("[{}] Can't afford {} ({}g needed)", screen, option.label, cost);
                    }
                }
            }
        }
    }

    if let Some(message) = session.use_exit_door(clock) {
        show(screen, "Exit door", &message);
    }
    session.leave_station();
}

/// A visit after midnight, when the station may go dark
fn play_late_visit(session: &mut StationSession, clock: &GameClock) {
    let screen = session.screen();
    let entry = session.enter_station(clock);
    if entry.is_dark {
        info!("[{}] The station lights flicker out...", screen);
        if let Some(message) = entry.dark_message {
            show(screen, "Darkness", &message);
        }
    }
    session.leave_station();
}

fn show(screen: ScreenId, speaker: &str, queued: &QueuedMessage) {
    let more = if queued.has_more { " [more]" } else { "" };
    info!("[{}] {}: {}{}", screen, speaker, queued.message.text, more);
}

fn check_asset(root: &Path, asset: &str) -> Result<(), String> {
    let path = root.join(asset);
    if path.exists() {
        Ok(())
    } else {
        Err(format!("{} not found", path.display()))
    }
}
