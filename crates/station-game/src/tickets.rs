//! Ticket menus — the destinations offered at a ticket booth or machine

use station_content::{ConditionEvaluator, Facing, Stop, StopRegistry, TransportNetwork};

/// Where the player is sent after buying a ticket
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WarpTarget {
    pub location: String,
    pub tile: Option<(i32, i32)>,
    pub facing: Facing,
}

/// One purchasable destination
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicketOption {
    pub stop_id: String,
    pub label: String,
    pub cost: u32,
    pub network: TransportNetwork,
    pub target: WarpTarget,
}

/// The destinations available from a ticket booth
#[derive(Debug, Clone, Default)]
pub struct TicketMenu {
    pub options: Vec<TicketOption>,
}

impl TicketMenu {
    /// Build the menu for a set of networks as seen from `current_location`
    ///
    /// Stops at the current location and stops whose condition fails are
    /// left out. A stop on several of the given networks is listed once,
    /// under the first network it matches.
    pub fn build(
        stops: &StopRegistry,
        networks: &[TransportNetwork],
        current_location: &str,
        conditions: &impl ConditionEvaluator,
    ) -> Self {
        let mut options: Vec<TicketOption> = stops
            .iter()
            .filter(|stop| !stop.to_location.eq_ignore_ascii_case(current_location))
            .filter(|stop| conditions.check_optional(stop.condition.as_deref()))
            .filter_map(|stop| {
                let network = networks.iter().copied().find(|n| stop.is_on(*n))?;
                Some(option_for(stop, network, networks.len()))
            })
            .collect();

        options.sort_by(|a, b| a.label.to_lowercase().cmp(&b.label.to_lowercase()));
        Self { options }
    }

    pub fn find(&self, stop_id: &str) -> Option<&TicketOption> {
        self.options.iter().find(|o| o.stop_id == stop_id)
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }
}

fn option_for(stop: &Stop, network: TransportNetwork, network_count: usize) -> TicketOption {
    let name = stop.name_for_list(network_count);
    let label = if stop.cost > 0 {
        format!("{} - {}g", name, stop.cost)
    } else {
        name.to_string()
    };

    TicketOption {
        stop_id: stop.id.clone(),
        label,
        cost: stop.cost,
        network,
        target: WarpTarget {
            location: stop.to_location.clone(),
            tile: stop.to_tile,
            facing: stop.to_facing,
        },
    }
}

/// Outcome of trying to buy a ticket
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PurchaseResult {
    /// Money was deducted; warp the player
    Travel { target: WarpTarget, remaining_money: u32 },
    NotEnoughMoney { cost: u32 },
}

/// Pay for a ticket
pub fn purchase(option: &TicketOption, money: u32) -> PurchaseResult {
    match money.checked_sub(option.cost) {
        Some(remaining_money) => PurchaseResult::Travel {
            target: option.target.clone(),
            remaining_money,
        },
        None => PurchaseResult::NotEnoughMoney { cost: option.cost },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use station_content::{AlwaysTrue, FlagConditions};
    use station_core::LogOnce;

    const STOPS: &str = r#"{
        "Station_Town": {
            "networks": ["Train", "Bus"],
            "to_location": "Town",
            "to_tile": [10, 20],
            "cost": 250,
            "display_name": "Pelican Town",
            "display_name_in_combined_lists": "Pelican Town (train)"
        },
        "Station_Beach": {
            "networks": ["Boat"],
            "to_location": "Beach",
            "display_name": "Beach",
            "condition": "ccBoatTunnel"
        },
        "Station_Hub": {
            "networks": ["Train", "Boat", "Bus"],
            "to_location": "CentralStation",
            "display_name": "Central Station"
        },
        "Station_Desert": {
            "networks": ["Bus"],
            "to_location": "Desert",
            "cost": 500,
            "display_name": "Calico Desert"
        }
    }"#;

    fn registry() -> StopRegistry {
        StopRegistry::from_json("Station", STOPS, &LogOnce::new()).unwrap()
    }

    #[test]
    fn test_current_location_excluded() {
        let menu = TicketMenu::build(&registry(), &[TransportNetwork::Train], "CentralStation", &AlwaysTrue);
        assert!(menu.find("Station_Hub").is_none());
        assert!(menu.find("Station_Town").is_some());
    }

    #[test]
    fn test_network_filter_and_labels() {
        let menu = TicketMenu::build(&registry(), &[TransportNetwork::Bus], "Town", &AlwaysTrue);
        let labels: Vec<_> = menu.options.iter().map(|o| o.label.as_str()).collect();
        assert_eq!(labels, vec!["Calico Desert - 500g", "Central Station"]);
    }

    #[test]
    fn test_condition_hides_stop() {
        let stops = registry();
        let networks = [TransportNetwork::Boat];
        let menu = TicketMenu::build(&stops, &networks, "CentralStation", &FlagConditions::new());
        assert!(menu.is_empty());

        let flags = FlagConditions::new().with_flag("ccBoatTunnel");
        let menu = TicketMenu::build(&stops, &networks, "CentralStation", &flags);
        assert_eq!(menu.len(), 1);
        assert_eq!(menu.options[0].target.location, "Beach");
    }

    #[test]
    fn test_combined_list_listed_once() {
        let networks = [TransportNetwork::Train, TransportNetwork::Bus];
        let menu = TicketMenu::build(&registry(), &networks, "CentralStation", &AlwaysTrue);
        let town: Vec<_> = menu.options.iter().filter(|o| o.stop_id == "Station_Town").collect();
        assert_eq!(town.len(), 1);
        assert_eq!(town[0].label, "Pelican Town (train) - 250g");
        assert_eq!(town[0].network, TransportNetwork::Train);
        assert_eq!(town[0].target.tile, Some((10, 20)));
    }

    #[test]
    fn test_purchase() {
        let menu = TicketMenu::build(&registry(), &[TransportNetwork::Bus], "Town", &AlwaysTrue);
        let desert = menu.find("Station_Desert").unwrap();

        assert_eq!(purchase(desert, 100), PurchaseResult::NotEnoughMoney { cost: 500 });
        match purchase(desert, 600) {
            PurchaseResult::Travel { target, remaining_money } => {
                assert_eq!(target.location, "Desert");
                assert_eq!(remaining_money, 100);
            }
            other => panic!("unexpected {:?}", other),
        }
    }
}
