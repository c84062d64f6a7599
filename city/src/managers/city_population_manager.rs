use tracing::debug;

use map::HexCoord;

use crate::city::CityId;
use crate::game_info::GameInfo;
use crate::territory_rules::TerritoryRules;

/// Result of clicking a tile to assign or release a worker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkToggle {
    Started,
    Stopped,
    /// Not owned by the city, the center, or no free population: nothing changed
    Denied,
}

/// Keeps track of which tiles a city's population works.
///
/// Capacity is only enforced when a worker is added: shrinking population
/// does not evict workers already placed.
pub struct CityPopulationManager<'r> {
    rules: &'r TerritoryRules,
}

impl<'r> CityPopulationManager<'r> {
    pub fn new(rules: &'r TerritoryRules) -> Self {
        CityPopulationManager { rules }
    }

    /// Releases the worker on a worked tile, or places one on an idle tile of
    /// the city when there is free population. Releasing always succeeds.
    pub fn toggle_work(&self, game: &mut GameInfo, city_id: CityId, position: HexCoord) -> WorkToggle {
        let Some(city) = game.get_city(city_id) else {
            return WorkToggle::Denied;
        };

        let outcome = if city.is_worked(position) {
            WorkToggle::Stopped
        } else if game.get_owning_city(position) == Some(city_id)
            && !city.is_center(position)
            && city.get_free_population() > 0
        {
            WorkToggle::Started
        } else {
            debug!(
                "{} cannot work {} (free population {})",
                city.name,
                position,
                city.get_free_population()
            );
            WorkToggle::Denied
        };

        if let Some(city) = game.get_city_mut(city_id) {
            match outcome {
                WorkToggle::Started => {
                    city.worked_tiles.insert(position);
                    debug!("{} starts working {}", city.name, position);
                }
                WorkToggle::Stopped => {
                    city.worked_tiles.remove(&position);
                    debug!("{} stops working {}", city.name, position);
                }
                WorkToggle::Denied => return outcome,
            }
        }
        self.rules.update_city_stats(game, city_id);
        outcome
    }

    pub fn stop_working_tile(&self, game: &mut GameInfo, city_id: CityId, position: HexCoord) -> bool {
        let removed = game
            .get_city_mut(city_id)
            .is_some_and(|city| city.worked_tiles.remove(&position));
        if removed {
            self.rules.update_city_stats(game, city_id);
        }
        removed
    }

    /// Changes population by `delta`, never below zero. Returns the new population.
    pub fn add_population(&self, game: &mut GameInfo, city_id: CityId, delta: i32) -> i32 {
        let Some(city) = game.get_city_mut(city_id) else {
            return 0;
        };
        city.population = (city.population + delta).max(0);
        city.population
    }
}
