use tracing::{info, warn};

use map::HexCoord;

use crate::city::CityId;
use crate::game_info::GameInfo;
use crate::managers::city_expansion_manager::CityExpansionManager;
use crate::managers::city_population_manager::CityPopulationManager;
use crate::territory_rules::TerritoryRules;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CityTurnResult {
    /// The city lives on; carries the tile border growth claimed, if any
    Continued { border_growth: Option<HexCoord> },
    RazedToTheGround,
}

/// Manages turn-based operations for cities
pub struct CityTurnManager<'r> {
    rules: &'r TerritoryRules,
}

impl<'r> CityTurnManager<'r> {
    pub fn new(rules: &'r TerritoryRules) -> Self {
        CityTurnManager { rules }
    }

    pub fn set_razing(&self, game: &mut GameInfo, city_id: CityId, is_being_razed: bool) {
        if let Some(city) = game.get_city_mut(city_id) {
            city.is_being_razed = is_being_razed;
            if is_being_razed {
                warn!("{} is being razed", city.name);
            } else {
                info!("{} is no longer being razed", city.name);
            }
        }
    }

    /// Ends the turn for a city: culture feeds border growth, and a city
    /// being razed loses one population, disappearing at zero.
    pub fn end_turn(&self, game: &mut GameInfo, city_id: CityId) -> Option<CityTurnResult> {
        let city = game.get_city(city_id)?;
        let culture = city.city_stats.current_city_stats.culture.round() as i32;
        let is_being_razed = city.is_being_razed;

        let border_growth = CityExpansionManager::new(self.rules).next_turn(game, city_id, culture);

        if is_being_razed {
            let population = CityPopulationManager::new(self.rules).add_population(game, city_id, -1);
            if population == 0 {
                if let Some(city) = game.remove_city(city_id) {
                    warn!("[{}] has been razed to the ground!", city.name);
                }
                return Some(CityTurnResult::RazedToTheGround);
            }
        }
        Some(CityTurnResult::Continued { border_growth })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::TestWorld;

    #[test]
    fn test_razing_city_shrinks_then_disappears() {
        let mut world = TestWorld::new(0);
        world.set_population(2);
        let turns = CityTurnManager::new(&world.rules);
        turns.set_razing(&mut world.game, world.city_id, true);

        assert!(matches!(
            turns.end_turn(&mut world.game, world.city_id),
            Some(CityTurnResult::Continued { .. })
        ));
        assert_eq!(world.city().population, 1);

        assert_eq!(
            turns.end_turn(&mut world.game, world.city_id),
            Some(CityTurnResult::RazedToTheGround)
        );
        assert!(world.game.get_city(world.city_id).is_none());
        assert!(world.game.get_civ(world.civ).unwrap().cities.is_empty());
        assert_eq!(world.game.get_owning_city(HexCoord::ZERO), None);
        assert_eq!(turns.end_turn(&mut world.game, world.city_id), None);
    }

    #[test]
    fn test_stopping_razing_keeps_population() {
        let mut world = TestWorld::new(0);
        world.set_population(2);
        let turns = CityTurnManager::new(&world.rules);
        turns.set_razing(&mut world.game, world.city_id, true);
        turns.set_razing(&mut world.game, world.city_id, false);
        turns.end_turn(&mut world.game, world.city_id);
        assert_eq!(world.city().population, 2);
    }

    #[test]
    fn test_center_culture_grows_borders_over_turns() {
        let mut world = TestWorld::new(0);
        let turns = CityTurnManager::new(&world.rules);
        let grown = (0..10)
            .filter_map(|_| match turns.end_turn(&mut world.game, world.city_id) {
                Some(CityTurnResult::Continued { border_growth }) => border_growth,
                _ => None,
            })
            .count();
        assert_eq!(grown, 1);
        assert_eq!(world.city().tiles.len(), 8);
    }
}
