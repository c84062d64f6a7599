use serde::{Deserialize, Serialize};

use map::HexCoord;

use crate::city::City;
use crate::game_info::GameInfo;
use crate::territory_rules::TerritoryRules;

/// What a tile around a city is to that city this turn.
///
/// Derived, never stored: ownership and exploration change between updates,
/// so states are recomputed on every pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TerritoryState {
    CityCenter,
    /// Owned and within work range; population can be assigned to it
    Workable,
    /// Owned but too far from the center to be worked
    OwnedNotWorkable,
    /// Not ours, but could be claimed by purchase or takeover
    AcquirableOutside,
    LockedOutside,
    /// Never seen by the city's civilization; not displayed at all
    Unexplored,
}

impl TerritoryState {
    pub fn is_displayed(self) -> bool {
        self != TerritoryState::Unexplored
    }

    pub fn is_owned(self) -> bool {
        matches!(
            self,
            TerritoryState::CityCenter | TerritoryState::Workable | TerritoryState::OwnedNotWorkable
        )
    }

    /// Whether yields are shown for the tile on the city screen
    pub fn shows_yield(self) -> bool {
        matches!(self, TerritoryState::CityCenter | TerritoryState::Workable)
    }
}

/// Assigns each tile around a city its `TerritoryState`
pub struct TileClassifier<'r> {
    rules: &'r TerritoryRules,
}

impl<'r> TileClassifier<'r> {
    pub fn new(rules: &'r TerritoryRules) -> Self {
        TileClassifier { rules }
    }

    /// Exploration gates everything, the center preempts ownership checks and
    /// foreign ownership is looked at before work range.
    pub fn classify(&self, game: &GameInfo, city: &City, position: HexCoord) -> TerritoryState {
        let explored = game
            .civ_of(city)
            .is_some_and(|civ| civ.has_explored(position));
        if !explored {
            return TerritoryState::Unexplored;
        }

        if city.is_center(position) {
            return TerritoryState::CityCenter;
        }

        if game.get_owning_city(position) != Some(city.id) {
            return if self.rules.eligibility.is_acquirable_by(game, city, position) {
                TerritoryState::AcquirableOutside
            } else {
                TerritoryState::LockedOutside
            };
        }

        if !city
            .get_tiles_in_range(game.constants.city_work_range)
            .contains(&position)
        {
            return TerritoryState::OwnedNotWorkable;
        }

        TerritoryState::Workable
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{NoClaims, TestWorld};

    #[test]
    fn test_states_around_a_fresh_city() {
        let world = TestWorld::new(0);
        assert_eq!(world.classify(HexCoord::ZERO), TerritoryState::CityCenter);
        assert_eq!(world.classify(HexCoord::new(1, 1)), TerritoryState::Workable);
        assert_eq!(world.classify(HexCoord::new(2, 1)), TerritoryState::AcquirableOutside);
        assert_eq!(world.classify(HexCoord::new(3, 0)), TerritoryState::LockedOutside);
    }

    #[test]
    fn test_unexplored_preempts_everything() {
        let mut world = TestWorld::new(0);
        world.game.get_civ_mut(world.civ).unwrap().explored_tiles.clear();
        assert_eq!(world.classify(HexCoord::ZERO), TerritoryState::Unexplored);
        assert_eq!(world.classify(HexCoord::new(1, 0)), TerritoryState::Unexplored);
    }

    #[test]
    fn test_owned_tile_beyond_work_range() {
        let mut world = TestWorld::new(0);
        world.game.constants.city_work_range = 1;
        world.claim(HexCoord::new(2, 0));
        assert_eq!(world.classify(HexCoord::new(2, 0)), TerritoryState::OwnedNotWorkable);
        assert_eq!(world.classify(HexCoord::new(1, 0)), TerritoryState::Workable);
    }

    #[test]
    fn test_eligibility_is_delegated() {
        let mut world = TestWorld::new(0);
        world.rules = TerritoryRules::default().with_eligibility(NoClaims);
        assert_eq!(world.classify(HexCoord::new(2, 1)), TerritoryState::LockedOutside);
    }

    #[test]
    fn test_classification_is_stable_without_changes() {
        let world = TestWorld::new(0);
        for position in [HexCoord::new(1, 0), HexCoord::new(2, 0), HexCoord::new(4, 4)] {
            assert_eq!(world.classify(position), world.classify(position));
        }
    }

    #[test]
    fn test_bought_tile_becomes_owned() {
        let mut world = TestWorld::new(500);
        let target = HexCoord::new(2, 0);
        assert_eq!(world.classify(target), TerritoryState::AcquirableOutside);
        assert!(world.buy(target));
        assert!(world.classify(target).is_owned());
    }
}
