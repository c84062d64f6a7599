use map::{HexCoord, HexMath};

use crate::city::{City, CityId};
use crate::city_stats::CityStats;
use crate::game_info::GameInfo;

/// Decides whether a city may claim a tile it does not own this turn
pub trait TerritoryEligibility {
    fn is_acquirable_by(&self, game: &GameInfo, city: &City, position: HexCoord) -> bool;
}

/// Gold price of a tile for a city. Must be evaluated fresh every time, the
/// price depends on how many tiles the city already owns.
pub trait ExpansionCost {
    fn gold_cost_formula(&self, game: &GameInfo, city: &City, position: HexCoord) -> i32;
}

/// Derives a city's aggregate stats from its tiles
pub trait StatsRecompute {
    fn recompute_stats(&self, game: &GameInfo, city: &City) -> CityStats;
}

/// Tiles touching a city's territory within its expand range can be claimed:
/// unowned ones by purchase, and ones held by another city of the same
/// civilization by takeover when they are within the acquire range.
/// Tiles of other civilizations and city centers are never claimable.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContiguousTerritory;

impl ContiguousTerritory {
    pub fn touches_territory(game: &GameInfo, city: &City, position: HexCoord) -> bool {
        position
            .neighbors()
            .iter()
            .any(|neighbor| game.get_owning_city(*neighbor) == Some(city.id))
    }

    /// Unowned, adjacent to the city's territory and inside its expand range
    pub fn is_purchasable(game: &GameInfo, city: &City, position: HexCoord) -> bool {
        game.tile_map.contains(position)
            && game.get_owning_city(position).is_none()
            && HexMath::get_distance(city.location, position) <= game.constants.city_expand_range
            && Self::touches_territory(game, city, position)
    }

    /// Held by a sibling city, adjacent to this city's territory and inside
    /// the acquire range
    pub fn is_transferable(game: &GameInfo, city: &City, position: HexCoord) -> bool {
        let Some(owner) = game.get_owning_city(position).and_then(|id| game.get_city(id)) else {
            return false;
        };
        owner.id != city.id
            && owner.civ_id == city.civ_id
            && !owner.is_center(position)
            && HexMath::get_distance(city.location, position) <= game.constants.tile_acquire_range
            && Self::touches_territory(game, city, position)
    }
}

impl TerritoryEligibility for ContiguousTerritory {
    fn is_acquirable_by(&self, game: &GameInfo, city: &City, position: HexCoord) -> bool {
        Self::is_purchasable(game, city, position) || Self::is_transferable(game, city, position)
    }
}

/// cost = (baseCost * (distance - 1) + tilesClaimed * costPerClaimed) * modifier
#[derive(Debug, Clone, Copy, Default)]
pub struct DistanceGoldCost;

impl ExpansionCost for DistanceGoldCost {
    fn gold_cost_formula(&self, game: &GameInfo, city: &City, position: HexCoord) -> i32 {
        let constants = &game.constants;
        let distance_from_center = HexMath::get_distance(city.location, position);
        let cost = constants.tile_base_gold_cost * (distance_from_center - 1).max(0)
            + city.tiles_claimed() * constants.tile_gold_cost_per_claimed;
        (cost as f32 * constants.gold_cost_modifier).round() as i32
    }
}

/// Sums the yields of the center tile and every worked tile. The center
/// also produces a point of culture, which drives border growth.
#[derive(Debug, Clone, Copy, Default)]
pub struct TileYieldStats;

const CITY_CENTER_CULTURE: f32 = 1.0;

impl StatsRecompute for TileYieldStats {
    fn recompute_stats(&self, game: &GameInfo, city: &City) -> CityStats {
        let mut stats = CityStats::default();
        let sources = std::iter::once(city.location).chain(city.worked_tiles.iter().copied());
        for position in sources {
            if let Some(tile) = game.tile_map.get(position) {
                stats.current_city_stats += tile.get_tile_stats();
            }
        }
        stats.current_city_stats.culture += CITY_CENTER_CULTURE;
        stats.worked_tiles = city.worked_tiles.len();
        stats
    }
}

/// The external rules the territory logic consults, bundled so they can be
/// swapped out together (by mods, or by tests)
pub struct TerritoryRules {
    pub eligibility: Box<dyn TerritoryEligibility>,
    pub cost: Box<dyn ExpansionCost>,
    pub stats: Box<dyn StatsRecompute>,
}

impl Default for TerritoryRules {
    fn default() -> Self {
        TerritoryRules {
            eligibility: Box::new(ContiguousTerritory),
            cost: Box::new(DistanceGoldCost),
            stats: Box::new(TileYieldStats),
        }
    }
}

impl TerritoryRules {
    pub fn with_eligibility(mut self, eligibility: impl TerritoryEligibility + 'static) -> Self {
        self.eligibility = Box::new(eligibility);
        self
    }

    pub fn with_cost(mut self, cost: impl ExpansionCost + 'static) -> Self {
        self.cost = Box::new(cost);
        self
    }

    pub fn with_stats(mut self, stats: impl StatsRecompute + 'static) -> Self {
        self.stats = Box::new(stats);
        self
    }

    /// Recomputes and stores the stats of a city; a missing city is ignored
    pub fn update_city_stats(&self, game: &mut GameInfo, city_id: CityId) {
        let Some(city) = game.get_city(city_id) else {
            return;
        };
        let stats = self.stats.recompute_stats(game, city);
        if let Some(city) = game.get_city_mut(city_id) {
            city.city_stats = stats;
        }
    }
}

impl std::fmt::Debug for TerritoryRules {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TerritoryRules").finish_non_exhaustive()
    }
}
