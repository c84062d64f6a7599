use tracing::{debug, info};

use map::{HexCoord, HexMath};
use rules::Stats;

use crate::city::{City, CityId};
use crate::game_info::GameInfo;
use crate::territory_rules::TerritoryRules;

/// Manages city expansion: tile purchase, takeover from sibling cities and
/// culture-based border growth
pub struct CityExpansionManager<'r> {
    rules: &'r TerritoryRules,
}

impl<'r> CityExpansionManager<'r> {
    pub fn new(rules: &'r TerritoryRules) -> Self {
        CityExpansionManager { rules }
    }

    /// Gets the gold cost of a tile, as quoted right now
    pub fn get_gold_cost_of_tile(&self, game: &GameInfo, city_id: CityId, position: HexCoord) -> i32 {
        game.get_city(city_id)
            .map_or(0, |city| self.rules.cost.gold_cost_formula(game, city, position))
    }

    /// Checks if a tile can be bought, gold aside
    pub fn can_buy_tile(&self, game: &GameInfo, city_id: CityId, position: HexCoord) -> bool {
        let Some(city) = game.get_city(city_id) else {
            return false;
        };
        !city.is_being_razed && self.is_unowned_and_acquirable(game, city, position)
    }

    fn is_unowned_and_acquirable(&self, game: &GameInfo, city: &City, position: HexCoord) -> bool {
        game.tile_map.contains(position)
            && game.get_owning_city(position).is_none()
            && self.rules.eligibility.is_acquirable_by(game, city, position)
    }

    /// Whether the tile may be taken over without paying: it is acquirable
    /// and currently held by some other city
    pub fn can_acquire_tile(&self, game: &GameInfo, city_id: CityId, position: HexCoord) -> bool {
        let Some(city) = game.get_city(city_id) else {
            return false;
        };
        game.get_owning_city(position).is_some_and(|owner| owner != city_id)
            && self.rules.eligibility.is_acquirable_by(game, city, position)
    }

    /// Buys a tile for gold. Nothing changes unless the tile can be bought and
    /// the civilization has at least the quoted price.
    pub fn buy_tile(&self, game: &mut GameInfo, city_id: CityId, position: HexCoord) -> bool {
        if !self.can_buy_tile(game, city_id, position) {
            debug!("{} cannot buy {}", city_id, position);
            return false;
        }
        let gold_cost = self.get_gold_cost_of_tile(game, city_id, position);
        let Some(civ_id) = game.get_city(city_id).map(|city| city.civ_id) else {
            return false;
        };
        let Some(gold) = game.get_civ(civ_id).map(|civ| civ.gold) else {
            return false;
        };
        if gold < gold_cost {
            debug!(
                "{} tried to buy {}, but lacks gold (cost {}, has {})",
                city_id, position, gold_cost, gold
            );
            return false;
        }

        if !self.take_ownership(game, city_id, position) {
            return false;
        }
        if let Some(civ) = game.get_civ_mut(civ_id) {
            civ.add_gold(-gold_cost);
        }
        info!("{} bought {} for {} gold", city_id, position, gold_cost);
        true
    }

    /// Hands a tile to the city at no cost, taking it from its current owner.
    /// City centers and positions off the map are left alone.
    pub fn take_ownership(&self, game: &mut GameInfo, city_id: CityId, position: HexCoord) -> bool {
        if game.get_city(city_id).is_none()
            || !game.tile_map.contains(position)
            || game.is_city_center(position)
        {
            return false;
        }
        if game.get_owning_city(position) == Some(city_id) {
            return true;
        }

        let previous = game.assign_tile(position, city_id);
        if let Some(previous) = previous {
            debug!("{} takes {} over from {}", city_id, position, previous);
            self.rules.update_city_stats(game, previous);
        }
        self.rules.update_city_stats(game, city_id);
        true
    }

    /// Gives a tile up, releasing the worker on it if any
    pub fn relinquish_ownership(&self, game: &mut GameInfo, city_id: CityId, position: HexCoord) -> bool {
        if game.get_owning_city(position) != Some(city_id) {
            return false;
        }
        game.unassign_tile(position);
        self.rules.update_city_stats(game, city_id);
        true
    }

    /// Resets the city's tiles to just the center tile and its unowned
    /// immediate neighbors
    pub fn reset(&self, game: &mut GameInfo, city_id: CityId) {
        let Some(city) = game.get_city(city_id) else {
            return;
        };
        let location = city.location;
        let mut owned: Vec<HexCoord> = city.tiles.iter().copied().collect();
        owned.sort();

        for position in owned {
            game.unassign_tile(position);
        }
        // The center is claimed even when another city held it, or the city
        // would sit on a tile it does not own
        game.assign_tile(location, city_id);
        for neighbor in HexMath::get_vectors_at_distance(location, 1) {
            if game.tile_map.contains(neighbor) && game.get_owning_city(neighbor).is_none() {
                game.assign_tile(neighbor, city_id);
            }
        }
        self.rules.update_city_stats(game, city_id);
    }

    /// Unowned tiles within the expand range that the eligibility rule lets
    /// the city claim
    pub fn get_choosable_tiles(&self, game: &GameInfo, city_id: CityId) -> Vec<HexCoord> {
        let Some(city) = game.get_city(city_id) else {
            return Vec::new();
        };
        HexMath::get_vectors_in_distance(city.location, game.constants.city_expand_range)
            .into_iter()
            .filter(|position| self.is_unowned_and_acquirable(game, city, *position))
            .collect()
    }

    /// Picks the tile border growth will claim next: the nearest ring that has
    /// a choosable tile, and within it the best yields
    pub fn choose_new_tile_to_own(&self, game: &GameInfo, city_id: CityId) -> Option<HexCoord> {
        let city = game.get_city(city_id)?;
        let choosable = self.get_choosable_tiles(game, city_id);
        let nearest = choosable
            .iter()
            .map(|position| HexMath::get_distance(city.location, *position))
            .min()?;

        let mut ring: Vec<HexCoord> = choosable
            .into_iter()
            .filter(|position| HexMath::get_distance(city.location, *position) == nearest)
            .collect();
        ring.sort();
        // max_by_key keeps the last maximum; reverse so ties go to the smallest position
        ring.into_iter().rev().max_by_key(|position| {
            game.tile_map
                .get(*position)
                .map_or(0, |tile| Self::rank_tile_for_expansion(&tile.get_tile_stats()))
        })
    }

    fn rank_tile_for_expansion(stats: &Stats) -> i32 {
        (stats.food * 3.0 + stats.production * 2.0 + stats.gold + stats.science + stats.culture)
            .round() as i32
    }

    /// Gets the culture required to expand to the next tile
    pub fn get_culture_to_next_tile(&self, game: &GameInfo, city_id: CityId) -> i32 {
        let Some(city) = game.get_city(city_id) else {
            return 0;
        };
        let constants = &game.constants;
        let claimed = city.tiles_claimed().max(0) as f32;
        (constants.culture_cost_base
            * (claimed + constants.culture_cost_offset).powf(constants.culture_cost_exponent))
        .round() as i32
    }

    /// Stores culture and, once enough has accumulated, claims the next tile.
    /// Returns the claimed position.
    pub fn next_turn(&self, game: &mut GameInfo, city_id: CityId, culture: i32) -> Option<HexCoord> {
        let culture_stored = {
            let city = game.get_city_mut(city_id)?;
            city.culture_stored += culture;
            city.culture_stored
        };
        let culture_cost = self.get_culture_to_next_tile(game, city_id);
        if culture_stored < culture_cost {
            return None;
        }

        let chosen = self.choose_new_tile_to_own(game, city_id)?;
        if let Some(city) = game.get_city_mut(city_id) {
            city.culture_stored -= culture_cost;
            info!("[{}] has expanded its borders to {}!", city.name, chosen);
        }
        self.take_ownership(game, city_id, chosen);
        Some(chosen)
    }
}
