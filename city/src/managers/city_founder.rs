use tracing::info;

use map::HexCoord;

use crate::city::CityId;
use crate::civilization::CivId;
use crate::game_info::GameInfo;
use crate::managers::city_expansion_manager::CityExpansionManager;
use crate::territory_rules::TerritoryRules;

/// Manages the founding of new cities
pub struct CityFounder<'r> {
    rules: &'r TerritoryRules,
}

impl<'r> CityFounder<'r> {
    pub fn new(rules: &'r TerritoryRules) -> Self {
        CityFounder { rules }
    }

    /// Founds a city at `location`, claiming the center and the unowned
    /// tiles around it. Fails on positions off the map, on existing city
    /// centers and inside another civilization's borders.
    pub fn found_city(
        &self,
        game: &mut GameInfo,
        civ_id: CivId,
        name: &str,
        location: HexCoord,
    ) -> Option<CityId> {
        if !game.tile_map.contains(location) || game.is_city_center(location) {
            return None;
        }
        if game.get_owner(location).is_some_and(|owner| owner != civ_id) {
            return None;
        }

        let city_id = game.insert_city(civ_id, name, location)?;
        CityExpansionManager::new(self.rules).reset(game, city_id);

        let display_range = game.constants.city_screen_display_range;
        if let Some(civ) = game.get_civ_mut(civ_id) {
            civ.explore_around(location, display_range);
            info!("{} founded {} at {}", civ.civ_name, name, location);
        }
        Some(city_id)
    }
}
