use serde::{Deserialize, Serialize};

use city::{City, CityExpansionManager, GameInfo, TerritoryRules, TerritoryState, TileClassifier};
use map::{HexCoord, HexMath, Terrain, Vector2};

/// Size of the area the city map is laid out on
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StageSize {
    pub width: f32,
    pub height: f32,
}

impl StageSize {
    pub fn new(width: f32, height: f32) -> Self {
        StageSize { width, height }
    }

    pub fn center(&self) -> Vector2 {
        Vector2::new(self.width / 2.0, self.height / 2.0)
    }
}

impl Default for StageSize {
    fn default() -> Self {
        StageSize::new(1280.0, 720.0)
    }
}

/// The icon drawn on top of a tile
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TileIcon {
    None,
    Worked,
    NotWorked,
    /// Price tag; greyed out when the civilization cannot pay
    Buy { price: i32, affordable: bool },
    Acquire,
}

/// View model of one displayed tile on the city screen
#[derive(Debug, Clone, PartialEq)]
pub struct CityTileGroup {
    pub position: HexCoord,
    pub terrain: Terrain,
    pub state: TerritoryState,
    pub is_worked: bool,
    pub yields_visible: bool,
    pub alpha: f32,
    pub icon: TileIcon,
    pub is_next_tile_to_own: bool,
    pub x: f32,
    pub y: f32,
}

impl CityTileGroup {
    /// Builds the group for a tile, or `None` when the tile is not displayed
    /// (off the map or unexplored)
    pub fn new(
        game: &GameInfo,
        rules: &TerritoryRules,
        city: &City,
        position: HexCoord,
        stage: StageSize,
    ) -> Option<Self> {
        let tile = game.tile_map.get(position)?;
        let state = TileClassifier::new(rules).classify(game, city, position);
        if !state.is_displayed() {
            return None;
        }

        let is_worked = city.is_worked(position);
        let icon = match state {
            TerritoryState::Workable if is_worked => TileIcon::Worked,
            TerritoryState::Workable if tile.provides_yield() => TileIcon::NotWorked,
            TerritoryState::AcquirableOutside => Self::acquisition_icon(game, rules, city, position),
            _ => TileIcon::None,
        };
        let layout = Self::layout_position(game, city.location, position, stage);

        Some(CityTileGroup {
            position,
            terrain: tile.terrain,
            state,
            is_worked,
            yields_visible: state.shows_yield(),
            alpha: Self::alpha_for(state),
            icon,
            is_next_tile_to_own: false,
            x: layout.x,
            y: layout.y,
        })
    }

    fn acquisition_icon(game: &GameInfo, rules: &TerritoryRules, city: &City, position: HexCoord) -> TileIcon {
        let expansion = CityExpansionManager::new(rules);
        if expansion.can_buy_tile(game, city.id, position) {
            let price = expansion.get_gold_cost_of_tile(game, city.id, position);
            let affordable = game.civ_of(city).is_some_and(|civ| civ.gold >= price);
            TileIcon::Buy { price, affordable }
        } else if expansion.can_acquire_tile(game, city.id, position) {
            TileIcon::Acquire
        } else {
            TileIcon::None
        }
    }

    /// Tiles that are not ours are dimmed, the locked ones the most
    fn alpha_for(state: TerritoryState) -> f32 {
        match state {
            TerritoryState::CityCenter | TerritoryState::Workable => 1.0,
            TerritoryState::OwnedNotWorkable => 0.5,
            TerritoryState::AcquirableOutside => 0.7,
            TerritoryState::LockedOutside => 0.3,
            TerritoryState::Unexplored => 0.0,
        }
    }

    /// `stage_center + hex_to_world(position - center) * spacing * group_size`
    pub fn layout_position(game: &GameInfo, center: HexCoord, position: HexCoord, stage: StageSize) -> Vector2 {
        let constants = &game.constants;
        let offset = HexMath::hex_to_world_coords(position - center)
            .scale(constants.tile_group_spacing * constants.tile_group_size);
        stage.center() + offset
    }

    pub fn distance_from(&self, center: HexCoord) -> i32 {
        HexMath::get_distance(center, self.position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use city::{CityFounder, CivId};
    use map::TileMap;
    use rules::TerritoryConstants;

    fn world(gold: i32) -> (GameInfo, TerritoryRules, CivId, city::CityId) {
        let rules = TerritoryRules::default();
        let mut game = GameInfo::new(
            TileMap::new_hexagonal(6, Terrain::Grassland),
            TerritoryConstants::default(),
        );
        let civ = game.add_civilization("Rome", gold);
        let city_id = CityFounder::new(&rules)
            .found_city(&mut game, civ, "Roma", HexCoord::ZERO)
            .expect("origin is free");
        (game, rules, civ, city_id)
    }

    fn group(game: &GameInfo, rules: &TerritoryRules, city_id: city::CityId, position: HexCoord) -> Option<CityTileGroup> {
        let city = game.get_city(city_id).expect("city exists");
        CityTileGroup::new(game, rules, city, position, StageSize::new(1000.0, 800.0))
    }

    #[test]
    fn test_center_sits_at_stage_center() {
        let (game, rules, _, city_id) = world(0);
        let center = group(&game, &rules, city_id, HexCoord::ZERO).expect("center is displayed");
        assert_eq!(center.state, TerritoryState::CityCenter);
        assert_eq!((center.x, center.y), (500.0, 400.0));
        assert!(center.yields_visible);
        assert_eq!(center.icon, TileIcon::None);
    }

    #[test]
    fn test_neighbor_is_spaced_by_group_size() {
        let (game, rules, _, city_id) = world(0);
        let neighbor = group(&game, &rules, city_id, HexCoord::new(1, 0)).expect("neighbor is displayed");
        let distance = ((neighbor.x - 500.0).powi(2) + (neighbor.y - 400.0).powi(2)).sqrt();
        // adjacent tiles are sqrt(3) world units apart
        assert!((distance - 3f32.sqrt() * 0.8 * 50.0).abs() < 1e-3);
        assert_eq!(neighbor.icon, TileIcon::NotWorked);
    }

    #[test]
    fn test_buy_icon_reflects_gold() {
        let (mut game, rules, civ, city_id) = world(40);
        let position = HexCoord::new(2, 0);
        let poor = group(&game, &rules, city_id, position).expect("displayed");
        assert_eq!(poor.state, TerritoryState::AcquirableOutside);
        assert_eq!(poor.icon, TileIcon::Buy { price: 50, affordable: false });

        game.get_civ_mut(civ).expect("civ exists").gold = 60;
        let rich = group(&game, &rules, city_id, position).expect("displayed");
        assert_eq!(rich.icon, TileIcon::Buy { price: 50, affordable: true });
    }

    #[test]
    fn test_locked_tiles_are_dimmed_and_unexplored_hidden() {
        let (mut game, rules, civ, city_id) = world(0);
        let locked = group(&game, &rules, city_id, HexCoord::new(3, 0)).expect("displayed");
        assert_eq!(locked.state, TerritoryState::LockedOutside);
        assert_eq!(locked.alpha, 0.3);
        assert!(!locked.yields_visible);

        game.get_civ_mut(civ).expect("civ exists").explored_tiles.remove(&HexCoord::new(3, 0));
        assert!(group(&game, &rules, city_id, HexCoord::new(3, 0)).is_none());
        assert!(group(&game, &rules, city_id, HexCoord::new(40, 0)).is_none());
    }
}
