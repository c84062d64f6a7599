use std::fmt;

use tracing::{debug, info};

use city::{
    CityExpansionManager, CityId, CityPopulationManager, CityTurnManager, GameInfo, TerritoryRules,
    TerritoryState, WorkToggle,
};
use map::{HexCoord, HexMath, Terrain};
use rules::Stat;

use crate::city_map_holder::{CityMapHolder, SharedViewport};
use crate::city_tile_group::{CityTileGroup, StageSize};

/// Distance from the center at which the range tutorial kicks in
const CITY_RANGE_TUTORIAL_DISTANCE: i32 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TutorialTrigger {
    CityEntered,
    CityRange,
}

impl fmt::Display for TutorialTrigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TutorialTrigger::CityEntered => write!(f, "CityEntered"),
            TutorialTrigger::CityRange => write!(f, "CityRange"),
        }
    }
}

/// Price of the selected tile, and whether the civilization can pay it now
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuyOffer {
    pub cost: i32,
    pub affordable: bool,
}

/// Contents of the selected-tile panel
#[derive(Debug, Clone, PartialEq)]
pub struct TileTable {
    pub position: HexCoord,
    pub terrain: Terrain,
    pub state: TerritoryState,
    /// Yields that are not zero
    pub stats: Vec<(Stat, f32)>,
    pub buy_offer: Option<BuyOffer>,
    pub can_acquire: bool,
}

/// What the city picker at the top of the screen shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CityPickerInfo {
    pub city_name: String,
    pub population: i32,
    pub free_population: i32,
    pub is_capital: bool,
    pub is_being_razed: bool,
    /// Previous/next buttons are only offered with more than one city
    pub can_page: bool,
}

/// The screen for managing a city's territory.
///
/// Holds no game state of its own: every call takes the `GameInfo` it works
/// on, and tile groups are rebuilt from it after each mutation.
pub struct CityScreen<'r> {
    rules: &'r TerritoryRules,
    city_id: CityId,
    stage: StageSize,
    map_holder: CityMapHolder,
    tile_groups: Vec<CityTileGroup>,
    selected_tile: Option<HexCoord>,
    next_tile_to_own: Option<HexCoord>,
    shown_tutorials: Vec<TutorialTrigger>,
}

impl<'r> CityScreen<'r> {
    pub fn new(
        game: &GameInfo,
        rules: &'r TerritoryRules,
        city_id: CityId,
        viewport: SharedViewport,
        stage: StageSize,
    ) -> Self {
        let mut screen = CityScreen {
            rules,
            city_id,
            stage,
            map_holder: CityMapHolder::new(viewport),
            tile_groups: Vec::new(),
            selected_tile: None,
            next_tile_to_own: None,
            shown_tutorials: Vec::new(),
        };
        screen.display_tutorial(TutorialTrigger::CityEntered);
        screen.update(game);
        screen
    }

    pub fn city_id(&self) -> CityId {
        self.city_id
    }

    pub fn tile_groups(&self) -> &[CityTileGroup] {
        &self.tile_groups
    }

    pub fn tile_group(&self, position: HexCoord) -> Option<&CityTileGroup> {
        self.tile_groups.iter().find(|group| group.position == position)
    }

    pub fn selected_tile(&self) -> Option<HexCoord> {
        self.selected_tile
    }

    pub fn next_tile_to_own(&self) -> Option<HexCoord> {
        self.next_tile_to_own
    }

    pub fn shown_tutorials(&self) -> &[TutorialTrigger] {
        &self.shown_tutorials
    }

    pub fn map_holder(&self) -> &CityMapHolder {
        &self.map_holder
    }

    pub fn map_holder_mut(&mut self) -> &mut CityMapHolder {
        &mut self.map_holder
    }

    fn display_tutorial(&mut self, trigger: TutorialTrigger) {
        if !self.shown_tutorials.contains(&trigger) {
            info!("Tutorial: {}", trigger);
            self.shown_tutorials.push(trigger);
        }
    }

    /// Reclassifies every tile in display range. Runs after each mutation so
    /// classification always sees committed state.
    pub fn update(&mut self, game: &GameInfo) {
        self.tile_groups.clear();
        self.next_tile_to_own = None;
        let Some(city) = game.get_city(self.city_id) else {
            return;
        };

        let view_range = game.constants.city_screen_display_range;
        self.tile_groups = HexMath::get_vectors_in_distance(city.location, view_range)
            .into_iter()
            .filter_map(|position| CityTileGroup::new(game, self.rules, city, position, self.stage))
            .collect();

        self.next_tile_to_own = CityExpansionManager::new(self.rules).choose_new_tile_to_own(game, self.city_id);
        if let Some(next_tile) = self.next_tile_to_own {
            for group in self.tile_groups.iter_mut().filter(|group| group.position == next_tile) {
                group.is_next_tile_to_own = true;
            }
        }

        if !game
            .tile_map
            .get_tiles_at_distance(city.location, CITY_RANGE_TUTORIAL_DISTANCE)
            .is_empty()
        {
            self.display_tutorial(TutorialTrigger::CityRange);
        }
    }

    /// Selects a displayed tile; a workable one also has its worker toggled.
    /// Clicks on tiles that are not displayed are ignored.
    pub fn on_tile_clicked(&mut self, game: &mut GameInfo, position: HexCoord) -> Option<WorkToggle> {
        let state = self.tile_group(position)?.state;
        self.selected_tile = Some(position);

        let toggle = if state == TerritoryState::Workable {
            let result = CityPopulationManager::new(self.rules).toggle_work(game, self.city_id, position);
            Some(result)
        } else {
            None
        };
        self.update(game);
        toggle
    }

    pub fn clear_selection(&mut self) {
        self.selected_tile = None;
    }

    /// The panel for the selected tile
    pub fn tile_table(&self, game: &GameInfo) -> Option<TileTable> {
        let position = self.selected_tile?;
        let group = self.tile_group(position)?;
        let tile = game.tile_map.get(position)?;
        let civ = game.get_city(self.city_id).and_then(|city| game.civ_of(city))?;
        let expansion = CityExpansionManager::new(self.rules);

        let buy_offer = expansion
            .can_buy_tile(game, self.city_id, position)
            .then(|| {
                let cost = expansion.get_gold_cost_of_tile(game, self.city_id, position);
                BuyOffer {
                    cost,
                    affordable: civ.gold >= cost,
                }
            });

        Some(TileTable {
            position,
            terrain: tile.terrain,
            state: group.state,
            stats: tile.get_tile_stats().non_zero(),
            buy_offer,
            can_acquire: expansion.can_acquire_tile(game, self.city_id, position),
        })
    }

    pub fn buy_selected_tile(&mut self, game: &mut GameInfo) -> bool {
        let Some(position) = self.selected_tile else {
            return false;
        };
        let bought = CityExpansionManager::new(self.rules).buy_tile(game, self.city_id, position);
        self.update(game);
        bought
    }

    /// Takes the selected tile over from a sibling city, free of charge
    pub fn acquire_selected_tile(&mut self, game: &mut GameInfo) -> bool {
        let Some(position) = self.selected_tile else {
            return false;
        };
        let expansion = CityExpansionManager::new(self.rules);
        if !expansion.can_acquire_tile(game, self.city_id, position) {
            debug!("{} cannot acquire {}", self.city_id, position);
            return false;
        }
        let acquired = expansion.take_ownership(game, self.city_id, position);
        self.update(game);
        acquired
    }

    pub fn toggle_razing(&mut self, game: &mut GameInfo) {
        let Some(is_being_razed) = game.get_city(self.city_id).map(|city| city.is_being_razed) else {
            return;
        };
        CityTurnManager::new(self.rules).set_razing(game, self.city_id, !is_being_razed);
        self.update(game);
    }

    pub fn city_picker(&self, game: &GameInfo) -> Option<CityPickerInfo> {
        let city = game.get_city(self.city_id)?;
        let civ = game.civ_of(city)?;
        Some(CityPickerInfo {
            city_name: city.name.clone(),
            population: city.population,
            free_population: city.get_free_population(),
            is_capital: city.is_capital,
            is_being_razed: city.is_being_razed,
            can_page: civ.cities.len() > 1,
        })
    }

    /// Opens the screen of the city `delta` places away in the civilization's
    /// city list. The new screen shares this screen's viewport.
    pub fn page(&self, game: &GameInfo, delta: i32) -> Option<CityScreen<'r>> {
        let city = game.get_city(self.city_id)?;
        let civ = game.civ_of(city)?;
        if civ.cities.len() <= 1 {
            return None;
        }
        let next_city = civ.neighboring_city(self.city_id, delta)?;
        info!("Paging from {} to {}", self.city_id, next_city);
        Some(CityScreen::new(
            game,
            self.rules,
            next_city,
            self.map_holder.viewport(),
            self.stage,
        ))
    }

    /// Leaves the screen; the world view centers on the returned location
    pub fn exit(self, game: &GameInfo) -> Option<HexCoord> {
        game.get_city(self.city_id).map(|city| city.location)
    }
}
