use map::{HexCoord, Terrain, TileMap};
use rules::TerritoryConstants;

use crate::city::{City, CityId};
use crate::civilization::CivId;
use crate::game_info::GameInfo;
use crate::managers::{CityExpansionManager, CityFounder, CityPopulationManager, WorkToggle};
use crate::territory_rules::{TerritoryEligibility, TerritoryRules};
use crate::tile_state::{TerritoryState, TileClassifier};

/// A grassland map of radius 6 with one civilization ("Rome") and its
/// capital at the origin
pub(crate) struct TestWorld {
    pub game: GameInfo,
    pub rules: TerritoryRules,
    pub civ: CivId,
    pub city_id: CityId,
}

impl TestWorld {
    pub fn new(gold: i32) -> Self {
        let rules = TerritoryRules::default();
        let mut game = GameInfo::new(
            TileMap::new_hexagonal(6, Terrain::Grassland),
            TerritoryConstants::default(),
        );
        let civ = game.add_civilization("Rome", gold);
        let city_id = CityFounder::new(&rules)
            .found_city(&mut game, civ, "Roma", HexCoord::ZERO)
            .expect("origin is free");
        TestWorld {
            game,
            rules,
            civ,
            city_id,
        }
    }

    pub fn city(&self) -> &City {
        self.game.get_city(self.city_id).expect("capital exists")
    }

    pub fn gold(&self) -> i32 {
        self.game.get_civ(self.civ).expect("civ exists").gold
    }

    pub fn set_population(&mut self, population: i32) {
        self.game
            .get_city_mut(self.city_id)
            .expect("capital exists")
            .population = population;
    }

    pub fn gold_cost(&self, position: HexCoord) -> i32 {
        CityExpansionManager::new(&self.rules).get_gold_cost_of_tile(&self.game, self.city_id, position)
    }

    pub fn buy(&mut self, position: HexCoord) -> bool {
        CityExpansionManager::new(&self.rules).buy_tile(&mut self.game, self.city_id, position)
    }

    pub fn claim(&mut self, position: HexCoord) {
        CityExpansionManager::new(&self.rules).take_ownership(&mut self.game, self.city_id, position);
    }

    pub fn work(&mut self, position: HexCoord) -> WorkToggle {
        CityPopulationManager::new(&self.rules).toggle_work(&mut self.game, self.city_id, position)
    }

    pub fn classify(&self, position: HexCoord) -> TerritoryState {
        TileClassifier::new(&self.rules).classify(&self.game, self.city(), position)
    }

    pub fn found_sibling_city(&mut self, location: HexCoord) -> CityId {
        CityFounder::new(&self.rules)
            .found_city(&mut self.game, self.civ, "Antium", location)
            .expect("sibling location is free")
    }

    pub fn found_rival_city(&mut self, location: HexCoord) -> CityId {
        let rival = self.game.add_civilization("Carthage", 0);
        CityFounder::new(&self.rules)
            .found_city(&mut self.game, rival, "Carthago", location)
            .expect("rival location is free")
    }
}

/// Eligibility rule that refuses every claim
pub(crate) struct NoClaims;

impl TerritoryEligibility for NoClaims {
    fn is_acquirable_by(&self, _: &GameInfo, _: &City, _: HexCoord) -> bool {
        false
    }
}
