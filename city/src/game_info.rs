use std::collections::{BTreeMap, HashMap};

use tracing::debug;

use map::{HexCoord, TileMap};
use rules::TerritoryConstants;

use crate::city::{City, CityId};
use crate::civilization::{CivId, Civilization};

/// Root of the game state: the map, the civilizations and their cities.
///
/// Tile ownership is a lookup from position to city kept here, next to the
/// cities' own `tiles` sets. Both sides are only ever changed together by
/// `assign_tile`/`unassign_tile`, so that a tile worked by a city is always
/// owned by that city.
#[derive(Debug, Clone)]
pub struct GameInfo {
    pub tile_map: TileMap,
    pub constants: TerritoryConstants,
    civilizations: BTreeMap<CivId, Civilization>,
    cities: BTreeMap<CityId, City>,
    tile_owners: HashMap<HexCoord, CityId>,
    next_civ_id: u32,
    next_city_id: u32,
}

impl GameInfo {
    pub fn new(tile_map: TileMap, constants: TerritoryConstants) -> Self {
        GameInfo {
            tile_map,
            constants,
            civilizations: BTreeMap::new(),
            cities: BTreeMap::new(),
            tile_owners: HashMap::new(),
            next_civ_id: 0,
            next_city_id: 0,
        }
    }

    pub fn add_civilization(&mut self, civ_name: &str, gold: i32) -> CivId {
        let id = CivId(self.next_civ_id);
        self.next_civ_id += 1;
        let mut civ = Civilization::new(id, civ_name);
        civ.gold = gold;
        self.civilizations.insert(id, civ);
        id
    }

    pub fn get_civ(&self, id: CivId) -> Option<&Civilization> {
        self.civilizations.get(&id)
    }

    pub fn get_civ_mut(&mut self, id: CivId) -> Option<&mut Civilization> {
        self.civilizations.get_mut(&id)
    }

    pub fn civilizations(&self) -> impl Iterator<Item = &Civilization> {
        self.civilizations.values()
    }

    pub fn get_city(&self, id: CityId) -> Option<&City> {
        self.cities.get(&id)
    }

    pub fn get_city_mut(&mut self, id: CityId) -> Option<&mut City> {
        self.cities.get_mut(&id)
    }

    pub fn cities(&self) -> impl Iterator<Item = &City> {
        self.cities.values()
    }

    /// The civilization a city belongs to
    pub fn civ_of(&self, city: &City) -> Option<&Civilization> {
        self.civilizations.get(&city.civ_id)
    }

    pub fn get_owning_city(&self, position: HexCoord) -> Option<CityId> {
        self.tile_owners.get(&position).copied()
    }

    pub fn get_owner(&self, position: HexCoord) -> Option<CivId> {
        self.get_owning_city(position)
            .and_then(|id| self.get_city(id))
            .map(|city| city.civ_id)
    }

    /// A city's center is always owned by that city
    pub fn is_city_center(&self, position: HexCoord) -> bool {
        self.get_owning_city(position)
            .and_then(|id| self.get_city(id))
            .is_some_and(|city| city.location == position)
    }

    pub fn get_working_city(&self, position: HexCoord) -> Option<CityId> {
        self.get_owning_city(position)
            .filter(|id| self.get_city(*id).is_some_and(|city| city.is_worked(position)))
    }

    /// Adds a city record to a civilization without claiming any tiles
    pub(crate) fn insert_city(
        &mut self,
        civ_id: CivId,
        name: &str,
        location: HexCoord,
    ) -> Option<CityId> {
        let civ = self.civilizations.get_mut(&civ_id)?;
        let id = CityId(self.next_city_id);
        self.next_city_id += 1;

        let mut city = City::new(id, name, civ_id, location);
        city.is_capital = civ.cities.is_empty();
        civ.cities.push(id);
        self.cities.insert(id, city);
        Some(id)
    }

    /// Hands a tile to a city, first taking it (and any worker on it) away
    /// from its previous owner
    pub(crate) fn assign_tile(&mut self, position: HexCoord, city_id: CityId) -> Option<CityId> {
        let previous = self.unassign_tile(position);
        if let Some(city) = self.cities.get_mut(&city_id) {
            city.tiles.insert(position);
            self.tile_owners.insert(position, city_id);
        }
        previous
    }

    /// Removes a tile from its owner, releasing the worker on it if any
    pub(crate) fn unassign_tile(&mut self, position: HexCoord) -> Option<CityId> {
        let previous = self.tile_owners.remove(&position)?;
        if let Some(city) = self.cities.get_mut(&previous) {
            city.tiles.remove(&position);
            if city.worked_tiles.remove(&position) {
                debug!("{} stops working {} as it loses the tile", city.name, position);
            }
        }
        Some(previous)
    }

    /// Removes a city from the game, releasing all of its tiles. If it was
    /// the capital, the next city of its civilization becomes the capital.
    pub(crate) fn remove_city(&mut self, city_id: CityId) -> Option<City> {
        let mut positions: Vec<HexCoord> = self.cities.get(&city_id)?.tiles.iter().copied().collect();
        positions.sort();
        for position in positions {
            self.unassign_tile(position);
        }

        let city = self.cities.remove(&city_id)?;
        if let Some(civ) = self.civilizations.get_mut(&city.civ_id) {
            civ.cities.retain(|id| *id != city_id);
            if city.is_capital {
                if let Some(next_capital) = civ.cities.first().and_then(|id| self.cities.get_mut(id)) {
                    next_capital.is_capital = true;
                }
            }
        }
        Some(city)
    }

    /// Whether ownership lookup, cities' tile sets and worked tiles agree:
    /// every worked tile is owned by the working city, and every owned tile
    /// is listed by exactly the city the lookup names.
    pub fn territory_is_consistent(&self) -> bool {
        let lookup_matches_cities = self.tile_owners.iter().all(|(position, city_id)| {
            self.cities
                .get(city_id)
                .is_some_and(|city| city.owns(*position))
        });
        let cities_match_lookup = self.cities.values().all(|city| {
            city.tiles
                .iter()
                .all(|position| self.tile_owners.get(position) == Some(&city.id))
                && city.worked_tiles.is_subset(&city.tiles)
                && !city.worked_tiles.contains(&city.location)
        });
        lookup_matches_cities && cities_match_lookup
    }
}
