use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use map::{HexCoord, HexMath};

use crate::city::CityId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CivId(pub u32);

impl fmt::Display for CivId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "civ#{}", self.0)
    }
}

/// A player: treasury, ordered list of cities and what it has seen of the map
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Civilization {
    pub id: CivId,
    pub civ_name: String,
    pub gold: i32,
    /// In founding order; the city screen pages through them in this order
    pub cities: Vec<CityId>,
    pub explored_tiles: HashSet<HexCoord>,
}

impl Civilization {
    pub fn new(id: CivId, civ_name: impl Into<String>) -> Self {
        Civilization {
            id,
            civ_name: civ_name.into(),
            gold: 0,
            cities: Vec::new(),
            explored_tiles: HashSet::new(),
        }
    }

    pub fn add_gold(&mut self, delta: i32) {
        self.gold += delta;
    }

    pub fn has_explored(&self, position: HexCoord) -> bool {
        self.explored_tiles.contains(&position)
    }

    pub fn explore_around(&mut self, center: HexCoord, radius: i32) {
        self.explored_tiles
            .extend(HexMath::get_vectors_in_distance(center, radius));
    }

    /// The city `step` places away from `city` in founding order, wrapping
    /// around at both ends
    pub fn neighboring_city(&self, city: CityId, step: i32) -> Option<CityId> {
        let index = self.cities.iter().position(|id| *id == city)? as i32;
        let count = self.cities.len() as i32;
        let next = (index + step).rem_euclid(count);
        self.cities.get(next as usize).copied()
    }
}
