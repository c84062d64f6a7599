use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use map::{HexCoord, HexMath};

use crate::city_stats::CityStats;
use crate::civilization::CivId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CityId(pub u32);

impl fmt::Display for CityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "city#{}", self.0)
    }
}

/// Represents a city in the game
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct City {
    pub id: CityId,
    pub name: String,
    /// The civilization that owns this city
    pub civ_id: CivId,
    /// Position of the center tile
    pub location: HexCoord,
    pub population: i32,
    /// Population units assigned as specialists rather than to tiles
    pub specialists: i32,
    /// All tiles that this city controls, center included
    pub tiles: HashSet<HexCoord>,
    /// Tiles that have population assigned to them
    pub worked_tiles: HashSet<HexCoord>,
    /// Culture stored for border expansion
    pub culture_stored: i32,
    pub is_being_razed: bool,
    pub is_capital: bool,
    #[serde(skip)]
    pub city_stats: CityStats,
}

impl City {
    pub fn new(id: CityId, name: impl Into<String>, civ_id: CivId, location: HexCoord) -> Self {
        City {
            id,
            name: name.into(),
            civ_id,
            location,
            population: 1,
            specialists: 0,
            tiles: HashSet::new(),
            worked_tiles: HashSet::new(),
            culture_stored: 0,
            is_being_razed: false,
            is_capital: false,
            city_stats: CityStats::default(),
        }
    }

    pub fn is_worked(&self, position: HexCoord) -> bool {
        self.worked_tiles.contains(&position)
    }

    pub fn is_center(&self, position: HexCoord) -> bool {
        self.location == position
    }

    pub fn owns(&self, position: HexCoord) -> bool {
        self.tiles.contains(&position)
    }

    /// Population units that may be assigned to tiles at all
    pub fn free_population_capacity(&self) -> i32 {
        (self.population - self.specialists).max(0)
    }

    /// Gets the number of free (unemployed) population
    pub fn get_free_population(&self) -> i32 {
        self.population - self.specialists - self.worked_tiles.len() as i32
    }

    /// Tiles claimed beyond the center and its first ring, the ones a city
    /// starts with
    pub fn tiles_claimed(&self) -> i32 {
        self.tiles
            .iter()
            .filter(|position| HexMath::get_distance(self.location, **position) > 1)
            .count() as i32
    }

    /// Owned tiles close enough to the center to be worked, center excluded
    pub fn get_tiles_in_range(&self, work_range: i32) -> HashSet<HexCoord> {
        self.tiles
            .iter()
            .copied()
            .filter(|position| {
                let distance = HexMath::get_distance(self.location, *position);
                distance >= 1 && distance <= work_range
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn city_with_tiles(positions: &[(i32, i32)]) -> City {
        let mut city = City::new(CityId(1), "Roma", CivId(0), HexCoord::ZERO);
        city.tiles = positions.iter().map(|(x, y)| HexCoord::new(*x, *y)).collect();
        city
    }

    #[test]
    fn test_free_population_counts_workers_and_specialists() {
        let mut city = city_with_tiles(&[(0, 0), (1, 0), (0, 1)]);
        city.population = 4;
        city.specialists = 1;
        city.worked_tiles.insert(HexCoord::new(1, 0));
        assert_eq!(city.free_population_capacity(), 3);
        assert_eq!(city.get_free_population(), 2);
    }

    #[test]
    fn test_tiles_claimed_ignores_center_and_first_ring() {
        let city = city_with_tiles(&[(0, 0), (1, 0), (1, 1), (2, 0), (2, 2), (-1, 2)]);
        assert_eq!(city.tiles_claimed(), 3);
    }

    #[test]
    fn test_tiles_in_range_excludes_center_and_far_tiles() {
        let city = city_with_tiles(&[(0, 0), (1, 0), (2, 0), (3, 3), (4, 0)]);
        let in_range = city.get_tiles_in_range(3);
        assert!(!in_range.contains(&HexCoord::ZERO));
        assert!(in_range.contains(&HexCoord::new(3, 3)));
        assert!(!in_range.contains(&HexCoord::new(4, 0)));
        assert_eq!(in_range.len(), 3);
    }
}
