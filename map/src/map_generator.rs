use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use rules::Stats;

use crate::hex_math::{HexCoord, HexMath};
use crate::terrain::Terrain;
use crate::tile_map::TileMap;

// Relative weights of the land terrains, in `Terrain::ALL` order
const TERRAIN_WEIGHTS: [u32; 7] = [30, 25, 8, 7, 15, 5, 10];
// Chance that a tile carries a resource worth one extra yield
const BONUS_RESOURCE_CHANCE: f64 = 0.15;

/// Generates small hexagonal maps with seeded, reproducible terrain
pub struct MapGenerator {
    rng: StdRng,
}

impl MapGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn generate_map(&mut self, radius: i32) -> TileMap {
        let mut tile_map = TileMap::from_fn(radius, |_| self.random_terrain());

        // lattice order, so each draw lands on the same tile for a given seed
        let mut resources = 0;
        for position in HexMath::get_vectors_in_distance(HexCoord::ZERO, radius) {
            if !self.rng.random_bool(BONUS_RESOURCE_CHANCE) {
                continue;
            }
            let bonus = match self.rng.random_range(0..3) {
                0 => Stats::with_yields(1.0, 0.0, 0.0),
                1 => Stats::with_yields(0.0, 1.0, 0.0),
                _ => Stats::with_yields(0.0, 0.0, 1.0),
            };
            if let Some(tile) = tile_map.get_mut(position) {
                tile.bonus = bonus;
                resources += 1;
            }
        }

        debug!(
            "Generated map of radius {} with {} tiles, {} resources",
            radius,
            tile_map.len(),
            resources
        );
        tile_map
    }

    fn random_terrain(&mut self) -> Terrain {
        let total: u32 = TERRAIN_WEIGHTS.iter().sum();
        let mut roll = self.rng.random_range(0..total);
        for (terrain, weight) in Terrain::ALL.iter().zip(TERRAIN_WEIGHTS) {
            if roll < weight {
                return *terrain;
            }
            roll -= weight;
        }
        Terrain::Grassland
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_map() {
        let first = MapGenerator::new(7).generate_map(5);
        for _ in 0..20 {
            let again = MapGenerator::new(7).generate_map(5);
            for tile in first.tiles() {
                assert_eq!(Some(tile), again.get(tile.position));
            }
        }
    }

    #[test]
    fn test_seed_places_some_resources() {
        let map = MapGenerator::new(7).generate_map(5);
        assert!(map.tiles().any(|tile| !tile.bonus.is_empty()));
    }

    #[test]
    fn test_generated_map_covers_radius() {
        let map = MapGenerator::new(1).generate_map(5);
        assert_eq!(map.len(), 91);
        assert_eq!(map.radius, 5);
    }
}
