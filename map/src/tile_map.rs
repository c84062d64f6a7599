use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::hex_math::{HexCoord, HexMath};
use crate::terrain::Terrain;
use crate::tile::Tile;

/// The tiles of a hexagonal map, addressed by position.
///
/// Every position exists at most once; callers hold positions, never copies
/// of tiles.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TileMap {
    pub radius: i32,
    tiles: HashMap<HexCoord, Tile>,
}

impl TileMap {
    /// Creates a hexagonal map of given radius filled with one terrain
    pub fn new_hexagonal(radius: i32, terrain: Terrain) -> Self {
        Self::from_fn(radius, |_| terrain)
    }

    /// Creates a hexagonal map, asking `terrain_at` for every position
    pub fn from_fn(radius: i32, mut terrain_at: impl FnMut(HexCoord) -> Terrain) -> Self {
        let tiles = HexMath::get_vectors_in_distance(HexCoord::ZERO, radius)
            .into_iter()
            .map(|position| (position, Tile::new(position, terrain_at(position))))
            .collect();
        TileMap { radius, tiles }
    }

    pub fn get(&self, position: HexCoord) -> Option<&Tile> {
        self.tiles.get(&position)
    }

    pub fn get_mut(&mut self, position: HexCoord) -> Option<&mut Tile> {
        self.tiles.get_mut(&position)
    }

    pub fn contains(&self, position: HexCoord) -> bool {
        self.tiles.contains_key(&position)
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.values()
    }

    /// Gets all tiles exactly `distance` steps from the origin that exist on this map
    pub fn get_tiles_at_distance(&self, origin: HexCoord, distance: i32) -> Vec<&Tile> {
        HexMath::get_vectors_at_distance(origin, distance)
            .into_iter()
            .filter_map(|position| self.get(position))
            .collect()
    }

    /// Gets all tiles within a certain distance of a position, nearest ring first
    pub fn get_tiles_in_distance(&self, origin: HexCoord, distance: i32) -> Vec<&Tile> {
        self.get_tiles_in_distance_range(origin, 0..=distance)
    }

    pub fn get_tiles_in_distance_range(
        &self,
        origin: HexCoord,
        range: std::ops::RangeInclusive<i32>,
    ) -> Vec<&Tile> {
        range
            .flat_map(|distance| self.get_tiles_at_distance(origin, distance))
            .collect()
    }

    pub fn neighbors(&self, position: HexCoord) -> Vec<&Tile> {
        self.get_tiles_at_distance(position, 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hexagonal_map_size() {
        let map = TileMap::new_hexagonal(4, Terrain::Grassland);
        assert_eq!(map.len() as i32, HexMath::get_number_of_tiles_in_hexagon(4));
        assert!(map.contains(HexCoord::new(4, 4)));
        assert!(!map.contains(HexCoord::new(4, -1)));
    }

    #[test]
    fn test_rings_are_clipped_at_map_edge() {
        let map = TileMap::new_hexagonal(2, Terrain::Plains);
        assert_eq!(map.get_tiles_at_distance(HexCoord::ZERO, 2).len(), 12);
        assert!(map.get_tiles_at_distance(HexCoord::ZERO, 3).is_empty());
        // a corner tile has only three neighbors on the map
        assert_eq!(map.neighbors(HexCoord::new(2, 2)).len(), 3);
    }

    #[test]
    fn test_tiles_in_distance_are_nearest_first() {
        let map = TileMap::new_hexagonal(3, Terrain::Plains);
        let tiles = map.get_tiles_in_distance(HexCoord::new(1, 0), 2);
        assert_eq!(tiles[0].position, HexCoord::new(1, 0));
        let distances: Vec<_> = tiles
            .iter()
            .map(|tile| tile.position.distance_to(HexCoord::new(1, 0)))
            .collect();
        assert!(distances.windows(2).all(|pair| pair[0] <= pair[1]));
    }
}
