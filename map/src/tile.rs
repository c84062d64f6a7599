use std::fmt;

use serde::{Deserialize, Serialize};

use rules::Stats;

use crate::hex_math::HexCoord;
use crate::terrain::Terrain;

/// A single map tile.
///
/// Tiles only carry what is intrinsic to the terrain. Which city owns a tile
/// is kept in a position-keyed lookup by the game state, not on the tile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tile {
    pub position: HexCoord,
    pub terrain: Terrain,
    /// Extra yields from resources or improvements on top of the terrain
    #[serde(default)]
    pub bonus: Stats,
}

impl Tile {
    pub fn new(position: HexCoord, terrain: Terrain) -> Self {
        Tile {
            position,
            terrain,
            bonus: Stats::new(),
        }
    }

    pub fn get_tile_stats(&self) -> Stats {
        self.terrain.base_stats() + self.bonus
    }

    pub fn provides_yield(&self) -> bool {
        !self.get_tile_stats().is_empty()
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.terrain.name(), self.position)
    }
}
