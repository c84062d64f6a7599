pub mod hex_math;
pub mod map_generator;
pub mod terrain;
pub mod tile;
pub mod tile_map;

pub use hex_math::{HexCoord, HexMath, Vector2};
pub use map_generator::MapGenerator;
pub use terrain::Terrain;
pub use tile::Tile;
pub use tile_map::TileMap;
