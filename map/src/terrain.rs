use serde::{Deserialize, Serialize};

use rules::Stats;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Terrain {
    Grassland,
    Plains,
    Desert,
    Tundra,
    Hill,
    Mountain,
    Coast,
}

impl Terrain {
    pub const ALL: [Terrain; 7] = [
        Terrain::Grassland,
        Terrain::Plains,
        Terrain::Desert,
        Terrain::Tundra,
        Terrain::Hill,
        Terrain::Mountain,
        Terrain::Coast,
    ];

    /// Yields of the bare terrain, before improvements
    pub fn base_stats(self) -> Stats {
        match self {
            Terrain::Grassland => Stats::with_yields(2.0, 0.0, 0.0),
            Terrain::Plains => Stats::with_yields(1.0, 1.0, 0.0),
            Terrain::Desert => Stats::new(),
            Terrain::Tundra => Stats::with_yields(1.0, 0.0, 0.0),
            Terrain::Hill => Stats::with_yields(0.0, 2.0, 0.0),
            Terrain::Mountain => Stats::new(),
            Terrain::Coast => Stats::with_yields(1.0, 0.0, 1.0),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Terrain::Grassland => "Grassland",
            Terrain::Plains => "Plains",
            Terrain::Desert => "Desert",
            Terrain::Tundra => "Tundra",
            Terrain::Hill => "Hill",
            Terrain::Mountain => "Mountain",
            Terrain::Coast => "Coast",
        }
    }
}
