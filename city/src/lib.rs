pub mod city;
pub mod city_stats;
pub mod civilization;
pub mod game_info;
pub mod managers;
pub mod territory_rules;
pub mod tile_state;

#[cfg(test)]
pub(crate) mod test_support;

pub use city::{City, CityId};
pub use city_stats::CityStats;
pub use civilization::{CivId, Civilization};
pub use game_info::GameInfo;
pub use managers::{
    CityExpansionManager, CityFounder, CityPopulationManager, CityTurnManager, CityTurnResult,
    WorkToggle,
};
pub use territory_rules::{
    ContiguousTerritory, DistanceGoldCost, ExpansionCost, StatsRecompute, TerritoryEligibility,
    TerritoryRules, TileYieldStats,
};
pub use tile_state::{TerritoryState, TileClassifier};
