pub mod city_expansion_manager;
pub mod city_founder;
pub mod city_population_manager;
pub mod city_turn_manager;

pub use city_expansion_manager::CityExpansionManager;
pub use city_founder::CityFounder;
pub use city_population_manager::{CityPopulationManager, WorkToggle};
pub use city_turn_manager::{CityTurnManager, CityTurnResult};
