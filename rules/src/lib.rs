pub mod error;
pub mod stats;
pub mod territory_constants;

pub use error::RulesError;
pub use stats::{Stat, Stats};
pub use territory_constants::TerritoryConstants;
