use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::RulesError;

/// Moddable "constants" for city territory - ranges, factors in the expansion
/// cost formulae and the city screen layout.
///
/// When combining mods this is merged per field, not as an entire object:
/// if an override comes with a non-default value it is copied, otherwise the
/// parent value is left intact. If several overrides change the same field,
/// the last one wins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerritoryConstants {
    // Radius around the city center in which owned tiles can be worked
    pub city_work_range: i32,
    // Maximum distance from the center a city may claim tiles at
    pub city_expand_range: i32,
    // Tiles shown around the center on the city screen
    pub city_screen_display_range: i32,
    // Maximum distance for taking a tile over from another city of the same civ
    pub tile_acquire_range: i32,

    // Gold cost of a tile:
    // cost = (baseCost * (distance - 1) + tilesClaimed * costPerClaimed) * goldCostModifier
    pub tile_base_gold_cost: i32,
    pub tile_gold_cost_per_claimed: i32,
    pub gold_cost_modifier: f32,

    // Culture to next tile = base * (tilesClaimed + offset) ^ exponent
    pub culture_cost_base: f32,
    pub culture_cost_offset: f32,
    pub culture_cost_exponent: f32,

    pub tile_group_size: f32,
    pub tile_group_spacing: f32,
}

impl Default for TerritoryConstants {
    fn default() -> Self {
        Self {
            city_work_range: 3,
            city_expand_range: 5,
            city_screen_display_range: 5,
            tile_acquire_range: 3,
            tile_base_gold_cost: 50,
            tile_gold_cost_per_claimed: 5,
            gold_cost_modifier: 1.0,
            culture_cost_base: 6.0,
            culture_cost_offset: 1.4813,
            culture_cost_exponent: 1.3,
            tile_group_size: 50.0,
            tile_group_spacing: 0.8,
        }
    }
}

impl TerritoryConstants {
    /// Merges another set of constants into this one, copying only non-default values
    pub fn merge(&mut self, other: &TerritoryConstants) {
        let defaults = TerritoryConstants::default();

        if other.city_work_range != defaults.city_work_range {
            self.city_work_range = other.city_work_range;
        }
        if other.city_expand_range != defaults.city_expand_range {
            self.city_expand_range = other.city_expand_range;
        }
        if other.city_screen_display_range != defaults.city_screen_display_range {
            self.city_screen_display_range = other.city_screen_display_range;
        }
        if other.tile_acquire_range != defaults.tile_acquire_range {
            self.tile_acquire_range = other.tile_acquire_range;
        }
        if other.tile_base_gold_cost != defaults.tile_base_gold_cost {
            self.tile_base_gold_cost = other.tile_base_gold_cost;
        }
        if other.tile_gold_cost_per_claimed != defaults.tile_gold_cost_per_claimed {
            self.tile_gold_cost_per_claimed = other.tile_gold_cost_per_claimed;
        }
        if other.gold_cost_modifier != defaults.gold_cost_modifier {
            self.gold_cost_modifier = other.gold_cost_modifier;
        }
        if other.culture_cost_base != defaults.culture_cost_base {
            self.culture_cost_base = other.culture_cost_base;
        }
        if other.culture_cost_offset != defaults.culture_cost_offset {
            self.culture_cost_offset = other.culture_cost_offset;
        }
        if other.culture_cost_exponent != defaults.culture_cost_exponent {
            self.culture_cost_exponent = other.culture_cost_exponent;
        }
        if other.tile_group_size != defaults.tile_group_size {
            self.tile_group_size = other.tile_group_size;
        }
        if other.tile_group_spacing != defaults.tile_group_spacing {
            self.tile_group_spacing = other.tile_group_spacing;
        }
    }

    /// Checks that ranges are non-negative and multipliers positive
    pub fn validate(&self) -> Result<(), RulesError> {
        let ranges = [
            ("city_work_range", self.city_work_range),
            ("city_expand_range", self.city_expand_range),
            ("city_screen_display_range", self.city_screen_display_range),
            ("tile_acquire_range", self.tile_acquire_range),
            ("tile_base_gold_cost", self.tile_base_gold_cost),
            ("tile_gold_cost_per_claimed", self.tile_gold_cost_per_claimed),
        ];
        for (name, value) in ranges {
            if value < 0 {
                return Err(RulesError::OutOfRange {
                    name,
                    reason: format!("{} must not be negative", value),
                });
            }
        }

        let factors = [
            ("gold_cost_modifier", self.gold_cost_modifier),
            ("culture_cost_base", self.culture_cost_base),
            ("tile_group_size", self.tile_group_size),
            ("tile_group_spacing", self.tile_group_spacing),
        ];
        for (name, value) in factors {
            if !(value.is_finite() && value > 0.0) {
                return Err(RulesError::OutOfRange {
                    name,
                    reason: format!("{} must be a positive number", value),
                });
            }
        }
        Ok(())
    }

    /// Parses an override from json and merges it over the defaults.
    /// Fields missing from the json keep their default value.
    pub fn from_json_str(json: &str) -> Result<Self, RulesError> {
        let overrides: TerritoryConstants = serde_json::from_str(json)?;
        let mut constants = TerritoryConstants::default();
        constants.merge(&overrides);
        constants.validate()?;
        Ok(constants)
    }

    pub fn load(path: &Path) -> Result<Self, RulesError> {
        let json = fs::read_to_string(path).map_err(|source| RulesError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let constants = Self::from_json_str(&json)?;
        debug!("Loaded territory constants from {}: {:?}", path.display(), constants);
        Ok(constants)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let constants =
            TerritoryConstants::from_json_str(r#"{ "city_work_range": 2, "gold_cost_modifier": 1.5 }"#)
                .unwrap();
        assert_eq!(constants.city_work_range, 2);
        assert_eq!(constants.gold_cost_modifier, 1.5);
        assert_eq!(constants.city_expand_range, 5);
        assert_eq!(constants.tile_base_gold_cost, 50);
    }

    #[test]
    fn test_merge_only_copies_non_default_values() {
        let mut parent = TerritoryConstants {
            city_expand_range: 4,
            ..TerritoryConstants::default()
        };
        let child = TerritoryConstants {
            tile_acquire_range: 2,
            ..TerritoryConstants::default()
        };
        parent.merge(&child);
        assert_eq!(parent.city_expand_range, 4);
        assert_eq!(parent.tile_acquire_range, 2);
    }

    #[test]
    fn test_negative_range_is_rejected() {
        let result = TerritoryConstants::from_json_str(r#"{ "city_work_range": -1 }"#);
        assert!(matches!(
            result,
            Err(RulesError::OutOfRange { name: "city_work_range", .. })
        ));
    }

    #[test]
    fn test_malformed_json_is_invalid_format() {
        let result = TerritoryConstants::from_json_str("{ city_work_range: ");
        assert!(matches!(result, Err(RulesError::InvalidFormat(_))));
    }

    #[test]
    fn test_load_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "tile_base_gold_cost": 75 }}"#).unwrap();
        let constants = TerritoryConstants::load(file.path()).unwrap();
        assert_eq!(constants.tile_base_gold_cost, 75);
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let result = TerritoryConstants::load(Path::new("/nonexistent/territory.json"));
        assert!(matches!(result, Err(RulesError::Io { .. })));
    }
}
