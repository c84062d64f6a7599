use std::fmt;
use std::ops::{Add, AddAssign};

use serde::{Deserialize, Serialize};

/// One of the yield "currencies" a tile or city produces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Stat {
    Food,
    Production,
    Gold,
    Science,
    Culture,
}

impl Stat {
    pub const ALL: [Stat; 5] = [
        Stat::Food,
        Stat::Production,
        Stat::Gold,
        Stat::Science,
        Stat::Culture,
    ];
}

impl fmt::Display for Stat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stat::Food => "Food",
            Stat::Production => "Production",
            Stat::Gold => "Gold",
            Stat::Science => "Science",
            Stat::Culture => "Culture",
        };
        f.write_str(name)
    }
}

/// A container for the yields of a tile or a whole city.
/// Mutable, allowing for easy merging of sources.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Stats {
    #[serde(default)]
    pub food: f32,
    #[serde(default)]
    pub production: f32,
    #[serde(default)]
    pub gold: f32,
    #[serde(default)]
    pub science: f32,
    #[serde(default)]
    pub culture: f32,
}

impl Stats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shorthand for the three yields every terrain carries
    pub fn with_yields(food: f32, production: f32, gold: f32) -> Self {
        Stats {
            food,
            production,
            gold,
            ..Stats::default()
        }
    }

    /// Get a value for a given Stat
    pub fn get(&self, stat: Stat) -> f32 {
        match stat {
            Stat::Food => self.food,
            Stat::Production => self.production,
            Stat::Gold => self.gold,
            Stat::Science => self.science,
            Stat::Culture => self.culture,
        }
    }

    /// Set a value for a given Stat
    pub fn set(&mut self, stat: Stat, value: f32) {
        match stat {
            Stat::Food => self.food = value,
            Stat::Production => self.production = value,
            Stat::Gold => self.gold = value,
            Stat::Science => self.science = value,
            Stat::Culture => self.culture = value,
        }
    }

    pub fn is_empty(&self) -> bool {
        Stat::ALL.iter().all(|stat| self.get(*stat) == 0.0)
    }

    /// The stat/value pairs that are not zero, in `Stat::ALL` order
    pub fn non_zero(&self) -> Vec<(Stat, f32)> {
        Stat::ALL
            .iter()
            .map(|stat| (*stat, self.get(*stat)))
            .filter(|(_, value)| *value != 0.0)
            .collect()
    }
}

impl Add for Stats {
    type Output = Stats;

    fn add(mut self, other: Stats) -> Stats {
        self += other;
        self
    }
}

impl AddAssign for Stats {
    fn add_assign(&mut self, other: Stats) {
        for stat in Stat::ALL {
            self.set(stat, self.get(stat) + other.get(stat));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_zero_skips_empty_stats() {
        let stats = Stats::with_yields(2.0, 0.0, 1.0);
        assert_eq!(stats.non_zero(), vec![(Stat::Food, 2.0), (Stat::Gold, 1.0)]);
        assert!(Stats::new().is_empty());
    }

    #[test]
    fn test_add_merges_every_stat() {
        let mut total = Stats::with_yields(1.0, 1.0, 0.0);
        total += Stats {
            culture: 3.0,
            ..Stats::with_yields(2.0, 0.0, 1.0)
        };
        assert_eq!(total.food, 3.0);
        assert_eq!(total.production, 1.0);
        assert_eq!(total.gold, 1.0);
        assert_eq!(total.culture, 3.0);
    }
}
