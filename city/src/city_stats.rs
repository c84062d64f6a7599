use rules::Stats;

/// Aggregate yields of a city, derived from its center and worked tiles.
///
/// Never edited directly; replaced wholesale whenever work assignment or
/// ownership changes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CityStats {
    pub current_city_stats: Stats,
    pub worked_tiles: usize,
}

impl CityStats {
    pub fn food(&self) -> f32 {
        self.current_city_stats.food
    }

    pub fn production(&self) -> f32 {
        self.current_city_stats.production
    }

    pub fn gold(&self) -> f32 {
        self.current_city_stats.gold
    }
}
