use std::fmt;
use std::ops::{Add, Mul, Sub};

use serde::{Deserialize, Serialize};

/// Position of a tile on the hex grid.
///
/// Axial coordinates: the six neighbors of a tile are (±1, 0), (0, ±1),
/// (1, 1) and (-1, -1) away from it. Latitude grows with `x + y`.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct HexCoord {
    pub x: i32,
    pub y: i32,
}

impl HexCoord {
    pub const ZERO: HexCoord = HexCoord { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        HexCoord { x, y }
    }

    pub fn distance_to(self, other: HexCoord) -> i32 {
        HexMath::get_distance(self, other)
    }

    pub fn neighbors(self) -> [HexCoord; 6] {
        HexMath::ADJACENT.map(|offset| self + offset)
    }

    pub fn is_adjacent_to(self, other: HexCoord) -> bool {
        self.distance_to(other) == 1
    }
}

impl Add for HexCoord {
    type Output = HexCoord;

    fn add(self, other: HexCoord) -> HexCoord {
        HexCoord::new(self.x + other.x, self.y + other.y)
    }
}

impl Sub for HexCoord {
    type Output = HexCoord;

    fn sub(self, other: HexCoord) -> HexCoord {
        HexCoord::new(self.x - other.x, self.y - other.y)
    }
}

impl Mul<i32> for HexCoord {
    type Output = HexCoord;

    fn mul(self, factor: i32) -> HexCoord {
        HexCoord::new(self.x * factor, self.y * factor)
    }
}

impl fmt::Display for HexCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.x, self.y)
    }
}

/// A point on the flat plane the grid is laid out on
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vector2 {
    pub x: f32,
    pub y: f32,
}

impl Vector2 {
    pub const fn new(x: f32, y: f32) -> Self {
        Vector2 { x, y }
    }

    pub const fn zero() -> Self {
        Vector2 { x: 0.0, y: 0.0 }
    }

    pub fn scale(self, factor: f32) -> Vector2 {
        Vector2::new(self.x * factor, self.y * factor)
    }

    pub fn len(self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }
}

impl Add for Vector2 {
    type Output = Vector2;

    fn add(self, other: Vector2) -> Vector2 {
        Vector2::new(self.x + other.x, self.y + other.y)
    }
}

impl Sub for Vector2 {
    type Output = Vector2;

    fn sub(self, other: Vector2) -> Vector2 {
        Vector2::new(self.x - other.x, self.y - other.y)
    }
}

/// A collection of utility functions for working with hexagonal grids
pub struct HexMath;

impl HexMath {
    /// Offsets of the six neighbors, counterclockwise starting at 2 o'clock
    pub const ADJACENT: [HexCoord; 6] = [
        HexCoord::new(1, 0),
        HexCoord::new(1, 1),
        HexCoord::new(0, 1),
        HexCoord::new(-1, 0),
        HexCoord::new(-1, -1),
        HexCoord::new(0, -1),
    ];

    const HALF_SQRT_3: f32 = 0.866_025_4;

    /// Returns the number of tiles in a hexagonal map of radius size
    pub fn get_number_of_tiles_in_hexagon(size: i32) -> i32 {
        if size < 0 {
            return 0;
        }
        1 + 6 * size * (size + 1) / 2
    }

    /// Minimum number of adjacent-tile steps between two positions
    pub fn get_distance(origin: HexCoord, destination: HexCoord) -> i32 {
        let relative_x = origin.x - destination.x;
        let relative_y = origin.y - destination.y;
        if relative_x.signum() * relative_y.signum() >= 0 {
            relative_x.abs().max(relative_y.abs())
        } else {
            relative_x.abs() + relative_y.abs()
        }
    }

    /// Returns the positions exactly `distance` steps away from the origin
    pub fn get_vectors_at_distance(origin: HexCoord, distance: i32) -> Vec<HexCoord> {
        if distance < 0 {
            return Vec::new();
        }
        if distance == 0 {
            return vec![origin];
        }

        let mut vectors = Vec::with_capacity(6 * distance as usize);
        // start at 6 o'clock, every position is paired with the one on the other side of the clock
        let mut current = origin - HexCoord::new(distance, distance);
        let sides = [HexCoord::new(1, 0), HexCoord::new(1, 1), HexCoord::new(0, 1)];
        for step in sides {
            for _ in 0..distance {
                vectors.push(current);
                vectors.push(origin * 2 - current);
                current = current + step;
            }
        }
        vectors
    }

    /// Returns the positions at most `distance` steps away, nearest ring first
    pub fn get_vectors_in_distance(origin: HexCoord, distance: i32) -> Vec<HexCoord> {
        (0..=distance)
            .flat_map(|ring| Self::get_vectors_at_distance(origin, ring))
            .collect()
    }

    /// Converts hex coordinates to world coordinates.
    ///
    /// The x axis points to 10 o'clock and the y axis to 2 o'clock, both with
    /// length sqrt(3), so adjacent tiles are exactly sqrt(3) apart.
    pub fn hex_to_world_coords(hex_coord: HexCoord) -> Vector2 {
        let x = hex_coord.x as f32;
        let y = hex_coord.y as f32;
        Vector2::new(1.5 * (y - x), Self::HALF_SQRT_3 * (x + y))
    }

    /// Inverse of `hex_to_world_coords`, yields fractional hex coordinates
    pub fn world_to_hex_coords(world_coord: Vector2) -> Vector2 {
        let column = world_coord.x / 1.5; // y - x
        let latitude = world_coord.y / Self::HALF_SQRT_3; // x + y
        Vector2::new((latitude - column) / 2.0, (latitude + column) / 2.0)
    }

    /// Rounds fractional hex coordinates to the nearest valid hex
    pub fn round_hex_coords(hex_coord: Vector2) -> HexCoord {
        // cubic coordinates: (y - x, x, -y), components sum to zero
        let cubic = [hex_coord.y - hex_coord.x, hex_coord.x, -hex_coord.y];
        let mut rounded = cubic.map(f32::round);
        let delta = [
            (rounded[0] - cubic[0]).abs(),
            (rounded[1] - cubic[1]).abs(),
            (rounded[2] - cubic[2]).abs(),
        ];

        if delta[0] > delta[1] && delta[0] > delta[2] {
            rounded[0] = -rounded[1] - rounded[2];
        } else if delta[1] > delta[2] {
            rounded[1] = -rounded[0] - rounded[2];
        } else {
            rounded[2] = -rounded[0] - rounded[1];
        }

        HexCoord::new(rounded[1] as i32, -rounded[2] as i32)
    }
}
