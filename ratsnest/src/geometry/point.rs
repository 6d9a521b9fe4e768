//! Board coordinates
//!
//! All lengths are fixed-point nanometres, the native unit of the board model.
//! Distances are compared exactly on squared integer values and converted to
//! floating point only for reporting.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Length in nanometres
pub type Length = i64;

/// Nanometres per millimetre
pub const NM_PER_MM: f64 = 1_000_000.0;

/// 2D position on the board
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Point {
    pub x: Length,
    pub y: Length,
}

impl Point {
    pub const fn new(x: Length, y: Length) -> Self {
        Self { x, y }
    }

    /// Build a point from millimetre coordinates, rounded to the nearest nanometre
    pub fn from_mm(x: f64, y: f64) -> Self {
        Self {
            x: (x * NM_PER_MM).round() as Length,
            y: (y * NM_PER_MM).round() as Length,
        }
    }

    pub fn x_mm(&self) -> f64 {
        self.x as f64 / NM_PER_MM
    }

    pub fn y_mm(&self) -> f64 {
        self.y as f64 / NM_PER_MM
    }

    /// Squared distance in nm²
    ///
    /// Exact for any pair less than 2^64 nm apart; farther pairs saturate at
    /// `u128::MAX`.
    pub fn distance_squared(&self, other: &Point) -> u128 {
        let dx = (other.x as i128 - self.x as i128).unsigned_abs();
        let dy = (other.y as i128 - self.y as i128).unsigned_abs();
        (dx * dx).saturating_add(dy * dy)
    }

    /// Euclidean distance in nanometres
    pub fn distance_to(&self, other: &Point) -> f64 {
        let dx = (other.x as f64) - (self.x as f64);
        let dy = (other.y as f64) - (self.y as f64);
        dx.hypot(dy)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.3}, {:.3})", self.x_mm(), self.y_mm())
    }
}
