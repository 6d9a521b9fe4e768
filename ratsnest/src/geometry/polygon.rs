//! Polygon containment for filled copper
//!
//! Fragments are simple polygons with optional holes. Containment is
//! boundary-inclusive against the filled area: a point on the outline or on
//! the edge of a hole touches copper. All tests run on exact integer
//! arithmetic over the full `i64` coordinate range, so results do not depend
//! on the platform's float behaviour.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use super::point::{Length, Point};

/// One simple polygon piece of a plane, possibly with holes
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fragment {
    /// Outer boundary, implicitly closed
    pub outline: Vec<Point>,
    /// Cut-outs inside the outline, each implicitly closed
    #[serde(default)]
    pub holes: Vec<Vec<Point>>,
}

impl Fragment {
    pub fn new(outline: Vec<Point>) -> Self {
        Self {
            outline,
            holes: Vec::new(),
        }
    }

    /// Axis-aligned rectangle spanned by two opposite corners
    pub fn rectangle(a: Point, b: Point) -> Self {
        let (min_x, max_x) = (a.x.min(b.x), a.x.max(b.x));
        let (min_y, max_y) = (a.y.min(b.y), a.y.max(b.y));
        Self::new(vec![
            Point::new(min_x, min_y),
            Point::new(max_x, min_y),
            Point::new(max_x, max_y),
            Point::new(min_x, max_y),
        ])
    }

    pub fn with_hole(mut self, hole: Vec<Point>) -> Self {
        self.holes.push(hole);
        self
    }

    /// A fragment whose vertices all lie on one line holds no copper
    pub fn is_degenerate(&self) -> bool {
        is_collinear(&self.outline)
    }

    /// Check whether `point` lies on the filled area (boundary-inclusive, holes excluded)
    pub fn contains(&self, point: &Point) -> bool {
        if self.is_degenerate() {
            return false;
        }
        if point_on_boundary(point, &self.outline) {
            return true;
        }
        if !point_in_polygon(point, &self.outline) {
            return false;
        }

        for hole in &self.holes {
            if is_collinear(hole) {
                continue;
            }
            // The rim of a hole is still copper
            if point_on_boundary(point, hole) {
                return true;
            }
            if point_in_polygon(point, hole) {
                return false;
            }
        }

        true
    }
}

/// Ray casting test for the open interior of `polygon`
///
/// Points exactly on an edge give an unspecified answer; combine with
/// [`point_on_boundary`] when the boundary matters.
pub fn point_in_polygon(point: &Point, polygon: &[Point]) -> bool {
    if polygon.len() < 3 {
        return false;
    }

    let mut inside = false;
    let n = polygon.len();
    let mut j = n - 1;

    for i in 0..n {
        if ray_crosses_edge(point, &polygon[i], &polygon[j]) {
            inside = !inside;
        }
        j = i;
    }

    inside
}

/// Check whether `point` lies on any edge of the closed `polygon`
pub fn point_on_boundary(point: &Point, polygon: &[Point]) -> bool {
    match polygon.len() {
        0 => false,
        1 => polygon[0] == *point,
        n => (0..n).any(|i| point_on_segment(point, &polygon[i], &polygon[(i + 1) % n])),
    }
}

/// Check whether all vertices lie on one straight line (fewer than three always do)
pub fn is_collinear(polygon: &[Point]) -> bool {
    let Some(origin) = polygon.first() else {
        return true;
    };
    let Some(direction) = polygon.iter().find(|p| *p != origin) else {
        return true;
    };

    polygon.iter().all(|p| {
        compare_products(
            diff(direction.x, origin.x),
            diff(p.y, origin.y),
            diff(direction.y, origin.y),
            diff(p.x, origin.x),
        ) == Ordering::Equal
    })
}

/// Does a ray from `p` towards +x cross the edge `a`-`b`?
fn ray_crosses_edge(p: &Point, a: &Point, b: &Point) -> bool {
    if (a.y > p.y) == (b.y > p.y) {
        return false;
    }

    // p.x < a.x + (p.y - a.y) * (b.x - a.x) / (b.y - a.y), without division
    let dy = diff(b.y, a.y);
    let order = compare_products(diff(p.x, a.x), dy, diff(p.y, a.y), diff(b.x, a.x));
    if dy > 0 {
        order == Ordering::Less
    } else {
        order == Ordering::Greater
    }
}

fn point_on_segment(p: &Point, a: &Point, b: &Point) -> bool {
    compare_products(diff(b.x, a.x), diff(p.y, a.y), diff(b.y, a.y), diff(p.x, a.x))
        == Ordering::Equal
        && p.x >= a.x.min(b.x)
        && p.x <= a.x.max(b.x)
        && p.y >= a.y.min(b.y)
        && p.y <= a.y.max(b.y)
}

fn diff(a: Length, b: Length) -> i128 {
    a as i128 - b as i128
}

/// Exact ordering of `a * b` against `c * d` for coordinate differences
///
/// Each factor fits in 65 bits, so the magnitude of a product fits in `u128`
/// while the signed product may not fit in `i128`.
fn compare_products(a: i128, b: i128, c: i128, d: i128) -> Ordering {
    let (lhs_negative, lhs) = signed_product(a, b);
    let (rhs_negative, rhs) = signed_product(c, d);
    match (lhs_negative, rhs_negative) {
        (false, false) => lhs.cmp(&rhs),
        (true, true) => rhs.cmp(&lhs),
        (false, true) => Ordering::Greater,
        (true, false) => Ordering::Less,
    }
}

fn signed_product(a: i128, b: i128) -> (bool, u128) {
    let magnitude = a.unsigned_abs() * b.unsigned_abs();
    (magnitude != 0 && (a < 0) != (b < 0), magnitude)
}
