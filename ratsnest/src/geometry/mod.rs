//! Geometry primitives
//!
//! Plain coordinate types and pure containment tests. Nothing in here knows
//! about boards, nets or rendering.

pub mod point;
pub mod polygon;

pub use point::{Length, Point, NM_PER_MM};
pub use polygon::{is_collinear, point_in_polygon, point_on_boundary, Fragment};
