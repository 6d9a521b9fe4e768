//! Ratsnest - air-wire computation for PCB nets
//!
//! For one net on one board this library finds the connection points that are
//! not yet joined by copper and proposes the shortest set of virtual "air
//! wires" that would join them. Pads, vias and the ends of routed traces are
//! collected into a point/edge graph, filled planes add the connections they
//! make, and a minimum spanning tree over the remaining clusters yields the
//! air wires.
//!
//! # Quick Start
//!
//! ```
//! use ratsnest::prelude::*;
//! use ratsnest::board::{ComponentSignalInstance, FootprintPad, PadMount};
//! use ratsnest::geometry::Point;
//! use uuid::Uuid;
//!
//! let board = Board::new("main");
//! let mut net = NetSignal::new("GND");
//! let pads = [(0.0, 0.0), (10.0, 0.0)]
//!     .into_iter()
//!     .map(|(x, y)| FootprintPad {
//!         uuid: Uuid::new_v4(),
//!         device: Uuid::new_v4(),
//!         board: board.uuid,
//!         position: Point::from_mm(x, y),
//!         mount: PadMount::ThroughHole,
//!     })
//!     .collect();
//! net.component_signals.push(ComponentSignalInstance {
//!     component: Uuid::new_v4(),
//!     signal: Uuid::new_v4(),
//!     net: net.uuid,
//!     pads,
//! });
//!
//! let air_wires = ratsnest::build_air_wires(&board, &net);
//! assert_eq!(air_wires.len(), 1);
//! assert!((air_wires[0].length_mm() - 10.0).abs() < 1e-9);
//! ```
//!
//! # Features
//!
//! - **Single net**: [`build_air_wires`] / [`BoardAirWiresBuilder`]
//! - **Whole board**: [`RatsnestCore::analyze_board`] with statistics
//! - **Snapshots**: JSON board snapshots via [`BoardSnapshot`]
//! - **Reusable engine**: [`AirWiresBuilder`] works on plain points and edges

pub mod airwires;
pub mod board;
pub mod core;
pub mod geometry;

// Re-export main types
pub use crate::core::{
    BoardRatsnest, NetRatsnest, RatsnestCore, RatsnestError, RatsnestOptions, RatsnestStats,
};
pub use airwires::{AirWire, AirWiresBuilder, BoardAirWiresBuilder, NetTopology};
pub use board::{Anchor, Board, BoardSnapshot, NetSignal};
pub use geometry::{Fragment, Point};

/// Air wires of `net_signal` on `board` (convenience wrapper).
///
/// # Panics
///
/// Panics if the net data is inconsistent, e.g. a net line ends at an anchor
/// that does not belong to the net.
pub fn build_air_wires(board: &Board, net_signal: &NetSignal) -> Vec<AirWire> {
    BoardAirWiresBuilder::new(board, net_signal).build_air_wires()
}

/// Load a board snapshot file (convenience wrapper).
pub fn load_snapshot(path: &std::path::Path) -> Result<BoardSnapshot, RatsnestError> {
    BoardSnapshot::load(path)
}

/// Parse a board snapshot from JSON text (convenience wrapper).
pub fn parse_snapshot(content: &str) -> Result<BoardSnapshot, RatsnestError> {
    BoardSnapshot::from_json(content)
}

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{
        AirWire, Board, BoardRatsnest, BoardSnapshot, NetRatsnest, NetSignal, RatsnestCore,
        RatsnestError, RatsnestOptions, RatsnestStats,
    };
}
