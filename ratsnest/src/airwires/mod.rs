//! Air-wire computation
//!
//! - `topology` - collects the point/edge graph of one net on one board
//! - `planes` - adds the connections made by filled planes
//! - `engine` - partitions the graph and computes the completing air wires
//! - `builder` - runs the three steps for a board and a net signal

pub mod builder;
pub mod engine;
pub mod planes;
pub mod topology;

pub use builder::BoardAirWiresBuilder;
pub use engine::{AirWire, AirWiresBuilder, Completion, PointId};
pub use planes::{chain_fragment, points_in_fragment, PlaneConnectivityResolver};
pub use topology::{LayerAssignment, NetTopology, NetTopologyCollector};
