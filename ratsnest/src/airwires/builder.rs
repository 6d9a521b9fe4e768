//! Air wires of one net on one board
//!
//! Glues the collector, the plane resolver and the engine together.

use super::engine::AirWire;
use super::planes::PlaneConnectivityResolver;
use super::topology::{NetTopology, NetTopologyCollector};
use crate::board::{Board, NetSignal};

/// Builds the air wires of a net signal on a board
///
/// The builder only borrows the board data. Builds for different nets can run
/// on separate threads as long as nobody mutates the board meanwhile.
pub struct BoardAirWiresBuilder<'a> {
    board: &'a Board,
    net_signal: &'a NetSignal,
    include_planes: bool,
}

impl<'a> BoardAirWiresBuilder<'a> {
    pub fn new(board: &'a Board, net_signal: &'a NetSignal) -> Self {
        Self {
            board,
            net_signal,
            include_planes: true,
        }
    }

    /// Whether filled planes count as connections (enabled by default)
    pub fn with_planes(mut self, include_planes: bool) -> Self {
        self.include_planes = include_planes;
        self
    }

    /// Point/edge graph including plane connections, before completion
    ///
    /// # Panics
    ///
    /// Panics on inconsistent net data, see [`NetTopologyCollector::collect`].
    pub fn collect_topology(&self) -> NetTopology {
        let mut topology = NetTopologyCollector::new(self.board, self.net_signal).collect();
        if self.include_planes {
            PlaneConnectivityResolver::new(self.board, self.net_signal).resolve(&mut topology);
        }
        topology
    }

    /// Air wires still needed to connect the net, in selection order
    ///
    /// # Panics
    ///
    /// Panics on inconsistent net data, see [`NetTopologyCollector::collect`].
    pub fn build_air_wires(&self) -> Vec<AirWire> {
        self.collect_topology().builder().build_air_wires()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{
        ComponentSignalInstance, FootprintPad, NetLine, NetSegment, PadMount, Plane, Via,
        BOTTOM_COPPER, TOP_COPPER,
    };
    use crate::geometry::{Fragment, Point};
    use uuid::Uuid;

    fn add_pad(net: &mut NetSignal, board: &Board, x_mm: f64, y_mm: f64, mount: PadMount) -> FootprintPad {
        let pad = FootprintPad {
            uuid: Uuid::new_v4(),
            device: Uuid::new_v4(),
            board: board.uuid,
            position: Point::from_mm(x_mm, y_mm),
            mount,
        };
        net.component_signals.push(ComponentSignalInstance {
            component: Uuid::new_v4(),
            signal: Uuid::new_v4(),
            net: net.uuid,
            pads: vec![pad.clone()],
        });
        pad
    }

    fn top() -> PadMount {
        PadMount::SingleSided {
            layer: TOP_COPPER.to_string(),
        }
    }

    fn bottom() -> PadMount {
        PadMount::SingleSided {
            layer: BOTTOM_COPPER.to_string(),
        }
    }

    #[test]
    fn test_empty_net() {
        let board = Board::new("main");
        let net = NetSignal::new("NC");
        assert!(BoardAirWiresBuilder::new(&board, &net).build_air_wires().is_empty());
    }

    #[test]
    fn test_unrouted_pads() {
        let board = Board::new("main");
        let mut net = NetSignal::new("SIG");
        add_pad(&mut net, &board, 0.0, 0.0, top());
        add_pad(&mut net, &board, 10.0, 0.0, top());

        let wires = BoardAirWiresBuilder::new(&board, &net).build_air_wires();
        assert_eq!(
            wires,
            vec![AirWire::new(Point::from_mm(0.0, 0.0), Point::from_mm(10.0, 0.0))]
        );
    }

    #[test]
    fn test_routed_pads() {
        let board = Board::new("main");
        let mut net = NetSignal::new("SIG");
        let a = add_pad(&mut net, &board, 0.0, 0.0, top());
        let b = add_pad(&mut net, &board, 10.0, 0.0, top());
        let mut segment = NetSegment::new(&board, &net);
        segment
            .net_lines
            .push(NetLine::new(a.anchor(), b.anchor(), TOP_COPPER));
        net.net_segments.push(segment);

        assert!(BoardAirWiresBuilder::new(&board, &net).build_air_wires().is_empty());
    }

    #[test]
    fn test_plane_joins_via_and_top_pad_but_not_bottom_pad() {
        let board = Board::new("main");
        let mut net = NetSignal::new("GND");
        let mut segment = NetSegment::new(&board, &net);
        segment.vias.push(Via::new(Point::from_mm(2.0, 2.0)));
        net.net_segments.push(segment);
        add_pad(&mut net, &board, 8.0, 8.0, top());
        add_pad(&mut net, &board, 5.0, 5.0, bottom());
        net.planes.push(Plane::new(&board, TOP_COPPER).with_fragment(Fragment::rectangle(
            Point::from_mm(0.0, 0.0),
            Point::from_mm(10.0, 10.0),
        )));

        let builder = BoardAirWiresBuilder::new(&board, &net);
        let topology = builder.collect_topology();
        assert_eq!(topology.edges().len(), 1);
        assert_eq!(topology.builder().components().len(), 2);

        let wires = builder.build_air_wires();
        assert_eq!(wires.len(), 1);
        assert!(wires.iter().any(|w| w.end == Point::from_mm(5.0, 5.0)
            || w.start == Point::from_mm(5.0, 5.0)));
    }

    #[test]
    fn test_planes_can_be_ignored() {
        let board = Board::new("main");
        let mut net = NetSignal::new("GND");
        add_pad(&mut net, &board, 1.0, 1.0, PadMount::ThroughHole);
        add_pad(&mut net, &board, 9.0, 9.0, PadMount::ThroughHole);
        net.planes.push(Plane::new(&board, BOTTOM_COPPER).with_fragment(Fragment::rectangle(
            Point::from_mm(0.0, 0.0),
            Point::from_mm(10.0, 10.0),
        )));

        assert!(BoardAirWiresBuilder::new(&board, &net).build_air_wires().is_empty());
        assert_eq!(
            BoardAirWiresBuilder::new(&board, &net)
                .with_planes(false)
                .build_air_wires()
                .len(),
            1
        );
    }
}
