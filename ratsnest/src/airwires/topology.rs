//! Net topology collection
//!
//! Turns the board items of one net on one board into the point/edge graph
//! consumed by [`AirWiresBuilder`]. Every anchor (pad, via, attached net
//! point) becomes exactly one point; every net line becomes one edge.

use std::collections::HashMap;

use super::engine::{AirWiresBuilder, PointId};
use crate::board::{Anchor, Board, NetSegment, NetSignal, PadMount};
use crate::geometry::Point;

/// Copper layers a point is present on
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LayerAssignment {
    /// Through-hole pads and vias
    AllLayers,
    Layer(String),
}

impl LayerAssignment {
    /// Is the point present on `layer`?
    pub fn is_on(&self, layer: &str) -> bool {
        match self {
            LayerAssignment::AllLayers => true,
            LayerAssignment::Layer(own) => own == layer,
        }
    }
}

/// Point/edge graph of one net on one board, before plane resolution and completion
#[derive(Debug, Clone, Default)]
pub struct NetTopology {
    builder: AirWiresBuilder,
    layers: Vec<LayerAssignment>,
    anchors: HashMap<Anchor, PointId>,
}

impl NetTopology {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an anchor as a new point
    ///
    /// # Panics
    ///
    /// Panics if the anchor is already registered.
    pub fn register(&mut self, anchor: Anchor, position: Point, layer: LayerAssignment) -> PointId {
        assert!(
            !self.anchors.contains_key(&anchor),
            "{} registered twice in one net topology",
            anchor
        );
        let id = self.builder.add_point(position);
        self.layers.push(layer);
        self.anchors.insert(anchor, id);
        id
    }

    /// Record the net line between two registered anchors
    ///
    /// # Panics
    ///
    /// Panics if either anchor is not registered.
    pub fn connect(&mut self, start: &Anchor, end: &Anchor) {
        let (Some(&a), Some(&b)) = (self.anchors.get(start), self.anchors.get(end)) else {
            panic!(
                "net line between {} and {} references an anchor that is not part of the net",
                start, end
            );
        };
        self.builder.add_edge(a, b);
    }

    /// Record a connection between two registered points
    pub fn add_edge(&mut self, a: PointId, b: PointId) {
        self.builder.add_edge(a, b);
    }

    pub fn point_of(&self, anchor: &Anchor) -> Option<PointId> {
        self.anchors.get(anchor).copied()
    }

    pub fn layer(&self, id: PointId) -> Option<&LayerAssignment> {
        self.layers.get(id)
    }

    pub fn layers(&self) -> &[LayerAssignment] {
        &self.layers
    }

    pub fn points(&self) -> &[Point] {
        self.builder.points()
    }

    pub fn edges(&self) -> &[(PointId, PointId)] {
        self.builder.edges()
    }

    pub fn builder(&self) -> &AirWiresBuilder {
        &self.builder
    }
}

/// Gathers pads, vias, net points and net lines of one net on one board
pub struct NetTopologyCollector<'a> {
    board: &'a Board,
    net_signal: &'a NetSignal,
}

impl<'a> NetTopologyCollector<'a> {
    pub fn new(board: &'a Board, net_signal: &'a NetSignal) -> Self {
        Self { board, net_signal }
    }

    /// Collect the point/edge graph
    ///
    /// # Panics
    ///
    /// Panics when the net data is inconsistent: a component signal or net
    /// segment assigned to another net, an anchor seen twice, or a net line
    /// ending at an anchor that is not registered.
    pub fn collect(&self) -> NetTopology {
        let mut topology = NetTopology::new();

        self.collect_pads(&mut topology);

        for segment in &self.net_signal.net_segments {
            assert_eq!(
                segment.net, self.net_signal.uuid,
                "net segment {} is listed under net '{}' but assigned to another net",
                segment.uuid, self.net_signal.name
            );
            if !self.board.owns(segment) {
                continue;
            }
            Self::collect_segment(segment, &mut topology);
        }

        tracing::debug!(
            "Collected {} points and {} net lines for net '{}' on board '{}'",
            topology.points().len(),
            topology.edges().len(),
            self.net_signal.name,
            self.board.name
        );

        topology
    }

    fn collect_pads(&self, topology: &mut NetTopology) {
        for signal in &self.net_signal.component_signals {
            assert_eq!(
                signal.net, self.net_signal.uuid,
                "component signal {} of component {} is listed under net '{}' but connected to another net",
                signal.signal, signal.component, self.net_signal.name
            );
            for pad in signal.pads.iter().filter(|p| self.board.owns(*p)) {
                let layer = match &pad.mount {
                    PadMount::ThroughHole => LayerAssignment::AllLayers,
                    PadMount::SingleSided { layer } => LayerAssignment::Layer(layer.clone()),
                };
                topology.register(pad.anchor(), pad.position, layer);
            }
        }
    }

    fn collect_segment(segment: &NetSegment, topology: &mut NetTopology) {
        for via in &segment.vias {
            topology.register(via.anchor(), via.position, LayerAssignment::AllLayers);
        }

        // Net points without lines are leftovers and connect nothing
        let layers = segment.net_point_layers();
        for net_point in &segment.net_points {
            if let Some(layer) = layers.get(&net_point.uuid) {
                topology.register(
                    net_point.anchor(),
                    net_point.position,
                    LayerAssignment::Layer(layer.to_string()),
                );
            }
        }

        for line in &segment.net_lines {
            topology.connect(&line.start, &line.end);
        }
    }
}
