//! Plane connectivity
//!
//! A filled plane fragment joins every conductor it touches on its layer.
//! Instead of connecting all contained points pairwise, each contained point
//! is linked to the previous one in registration order: k points give a path
//! of k - 1 edges, which merges them into one component just the same.

use super::engine::PointId;
use super::topology::NetTopology;
use crate::board::{Board, NetSignal};
use crate::geometry::Fragment;

/// Adds the edges implied by the planes of one net on one board
pub struct PlaneConnectivityResolver<'a> {
    board: &'a Board,
    net_signal: &'a NetSignal,
}

impl<'a> PlaneConnectivityResolver<'a> {
    pub fn new(board: &'a Board, net_signal: &'a NetSignal) -> Self {
        Self { board, net_signal }
    }

    /// Chain the points covered by each plane fragment; returns the number of edges added
    pub fn resolve(&self, topology: &mut NetTopology) -> usize {
        let mut added = 0;
        for plane in self.net_signal.planes_on(self.board) {
            for fragment in &plane.fragments {
                added += chain_fragment(topology, &plane.layer, fragment);
            }
        }

        tracing::debug!(
            "Planes of net '{}' added {} edges",
            self.net_signal.name,
            added
        );
        added
    }
}

/// Points present on `layer` and covered by `fragment`, in registration order
pub fn points_in_fragment(topology: &NetTopology, layer: &str, fragment: &Fragment) -> Vec<PointId> {
    topology
        .points()
        .iter()
        .enumerate()
        .filter(|(id, _)| topology.layer(*id).is_some_and(|l| l.is_on(layer)))
        .filter(|(_, position)| fragment.contains(position))
        .map(|(id, _)| id)
        .collect()
}

/// Link each covered point to its predecessor; returns the number of edges added
pub fn chain_fragment(topology: &mut NetTopology, layer: &str, fragment: &Fragment) -> usize {
    let covered = points_in_fragment(topology, layer, fragment);
    for pair in covered.windows(2) {
        tracing::trace!("Plane on {} joins points {} and {}", layer, pair[0], pair[1]);
        topology.add_edge(pair[0], pair[1]);
    }
    covered.len().saturating_sub(1)
}
