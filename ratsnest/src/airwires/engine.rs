//! Air-wire engine
//!
//! Completes a point/edge connectivity graph with the shortest set of
//! virtual connections:
//!
//! 1. Union-find over all points, joining the ends of every edge
//! 2. Each connected component becomes one node of a complete graph whose
//!    edge cost is the closest point pair between two components
//! 3. Prim's algorithm selects a minimum spanning tree over those nodes
//! 4. Every selected tree edge becomes one air wire between its closest pair
//!
//! Costs are exact squared integer distances, saturating only for points
//! more than 2^64 nm apart. Equal costs are ordered by ascending point-id
//! pair, which makes the tree unique and the output identical across runs and
//! platforms.
//!
//! The closest-pair search scans all cross-component point pairs, so a build
//! is quadratic in the number of points in the worst case (every point its own
//! component). Nets with thousands of unrouted anchors will feel that.

use petgraph::unionfind::UnionFind;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::geometry::{Point, NM_PER_MM};

/// Index of a point within one build
pub type PointId = usize;

/// Virtual connection between two unconnected points of a net
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AirWire {
    pub start: Point,
    pub end: Point,
}

impl AirWire {
    pub fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }

    /// Length in nanometres
    pub fn length(&self) -> f64 {
        self.start.distance_to(&self.end)
    }

    pub fn length_mm(&self) -> f64 {
        self.length() / NM_PER_MM
    }

    /// Two anchors at the same location that are still not connected
    pub fn is_zero_length(&self) -> bool {
        self.start == self.end
    }
}

/// Cheapest known link between the spanning tree and one outside component
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct Candidate {
    distance_sq: u128,
    low: PointId,
    high: PointId,
    tree_side: PointId,
    outside: PointId,
}

impl Candidate {
    fn new(points: &[Point], tree_side: PointId, outside: PointId) -> Self {
        Self {
            distance_sq: points[tree_side].distance_squared(&points[outside]),
            low: tree_side.min(outside),
            high: tree_side.max(outside),
            tree_side,
            outside,
        }
    }
}

/// Outcome of completing a point/edge graph
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Completion {
    /// Components before completion, each sorted by id, ordered by their lowest id
    pub components: Vec<Vec<PointId>>,
    /// Point-id pairs of the completing connections, in selection order
    pub connections: Vec<(PointId, PointId)>,
    pub air_wires: Vec<AirWire>,
}

/// Collects points and edges, then computes the air wires that complete them
#[derive(Debug, Clone, Default)]
pub struct AirWiresBuilder {
    points: Vec<Point>,
    edges: Vec<(PointId, PointId)>,
}

impl AirWiresBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a point and return its id; ids are handed out in ascending order
    pub fn add_point(&mut self, position: Point) -> PointId {
        self.points.push(position);
        self.points.len() - 1
    }

    /// Record an existing copper connection between two registered points
    ///
    /// # Panics
    ///
    /// Panics if either id was not returned by [`AirWiresBuilder::add_point`].
    pub fn add_edge(&mut self, a: PointId, b: PointId) {
        assert!(
            a < self.points.len() && b < self.points.len(),
            "edge ({}, {}) references an unregistered point (only {} points registered)",
            a,
            b,
            self.points.len()
        );
        self.edges.push((a, b));
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn edges(&self) -> &[(PointId, PointId)] {
        &self.edges
    }

    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    /// Connected components, each sorted by id, ordered by their lowest id
    pub fn components(&self) -> Vec<Vec<PointId>> {
        let mut sets = UnionFind::new(self.points.len());
        for &(a, b) in &self.edges {
            sets.union(a, b);
        }

        let mut slot_of_root: HashMap<PointId, usize> = HashMap::new();
        let mut components: Vec<Vec<PointId>> = Vec::new();
        for (id, root) in sets.into_labeling().into_iter().enumerate() {
            let slot = *slot_of_root.entry(root).or_insert_with(|| {
                components.push(Vec::new());
                components.len() - 1
            });
            components[slot].push(id);
        }

        components
    }

    /// Point-id pairs of the completing connections, in selection order
    ///
    /// The first id of each pair lies in the part already spanned, the second
    /// in the component being joined.
    pub fn build_connections(&self) -> Vec<(PointId, PointId)> {
        self.connect(&self.components())
    }

    /// Air wires completing the connectivity of all registered points
    pub fn build_air_wires(&self) -> Vec<AirWire> {
        self.complete().air_wires
    }

    /// Partition, connections and air wires from a single union-find pass
    pub fn complete(&self) -> Completion {
        let components = self.components();
        let connections = self.connect(&components);
        let air_wires: Vec<AirWire> = connections
            .iter()
            .map(|&(a, b)| AirWire::new(self.points[a], self.points[b]))
            .collect();

        tracing::debug!(
            "Built {} air wires for {} points in {} components",
            air_wires.len(),
            self.points.len(),
            components.len()
        );

        Completion {
            components,
            connections,
            air_wires,
        }
    }

    fn connect(&self, components: &[Vec<PointId>]) -> Vec<(PointId, PointId)> {
        if components.len() < 2 {
            return Vec::new();
        }

        let mut in_tree = vec![false; components.len()];
        let mut best: Vec<Option<Candidate>> = vec![None; components.len()];
        let mut connections = Vec::with_capacity(components.len() - 1);

        // Start from the component holding point 0
        let mut newest = 0;
        in_tree[newest] = true;

        for _ in 1..components.len() {
            for (slot, members) in components.iter().enumerate() {
                if in_tree[slot] {
                    continue;
                }
                if let Some(candidate) = self.closest_pair(&components[newest], members) {
                    if best[slot].map_or(true, |current| candidate < current) {
                        best[slot] = Some(candidate);
                    }
                }
            }

            let next = best
                .iter()
                .enumerate()
                .filter(|(slot, _)| !in_tree[*slot])
                .filter_map(|(slot, candidate)| candidate.map(|c| (slot, c)))
                .min_by_key(|(_, candidate)| *candidate);

            let Some((slot, candidate)) = next else {
                break;
            };
            in_tree[slot] = true;
            newest = slot;
            connections.push((candidate.tree_side, candidate.outside));
        }

        connections
    }

    fn closest_pair(&self, tree_side: &[PointId], outside: &[PointId]) -> Option<Candidate> {
        tree_side
            .iter()
            .flat_map(|&a| outside.iter().map(move |&b| (a, b)))
            .map(|(a, b)| Candidate::new(&self.points, a, b))
            .min()
    }
}
