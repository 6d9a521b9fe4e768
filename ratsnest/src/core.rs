//! Board-level ratsnest analysis shared by library users and the CLI.

use serde::Serialize;
use std::path::Path;
use uuid::Uuid;

use crate::airwires::{AirWire, BoardAirWiresBuilder};
use crate::board::{Board, BoardSnapshot, NetSignal};

#[derive(Debug, thiserror::Error)]
pub enum RatsnestError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid snapshot: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Inconsistent snapshot: {0}")]
    Inconsistent(String),
    #[error("Unknown board: {0}")]
    UnknownBoard(String),
    #[error("Unknown net: {0}")]
    UnknownNet(String),
    #[error("Snapshot contains no boards")]
    NoBoards,
}

/// Options for ratsnest runs (CLI or library).
#[derive(Clone, Debug)]
pub struct RatsnestOptions {
    /// Net names or UUIDs to analyse; empty means all nets
    pub nets: Vec<String>,
    /// Treat filled planes as connections
    pub include_planes: bool,
    /// Leave fully routed nets out of the result
    pub skip_routed: bool,
}

impl Default for RatsnestOptions {
    fn default() -> Self {
        Self {
            nets: vec![],
            include_planes: true,
            skip_routed: false,
        }
    }
}

/// Air wires of one net
#[derive(Debug, Clone, Serialize)]
pub struct NetRatsnest {
    pub net: String,
    pub net_uuid: Uuid,
    pub point_count: usize,
    pub component_count: usize,
    pub air_wires: Vec<AirWire>,
}

impl NetRatsnest {
    pub fn is_routed(&self) -> bool {
        self.air_wires.is_empty()
    }

    pub fn total_length_mm(&self) -> f64 {
        self.air_wires.iter().map(|w| w.length_mm()).sum()
    }
}

/// Air wires of all analysed nets of one board
#[derive(Debug, Clone, Serialize)]
pub struct BoardRatsnest {
    pub board: String,
    pub board_uuid: Uuid,
    pub nets: Vec<NetRatsnest>,
    pub stats: RatsnestStats,
}

impl BoardRatsnest {
    pub fn has_unrouted(&self) -> bool {
        self.stats.air_wires > 0
    }

    pub fn total_air_wires(&self) -> usize {
        self.stats.air_wires
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RatsnestStats {
    pub nets: usize,
    pub routed_nets: usize,
    pub unrouted_nets: usize,
    pub air_wires: usize,
    pub total_length_mm: f64,
    pub longest_mm: f64,
}

fn nets_to_stats(nets: &[NetRatsnest]) -> RatsnestStats {
    let mut stats = RatsnestStats {
        nets: nets.len(),
        ..Default::default()
    };
    for net in nets {
        if net.is_routed() {
            stats.routed_nets += 1;
        } else {
            stats.unrouted_nets += 1;
        }
        for wire in &net.air_wires {
            let length = wire.length_mm();
            stats.air_wires += 1;
            stats.total_length_mm += length;
            stats.longest_mm = stats.longest_mm.max(length);
        }
    }
    stats
}

/// Core ratsnest API used by both library users and the CLI.
pub struct RatsnestCore;

impl RatsnestCore {
    /// Air wires of a single net on a board.
    ///
    /// # Panics
    ///
    /// Panics if the net data is inconsistent, e.g. a net line ends at an
    /// anchor that does not belong to the net.
    pub fn analyze_net(board: &Board, net: &NetSignal, options: &RatsnestOptions) -> NetRatsnest {
        let topology = BoardAirWiresBuilder::new(board, net)
            .with_planes(options.include_planes)
            .collect_topology();
        let completion = topology.builder().complete();

        NetRatsnest {
            net: net.name.clone(),
            net_uuid: net.uuid,
            point_count: topology.points().len(),
            component_count: completion.components.len(),
            air_wires: completion.air_wires,
        }
    }

    /// Air wires of every selected net of the snapshot on `board`.
    ///
    /// # Panics
    ///
    /// Panics on inconsistent net data. Snapshots obtained from
    /// [`BoardSnapshot::load`] or [`BoardSnapshot::from_json`] are already
    /// validated; call [`BoardSnapshot::validate`] on hand-built ones first.
    pub fn analyze_board(
        snapshot: &BoardSnapshot,
        board: &Board,
        options: &RatsnestOptions,
    ) -> Result<BoardRatsnest, RatsnestError> {
        let selected = Self::select_nets(snapshot, options)?;
        if selected.is_empty() {
            tracing::warn!("No nets selected for board '{}'", board.name);
        }

        let nets: Vec<NetRatsnest> = selected
            .into_iter()
            .map(|net| Self::analyze_net(board, net, options))
            .filter(|result| !(options.skip_routed && result.is_routed()))
            .collect();

        let stats = nets_to_stats(&nets);
        tracing::info!(
            "Board '{}': {} nets analysed, {} unrouted, {} air wires",
            board.name,
            stats.nets,
            stats.unrouted_nets,
            stats.air_wires
        );

        Ok(BoardRatsnest {
            board: board.name.clone(),
            board_uuid: board.uuid,
            nets,
            stats,
        })
    }

    /// Load a snapshot file and analyse one of its boards (the first one when `board` is `None`).
    pub fn analyze_file(
        path: &Path,
        board: Option<&str>,
        options: &RatsnestOptions,
    ) -> Result<BoardRatsnest, RatsnestError> {
        let snapshot = BoardSnapshot::load(path)?;
        let board = snapshot.select_board(board)?;
        Self::analyze_board(&snapshot, board, options)
    }

    fn select_nets<'a>(
        snapshot: &'a BoardSnapshot,
        options: &RatsnestOptions,
    ) -> Result<Vec<&'a NetSignal>, RatsnestError> {
        if options.nets.is_empty() {
            return Ok(snapshot.nets.iter().collect());
        }
        options
            .nets
            .iter()
            .map(|key| {
                snapshot
                    .find_net(key)
                    .ok_or_else(|| RatsnestError::UnknownNet(key.clone()))
            })
            .collect()
    }
}
