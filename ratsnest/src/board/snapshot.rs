//! Serialized board snapshots
//!
//! A snapshot is a JSON document holding the boards of a project and the net
//! signals with all their board items. It is the input format of the CLI and
//! of the integration tests.
//!
//! Parsed snapshots are validated before they are handed out, so the
//! consistency assertions of the air-wire build never fire on file input.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::path::Path;
use uuid::Uuid;

use super::schema::{Anchor, Board, NetSignal};
use crate::core::RatsnestError;

/// Consistent read-only view of the boards and nets of a project
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BoardSnapshot {
    #[serde(default)]
    pub boards: Vec<Board>,
    #[serde(default)]
    pub nets: Vec<NetSignal>,
}

impl BoardSnapshot {
    /// Load a snapshot from a JSON file
    pub fn load(path: &Path) -> Result<Self, RatsnestError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Parse and validate a snapshot
    pub fn from_json(content: &str) -> Result<Self, RatsnestError> {
        let snapshot: Self = serde_json::from_str(content)?;
        snapshot.validate()?;
        Ok(snapshot)
    }

    /// Check the cross references the air-wire build relies on
    ///
    /// Component signals and net segments must belong to the net listing
    /// them, no anchor may appear twice on one board, and every net line must
    /// end at anchors of its net on its own board.
    pub fn validate(&self) -> Result<(), RatsnestError> {
        self.nets.iter().try_for_each(validate_net)
    }

    pub fn to_json(&self) -> Result<String, RatsnestError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Find a board by name or UUID
    pub fn find_board(&self, key: &str) -> Option<&Board> {
        self.boards
            .iter()
            .find(|b| b.name == key || b.uuid.to_string() == key)
    }

    /// Find a net signal by name or UUID
    pub fn find_net(&self, key: &str) -> Option<&NetSignal> {
        self.nets
            .iter()
            .find(|n| n.name == key || n.uuid.to_string() == key)
    }

    /// Resolve a board selection; without a key the first board is used
    pub fn select_board(&self, key: Option<&str>) -> Result<&Board, RatsnestError> {
        match key {
            Some(key) => self
                .find_board(key)
                .ok_or_else(|| RatsnestError::UnknownBoard(key.to_string())),
            None => self.boards.first().ok_or(RatsnestError::NoBoards),
        }
    }
}

/// Anchors of one net, grouped by the board they sit on
type AnchorsByBoard = HashMap<Uuid, HashSet<Anchor>>;

fn validate_net(net: &NetSignal) -> Result<(), RatsnestError> {
    let mut anchors = AnchorsByBoard::new();

    for signal in &net.component_signals {
        if signal.net != net.uuid {
            return Err(RatsnestError::Inconsistent(format!(
                "component signal {} of component {} is listed under net '{}' but connected to net {}",
                signal.signal, signal.component, net.name, signal.net
            )));
        }
        for pad in &signal.pads {
            register(&mut anchors, pad.board, pad.anchor(), net)?;
        }
    }

    for segment in &net.net_segments {
        if segment.net != net.uuid {
            return Err(RatsnestError::Inconsistent(format!(
                "net segment {} is listed under net '{}' but assigned to net {}",
                segment.uuid, net.name, segment.net
            )));
        }
        for via in &segment.vias {
            register(&mut anchors, segment.board, via.anchor(), net)?;
        }
        for net_point in &segment.net_points {
            register(&mut anchors, segment.board, net_point.anchor(), net)?;
        }
    }

    for segment in &net.net_segments {
        let known = anchors.get(&segment.board);
        for line in &segment.net_lines {
            for anchor in [&line.start, &line.end] {
                if !known.is_some_and(|set| set.contains(anchor)) {
                    return Err(RatsnestError::Inconsistent(format!(
                        "net line {} of net '{}' ends at {}, which is not part of the net on board {}",
                        line.uuid, net.name, anchor, segment.board
                    )));
                }
            }
        }
    }

    Ok(())
}

fn register(
    anchors: &mut AnchorsByBoard,
    board: Uuid,
    anchor: Anchor,
    net: &NetSignal,
) -> Result<(), RatsnestError> {
    if anchors.entry(board).or_default().insert(anchor) {
        Ok(())
    } else {
        Err(RatsnestError::Inconsistent(format!(
            "{} appears twice in net '{}' on board {}",
            anchor, net.name, board
        )))
    }
}
