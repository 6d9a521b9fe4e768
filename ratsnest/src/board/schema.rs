//! Board Schema Definitions
//!
//! Read-only snapshot of the board items that take part in air-wire
//! computation: boards, net signals, footprint pads, net segments with their
//! vias, net points and net lines, and copper planes.
//!
//! Coordinates are nanometres. Identifiers are UUIDs, the same identity the
//! board model uses, so anchors can be compared without pointer identity.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use uuid::Uuid;

use crate::geometry::{Fragment, Point};

/// Top copper layer name
pub const TOP_COPPER: &str = "top_cu";

/// Bottom copper layer name
pub const BOTTOM_COPPER: &str = "bot_cu";

/// Anything that is placed on exactly one board
pub trait BoardItem {
    fn board(&self) -> Uuid;
}

/// A circuit board of the project
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    pub uuid: Uuid,
    pub name: String,
}

impl Board {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            name: name.into(),
        }
    }

    /// Does this item belong to this board?
    pub fn owns<T: BoardItem + ?Sized>(&self, item: &T) -> bool {
        item.board() == self.uuid
    }
}

/// Net signal with everything attached to it across all boards
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetSignal {
    pub uuid: Uuid,
    pub name: String,
    #[serde(default)]
    pub component_signals: Vec<ComponentSignalInstance>,
    #[serde(default)]
    pub net_segments: Vec<NetSegment>,
    #[serde(default)]
    pub planes: Vec<Plane>,
}

impl NetSignal {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            name: name.into(),
            component_signals: Vec::new(),
            net_segments: Vec::new(),
            planes: Vec::new(),
        }
    }

    /// Net segments of this net placed on `board`
    pub fn net_segments_on<'a>(&'a self, board: &'a Board) -> impl Iterator<Item = &'a NetSegment> {
        self.net_segments.iter().filter(move |s| board.owns(*s))
    }

    /// Planes of this net placed on `board`
    pub fn planes_on<'a>(&'a self, board: &'a Board) -> impl Iterator<Item = &'a Plane> {
        self.planes.iter().filter(move |p| board.owns(*p))
    }

    /// Footprint pads of this net placed on `board`
    pub fn pads_on<'a>(&'a self, board: &'a Board) -> impl Iterator<Item = &'a FootprintPad> {
        self.component_signals
            .iter()
            .flat_map(|cs| cs.pads.iter())
            .filter(move |p| board.owns(*p))
    }
}

/// Signal of one component instance, connected to a net signal
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentSignalInstance {
    pub component: Uuid,
    pub signal: Uuid,
    /// The net signal this component signal is connected to
    pub net: Uuid,
    /// Pads registered to this signal, possibly on several boards
    #[serde(default)]
    pub pads: Vec<FootprintPad>,
}

/// How a footprint pad is mounted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PadMount {
    /// Plated through all copper layers
    ThroughHole,
    /// Surface pad on one copper layer
    SingleSided { layer: String },
}

/// Pad of a placed footprint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FootprintPad {
    /// Pad identity within the footprint
    pub uuid: Uuid,
    /// Device instance owning the footprint
    pub device: Uuid,
    pub board: Uuid,
    pub position: Point,
    pub mount: PadMount,
}

impl FootprintPad {
    pub fn anchor(&self) -> Anchor {
        Anchor::Pad {
            device: self.device,
            pad: self.uuid,
        }
    }

    pub fn is_through_hole(&self) -> bool {
        matches!(self.mount, PadMount::ThroughHole)
    }
}

impl BoardItem for FootprintPad {
    fn board(&self) -> Uuid {
        self.board
    }
}

/// Routed part of a net on one board
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetSegment {
    pub uuid: Uuid,
    pub board: Uuid,
    /// The net signal this segment is assigned to
    pub net: Uuid,
    #[serde(default)]
    pub vias: Vec<Via>,
    #[serde(default)]
    pub net_points: Vec<NetPoint>,
    #[serde(default)]
    pub net_lines: Vec<NetLine>,
}

impl NetSegment {
    pub fn new(board: &Board, net: &NetSignal) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            board: board.uuid,
            net: net.uuid,
            vias: Vec::new(),
            net_points: Vec::new(),
            net_lines: Vec::new(),
        }
    }

    /// Layer of lines for every attached net point of this segment, keyed by net point UUID
    ///
    /// When lines on different layers meet at one net point, the first line wins.
    pub fn net_point_layers(&self) -> HashMap<Uuid, &str> {
        let mut layers = HashMap::new();
        for line in &self.net_lines {
            for anchor in [&line.start, &line.end] {
                if let Anchor::NetPoint { uuid } = anchor {
                    layers.entry(*uuid).or_insert(line.layer.as_str());
                }
            }
        }
        layers
    }
}

impl BoardItem for NetSegment {
    fn board(&self) -> Uuid {
        self.board
    }
}

/// Plated hole joining all copper layers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Via {
    pub uuid: Uuid,
    pub position: Point,
}

impl Via {
    pub fn new(position: Point) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            position,
        }
    }

    pub fn anchor(&self) -> Anchor {
        Anchor::Via { uuid: self.uuid }
    }
}

/// Junction or end point of net lines
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetPoint {
    pub uuid: Uuid,
    pub position: Point,
}

impl NetPoint {
    pub fn new(position: Point) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            position,
        }
    }

    pub fn anchor(&self) -> Anchor {
        Anchor::NetPoint { uuid: self.uuid }
    }
}

/// Routed trace between two anchors
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetLine {
    pub uuid: Uuid,
    pub start: Anchor,
    pub end: Anchor,
    pub layer: String,
}

impl NetLine {
    pub fn new(start: Anchor, end: Anchor, layer: impl Into<String>) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            start,
            end,
            layer: layer.into(),
        }
    }
}

/// Filled copper area of a net on one layer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Plane {
    pub uuid: Uuid,
    pub board: Uuid,
    pub layer: String,
    /// Filled pieces as computed by the plane filler
    #[serde(default)]
    pub fragments: Vec<Fragment>,
}

impl Plane {
    pub fn new(board: &Board, layer: impl Into<String>) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            board: board.uuid,
            layer: layer.into(),
            fragments: Vec::new(),
        }
    }

    pub fn with_fragment(mut self, fragment: Fragment) -> Self {
        self.fragments.push(fragment);
        self
    }
}

impl BoardItem for Plane {
    fn board(&self) -> Uuid {
        self.board
    }
}

/// Identity of anything a net line can attach to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Anchor {
    Pad { device: Uuid, pad: Uuid },
    Via { uuid: Uuid },
    NetPoint { uuid: Uuid },
}

impl fmt::Display for Anchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Anchor::Pad { device, pad } => write!(f, "pad {} of device {}", pad, device),
            Anchor::Via { uuid } => write!(f, "via {}", uuid),
            Anchor::NetPoint { uuid } => write!(f, "net point {}", uuid),
        }
    }
}
