//! Core types for the sensor network simulation
//!
//! Node identities, positions and the MAC policy cost table.

use serde::Serialize;
use std::fmt;

/// Maximum (and initial) energy held by every node
pub const MAX_ENERGY: f32 = 100.0;

/// Energy spent by the sender of one hop under CSMA
pub const TRANSMISSION_COST: u32 = 2;

/// Energy spent by the receiver of one hop under CSMA
pub const RECEPTION_COST: u32 = 1;

/// Identity of a sensor node, an index in `[0, N)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct NodeId(pub usize);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A 2D position inside the deployment area
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: &Position) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Energy charged for a single hop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HopCost {
    /// Taken from the sending node
    pub tx: u32,
    /// Taken from the receiving node
    pub rx: u32,
}

impl HopCost {
    pub const fn total(&self) -> u32 {
        self.tx + self.rx
    }
}

/// Medium access control policy used for a routing request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, clap::ValueEnum)]
#[repr(usize)]
pub enum MacProtocol {
    /// Contention based access, full radio costs
    Csma = 0,
    /// Scheduled slots, half the radio costs (integer floor)
    Tdma = 1,
}

/// Per-hop cost of each policy, indexed by the `MacProtocol` discriminant.
/// New policies get a row here; the router never branches on the variant.
const COST_TABLE: [HopCost; 2] = [
    HopCost {
        tx: TRANSMISSION_COST,
        rx: RECEPTION_COST,
    },
    HopCost {
        tx: TRANSMISSION_COST / 2,
        rx: RECEPTION_COST / 2,
    },
];

impl MacProtocol {
    pub const ALL: [MacProtocol; 2] = [MacProtocol::Csma, MacProtocol::Tdma];

    /// Look up the per-hop cost pair for this policy
    pub fn hop_cost(self) -> HopCost {
        COST_TABLE[self as usize]
    }

    pub fn name(self) -> &'static str {
        match self {
            MacProtocol::Csma => "CSMA",
            MacProtocol::Tdma => "TDMA",
        }
    }
}

impl fmt::Display for MacProtocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
