//! Single-path routing with per-hop energy depletion
//!
//! `route` is the only operation that mutates the energy store. Every call
//! charges the live store again, so repeating a request compounds the cost.

use log::{debug, warn};
use serde::Serialize;
use std::fmt;

use super::energy::EnergyStore;
use super::topology::Topology;
use super::types::{MacProtocol, NodeId};

/// Transcript entry reported when source and sink are disconnected
pub const NO_PATH_FOUND: &str = "No path found!";

/// Reasons a routing request cannot produce a route
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteError {
    /// The node is not part of the current topology
    InvalidSelection { node: NodeId, node_count: usize },
    /// Source and sink lie in different components
    NoPathFound { source: NodeId, sink: NodeId },
}

impl fmt::Display for RouteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouteError::InvalidSelection { node, node_count } => write!(
                f,
                "Node {} is not in the topology (valid ids are 0..{})",
                node, node_count
            ),
            RouteError::NoPathFound { source, sink } => {
                write!(f, "No path from node {} to node {}", source, sink)
            }
        }
    }
}

impl std::error::Error for RouteError {}

/// Result of one routing request
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteOutcome {
    pub source: NodeId,
    pub sink: NodeId,
    pub protocol: MacProtocol,
    /// Route from source to sink inclusive, `None` if unreachable
    pub path: Option<Vec<NodeId>>,
    /// One `"sender → receiver"` line per hop, or the no-path sentinel
    pub transcript: Vec<String>,
}

impl RouteOutcome {
    fn unreachable(source: NodeId, sink: NodeId, protocol: MacProtocol) -> Self {
        Self {
            source,
            sink,
            protocol,
            path: None,
            transcript: vec![NO_PATH_FOUND.to_string()],
        }
    }

    pub fn is_delivered(&self) -> bool {
        self.path.is_some()
    }

    /// Number of hops travelled (zero when source == sink or unreachable)
    pub fn hops(&self) -> usize {
        self.path
            .as_ref()
            .map(|path| path.len().saturating_sub(1))
            .unwrap_or(0)
    }

    /// Consecutive `(sender, receiver)` pairs along the route
    pub fn hop_pairs(&self) -> Vec<(NodeId, NodeId)> {
        self.path
            .as_ref()
            .map(|path| path.windows(2).map(|pair| (pair[0], pair[1])).collect())
            .unwrap_or_default()
    }

    /// Total energy this request took from the network
    pub fn energy_spent(&self) -> u32 {
        self.hops() as u32 * self.protocol.hop_cost().total()
    }

    /// Turn an unreachable outcome into `RouteError::NoPathFound`
    pub fn into_path(self) -> Result<Vec<NodeId>, RouteError> {
        self.path.ok_or(RouteError::NoPathFound {
            source: self.source,
            sink: self.sink,
        })
    }
}

fn check_selection(
    topology: &Topology,
    energy: &EnergyStore,
    node: NodeId,
) -> Result<(), RouteError> {
    if topology.contains(node) && energy.contains(node) {
        Ok(())
    } else {
        Err(RouteError::InvalidSelection {
            node,
            node_count: topology.node_count(),
        })
    }
}

/// Route from `source` to `sink` over `topology`, charging each hop to `energy`
/// according to `protocol`.
///
/// For each hop the sender pays the transmit cost, then the receiver pays the
/// receive cost. When no path exists the outcome carries the no-path sentinel
/// and `energy` is left untouched.
pub fn route(
    topology: &Topology,
    source: NodeId,
    sink: NodeId,
    energy: &mut EnergyStore,
    protocol: MacProtocol,
) -> Result<RouteOutcome, RouteError> {
    check_selection(topology, energy, source)?;
    check_selection(topology, energy, sink)?;

    let Some(path) = topology.shortest_path(source, sink) else {
        warn!("No path found from node {} to node {}", source, sink);
        return Ok(RouteOutcome::unreachable(source, sink, protocol));
    };

    let cost = protocol.hop_cost();
    let mut transcript = Vec::with_capacity(path.len().saturating_sub(1));

    for pair in path.windows(2) {
        let (sender, receiver) = (pair[0], pair[1]);
        energy.drain(sender, cost.tx as f32);
        energy.drain(receiver, cost.rx as f32);
        debug!(
            "{} hop {} -> {} (tx {}, rx {})",
            protocol, sender, receiver, cost.tx, cost.rx
        );
        transcript.push(format!("{} → {}", sender, receiver));
    }

    Ok(RouteOutcome {
        source,
        sink,
        protocol,
        path: Some(path),
        transcript,
    })
}
