//! Per-node energy bookkeeping
//!
//! The store is a plain container keyed by node id. Only the router drains it,
//! and a topology regeneration replaces it wholesale.

use log::warn;
use ordered_float::OrderedFloat;

use super::config::EnergyFloor;
use super::types::{NodeId, MAX_ENERGY};

/// Remaining energy of every node in the active topology
#[derive(Debug, Clone, PartialEq)]
pub struct EnergyStore {
    levels: Vec<f32>,
    floor: EnergyFloor,
}

impl EnergyStore {
    /// Create a store with every node at `MAX_ENERGY`
    pub fn new(num_nodes: usize) -> Self {
        Self::with_floor(num_nodes, EnergyFloor::default())
    }

    pub fn with_floor(num_nodes: usize, floor: EnergyFloor) -> Self {
        Self {
            levels: vec![MAX_ENERGY; num_nodes],
            floor,
        }
    }

    pub fn floor(&self) -> EnergyFloor {
        self.floor
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    pub fn contains(&self, node: NodeId) -> bool {
        node.0 < self.levels.len()
    }

    /// Current energy of a node
    pub fn get(&self, node: NodeId) -> Option<f32> {
        self.levels.get(node.0).copied()
    }

    /// Current energy as a fraction of `MAX_ENERGY` (used for colouring)
    pub fn fraction(&self, node: NodeId) -> Option<f32> {
        self.get(node).map(|level| level / MAX_ENERGY)
    }

    /// All levels, indexed by node id
    pub fn levels(&self) -> &[f32] {
        &self.levels
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeId, f32)> + '_ {
        self.levels
            .iter()
            .enumerate()
            .map(|(index, level)| (NodeId(index), *level))
    }

    /// Take `amount` from a node, honouring the configured floor.
    /// Returns the new level, or `None` if the node is unknown.
    pub fn drain(&mut self, node: NodeId, amount: f32) -> Option<f32> {
        let floor = self.floor;
        let level = self.levels.get_mut(node.0)?;
        *level -= amount;

        match floor {
            EnergyFloor::ClampAtZero => *level = level.max(0.0),
            EnergyFloor::Unclamped => {
                if *level < 0.0 {
                    warn!("Node {} energy is negative ({:.1})", node, level);
                }
            }
        }

        Some(*level)
    }

    /// Put every node back to `MAX_ENERGY`
    pub fn reset(&mut self) {
        self.levels.fill(MAX_ENERGY);
    }

    /// Sum of all levels
    pub fn total(&self) -> f32 {
        self.levels.iter().sum()
    }

    /// Total energy spent since the store was full
    pub fn consumed(&self) -> f32 {
        MAX_ENERGY * self.levels.len() as f32 - self.total()
    }

    /// The node with the least energy left (lowest id on ties)
    pub fn weakest(&self) -> Option<(NodeId, f32)> {
        self.iter()
            .min_by_key(|(node, level)| (OrderedFloat(*level), *node))
    }

    /// Per-node energy as a percentage string with one decimal place
    pub fn percentages(&self) -> Vec<(NodeId, String)> {
        self.iter()
            .map(|(node, level)| (node, format!("{:.1}%", level / MAX_ENERGY * 100.0)))
            .collect()
    }
}
