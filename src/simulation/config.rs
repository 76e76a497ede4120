//! Generation parameters for a simulation session

use anyhow::{bail, Result};
use log::warn;
use std::ops::RangeInclusive;

/// Recommended bounds for the node count
pub const RECOMMENDED_NODES: RangeInclusive<usize> = 5..=50;

/// Recommended bounds for the side of the square deployment area
pub const RECOMMENDED_AREA: RangeInclusive<f32> = 10.0..=100.0;

/// Recommended bounds for the transmission range
pub const RECOMMENDED_RANGE: RangeInclusive<f32> = 5.0..=50.0;

/// What happens when a hop costs more energy than a node has left
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EnergyFloor {
    /// Energy keeps going down past zero
    #[default]
    Unclamped,
    /// Energy stops at zero
    ClampAtZero,
}

/// Parameters for one generation cycle
#[derive(Debug, Clone, PartialEq)]
pub struct NetworkConfig {
    pub num_nodes: usize,
    pub area_size: f32,
    pub tx_range: f32,
    pub energy_floor: EnergyFloor,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            num_nodes: 10,
            area_size: 50.0,
            tx_range: 20.0,
            energy_floor: EnergyFloor::Unclamped,
        }
    }
}

impl NetworkConfig {
    pub fn new(num_nodes: usize, area_size: f32, tx_range: f32) -> Self {
        Self {
            num_nodes,
            area_size,
            tx_range,
            ..Self::default()
        }
    }

    pub fn with_energy_floor(mut self, energy_floor: EnergyFloor) -> Self {
        self.energy_floor = energy_floor;
        self
    }

    /// Reject parameters the generator cannot work with.
    ///
    /// Values outside the recommended bounds are accepted with a warning.
    pub fn validate(&self) -> Result<()> {
        if self.num_nodes == 0 {
            bail!("Node count must be at least 1");
        }
        if !self.area_size.is_finite() || self.area_size <= 0.0 {
            bail!("Area size must be positive, got {}", self.area_size);
        }
        if !self.tx_range.is_finite() || self.tx_range < 0.0 {
            bail!("Transmission range must be non-negative, got {}", self.tx_range);
        }

        if !RECOMMENDED_NODES.contains(&self.num_nodes) {
            warn!(
                "Node count {} is outside the recommended {:?}",
                self.num_nodes, RECOMMENDED_NODES
            );
        }
        if !RECOMMENDED_AREA.contains(&self.area_size) {
            warn!(
                "Area size {} is outside the recommended {:?}",
                self.area_size, RECOMMENDED_AREA
            );
        }
        if !RECOMMENDED_RANGE.contains(&self.tx_range) {
            warn!(
                "Transmission range {} is outside the recommended {:?}",
                self.tx_range, RECOMMENDED_RANGE
            );
        }

        Ok(())
    }
}
