//! Wireless sensor network simulation
//!
//! Topology generation, per-node energy and MAC-dependent routing. Nothing
//! here depends on how results are presented.

mod config;
mod energy;
mod router;
mod session;
mod topology;
mod types;

pub use config::{
    EnergyFloor, NetworkConfig, RECOMMENDED_AREA, RECOMMENDED_NODES, RECOMMENDED_RANGE,
};
pub use energy::EnergyStore;
pub use router::{route, RouteError, RouteOutcome, NO_PATH_FOUND};
pub use session::{SessionStats, SimSession};
pub use topology::{generate, Link, Topology};
pub use types::{
    HopCost, MacProtocol, NodeId, Position, MAX_ENERGY, RECEPTION_COST, TRANSMISSION_COST,
};
