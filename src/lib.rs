//! Wireless Sensor Network Simulator
//!
//! Builds a geometric connectivity graph from random node positions and routes
//! traffic over it, draining node energy according to the MAC protocol.

pub mod simulation;
