//! A simulation session ties a topology and its energy store together
//!
//! Both are created by the same generation cycle and are always replaced
//! together. Routing borrows the session mutably, so there is one writer.

use anyhow::{Context, Result};
use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;

use super::config::NetworkConfig;
use super::energy::EnergyStore;
use super::router::{route, RouteError, RouteOutcome};
use super::topology::{generate, Topology};
use super::types::{MacProtocol, NodeId, Position};

/// Map width in characters
const MAP_WIDTH: usize = 61;
/// Map height in characters
const MAP_HEIGHT: usize = 25;

/// Aggregate figures for the current session
#[derive(Debug, Clone, PartialEq)]
pub struct SessionStats {
    pub nodes: usize,
    pub links: usize,
    pub isolated: usize,
    pub mean_degree: f32,
    pub total_energy: f32,
    pub consumed_energy: f32,
    /// Node with the least energy left
    pub weakest: Option<(NodeId, f32)>,
}

/// Topology, energy and generation state for one run of the simulator
pub struct SimSession {
    config: NetworkConfig,
    topology: Topology,
    energy: EnergyStore,

    /// Optional seeded RNG for reproducible layouts
    rng: Option<StdRng>,

    /// Number of generation cycles so far
    generation: u32,
}

impl SimSession {
    fn new_internal(config: NetworkConfig, mut rng: Option<StdRng>) -> Result<Self> {
        config.validate().context("Invalid network configuration")?;

        let (topology, energy) = Self::build(&config, &mut rng);
        info!(
            "Generation 1: {} nodes in {}x{} area",
            config.num_nodes, config.area_size, config.area_size
        );

        Ok(Self {
            config,
            topology,
            energy,
            rng,
            generation: 1,
        })
    }

    fn build(config: &NetworkConfig, rng: &mut Option<StdRng>) -> (Topology, EnergyStore) {
        let (positions, energy) = match rng {
            Some(rng) => generate(config.num_nodes, config.area_size, config.energy_floor, rng),
            None => generate(
                config.num_nodes,
                config.area_size,
                config.energy_floor,
                &mut rand::rng(),
            ),
        };
        (Topology::connect(&positions, config.tx_range), energy)
    }

    /// Create a session with a randomly placed topology
    pub fn new(config: NetworkConfig) -> Result<Self> {
        Self::new_internal(config, None)
    }

    /// Create a session whose layouts are reproducible from `seed`
    pub fn new_with_seed(config: NetworkConfig, seed: u64) -> Result<Self> {
        Self::new_internal(config, Some(StdRng::seed_from_u64(seed)))
    }

    /// Create a session over fixed node positions.
    ///
    /// `area_size` is taken from the furthest coordinate. Calling `regenerate`
    /// afterwards draws random positions like any other session.
    pub fn from_positions(positions: &[Position], tx_range: f32) -> Self {
        let area_size = positions
            .iter()
            .map(|p| p.x.max(p.y))
            .fold(1.0_f32, f32::max);
        let config = NetworkConfig::new(positions.len(), area_size, tx_range);

        Self {
            topology: Topology::connect(positions, tx_range),
            energy: EnergyStore::with_floor(positions.len(), config.energy_floor),
            config,
            rng: None,
            generation: 1,
        }
    }

    pub fn config(&self) -> &NetworkConfig {
        &self.config
    }

    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    pub fn energy(&self) -> &EnergyStore {
        &self.energy
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }

    /// Draw new positions, rebuild the graph and replace the energy store
    pub fn regenerate(&mut self) {
        let (topology, energy) = Self::build(&self.config, &mut self.rng);
        self.topology = topology;
        self.energy = energy;
        self.generation += 1;

        info!(
            "Generation {}: {} nodes in {}x{} area",
            self.generation, self.config.num_nodes, self.config.area_size, self.config.area_size
        );
    }

    /// Switch to new parameters and regenerate
    pub fn reconfigure(&mut self, config: NetworkConfig) -> Result<()> {
        config.validate().context("Invalid network configuration")?;
        self.config = config;
        self.regenerate();
        Ok(())
    }

    /// Refill every node without touching the topology
    pub fn reset_energy(&mut self) {
        self.energy.reset();
    }

    /// Run one routing request against this session's live energy store
    pub fn simulate(
        &mut self,
        source: NodeId,
        sink: NodeId,
        protocol: MacProtocol,
    ) -> Result<RouteOutcome, RouteError> {
        let outcome = route(&self.topology, source, sink, &mut self.energy, protocol)?;
        if outcome.is_delivered() {
            info!(
                "Routed {} -> {} over {} hops under {}, spent {}",
                source,
                sink,
                outcome.hops(),
                protocol,
                outcome.energy_spent()
            );
        }
        Ok(outcome)
    }

    /// Per-node energy as `"<value>%"` with one decimal place
    pub fn energy_percentages(&self) -> Vec<(NodeId, String)> {
        self.energy.percentages()
    }

    pub fn stats(&self) -> SessionStats {
        let nodes = self.topology.node_count();
        let links = self.topology.edge_count();
        let mean_degree = if nodes > 0 {
            2.0 * links as f32 / nodes as f32
        } else {
            0.0
        };

        SessionStats {
            nodes,
            links,
            isolated: self.topology.isolated_nodes().len(),
            mean_degree,
            total_energy: self.energy.total(),
            consumed_energy: self.energy.consumed(),
            weakest: self.energy.weakest(),
        }
    }

    /// Print a summary of the session state
    pub fn print_summary(&self) {
        let stats = self.stats();
        println!("=== WSN Session Summary ===");
        println!(
            "Nodes: {}, Links: {}, Isolated: {}",
            stats.nodes, stats.links, stats.isolated
        );
        println!(
            "Area: {:.1}x{:.1}, Range: {:.1}, Mean degree: {:.2}",
            self.config.area_size, self.config.area_size, self.config.tx_range, stats.mean_degree
        );
        println!(
            "Energy: total {:.1}, consumed {:.1}",
            stats.total_energy, stats.consumed_energy
        );
        if let Some((node, level)) = stats.weakest {
            println!("Weakest node: {} ({:.1})", node, level);
        }
    }

    /// Draw the topology as text. Links along `highlight` are drawn with `#`.
    pub fn render_map(&self, highlight: Option<&[NodeId]>) -> String {
        let positions = self.topology.positions();
        if positions.is_empty() {
            return "(empty topology)\n".to_string();
        }

        let span = self.config.area_size.max(f32::EPSILON);
        let to_grid = |p: &Position| -> (usize, usize) {
            let col = (p.x / span * (MAP_WIDTH - 1) as f32).round().max(0.0) as usize;
            // Flip Y so the origin sits bottom-left
            let row = ((span - p.y) / span * (MAP_HEIGHT - 1) as f32).round().max(0.0) as usize;
            (row.min(MAP_HEIGHT - 1), col.min(MAP_WIDTH - 1))
        };

        let route_links: Vec<(NodeId, NodeId)> = highlight
            .map(|path| {
                path.windows(2)
                    .map(|pair| (pair[0].min(pair[1]), pair[0].max(pair[1])))
                    .collect()
            })
            .unwrap_or_default();

        let mut grid = vec![vec![' '; MAP_WIDTH]; MAP_HEIGHT];

        // Draw links, route links last so they win over plain ones
        let mut links = self.topology.edges();
        links.sort_by_key(|link| route_links.contains(link));
        for (a, b) in links {
            let glyph = if route_links.contains(&(a, b)) { '#' } else { '.' };
            let (start_row, start_col) = to_grid(&positions[a.0]);
            let (end_row, end_col) = to_grid(&positions[b.0]);

            // Bresenham line walk
            let dx = (end_col as i32 - start_col as i32).abs();
            let dy = (end_row as i32 - start_row as i32).abs();
            let sx = if start_col < end_col { 1 } else { -1 };
            let sy = if start_row < end_row { 1 } else { -1 };

            let mut err = dx - dy;
            let mut x = start_col as i32;
            let mut y = start_row as i32;

            loop {
                grid[y as usize][x as usize] = glyph;

                if x == end_col as i32 && y == end_row as i32 {
                    break;
                }

                let e2 = 2 * err;
                if e2 > -dy {
                    err -= dy;
                    x += sx;
                }
                if e2 < dx {
                    err += dx;
                    y += sy;
                }
            }
        }

        for (index, position) in positions.iter().enumerate() {
            let (row, col) = to_grid(position);
            grid[row][col] = std::char::from_digit(index as u32 % 36, 36).unwrap_or('o');
        }

        let mut map = String::new();
        map.push_str("Legend: 0-9a-z=Node (id mod 36), .=Link, #=Route\n");
        for row in &grid {
            let line: String = row.iter().collect();
            map.push_str(line.trim_end());
            map.push('\n');
        }
        map
    }
}
