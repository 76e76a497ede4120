use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::{info, warn};
use serde::ser::{Serialize, SerializeMap, Serializer};

use wsn_sim::simulation::{
    EnergyFloor, MacProtocol, NetworkConfig, NodeId, RouteOutcome, SimSession,
};

/// Deployment scenario shown in the report header
#[derive(Debug, Clone, Copy, ValueEnum)]
enum UseCase {
    Forest,
    Habitat,
    Disaster,
}

impl UseCase {
    fn title(self) -> &'static str {
        match self {
            UseCase::Forest => "Forest Monitoring",
            UseCase::Habitat => "Habitat Monitoring",
            UseCase::Disaster => "Disaster Monitoring",
        }
    }
}

#[derive(Parser)]
#[command(name = "wsn_sim")]
#[command(about = "Wireless sensor network topology and routing simulator")]
struct Cli {
    /// Number of sensor nodes
    #[arg(long, default_value = "10")]
    nodes: usize,

    /// Side length of the square deployment area
    #[arg(long, default_value = "50")]
    area: f32,

    /// Transmission range
    #[arg(long, default_value = "20")]
    range: f32,

    /// MAC protocol used for routing
    #[arg(long, value_enum, default_value = "csma")]
    mac: MacProtocol,

    /// Source node id
    #[arg(long, default_value = "0")]
    source: usize,

    /// Sink node id (defaults to the last node)
    #[arg(long)]
    sink: Option<usize>,

    /// Seed for a reproducible layout
    #[arg(long)]
    seed: Option<u64>,

    /// How many times to send along the route (0 only shows the topology)
    #[arg(long, default_value = "1")]
    runs: u32,

    /// Stop node energy at zero instead of letting it go negative
    #[arg(long)]
    clamp_energy: bool,

    /// Deployment scenario label
    #[arg(long, value_enum, default_value = "forest")]
    use_case: UseCase,

    /// Print the energy table as JSON
    #[arg(long)]
    json: bool,

    /// Skip the text map
    #[arg(long)]
    no_map: bool,
}

/// Energy table in node id order, keyed `"Node <id>"`
struct EnergyReport(Vec<(String, String)>);

impl EnergyReport {
    fn from_session(session: &SimSession) -> Self {
        Self(
            session
                .energy_percentages()
                .into_iter()
                .map(|(node, percent)| (format!("Node {}", node), percent))
                .collect(),
        )
    }
}

impl Serialize for EnergyReport {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (node, percent) in &self.0 {
            map.serialize_entry(node, percent)?;
        }
        map.end()
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn,wsn_sim=info"))
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let floor = if cli.clamp_energy {
        EnergyFloor::ClampAtZero
    } else {
        EnergyFloor::Unclamped
    };
    let config = NetworkConfig::new(cli.nodes, cli.area, cli.range).with_energy_floor(floor);

    let mut session = match cli.seed {
        Some(seed) => SimSession::new_with_seed(config, seed),
        None => SimSession::new(config),
    }
    .context("Failed to build topology")?;

    let source = NodeId(cli.source);
    let sink = NodeId(cli.sink.unwrap_or(cli.nodes.saturating_sub(1)));

    println!("=== Virtual WSN Simulator: {} ===", cli.use_case.title());
    println!(
        "MAC: {}, Source: {}, Sink: {}, Runs: {}",
        cli.mac, source, sink, cli.runs
    );
    println!();

    let mut last: Option<RouteOutcome> = None;
    for attempt in 1..=cli.runs {
        let outcome = session
            .simulate(source, sink, cli.mac)
            .context("Routing request rejected")?;
        info!("Run {} finished, delivered: {}", attempt, outcome.is_delivered());
        last = Some(outcome);
    }

    if let Some(outcome) = &last {
        if outcome.is_delivered() {
            println!("Simulation completed");
        } else {
            warn!("Source {} cannot reach sink {}", source, sink);
        }
        println!("--- Routing Path ---");
        for line in &outcome.transcript {
            println!("  {}", line);
        }
        println!();
    }

    if !cli.no_map {
        let highlight = last.as_ref().and_then(|outcome| outcome.path.as_deref());
        println!("=== Topology Map ===");
        print!("{}", session.render_map(highlight));
        println!();
    }

    session.print_summary();
    println!();

    println!("--- Node Energy Levels ---");
    let report = EnergyReport::from_session(&session);
    if cli.json {
        let json = serde_json::to_string_pretty(&report).context("Failed to encode energy table")?;
        println!("{}", json);
    } else {
        for (node, percent) in &report.0 {
            println!("  {}: {}", node, percent);
        }
    }

    Ok(())
}
