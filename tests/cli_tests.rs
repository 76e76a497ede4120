use std::process::{Command, Output};

fn run_cli(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_wsn_sim"))
        .args(args)
        .env("RUST_LOG", "warn,wsn_sim=info")
        .output()
        .expect("Failed to execute simulator")
}

/// Test that a seeded run completes and prints every report section
#[test]
fn test_headless_run_prints_report() {
    let output = run_cli(&["--nodes", "12", "--seed", "42", "--mac", "tdma"]);

    assert!(
        output.status.success(),
        "Simulator failed. stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    for section in [
        "Virtual WSN Simulator",
        "MAC: TDMA",
        "--- Routing Path ---",
        "=== Topology Map ===",
        "=== WSN Session Summary ===",
        "--- Node Energy Levels ---",
    ] {
        assert!(stdout.contains(section), "Missing '{}' in:\n{}", section, stdout);
    }
}

/// Test that two nodes out of range report no path and keep full energy
#[test]
fn test_disconnected_run_reports_no_path() {
    let output = run_cli(&[
        "--nodes", "2", "--area", "100", "--range", "0", "--seed", "1", "--json", "--no-map",
    ]);

    assert!(output.status.success(), "Simulator failed to run");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("No path found!"));
    assert!(!stdout.contains("=== Topology Map ==="));
    assert!(stdout.contains("\"Node 0\": \"100.0%\""));
    assert!(stdout.contains("\"Node 1\": \"100.0%\""));
}

/// Test that the JSON energy table lists nodes in id order past 100 nodes
#[test]
fn test_json_energy_table_keeps_node_order() {
    let output = run_cli(&[
        "--nodes", "120", "--seed", "3", "--runs", "0", "--json", "--no-map",
    ]);

    assert!(output.status.success(), "Simulator failed to run");

    let stdout = String::from_utf8_lossy(&output.stdout);
    let keys: Vec<String> = stdout
        .lines()
        .map(str::trim)
        .filter(|line| line.starts_with("\"Node "))
        .filter_map(|line| line.split('"').nth(1))
        .map(str::to_string)
        .collect();
    let expected: Vec<String> = (0..120).map(|id| format!("Node {}", id)).collect();

    assert_eq!(keys, expected);
}

/// Test that routing to a node outside the topology is refused
#[test]
fn test_invalid_sink_is_refused() {
    let output = run_cli(&["--nodes", "5", "--sink", "9"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Node 9 is not in the topology"),
        "Unexpected stderr: {}",
        stderr
    );
}
