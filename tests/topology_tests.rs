//! Topology generation and connectivity tests

use rand::rngs::StdRng;
use rand::SeedableRng;
use wsn_sim::simulation::{generate, EnergyFloor, NodeId, Position, Topology, MAX_ENERGY};

fn line_of_three() -> Vec<Position> {
    vec![
        Position::new(0.0, 0.0),
        Position::new(1.0, 0.0),
        Position::new(2.0, 0.0),
    ]
}

#[test]
fn test_generate_places_nodes_inside_area() {
    let mut rng = StdRng::seed_from_u64(7);
    let (positions, energy) = generate(40, 25.0, EnergyFloor::Unclamped, &mut rng);

    assert_eq!(positions.len(), 40);
    assert_eq!(energy.len(), 40);
    for position in &positions {
        assert!((0.0..=25.0).contains(&position.x), "x out of area: {:?}", position);
        assert!((0.0..=25.0).contains(&position.y), "y out of area: {:?}", position);
    }
    assert!(energy.levels().iter().all(|level| *level == MAX_ENERGY));
}

#[test]
fn test_generate_is_reproducible_with_same_seed() {
    let (a, _) = generate(12, 50.0, EnergyFloor::Unclamped, &mut StdRng::seed_from_u64(99));
    let (b, _) = generate(12, 50.0, EnergyFloor::Unclamped, &mut StdRng::seed_from_u64(99));
    assert_eq!(a, b);
}

#[test]
fn test_connect_links_only_within_range() {
    let topology = Topology::connect(&line_of_three(), 1.5);

    assert_eq!(topology.node_count(), 3);
    assert_eq!(topology.edges(), vec![(NodeId(0), NodeId(1)), (NodeId(1), NodeId(2))]);
    assert!(topology.has_link(NodeId(1), NodeId(0)));
    assert!(!topology.has_link(NodeId(0), NodeId(2)));
}

#[test]
fn test_connect_range_is_inclusive() {
    let topology = Topology::connect(&line_of_three(), 1.0);
    assert_eq!(topology.edge_count(), 2);

    let link = topology.link(NodeId(0), NodeId(1)).expect("link should exist");
    assert_eq!(link.distance, 1.0);
}

#[test]
fn test_zero_range_isolates_every_node() {
    let topology = Topology::connect(&line_of_three(), 0.0);

    assert_eq!(topology.edge_count(), 0);
    assert_eq!(topology.isolated_nodes(), vec![NodeId(0), NodeId(1), NodeId(2)]);
}

#[test]
fn test_random_topologies_are_symmetric_loop_free_and_in_range() {
    let mut rng = StdRng::seed_from_u64(2024);

    for round in 0..25 {
        let num_nodes = 5 + round;
        let tx_range = 5.0 + round as f32 * 1.5;
        let (positions, _) = generate(num_nodes, 60.0, EnergyFloor::Unclamped, &mut rng);
        let topology = Topology::connect(&positions, tx_range);

        for (a, b) in topology.edges() {
            assert_ne!(a, b, "self-loop on node {}", a);
            assert!(topology.has_link(a, b));
            assert!(topology.has_link(b, a));
            assert!(topology.neighbors(a).contains(&b));
            assert!(topology.neighbors(b).contains(&a));
            assert!(positions[a.0].distance(&positions[b.0]) <= tx_range);
        }

        for node in topology.nodes() {
            let neighbors = topology.neighbors(node);
            assert!(neighbors.windows(2).all(|pair| pair[0] < pair[1]));
            assert_eq!(topology.degree(node), neighbors.len());
        }

        // Every in-range pair must be linked
        for i in 0..num_nodes {
            for j in (i + 1)..num_nodes {
                let in_range = positions[i].distance(&positions[j]) <= tx_range;
                assert_eq!(topology.has_link(NodeId(i), NodeId(j)), in_range);
            }
        }
    }
}

#[test]
fn test_neighbors_are_sorted() {
    let positions = vec![
        Position::new(5.0, 5.0),
        Position::new(6.0, 5.0),
        Position::new(4.0, 5.0),
        Position::new(5.0, 6.0),
    ];
    let topology = Topology::connect(&positions, 1.0);

    assert_eq!(topology.neighbors(NodeId(0)), vec![NodeId(1), NodeId(2), NodeId(3)]);
    assert_eq!(topology.degree(NodeId(0)), 3);
    assert!(topology.neighbors(NodeId(10)).is_empty());
}

#[test]
fn test_shortest_path_prefers_lowest_ids_on_ties() {
    // Square: 0 and 3 are opposite corners, reachable through 1 or 2
    let positions = vec![
        Position::new(0.0, 0.0),
        Position::new(1.0, 0.0),
        Position::new(0.0, 1.0),
        Position::new(1.0, 1.0),
    ];
    let topology = Topology::connect(&positions, 1.0);

    assert_eq!(
        topology.shortest_path(NodeId(0), NodeId(3)),
        Some(vec![NodeId(0), NodeId(1), NodeId(3)])
    );
    assert_eq!(
        topology.shortest_path(NodeId(3), NodeId(0)),
        Some(vec![NodeId(3), NodeId(1), NodeId(0)])
    );
}

#[test]
fn test_shortest_path_edge_cases() {
    let topology = Topology::connect(&line_of_three(), 1.5);

    assert_eq!(topology.shortest_path(NodeId(1), NodeId(1)), Some(vec![NodeId(1)]));
    assert_eq!(topology.shortest_path(NodeId(0), NodeId(5)), None);

    let isolated = Topology::connect(&line_of_three(), 0.5);
    assert_eq!(isolated.shortest_path(NodeId(0), NodeId(2)), None);
}

#[test]
fn test_topology_keeps_range_and_positions() {
    let positions = line_of_three();
    let topology = Topology::connect(&positions, 1.5);

    assert_eq!(topology.tx_range(), 1.5);
    assert_eq!(topology.position(NodeId(2)), Some(Position::new(2.0, 0.0)));
    assert_eq!(topology.position(NodeId(3)), None);
    assert_eq!(topology.positions(), positions);
}
