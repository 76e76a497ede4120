//! Topology generation and the connectivity graph
//!
//! Nodes are dropped uniformly at random in a square area, and any two nodes
//! within transmission range of each other share an undirected link.

use log::{debug, info};
use petgraph::graph::{NodeIndex, UnGraph};
use petgraph::visit::EdgeRef;
use rand::Rng;
use std::collections::VecDeque;

use super::config::EnergyFloor;
use super::energy::EnergyStore;
use super::types::{NodeId, Position};

/// Edge data for the connectivity graph
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Link {
    /// Euclidean distance between the two endpoints
    pub distance: f32,
}

/// Draw `num_nodes` positions uniformly from `[0, area_size]²` and a full
/// energy store to go with them.
pub fn generate<R: Rng>(
    num_nodes: usize,
    area_size: f32,
    floor: EnergyFloor,
    rng: &mut R,
) -> (Vec<Position>, EnergyStore) {
    let positions = (0..num_nodes)
        .map(|_| {
            Position::new(
                rng.random_range(0.0..=area_size),
                rng.random_range(0.0..=area_size),
            )
        })
        .collect();

    (positions, EnergyStore::with_floor(num_nodes, floor))
}

/// Undirected, loop-free connectivity graph over the nodes of one session
#[derive(Debug, Clone)]
pub struct Topology {
    /// Node weights are positions; node index `i` is `NodeId(i)`
    graph: UnGraph<Position, Link>,
    /// Neighbour ids per node, ascending
    adjacency: Vec<Vec<NodeId>>,
    tx_range: f32,
}

impl Topology {
    /// Link every unordered pair of distinct nodes whose distance is within
    /// `tx_range`. Quadratic in node count.
    pub fn connect(positions: &[Position], tx_range: f32) -> Self {
        let mut graph = UnGraph::with_capacity(positions.len(), 0);
        let mut adjacency = vec![Vec::new(); positions.len()];
        for position in positions {
            graph.add_node(*position);
        }

        for (i, a) in positions.iter().enumerate() {
            for (j, b) in positions.iter().enumerate().skip(i + 1) {
                let distance = a.distance(b);
                if distance <= tx_range {
                    graph.add_edge(NodeIndex::new(i), NodeIndex::new(j), Link { distance });
                    // Pairs arrive in (i, j) order, so both lists stay sorted
                    adjacency[i].push(NodeId(j));
                    adjacency[j].push(NodeId(i));
                }
            }
        }

        let topology = Self {
            graph,
            adjacency,
            tx_range,
        };
        info!(
            "Connected {} nodes with range {}: {} links, {} isolated",
            topology.node_count(),
            tx_range,
            topology.edge_count(),
            topology.isolated_nodes().len()
        );
        topology
    }

    pub fn tx_range(&self) -> f32 {
        self.tx_range
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Whether `node` belongs to this topology
    pub fn contains(&self, node: NodeId) -> bool {
        node.0 < self.graph.node_count()
    }

    fn index(&self, node: NodeId) -> Option<NodeIndex> {
        self.contains(node).then(|| NodeIndex::new(node.0))
    }

    pub fn nodes(&self) -> impl Iterator<Item = NodeId> {
        (0..self.graph.node_count()).map(NodeId)
    }

    pub fn position(&self, node: NodeId) -> Option<Position> {
        self.index(node).map(|index| self.graph[index])
    }

    /// Positions indexed by node id
    pub fn positions(&self) -> Vec<Position> {
        self.graph.node_weights().copied().collect()
    }

    /// All links as `(lower id, higher id)`, sorted
    pub fn edges(&self) -> Vec<(NodeId, NodeId)> {
        let mut edges: Vec<(NodeId, NodeId)> = self
            .graph
            .edge_references()
            .map(|edge| {
                let a = edge.source().index();
                let b = edge.target().index();
                (NodeId(a.min(b)), NodeId(a.max(b)))
            })
            .collect();
        edges.sort();
        edges
    }

    /// Distance of the link between two nodes, if they are linked
    pub fn link(&self, a: NodeId, b: NodeId) -> Option<Link> {
        let edge = self.graph.find_edge(self.index(a)?, self.index(b)?)?;
        self.graph.edge_weight(edge).copied()
    }

    pub fn has_link(&self, a: NodeId, b: NodeId) -> bool {
        self.link(a, b).is_some()
    }

    /// Neighbours of a node in ascending id order
    pub fn neighbors(&self, node: NodeId) -> &[NodeId] {
        self.adjacency
            .get(node.0)
            .map(|neighbors| neighbors.as_slice())
            .unwrap_or(&[])
    }

    pub fn degree(&self, node: NodeId) -> usize {
        self.neighbors(node).len()
    }

    /// Nodes with no neighbour in range
    pub fn isolated_nodes(&self) -> Vec<NodeId> {
        self.nodes().filter(|node| self.degree(*node) == 0).collect()
    }

    /// Unweighted shortest path from `source` to `sink`, both included.
    ///
    /// Breadth-first, expanding neighbours in ascending id order; each node's
    /// parent is the first node that reached it. Returns `Some(vec![source])`
    /// when `source == sink` and `None` when either node is unknown or the two
    /// are in different components. Runs in O(N + E).
    pub fn shortest_path(&self, source: NodeId, sink: NodeId) -> Option<Vec<NodeId>> {
        self.index(source)?;
        self.index(sink)?;

        if source == sink {
            return Some(vec![source]);
        }

        let mut parent: Vec<Option<NodeId>> = vec![None; self.node_count()];
        let mut visited = vec![false; self.node_count()];
        let mut queue = VecDeque::new();
        visited[source.0] = true;
        queue.push_back(source);

        while let Some(current) = queue.pop_front() {
            for &next in self.neighbors(current) {
                if visited[next.0] {
                    continue;
                }
                visited[next.0] = true;
                parent[next.0] = Some(current);

                if next == sink {
                    let mut path = vec![sink];
                    let mut cursor = sink;
                    while let Some(previous) = parent[cursor.0] {
                        path.push(previous);
                        cursor = previous;
                    }
                    path.reverse();
                    debug!("Shortest path {} -> {}: {} hops", source, sink, path.len() - 1);
                    return Some(path);
                }

                queue.push_back(next);
            }
        }

        None
    }
}
