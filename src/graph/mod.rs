//! Weighted undirected graph over canonically keyed points.
//!
//! The hull pipeline builds one of these from the boundary edges of the
//! filtered triangulation, then repeatedly removes an edge and asks for the
//! shortest path between its endpoints to stitch closed polygons. The graph
//! is owned by a single hull computation and discarded afterward.

use std::collections::{BTreeSet, BinaryHeap, HashMap};

use thiserror::Error;

use crate::primitives::{Edge, Point2, PointKey};

/// Outcome of [`Graph::add_edge`]. Failures are non-fatal and leave the
/// graph unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeInsert {
    /// The edge was inserted symmetrically.
    Inserted,
    /// The edge already exists in the source's adjacency set.
    SourceExists,
    /// The edge already exists in the target's adjacency set.
    TargetExists,
}

/// Outcome of [`Graph::remove_edge`]. Failures are non-fatal and leave the
/// graph unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeRemoval {
    /// The edge was removed from both adjacency sets and both weight entries.
    Removed,
    /// The source side has no such edge.
    NoSource,
    /// The target side has no such edge.
    NoTarget,
}

/// Reasons a shortest-path query can yield no path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PathError {
    /// One of the endpoints is not a node of the graph.
    #[error("endpoint is not a node of the graph")]
    UnknownEndpoint,
    /// Both endpoints exist but no sequence of edges connects them.
    #[error("no path connects the endpoints")]
    Disconnected,
}

/// An undirected graph with non-negative edge weights, keyed by the
/// canonical [`PointKey`] of its points.
///
/// Invariant: `v ∈ adjacency[u] ⇔ u ∈ adjacency[v]`, and the weight map
/// holds both directions of every edge with equal values. Adjacency sets are
/// ordered so neighbor iteration is deterministic.
///
/// # Example
///
/// ```
/// use concavum::{Graph, Point2};
///
/// // Unit square, unit weights
/// let corners = [
///     Point2::new(0.0, 0.0),
///     Point2::new(1.0, 0.0),
///     Point2::new(1.0, 1.0),
///     Point2::new(0.0, 1.0),
/// ];
/// let mut graph = Graph::new();
/// for i in 0..4 {
///     graph.add_edge(corners[i], corners[(i + 1) % 4], 1.0);
/// }
///
/// // Direct edge wins
/// let path = graph.shortest_path(corners[0], corners[1]).unwrap();
/// assert_eq!(path, vec![corners[0], corners[1]]);
///
/// // Without it, the only route is the three-edge detour
/// graph.remove_edge(corners[0], corners[1]);
/// let detour = graph.shortest_path(corners[0], corners[1]).unwrap();
/// assert_eq!(detour, vec![corners[0], corners[3], corners[2], corners[1]]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Graph {
    points: HashMap<PointKey, Point2<f64>>,
    adjacency: HashMap<PointKey, BTreeSet<PointKey>>,
    weight: HashMap<PointKey, HashMap<PointKey, f64>>,
}

impl Graph {
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a graph from a list of edges, weighting each edge with the
    /// supplied distance function. Duplicate edges are skipped.
    pub fn from_edges<D>(edges: &[Edge], distance: D) -> Self
    where
        D: Fn(Point2<f64>, Point2<f64>) -> f64,
    {
        let mut graph = Self::new();
        for edge in edges {
            let _ = graph.add_edge(edge.source, edge.target, distance(edge.source, edge.target));
        }
        graph
    }

    /// Returns the number of nodes.
    pub fn node_count(&self) -> usize {
        self.points.len()
    }

    /// Returns true if the graph has no nodes.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Returns true if the point is a node of the graph.
    pub fn contains(&self, point: Point2<f64>) -> bool {
        self.points.contains_key(&point.key())
    }

    /// Iterates over the canonical keys of all nodes.
    pub fn node_keys(&self) -> impl Iterator<Item = PointKey> + '_ {
        self.points.keys().copied()
    }

    /// Returns the stored point for a canonical key, if it is a node.
    pub fn point(&self, key: PointKey) -> Option<Point2<f64>> {
        self.points.get(&key).copied()
    }

    /// Returns the neighbors of a point, in deterministic key order.
    pub fn neighbors(&self, point: Point2<f64>) -> Vec<Point2<f64>> {
        match self.adjacency.get(&point.key()) {
            Some(set) => set.iter().map(|k| self.points[k]).collect(),
            None => Vec::new(),
        }
    }

    /// Returns an arbitrary (but deterministic) neighbor of a point, if it
    /// has any remaining adjacency.
    pub fn neighbor(&self, point: Point2<f64>) -> Option<Point2<f64>> {
        let key = self.adjacency.get(&point.key())?.first()?;
        self.points.get(key).copied()
    }

    /// Returns the weight of the edge between two points, if present.
    pub fn edge_weight(&self, a: Point2<f64>, b: Point2<f64>) -> Option<f64> {
        self.weight.get(&a.key())?.get(&b.key()).copied()
    }

    /// Inserts an edge symmetrically, adding both endpoints as nodes if
    /// needed. Returns a failure status without mutating if the edge already
    /// exists from either direction.
    pub fn add_edge(&mut self, source: Point2<f64>, target: Point2<f64>, weight: f64) -> EdgeInsert {
        let source_key = source.key();
        let target_key = target.key();

        if self
            .adjacency
            .get(&source_key)
            .is_some_and(|adjacent| adjacent.contains(&target_key))
        {
            return EdgeInsert::SourceExists;
        }
        if self
            .adjacency
            .get(&target_key)
            .is_some_and(|adjacent| adjacent.contains(&source_key))
        {
            return EdgeInsert::TargetExists;
        }

        self.points.entry(source_key).or_insert(source);
        self.points.entry(target_key).or_insert(target);

        self.adjacency.entry(source_key).or_default().insert(target_key);
        self.adjacency.entry(target_key).or_default().insert(source_key);

        self.weight.entry(source_key).or_default().insert(target_key, weight);
        self.weight.entry(target_key).or_default().insert(source_key, weight);

        EdgeInsert::Inserted
    }

    /// Removes an edge from both adjacency sets and both weight entries.
    /// Returns a failure status without mutating if either side lacks the
    /// edge. Nodes are never removed, even when their last edge goes.
    pub fn remove_edge(&mut self, source: Point2<f64>, target: Point2<f64>) -> EdgeRemoval {
        let source_key = source.key();
        let target_key = target.key();

        match self.adjacency.get(&source_key) {
            None => return EdgeRemoval::NoSource,
            Some(adjacent) if !adjacent.contains(&target_key) => return EdgeRemoval::NoTarget,
            Some(_) => {}
        }
        match self.adjacency.get(&target_key) {
            None => return EdgeRemoval::NoTarget,
            Some(adjacent) if !adjacent.contains(&source_key) => return EdgeRemoval::NoSource,
            Some(_) => {}
        }

        if let Some(adjacent) = self.adjacency.get_mut(&source_key) {
            adjacent.remove(&target_key);
        }
        if let Some(adjacent) = self.adjacency.get_mut(&target_key) {
            adjacent.remove(&source_key);
        }
        if let Some(weights) = self.weight.get_mut(&source_key) {
            weights.remove(&target_key);
        }
        if let Some(weights) = self.weight.get_mut(&target_key) {
            weights.remove(&source_key);
        }

        EdgeRemoval::Removed
    }

    /// Computes the shortest path from `source` to `target`, inclusive.
    ///
    /// Runs Dijkstra's algorithm over the non-negative edge weights and
    /// reconstructs the path by walking predecessor links backward from the
    /// target. Returns [`PathError::UnknownEndpoint`] if either endpoint is
    /// not a node, [`PathError::Disconnected`] if no path exists.
    pub fn shortest_path(
        &self,
        source: Point2<f64>,
        target: Point2<f64>,
    ) -> Result<Vec<Point2<f64>>, PathError> {
        let source_key = source.key();
        let target_key = target.key();
        if !self.points.contains_key(&source_key) || !self.points.contains_key(&target_key) {
            return Err(PathError::UnknownEndpoint);
        }

        let (distance, predecessor) = self.dijkstra(source_key, target_key);
        if distance[&target_key].is_infinite() {
            return Err(PathError::Disconnected);
        }

        let mut path_keys = vec![target_key];
        let mut current = target_key;
        while current != source_key {
            // A finite distance guarantees an unbroken predecessor chain.
            match predecessor.get(&current) {
                Some(&previous) => {
                    path_keys.push(previous);
                    current = previous;
                }
                None => break,
            }
        }
        path_keys.reverse();

        Ok(path_keys.iter().map(|key| self.points[key]).collect())
    }

    /// Single-source shortest distances from `source`, stopping early once
    /// `target` is settled.
    fn dijkstra(
        &self,
        source: PointKey,
        target: PointKey,
    ) -> (HashMap<PointKey, f64>, HashMap<PointKey, PointKey>) {
        let mut distance: HashMap<PointKey, f64> =
            self.points.keys().map(|&key| (key, f64::INFINITY)).collect();
        distance.insert(source, 0.0);

        let mut predecessor: HashMap<PointKey, PointKey> = HashMap::new();
        let mut heap = BinaryHeap::new();
        heap.push(FrontierEntry {
            cost: 0.0,
            node: source,
        });

        while let Some(FrontierEntry { cost, node }) = heap.pop() {
            if node == target {
                break;
            }
            // Stale entry: a shorter route to this node was already settled.
            if cost > distance[&node] {
                continue;
            }
            if let Some(adjacent) = self.adjacency.get(&node) {
                for &neighbor in adjacent {
                    let next = cost + self.weight[&node][&neighbor];
                    if next < distance[&neighbor] {
                        distance.insert(neighbor, next);
                        predecessor.insert(neighbor, node);
                        heap.push(FrontierEntry {
                            cost: next,
                            node: neighbor,
                        });
                    }
                }
            }
        }

        (distance, predecessor)
    }
}

/// Heap entry ordered so the `BinaryHeap` pops the cheapest node first,
/// with ties broken by key for determinism.
#[derive(Debug, Clone, Copy)]
struct FrontierEntry {
    cost: f64,
    node: PointKey,
}

impl PartialEq for FrontierEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cost == other.cost && self.node == other.node
    }
}

impl Eq for FrontierEntry {}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        other
            .cost
            .total_cmp(&self.cost)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}
