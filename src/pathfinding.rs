//! Single-source shortest paths over non-negative weighted digraphs
//!
//! This module provides Dijkstra's algorithm driven by an
//! [`IndexedHeap`] frontier, plus a brute-force reference used to check it.
//!
//! # Design
//!
//! Every vertex other than the source starts in the frontier, keyed by the
//! weight of a direct edge from the source or [`Distance::Unreached`]. The
//! heap has no decrease-key primitive; a shorter tentative distance is
//! applied by deleting the vertex by identity and inserting it again with
//! the smaller key. Both steps are O(log n) because the heap tracks the
//! position of every vertex.
//!
//! Negative weights are not checked for. The result is unspecified if any
//! edge weight is below `C::default()`.
//!
//! Distances are summed with `checked_add`. A path whose length would
//! exceed the range of `C` is never taken: if every path to a vertex
//! overflows, that vertex is reported as unreachable.
//!
//! # Example
//!
//! ```rust
//! use indexed_heaps::graph::Graph;
//! use indexed_heaps::pathfinding::shortest_paths;
//!
//! let graph = Graph::from_edges([(1, 2, 1u32), (1, 3, 4), (2, 3, 1), (3, 4, 1)]);
//! let distances = shortest_paths(&graph, 1).unwrap();
//!
//! assert_eq!(distances[&1], 0);
//! assert_eq!(distances[&3], 2);
//! assert_eq!(distances[&4], 3);
//! ```

use std::fmt;

use num_traits::CheckedAdd;
use rustc_hash::{FxHashMap, FxHashSet};
use tracing::{debug, trace};

use crate::graph::{Graph, Vertex};
use crate::indexed_binary::IndexedHeap;
use crate::traits::{HeapError, Keyed};

/// Trait for types that can be used as edge weights and distances.
///
/// This requires the type to be orderable, copyable, and support checked
/// addition. `Default` provides the zero distance of the source.
pub trait Cost: Ord + Copy + CheckedAdd + Default + fmt::Debug {}

impl<T> Cost for T where T: Ord + Copy + CheckedAdd + Default + fmt::Debug {}

/// Best-known distance of a vertex still in the frontier.
///
/// `Unreached` orders after every finite distance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Distance<C> {
    /// Length of the best path found so far
    Finite(C),
    /// No path found yet
    Unreached,
}

/// A frontier entry: the vertex is the identity, its distance the key.
#[derive(Debug, Clone)]
struct FrontierEntry<V, C> {
    vertex: V,
    distance: Distance<C>,
}

impl<V: Vertex, C: Cost> Keyed for FrontierEntry<V, C> {
    type Key = Distance<C>;
    type Identity = V;

    fn key(&self) -> Distance<C> {
        self.distance
    }

    fn identity(&self) -> V {
        self.vertex.clone()
    }
}

/// Result of a shortest-path run.
#[derive(Debug, Clone)]
pub struct ShortestPathTree<V: Vertex, C> {
    source: V,
    distances: FxHashMap<V, C>,
    /// Predecessor on a shortest path, for finalized vertices other than the source
    predecessors: Option<FxHashMap<V, V>>,
}

impl<V: Vertex, C: Cost> ShortestPathTree<V, C> {
    /// The vertex the search started from
    pub fn source(&self) -> &V {
        &self.source
    }

    /// Shortest distance to `vertex`, or `None` if it was not reached
    pub fn distance(&self, vertex: &V) -> Option<C> {
        self.distances.get(vertex).copied()
    }

    /// All reached vertices with their distances, the source included
    pub fn distances(&self) -> &FxHashMap<V, C> {
        &self.distances
    }

    /// Consumes the tree, keeping only the distance map
    pub fn into_distances(self) -> FxHashMap<V, C> {
        self.distances
    }

    /// Reconstructs the vertex sequence from the source to `target`, inclusive.
    ///
    /// Returns `None` if `target` was not reached or the run did not track paths.
    pub fn path_to(&self, target: &V) -> Option<Vec<V>> {
        let predecessors = self.predecessors.as_ref()?;
        if !self.distances.contains_key(target) {
            return None;
        }

        let mut path = vec![target.clone()];
        let mut current = target;
        while *current != self.source {
            current = predecessors.get(current)?;
            path.push(current.clone());
        }

        path.reverse();
        Some(path)
    }
}

/// Builder for shortest-path queries with more configuration options.
///
/// # Example
///
/// ```rust
/// use indexed_heaps::graph::Graph;
/// use indexed_heaps::pathfinding::ShortestPathBuilder;
///
/// let graph = Graph::from_edges([('a', 'b', 2u32), ('b', 'c', 2), ('c', 'd', 2)]);
/// let tree = ShortestPathBuilder::new('a')
///     .max_distance(4)
///     .track_paths(true)
///     .run(&graph)
///     .unwrap();
///
/// assert_eq!(tree.path_to(&'c'), Some(vec!['a', 'b', 'c']));
/// assert_eq!(tree.distance(&'d'), None); // beyond the bound
/// ```
#[derive(Debug, Clone)]
pub struct ShortestPathBuilder<V, C> {
    source: V,
    max_distance: Option<C>,
    track_paths: bool,
}

impl<V: Vertex, C: Cost> ShortestPathBuilder<V, C> {
    /// Creates a new builder searching from the given vertex.
    pub fn new(source: V) -> Self {
        ShortestPathBuilder {
            source,
            max_distance: None,
            track_paths: false,
        }
    }

    /// Sets the largest distance to finalize; farther vertices are omitted.
    pub fn max_distance(mut self, distance: C) -> Self {
        self.max_distance = Some(distance);
        self
    }

    /// Records predecessors so [`ShortestPathTree::path_to`] can rebuild paths.
    pub fn track_paths(mut self, track: bool) -> Self {
        self.track_paths = track;
        self
    }

    /// Runs Dijkstra's algorithm with the configured settings.
    pub fn run(self, graph: &Graph<V, C>) -> Result<ShortestPathTree<V, C>, HeapError> {
        let ShortestPathBuilder {
            source,
            max_distance,
            track_paths,
        } = self;

        let mut distances = FxHashMap::default();
        distances.insert(source.clone(), C::default());
        let mut predecessors: FxHashMap<V, V> = FxHashMap::default();

        // Cheapest direct edge from the source to each neighbor
        let mut direct: FxHashMap<V, C> = FxHashMap::default();
        for edge in graph.edges(&source) {
            direct
                .entry(edge.target.clone())
                .and_modify(|weight| *weight = (*weight).min(edge.weight))
                .or_insert(edge.weight);
        }

        let vertices = graph.vertices();
        let mut frontier = IndexedHeap::with_capacity(vertices.len());
        for vertex in vertices {
            if vertex == source {
                continue;
            }
            let distance = match direct.get(&vertex) {
                Some(&weight) => {
                    if track_paths {
                        predecessors.insert(vertex.clone(), source.clone());
                    }
                    Distance::Finite(weight)
                }
                None => Distance::Unreached,
            };
            frontier.insert(FrontierEntry { vertex, distance })?;
        }

        while let Some(next) = frontier.peek_min() {
            let dist = match next.distance {
                Distance::Finite(dist) => dist,
                Distance::Unreached => {
                    debug!(unreachable = frontier.len(), "remaining vertices are unreachable");
                    break;
                }
            };
            if max_distance.is_some_and(|max| dist > max) {
                debug!(
                    ?max_distance,
                    remaining = frontier.len(),
                    "distance bound reached"
                );
                break;
            }

            let finalized = frontier.extract_min()?;
            distances.insert(finalized.vertex.clone(), dist);

            for edge in graph.edges(&finalized.vertex) {
                let Some(current) = frontier.get(&edge.target).map(|entry| entry.distance) else {
                    continue;
                };

                let candidate = dist
                    .checked_add(&edge.weight)
                    .map_or(Distance::Unreached, Distance::Finite);
                if candidate < current {
                    trace!(
                        vertex = ?edge.target,
                        via = ?finalized.vertex,
                        ?current,
                        ?candidate,
                        "relax"
                    );
                    frontier.delete(&edge.target)?;
                    frontier.insert(FrontierEntry {
                        vertex: edge.target.clone(),
                        distance: candidate,
                    })?;
                    if track_paths {
                        predecessors.insert(edge.target.clone(), finalized.vertex.clone());
                    }
                }
            }
        }

        debug!(source = ?source, reached = distances.len(), "shortest paths complete");

        let predecessors = track_paths.then(|| {
            predecessors.retain(|vertex, _| distances.contains_key(vertex));
            predecessors
        });

        Ok(ShortestPathTree {
            source,
            distances,
            predecessors,
        })
    }
}

/// Computes the shortest distance from `source` to every reachable vertex.
///
/// The source maps to `C::default()`; unreachable vertices are absent.
///
/// # Errors
/// Heap errors are propagated unchanged. The frontier bookkeeping keeps
/// every heap precondition, so they indicate a bug rather than bad input.
pub fn shortest_paths<V: Vertex, C: Cost>(
    graph: &Graph<V, C>,
    source: V,
) -> Result<FxHashMap<V, C>, HeapError> {
    ShortestPathBuilder::new(source)
        .run(graph)
        .map(ShortestPathTree::into_distances)
}

/// Shortest distances and paths by scanning every crossing edge each round.
///
/// Runs in O(V·E). Each round picks the edge leaving the explored set that
/// minimizes `distance(head) + weight`. Paths include both endpoints.
pub fn shortest_paths_naive<V: Vertex, C: Cost>(
    graph: &Graph<V, C>,
    source: V,
) -> (FxHashMap<V, C>, FxHashMap<V, Vec<V>>) {
    let mut distances = FxHashMap::default();
    let mut paths = FxHashMap::default();
    let mut explored = FxHashSet::default();

    distances.insert(source.clone(), C::default());
    paths.insert(source.clone(), vec![source.clone()]);
    explored.insert(source);

    loop {
        let mut best: Option<(C, &V, &V)> = None;
        for head in &explored {
            let head_dist = distances[head];
            for edge in graph.edges(head) {
                if explored.contains(&edge.target) {
                    continue;
                }
                let Some(candidate) = head_dist.checked_add(&edge.weight) else {
                    continue;
                };
                if best.map_or(true, |(dist, _, _)| candidate < dist) {
                    best = Some((candidate, head, &edge.target));
                }
            }
        }

        let Some((dist, head, tail)) = best else {
            break;
        };
        let (head, tail) = (head.clone(), tail.clone());

        let mut path: Vec<V> = paths[&head].clone();
        path.push(tail.clone());
        paths.insert(tail.clone(), path);
        distances.insert(tail.clone(), dist);
        explored.insert(tail);
    }

    (distances, paths)
}
