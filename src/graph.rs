//! Directed weighted graphs for shortest-path search
//!
//! A [`Graph`] maps each vertex to its outgoing [`Edge`]s. Vertices that only
//! ever appear as edge targets are still vertices of the graph; they simply
//! have no outgoing edges.
//!
//! [`parse_adjacency_list`] reads the common textual format with one vertex
//! per line, followed by its outgoing edges as `target,weight` pairs:
//!
//! ```text
//! 1 2,1 3,4
//! 2 3,1
//! 3 4,1
//! ```

use std::fmt;
use std::hash::Hash;

use rustc_hash::{FxHashMap, FxHashSet};
use thiserror::Error;

/// Trait for types that can identify a vertex.
pub trait Vertex: Eq + Hash + Clone + fmt::Debug {}

impl<T> Vertex for T where T: Eq + Hash + Clone + fmt::Debug {}

/// A directed edge, stored under its source vertex
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge<V, C> {
    pub target: V,
    pub weight: C,
}

/// Adjacency-list representation of a directed graph
#[derive(Debug, Clone)]
pub struct Graph<V: Vertex, C> {
    adjacency: FxHashMap<V, Vec<Edge<V, C>>>,
}

impl<V: Vertex, C> Graph<V, C> {
    /// Creates a graph without vertices
    pub fn new() -> Self {
        Graph {
            adjacency: FxHashMap::default(),
        }
    }

    /// Builds a graph from `(source, target, weight)` triples
    pub fn from_edges<I>(edges: I) -> Self
    where
        I: IntoIterator<Item = (V, V, C)>,
    {
        let mut graph = Graph::new();
        for (source, target, weight) in edges {
            graph.add_edge(source, target, weight);
        }
        graph
    }

    /// Adds a vertex with no outgoing edges, if it isn't known yet
    pub fn add_vertex(&mut self, vertex: V) {
        self.adjacency.entry(vertex).or_default();
    }

    /// Adds a directed edge. Parallel edges are kept.
    pub fn add_edge(&mut self, source: V, target: V, weight: C) {
        self.adjacency
            .entry(source)
            .or_default()
            .push(Edge { target, weight });
    }

    /// Outgoing edges of `vertex`; empty for unknown vertices
    pub fn edges(&self, vertex: &V) -> &[Edge<V, C>] {
        self.adjacency
            .get(vertex)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// All vertices: every edge source plus every edge target
    pub fn vertices(&self) -> FxHashSet<V> {
        let mut vertices: FxHashSet<V> = self.adjacency.keys().cloned().collect();
        for edges in self.adjacency.values() {
            vertices.extend(edges.iter().map(|edge| edge.target.clone()));
        }
        vertices
    }

    /// Iterates over `(vertex, outgoing edges)` for vertices with an adjacency row
    pub fn adjacency(&self) -> impl Iterator<Item = (&V, &[Edge<V, C>])> {
        self.adjacency
            .iter()
            .map(|(vertex, edges)| (vertex, edges.as_slice()))
    }

    /// Total number of edges
    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(Vec::len).sum()
    }
}

impl<V: Vertex, C> Default for Graph<V, C> {
    fn default() -> Self {
        Self::new()
    }
}

/// Error produced while reading an adjacency list
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphParseError {
    #[error("line {line}: invalid vertex `{token}`")]
    InvalidVertex { line: usize, token: String },
    #[error("line {line}: edge `{token}` is not of the form `target,weight`")]
    MalformedEdge { line: usize, token: String },
    #[error("line {line}: invalid weight `{token}`")]
    InvalidWeight { line: usize, token: String },
}

/// Parses a whitespace-separated adjacency list.
///
/// Each non-blank line is `head target,weight target,weight ...`. Line
/// numbers in errors are 1-based.
///
/// # Example
///
/// ```rust
/// use indexed_heaps::graph::parse_adjacency_list;
///
/// let graph = parse_adjacency_list("1 2,5 3,7\n2 3,1\n").unwrap();
/// assert_eq!(graph.edges(&1).len(), 2);
/// assert_eq!(graph.vertices().len(), 3);
/// ```
pub fn parse_adjacency_list(input: &str) -> Result<Graph<u32, u64>, GraphParseError> {
    let mut graph = Graph::new();

    for (line_idx, line) in input.lines().enumerate() {
        let line_no = line_idx + 1;
        let mut tokens = line.split_whitespace();
        let Some(head) = tokens.next() else {
            continue;
        };
        let head = parse_vertex(head, line_no)?;
        graph.add_vertex(head);

        for token in tokens {
            let (target, weight) = token.split_once(',').ok_or_else(|| {
                GraphParseError::MalformedEdge {
                    line: line_no,
                    token: token.to_string(),
                }
            })?;
            let target = parse_vertex(target, line_no)?;
            let weight = weight
                .parse::<u64>()
                .map_err(|_| GraphParseError::InvalidWeight {
                    line: line_no,
                    token: weight.to_string(),
                })?;
            graph.add_edge(head, target, weight);
        }
    }

    Ok(graph)
}

fn parse_vertex(token: &str, line: usize) -> Result<u32, GraphParseError> {
    token
        .parse::<u32>()
        .map_err(|_| GraphParseError::InvalidVertex {
            line,
            token: token.to_string(),
        })
}
