//! Comprehensive tests for shortest-path search
//!
//! Tests cover:
//! - Known small graphs with hand-computed distances
//! - Edge cases (unreachable vertices, self loops, zero weights)
//! - Path reconstruction and distance bounds
//! - Property-based comparison against the brute-force reference

mod common;

use indexed_heaps::graph::{parse_adjacency_list, Graph};
use indexed_heaps::pathfinding::{shortest_paths, shortest_paths_naive, ShortestPathBuilder};
use proptest::prelude::*;
use rustc_hash::FxHashMap;
use tracing_subscriber::filter::LevelFilter;

// ============================================================================
// Known Graphs
// ============================================================================

fn diamond() -> Graph<u32, u32> {
    Graph::from_edges([(1, 2, 1), (1, 3, 4), (2, 3, 1), (3, 4, 1)])
}

#[test]
fn test_diamond_distances() {
    common::try_init_test_tracing(LevelFilter::TRACE);

    let distances = shortest_paths(&diamond(), 1).unwrap();

    let expected: FxHashMap<u32, u32> = [(1, 0), (2, 1), (3, 2), (4, 3)].into_iter().collect();
    assert_eq!(distances, expected);
}

#[test]
fn test_diamond_from_other_source() {
    let distances = shortest_paths(&diamond(), 3).unwrap();

    assert_eq!(distances.len(), 2);
    assert_eq!(distances[&3], 0);
    assert_eq!(distances[&4], 1);
}

#[test]
fn test_decrease_finds_optimal() {
    // The direct edge is expensive; the detour must replace it
    let graph = Graph::from_edges([
        (0, 4, 100u64),
        (0, 1, 1),
        (1, 2, 1),
        (2, 3, 1),
        (3, 4, 1),
    ]);

    let tree = ShortestPathBuilder::new(0)
        .track_paths(true)
        .run(&graph)
        .unwrap();

    assert_eq!(tree.distance(&4), Some(4));
    assert_eq!(tree.path_to(&4), Some(vec![0, 1, 2, 3, 4]));
}

#[test]
fn test_zero_weight_edges() {
    let graph = Graph::from_edges([('s', 'a', 0u32), ('a', 'b', 0), ('s', 'b', 1)]);
    let distances = shortest_paths(&graph, 's').unwrap();

    assert_eq!(distances[&'a'], 0);
    assert_eq!(distances[&'b'], 0);
}

#[test]
fn test_disconnected_graph() {
    let graph = Graph::from_edges([(1, 2, 3u32), (3, 4, 1), (4, 3, 1)]);
    let distances = shortest_paths(&graph, 1).unwrap();

    assert_eq!(distances.len(), 2);
    assert!(!distances.contains_key(&3));
    assert!(!distances.contains_key(&4));

    let (naive, paths) = shortest_paths_naive(&graph, 1);
    assert_eq!(naive, distances);
    assert!(!paths.contains_key(&4));
}

#[test]
fn test_cycle() {
    let graph = Graph::from_edges([('a', 'b', 1u32), ('b', 'c', 1), ('c', 'a', 1), ('c', 'd', 5)]);
    let distances = shortest_paths(&graph, 'b').unwrap();

    assert_eq!(distances[&'b'], 0);
    assert_eq!(distances[&'c'], 1);
    assert_eq!(distances[&'a'], 2);
    assert_eq!(distances[&'d'], 6);
}

#[test]
fn test_parsed_graph() {
    let graph = parse_adjacency_list(
        "1 2,7 3,9 6,14\n\
         2 1,7 3,10 4,15\n\
         3 1,9 2,10 4,11 6,2\n\
         4 2,15 3,11 5,6\n\
         5 4,6 6,9\n\
         6 1,14 3,2 5,9\n",
    )
    .unwrap();

    let distances = shortest_paths(&graph, 1).unwrap();
    let expected: FxHashMap<u32, u64> = [(1, 0), (2, 7), (3, 9), (4, 20), (5, 20), (6, 11)]
        .into_iter()
        .collect();
    assert_eq!(distances, expected);
}

#[test]
fn test_max_distance_matches_unbounded_prefix() {
    let graph = Graph::from_edges((0..20u32).map(|i| (i, i + 1, 3u32)));

    let bounded = ShortestPathBuilder::new(0)
        .max_distance(30)
        .run(&graph)
        .unwrap();
    let unbounded = shortest_paths(&graph, 0).unwrap();

    assert_eq!(bounded.distances().len(), 11);
    for (vertex, distance) in bounded.distances() {
        assert_eq!(unbounded[vertex], *distance);
    }
}

// ============================================================================
// Weights Near the Top of the Range
// ============================================================================

#[test]
fn test_overflowing_path_is_unreachable() {
    let graph = Graph::from_edges([(1u32, 2u32, u32::MAX), (2, 3, 1u32)]);

    let distances = shortest_paths(&graph, 1).unwrap();
    let expected: FxHashMap<u32, u32> = [(1, 0), (2, u32::MAX)].into_iter().collect();
    assert_eq!(distances, expected);

    let (naive, paths) = shortest_paths_naive(&graph, 1);
    assert_eq!(naive, expected);
    assert!(!paths.contains_key(&3));
}

#[test]
fn test_overflowing_path_loses_to_finite_detour() {
    let graph = Graph::from_edges([
        ('a', 'b', u64::MAX),
        ('b', 'c', 1),
        ('a', 'd', 5),
        ('d', 'c', 7),
    ]);

    let tree = ShortestPathBuilder::new('a')
        .track_paths(true)
        .run(&graph)
        .unwrap();

    assert_eq!(tree.distance(&'b'), Some(u64::MAX));
    assert_eq!(tree.distance(&'c'), Some(12));
    assert_eq!(tree.path_to(&'c'), Some(vec!['a', 'd', 'c']));
    assert_eq!(shortest_paths_naive(&graph, 'a').0, tree.into_distances());
}

#[test]
fn test_sum_equal_to_max_is_kept() {
    let graph = Graph::from_edges([(0u8, 1u8, u8::MAX - 1), (1, 2, 1u8), (2, 3, 0)]);

    let distances = shortest_paths(&graph, 0).unwrap();
    assert_eq!(distances[&2], u8::MAX);
    assert_eq!(distances[&3], u8::MAX);
}

// ============================================================================
// Property-Based Tests
// ============================================================================

fn graph_strategy() -> impl Strategy<Value = (usize, Vec<(usize, usize, u32)>)> {
    (1usize..16).prop_flat_map(|n| {
        (
            Just(n),
            prop::collection::vec((0..n, 0..n, 0u32..50), 0..(n * 4)),
        )
    })
}

fn build_graph(n: usize, edges: Vec<(usize, usize, u32)>) -> Graph<usize, u32> {
    let mut graph = Graph::from_edges(edges);
    for vertex in 0..n {
        graph.add_vertex(vertex);
    }
    graph
}

proptest! {
    #[test]
    fn prop_matches_naive((n, edges) in graph_strategy(), source_pick in any::<usize>()) {
        let graph = build_graph(n, edges);
        let source = source_pick % n;

        let distances = shortest_paths(&graph, source).unwrap();
        let (naive, _) = shortest_paths_naive(&graph, source);

        prop_assert_eq!(distances, naive);
    }

    #[test]
    fn prop_paths_are_consistent((n, edges) in graph_strategy(), source_pick in any::<usize>()) {
        let graph = build_graph(n, edges);
        let source = source_pick % n;

        let tree = ShortestPathBuilder::new(source)
            .track_paths(true)
            .run(&graph)
            .unwrap();

        for (vertex, &distance) in tree.distances() {
            let path = tree.path_to(vertex).unwrap();
            prop_assert_eq!(path.first(), Some(&source));
            prop_assert_eq!(path.last(), Some(vertex));

            // Every hop must be a real edge, and the hop weights must sum to the distance
            let mut total = 0u32;
            for hop in path.windows(2) {
                let cheapest = graph
                    .edges(&hop[0])
                    .iter()
                    .filter(|edge| edge.target == hop[1])
                    .map(|edge| edge.weight)
                    .min();
                prop_assert!(cheapest.is_some());
                total += cheapest.unwrap();
            }
            prop_assert_eq!(total, distance);
        }
    }

    #[test]
    fn prop_near_max_weights_match_naive(
        (n, edges) in (1usize..10).prop_flat_map(|n| {
            (
                Just(n),
                prop::collection::vec((0..n, 0..n, (u32::MAX - 64)..=u32::MAX), 0..(n * 4)),
            )
        }),
        source_pick in any::<usize>(),
    ) {
        let graph = build_graph(n, edges);
        let source = source_pick % n;

        let distances = shortest_paths(&graph, source).unwrap();
        let (naive, _) = shortest_paths_naive(&graph, source);

        prop_assert_eq!(distances, naive);
    }

    #[test]
    fn prop_source_is_zero_and_unreached_absent((n, edges) in graph_strategy()) {
        let graph = build_graph(n, edges.clone());
        let distances = shortest_paths(&graph, 0).unwrap();

        prop_assert_eq!(distances.get(&0), Some(&0));

        // Anything without an incoming edge, other than the source, is unreachable
        for vertex in 1..n {
            let has_incoming = edges.iter().any(|&(from, to, _)| to == vertex && from != vertex);
            if !has_incoming {
                prop_assert!(!distances.contains_key(&vertex));
            }
        }
    }
}
