//! End-to-end scenarios and boundary behaviors for the public query API.
//!
//! Exercises `preprocess` + `resolve` purely through `tnr_core`'s public
//! surface, the way a downstream crate would use it.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use tnr_core::error::Error;
use tnr_core::graph::Graph;
use tnr_core::{preprocess, resolve};

#[test]
fn path_graph_sums_hop_lengths() {
    let mut g: Graph<u32> = Graph::new();
    for i in 0..6u32 {
        g.add_edge(i, i + 1, 1.5).unwrap();
    }
    let artifact = preprocess(g, 25, true).unwrap();
    assert_eq!(resolve(&artifact, &0, &6).unwrap(), 9.0);
}

#[test]
fn triangle_prefers_the_two_hop_path_over_the_long_direct_edge() {
    let mut g: Graph<&str> = Graph::new();
    g.add_edge("a", "b", 3.0).unwrap();
    g.add_edge("b", "c", 4.0).unwrap();
    g.add_edge("c", "a", 10.0).unwrap();

    let artifact = preprocess(g, 50, true).unwrap();
    assert_eq!(resolve(&artifact, &"a", &"c").unwrap(), 7.0);
}

#[test]
fn star_graph_routes_leaf_to_leaf_through_the_hub() {
    let mut g: Graph<&str> = Graph::new();
    for leaf in ["l1", "l2", "l3", "l4"] {
        g.add_edge("hub", leaf, 2.0).unwrap();
    }
    let artifact = preprocess(g, 20, true).unwrap();
    assert_eq!(resolve(&artifact, &"l1", &"l3").unwrap(), 4.0);
    assert_eq!(resolve(&artifact, &"l1", &"hub").unwrap(), 2.0);
}

#[test]
fn disconnected_components_are_unreachable_not_an_error() {
    let mut g: Graph<u32> = Graph::new();
    g.add_edge(0, 1, 1.0).unwrap();
    g.add_edge(1, 2, 1.0).unwrap();
    g.add_edge(10, 11, 5.0).unwrap();

    let artifact = preprocess(g, 50, true).unwrap();
    let distance = resolve(&artifact, &0, &10).unwrap();
    assert!(distance.is_infinite());
}

#[test]
fn parallel_edges_use_the_shorter_one() {
    let mut g: Graph<&str> = Graph::new();
    g.add_edge("a", "b", 9.0).unwrap();
    g.add_edge("a", "b", 2.0).unwrap();
    g.add_edge("b", "c", 1.0).unwrap();

    let artifact = preprocess(g, 50, true).unwrap();
    assert_eq!(resolve(&artifact, &"a", &"c").unwrap(), 3.0);
}

#[test]
fn unknown_node_in_query_is_an_error_not_infinity() {
    let mut g: Graph<u32> = Graph::new();
    g.add_edge(0, 1, 1.0).unwrap();
    let artifact = preprocess(g, 50, true).unwrap();
    assert!(matches!(resolve(&artifact, &0, &999), Err(Error::UnknownNode)));
}

#[test]
fn source_equals_target_is_always_zero_even_with_no_transit_nodes() {
    let mut g: Graph<u32> = Graph::new();
    for i in 0..10u32 {
        g.add_edge(i, i + 1, 1.0).unwrap();
    }
    let artifact = preprocess(g, 0, true).unwrap();
    assert_eq!(resolve(&artifact, &5, &5).unwrap(), 0.0);
}

#[test]
fn single_node_graph_preprocesses_without_panicking() {
    let mut g: Graph<u32> = Graph::new();
    g.add_edge(0, 0, 0.0).unwrap();
    let artifact = preprocess(g, 100, true).unwrap();
    assert_eq!(resolve(&artifact, &0, &0).unwrap(), 0.0);
}

#[test]
fn k_percent_over_100_is_rejected() {
    let mut g: Graph<u32> = Graph::new();
    g.add_edge(0, 1, 1.0).unwrap();
    assert!(matches!(preprocess(g, 150, true), Err(Error::InvalidConfig(150))));
}

#[test]
fn empty_graph_is_rejected() {
    let g: Graph<u32> = Graph::new();
    assert!(matches!(preprocess(g, 10, true), Err(Error::EmptyGraph)));
}

#[test]
fn queries_are_symmetric_on_an_undirected_graph() {
    let mut g: Graph<u32> = Graph::new();
    for i in 0..12u32 {
        g.add_edge(i, (i + 1) % 12, 1.0).unwrap();
        g.add_edge(i, (i + 5) % 12, 2.0).unwrap();
    }
    let artifact = preprocess(g, 30, true).unwrap();
    for s in 0..12u32 {
        for t in 0..12u32 {
            assert_eq!(resolve(&artifact, &s, &t).unwrap(), resolve(&artifact, &t, &s).unwrap());
        }
    }
}

/// Plain reference Dijkstra over a dense adjacency matrix, independent of
/// anything in `tnr_core`, used to cross-check TNR answers on a graph large
/// enough that the transit shortcut (rather than the local fallback) is
/// actually exercised for most pairs.
fn reference_shortest_path(adj: &[Vec<(usize, f64)>], source: usize, target: usize) -> f64 {
    let mut dist = vec![f64::INFINITY; adj.len()];
    let mut heap = BinaryHeap::new();
    dist[source] = 0.0;
    heap.push(Reverse((ordered_float::OrderedFloat(0.0), source)));

    while let Some(Reverse((ordered_float::OrderedFloat(d), u))) = heap.pop() {
        if d > dist[u] {
            continue;
        }
        if u == target {
            return d;
        }
        for &(v, len) in &adj[u] {
            let nd = d + len;
            if nd < dist[v] {
                dist[v] = nd;
                heap.push(Reverse((ordered_float::OrderedFloat(nd), v)));
            }
        }
    }
    dist[target]
}

#[test]
fn agrees_with_plain_dijkstra_on_a_synthetic_graph() {
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    let n = 200usize;
    let mut rng = StdRng::seed_from_u64(42);

    let mut adj: Vec<Vec<(usize, f64)>> = vec![Vec::new(); n];
    let mut g: Graph<u32> = Graph::new();

    // A ring keeps the graph connected, plus random chords for texture.
    for i in 0..n {
        let j = (i + 1) % n;
        let len = 1.0 + rng.random::<f64>() * 4.0;
        adj[i].push((j, len));
        adj[j].push((i, len));
        g.add_edge(i as u32, j as u32, len).unwrap();
    }
    for _ in 0..(n * 3) {
        let a = rng.random_range(0..n);
        let b = rng.random_range(0..n);
        if a == b {
            continue;
        }
        let len = 1.0 + rng.random::<f64>() * 10.0;
        adj[a].push((b, len));
        adj[b].push((a, len));
        g.add_edge(a as u32, b as u32, len).unwrap();
    }

    let artifact = preprocess(g, 10, true).unwrap();

    for _ in 0..50 {
        let s = rng.random_range(0..n);
        let t = rng.random_range(0..n);
        let expected = reference_shortest_path(&adj, s, t);
        let got = resolve(&artifact, &(s as u32), &(t as u32)).unwrap();
        assert!(
            (expected - got).abs() < 1e-6,
            "mismatch for ({s}, {t}): expected {expected}, got {got}"
        );
    }
}
