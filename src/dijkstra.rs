//! Shared Dijkstra primitives used by contraction, the distance table, and
//! the query resolver's local fallback.
//!
//! Mirrors the teacher's `BinaryHeap<Reverse<(dist, node)>>` idiom (see
//! `nbg_ch/validate.rs::dijkstra_nbg` and `nbg_ch/query.rs`), adapted from
//! `u32` deciseconds to `f64` lengths via `OrderedFloat` so the heap entries
//! remain totally ordered.

use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::fmt::Debug;
use std::hash::Hash;

use ordered_float::OrderedFloat;

use crate::graph::Graph;

/// Single-source shortest distances from `source` to every dense node id,
/// `f64::INFINITY` where unreachable.
pub(crate) fn single_source<K>(graph: &Graph<K>, source: u32) -> Vec<f64>
where
    K: Eq + Hash + Clone + Ord + Debug,
{
    let n = graph.n_dense();
    let mut dist = vec![f64::INFINITY; n];
    let mut heap: BinaryHeap<Reverse<(OrderedFloat<f64>, u32)>> = BinaryHeap::new();

    dist[source as usize] = 0.0;
    heap.push(Reverse((OrderedFloat(0.0), source)));

    while let Some(Reverse((OrderedFloat(d), u))) = heap.pop() {
        if d > dist[u as usize] {
            continue;
        }
        for &(v, len) in graph.neighbor_ids(u) {
            if v == u || !graph.is_alive(v) {
                continue;
            }
            let nd = d + len;
            if nd < dist[v as usize] {
                dist[v as usize] = nd;
                heap.push(Reverse((OrderedFloat(nd), v)));
            }
        }
    }

    dist
}

/// Shortest distance between two dense ids, plus one witnessing shortest
/// path (as a vector of dense ids, source first) so callers can test whether
/// a particular node lies on it. Ties are broken by whichever predecessor the
/// heap relaxes last, matching `nx.bidirectional_dijkstra`'s "any witnessing
/// path" contract from the kept Python source.
pub(crate) fn shortest_path_through<K>(
    graph: &Graph<K>,
    source: u32,
    target: u32,
) -> Option<(f64, Vec<u32>)>
where
    K: Eq + Hash + Clone + Ord + Debug,
{
    let n = graph.n_dense();
    let mut dist = vec![f64::INFINITY; n];
    let mut prev = vec![u32::MAX; n];
    let mut heap: BinaryHeap<Reverse<(OrderedFloat<f64>, u32)>> = BinaryHeap::new();

    dist[source as usize] = 0.0;
    heap.push(Reverse((OrderedFloat(0.0), source)));

    while let Some(Reverse((OrderedFloat(d), u))) = heap.pop() {
        if d > dist[u as usize] {
            continue;
        }
        if u == target {
            break;
        }
        for &(v, len) in graph.neighbor_ids(u) {
            if v == u || !graph.is_alive(v) {
                continue;
            }
            let nd = d + len;
            if nd < dist[v as usize] {
                dist[v as usize] = nd;
                prev[v as usize] = u;
                heap.push(Reverse((OrderedFloat(nd), v)));
            }
        }
    }

    if dist[target as usize].is_infinite() {
        return None;
    }

    let mut path = vec![target];
    let mut cur = target;
    while cur != source {
        let p = prev[cur as usize];
        if p == u32::MAX {
            break;
        }
        path.push(p);
        cur = p;
    }
    path.reverse();
    Some((dist[target as usize], path))
}

/// Bidirectional Dijkstra between two dense ids on `graph`, used as the
/// query resolver's local-fallback case (spec §4.F, "Otherwise" row).
pub(crate) fn bidirectional<K>(graph: &Graph<K>, source: u32, target: u32) -> f64
where
    K: Eq + Hash + Clone + Ord + Debug,
{
    if source == target {
        return 0.0;
    }

    let n = graph.n_dense();
    let mut fwd_dist = vec![f64::INFINITY; n];
    let mut bwd_dist = vec![f64::INFINITY; n];
    let mut fwd_seen = vec![false; n];
    let mut bwd_seen = vec![false; n];

    let mut fwd_heap: BinaryHeap<Reverse<(OrderedFloat<f64>, u32)>> = BinaryHeap::new();
    let mut bwd_heap: BinaryHeap<Reverse<(OrderedFloat<f64>, u32)>> = BinaryHeap::new();

    fwd_dist[source as usize] = 0.0;
    bwd_dist[target as usize] = 0.0;
    fwd_heap.push(Reverse((OrderedFloat(0.0), source)));
    bwd_heap.push(Reverse((OrderedFloat(0.0), target)));

    let mut best = f64::INFINITY;

    while !fwd_heap.is_empty() || !bwd_heap.is_empty() {
        if let Some(Reverse((OrderedFloat(d), u))) = fwd_heap.pop() {
            if d <= fwd_dist[u as usize] && !fwd_seen[u as usize] {
                fwd_seen[u as usize] = true;

                if bwd_seen[u as usize] {
                    best = best.min(d + bwd_dist[u as usize]);
                }

                for &(v, len) in graph.neighbor_ids(u) {
                    if v == u || !graph.is_alive(v) {
                        continue;
                    }
                    let nd = d + len;
                    if nd < fwd_dist[v as usize] {
                        fwd_dist[v as usize] = nd;
                        fwd_heap.push(Reverse((OrderedFloat(nd), v)));
                    }
                }
            }
        }

        if let Some(Reverse((OrderedFloat(d), u))) = bwd_heap.pop() {
            if d <= bwd_dist[u as usize] && !bwd_seen[u as usize] {
                bwd_seen[u as usize] = true;

                if fwd_seen[u as usize] {
                    best = best.min(d + fwd_dist[u as usize]);
                }

                for &(v, len) in graph.neighbor_ids(u) {
                    if v == u || !graph.is_alive(v) {
                        continue;
                    }
                    let nd = d + len;
                    if nd < bwd_dist[v as usize] {
                        bwd_dist[v as usize] = nd;
                        bwd_heap.push(Reverse((OrderedFloat(nd), v)));
                    }
                }
            }
        }

        let fwd_min = fwd_heap.peek().map(|Reverse((OrderedFloat(d), _))| *d);
        let bwd_min = bwd_heap.peek().map(|Reverse((OrderedFloat(d), _))| *d);
        let frontier = match (fwd_min, bwd_min) {
            (Some(a), Some(b)) => a.min(b),
            (Some(a), None) => a,
            (None, Some(b)) => b,
            (None, None) => f64::INFINITY,
        };
        if frontier >= best {
            break;
        }
    }

    best
}
