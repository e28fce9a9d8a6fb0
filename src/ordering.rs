//! Node importance ordering and shortcut extraction (spec §4.B).
//!
//! Maintains a mutable priority dictionary over the working copy `W`,
//! keyed by a pluggable heuristic (default: edge difference), and
//! contracts nodes one at a time, recording shortcut edges whose interior
//! consisted solely of already-contracted nodes.

use std::cmp::Reverse;
use std::fmt::Debug;
use std::hash::Hash;

use ordered_float::OrderedFloat;
use priority_queue::PriorityQueue;
use rustc_hash::FxHashSet;
use tracing::debug;

use crate::dijkstra::shortest_path_through;
use crate::graph::Graph;

/// A total map `order: dense_id -> rank`, a bijection onto `0..n`. A node
/// contracted earlier gets a smaller rank; larger rank means more important.
#[derive(Debug, Clone)]
pub struct NodeOrdering {
    order: Vec<u32>,
}

impl NodeOrdering {
    pub(crate) fn from_raw(order: Vec<u32>) -> Self {
        Self { order }
    }

    pub(crate) fn get(&self, id: u32) -> u32 {
        self.order[id as usize]
    }

    pub(crate) fn len(&self) -> usize {
        self.order.len()
    }

    /// True iff `order` is a bijection onto `{0, ..., len-1}` — used by
    /// the property tests covering spec invariant 1.
    pub fn is_bijection(&self) -> bool {
        let mut seen = vec![false; self.order.len()];
        for &rank in &self.order {
            let rank = rank as usize;
            if rank >= seen.len() || seen[rank] {
                return false;
            }
            seen[rank] = true;
        }
        seen.into_iter().all(|s| s)
    }
}

fn unique_alive_neighbors<K>(graph: &Graph<K>, id: u32) -> Vec<u32>
where
    K: Eq + Hash + Clone + Ord + Debug,
{
    let mut seen = FxHashSet::default();
    let mut out = Vec::new();
    for &(nbr, _) in graph.neighbor_ids(id) {
        if nbr == id || !graph.is_alive(nbr) {
            continue;
        }
        if seen.insert(nbr) {
            out.push(nbr);
        }
    }
    out
}

/// Default heuristic: `shortcuts_added - |neighbors|` for contracting `node`
/// in `graph` right now (spec §4.B). Shortest-path ties are broken
/// arbitrarily — any single witnessing path is enough to count the pair.
pub fn edge_difference<K>(graph: &Graph<K>, node: u32) -> f64
where
    K: Eq + Hash + Clone + Ord + Debug,
{
    let neighbors = unique_alive_neighbors(graph, node);
    let mut shortcuts_added = 0i64;

    for i in 0..neighbors.len() {
        for j in (i + 1)..neighbors.len() {
            if let Some((_, path)) = shortest_path_through(graph, neighbors[i], neighbors[j]) {
                if path.contains(&node) {
                    shortcuts_added += 1;
                }
            }
        }
    }

    shortcuts_added as f64 - neighbors.len() as f64
}

/// Contract `graph` node-by-node by ascending heuristic key, returning the
/// resulting [`NodeOrdering`] and the set of shortcut edges emitted.
///
/// `heuristic` is recomputed for a node's surviving neighbors after each
/// contraction when `online` is `true`; otherwise each node keeps its
/// initial priority for the whole run.
pub fn contract<K, H>(
    original: &Graph<K>,
    mut heuristic: H,
    online: bool,
) -> (NodeOrdering, Vec<(K, K, f64)>)
where
    K: Eq + Hash + Clone + Ord + Debug,
    H: FnMut(&Graph<K>, u32) -> f64,
{
    let mut w = original.deep_copy();
    let n = w.n_dense();

    // Tie-break on dense id so contraction order is reproducible given a
    // fixed ingestion order, per the spec's determinism note.
    let mut pq: PriorityQueue<u32, (Reverse<OrderedFloat<f64>>, Reverse<u32>)> =
        PriorityQueue::new();
    for id in 0..n as u32 {
        if w.is_alive(id) {
            let key = heuristic(&w, id);
            pq.push(id, (Reverse(OrderedFloat(key)), Reverse(id)));
        }
    }

    let mut order = vec![u32::MAX; n];
    let mut shortcuts: Vec<(K, K, f64)> = Vec::new();
    let mut counter = 0u32;

    while let Some((node, _)) = pq.pop() {
        order[node as usize] = counter;
        counter += 1;

        let neighbors = unique_alive_neighbors(&w, node);

        for i in 0..neighbors.len() {
            for j in (i + 1)..neighbors.len() {
                let a = neighbors[i];
                let b = neighbors[j];
                if let Some((length, path)) = shortest_path_through(&w, a, b) {
                    if path.contains(&node) {
                        let ka = w.key_of(a).clone();
                        let kb = w.key_of(b).clone();
                        w.add_edge(ka.clone(), kb.clone(), length)
                            .expect("length came from an existing shortest path");
                        shortcuts.push((ka, kb, length));
                    }
                }
            }
        }

        let node_key = w.key_of(node).clone();
        w.remove_node(&node_key).expect("node was just popped from the queue");

        if online {
            for &nbr in &neighbors {
                if w.is_alive(nbr) {
                    let key = heuristic(&w, nbr);
                    pq.push(nbr, (Reverse(OrderedFloat(key)), Reverse(nbr)));
                }
            }
        }

        if counter % 256 == 0 || pq.is_empty() {
            debug!(contracted = counter, total = n, "contraction progress");
        }
    }

    (NodeOrdering { order }, shortcuts)
}
