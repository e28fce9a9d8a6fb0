//! Access nodes and locality search space (spec §4.E).
//!
//! For every non-transit node, a modified upward Dijkstra collects the
//! transit nodes it first touches (its access nodes) plus the ordinary
//! nodes it visited along the way (its locality / search space), then a
//! reverse double-loop discards dominated access-node candidates.

use std::fmt::Debug;
use std::hash::Hash;

use ordered_float::OrderedFloat;
use priority_queue::PriorityQueue;
use rustc_hash::{FxHashMap, FxHashSet};

use crate::distance_table::DistanceTable;
use crate::graph::Graph;
use crate::ordering::NodeOrdering;

/// Per-node outputs of the access-node search, keyed by dense id.
#[derive(Debug, Clone, Default)]
pub struct AccessNodes {
    candidates: FxHashMap<u32, Vec<(u32, f64)>>,
    locality: FxHashMap<u32, FxHashSet<u32>>,
}

impl AccessNodes {
    pub(crate) fn from_raw(
        candidates: FxHashMap<u32, Vec<(u32, f64)>>,
        locality: FxHashMap<u32, FxHashSet<u32>>,
    ) -> Self {
        Self { candidates, locality }
    }

    pub(crate) fn candidates_of(&self, v: u32) -> &[(u32, f64)] {
        self.candidates.get(&v).map(Vec::as_slice).unwrap_or(&[])
    }

    pub(crate) fn locality_of(&self, v: u32) -> Option<&FxHashSet<u32>> {
        self.locality.get(&v)
    }
}

/// Upward search from `v`: stop descending past any transit node, collect
/// the transit nodes reached as raw candidates plus the non-transit nodes
/// visited as the locality set.
fn search_from<K>(
    augmented: &Graph<K>,
    ordering: &NodeOrdering,
    transit_ids: &FxHashSet<u32>,
    v: u32,
) -> (Vec<(u32, f64)>, FxHashSet<u32>)
where
    K: Eq + Hash + Clone + Ord + Debug,
{
    let n = augmented.n_dense();
    let mut dist = vec![f64::INFINITY; n];
    let mut searched = vec![false; n];
    let mut pq: PriorityQueue<u32, std::cmp::Reverse<OrderedFloat<f64>>> = PriorityQueue::new();

    dist[v as usize] = 0.0;
    pq.push(v, std::cmp::Reverse(OrderedFloat(0.0)));

    let mut candidates = Vec::new();
    let mut locality = FxHashSet::default();

    while let Some((u, std::cmp::Reverse(OrderedFloat(du)))) = pq.pop() {
        if searched[u as usize] {
            continue;
        }
        searched[u as usize] = true;

        if transit_ids.contains(&u) {
            candidates.push((u, du));
            continue;
        }

        locality.insert(u);

        for &(w, len) in augmented.neighbor_ids(u) {
            if w == u || !augmented.is_alive(w) || searched[w as usize] {
                continue;
            }
            if ordering.get(w) <= ordering.get(u) {
                continue;
            }
            let nd = du + len;
            if nd < dist[w as usize] {
                dist[w as usize] = nd;
                pq.push(w, std::cmp::Reverse(OrderedFloat(nd)));
            }
        }
    }

    (candidates, locality)
}

/// Discard dominated candidates: `(t2, d2)` is removed if some surviving
/// `(t1, d1)` with `d1 + table(t1, t2) <= d2` exists. The reverse
/// double-loop order guarantees every removal index stays valid as the
/// list shrinks (only indices to the right of the outer cursor are ever
/// removed).
fn prune_dominated(mut candidates: Vec<(u32, f64)>, table: &DistanceTable) -> Vec<(u32, f64)> {
    let mut i = candidates.len();
    while i > 0 {
        i -= 1;
        let mut j = candidates.len();
        while j > i + 1 {
            j -= 1;
            let (t1, d1) = candidates[i];
            let (t2, d2) = candidates[j];
            if d1 + table.get(t1, t2) <= d2 {
                candidates.remove(j);
            }
        }
    }
    candidates
}

/// Compute access nodes and locality sets for every non-transit node of
/// `augmented`.
pub fn compute_all<K>(
    augmented: &Graph<K>,
    ordering: &NodeOrdering,
    transit_ids: &FxHashSet<u32>,
    table: &DistanceTable,
) -> AccessNodes
where
    K: Eq + Hash + Clone + Ord + Debug,
{
    let mut candidates = FxHashMap::default();
    let mut locality = FxHashMap::default();

    for key in augmented.nodes() {
        let v = augmented.id_of(key).expect("key came from augmented.nodes()");
        if transit_ids.contains(&v) {
            continue;
        }
        let (raw_candidates, search_space) = search_from(augmented, ordering, transit_ids, v);
        let pruned = prune_dominated(raw_candidates, table);
        candidates.insert(v, pruned);
        locality.insert(v, search_space);
    }

    AccessNodes { candidates, locality }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{distance_table, ordering, transit};

    #[test]
    fn access_candidates_are_transit_nodes_reachable_upward() {
        let mut g: Graph<u32> = Graph::new();
        for i in 0..8u32 {
            g.add_edge(i, i + 1, 1.0).unwrap();
        }
        let (order, shortcuts) = ordering::contract(&g, ordering::edge_difference, true);
        let mut augmented = g.deep_copy();
        for (a, b, len) in &shortcuts {
            augmented.add_edge(*a, *b, *len).unwrap();
        }
        let transit_keys = transit::select_transit(&augmented, &order, 2);
        let transit_ids: FxHashSet<u32> = transit_keys
            .iter()
            .map(|k| augmented.id_of(k).unwrap())
            .collect();
        let table = distance_table::compute(&augmented, &transit_ids);
        let access = compute_all(&augmented, &order, &transit_ids, &table);

        for key in augmented.nodes() {
            let v = augmented.id_of(key).unwrap();
            if transit_ids.contains(&v) {
                continue;
            }
            for &(t, _) in access.candidates_of(v) {
                assert!(transit_ids.contains(&t));
            }
        }
    }

    #[test]
    fn pruning_removes_dominated_candidates() {
        let mut table = DistanceTable::default();
        // t1 -> v costs 1, t1 -> t2 costs 1 (so t2 reachable via t1 at cost 2),
        // t2 -> v directly costs 5: t2 should be pruned.
        table.insert(0, 1, 1.0);
        let pruned = prune_dominated(vec![(0, 1.0), (1, 5.0)], &table);
        assert_eq!(pruned, vec![(0, 1.0)]);
    }

    #[test]
    fn non_dominated_candidates_all_survive() {
        let table = DistanceTable::default();
        let pruned = prune_dominated(vec![(0, 1.0), (1, 2.0), (2, 3.0)], &table);
        assert_eq!(pruned.len(), 3);
    }
}
