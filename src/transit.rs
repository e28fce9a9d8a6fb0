//! Transit-node selection (spec §4.C): the top `k` nodes by importance rank.

use std::fmt::Debug;
use std::hash::Hash;

use crate::graph::Graph;
use crate::ordering::NodeOrdering;

/// Select the `k` most important nodes of `graph` under `ordering`.
///
/// Ties (which cannot occur given [`NodeOrdering`]'s bijection, but would be
/// possible for a hand-rolled heuristic) are broken by ascending key so the
/// selection is reproducible.
pub fn select_transit<K>(graph: &Graph<K>, ordering: &NodeOrdering, k: usize) -> Vec<K>
where
    K: Eq + Hash + Clone + Ord + Debug,
{
    let mut entries: Vec<(u32, K)> = graph
        .nodes()
        .map(|key| {
            let id = graph.id_of(key).expect("key came from graph.nodes()");
            (ordering.get(id), key.clone())
        })
        .collect();

    entries.sort_by(|(rank_a, key_a), (rank_b, key_b)| rank_b.cmp(rank_a).then(key_a.cmp(key_b)));
    entries.truncate(k);
    entries.into_iter().map(|(_, key)| key).collect()
}
