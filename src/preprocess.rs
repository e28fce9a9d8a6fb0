//! Preprocess façade (spec §4.G): wires together ordering, transit
//! selection, the distance table, and access-node search into a single
//! [`Artifact`].

use std::fmt::Debug;
use std::hash::Hash;

use rustc_hash::FxHashSet;
use tracing::info;

use crate::access;
use crate::distance_table;
use crate::error::{Error, Result};
use crate::graph::Graph;
use crate::ordering::{self, NodeOrdering};
use crate::query::Artifact;
use crate::transit;

/// A pluggable contraction priority function, `(graph, node) -> key`; nodes
/// are contracted in ascending key order. Defaults to [`ordering::edge_difference`].
pub type Heuristic<K> = fn(&Graph<K>, u32) -> f64;

/// Run the full preprocessing pipeline over `graph` with the default
/// edge-difference heuristic. `k_percent` selects `floor(|V| * k_percent / 100)`
/// transit nodes; `online` toggles whether the contraction priority is
/// recomputed after each contraction.
pub fn preprocess<K>(graph: Graph<K>, k_percent: u8, online: bool) -> Result<Artifact<K>>
where
    K: Eq + Hash + Clone + Ord + Debug,
{
    preprocess_with(graph, k_percent, online, ordering::edge_difference)
}

/// Like [`preprocess`] but with an explicit contraction heuristic.
pub fn preprocess_with<K>(
    graph: Graph<K>,
    k_percent: u8,
    online: bool,
    heuristic: Heuristic<K>,
) -> Result<Artifact<K>>
where
    K: Eq + Hash + Clone + Ord + Debug,
{
    if k_percent > 100 {
        return Err(Error::InvalidConfig(k_percent));
    }
    if graph.node_count() == 0 {
        return Err(Error::EmptyGraph);
    }

    info!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        k_percent,
        online,
        "starting preprocessing"
    );

    let (order, shortcuts) = ordering::contract(&graph, heuristic, online);
    let augmented = augment(&graph, &shortcuts);

    let k = (graph.node_count() as u64 * k_percent as u64 / 100) as usize;
    let transit_keys = transit::select_transit(&augmented, &order, k);
    let transit_ids: FxHashSet<u32> = transit_keys
        .iter()
        .map(|key| augmented.id_of(key).expect("selected from augmented's own nodes"))
        .collect();

    let table = distance_table::compute(&augmented, &transit_ids);
    let access_nodes = access::compute_all(&augmented, &order, &transit_ids, &table);

    info!(
        transit_nodes = transit_ids.len(),
        shortcuts = shortcuts.len(),
        distance_table_entries = table.len(),
        "preprocessing complete"
    );

    Ok(build_artifact(augmented, order, shortcuts, transit_ids, table, access_nodes))
}

fn augment<K>(graph: &Graph<K>, shortcuts: &[(K, K, f64)]) -> Graph<K>
where
    K: Eq + Hash + Clone + Ord + Debug,
{
    let mut augmented = graph.deep_copy();
    for (a, b, len) in shortcuts {
        augmented
            .add_edge(a.clone(), b.clone(), *len)
            .expect("shortcut lengths were derived from existing shortest paths");
    }
    augmented
}

// Kept as a free function (rather than a pub constructor on `Artifact`) so
// its private fields stay out of the public API surface; `query.rs` builds
// the public one the same way via `Artifact::from_parts`.
fn build_artifact<K>(
    graph: Graph<K>,
    ordering: NodeOrdering,
    shortcuts: Vec<(K, K, f64)>,
    transit_ids: FxHashSet<u32>,
    distance_table: distance_table::DistanceTable,
    access_nodes: access::AccessNodes,
) -> Artifact<K>
where
    K: Eq + Hash + Clone + Ord + Debug,
{
    crate::query::new_artifact(graph, ordering, shortcuts, transit_ids, distance_table, access_nodes)
}
