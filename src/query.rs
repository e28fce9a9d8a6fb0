//! Query resolver (spec §4.F) and the [`Artifact`] a preprocess run produces.

use std::fmt::Debug;
use std::hash::Hash;

use rustc_hash::{FxHashMap, FxHashSet};

use crate::access::AccessNodes;
use crate::dijkstra;
use crate::distance_table::DistanceTable;
use crate::error::{Error, Result};
use crate::graph::Graph;
use crate::ordering::NodeOrdering;

/// Everything a preprocess run produces and a query needs: the augmented
/// graph `A = G ∪ shortcuts`, the node ordering, the transit set, the
/// transit distance table, and each non-transit node's access nodes and
/// locality set.
#[derive(Debug, Clone)]
pub struct Artifact<K> {
    pub(crate) graph: Graph<K>,
    pub(crate) ordering: NodeOrdering,
    pub(crate) shortcuts: Vec<(K, K, f64)>,
    pub(crate) transit_ids: FxHashSet<u32>,
    pub(crate) distance_table: DistanceTable,
    pub(crate) access_nodes: AccessNodes,
}

/// Assemble an [`Artifact`] from its already-computed parts. Only
/// [`crate::preprocess`] calls this directly; external callers go through
/// [`Artifact::from_parts`] instead.
pub(crate) fn new_artifact<K>(
    graph: Graph<K>,
    ordering: NodeOrdering,
    shortcuts: Vec<(K, K, f64)>,
    transit_ids: FxHashSet<u32>,
    distance_table: DistanceTable,
    access_nodes: AccessNodes,
) -> Artifact<K> {
    Artifact { graph, ordering, shortcuts, transit_ids, distance_table, access_nodes }
}

impl<K> Artifact<K>
where
    K: Eq + Hash + Clone + Ord + Debug,
{
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn shortcut_count(&self) -> usize {
        self.shortcuts.len()
    }

    pub fn transit_count(&self) -> usize {
        self.transit_ids.len()
    }

    pub fn is_transit(&self, k: &K) -> Result<bool> {
        let id = self.graph.id_of(k)?;
        Ok(self.transit_ids.contains(&id))
    }

    /// All edges of the augmented graph `A`, deduplicated per undirected
    /// pair — used to persist and reconstruct an artifact without rerunning
    /// preprocessing.
    pub fn augmented_edges(&self) -> Vec<(K, K, f64)> {
        let mut out = Vec::new();
        for a in self.graph.nodes() {
            for b in self.graph.neighbors(a).expect("node came from graph.nodes()") {
                if a <= &b {
                    let len = self.graph.edge_length(a, &b).expect("edge just listed");
                    out.push((a.clone(), b, len));
                }
            }
        }
        out
    }

    pub fn ordering_pairs(&self) -> Vec<(K, u32)> {
        self.graph
            .nodes()
            .map(|k| {
                let id = self.graph.id_of(k).expect("key came from graph.nodes()");
                (k.clone(), self.ordering.get(id))
            })
            .collect()
    }

    pub fn transit_nodes(&self) -> Vec<K> {
        self.transit_ids
            .iter()
            .map(|&id| self.graph.key_of(id).clone())
            .collect()
    }

    pub fn distance_table_triples(&self) -> Vec<(K, K, f64)> {
        let transit: Vec<u32> = self.transit_ids.iter().copied().collect();
        let mut out = Vec::new();
        for i in 0..transit.len() {
            for j in (i + 1)..transit.len() {
                let (t1, t2) = (transit[i], transit[j]);
                let d = self.distance_table.get(t1, t2);
                if d.is_finite() {
                    out.push((self.graph.key_of(t1).clone(), self.graph.key_of(t2).clone(), d));
                }
            }
        }
        out
    }

    pub fn access_node_entries(&self) -> Vec<(K, Vec<(K, f64)>)> {
        let mut out = Vec::new();
        for key in self.graph.nodes() {
            let v = self.graph.id_of(key).expect("key came from graph.nodes()");
            if self.transit_ids.contains(&v) {
                continue;
            }
            let entries = self
                .access_nodes
                .candidates_of(v)
                .iter()
                .map(|&(t, d)| (self.graph.key_of(t).clone(), d))
                .collect();
            out.push((key.clone(), entries));
        }
        out
    }

    pub fn locality_entries(&self) -> Vec<(K, Vec<K>)> {
        let mut out = Vec::new();
        for key in self.graph.nodes() {
            let v = self.graph.id_of(key).expect("key came from graph.nodes()");
            if let Some(set) = self.access_nodes.locality_of(v) {
                out.push((key.clone(), set.iter().map(|&id| self.graph.key_of(id).clone()).collect()));
            }
        }
        out
    }

    /// Reassemble an [`Artifact`] from the flat views above, e.g. after
    /// reading them back from a persisted CLI artifact file.
    #[allow(clippy::too_many_arguments)]
    pub fn from_parts(
        edges: Vec<(K, K, f64)>,
        order_pairs: Vec<(K, u32)>,
        transit_nodes: Vec<K>,
        distance_triples: Vec<(K, K, f64)>,
        access_entries: Vec<(K, Vec<(K, f64)>)>,
        locality_entries: Vec<(K, Vec<K>)>,
        shortcuts: Vec<(K, K, f64)>,
    ) -> Result<Self> {
        let mut graph = Graph::new();
        for (a, b, len) in edges {
            graph.add_edge(a, b, len)?;
        }

        let n = graph.n_dense();
        let mut order = vec![u32::MAX; n];
        for (k, rank) in order_pairs {
            let id = graph.id_of(&k)?;
            order[id as usize] = rank;
        }
        let ordering = NodeOrdering::from_raw(order);

        let transit_ids: FxHashSet<u32> = transit_nodes
            .iter()
            .map(|k| graph.id_of(k))
            .collect::<Result<_>>()?;

        let mut distance_table = DistanceTable::default();
        for (a, b, d) in distance_triples {
            let ia = graph.id_of(&a)?;
            let ib = graph.id_of(&b)?;
            distance_table.insert(ia, ib, d);
        }

        let mut candidates = FxHashMap::default();
        for (k, entries) in access_entries {
            let v = graph.id_of(&k)?;
            let mut list = Vec::with_capacity(entries.len());
            for (t, d) in entries {
                list.push((graph.id_of(&t)?, d));
            }
            candidates.insert(v, list);
        }

        let mut locality = FxHashMap::default();
        for (k, members) in locality_entries {
            let v = graph.id_of(&k)?;
            let mut set = FxHashSet::default();
            for m in members {
                set.insert(graph.id_of(&m)?);
            }
            locality.insert(v, set);
        }

        Ok(Artifact {
            graph,
            ordering,
            shortcuts,
            transit_ids,
            distance_table,
            access_nodes: AccessNodes::from_raw(candidates, locality),
        })
    }
}

/// Resolve the shortest distance from `source` to `target` (spec §4.F).
///
/// Returns `Ok(f64::INFINITY)` when the two nodes are simply unreachable
/// from one another; [`Error::UnknownNode`] is reserved for node ids that
/// were never part of the preprocessed graph.
pub fn resolve<K>(artifact: &Artifact<K>, source: &K, target: &K) -> Result<f64>
where
    K: Eq + Hash + Clone + Ord + Debug,
{
    let s = artifact.graph.id_of(source).map_err(|_| Error::UnknownNode)?;
    let t = artifact.graph.id_of(target).map_err(|_| Error::UnknownNode)?;

    if s == t {
        return Ok(0.0);
    }

    let s_transit = artifact.transit_ids.contains(&s);
    let t_transit = artifact.transit_ids.contains(&t);

    let distance = match (s_transit, t_transit) {
        (true, true) => artifact.distance_table.get(s, t),
        (true, false) => via_access_nodes(artifact, t, s, true),
        (false, true) => via_access_nodes(artifact, s, t, false),
        (false, false) => {
            let locality_s = artifact.access_nodes.locality_of(s);
            let locality_t = artifact.access_nodes.locality_of(t);
            let disjoint = match (locality_s, locality_t) {
                (Some(ls), Some(lt)) => ls.is_disjoint(lt),
                _ => true,
            };
            if disjoint {
                let via_transit = global_via_access_nodes(artifact, s, t);
                if via_transit.is_finite() {
                    via_transit
                } else {
                    // The locality filter is a pruning heuristic, not a
                    // correctness source: with no access-node pair to
                    // combine (e.g. no transit nodes selected at all) fall
                    // back to a direct search instead of reporting +inf.
                    dijkstra::bidirectional(&artifact.graph, s, t)
                }
            } else {
                dijkstra::bidirectional(&artifact.graph, s, t)
            }
        }
    };

    Ok(distance)
}

/// Combine `other`'s access nodes with the transit distance table to reach
/// `transit_node`. `other_is_source` only affects nothing here because
/// distance is symmetric; it documents which side was the transit node at
/// the call site.
fn via_access_nodes<K>(
    artifact: &Artifact<K>,
    other: u32,
    transit_node: u32,
    _other_is_source: bool,
) -> f64
where
    K: Eq + Hash + Clone + Ord + Debug,
{
    let mut best = f64::INFINITY;
    for &(access, d_access) in artifact.access_nodes.candidates_of(other) {
        let d = d_access + artifact.distance_table.get(access, transit_node);
        if d < best {
            best = d;
        }
    }
    best
}

fn global_via_access_nodes<K>(artifact: &Artifact<K>, s: u32, t: u32) -> f64
where
    K: Eq + Hash + Clone + Ord + Debug,
{
    let mut best = f64::INFINITY;
    for &(as_, ds) in artifact.access_nodes.candidates_of(s) {
        for &(at, dt) in artifact.access_nodes.candidates_of(t) {
            let d = ds + dt + artifact.distance_table.get(as_, at);
            if d < best {
                best = d;
            }
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preprocess;

    #[test]
    fn same_node_query_is_zero() {
        let mut g: Graph<u32> = Graph::new();
        g.add_edge(0, 1, 1.0).unwrap();
        let artifact = preprocess::preprocess(g, 50, true).unwrap();
        assert_eq!(resolve(&artifact, &0, &0).unwrap(), 0.0);
    }

    #[test]
    fn unknown_node_is_an_error() {
        let mut g: Graph<u32> = Graph::new();
        g.add_edge(0, 1, 1.0).unwrap();
        let artifact = preprocess::preprocess(g, 50, true).unwrap();
        assert!(matches!(resolve(&artifact, &0, &99), Err(Error::UnknownNode)));
    }

    #[test]
    fn disconnected_components_resolve_to_infinity() {
        let mut g: Graph<u32> = Graph::new();
        g.add_edge(0, 1, 1.0).unwrap();
        g.add_edge(2, 3, 1.0).unwrap();
        let artifact = preprocess::preprocess(g, 50, true).unwrap();
        assert!(resolve(&artifact, &0, &2).unwrap().is_infinite());
    }

    #[test]
    fn round_trip_through_parts_matches_direct_query() {
        let mut g: Graph<u32> = Graph::new();
        for i in 0..10u32 {
            g.add_edge(i, i + 1, 1.0).unwrap();
            g.add_edge(i, (i + 3) % 11, 2.5).unwrap();
        }
        let artifact = preprocess::preprocess(g, 30, true).unwrap();

        let rebuilt = Artifact::from_parts(
            artifact.augmented_edges(),
            artifact.ordering_pairs(),
            artifact.transit_nodes(),
            artifact.distance_table_triples(),
            artifact.access_node_entries(),
            artifact.locality_entries(),
            artifact.shortcuts.clone(),
        )
        .unwrap();

        for s in 0..11u32 {
            for t in 0..11u32 {
                assert_eq!(
                    resolve(&artifact, &s, &t).unwrap(),
                    resolve(&rebuilt, &s, &t).unwrap()
                );
            }
        }
    }
}
