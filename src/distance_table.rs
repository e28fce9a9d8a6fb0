//! Transit distance table (spec §4.D): all-pairs shortest distances among the
//! selected transit nodes, computed on the augmented graph `A = G ∪ shortcuts`.

use std::fmt::Debug;
use std::hash::Hash;

use rustc_hash::{FxHashMap, FxHashSet};
use tracing::debug;

use crate::dijkstra::single_source;
use crate::graph::Graph;

/// A symmetric map `{t1, t2} -> distance` over transit dense ids. Absent
/// pairs are unreachable (`+∞`); a node's distance to itself is always `0`.
#[derive(Debug, Clone, Default)]
pub struct DistanceTable {
    table: FxHashMap<(u32, u32), f64>,
}

fn key(a: u32, b: u32) -> (u32, u32) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

impl DistanceTable {
    pub(crate) fn get(&self, a: u32, b: u32) -> f64 {
        if a == b {
            return 0.0;
        }
        self.table.get(&key(a, b)).copied().unwrap_or(f64::INFINITY)
    }

    pub(crate) fn len(&self) -> usize {
        self.table.len()
    }

    pub(crate) fn insert(&mut self, a: u32, b: u32, d: f64) {
        self.table.insert(key(a, b), d);
    }
}

/// Run a single-source Dijkstra from every transit node on `augmented` and
/// keep only the entries between pairs of transit nodes.
pub fn compute<K>(augmented: &Graph<K>, transit_ids: &FxHashSet<u32>) -> DistanceTable
where
    K: Eq + Hash + Clone + Ord + Debug,
{
    let mut table = FxHashMap::default();

    for &t1 in transit_ids {
        let dist = single_source(augmented, t1);
        for &t2 in transit_ids {
            if t2 <= t1 {
                continue;
            }
            let d = dist[t2 as usize];
            if d.is_finite() {
                table.insert(key(t1, t2), d);
            }
        }
    }

    debug!(transit_nodes = transit_ids.len(), entries = table.len(), "distance table built");
    DistanceTable { table }
}
