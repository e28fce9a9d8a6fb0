//! Undirected, possibly multi-edge weighted graph.
//!
//! Node keys are interned into a dense `u32` id space on first use so the
//! rest of the core (ordering, Dijkstra, access-node search) only ever
//! touches integers — see the "Dynamic-typed node keys" design note. The
//! adjacency representation is a plain `Vec<Vec<(u32, f64)>>` indexed by
//! dense id, the same CSR-flavored shape the teacher uses for its NBG
//! adjacency, rather than an owning-pointer graph.

use std::fmt::Debug;
use std::hash::Hash;

use rustc_hash::FxHashMap;

use crate::error::{Error, Result};

/// An undirected, weighted, possibly multi-edge graph over node keys `K`.
#[derive(Debug, Clone)]
pub struct Graph<K> {
    index_of: FxHashMap<K, u32>,
    keys: Vec<K>,
    adj: Vec<Vec<(u32, f64)>>,
    alive: Vec<bool>,
}

impl<K> Default for Graph<K>
where
    K: Eq + Hash + Clone + Ord + Debug,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K> Graph<K>
where
    K: Eq + Hash + Clone + Ord + Debug,
{
    pub fn new() -> Self {
        Self {
            index_of: FxHashMap::default(),
            keys: Vec::new(),
            adj: Vec::new(),
            alive: Vec::new(),
        }
    }

    /// Number of live nodes.
    pub fn node_count(&self) -> usize {
        self.alive.iter().filter(|&&a| a).count()
    }

    /// Number of directed adjacency entries (each undirected edge counts twice).
    pub fn edge_count(&self) -> usize {
        self.adj.iter().map(|n| n.len()).sum::<usize>() / 2
    }

    pub fn contains_node(&self, k: &K) -> bool {
        self.index_of
            .get(k)
            .map(|&id| self.alive[id as usize])
            .unwrap_or(false)
    }

    /// Iterate the keys of every live node.
    pub fn nodes(&self) -> impl Iterator<Item = &K> {
        self.keys
            .iter()
            .enumerate()
            .filter(move |&(id, _)| self.alive[id])
            .map(|(_, k)| k)
    }

    /// Intern `k`, assigning it a fresh dense id if it hasn't been seen yet.
    /// A key removed by [`Self::remove_node`] is gone from `index_of`, so
    /// re-adding it always allocates a new slot rather than reusing the old
    /// (already-stripped) one.
    pub(crate) fn ensure_node(&mut self, k: K) -> u32 {
        if let Some(&id) = self.index_of.get(&k) {
            return id;
        }
        let id = self.keys.len() as u32;
        self.keys.push(k.clone());
        self.adj.push(Vec::new());
        self.alive.push(true);
        self.index_of.insert(k, id);
        id
    }

    pub(crate) fn id_of(&self, k: &K) -> Result<u32> {
        self.index_of
            .get(k)
            .copied()
            .filter(|&id| self.alive[id as usize])
            .ok_or(Error::NoSuchNode)
    }

    pub(crate) fn key_of(&self, id: u32) -> &K {
        &self.keys[id as usize]
    }

    pub(crate) fn n_dense(&self) -> usize {
        self.keys.len()
    }

    pub(crate) fn is_alive(&self, id: u32) -> bool {
        self.alive[id as usize]
    }

    pub(crate) fn neighbor_ids(&self, id: u32) -> &[(u32, f64)] {
        &self.adj[id as usize]
    }

    /// Neighbors of `k`, excluding self-loops, without duplicates.
    pub fn neighbors(&self, k: &K) -> Result<Vec<K>> {
        let id = self.id_of(k)?;
        let mut seen = rustc_hash::FxHashSet::default();
        let mut out = Vec::new();
        for &(nbr, _) in &self.adj[id as usize] {
            if nbr == id {
                continue;
            }
            if seen.insert(nbr) {
                out.push(self.keys[nbr as usize].clone());
            }
        }
        Ok(out)
    }

    /// Length of the edge between `a` and `b`: the minimum over parallel edges.
    pub fn edge_length(&self, a: &K, b: &K) -> Result<f64> {
        let ia = self.id_of(a)?;
        let ib = self.id_of(b)?;
        self.adj[ia as usize]
            .iter()
            .filter(|&&(n, _)| n == ib)
            .map(|&(_, len)| len)
            .fold(None, |acc, len| Some(acc.map_or(len, |m: f64| m.min(len))))
            .ok_or(Error::NoSuchEdge)
    }

    /// Add an undirected edge `(a, b, length)`, interning `a` and `b` if new.
    pub fn add_edge(&mut self, a: K, b: K, length: f64) -> Result<()> {
        if length < 0.0 {
            return Err(Error::NegativeLength(length));
        }
        let ia = self.ensure_node(a);
        let ib = self.ensure_node(b);
        self.adj[ia as usize].push((ib, length));
        if ia != ib {
            self.adj[ib as usize].push((ia, length));
        }
        Ok(())
    }

    /// Remove a node and every edge incident to it.
    pub fn remove_node(&mut self, k: &K) -> Result<()> {
        let id = self.id_of(k)?;
        let neighbors: Vec<u32> = self.adj[id as usize]
            .iter()
            .map(|&(n, _)| n)
            .filter(|&n| n != id)
            .collect();
        for nbr in neighbors {
            self.adj[nbr as usize].retain(|&(n, _)| n != id);
        }
        self.adj[id as usize].clear();
        self.alive[id as usize] = false;
        self.index_of.remove(k);
        Ok(())
    }

    /// A deep, independently-mutable copy of this graph.
    pub fn deep_copy(&self) -> Self {
        self.clone()
    }

    /// Union the edges of `other` into `self`, interning any keys not yet seen.
    pub fn compose_with(&mut self, other: &Graph<K>) {
        for a in other.nodes() {
            for b in other.neighbors(a).expect("node came from other.nodes()") {
                if a <= &b {
                    let len = other
                        .edge_length(a, &b)
                        .expect("edge just listed as neighbor");
                    self.add_edge(a.clone(), b, len)
                        .expect("length validated by `other`");
                }
            }
        }
    }
}
