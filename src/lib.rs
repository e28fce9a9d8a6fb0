//! Transit Node Routing over Contraction Hierarchies.
//!
//! Preprocesses a weighted undirected graph into an [`Artifact`] — a node
//! ordering, a set of shortcuts, a small transit-node set, their pairwise
//! distance table, and each other node's access nodes — that answers
//! point-to-point shortest-distance queries without a full shortest-path
//! search on the common case.
//!
//! Pipeline:
//! - Ordering: importance ranking + shortcut extraction via iterative
//!   contraction (`ordering`)
//! - Transit selection: top nodes by importance (`transit`)
//! - Distance table: all-pairs distances among transit nodes (`distance_table`)
//! - Access nodes: per-node upward search + stalling pruning (`access`)
//! - Query: dispatches on transit-set membership and locality overlap (`query`)
//! - Preprocess: wires the above into one artifact (`preprocess`)

pub mod access;
pub mod cli;
pub mod dijkstra;
pub mod distance_table;
pub mod error;
pub mod graph;
pub mod loader;
pub mod ordering;
pub mod preprocess;
pub mod query;
pub mod transit;

pub use error::{Error, Result};
pub use graph::Graph;
pub use ordering::NodeOrdering;
pub use preprocess::{preprocess, preprocess_with};
pub use query::{resolve, Artifact};
