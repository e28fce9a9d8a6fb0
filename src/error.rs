//! Error types for the transit-node-routing core.
//!
//! Preprocessing errors are fatal and surfaced to the caller; a query either
//! returns a distance (`+∞` stands for "unreachable", it is not an error) or
//! fails with [`Error::UnknownNode`].

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("k_percent must be in [0, 100], got {0}")]
    InvalidConfig(u8),

    #[error("negative edge length {0} encountered")]
    NegativeLength(f64),

    #[error("graph has zero nodes")]
    EmptyGraph,

    #[error("no edge between the given nodes")]
    NoSuchEdge,

    #[error("node not present in the graph")]
    NoSuchNode,

    #[error("unknown node id in query")]
    UnknownNode,
}

pub type Result<T> = std::result::Result<T, Error>;
