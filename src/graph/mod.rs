//! The in-memory graph and its degree-ordered compaction.

pub use adjacency::{parse_edge, read_edges, AdjacencyBuilder, AdjacencyMap, WeightMap};
pub use compactor::{compact, degree_order, CompactedGraph, Entry};
pub use info::GraphInfo;

mod adjacency;
mod compactor;
mod info;
