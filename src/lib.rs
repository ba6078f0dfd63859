//! Degree-ordered compaction of weighted undirected graphs.

pub mod codec;
pub mod config;
pub mod error;
pub mod graph;
pub mod memory_manager;
pub mod task;
pub mod types;

pub(crate) mod tools;
