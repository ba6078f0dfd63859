//! The binary encoding of a compacted graph.
//!
//! All integers are little-endian. The legacy layout is
//!
//! ```text
//! count: u64
//! repeated: vid: u32, num_neighbors: i32, num_neighbors * (nid: u32, weight: u8)
//! ```
//!
//! where `count` is the size of the vertex snapshot taken before vertices that
//! end up with no neighbors are dropped. Version 2 prepends [`MAGIC_V2`] and
//! stores the number of entries actually written instead.

pub use deserialize::{decode, deserialize, write_text, DecodedGraph};
pub use serialize::{estimate_size, serialize};

use derive_more::Display;
use std::mem::size_of;

mod deserialize;
mod serialize;

/// Leading word of a version 2 file.
pub const MAGIC_V2: u64 = u64::from_le_bytes(*b"GCPACKv2");

const HEADER_WORD_SIZE: usize = size_of::<u64>();
const ENTRY_HEADER_SIZE: usize = size_of::<u32>() + size_of::<i32>();
const NEIGHBOR_SIZE: usize = size_of::<u32>() + size_of::<u8>();

#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    #[display(fmt = "legacy")]
    Legacy,
    #[display(fmt = "v2")]
    V2,
}
