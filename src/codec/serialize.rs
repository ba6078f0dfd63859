use super::{ENTRY_HEADER_SIZE, HEADER_WORD_SIZE, MAGIC_V2, NEIGHBOR_SIZE};
use crate::{
    config::HeaderMode,
    error::{Err, Result},
    graph::{CompactedGraph, WeightMap},
    memory_manager::MemoryManager,
    types::{canonical, VId},
};
use log::{debug, info, warn};
use std::convert::TryFrom;

/// Exact size in bytes of the encoding of `graph`.
pub fn estimate_size(graph: &CompactedGraph, header_mode: HeaderMode) -> usize {
    let header_size = match header_mode {
        HeaderMode::Legacy => HEADER_WORD_SIZE,
        HeaderMode::Corrected => 2 * HEADER_WORD_SIZE,
    };
    let num_entries = graph
        .entries()
        .iter()
        .filter(|(_, neighbors)| !neighbors.is_empty())
        .count();
    header_size + num_entries * ENTRY_HEADER_SIZE + graph.num_pairs() * NEIGHBOR_SIZE
}

/// Writes `graph` into `mm`, returning the number of bytes written.
pub fn serialize(
    mm: &mut MemoryManager,
    graph: &CompactedGraph,
    weights: &WeightMap,
    header_mode: HeaderMode,
) -> Result<usize> {
    info!("writing {} header...", header_mode);
    mm.resize(0)?;
    mm.resize(estimate_size(graph, header_mode))?;
    let mut pos = write_header(mm, graph, header_mode)?;
    for (vid, neighbors) in graph.entries() {
        if neighbors.is_empty() {
            continue;
        }
        pos = write_entry(mm, pos, *vid, neighbors, weights)?;
    }
    mm.resize(pos)?;
    mm.flush()?;
    info!("wrote {} bytes", pos);
    Ok(pos)
}

fn write_header(
    mm: &mut MemoryManager,
    graph: &CompactedGraph,
    header_mode: HeaderMode,
) -> Result<usize> {
    match header_mode {
        HeaderMode::Legacy => {
            if graph.snapshot_len() != graph.entries().len() {
                warn!(
                    "legacy header counts {} vertices but only {} entries follow",
                    graph.snapshot_len(),
                    graph.entries().len()
                );
            }
            mm.copy_from_slice(0, &(graph.snapshot_len() as u64).to_le_bytes())?;
            Ok(HEADER_WORD_SIZE)
        }
        HeaderMode::Corrected => {
            mm.copy_from_slice(0, &MAGIC_V2.to_le_bytes())?;
            mm.copy_from_slice(
                HEADER_WORD_SIZE,
                &(graph.entries().len() as u64).to_le_bytes(),
            )?;
            Ok(2 * HEADER_WORD_SIZE)
        }
    }
}

fn write_entry(
    mm: &mut MemoryManager,
    mut pos: usize,
    vid: VId,
    neighbors: &[VId],
    weights: &WeightMap,
) -> Result<usize> {
    let num_neighbors = i32::try_from(neighbors.len()).map_err(|_| {
        Err::MalformedInput(format!(
            "vertex {} has {} neighbors, more than an entry can hold",
            vid,
            neighbors.len()
        ))
    })?;
    debug!("entry {}: {} neighbors at {}", vid, num_neighbors, pos);
    mm.copy_from_slice(pos, &vid.to_le_bytes())?;
    mm.copy_from_slice(pos + 4, &num_neighbors.to_le_bytes())?;
    pos += ENTRY_HEADER_SIZE;
    for &nid in neighbors {
        let weight = weights.get(&canonical(vid, nid)).ok_or_else(|| {
            Err::MalformedInput(format!("no weight for edge ({}, {})", vid, nid))
        })?;
        mm.copy_from_slice(pos, &nid.to_le_bytes())?;
        mm.copy_from_slice(pos + 4, &[*weight])?;
        pos += NEIGHBOR_SIZE;
    }
    Ok(pos)
}
