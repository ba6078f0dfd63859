use super::{Format, MAGIC_V2, NEIGHBOR_SIZE};
use crate::{
    config::Options,
    error::{Err, Result},
    graph::GraphInfo,
    memory_manager::MemoryManager,
    tools::ByteReader,
    types::{Edge, VId, Weight},
};
use log::{info, warn};
use std::collections::BTreeSet;
use std::io::Write;

/// A decoded binary file.
#[derive(Debug, PartialEq, Eq)]
pub struct DecodedGraph {
    format: Format,
    header_count: u64,
    entries: Vec<(VId, Vec<(VId, Weight)>)>,
}

impl DecodedGraph {
    pub fn format(&self) -> Format {
        self.format
    }

    pub fn header_count(&self) -> u64 {
        self.header_count
    }

    pub fn entries(&self) -> &[(VId, Vec<(VId, Weight)>)] {
        &self.entries
    }

    /// Edges in file order.
    pub fn edges(&self) -> impl Iterator<Item = Edge> + '_ {
        self.entries.iter().flat_map(|(vid, neighbors)| {
            neighbors
                .iter()
                .map(move |&(nid, weight)| (*vid, nid, weight))
        })
    }

    pub fn info(&self) -> GraphInfo {
        let vertices: BTreeSet<VId> = self
            .edges()
            .flat_map(|(src, dst, _)| vec![src, dst])
            .collect();
        GraphInfo::new(
            self.format.to_string(),
            self.header_count,
            self.entries.len(),
            self.edges().count(),
            vertices.len(),
        )
    }
}

fn truncated(what: String, reader: &ByteReader) -> Err {
    Err::TruncatedStream(format!("{} at byte {}", what, reader.pos()))
}

/// Decodes either format, detected by the leading word.
///
/// A body shorter than the header count is `TruncatedStream`, except for a
/// legacy file ending on an entry boundary when the options tolerate the
/// legacy header.
pub fn decode(bytes: &[u8], options: &Options) -> Result<DecodedGraph> {
    let tolerate = options.get_tolerate_legacy_header();
    let mut reader = ByteReader::new(bytes);
    let format = if reader.peek_u64() == Some(MAGIC_V2) {
        reader.read_u64();
        Format::V2
    } else {
        Format::Legacy
    };
    let header_count = reader
        .read_u64()
        .ok_or_else(|| truncated(String::from("header"), &reader))?;
    info!("reading {} file with header count {}...", format, header_count);
    let mut entries = Vec::new();
    for i in 0..header_count {
        if tolerate && format == Format::Legacy && reader.is_empty() {
            warn!(
                "stream ends after {} of {} entries, assuming a legacy header",
                i, header_count
            );
            break;
        }
        let vid = reader
            .read_u32()
            .ok_or_else(|| truncated(format!("vertex id of entry {}", i), &reader))?;
        let num_neighbors = reader
            .read_i32()
            .ok_or_else(|| truncated(format!("neighbor count of vertex {}", vid), &reader))?;
        if num_neighbors < 0 {
            return Err(Err::MalformedInput(format!(
                "vertex {} has negative neighbor count {}",
                vid, num_neighbors
            )));
        }
        let num_neighbors = num_neighbors as usize;
        let mut neighbors =
            Vec::with_capacity(num_neighbors.min(reader.remaining() / NEIGHBOR_SIZE));
        for j in 0..num_neighbors {
            let nid = reader.read_u32().ok_or_else(|| {
                truncated(format!("id of neighbor {} of vertex {}", j, vid), &reader)
            })?;
            let weight = reader.read_u8().ok_or_else(|| {
                truncated(format!("weight of neighbor {} of vertex {}", j, vid), &reader)
            })?;
            neighbors.push((nid, weight));
        }
        entries.push((vid, neighbors));
    }
    if !reader.is_empty() {
        warn!("ignoring {} trailing bytes", reader.remaining());
    }
    Ok(DecodedGraph {
        format,
        header_count,
        entries,
    })
}

/// Writes `src dst weight` lines with no newline after the last one.
pub fn write_text<W: Write>(graph: &DecodedGraph, mut output: W) -> Result<usize> {
    let mut num_lines = 0;
    for (src, dst, weight) in graph.edges() {
        if num_lines > 0 {
            output.write_all(b"\n")?;
        }
        write!(output, "{} {} {}", src, dst, weight)?;
        num_lines += 1;
    }
    Ok(num_lines)
}

/// Decodes the contents of `mm` and writes them as text to `output`.
pub fn deserialize<W: Write>(mm: &MemoryManager, output: W, options: &Options) -> Result<usize> {
    let graph = decode(mm.as_bytes(), options)?;
    let num_lines = write_text(&graph, output)?;
    info!("wrote {} edges", num_lines);
    Ok(num_lines)
}
