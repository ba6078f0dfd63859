use crate::{
    config::ParseMode,
    error::{Err, Result},
    tools::parse_int_prefix,
    types::{canonical, Edge, VId, Weight},
};
use log::{debug, info};
use std::collections::{BTreeMap, BTreeSet};
use std::io::BufRead;

/// Canonical `(min, max)` pair to weight.
pub type WeightMap = BTreeMap<(VId, VId), Weight>;

/// Undirected adjacency with deduplicated neighbor sets.
///
/// A self-loop puts the vertex once into its own set, so it adds one to the
/// degree. After construction the map only ever shrinks.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct AdjacencyMap {
    neighbors: BTreeMap<VId, BTreeSet<VId>>,
}

impl AdjacencyMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_edge(&mut self, src: VId, dst: VId) {
        self.neighbors.entry(src).or_default().insert(dst);
        if src != dst {
            self.neighbors.entry(dst).or_default().insert(src);
        }
    }

    pub fn len(&self) -> usize {
        self.neighbors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.neighbors.is_empty()
    }

    pub fn degree(&self, vid: VId) -> usize {
        self.neighbors.get(&vid).map_or(0, BTreeSet::len)
    }

    pub fn neighbors(&self, vid: VId) -> impl Iterator<Item = VId> + '_ {
        self.neighbors.get(&vid).into_iter().flatten().copied()
    }

    /// Vertices with their current degree, in ascending id order.
    pub fn degrees(&self) -> impl Iterator<Item = (VId, usize)> + '_ {
        self.neighbors.iter().map(|(&vid, set)| (vid, set.len()))
    }

    /// Number of distinct undirected edges, self-loops counted once.
    pub fn num_edges(&self) -> usize {
        let (loops, others) = self
            .neighbors
            .iter()
            .fold((0, 0), |(loops, others), (vid, set)| {
                if set.contains(vid) {
                    (loops + 1, others + set.len() - 1)
                } else {
                    (loops, others + set.len())
                }
            });
        loops + others / 2
    }

    /// Removes `nid` from the remaining neighbors of `vid` only.
    pub(crate) fn remove_neighbor(&mut self, vid: VId, nid: VId) {
        if let Some(set) = self.neighbors.get_mut(&vid) {
            set.remove(&nid);
        }
    }

    pub(crate) fn remaining(&self, vid: VId) -> Vec<VId> {
        self.neighbors(vid).collect()
    }
}

/// Accumulates edges into an [`AdjacencyMap`] and its [`WeightMap`].
#[derive(Debug, Default)]
pub struct AdjacencyBuilder {
    adjacency: AdjacencyMap,
    weights: WeightMap,
    num_lines: usize,
}

impl AdjacencyBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one input edge; a repeated pair overwrites the earlier weight.
    pub fn add_edge(&mut self, (src, dst, weight): Edge) {
        self.adjacency.insert_edge(src, dst);
        self.weights.insert(canonical(src, dst), weight);
        self.num_lines += 1;
    }

    pub fn build(self) -> (AdjacencyMap, WeightMap) {
        (self.adjacency, self.weights)
    }
}

impl Extend<Edge> for AdjacencyBuilder {
    fn extend<T: IntoIterator<Item = Edge>>(&mut self, iter: T) {
        for edge in iter {
            self.add_edge(edge);
        }
    }
}

/// Splits a line the way the legacy tool does: a field whose leading tab is
/// missing is read from the whole line instead.
fn split_permissive(line: &str) -> (&str, &str, &str) {
    match line.split_once('\t') {
        Some((src, rest)) => match rest.split_once('\t') {
            Some((dst, weight)) => (src, dst, weight),
            None => (src, rest, line),
        },
        None => (line, line, line),
    }
}

/// Parses one `src\tdst\tweight` line; `line_no` is 1-based.
pub fn parse_edge(line: &str, line_no: usize, mode: ParseMode) -> Result<Edge> {
    match mode {
        ParseMode::Permissive => {
            let (src, dst, weight) = split_permissive(line);
            Ok((
                parse_int_prefix(src) as VId,
                parse_int_prefix(dst) as VId,
                parse_int_prefix(weight) as Weight,
            ))
        }
        ParseMode::Strict => {
            let fields: Vec<&str> = line.split('\t').map(str::trim).collect();
            if fields.len() != 3 {
                return Err(Err::malformed(
                    line_no,
                    format!("expected 3 tab-separated fields, found {}", fields.len()),
                ));
            }
            let vid = |field: &str, name: &str| {
                field
                    .parse::<VId>()
                    .map_err(|e| Err::malformed(line_no, format!("{} {:?}: {}", name, field, e)))
            };
            let weight = fields[2].parse::<Weight>().map_err(|e| {
                Err::malformed(line_no, format!("weight {:?}: {}", fields[2], e))
            })?;
            Ok((vid(fields[0], "source")?, vid(fields[1], "destination")?, weight))
        }
    }
}

/// Reads a whole text edge list.
pub fn read_edges<R: BufRead>(input: R, mode: ParseMode) -> Result<(AdjacencyMap, WeightMap)> {
    info!("reading edges ({} parsing)...", mode);
    let mut builder = AdjacencyBuilder::new();
    for (i, line) in input.split(b'\n').enumerate() {
        let line = line?;
        let edge = parse_edge(&String::from_utf8_lossy(&line), i + 1, mode)?;
        debug!("line {}: {:?}", i + 1, edge);
        builder.add_edge(edge);
    }
    let num_lines = builder.num_lines;
    let (adjacency, weights) = builder.build();
    info!(
        "read {} lines: {} vertices, {} distinct edges",
        num_lines,
        adjacency.len(),
        weights.len()
    );
    Ok((adjacency, weights))
}
