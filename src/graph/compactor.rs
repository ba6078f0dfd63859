use super::adjacency::AdjacencyMap;
use crate::{config::TieBreak, types::VId};
use itertools::Itertools;
use log::{debug, info};
use std::cmp::Reverse;

/// One vertex with the neighbors it claimed during compaction.
pub type Entry = (VId, Vec<VId>);

/// Vertices in descending initial degree, each undirected edge listed once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompactedGraph {
    snapshot_len: usize,
    entries: Vec<Entry>,
}

impl CompactedGraph {
    /// Number of vertices in the ordering snapshot, including the dropped ones.
    pub fn snapshot_len(&self) -> usize {
        self.snapshot_len
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Number of `(vertex, neighbor)` pairs.
    pub fn num_pairs(&self) -> usize {
        self.entries.iter().map(|(_, neighbors)| neighbors.len()).sum()
    }
}

/// Orders the vertices by descending degree, ties broken by `tie_break`.
pub fn degree_order(adjacency: &AdjacencyMap, tie_break: TieBreak) -> Vec<(VId, usize)> {
    match tie_break {
        TieBreak::AscendingId => adjacency
            .degrees()
            .sorted_by_key(|&(vid, deg)| (Reverse(deg), vid))
            .collect(),
        TieBreak::DescendingId => adjacency
            .degrees()
            .sorted_by_key(|&(vid, deg)| (Reverse(deg), Reverse(vid)))
            .collect(),
    }
}

/// Attributes every undirected edge to whichever endpoint comes first in
/// degree order, consuming the adjacency.
pub fn compact(mut adjacency: AdjacencyMap, tie_break: TieBreak) -> CompactedGraph {
    let order = degree_order(&adjacency, tie_break);
    info!(
        "compacting {} vertices (tie-break {})...",
        order.len(),
        tie_break
    );
    let mut entries = Vec::with_capacity(order.len());
    for &(vid, deg) in &order {
        let claimed = adjacency.remaining(vid);
        for &nid in &claimed {
            adjacency.remove_neighbor(nid, vid);
        }
        debug!("vertex {} (degree {}) claims {}", vid, deg, claimed.len());
        if !claimed.is_empty() {
            entries.push((vid, claimed));
        }
    }
    let graph = CompactedGraph {
        snapshot_len: order.len(),
        entries,
    };
    info!(
        "compacted into {} entries holding {} edges",
        graph.entries.len(),
        graph.num_pairs()
    );
    graph
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::adjacency::AdjacencyBuilder;
    use crate::types::{canonical, Edge};
    use std::collections::BTreeSet;

    fn adjacency(edges: Vec<Edge>) -> AdjacencyMap {
        let mut builder = AdjacencyBuilder::new();
        builder.extend(edges);
        builder.build().0
    }

    #[test]
    fn test_triangle() {
        let graph = compact(
            adjacency(vec![(1, 2, 5), (2, 3, 7), (1, 3, 9)]),
            TieBreak::AscendingId,
        );
        assert_eq!(graph.snapshot_len(), 3);
        assert_eq!(graph.entries(), &[(1, vec![2, 3]), (2, vec![3])]);
        assert_eq!(graph.num_pairs(), 3);
    }

    #[test]
    fn test_triangle_descending_tie_break() {
        let graph = compact(
            adjacency(vec![(1, 2, 5), (2, 3, 7), (1, 3, 9)]),
            TieBreak::DescendingId,
        );
        assert_eq!(graph.entries(), &[(3, vec![1, 2]), (2, vec![1])]);
    }

    #[test]
    fn test_star_goes_to_hub() {
        let star = adjacency(vec![(9, 1, 1), (9, 2, 2), (9, 3, 3), (1, 2, 4)]);
        assert_eq!(
            degree_order(&star, TieBreak::AscendingId),
            vec![(9, 3), (1, 2), (2, 2), (3, 1)]
        );
        let graph = compact(star, TieBreak::AscendingId);
        assert_eq!(graph.entries(), &[(9, vec![1, 2, 3]), (1, vec![2])]);
        assert_eq!(graph.snapshot_len(), 4);
    }

    #[test]
    fn test_self_loop() {
        let graph = compact(
            adjacency(vec![(5, 5, 10), (5, 6, 1)]),
            TieBreak::AscendingId,
        );
        assert_eq!(graph.entries(), &[(5, vec![5, 6])]);
        assert_eq!(graph.num_pairs(), 2);
    }

    #[test]
    fn test_edge_conservation() {
        let edges: Vec<Edge> = (0..40u32)
            .flat_map(|v| vec![(v, (v * 7) % 13, 1), (v, v % 5, 2), ((v * 3) % 11, v, 3)])
            .collect();
        let distinct: BTreeSet<_> = edges.iter().map(|&(s, d, _)| canonical(s, d)).collect();
        let adjacency = adjacency(edges);
        assert_eq!(adjacency.num_edges(), distinct.len());
        let graph = compact(adjacency, TieBreak::AscendingId);
        assert_eq!(graph.num_pairs(), distinct.len());
        let emitted: BTreeSet<_> = graph
            .entries()
            .iter()
            .flat_map(|(v, ns)| ns.iter().map(move |&n| canonical(*v, n)))
            .collect();
        assert_eq!(emitted, distinct);
        let vertices: Vec<_> = graph.entries().iter().map(|(v, _)| v).collect();
        assert_eq!(vertices.iter().collect::<BTreeSet<_>>().len(), vertices.len());
    }

    #[test]
    fn test_deterministic() {
        let edges = vec![(4, 1, 1), (2, 3, 2), (1, 2, 3), (3, 4, 4), (1, 3, 5)];
        let mut reversed = edges.clone();
        reversed.reverse();
        assert_eq!(
            compact(adjacency(edges), TieBreak::AscendingId),
            compact(adjacency(reversed), TieBreak::AscendingId)
        );
    }

    #[test]
    fn test_empty() {
        let graph = compact(AdjacencyMap::new(), TieBreak::AscendingId);
        assert_eq!(graph.snapshot_len(), 0);
        assert!(graph.entries().is_empty());
    }
}
