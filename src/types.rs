//! Various types related to graph compaction.

/// The vertex id type.
pub type VId = u32;

/// The edge weight type.
pub type Weight = u8;

/// An undirected weighted edge as read from the text form.
pub type Edge = (VId, VId, Weight);

/// Returns the canonical `(min, max)` form of an undirected edge.
pub fn canonical(v1: VId, v2: VId) -> (VId, VId) {
    if v1 > v2 {
        (v2, v1)
    } else {
        (v1, v2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical() {
        assert_eq!(canonical(3, 1), (1, 3));
        assert_eq!(canonical(1, 3), (1, 3));
        assert_eq!(canonical(5, 5), (5, 5));
    }
}
