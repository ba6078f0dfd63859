use derive_more::Display;

#[derive(Debug, Display, PartialEq, Eq)]
#[display(
    fmt = "{} {} {} {} {}",
    format,
    header_count,
    num_entries,
    num_edges,
    num_vertices
)]
pub struct GraphInfo {
    format: String,
    header_count: u64,
    num_entries: usize,
    num_edges: usize,
    num_vertices: usize,
}

impl GraphInfo {
    pub fn new(
        format: String,
        header_count: u64,
        num_entries: usize,
        num_edges: usize,
        num_vertices: usize,
    ) -> Self {
        Self {
            format,
            header_count,
            num_entries,
            num_edges,
            num_vertices,
        }
    }

    pub fn num_entries(&self) -> usize {
        self.num_entries
    }

    pub fn num_edges(&self) -> usize {
        self.num_edges
    }

    pub fn num_vertices(&self) -> usize {
        self.num_vertices
    }
}
