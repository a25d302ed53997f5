use derive_more::Display;

#[derive(Debug, Display, PartialEq)]
#[display(fmt = "{} {} {}", num_vertices, num_edges, num_edge_ids)]
pub struct GraphInfo {
    num_vertices: usize,
    num_edges: usize,
    num_edge_ids: usize,
}

impl GraphInfo {
    pub fn new(num_vertices: usize, num_edges: usize, num_edge_ids: usize) -> Self {
        Self {
            num_vertices,
            num_edges,
            num_edge_ids,
        }
    }

    pub fn num_vertices(&self) -> usize {
        self.num_vertices
    }

    /// Edges stored locally.
    pub fn num_edges(&self) -> usize {
        self.num_edges
    }

    pub fn num_edge_ids(&self) -> usize {
        self.num_edge_ids
    }
}
