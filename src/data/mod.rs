//! The data graph.

pub use csr::CsrGraph;
pub use edge_list::EdgeList;
pub use info::GraphInfo;
pub use partition::PartitionMap;
pub use properties::EdgeProperties;

use crate::{
    error::Result,
    types::{EId, VId},
};
use std::ops::Range;

mod csr;
mod edge_list;
mod info;
mod partition;
mod properties;

/// One outgoing edge of a vertex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ArcEntry {
    pub dst: VId,
    pub edge_id: EId,
}

/// Read-only access to the outgoing edges of the locally owned vertices.
pub trait Graph: Sync {
    /// The contiguous range of vertex ids stored locally.
    fn vertex_range(&self) -> Range<VId>;

    /// The number of edge ids in the whole graph; edge property views are indexed by them.
    fn num_edge_ids(&self) -> usize;

    fn out_edges(&self, vid: VId) -> Result<&[ArcEntry]>;

    fn out_deg(&self, vid: VId) -> Result<usize> {
        Ok(self.out_edges(vid)?.len())
    }

    fn info(&self) -> GraphInfo;
}
