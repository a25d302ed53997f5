use crate::{
    data::{ArcEntry, Graph, GraphInfo, PartitionMap},
    error::{Err, Result},
    types::{EId, Rank, VId},
};
use std::ops::Range;

/// The CSR data graph.
///
/// ```text
/// offsets: | 0 | deg(first) | ... | num_edges |
/// arcs:    | ArcEntry of first ... | ArcEntry of first + 1 ... | ...
/// ```
///
/// Edge ids are assigned in input order and stay global when the graph is
/// restricted to one worker with [`CsrGraph::local`].
#[derive(Debug, Clone, PartialEq)]
pub struct CsrGraph {
    first: VId,
    offsets: Vec<usize>,
    arcs: Vec<ArcEntry>,
    num_edge_ids: usize,
}

impl CsrGraph {
    /// Builds a graph over the vertices `[0, num_vertices)`.
    ///
    /// The `i`-th edge gets edge id `i`; the outgoing edges of a vertex keep their input order.
    pub fn from_edges<E>(num_vertices: usize, edges: E) -> Result<Self>
    where
        E: IntoIterator<Item = (VId, VId)>,
    {
        let edges: Vec<(VId, VId)> = edges.into_iter().collect();
        let in_range = |vid: VId| vid >= 0 && (vid as usize) < num_vertices;
        let mut offsets = vec![0; num_vertices + 1];
        for &(src, dst) in &edges {
            if !in_range(src) {
                return Err(Err::VertexOutOfRange(src));
            }
            if !in_range(dst) {
                return Err(Err::VertexOutOfRange(dst));
            }
            offsets[src as usize + 1] += 1;
        }
        for i in 0..num_vertices {
            offsets[i + 1] += offsets[i];
        }
        let mut cursor = offsets.clone();
        let mut arcs = vec![ArcEntry { dst: 0, edge_id: 0 }; edges.len()];
        for (edge_id, &(src, dst)) in edges.iter().enumerate() {
            let pos = &mut cursor[src as usize];
            arcs[*pos] = ArcEntry {
                dst,
                edge_id: edge_id as EId,
            };
            *pos += 1;
        }
        Ok(Self {
            first: 0,
            offsets,
            arcs,
            num_edge_ids: edges.len(),
        })
    }

    /// Keeps only the vertices owned by `rank`.
    pub fn local(&self, map: &PartitionMap, rank: Rank) -> Result<Self> {
        let range = map.range(rank)?;
        let own = self.vertex_range();
        if range.start < own.start || range.end > own.end {
            return Err(Err::InvalidPartition(format!(
                "range {:?} of rank {} exceeds the stored vertices {:?}",
                range, rank, own
            )));
        }
        let (lo, hi) = (
            (range.start - self.first) as usize,
            (range.end - self.first) as usize,
        );
        let base = self.offsets[lo];
        Ok(Self {
            first: range.start,
            offsets: self.offsets[lo..=hi].iter().map(|&o| o - base).collect(),
            arcs: self.arcs[base..self.offsets[hi]].to_vec(),
            num_edge_ids: self.num_edge_ids,
        })
    }
}

impl Graph for CsrGraph {
    fn vertex_range(&self) -> Range<VId> {
        self.first..self.first + (self.offsets.len() - 1) as VId
    }

    fn num_edge_ids(&self) -> usize {
        self.num_edge_ids
    }

    fn out_edges(&self, vid: VId) -> Result<&[ArcEntry]> {
        if !self.vertex_range().contains(&vid) {
            return Err(Err::VertexOutOfRange(vid));
        }
        let i = (vid - self.first) as usize;
        Ok(&self.arcs[self.offsets[i]..self.offsets[i + 1]])
    }

    fn info(&self) -> GraphInfo {
        GraphInfo::new(self.offsets.len() - 1, self.arcs.len(), self.num_edge_ids)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_graph() -> CsrGraph {
        CsrGraph::from_edges(5, vec![(1, 2), (2, 4), (1, 3), (4, 0)]).unwrap()
    }

    fn dsts(graph: &CsrGraph, vid: VId) -> Vec<(VId, EId)> {
        graph
            .out_edges(vid)
            .unwrap()
            .iter()
            .map(|arc| (arc.dst, arc.edge_id))
            .collect()
    }

    #[test]
    fn test_from_edges() {
        let graph = create_graph();
        assert_eq!(graph.vertex_range(), 0..5);
        assert_eq!(dsts(&graph, 0), Vec::<(VId, EId)>::new());
        assert_eq!(dsts(&graph, 1), vec![(2, 0), (3, 2)]);
        assert_eq!(dsts(&graph, 2), vec![(4, 1)]);
        assert_eq!(graph.out_deg(4), Ok(1));
        assert_eq!(graph.info(), GraphInfo::new(5, 4, 4));
        assert_eq!(graph.out_edges(5), Err(Err::VertexOutOfRange(5)));
    }

    #[test]
    fn test_from_edges_out_of_range() {
        assert_eq!(
            CsrGraph::from_edges(2, vec![(0, 2)]),
            Err(Err::VertexOutOfRange(2))
        );
    }

    #[test]
    fn test_local() {
        let graph = create_graph();
        let map = PartitionMap::new(vec![2, 5]).unwrap();
        let local0 = graph.local(&map, 0).unwrap();
        let local1 = graph.local(&map, 1).unwrap();
        assert_eq!(local0.vertex_range(), 0..2);
        assert_eq!(dsts(&local0, 1), vec![(2, 0), (3, 2)]);
        assert!(local0.out_edges(2).is_err());
        assert_eq!(local1.vertex_range(), 2..5);
        assert_eq!(dsts(&local1, 2), vec![(4, 1)]);
        assert_eq!(dsts(&local1, 4), vec![(0, 3)]);
        assert_eq!(local1.info(), GraphInfo::new(3, 2, 4));
    }
}
