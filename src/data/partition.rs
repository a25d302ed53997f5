use crate::{
    error::{Err, Result},
    types::{Rank, VId},
};
use std::ops::Range;

/// Assigns contiguous vertex id ranges to workers.
///
/// Worker `r` owns `[range_lasts[r - 1], range_lasts[r])`, worker 0 starts at 0.
/// Range lasts must not decrease; a repeated last leaves that worker empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartitionMap {
    range_lasts: Vec<VId>,
}

impl PartitionMap {
    pub fn new(range_lasts: Vec<VId>) -> Result<Self> {
        if range_lasts.is_empty() {
            return Err(Err::InvalidPartition(String::from("no workers")));
        }
        if range_lasts[0] < 0 || range_lasts.windows(2).any(|w| w[0] > w[1]) {
            return Err(Err::InvalidPartition(format!(
                "range lasts must be non-negative and non-decreasing: {:?}",
                range_lasts
            )));
        }
        Ok(Self { range_lasts })
    }

    /// Splits `[0, num_vertices)` into `workers` ranges whose sizes differ by at most one.
    pub fn even(num_vertices: usize, workers: usize) -> Result<Self> {
        if workers == 0 {
            return Err(Err::InvalidPartition(String::from("no workers")));
        }
        let (base, extra) = (num_vertices / workers, num_vertices % workers);
        let mut last = 0;
        Self::new(
            (0..workers)
                .map(|rank| {
                    last += base + if rank < extra { 1 } else { 0 };
                    last as VId
                })
                .collect(),
        )
    }

    pub fn size(&self) -> usize {
        self.range_lasts.len()
    }

    pub fn num_vertices(&self) -> usize {
        self.range_lasts[self.range_lasts.len() - 1] as usize
    }

    pub fn owner(&self, vid: VId) -> Result<Rank> {
        if vid < 0 || vid >= self.range_lasts[self.range_lasts.len() - 1] {
            return Err(Err::VertexOutOfRange(vid));
        }
        Ok(self.range_lasts.partition_point(|&last| last <= vid))
    }

    pub fn range(&self, rank: Rank) -> Result<Range<VId>> {
        match self.range_lasts.get(rank) {
            Some(&last) => Ok(if rank == 0 { 0 } else { self.range_lasts[rank - 1] }..last),
            None => Err(Err::InvalidPartition(format!(
                "rank {} out of {} workers",
                rank,
                self.size()
            ))),
        }
    }
}
