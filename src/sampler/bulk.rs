use super::{driver::Sampler, options::SampleOptions};
use crate::{
    comms::Comms,
    data::Graph,
    error::{Err, Result},
    types::{EId, EType, Hop, Label, Rank, VId, Weight},
};
use itertools::Itertools;
use log::info;

/// The sampled edges of one batch at one hop.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchSample {
    pub batch_id: Label,
    pub hop: Hop,
    pub src: Vec<VId>,
    pub dst: Vec<VId>,
    pub edge_id: Vec<EId>,
    pub weight: Option<Vec<Weight>>,
    pub edge_type: Option<Vec<EType>>,
}

/// Receives the output of a [`BulkSampler`].
pub trait SampleSink {
    fn write(&mut self, rank: Rank, sample: BatchSample) -> Result<()>;
}

/// Keeps every written sample in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    pub samples: Vec<(Rank, BatchSample)>,
}

impl SampleSink for MemorySink {
    fn write(&mut self, rank: Rank, sample: BatchSample) -> Result<()> {
        self.samples.push((rank, sample));
        Ok(())
    }
}

fn gather<T: Copy>(column: &[T], rows: &[usize]) -> Vec<T> {
    rows.iter().map(|&i| column[i]).collect()
}

pub const DEFAULT_SATURATION_LEVEL: usize = 200_000;

/// Samples many small batches of starting vertices with one driver call.
///
/// Starting vertices are queued with their batch id; once `saturation_level`
/// of them are pending they are sampled together, the batch ids riding along
/// as labels, and the result is written to the sink split by batch and hop.
/// With several workers every worker must flush at the same points.
pub struct BulkSampler<'a, G: Graph, C: Comms, S: SampleSink> {
    sampler: Sampler<'a, G, C>,
    sink: S,
    options: SampleOptions,
    saturation_level: usize,
    rank: Rank,
    pending: Vec<(VId, Label)>,
}

impl<'a, G: Graph, C: Comms, S: SampleSink> BulkSampler<'a, G, C, S> {
    pub fn new(sampler: Sampler<'a, G, C>, sink: S, options: SampleOptions) -> Self {
        let rank = sampler.rank();
        Self {
            sampler,
            sink,
            options,
            saturation_level: DEFAULT_SATURATION_LEVEL,
            rank,
            pending: Vec::new(),
        }
    }

    pub fn saturation_level(mut self, saturation_level: usize) -> Self {
        self.saturation_level = saturation_level.max(1);
        self
    }

    pub fn rank(&self) -> Rank {
        self.rank
    }

    /// The number of queued starting vertices.
    pub fn size(&self) -> usize {
        self.pending.len()
    }

    pub fn add_batches(&mut self, starts: &[VId], batch_ids: &[Label]) -> Result<()> {
        if starts.len() != batch_ids.len() {
            return Err(Err::LabelLengthMismatch {
                vertices: starts.len(),
                labels: batch_ids.len(),
            });
        }
        self.pending
            .extend(starts.iter().copied().zip(batch_ids.iter().copied()));
        while self.pending.len() >= self.saturation_level {
            self.flush()?;
        }
        Ok(())
    }

    /// Samples up to `saturation_level` of the queued vertices.
    ///
    /// The vertices stay queued if sampling fails.
    pub fn flush(&mut self) -> Result<()> {
        if self.pending.is_empty() {
            return Ok(());
        }
        let end = self.saturation_level.min(self.pending.len());
        let (starts, batch_ids): (Vec<VId>, Vec<Label>) =
            self.pending[..end].iter().copied().unzip();
        info!(
            "rank {}: flushing {} starting vertices, {} still queued",
            self.rank,
            starts.len(),
            self.pending.len() - end
        );
        let table = self
            .sampler
            .extended_sample(&starts, Some(&batch_ids), &self.options)?;
        self.pending.drain(..end);
        let labels = table.label().unwrap_or(&[]);
        let hops = table.hop();
        let mut order: Vec<usize> = (0..labels.len()).collect();
        order.sort_by_key(|&i| (labels[i], hops[i]));
        let groups = order.iter().group_by(|&&i| (labels[i], hops[i]));
        for ((batch_id, hop), rows) in &groups {
            let rows: Vec<usize> = rows.copied().collect();
            let sample = BatchSample {
                batch_id,
                hop,
                src: gather(table.src(), &rows),
                dst: gather(table.dst(), &rows),
                edge_id: gather(table.edge_id(), &rows),
                weight: table.weight().map(|w| gather(w, &rows)),
                edge_type: table.edge_type().map(|t| gather(t, &rows)),
            };
            self.sink.write(self.rank, sample)?;
        }
        Ok(())
    }

    /// Flushes everything still queued and returns the sink.
    pub fn finish(mut self) -> Result<S> {
        while !self.pending.is_empty() {
            self.flush()?;
        }
        Ok(self.sink)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::CsrGraph;

    fn create_graph() -> CsrGraph {
        CsrGraph::from_edges(5, vec![(0, 1), (1, 2), (2, 3), (3, 4), (4, 0)]).unwrap()
    }

    #[test]
    fn test_flush_on_saturation() {
        let graph = create_graph();
        let mut bulk = BulkSampler::new(
            Sampler::new(&graph),
            MemorySink::default(),
            SampleOptions::new(vec![1, 1]),
        )
        .saturation_level(3);
        bulk.add_batches(&[0, 1], &[7, 7]).unwrap();
        assert_eq!(bulk.size(), 2);
        bulk.add_batches(&[2, 3], &[8, 9]).unwrap();
        assert_eq!(bulk.size(), 1);
        let sink = bulk.finish().unwrap();
        let keys: Vec<_> = sink
            .samples
            .iter()
            .map(|(rank, s)| (*rank, s.batch_id, s.hop, s.src.clone(), s.dst.clone()))
            .collect();
        assert_eq!(
            keys,
            vec![
                (0, 7, 0, vec![0, 1], vec![1, 2]),
                (0, 7, 1, vec![1, 2], vec![2, 3]),
                (0, 8, 0, vec![2], vec![3]),
                (0, 8, 1, vec![3], vec![4]),
                (0, 9, 0, vec![3], vec![4]),
                (0, 9, 1, vec![4], vec![0]),
            ]
        );
    }

    #[test]
    fn test_mismatched_batches() {
        let graph = create_graph();
        let mut bulk = BulkSampler::new(
            Sampler::new(&graph),
            MemorySink::default(),
            SampleOptions::new(vec![1]),
        );
        assert!(bulk.add_batches(&[0, 1], &[7]).is_err());
        assert_eq!(bulk.size(), 0);
    }

    #[test]
    fn test_failed_flush_keeps_queue() {
        let graph = create_graph();
        let mut bulk = BulkSampler::new(
            Sampler::new(&graph),
            MemorySink::default(),
            SampleOptions::new(vec![1]),
        )
        .saturation_level(10);
        bulk.add_batches(&[0, 9], &[1, 2]).unwrap();
        assert_eq!(bulk.flush(), Err(Err::VertexOutOfRange(9)));
        assert_eq!(bulk.size(), 2);
        assert_eq!(bulk.rank(), 0);
    }
}
