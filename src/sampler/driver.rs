use super::{
    dedup::remove_duplicates,
    expand::{gather_edges, sample_edges},
    options::SampleOptions,
    seed::SeedScheduler,
    table::{ResultTable, Schema},
};
use crate::{
    comms::{shuffle_vertices, shuffle_vertices_and_labels, Comms, SingleWorker},
    data::{EdgeProperties, Graph, PartitionMap},
    error::{Err, Result},
    types::{EId, Hop, Label, Rank, VId, Weight},
};
use log::{debug, info};
use std::time::Instant;

/// The deduplicated result of [`Sampler::plain_sample`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PlainSample {
    pub src: Vec<VId>,
    pub dst: Vec<VId>,
    pub weight: Vec<Weight>,
    pub edge_id: Vec<EId>,
}

impl PlainSample {
    pub fn len(&self) -> usize {
        self.dst.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dst.is_empty()
    }
}

#[cfg(feature = "ops")]
fn check_supported() -> Result<()> {
    Ok(())
}

#[cfg(not(feature = "ops"))]
fn check_supported() -> Result<()> {
    Err(Err::UnsupportedConfiguration(
        "sampling kernels are not built, enable the `ops` feature",
    ))
}

fn validate(fan_out: &[i32], starting: &[VId], labels: Option<&[Label]>) -> Result<()> {
    if fan_out.is_empty() {
        return Err(Err::EmptyFanOut);
    }
    if let Some(labels) = labels {
        if labels.len() != starting.len() {
            return Err(Err::LabelLengthMismatch {
                vertices: starting.len(),
                labels: labels.len(),
            });
        }
        if let Some(hop) = fan_out.iter().position(|&k| k <= 0) {
            return Err(Err::LabelsWithFullFanOut { hop: hop as Hop });
        }
    }
    Ok(())
}

/// Multi-hop neighbor sampling on one worker.
///
/// With several workers every one of them builds its own `Sampler` over its
/// local graph and calls the same driver with the same options; the hops run
/// in lock-step because each one starts with a collective frontier shuffle.
pub struct Sampler<'a, G: Graph, C: Comms> {
    graph: &'a G,
    comms: C,
    partition: Option<&'a PartitionMap>,
    props: EdgeProperties<'a>,
}

impl<'a, G: Graph> Sampler<'a, G, SingleWorker> {
    pub fn new(graph: &'a G) -> Self {
        Self {
            graph,
            comms: SingleWorker,
            partition: None,
            props: EdgeProperties::new(),
        }
    }
}

impl<'a, G: Graph, C: Comms> Sampler<'a, G, C> {
    /// A sampler for worker `comms.rank()` of a graph split by `partition`.
    pub fn distributed(graph: &'a G, comms: C, partition: &'a PartitionMap) -> Self {
        Self {
            graph,
            comms,
            partition: Some(partition),
            props: EdgeProperties::new(),
        }
    }

    pub fn properties(mut self, props: EdgeProperties<'a>) -> Self {
        self.props = props;
        self
    }

    pub fn rank(&self) -> Rank {
        self.comms.rank()
    }

    /// Samples `options.fan_out.len()` hops and returns the distinct
    /// `(src, dst, weight)` edges, each with one representative edge id.
    ///
    /// Edge types are ignored; without a weight view every weight is 1.
    pub fn plain_sample(&self, starting: &[VId], options: &SampleOptions) -> Result<PlainSample> {
        let props = self.props.without_types();
        let table = self.run(starting, None, &props, options)?;
        let (src, dst, weight, edge_id) = table.into_edges();
        let weight = weight.unwrap_or_else(|| vec![1.0; dst.len()]);
        let (src, dst, weight, edge_id) = remove_duplicates(src, dst, weight, edge_id);
        debug!("{} distinct edges after deduplication", dst.len());
        Ok(PlainSample {
            src,
            dst,
            weight,
            edge_id,
        })
    }

    /// Samples `options.fan_out.len()` hops and returns one row per produced
    /// edge, tagged with its hop and, when `labels` are given, with the label
    /// of the starting vertex it descends from.
    ///
    /// Labels require every fan-out entry to be positive.
    pub fn extended_sample(
        &self,
        starting: &[VId],
        labels: Option<&[Label]>,
        options: &SampleOptions,
    ) -> Result<ResultTable> {
        self.run(starting, labels, &self.props, options)
    }

    /// Runs the hops; a failing worker aborts the collective so its peers fail too.
    fn run(
        &self,
        starting: &[VId],
        labels: Option<&[Label]>,
        props: &EdgeProperties,
        options: &SampleOptions,
    ) -> Result<ResultTable> {
        let table = self.run_hops(starting, labels, props, options);
        if table.is_err() {
            self.comms.abort();
        }
        table
    }

    fn run_hops(
        &self,
        starting: &[VId],
        labels: Option<&[Label]>,
        props: &EdgeProperties,
        options: &SampleOptions,
    ) -> Result<ResultTable> {
        check_supported()?;
        validate(&options.fan_out, starting, labels)?;
        props.validate(self.graph.num_edge_ids())?;
        let start_time = Instant::now();
        let (rank, size) = (self.comms.rank(), self.comms.size());
        info!(
            "rank {}/{}: sampling {} hops from {} vertices",
            rank,
            size,
            options.fan_out.len(),
            starting.len()
        );
        let mut table = ResultTable::new(Schema {
            weight: props.has_weights(),
            edge_type: props.has_types(),
            label: labels.is_some(),
        });
        let mut seeds = SeedScheduler::new(options.seed, rank, size);
        let mut frontier = starting.to_vec();
        let mut frontier_labels = labels.map(|labels| labels.to_vec());
        for (hop, &k) in options.fan_out.iter().enumerate() {
            if let Some(map) = self.partition.filter(|_| size > 1) {
                match frontier_labels.take() {
                    Some(l) => {
                        let (f, l) = shuffle_vertices_and_labels(&self.comms, map, frontier, l)?;
                        frontier = f;
                        frontier_labels = Some(l);
                    }
                    None => frontier = shuffle_vertices(&self.comms, map, frontier)?,
                }
            }
            let seed = seeds.current();
            seeds.advance(frontier.len(), k);
            let output = if k > 0 {
                sample_edges(
                    self.graph,
                    props,
                    seed,
                    &frontier,
                    frontier_labels.as_deref(),
                    k as usize,
                    options.with_replacement,
                )?
            } else {
                gather_edges(self.graph, props, &frontier)?
            };
            debug!(
                "rank {}: hop {} ({}) expanded {} vertices into {} edges with seed {}",
                rank,
                hop,
                if k > 0 { "sampled" } else { "full" },
                frontier.len(),
                output.len(),
                seed
            );
            frontier = output.dst.clone();
            frontier_labels = output.label.clone();
            table.append(hop as Hop, output);
        }
        info!(
            "rank {}: sampled {} edges in {}ms",
            rank,
            table.len(),
            start_time.elapsed().as_millis()
        );
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::CsrGraph;

    fn create_graph() -> CsrGraph {
        CsrGraph::from_edges(5, vec![(1, 2), (1, 3), (2, 4)]).unwrap()
    }

    #[test]
    fn test_validate() {
        assert_eq!(validate(&[], &[1], None), Err(Err::EmptyFanOut));
        assert_eq!(
            validate(&[2], &[1, 2], Some(&[0][..])),
            Err(Err::LabelLengthMismatch {
                vertices: 2,
                labels: 1
            })
        );
        assert_eq!(
            validate(&[2, 0, -1], &[1], Some(&[0][..])),
            Err(Err::LabelsWithFullFanOut { hop: 1 })
        );
        assert_eq!(validate(&[2, -1], &[1], None), Ok(()));
    }

    #[cfg(not(feature = "ops"))]
    #[test]
    fn test_unsupported_without_ops() {
        let graph = create_graph();
        let sampler = Sampler::new(&graph);
        let options = SampleOptions::new(vec![1]);
        let unsupported = Err::UnsupportedConfiguration(
            "sampling kernels are not built, enable the `ops` feature",
        );
        assert_eq!(sampler.plain_sample(&[1], &options), Err(unsupported.clone()));
        assert_eq!(
            sampler.extended_sample(&[1], None, &options),
            Err(unsupported)
        );
    }

    #[test]
    fn test_empty_fan_out_fails() {
        let graph = create_graph();
        let sampler = Sampler::new(&graph);
        let options = SampleOptions::new(vec![]);
        assert_eq!(
            sampler.plain_sample(&[1], &options),
            Err(Err::EmptyFanOut)
        );
        assert_eq!(
            sampler.extended_sample(&[1], None, &options),
            Err(Err::EmptyFanOut)
        );
    }

    #[test]
    fn test_property_length_checked() {
        let graph = create_graph();
        let weights = [1.0, 2.0];
        let sampler = Sampler::new(&graph).properties(EdgeProperties::new().with_weights(&weights));
        assert_eq!(
            sampler.plain_sample(&[1], &SampleOptions::new(vec![1])),
            Err(Err::PropertyLengthMismatch {
                edges: 3,
                values: 2
            })
        );
    }

    #[test]
    fn test_plain_sample_without_weights() {
        let graph = create_graph();
        let sample = Sampler::new(&graph)
            .plain_sample(&[1, 1], &SampleOptions::new(vec![-1, -1]))
            .unwrap();
        assert_eq!(sample.src, vec![1, 1, 2]);
        assert_eq!(sample.dst, vec![2, 3, 4]);
        assert_eq!(sample.weight, vec![1.0; 3]);
        assert_eq!(sample.edge_id, vec![0, 1, 2]);
    }
}
