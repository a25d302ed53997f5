use super::table::{HopOutput, Schema};
use crate::{
    data::{ArcEntry, EdgeProperties, Graph},
    error::Result,
    types::{Label, VId},
};
use rand::{seq::index, Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;

/// The random stream of the `i`-th frontier vertex of a hop.
fn vertex_rng(seed: u64, i: usize) -> ChaCha8Rng {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    rng.set_stream(i as u64);
    rng
}

fn pick(arcs: &[ArcEntry], k: usize, with_replacement: bool, rng: &mut ChaCha8Rng) -> Vec<usize> {
    if arcs.is_empty() {
        vec![]
    } else if with_replacement {
        (0..k).map(|_| rng.gen_range(0..arcs.len())).collect()
    } else if arcs.len() <= k {
        (0..arcs.len()).collect()
    } else {
        index::sample(rng, arcs.len(), k).into_vec()
    }
}

fn concat(schema: Schema, outputs: Vec<HopOutput>) -> HopOutput {
    let mut output = HopOutput::new(schema);
    for o in outputs {
        output.append(o);
    }
    output
}

/// Samples up to `k` outgoing edges of every frontier vertex uniformly.
///
/// Without replacement a vertex of degree `d` yields `min(d, k)` distinct
/// edges; with replacement it yields exactly `k` edges unless `d == 0`.
/// Each produced edge carries the label of its source frontier entry.
pub fn sample_edges<G: Graph>(
    graph: &G,
    props: &EdgeProperties,
    seed: u64,
    frontier: &[VId],
    labels: Option<&[Label]>,
    k: usize,
    with_replacement: bool,
) -> Result<HopOutput> {
    let schema = Schema {
        weight: props.has_weights(),
        edge_type: props.has_types(),
        label: labels.is_some(),
    };
    let outputs = frontier
        .par_iter()
        .enumerate()
        .map(|(i, &vid)| {
            let arcs = graph.out_edges(vid)?;
            let label = labels.map(|labels| labels[i]);
            let mut output = HopOutput::new(schema);
            for p in pick(arcs, k, with_replacement, &mut vertex_rng(seed, i)) {
                let ArcEntry { dst, edge_id } = arcs[p];
                output.push(
                    vid,
                    dst,
                    edge_id,
                    props.weight(edge_id),
                    props.edge_type(edge_id),
                    label,
                );
            }
            Ok(output)
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(concat(schema, outputs))
}

/// Collects every outgoing edge of every frontier vertex.
pub fn gather_edges<G: Graph>(
    graph: &G,
    props: &EdgeProperties,
    frontier: &[VId],
) -> Result<HopOutput> {
    let schema = Schema {
        weight: props.has_weights(),
        edge_type: props.has_types(),
        label: false,
    };
    let outputs = frontier
        .par_iter()
        .map(|&vid| {
            let mut output = HopOutput::new(schema);
            for &ArcEntry { dst, edge_id } in graph.out_edges(vid)? {
                output.push(
                    vid,
                    dst,
                    edge_id,
                    props.weight(edge_id),
                    props.edge_type(edge_id),
                    None,
                );
            }
            Ok(output)
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(concat(schema, outputs))
}
