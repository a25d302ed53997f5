use hopsampler::{
    comms::{Comms, LocalCluster},
    data::{CsrGraph, Graph, PartitionMap},
    error::{Err, Result},
    sampler::{ResultTable, SampleOptions, Sampler},
    types::{Label, VId},
};
use std::thread;

fn create_tree() -> CsrGraph {
    CsrGraph::from_edges(
        10,
        vec![
            (0, 2),
            (0, 3),
            (1, 4),
            (1, 5),
            (2, 6),
            (3, 7),
            (4, 8),
            (5, 9),
        ],
    )
    .unwrap()
}

/// Runs the extended driver on `workers` threads, rank 0 holding the starting vertices.
fn run_extended(
    graph: &CsrGraph,
    workers: usize,
    starting: &[VId],
    labels: Option<&[Label]>,
    options: &SampleOptions,
) -> Vec<Result<ResultTable>> {
    let map = PartitionMap::even(graph.info().num_vertices(), workers).unwrap();
    let locals: Vec<_> = (0..workers)
        .map(|rank| graph.local(&map, rank).unwrap())
        .collect();
    let cluster = LocalCluster::new(workers).unwrap();
    thread::scope(|scope| {
        let handles: Vec<_> = cluster
            .workers()
            .into_iter()
            .zip(&locals)
            .map(|(comms, local)| {
                let map = &map;
                let (starting, labels): (Vec<VId>, Option<Vec<Label>>) = if comms.rank() == 0 {
                    (starting.to_vec(), labels.map(|l| l.to_vec()))
                } else {
                    (vec![], labels.map(|_| vec![]))
                };
                scope.spawn(move || {
                    Sampler::distributed(local, comms, map).extended_sample(
                        &starting,
                        labels.as_deref(),
                        options,
                    )
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    })
}

fn rows(tables: &[ResultTable]) -> Vec<(u32, VId, VId, Option<Label>)> {
    let mut rows: Vec<_> = tables
        .iter()
        .flat_map(|t| {
            (0..t.len()).map(move |i| (t.hop()[i], t.src()[i], t.dst()[i], t.label().map(|l| l[i])))
        })
        .collect();
    rows.sort();
    rows
}

#[test]
fn test_full_mode_matches_single_worker() {
    let graph = create_tree();
    let options = SampleOptions::new(vec![-1, 0]);
    let single = Sampler::new(&graph)
        .extended_sample(&[0, 1], None, &options)
        .unwrap();
    for workers in 1..=4 {
        let tables: Vec<_> = run_extended(&graph, workers, &[0, 1], None, &options)
            .into_iter()
            .collect::<Result<_>>()
            .unwrap();
        assert_eq!(rows(&tables), rows(&[single.clone()]));
    }
}

#[test]
fn test_every_edge_lands_on_its_owner() {
    let graph = create_tree();
    let map = PartitionMap::even(10, 3).unwrap();
    let options = SampleOptions::new(vec![2, 2]).with_replacement(false);
    let tables = run_extended(&graph, 3, &[0, 1], None, &options);
    let mut total = 0;
    for (rank, table) in tables.into_iter().enumerate() {
        let table = table.unwrap();
        total += table.len();
        for &src in table.src() {
            assert_eq!(map.owner(src), Ok(rank));
        }
    }
    assert_eq!(total, 8);
}

#[test]
fn test_labels_follow_their_roots() {
    let graph = create_tree();
    let options = SampleOptions::new(vec![2, 2]).with_replacement(false);
    let tables: Vec<_> = run_extended(&graph, 2, &[0, 1], Some(&[100, 101][..]), &options)
        .into_iter()
        .collect::<Result<_>>()
        .unwrap();
    let rows = rows(&tables);
    assert_eq!(rows.len(), 8);
    for (hop, src, _, label) in rows {
        let root = if hop == 0 { src } else { (src - 2) / 2 };
        assert_eq!(label, Some(100 + root as Label));
    }
}

#[test]
fn test_cluster_is_deterministic() {
    let graph = CsrGraph::from_edges(
        12,
        (0..12).flat_map(|s| (0..12).filter(move |d| (s * d) % 5 != 1).map(move |d| (s, d))),
    )
    .unwrap();
    let options = SampleOptions::new(vec![3, 2]).seed(17);
    let a = run_extended(&graph, 3, &[0, 4, 8, 11], None, &options);
    let b = run_extended(&graph, 3, &[0, 4, 8, 11], None, &options);
    assert_eq!(a, b);
    let hop0 = a
        .iter()
        .map(|t| t.as_ref().unwrap().hop().iter().filter(|&&h| h == 0).count())
        .sum::<usize>();
    assert_eq!(hop0, 4 * 3);
}

#[test]
fn test_failing_rank_fails_every_rank() {
    let graph = create_tree();
    let options = SampleOptions::new(vec![1, 1]);
    let results = run_extended(&graph, 2, &[99], None, &options);
    assert_eq!(results.len(), 2);
    assert_eq!(results[0], Err(Err::VertexOutOfRange(99)));
    assert!(matches!(results[1], Err(Err::Collective(_))));
}

#[test]
fn test_invalid_input_on_one_rank_fails_every_rank() {
    let graph = create_tree();
    let options = SampleOptions::new(vec![2, 2]);
    let results = run_extended(&graph, 3, &[0, 1], Some(&[5][..]), &options);
    assert_eq!(
        results[0],
        Err(Err::LabelLengthMismatch {
            vertices: 2,
            labels: 1
        })
    );
    assert!(results[1..].iter().all(|r| matches!(r, Err(Err::Collective(_)))));
}
