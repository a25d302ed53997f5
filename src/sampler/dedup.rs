use crate::types::{EId, VId, Weight};
use itertools::Itertools;
use rayon::prelude::*;
use std::cmp::Ordering;

type Row = (VId, VId, Weight, EId);

fn cmp_rows(a: &Row, b: &Row) -> Ordering {
    a.0.cmp(&b.0)
        .then(a.1.cmp(&b.1))
        .then(a.2.total_cmp(&b.2))
        .then(a.3.cmp(&b.3))
}

fn same_key(a: &Row, b: &Row) -> bool {
    a.0 == b.0 && a.1 == b.1 && a.2.to_bits() == b.2.to_bits()
}

/// Collapses rows sharing `(src, dst, weight)` into the one with the smallest edge id.
///
/// The surviving rows come out sorted.
pub fn remove_duplicates(
    src: Vec<VId>,
    dst: Vec<VId>,
    weight: Vec<Weight>,
    edge_id: Vec<EId>,
) -> (Vec<VId>, Vec<VId>, Vec<Weight>, Vec<EId>) {
    let mut rows: Vec<Row> = src
        .into_iter()
        .zip(dst)
        .zip(weight)
        .zip(edge_id)
        .map(|(((s, d), w), e)| (s, d, w, e))
        .collect();
    rows.par_sort_unstable_by(cmp_rows);
    let mut result = (Vec::new(), Vec::new(), Vec::new(), Vec::new());
    for (s, d, w, e) in rows.into_iter().dedup_by(same_key) {
        result.0.push(s);
        result.1.push(d);
        result.2.push(w);
        result.3.push(e);
    }
    result
}
