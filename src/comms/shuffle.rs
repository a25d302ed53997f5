use super::Comms;
use crate::{
    data::PartitionMap,
    error::{Err, Result},
    types::{Label, VId},
};

fn check_map<C: Comms>(comms: &C, map: &PartitionMap) -> Result<()> {
    if map.size() != comms.size() {
        return Err(Err::InvalidPartition(format!(
            "{} ranges for {} workers",
            map.size(),
            comms.size()
        )));
    }
    Ok(())
}

/// Moves every vertex of `frontier` to the worker owning it.
pub fn shuffle_vertices<C: Comms>(
    comms: &C,
    map: &PartitionMap,
    frontier: Vec<VId>,
) -> Result<Vec<VId>> {
    check_map(comms, map)?;
    let mut buckets = vec![Vec::new(); comms.size()];
    for vid in frontier {
        buckets[map.owner(vid)?].push(vid);
    }
    comms.all_to_all(buckets)
}

/// Like [`shuffle_vertices`], each label travelling with its vertex.
pub fn shuffle_vertices_and_labels<C: Comms>(
    comms: &C,
    map: &PartitionMap,
    frontier: Vec<VId>,
    labels: Vec<Label>,
) -> Result<(Vec<VId>, Vec<Label>)> {
    check_map(comms, map)?;
    if frontier.len() != labels.len() {
        return Err(Err::LabelLengthMismatch {
            vertices: frontier.len(),
            labels: labels.len(),
        });
    }
    let mut buckets = vec![Vec::new(); comms.size()];
    for (vid, label) in frontier.into_iter().zip(labels) {
        buckets[map.owner(vid)?].push((vid, label));
    }
    Ok(comms.all_to_all(buckets)?.into_iter().unzip())
}
