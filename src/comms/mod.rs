//! Collective exchange between workers.
//!
//! The hop loop only talks to its peers through [`Comms::all_to_all`], so the
//! same driver runs single-process with [`SingleWorker`] or as one of several
//! in-process workers with [`LocalCluster`].

pub use local::{LocalCluster, LocalComms};
pub use shuffle::{shuffle_vertices, shuffle_vertices_and_labels};
pub use single::SingleWorker;

use crate::{error::Result, types::Rank};

mod local;
mod shuffle;
mod single;

pub trait Comms {
    fn rank(&self) -> Rank;

    fn size(&self) -> usize;

    /// Sends `buckets[r]` to worker `r` and returns everything sent to this worker,
    /// ordered by source rank and then by send order.
    ///
    /// Every worker must call it the same number of times.
    fn all_to_all<T: Send + 'static>(&self, buckets: Vec<Vec<T>>) -> Result<Vec<T>>;

    /// Fails every pending and future exchange of every worker.
    ///
    /// A worker giving up on an invocation calls it so its peers do not wait
    /// for it forever.
    fn abort(&self) {}
}
