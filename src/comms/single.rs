use super::Comms;
use crate::{
    error::{Err, Result},
    types::Rank,
};

/// The only worker; every exchange is the identity.
#[derive(Debug, Clone, Copy, Default)]
pub struct SingleWorker;

impl Comms for SingleWorker {
    fn rank(&self) -> Rank {
        0
    }

    fn size(&self) -> usize {
        1
    }

    fn all_to_all<T: Send + 'static>(&self, buckets: Vec<Vec<T>>) -> Result<Vec<T>> {
        if buckets.len() != 1 {
            return Err(Err::Collective(format!(
                "expected 1 bucket, got {}",
                buckets.len()
            )));
        }
        Ok(buckets.into_iter().flatten().collect())
    }
}
