use super::Comms;
use crate::{
    error::{Err, Result},
    types::Rank,
};
use std::{
    any::Any,
    sync::{Arc, Condvar, Mutex},
};

type Parcel = Box<dyn Any + Send>;

#[derive(Default)]
struct Gate {
    arrived: usize,
    generation: u64,
    aborted: bool,
}

struct Shared {
    size: usize,
    gate: Mutex<Gate>,
    turn: Condvar,
    // slot `src * size + dst` holds what `src` sends to `dst`
    mailbox: Mutex<Vec<Option<Parcel>>>,
}

fn aborted() -> Err {
    Err::Collective(String::from("aborted by a peer"))
}

impl Shared {
    /// Blocks until all workers arrive, or fails once the cluster is aborted.
    fn wait(&self) -> Result<()> {
        let mut gate = self
            .gate
            .lock()
            .map_err(|_| Err::Collective(String::from("gate poisoned")))?;
        if gate.aborted {
            return Err(aborted());
        }
        let generation = gate.generation;
        gate.arrived += 1;
        if gate.arrived == self.size {
            gate.arrived = 0;
            gate.generation += 1;
            self.turn.notify_all();
            return Ok(());
        }
        while gate.generation == generation && !gate.aborted {
            gate = self
                .turn
                .wait(gate)
                .map_err(|_| Err::Collective(String::from("gate poisoned")))?;
        }
        if gate.generation == generation {
            Err(aborted())
        } else {
            Ok(())
        }
    }

    fn abort(&self) {
        if let Ok(mut gate) = self.gate.lock() {
            gate.aborted = true;
        }
        self.turn.notify_all();
    }
}

/// A group of workers living in one process, one thread each.
pub struct LocalCluster {
    shared: Arc<Shared>,
}

impl LocalCluster {
    pub fn new(size: usize) -> Result<Self> {
        if size == 0 {
            return Err(Err::Collective(String::from("a cluster needs a worker")));
        }
        Ok(Self {
            shared: Arc::new(Shared {
                size,
                gate: Mutex::new(Gate::default()),
                turn: Condvar::new(),
                mailbox: Mutex::new((0..size * size).map(|_| None).collect()),
            }),
        })
    }

    /// One endpoint per rank; each must be moved to its own thread.
    pub fn workers(&self) -> Vec<LocalComms> {
        (0..self.shared.size)
            .map(|rank| LocalComms {
                rank,
                shared: Arc::clone(&self.shared),
            })
            .collect()
    }
}

pub struct LocalComms {
    rank: Rank,
    shared: Arc<Shared>,
}

impl LocalComms {
    fn post<T: Send + 'static>(&self, buckets: Vec<Vec<T>>) -> Result<()> {
        let size = self.shared.size;
        let mut mailbox = self
            .shared
            .mailbox
            .lock()
            .map_err(|_| Err::Collective(String::from("mailbox poisoned")))?;
        for (dst, bucket) in buckets.into_iter().enumerate() {
            mailbox[self.rank * size + dst] = Some(Box::new(bucket));
        }
        Ok(())
    }

    fn collect<T: Send + 'static>(&self) -> Result<Vec<T>> {
        let size = self.shared.size;
        let mut mailbox = self
            .shared
            .mailbox
            .lock()
            .map_err(|_| Err::Collective(String::from("mailbox poisoned")))?;
        let mut received = Vec::new();
        for src in 0..size {
            let parcel = mailbox[src * size + self.rank].take().ok_or_else(|| {
                Err::Collective(format!("rank {} sent nothing to rank {}", src, self.rank))
            })?;
            let bucket = parcel.downcast::<Vec<T>>().map_err(|_| {
                Err::Collective(format!("rank {} sent an unexpected type", src))
            })?;
            received.extend(*bucket);
        }
        Ok(received)
    }
}

impl Comms for LocalComms {
    fn rank(&self) -> Rank {
        self.rank
    }

    fn size(&self) -> usize {
        self.shared.size
    }

    fn all_to_all<T: Send + 'static>(&self, buckets: Vec<Vec<T>>) -> Result<Vec<T>> {
        if buckets.len() != self.shared.size {
            self.abort();
            return Err(Err::Collective(format!(
                "expected {} buckets, got {}",
                self.shared.size,
                buckets.len()
            )));
        }
        let received = self
            .post(buckets)
            .and_then(|_| self.shared.wait())
            .and_then(|_| self.collect())
            // nobody posts the next round before everyone has collected this one
            .and_then(|received| self.shared.wait().map(|_| received));
        if received.is_err() {
            self.abort();
        }
        received
    }

    fn abort(&self) {
        self.shared.abort();
    }
}
