//! Multi-hop neighbor sampling.
//!
//! A driver call expands the starting vertices hop by hop. Each hop shuffles
//! the frontier to the owning workers, draws its seed from a
//! [`SeedScheduler`], samples or gathers the outgoing edges of the local
//! frontier and appends them to a [`ResultTable`]. The destinations become
//! the next frontier.

pub use bulk::{BatchSample, BulkSampler, MemorySink, SampleSink, DEFAULT_SATURATION_LEVEL};
pub use dedup::remove_duplicates;
pub use driver::{PlainSample, Sampler};
pub use expand::{gather_edges, sample_edges};
pub use options::SampleOptions;
pub use seed::SeedScheduler;
pub use table::{HopOutput, ResultTable, Schema};

mod bulk;
mod dedup;
mod driver;
mod expand;
mod options;
mod seed;
mod table;
