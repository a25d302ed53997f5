//! Multi-hop stochastic neighbor sampling over partitioned property graphs.

pub mod comms;
pub mod data;
pub mod error;
pub mod sampler;
pub mod types;
