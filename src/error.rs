//! Error management.

use crate::types::{Hop, VId};
use derive_more::Display;

#[derive(Debug, Clone, Display, PartialEq)]
pub enum Err {
    #[display(fmt = "invalid input: fan-out schedule must be non-empty")]
    EmptyFanOut,
    #[display(
        fmt = "invalid input: {} starting labels for {} starting vertices",
        labels,
        vertices
    )]
    LabelLengthMismatch { vertices: usize, labels: usize },
    #[display(
        fmt = "invalid input: starting labels cannot be used with full fan-out at hop {}",
        hop
    )]
    LabelsWithFullFanOut { hop: Hop },
    #[display(fmt = "invalid input: vertex {} is not in the local vertex range", _0)]
    VertexOutOfRange(VId),
    #[display(fmt = "invalid input: edge property has {} values for {} edges", values, edges)]
    PropertyLengthMismatch { edges: usize, values: usize },
    #[display(fmt = "invalid partition: {}", _0)]
    InvalidPartition(String),
    #[display(fmt = "unsupported configuration: {}", _0)]
    UnsupportedConfiguration(&'static str),
    #[display(fmt = "collective exchange failed: {}", _0)]
    Collective(String),
    #[display(fmt = "io error: {}", _0)]
    Io(String),
    #[display(fmt = "parse error: {}", _0)]
    Parse(String),
}

impl std::error::Error for Err {}

impl From<std::io::Error> for Err {
    fn from(e: std::io::Error) -> Self {
        Err::Io(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Err>;
