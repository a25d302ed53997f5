//! Various types related to neighbor sampling.

/// The vertex id type.
pub type VId = i64;

/// The edge id type.
pub type EId = i64;

/// The edge type.
pub type EType = i32;

/// The edge weight type.
pub type Weight = f64;

/// The label attached to a frontier vertex (e.g. a batch id).
pub type Label = i32;

/// The hop index.
pub type Hop = u32;

/// The rank of a worker.
pub type Rank = usize;
