use crate::types::Rank;

/// Derives one RNG seed per hop.
///
/// Worker `rank` starts at `seed + rank`; after a hop that sampled `k` edges for
/// each of `n` local frontier vertices the seed moves forward by `n * k * size`.
/// This is an additive partitioning of one seed space, not a collision-proof
/// one: streams of different ranks or hops may still meet for some inputs.
/// It is fully deterministic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedScheduler {
    seed: u64,
    size: u64,
}

impl SeedScheduler {
    pub fn new(seed: u64, rank: Rank, size: usize) -> Self {
        Self {
            seed: seed.wrapping_add(rank as u64),
            size: size as u64,
        }
    }

    /// The seed of the coming hop.
    pub fn current(&self) -> u64 {
        self.seed
    }

    /// Moves past a hop over `frontier_len` vertices with fan-out `k`.
    ///
    /// Hops gathering every neighbor (`k <= 0`) consume no randomness.
    pub fn advance(&mut self, frontier_len: usize, k: i32) {
        if k > 0 {
            self.seed = self.seed.wrapping_add(
                (frontier_len as u64)
                    .wrapping_mul(k as u64)
                    .wrapping_mul(self.size),
            );
        }
    }
}
