/// Per-invocation sampling parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleOptions {
    /// Edges to sample per vertex at each hop; a non-positive entry takes every neighbor.
    pub fan_out: Vec<i32>,
    pub with_replacement: bool,
    pub seed: u64,
}

impl Default for SampleOptions {
    fn default() -> Self {
        Self {
            fan_out: Vec::new(),
            with_replacement: true,
            seed: 0,
        }
    }
}

impl SampleOptions {
    pub fn new(fan_out: Vec<i32>) -> Self {
        Self {
            fan_out,
            ..Self::default()
        }
    }

    pub fn with_replacement(mut self, with_replacement: bool) -> Self {
        self.with_replacement = with_replacement;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}
