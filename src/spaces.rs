//! Action and observation spaces

use rand::Rng;

use crate::sim::Observation;

/// A finite set of actions `{0, 1, .., n - 1}`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Discrete {
    pub n: usize,
}

impl Discrete {
    pub const fn new(n: usize) -> Self {
        Self { n }
    }

    /// Uniformly sample an action index
    pub fn sample<R: Rng>(&self, rng: &mut R) -> usize {
        rng.random_range(0..self.n)
    }

    pub fn contains(&self, index: usize) -> bool {
        index < self.n
    }
}

/// Bounds of every observed coordinate (inclusive on both ends)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObservationSpace {
    pub low: i32,
    pub high: i32,
}

impl ObservationSpace {
    pub const fn new(low: i32, high: i32) -> Self {
        Self { low, high }
    }

    pub fn contains(&self, obs: &Observation) -> bool {
        obs.to_array()
            .iter()
            .all(|&v| (self.low..=self.high).contains(&v))
    }
}
