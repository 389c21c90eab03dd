//! Discrete size distributions, built once per field.

use rand::{
    Rng,
    distr::{
        Distribution,
        weighted::{self, WeightedIndex},
    },
};

/// Triangular weighted table: bucket `v` has weight `3v` and yields `top - v`.
#[derive(Debug, Clone)]
pub struct SizeTable {
    values: Vec<f32>,
    index: WeightedIndex<u32>,
}

impl SizeTable {
    /// Build a table over `buckets` buckets.
    pub fn triangular(buckets: u32, top: u32) -> Result<Self, weighted::Error> {
        let values = (0..buckets).map(|v| top.saturating_sub(v) as f32).collect();
        let index = WeightedIndex::new((0..buckets).map(|v| v * 3))?;
        Ok(Self { values, index })
    }

    /// Snow flake size offsets, 1..=15.
    pub fn snow() -> Result<Self, weighted::Error> {
        Self::triangular(16, 16)
    }

    /// Cloud width divisors, 2..=10.
    pub fn cloud() -> Result<Self, weighted::Error> {
        Self::triangular(10, 11)
    }

    /// Draw one value.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f32 {
        self.values[self.index.sample(rng)]
    }
}
