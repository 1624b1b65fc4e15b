//! Weighted choice over a fixed value set.

use crate::error::{Result, SeedError};
use rand::Rng;

/// Cumulative-weight table sampled with a single uniform draw.
#[derive(Debug, Clone)]
pub struct WeightedTable<T> {
    values: Vec<T>,
    /// Running weight totals; strictly increasing, last entry is the total.
    cumulative: Vec<u32>,
}

impl<T: Copy> WeightedTable<T> {
    /// Build a table from `(value, weight)` pairs.
    ///
    /// Zero weights are allowed for individual entries (they are never drawn)
    /// but the total must be positive.
    pub fn new(weights: &[(T, u32)]) -> Result<Self> {
        let mut values = Vec::with_capacity(weights.len());
        let mut cumulative = Vec::with_capacity(weights.len());
        let mut total: u32 = 0;

        for &(value, weight) in weights {
            if weight == 0 {
                continue;
            }
            total = total
                .checked_add(weight)
                .ok_or_else(|| SeedError::generation("weight table total overflows u32"))?;
            values.push(value);
            cumulative.push(total);
        }

        if total == 0 {
            return Err(SeedError::generation(
                "weight table needs at least one positive weight",
            ));
        }

        Ok(Self { values, cumulative })
    }

    /// Sum of all weights.
    pub fn total(&self) -> u32 {
        self.cumulative.last().copied().unwrap_or(0)
    }

    /// Draw one value.
    pub fn sample(&self, rng: &mut impl Rng) -> T {
        let roll = rng.gen_range(0..self.total());
        // First bucket whose running total exceeds the roll
        let idx = self.cumulative.partition_point(|&c| c <= roll);
        self.values[idx]
    }
}
