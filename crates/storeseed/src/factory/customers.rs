//! Customer table generation.

use super::WeightedTable;
use crate::config::CustomerConfig;
use crate::error::{Result, SeedError};
use crate::types::{Customer, Region, Segment};
use crate::window::TimeWindow;
use chrono::{NaiveDate, TimeDelta};
use rand::Rng;

/// Generator for the customers table.
#[derive(Debug, Clone)]
pub struct CustomerGenerator {
    count: u32,
    signup_span_days: i64,
    window_start: NaiveDate,
    segments: WeightedTable<Segment>,
}

impl CustomerGenerator {
    /// Create a customer generator for the given window.
    pub fn new(config: &CustomerConfig, window: &TimeWindow) -> Result<Self> {
        let signup_span_days = config.signup_span_days.max(0);
        TimeDelta::try_days(signup_span_days)
            .and_then(|span| window.start_date().checked_add_signed(span))
            .ok_or_else(|| {
                SeedError::generation(format!(
                    "signup span of {} days is out of calendar range",
                    signup_span_days
                ))
            })?;

        Ok(Self {
            count: config.count,
            signup_span_days,
            window_start: window.start_date(),
            segments: WeightedTable::new(&Segment::WEIGHTED)?,
        })
    }

    /// Generate the full customer table with ids `1..=count`.
    pub fn generate(&self, rng: &mut impl Rng) -> Vec<Customer> {
        (1..=self.count as u64)
            .map(|customer_id| self.generate_customer(customer_id, rng))
            .collect()
    }

    /// Generate a single customer.
    fn generate_customer(&self, customer_id: u64, rng: &mut impl Rng) -> Customer {
        let signup_offset = rng.gen_range(0..=self.signup_span_days);
        let region = Region::ALL[rng.gen_range(0..Region::ALL.len())];
        let segment = self.segments.sample(rng);

        Customer {
            customer_id,
            region,
            segment,
            signup_date: self.window_start + TimeDelta::days(signup_offset),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SeedConfig;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn generator() -> (CustomerGenerator, TimeWindow) {
        let config = SeedConfig::default();
        let window = config.window().unwrap();
        (CustomerGenerator::new(&config.customers, &window).unwrap(), window)
    }

    #[test]
    fn test_generate_customers() {
        let (gen, window) = generator();
        let mut rng = StdRng::seed_from_u64(42);
        let customers = gen.generate(&mut rng);

        assert_eq!(customers.len(), 800);

        // Check IDs are dense and sequential
        for (i, c) in customers.iter().enumerate() {
            assert_eq!(c.customer_id, (i + 1) as u64);
        }

        let latest_signup = window.start_date() + TimeDelta::days(330);
        for c in &customers {
            assert!(c.signup_date >= window.start_date());
            assert!(c.signup_date <= latest_signup);
        }
    }

    #[test]
    fn test_segment_mix() {
        let (gen, _) = generator();
        let mut rng = StdRng::seed_from_u64(42);
        let customers = gen.generate(&mut rng);

        let consumers = customers
            .iter()
            .filter(|c| c.segment == Segment::Consumer)
            .count();
        let enterprise = customers
            .iter()
            .filter(|c| c.segment == Segment::Enterprise)
            .count();

        // 6:3:1 over 800 customers: ~480 consumers, ~80 enterprise
        assert!(consumers > enterprise * 3);
        assert!(enterprise > 0);

        // Every region shows up
        for region in Region::ALL {
            assert!(customers.iter().any(|c| c.region == region));
        }
    }

    #[test]
    fn test_unrepresentable_signup_span_rejected() {
        let (_, window) = generator();
        let config = CustomerConfig {
            count: 1,
            signup_span_days: i64::MAX,
        };
        assert!(CustomerGenerator::new(&config, &window).is_err());
    }
}
