//! Return generation: a best-effort sample of orders, one item each.

use crate::config::ReturnConfig;
use crate::error::{Result, SeedError};
use crate::types::{Order, OrderItem, ReturnReason, ReturnRecord};
use crate::window::plus_days;
use rand::Rng;
use std::collections::{HashMap, HashSet};

/// Returns plus draw bookkeeping.
#[derive(Debug, Clone, Default)]
pub struct ReturnBatch {
    /// Generated returns, in acceptance order.
    pub returns: Vec<ReturnRecord>,
    /// Candidate orders drawn (`floor(orders * rate)`).
    pub draws: usize,
    /// Draws skipped because the order already had a return.
    pub skipped: usize,
}

/// Generator for the returns table.
#[derive(Debug, Clone)]
pub struct ReturnGenerator {
    rate: f64,
    min_days: i64,
    max_days: i64,
}

impl ReturnGenerator {
    /// Create a return generator.
    pub fn new(config: &ReturnConfig) -> Self {
        let min_days = config.min_days.max(0);
        Self {
            rate: config.rate,
            min_days,
            max_days: config.max_days.max(min_days),
        }
    }

    /// Number of candidate draws for `order_count` orders.
    pub fn draw_count(&self, order_count: usize) -> usize {
        (order_count as f64 * self.rate).floor() as usize
    }

    /// Draw candidate orders with replacement and emit one partial return
    /// per newly drawn order.
    ///
    /// Repeat draws are skipped rather than redrawn, so the result holds at
    /// most `draw_count` returns and usually a few less.
    pub fn generate(
        &self,
        orders: &[Order],
        items: &[OrderItem],
        rng: &mut impl Rng,
    ) -> Result<ReturnBatch> {
        let draws = self.draw_count(orders.len());
        let mut batch = ReturnBatch {
            returns: Vec::with_capacity(draws),
            draws,
            skipped: 0,
        };
        if draws == 0 {
            return Ok(batch);
        }

        let mut items_by_order: HashMap<u64, Vec<&OrderItem>> = HashMap::new();
        for item in items {
            items_by_order.entry(item.order_id).or_default().push(item);
        }

        let mut chosen = HashSet::with_capacity(draws);
        for _ in 0..draws {
            let order = &orders[rng.gen_range(0..orders.len())];
            if !chosen.insert(order.order_id) {
                batch.skipped += 1;
                continue;
            }

            let candidates = items_by_order.get(&order.order_id).ok_or_else(|| {
                SeedError::generation(format!("order {} has no line items", order.order_id))
            })?;
            let item = candidates[rng.gen_range(0..candidates.len())];
            batch.returns.push(self.generate_return(order, item, rng)?);
        }

        Ok(batch)
    }

    fn generate_return(
        &self,
        order: &Order,
        item: &OrderItem,
        rng: &mut impl Rng,
    ) -> Result<ReturnRecord> {
        let fraction = rng.gen_range(0.2..0.8);
        // Floor at one unit, never more than was ordered
        let qty = ((item.qty as f64 * fraction).round() as u32).clamp(1, item.qty.max(1));

        let reason = ReturnReason::ALL[rng.gen_range(0..ReturnReason::ALL.len())];
        let return_ts = plus_days(order.order_ts, rng.gen_range(self.min_days..=self.max_days))?;

        Ok(ReturnRecord {
            order_id: order.order_id,
            sku: item.sku.clone(),
            qty,
            reason,
            return_ts: return_ts.date(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn fixture(order_count: u64) -> (Vec<Order>, Vec<OrderItem>) {
        let ts = NaiveDate::from_ymd_opt(2025, 5, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let orders = (1..=order_count)
            .map(|order_id| Order {
                order_id,
                customer_id: 1,
                order_ts: ts,
                is_internal: false,
            })
            .collect();
        let items = (1..=order_count)
            .flat_map(|order_id| {
                (1..=(order_id % 4 + 1) as u32).map(move |n| OrderItem {
                    order_id,
                    sku: format!("SKU{:04}", n),
                    qty: n,
                    unit_price: Some(10.0),
                    unit_cost: Some(6.0),
                })
            })
            .collect();
        (orders, items)
    }

    #[test]
    fn test_at_most_one_return_per_order() {
        let gen = ReturnGenerator::new(&ReturnConfig::default());
        let (orders, items) = fixture(2200);
        let batch = gen.generate(&orders, &items, &mut StdRng::seed_from_u64(42)).unwrap();

        assert_eq!(batch.draws, 176);
        assert_eq!(batch.returns.len() + batch.skipped, batch.draws);
        assert!(batch.returns.len() <= 176);

        let unique: HashSet<u64> = batch.returns.iter().map(|r| r.order_id).collect();
        assert_eq!(unique.len(), batch.returns.len());
    }

    #[test]
    fn test_collisions_are_skipped_not_redrawn() {
        // 5 orders, 4 draws at rate 0.8: collisions are very likely and
        // must shrink the output instead of triggering extra draws
        let config = ReturnConfig {
            rate: 0.8,
            ..Default::default()
        };
        let gen = ReturnGenerator::new(&config);
        let (orders, items) = fixture(5);

        let mut saw_collision = false;
        for seed in 0..50 {
            let batch = gen
                .generate(&orders, &items, &mut StdRng::seed_from_u64(seed))
                .unwrap();
            assert_eq!(batch.draws, 4);
            assert_eq!(batch.returns.len() + batch.skipped, 4);
            saw_collision |= batch.skipped > 0;
        }
        assert!(saw_collision);
    }

    #[test]
    fn test_return_references_order_item() {
        let gen = ReturnGenerator::new(&ReturnConfig::default());
        let (orders, items) = fixture(1000);
        let batch = gen.generate(&orders, &items, &mut StdRng::seed_from_u64(9)).unwrap();

        for r in &batch.returns {
            let item = items
                .iter()
                .find(|i| i.order_id == r.order_id && i.sku == r.sku)
                .expect("returned sku must be one of the order's items");
            assert!(r.qty >= 1);
            assert!(r.qty <= item.qty);

            let days = (r.return_ts - orders[0].order_ts.date()).num_days();
            assert!((2..=30).contains(&days));
        }
    }

    #[test]
    fn test_single_unit_items_return_one() {
        // round(1 * [0.2, 0.8)) can be 0; the floor lifts it back to 1
        let gen = ReturnGenerator::new(&ReturnConfig {
            rate: 1.0,
            ..Default::default()
        });
        let (orders, mut items) = fixture(100);
        for item in &mut items {
            item.qty = 1;
        }
        let batch = gen.generate(&orders, &items, &mut StdRng::seed_from_u64(1)).unwrap();
        assert!(!batch.returns.is_empty());
        assert!(batch.returns.iter().all(|r| r.qty == 1));
    }

    #[test]
    fn test_order_without_items_is_fatal() {
        let gen = ReturnGenerator::new(&ReturnConfig {
            rate: 1.0,
            ..Default::default()
        });
        let (orders, _) = fixture(10);
        let err = gen
            .generate(&orders, &[], &mut StdRng::seed_from_u64(1))
            .unwrap_err();
        assert!(matches!(err, SeedError::Generation(_)));
    }

    #[test]
    fn test_unrepresentable_return_date_is_fatal() {
        let gen = ReturnGenerator::new(&ReturnConfig {
            rate: 1.0,
            min_days: i64::MAX,
            max_days: i64::MAX,
        });
        let (orders, items) = fixture(4);
        let err = gen
            .generate(&orders, &items, &mut StdRng::seed_from_u64(1))
            .unwrap_err();
        assert!(matches!(err, SeedError::Generation(_)));
    }
}
