//! Order and line item generation.

use crate::config::OrderConfig;
use crate::error::{Result, SeedError};
use crate::types::{sku_code, Order, OrderLine};
use crate::window::TimeWindow;
use chrono::TimeDelta;
use rand::Rng;
use rand_distr::{Distribution, Normal};

/// Orders together with their unpriced line items.
#[derive(Debug, Clone, Default)]
pub struct OrderBatch {
    /// Generated orders, ids `1..=count`.
    pub orders: Vec<Order>,
    /// Line items in order id order; pricing happens in the enrichment stage.
    pub lines: Vec<OrderLine>,
}

/// Generator for orders and their line items.
#[derive(Debug, Clone)]
pub struct OrderGenerator {
    count: u32,
    customer_count: u32,
    product_count: u32,
    /// Order age in days is folded from this distribution.
    age: Normal<f64>,
    internal_rate: f64,
    max_items: u32,
    max_qty: u32,
    window: TimeWindow,
}

impl OrderGenerator {
    /// Create an order generator drawing from customers `1..=customer_count`
    /// and catalog indices `1..=product_count`.
    pub fn new(
        config: &OrderConfig,
        window: &TimeWindow,
        customer_count: u32,
        product_count: u32,
    ) -> Result<Self> {
        if customer_count == 0 {
            return Err(SeedError::generation("order generation needs a non-empty customer pool"));
        }
        if product_count == 0 {
            return Err(SeedError::generation("order generation needs a non-empty product pool"));
        }
        if config.max_items == 0 || config.max_qty == 0 {
            return Err(SeedError::generation("max_items and max_qty must be at least 1"));
        }
        if !config.age_mean_days.is_finite() {
            return Err(SeedError::generation(format!(
                "order age mean must be finite, got {}",
                config.age_mean_days
            )));
        }
        // Normal::new only rejects a non-finite std
        if !config.age_std_days.is_finite() || config.age_std_days < 0.0 {
            return Err(SeedError::generation(format!(
                "order age std must be finite and >= 0, got {}",
                config.age_std_days
            )));
        }

        Ok(Self {
            count: config.count,
            customer_count,
            product_count,
            age: Normal::new(config.age_mean_days, config.age_std_days)?,
            internal_rate: config.internal_rate,
            max_items: config.max_items,
            max_qty: config.max_qty,
            window: *window,
        })
    }

    /// Generate all orders and their line items.
    pub fn generate(&self, rng: &mut impl Rng) -> OrderBatch {
        let mut batch = OrderBatch {
            orders: Vec::with_capacity(self.count as usize),
            lines: Vec::with_capacity(self.count as usize * 2),
        };

        for order_id in 1..=self.count as u64 {
            let order = self.generate_order(order_id, rng);
            self.generate_lines(order_id, rng, &mut batch.lines);
            batch.orders.push(order);
        }

        batch
    }

    fn generate_order(&self, order_id: u64, rng: &mut impl Rng) -> Order {
        let customer_id = rng.gen_range(1..=self.customer_count as u64);

        // |N(mean, std)| skews towards recent orders with a long tail;
        // anything older than the window lands on its start
        let age = self.age.sample(rng).abs().trunc();
        let days_back = if age.is_finite() {
            (age as i64).min(self.window.days())
        } else {
            self.window.days()
        };
        let order_ts = self.window.end - TimeDelta::days(days_back);

        let is_internal = rng.gen::<f64>() < self.internal_rate;

        Order {
            order_id,
            customer_id,
            order_ts,
            is_internal,
        }
    }

    fn generate_lines(&self, order_id: u64, rng: &mut impl Rng, out: &mut Vec<OrderLine>) {
        let line_count = rng.gen_range(1..=self.max_items);
        for _ in 0..line_count {
            let index = rng.gen_range(1..=self.product_count);
            let qty = rng.gen_range(1..=self.max_qty);
            // Repeated SKUs within an order are kept as separate lines
            out.push(OrderLine {
                order_id,
                sku: sku_code(index),
                qty,
            });
        }
    }
}
