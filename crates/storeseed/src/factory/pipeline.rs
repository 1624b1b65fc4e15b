//! Staged generation run: customers, catalog, orders, pricing, shipments,
//! returns, in that order, all drawing from one seeded random source.

use super::{
    CustomerGenerator, OrderGenerator, ProductCatalogGenerator, ReturnGenerator,
    ShipmentGenerator,
};
use crate::config::SeedConfig;
use crate::enrich::{EnrichmentReport, PriceEnricher};
use crate::error::Result;
use crate::types::{Customer, Order, OrderItem, Product, ReturnRecord, Shipment};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Instant;
use tracing::{debug, info, warn};

/// The six generated tables.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    /// customers table.
    pub customers: Vec<Customer>,
    /// products table.
    pub products: Vec<Product>,
    /// orders table.
    pub orders: Vec<Order>,
    /// order_items table.
    pub order_items: Vec<OrderItem>,
    /// shipments table.
    pub shipments: Vec<Shipment>,
    /// returns table.
    pub returns: Vec<ReturnRecord>,
}

/// Statistics about a generation run.
#[derive(Debug, Clone, Default)]
pub struct SeedStats {
    /// Seed the run used.
    pub seed: u64,
    /// Customers generated.
    pub customers: usize,
    /// Products generated.
    pub products: usize,
    /// Orders generated.
    pub orders: usize,
    /// Order items generated.
    pub order_items: usize,
    /// Shipments generated.
    pub shipments: usize,
    /// Returns generated.
    pub returns: usize,
    /// Orders flagged internal.
    pub internal_orders: usize,
    /// Shipments still in transit.
    pub in_transit: usize,
    /// Return candidate draws.
    pub return_draws: usize,
    /// Return draws skipped as repeats.
    pub skipped_return_draws: usize,
    /// Enrichment outcome.
    pub enrichment: EnrichmentReport,
    /// Wall time of the run in milliseconds.
    pub elapsed_ms: f64,
}

impl SeedStats {
    /// Fraction of orders flagged internal.
    pub fn internal_rate(&self) -> f64 {
        ratio(self.internal_orders, self.orders)
    }

    /// Returns per order.
    pub fn return_rate(&self) -> f64 {
        ratio(self.returns, self.orders)
    }
}

fn ratio(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64
    }
}

impl std::fmt::Display for SeedStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "  Seed:         {}", self.seed)?;
        writeln!(f, "  Customers:    {}", self.customers)?;
        writeln!(f, "  Products:     {}", self.products)?;
        writeln!(
            f,
            "  Orders:       {} ({} internal, {:.1}%)",
            self.orders,
            self.internal_orders,
            self.internal_rate() * 100.0
        )?;
        writeln!(
            f,
            "  Order items:  {} ({} unpriced)",
            self.order_items,
            self.enrichment.unresolved.len()
        )?;
        writeln!(
            f,
            "  Shipments:    {} ({} in transit)",
            self.shipments, self.in_transit
        )?;
        writeln!(
            f,
            "  Returns:      {} of {} draws ({} repeats skipped, {:.1}% of orders)",
            self.returns,
            self.return_draws,
            self.skipped_return_draws,
            self.return_rate() * 100.0
        )?;
        writeln!(f, "  Elapsed:      {:.1} ms", self.elapsed_ms)?;
        Ok(())
    }
}

/// Result of a pipeline run.
#[derive(Debug, Clone)]
pub struct SeedOutput {
    /// Generated tables.
    pub dataset: Dataset,
    /// Run statistics.
    pub stats: SeedStats,
}

/// Runs every generation stage in dependency order.
#[derive(Debug, Clone)]
pub struct SeedPipeline {
    config: SeedConfig,
}

impl SeedPipeline {
    /// Create a pipeline; the configuration is validated up front.
    pub fn new(config: SeedConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Run with a fresh random source seeded from the configuration.
    pub fn run(&self) -> Result<SeedOutput> {
        let mut rng = StdRng::seed_from_u64(self.config.seed);
        self.run_with(&mut rng)
    }

    /// Run drawing from the given random source.
    pub fn run_with(&self, rng: &mut impl Rng) -> Result<SeedOutput> {
        let started = Instant::now();
        let config = &self.config;
        let window = config.window()?;
        debug!(
            seed = config.seed,
            start = %window.start,
            end = %window.end,
            "Starting generation run"
        );

        let customers = CustomerGenerator::new(&config.customers, &window)?.generate(rng);
        info!(rows = customers.len(), "Generated customers");

        let products = ProductCatalogGenerator::new(&config.products)?.generate(rng);
        info!(rows = products.len(), "Generated products");

        let batch = OrderGenerator::new(
            &config.orders,
            &window,
            customers.len() as u32,
            products.len() as u32,
        )?
        .generate(rng);
        info!(
            orders = batch.orders.len(),
            lines = batch.lines.len(),
            "Generated orders"
        );

        let enrichment = PriceEnricher::new(&products).enrich(&batch.lines)?;
        if !enrichment.report.unresolved.is_empty() {
            warn!(
                unresolved = enrichment.report.unresolved.len(),
                "Order items left without catalog price"
            );
        }
        info!(rows = enrichment.items.len(), "Priced order items");

        let shipments = ShipmentGenerator::new(&config.shipments).generate(&batch.orders, rng)?;
        info!(rows = shipments.len(), "Generated shipments");

        let returns =
            ReturnGenerator::new(&config.returns).generate(&batch.orders, &enrichment.items, rng)?;
        info!(
            rows = returns.returns.len(),
            draws = returns.draws,
            skipped = returns.skipped,
            "Generated returns"
        );
        if returns.skipped > 0 {
            warn!(
                skipped = returns.skipped,
                draws = returns.draws,
                "Return draws landed on already-returned orders and were not redrawn"
            );
        }

        let dataset = Dataset {
            customers,
            products,
            orders: batch.orders,
            order_items: enrichment.items,
            shipments,
            returns: returns.returns,
        };

        let stats = SeedStats {
            seed: config.seed,
            customers: dataset.customers.len(),
            products: dataset.products.len(),
            orders: dataset.orders.len(),
            order_items: dataset.order_items.len(),
            shipments: dataset.shipments.len(),
            returns: dataset.returns.len(),
            internal_orders: dataset.orders.iter().filter(|o| o.is_internal).count(),
            in_transit: dataset.shipments.iter().filter(|s| s.is_in_transit()).count(),
            return_draws: returns.draws,
            skipped_return_draws: returns.skipped,
            enrichment: enrichment.report,
            elapsed_ms: started.elapsed().as_secs_f64() * 1000.0,
        };

        Ok(SeedOutput { dataset, stats })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_config() -> SeedConfig {
        let mut config = SeedConfig::default();
        config.customers.count = 50;
        config.products.count = 20;
        config.orders.count = 300;
        config
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = SeedConfig::default();
        config.products.count = 0;
        assert!(SeedPipeline::new(config).is_err());
    }

    #[test]
    fn test_out_of_range_days_rejected_before_run() {
        let mut huge_age = small_config();
        huge_age.orders.age_mean_days = 1e12;

        let mut huge_return = small_config();
        huge_return.returns.max_days = i64::MAX;

        let mut huge_window = small_config();
        huge_window.window_days = i64::MAX / 2;

        for config in [huge_age, huge_return, huge_window] {
            let err = SeedPipeline::new(config).unwrap_err();
            assert!(matches!(err, crate::error::SeedError::Config(_)));
        }
    }

    #[test]
    fn test_run_counts() {
        let output = SeedPipeline::new(small_config()).unwrap().run().unwrap();
        let stats = &output.stats;

        assert_eq!(stats.customers, 50);
        assert_eq!(stats.products, 20);
        assert_eq!(stats.orders, 300);
        assert_eq!(stats.shipments, 300);
        assert!((300..=1200).contains(&stats.order_items));
        assert_eq!(stats.return_draws, 24);
        assert_eq!(stats.returns + stats.skipped_return_draws, 24);
        assert!(stats.enrichment.is_clean());
    }

    #[test]
    fn test_same_seed_same_dataset() {
        let pipeline = SeedPipeline::new(small_config()).unwrap();
        let a = pipeline.run().unwrap().dataset;
        let b = pipeline.run().unwrap().dataset;

        assert_eq!(a.customers, b.customers);
        assert_eq!(a.products, b.products);
        assert_eq!(a.orders, b.orders);
        assert_eq!(a.order_items, b.order_items);
        assert_eq!(a.shipments, b.shipments);
        assert_eq!(a.returns, b.returns);
    }

    #[test]
    fn test_different_seed_different_dataset() {
        let a = SeedPipeline::new(small_config()).unwrap().run().unwrap();
        let mut other = small_config();
        other.seed = 43;
        let b = SeedPipeline::new(other).unwrap().run().unwrap();

        assert_ne!(a.dataset.orders, b.dataset.orders);
    }

    #[test]
    fn test_stats_display() {
        let output = SeedPipeline::new(small_config()).unwrap().run().unwrap();
        let text = output.stats.to_string();
        assert!(text.contains("Orders:       300"));
        assert!(text.contains("Shipments:    300"));
        assert!(text.contains(&format!(
            "{:.1}% of orders",
            output.stats.return_rate() * 100.0
        )));
    }
}
