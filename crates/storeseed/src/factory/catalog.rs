//! Product catalog generation.

use super::{round_cents, WeightedTable};
use crate::config::CatalogConfig;
use crate::error::Result;
use crate::types::{sku_code, Category, Product};
use rand::Rng;

/// Price spread around the category base price.
const PRICE_FACTOR: std::ops::Range<f64> = 0.9..1.2;

/// Cost as a fraction of price.
const COST_FACTOR: std::ops::Range<f64> = 0.55..0.8;

/// Generator for the products table.
#[derive(Debug, Clone)]
pub struct ProductCatalogGenerator {
    count: u32,
    categories: WeightedTable<Category>,
}

impl ProductCatalogGenerator {
    /// Create a catalog generator.
    pub fn new(config: &CatalogConfig) -> Result<Self> {
        Ok(Self {
            count: config.count,
            categories: WeightedTable::new(&Category::WEIGHTED)?,
        })
    }

    /// Generate the full catalog, SKUs `SKU0001..`.
    pub fn generate(&self, rng: &mut impl Rng) -> Vec<Product> {
        (1..=self.count)
            .map(|index| self.generate_product(index, rng))
            .collect()
    }

    fn generate_product(&self, index: u32, rng: &mut impl Rng) -> Product {
        let category = self.categories.sample(rng);
        let price = round_cents(category.base_price() * rng.gen_range(PRICE_FACTOR));
        let cost = round_cents(price * rng.gen_range(COST_FACTOR));

        Product {
            sku: sku_code(index),
            category,
            price,
            cost,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn catalog(count: u32) -> Vec<Product> {
        let gen = ProductCatalogGenerator::new(&CatalogConfig { count }).unwrap();
        gen.generate(&mut StdRng::seed_from_u64(42))
    }

    #[test]
    fn test_cost_below_price() {
        for p in catalog(2000) {
            assert!(p.cost < p.price, "{} cost {} >= price {}", p.sku, p.cost, p.price);
            assert!(p.cost > 0.0);
        }
    }

    #[test]
    fn test_price_ranges_per_category() {
        for p in catalog(2000) {
            let base = p.category.base_price();
            assert!(p.price >= base * 0.9 - 0.005, "{:?}", p);
            assert!(p.price <= base * 1.2 + 0.005, "{:?}", p);
            if p.category == Category::Doors {
                assert!((360.0..=480.0).contains(&p.price), "{:?}", p);
            }
        }
    }

    #[test]
    fn test_sku_sequence_and_rounding() {
        let products = catalog(150);
        assert_eq!(products.len(), 150);
        assert_eq!(products[0].sku, "SKU0001");
        assert_eq!(products[149].sku, "SKU0150");

        for p in &products {
            assert_eq!(round_cents(p.price), p.price);
            assert_eq!(round_cents(p.cost), p.cost);
        }
    }

    #[test]
    fn test_category_weights() {
        let products = catalog(2000);
        let doors = products
            .iter()
            .filter(|p| p.category == Category::Doors)
            .count();
        let accessories = products
            .iter()
            .filter(|p| p.category == Category::Accessories)
            .count();

        // 4:1 ratio, expected ~800 vs ~200
        assert!(doors > accessories * 2);
    }
}
