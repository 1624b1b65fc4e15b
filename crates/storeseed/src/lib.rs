//! storeseed
//!
//! Seeded generator for a referentially consistent storefront dataset:
//! customers, products, orders, order line items, shipments and returns.
//!
//! # Pipeline
//!
//! Stages run in strict dependency order and share one seeded random source,
//! so the same seed always yields byte-identical tables:
//!
//! 1. **Customers** and **products** (leaf tables)
//! 2. **Orders** with unpriced line items
//! 3. **Price enrichment**: left join against the catalog, duplicate-named
//!    price columns collapsed to the rightmost candidate
//! 4. **Shipments**, exactly one per order
//! 5. **Returns**, at most one per order, best-effort 8% sample
//!
//! # Example
//!
//! ```ignore
//! use storeseed::{DatasetWriter, SeedConfig, SeedPipeline};
//!
//! let config = SeedConfig::default();
//! let output = SeedPipeline::new(config.clone())?.run()?;
//! DatasetWriter::from_config(&config.output).write(&output.dataset)?;
//! ```

pub mod config;
pub mod enrich;
pub mod error;
pub mod factory;
pub mod output;
pub mod types;
pub mod verify;
pub mod window;

pub use config::SeedConfig;
pub use enrich::{EnrichmentReport, PriceEnricher};
pub use error::{Result, SeedError};
pub use factory::{
    CustomerGenerator, Dataset, OrderGenerator, ProductCatalogGenerator, ReturnGenerator,
    SeedOutput, SeedPipeline, SeedStats, ShipmentGenerator, WeightedTable,
};
pub use output::{render_schema, DatasetWriter};
pub use types::{
    Carrier, Category, Customer, Order, OrderItem, OrderLine, Product, Region, ReturnReason,
    ReturnRecord, Segment, Shipment,
};
pub use verify::{IntegrityChecker, IntegrityReport, Violation};
pub use window::TimeWindow;
