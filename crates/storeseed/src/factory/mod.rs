//! Stage generators for the synthetic storefront dataset.
//!
//! Each generator owns its validated parameters and draws from a random
//! source passed in by the caller, so one seeded generator can be threaded
//! through all stages in a fixed order.

mod catalog;
mod customers;
mod orders;
mod pipeline;
mod returns;
mod shipments;
mod weighted;

pub use catalog::ProductCatalogGenerator;
pub use customers::CustomerGenerator;
pub use orders::{OrderBatch, OrderGenerator};
pub use pipeline::{Dataset, SeedOutput, SeedPipeline, SeedStats};
pub use returns::{ReturnBatch, ReturnGenerator};
pub use shipments::ShipmentGenerator;
pub use weighted::WeightedTable;

/// Round to two decimal places (cents).
pub(crate) fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
