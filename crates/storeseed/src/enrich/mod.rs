//! Price enrichment of order lines against the product catalog.
//!
//! Enrichment runs as a left join over named-column [`Frame`]s followed by a
//! rebuild step that collapses duplicate-named candidate columns into one
//! canonical column per field.

mod frame;
mod pricing;

pub use frame::{Cell, Frame};
pub use pricing::{lines_frame, Enrichment, EnrichmentReport, PriceEnricher, ITEM_COLUMNS};
