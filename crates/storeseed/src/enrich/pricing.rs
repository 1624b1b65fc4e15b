//! Point-in-time pricing of order lines.

use super::{Cell, Frame};
use crate::error::{Result, SeedError};
use crate::types::{OrderItem, OrderLine, Product};
use tracing::{debug, warn};

/// Canonical order_items columns, in output order.
pub const ITEM_COLUMNS: [&str; 5] = ["order_id", "sku", "qty", "unit_price", "unit_cost"];

/// Priced items plus what the rebuild step had to resolve.
#[derive(Debug, Clone, Default)]
pub struct Enrichment {
    /// One item per input line, input order preserved.
    pub items: Vec<OrderItem>,
    /// Resolution report.
    pub report: EnrichmentReport,
}

/// Summary of an enrichment run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EnrichmentReport {
    /// Lines enriched.
    pub rows: usize,
    /// `(order_id, sku)` of lines whose SKU had no catalog match.
    pub unresolved: Vec<(u64, String)>,
    /// Surplus same-field columns dropped by the rebuild.
    pub duplicate_columns: usize,
}

impl EnrichmentReport {
    /// Check if every line resolved and no duplicate columns were seen.
    pub fn is_clean(&self) -> bool {
        self.unresolved.is_empty() && self.duplicate_columns == 0
    }
}

/// Attaches catalog price and cost to order lines.
#[derive(Debug, Clone)]
pub struct PriceEnricher {
    catalog: Frame,
}

impl PriceEnricher {
    /// Build the catalog side of the join.
    pub fn new(products: &[Product]) -> Self {
        let mut catalog = Frame::new(["sku", "price", "cost"]);
        for p in products {
            catalog.push_row_unchecked(vec![
                Cell::Text(p.sku.clone()),
                Cell::Float(p.price),
                Cell::Float(p.cost),
            ]);
        }
        Self { catalog }
    }

    /// Price freshly generated order lines.
    pub fn enrich(&self, lines: &[OrderLine]) -> Result<Enrichment> {
        self.enrich_frame(&lines_frame(lines))
    }

    /// Price an arbitrary line frame.
    ///
    /// The frame needs `order_id`, `sku` and `qty` columns and may already
    /// carry `unit_price`/`unit_cost` columns from an earlier partial
    /// enrichment; the freshly joined catalog columns sit rightmost and win.
    pub fn enrich_frame(&self, lines: &Frame) -> Result<Enrichment> {
        let mut joined = lines.left_join(&self.catalog, "sku")?;
        joined.rename("price", "unit_price");
        joined.rename("cost", "unit_cost");
        rebuild_items(&joined)
    }
}

/// Frame with `order_id`, `sku`, `qty` columns for the given lines.
pub fn lines_frame(lines: &[OrderLine]) -> Frame {
    let mut frame = Frame::new(["order_id", "sku", "qty"]);
    for line in lines {
        frame.push_row_unchecked(vec![
            Cell::Int(line.order_id as i64),
            Cell::Text(line.sku.clone()),
            Cell::Int(line.qty as i64),
        ]);
    }
    frame
}

/// Rebuild items with exactly one column per field.
///
/// For every field the rightmost candidate column (exact name or `name.N`)
/// supplies the value. A `Null` price or cost stays `None`; it is reported,
/// never replaced by zero.
pub fn rebuild_items(frame: &Frame) -> Result<Enrichment> {
    let mut positions = [0usize; ITEM_COLUMNS.len()];
    let mut duplicate_columns = 0;
    for (slot, field) in positions.iter_mut().zip(ITEM_COLUMNS) {
        let candidates = frame.candidate_columns(field);
        *slot = *candidates
            .last()
            .ok_or_else(|| SeedError::generation(format!("enrichment lost the '{}' column", field)))?;
        duplicate_columns += candidates.len() - 1;
    }
    let [order_id_col, sku_col, qty_col, price_col, cost_col] = positions;

    if duplicate_columns > 0 {
        debug!(
            duplicate_columns,
            columns = ?frame.columns(),
            "Resolved duplicate price columns to the rightmost candidate"
        );
    }

    let mut enrichment = Enrichment {
        items: Vec::with_capacity(frame.len()),
        report: EnrichmentReport {
            rows: frame.len(),
            unresolved: Vec::new(),
            duplicate_columns,
        },
    };

    for (row_idx, row) in frame.rows().iter().enumerate() {
        let order_id = row[order_id_col]
            .as_i64()
            .and_then(|v| u64::try_from(v).ok())
            .ok_or_else(|| invalid_cell(row_idx, "order_id", &row[order_id_col]))?;
        let sku = row[sku_col]
            .as_text()
            .ok_or_else(|| invalid_cell(row_idx, "sku", &row[sku_col]))?
            .to_string();
        let qty = row[qty_col]
            .as_i64()
            .and_then(|v| u32::try_from(v).ok())
            .ok_or_else(|| invalid_cell(row_idx, "qty", &row[qty_col]))?;

        let item = OrderItem {
            order_id,
            sku,
            qty,
            unit_price: row[price_col].as_f64(),
            unit_cost: row[cost_col].as_f64(),
        };

        if !item.is_priced() {
            warn!(order_id, sku = %item.sku, "SKU has no catalog price; leaving price/cost empty");
            enrichment.report.unresolved.push((order_id, item.sku.clone()));
        }
        enrichment.items.push(item);
    }

    Ok(enrichment)
}

fn invalid_cell(row: usize, field: &str, cell: &Cell) -> SeedError {
    SeedError::generation(format!("row {}: invalid {} value {:?}", row, field, cell))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Category;

    fn products() -> Vec<Product> {
        vec![
            Product {
                sku: "SKU0001".into(),
                category: Category::Doors,
                price: 400.0,
                cost: 250.0,
            },
            Product {
                sku: "SKU0002".into(),
                category: Category::Hardware,
                price: 60.5,
                cost: 40.25,
            },
        ]
    }

    fn line(order_id: u64, sku: &str, qty: u32) -> OrderLine {
        OrderLine {
            order_id,
            sku: sku.into(),
            qty,
        }
    }

    #[test]
    fn test_prices_copied_from_catalog() {
        let enricher = PriceEnricher::new(&products());
        let lines = vec![line(1, "SKU0002", 3), line(1, "SKU0001", 1), line(2, "SKU0002", 2)];

        let enrichment = enricher.enrich(&lines).unwrap();
        assert!(enrichment.report.is_clean());
        assert_eq!(enrichment.items.len(), 3);

        let first = &enrichment.items[0];
        assert_eq!(first.order_id, 1);
        assert_eq!(first.sku, "SKU0002");
        assert_eq!(first.qty, 3);
        assert_eq!(first.unit_price, Some(60.5));
        assert_eq!(first.unit_cost, Some(40.25));
        assert_eq!(enrichment.items[1].unit_price, Some(400.0));
    }

    #[test]
    fn test_duplicate_sku_lines_kept() {
        let enricher = PriceEnricher::new(&products());
        let lines = vec![line(1, "SKU0001", 1), line(1, "SKU0001", 2)];

        let items = enricher.enrich(&lines).unwrap().items;
        assert_eq!(items.len(), 2);
        assert!(items.iter().all(|i| i.unit_price == Some(400.0)));
    }

    #[test]
    fn test_unmatched_sku_surfaces_as_missing() {
        let enricher = PriceEnricher::new(&products());
        let lines = vec![line(7, "SKU9999", 2), line(7, "SKU0001", 1)];

        let enrichment = enricher.enrich(&lines).unwrap();
        let missing = &enrichment.items[0];
        assert_eq!(missing.unit_price, None);
        assert_eq!(missing.unit_cost, None);
        assert!(!missing.is_priced());
        assert_eq!(enrichment.report.unresolved, vec![(7, "SKU9999".to_string())]);
        assert!(enrichment.items[1].is_priced());
    }

    #[test]
    fn test_prior_partial_enrichment_is_overridden() {
        // A frame that already went through a stale enrichment
        let mut stale = Frame::new(["order_id", "sku", "qty", "unit_price", "unit_cost"]);
        stale
            .push_row(vec![
                Cell::Int(1),
                Cell::Text("SKU0001".into()),
                Cell::Int(2),
                Cell::Float(1.0),
                Cell::Float(0.5),
            ])
            .unwrap();

        let enricher = PriceEnricher::new(&products());
        let enrichment = enricher.enrich_frame(&stale).unwrap();

        assert_eq!(enrichment.report.duplicate_columns, 2);
        assert_eq!(enrichment.items.len(), 1);
        assert_eq!(enrichment.items[0].unit_price, Some(400.0));
        assert_eq!(enrichment.items[0].unit_cost, Some(250.0));
    }

    #[test]
    fn test_suffixed_duplicate_headers_take_last() {
        let mut frame = Frame::new([
            "order_id",
            "sku",
            "qty",
            "unit_price",
            "unit_cost",
            "unit_price.1",
            "unit_cost.1",
        ]);
        frame
            .push_row(vec![
                Cell::Int(4),
                Cell::Text("SKU0002".into()),
                Cell::Float(3.0),
                Cell::Float(11.0),
                Cell::Float(7.0),
                Cell::Float(12.0),
                Cell::Int(8),
            ])
            .unwrap();

        let enrichment = rebuild_items(&frame).unwrap();
        let item = &enrichment.items[0];
        assert_eq!(item.qty, 3);
        assert_eq!(item.unit_price, Some(12.0));
        assert_eq!(item.unit_cost, Some(8.0));
        assert_eq!(enrichment.report.duplicate_columns, 2);
    }

    #[test]
    fn test_rightmost_null_is_not_backfilled() {
        let mut frame = Frame::new(["order_id", "sku", "qty", "unit_price", "unit_cost", "unit_price"]);
        frame
            .push_row(vec![
                Cell::Int(1),
                Cell::Text("SKU0001".into()),
                Cell::Int(1),
                Cell::Float(10.0),
                Cell::Float(5.0),
                Cell::Null,
            ])
            .unwrap();

        let enrichment = rebuild_items(&frame).unwrap();
        assert_eq!(enrichment.items[0].unit_price, None);
        assert_eq!(enrichment.report.unresolved.len(), 1);
    }

    #[test]
    fn test_bad_cells_are_fatal() {
        let mut frame = Frame::new(ITEM_COLUMNS);
        frame
            .push_row(vec![
                Cell::Text("x".into()),
                Cell::Text("SKU0001".into()),
                Cell::Int(1),
                Cell::Null,
                Cell::Null,
            ])
            .unwrap();
        assert!(rebuild_items(&frame).is_err());

        let missing_qty = Frame::new(["order_id", "sku", "unit_price", "unit_cost"]);
        assert!(rebuild_items(&missing_qty).is_err());
    }
}
