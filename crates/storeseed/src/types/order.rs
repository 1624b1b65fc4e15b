//! Order and line item types.

use chrono::NaiveDateTime;

/// A row of the orders table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    /// Dense identifier starting at 1.
    pub order_id: u64,
    /// Ordering customer.
    pub customer_id: u64,
    /// When the order was placed.
    pub order_ts: NaiveDateTime,
    /// Internal (staff or test) order.
    pub is_internal: bool,
}

/// A line item as produced by the order stage, before pricing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderLine {
    /// Owning order.
    pub order_id: u64,
    /// Ordered product.
    pub sku: String,
    /// Quantity ordered.
    pub qty: u32,
}

/// A row of the order_items table: a line item with its resolved price.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderItem {
    /// Owning order.
    pub order_id: u64,
    /// Ordered product.
    pub sku: String,
    /// Quantity ordered.
    pub qty: u32,
    /// Catalog price at generation time, `None` if the SKU did not resolve.
    pub unit_price: Option<f64>,
    /// Catalog cost at generation time, `None` if the SKU did not resolve.
    pub unit_cost: Option<f64>,
}

impl OrderItem {
    /// Check if both price and cost resolved.
    pub fn is_priced(&self) -> bool {
        self.unit_price.is_some() && self.unit_cost.is_some()
    }
}
