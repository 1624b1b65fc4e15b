//! Flushing a dataset to delimited tables and the matching DDL.

mod csv;
mod schema;

pub use self::csv::{render_table, DatasetWriter, WrittenTable, SCHEMA_FILE};
pub use schema::{render_schema, ColumnDef, ColumnType, TableSchema, TABLES};

use crate::types::{Customer, Order, OrderItem, Product, ReturnRecord, Shipment};
use crate::window::{format_date, format_timestamp};

/// A record that can be flushed as one row of a table.
pub trait TableRow {
    /// Schema of the table this row belongs to.
    fn schema() -> &'static TableSchema;

    /// Cell text in schema column order; empty string for null.
    fn cells(&self) -> Vec<String>;
}

fn money(value: f64) -> String {
    format!("{:.2}", value)
}

fn flag(value: bool) -> String {
    u8::from(value).to_string()
}

impl TableRow for Customer {
    fn schema() -> &'static TableSchema {
        &schema::CUSTOMERS
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.customer_id.to_string(),
            self.region.name().to_string(),
            self.segment.name().to_string(),
            format_date(self.signup_date),
        ]
    }
}

impl TableRow for Product {
    fn schema() -> &'static TableSchema {
        &schema::PRODUCTS
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.sku.clone(),
            self.category.name().to_string(),
            money(self.price),
            money(self.cost),
        ]
    }
}

impl TableRow for Order {
    fn schema() -> &'static TableSchema {
        &schema::ORDERS
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.order_id.to_string(),
            self.customer_id.to_string(),
            format_timestamp(self.order_ts),
            flag(self.is_internal),
        ]
    }
}

impl TableRow for OrderItem {
    fn schema() -> &'static TableSchema {
        &schema::ORDER_ITEMS
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.order_id.to_string(),
            self.sku.clone(),
            self.qty.to_string(),
            self.unit_price.map(money).unwrap_or_default(),
            self.unit_cost.map(money).unwrap_or_default(),
        ]
    }
}

impl TableRow for Shipment {
    fn schema() -> &'static TableSchema {
        &schema::SHIPMENTS
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.order_id.to_string(),
            self.carrier.name().to_string(),
            format_timestamp(self.ship_ts),
            self.delivered_ts.map(format_timestamp).unwrap_or_default(),
        ]
    }
}

impl TableRow for ReturnRecord {
    fn schema() -> &'static TableSchema {
        &schema::RETURNS
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.order_id.to_string(),
            self.sku.clone(),
            self.qty.to_string(),
            self.reason.name().to_string(),
            format_date(self.return_ts),
        ]
    }
}
