//! Table definitions shared by the CSV headers and the DDL.

/// Storage type of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    /// Whole number.
    Integer,
    /// Decimal number.
    Real,
    /// Free text.
    Text,
    /// `YYYY-MM-DD` text.
    Date,
    /// `YYYY-MM-DD HH:MM:SS` text.
    Timestamp,
}

impl ColumnType {
    /// SQL type name.
    pub fn sql_type(&self) -> &'static str {
        match self {
            ColumnType::Integer => "INTEGER",
            ColumnType::Real => "REAL",
            ColumnType::Text | ColumnType::Date | ColumnType::Timestamp => "TEXT",
        }
    }
}

/// One column of a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnDef {
    /// Column name.
    pub name: &'static str,
    /// Storage type.
    pub ty: ColumnType,
    /// Whether the column may be empty.
    pub nullable: bool,
}

const fn col(name: &'static str, ty: ColumnType) -> ColumnDef {
    ColumnDef {
        name,
        ty,
        nullable: false,
    }
}

const fn nullable(name: &'static str, ty: ColumnType) -> ColumnDef {
    ColumnDef {
        name,
        ty,
        nullable: true,
    }
}

/// A generated table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableSchema {
    /// Table name, also the CSV file stem.
    pub name: &'static str,
    /// Columns in output order.
    pub columns: &'static [ColumnDef],
    /// Primary key column, if the table has a unique key.
    pub primary_key: Option<&'static str>,
}

impl TableSchema {
    /// CSV file name for the table.
    pub fn file_name(&self) -> String {
        format!("{}.csv", self.name)
    }

    /// Column names in output order.
    pub fn header(&self) -> Vec<&'static str> {
        self.columns.iter().map(|c| c.name).collect()
    }

    /// Idempotent `CREATE TABLE IF NOT EXISTS` statement.
    pub fn create_statement(&self) -> String {
        let mut lines: Vec<String> = self
            .columns
            .iter()
            .map(|c| {
                let null = if c.nullable { "" } else { " NOT NULL" };
                format!("    {} {}{}", c.name, c.ty.sql_type(), null)
            })
            .collect();
        if let Some(pk) = self.primary_key {
            lines.push(format!("    PRIMARY KEY ({})", pk));
        }
        format!(
            "CREATE TABLE IF NOT EXISTS {} (\n{}\n);\n",
            self.name,
            lines.join(",\n")
        )
    }
}

use ColumnType::{Date, Integer, Real, Text, Timestamp};

/// customers table.
pub const CUSTOMERS: TableSchema = TableSchema {
    name: "customers",
    columns: &[
        col("customer_id", Integer),
        col("region", Text),
        col("segment", Text),
        col("signup_date", Date),
    ],
    primary_key: Some("customer_id"),
};

/// products table.
pub const PRODUCTS: TableSchema = TableSchema {
    name: "products",
    columns: &[
        col("sku", Text),
        col("category", Text),
        col("price", Real),
        col("cost", Real),
    ],
    primary_key: Some("sku"),
};

/// orders table.
pub const ORDERS: TableSchema = TableSchema {
    name: "orders",
    columns: &[
        col("order_id", Integer),
        col("customer_id", Integer),
        col("order_ts", Timestamp),
        col("is_internal", Integer),
    ],
    primary_key: Some("order_id"),
};

/// order_items table. `(order_id, sku)` repeats, so there is no key.
pub const ORDER_ITEMS: TableSchema = TableSchema {
    name: "order_items",
    columns: &[
        col("order_id", Integer),
        col("sku", Text),
        col("qty", Integer),
        nullable("unit_price", Real),
        nullable("unit_cost", Real),
    ],
    primary_key: None,
};

/// shipments table.
pub const SHIPMENTS: TableSchema = TableSchema {
    name: "shipments",
    columns: &[
        col("order_id", Integer),
        col("carrier", Text),
        col("ship_ts", Timestamp),
        nullable("delivered_ts", Timestamp),
    ],
    primary_key: Some("order_id"),
};

/// returns table.
pub const RETURNS: TableSchema = TableSchema {
    name: "returns",
    columns: &[
        col("order_id", Integer),
        col("sku", Text),
        col("qty", Integer),
        col("reason", Text),
        col("return_ts", Date),
    ],
    primary_key: Some("order_id"),
};

/// All tables in load order.
pub const TABLES: [&TableSchema; 6] = [
    &CUSTOMERS,
    &PRODUCTS,
    &ORDERS,
    &ORDER_ITEMS,
    &SHIPMENTS,
    &RETURNS,
];

/// DDL for every table; safe to apply repeatedly.
pub fn render_schema() -> String {
    TABLES
        .iter()
        .map(|t| t.create_statement())
        .collect::<Vec<_>>()
        .join("\n")
}
