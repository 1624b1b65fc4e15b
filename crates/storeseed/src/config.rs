//! Configuration management for dataset generation.
//!
//! Settings are loaded with the `config` crate from a TOML file and/or
//! `STORESEED__*` environment variables. Every field has a default, so an
//! empty file yields the canonical run (seed 42, 800 customers, 150 products,
//! 2200 orders, report date 2025-09-01).
//!
//! # Example
//!
//! ```ignore
//! use storeseed::config::SeedConfig;
//!
//! let config = SeedConfig::load("storeseed.toml")?;
//! config.validate()?;
//! ```

use crate::error::{Result, SeedError};
use crate::window::TimeWindow;
use chrono::NaiveDate;
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable prefix for overrides, e.g. `STORESEED__ORDERS__COUNT`.
pub const ENV_PREFIX: &str = "STORESEED";

/// Upper bound for the window and every day range (about a century).
pub const MAX_WINDOW_DAYS: i64 = 36_500;

/// Top-level generation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedConfig {
    /// Seed for the single random source threaded through every stage.
    #[serde(default = "default_seed")]
    pub seed: u64,

    /// Report "today"; orders never carry a later timestamp.
    #[serde(default = "default_report_date")]
    pub report_date: NaiveDate,

    /// Length of the generation window in days, ending at the report date.
    #[serde(default = "default_window_days")]
    pub window_days: i64,

    /// Customer table settings.
    #[serde(default)]
    pub customers: CustomerConfig,

    /// Product catalog settings.
    #[serde(default)]
    pub products: CatalogConfig,

    /// Order and line item settings.
    #[serde(default)]
    pub orders: OrderConfig,

    /// Shipment settings.
    #[serde(default)]
    pub shipments: ShipmentConfig,

    /// Return settings.
    #[serde(default)]
    pub returns: ReturnConfig,

    /// Output settings.
    #[serde(default)]
    pub output: OutputConfig,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

fn default_seed() -> u64 {
    42
}

fn default_report_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 9, 1).unwrap_or_default()
}

fn default_window_days() -> i64 {
    365
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            seed: default_seed(),
            report_date: default_report_date(),
            window_days: default_window_days(),
            customers: CustomerConfig::default(),
            products: CatalogConfig::default(),
            orders: OrderConfig::default(),
            shipments: ShipmentConfig::default(),
            returns: ReturnConfig::default(),
            output: OutputConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

/// Customer generation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CustomerConfig {
    /// Number of customers.
    pub count: u32,
    /// Signup dates fall within this many days after the window start.
    pub signup_span_days: i64,
}

impl Default for CustomerConfig {
    fn default() -> Self {
        Self {
            count: 800,
            signup_span_days: 330,
        }
    }
}

/// Product catalog settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Number of products (at most 9999, the SKU code is four digits).
    pub count: u32,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self { count: 150 }
    }
}

/// Order generation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OrderConfig {
    /// Number of orders.
    pub count: u32,
    /// Mean of the normal distribution order ages are folded from.
    pub age_mean_days: f64,
    /// Standard deviation of the order age distribution.
    pub age_std_days: f64,
    /// Probability an order is flagged internal.
    pub internal_rate: f64,
    /// Maximum line items per order (minimum is 1).
    pub max_items: u32,
    /// Maximum quantity per line item (minimum is 1).
    pub max_qty: u32,
}

impl Default for OrderConfig {
    fn default() -> Self {
        Self {
            count: 2200,
            age_mean_days: 110.0,
            age_std_days: 85.0,
            internal_rate: 0.03,
            max_items: 4,
            max_qty: 4,
        }
    }
}

/// Shipment generation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ShipmentConfig {
    /// Probability a shipment is still in transit.
    pub in_transit_rate: f64,
    /// Maximum days between order and ship.
    pub max_ship_delay_days: i64,
    /// Minimum days between ship and delivery.
    pub min_transit_days: i64,
    /// Maximum days between ship and delivery.
    pub max_transit_days: i64,
}

impl Default for ShipmentConfig {
    fn default() -> Self {
        Self {
            in_transit_rate: 0.05,
            max_ship_delay_days: 3,
            min_transit_days: 1,
            max_transit_days: 7,
        }
    }
}

/// Return generation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReturnConfig {
    /// Target fraction of orders drawn for a return.
    pub rate: f64,
    /// Minimum days between order and return.
    pub min_days: i64,
    /// Maximum days between order and return.
    pub max_days: i64,
}

impl Default for ReturnConfig {
    fn default() -> Self {
        Self {
            rate: 0.08,
            min_days: 2,
            max_days: 30,
        }
    }
}

/// Output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory the CSV tables are written to.
    pub dir: PathBuf,
    /// Also write `schema.sql` next to the tables.
    pub write_schema: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("seed"),
            write_schema: true,
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level filter (trace, debug, info, warn, error).
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl SeedConfig {
    /// Load configuration from a file, with environment overrides.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let builder = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(Environment::with_prefix(ENV_PREFIX).separator("__"));

        Ok(builder.build()?.try_deserialize()?)
    }

    /// Load configuration from environment variables only.
    pub fn from_env() -> Result<Self> {
        let builder =
            Config::builder().add_source(Environment::with_prefix(ENV_PREFIX).separator("__"));

        Ok(builder.build()?.try_deserialize()?)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let builder = Config::builder().add_source(File::from_str(content, FileFormat::Toml));

        Ok(builder.build()?.try_deserialize()?)
    }

    /// The generation window derived from the report date.
    pub fn window(&self) -> Result<TimeWindow> {
        TimeWindow::ending_at(self.report_date, self.window_days)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if !(1..=MAX_WINDOW_DAYS).contains(&self.window_days) {
            return Err(SeedError::config(format!(
                "window_days must be within [1, {}]",
                MAX_WINDOW_DAYS
            )));
        }
        if self.customers.count == 0 {
            return Err(SeedError::config("customers.count must be greater than 0"));
        }
        if !(0..=self.window_days).contains(&self.customers.signup_span_days) {
            return Err(SeedError::config(format!(
                "customers.signup_span_days must be within [0, {}]",
                self.window_days
            )));
        }
        if self.products.count == 0 || self.products.count > 9999 {
            return Err(SeedError::config("products.count must be within [1, 9999]"));
        }
        let max_age = MAX_WINDOW_DAYS as f64;
        if !(-max_age..=max_age).contains(&self.orders.age_mean_days) {
            return Err(SeedError::config(format!(
                "orders.age_mean_days must be within [-{0}, {0}]",
                MAX_WINDOW_DAYS
            )));
        }
        if !(0.0..=max_age).contains(&self.orders.age_std_days) {
            return Err(SeedError::config(format!(
                "orders.age_std_days must be within [0, {}]",
                MAX_WINDOW_DAYS
            )));
        }
        if self.orders.max_items == 0 || self.orders.max_qty == 0 {
            return Err(SeedError::config("orders.max_items and orders.max_qty must be >= 1"));
        }
        check_rate("orders.internal_rate", self.orders.internal_rate)?;
        check_rate("shipments.in_transit_rate", self.shipments.in_transit_rate)?;
        check_rate("returns.rate", self.returns.rate)?;
        check_days("shipments ship delay", 0, self.shipments.max_ship_delay_days)?;
        if self.shipments.min_transit_days < 1 {
            return Err(SeedError::config("shipments.min_transit_days must be >= 1"));
        }
        check_days(
            "shipments transit",
            self.shipments.min_transit_days,
            self.shipments.max_transit_days,
        )?;
        check_days("returns", self.returns.min_days, self.returns.max_days)?;
        Ok(())
    }
}

fn check_rate(name: &str, value: f64) -> Result<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(SeedError::config(format!(
            "{} must be within [0, 1], got {}",
            name, value
        )))
    }
}

fn check_days(name: &str, min: i64, max: i64) -> Result<()> {
    if min < 0 || min > max || max > MAX_WINDOW_DAYS {
        return Err(SeedError::config(format!(
            "{} day range [{}, {}] is invalid",
            name, min, max
        )));
    }
    Ok(())
}
