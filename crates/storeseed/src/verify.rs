//! Cross-table integrity checks over a generated dataset.
//!
//! The checker re-derives every structural property the generators promise
//! (referential integrity, date ordering, cardinalities, price sanity) and
//! reports each violation instead of stopping at the first one.

use crate::config::SeedConfig;
use crate::error::{Result, SeedError};
use crate::factory::Dataset;
use crate::types::{Order, OrderItem};
use crate::window::TimeWindow;
use chrono::{NaiveDate, TimeDelta};
use std::collections::{HashMap, HashSet};

/// A single broken property.
#[derive(Debug, Clone, PartialEq)]
pub enum Violation {
    /// Ids of a table are not `1..=n` in order.
    SparseIds {
        /// Table name.
        table: &'static str,
        /// Row position.
        position: usize,
        /// Id found there.
        id: u64,
    },
    /// Signup date outside the allowed span.
    SignupOutOfRange {
        /// Customer.
        customer_id: u64,
    },
    /// Product cost not strictly below price.
    CostNotBelowPrice {
        /// Product.
        sku: String,
    },
    /// Order timestamp outside the generation window.
    OrderOutsideWindow {
        /// Order.
        order_id: u64,
    },
    /// Reference to a customer that does not exist.
    UnknownCustomer {
        /// Referencing order.
        order_id: u64,
        /// Missing customer.
        customer_id: u64,
    },
    /// Reference to an order that does not exist.
    UnknownOrder {
        /// Referencing table.
        table: &'static str,
        /// Missing order.
        order_id: u64,
    },
    /// Reference to a SKU that is not in the catalog.
    UnknownSku {
        /// Referencing table.
        table: &'static str,
        /// Referencing order.
        order_id: u64,
        /// Missing SKU.
        sku: String,
    },
    /// Order has a line item count outside `1..=max_items`.
    ItemCountOutOfRange {
        /// Order.
        order_id: u64,
        /// Items found.
        count: usize,
    },
    /// Line item without a resolved price or cost.
    UnpricedItem {
        /// Order.
        order_id: u64,
        /// Item SKU.
        sku: String,
    },
    /// Line item price differs from the catalog.
    PriceDrift {
        /// Order.
        order_id: u64,
        /// Item SKU.
        sku: String,
    },
    /// Order has no shipment, or more than one.
    ShipmentCount {
        /// Order.
        order_id: u64,
        /// Shipments found.
        count: usize,
    },
    /// Shipment leaves before the order was placed.
    ShippedBeforeOrder {
        /// Order.
        order_id: u64,
    },
    /// Delivery not strictly after shipping.
    DeliveredNotAfterShip {
        /// Order.
        order_id: u64,
    },
    /// More than one return for an order.
    DuplicateReturn {
        /// Order.
        order_id: u64,
    },
    /// Returned SKU is not a line item of the order.
    ReturnSkuNotInOrder {
        /// Order.
        order_id: u64,
        /// Returned SKU.
        sku: String,
    },
    /// Returned quantity is zero or exceeds the ordered quantity.
    ReturnQtyOutOfRange {
        /// Order.
        order_id: u64,
        /// Returned quantity.
        qty: u32,
    },
    /// Return dated before the order.
    ReturnBeforeOrder {
        /// Order.
        order_id: u64,
    },
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Violation::SparseIds { table, position, id } => {
                write!(f, "{}: row {} has id {}, ids must be dense", table, position, id)
            }
            Violation::SignupOutOfRange { customer_id } => {
                write!(f, "customer {}: signup date out of range", customer_id)
            }
            Violation::CostNotBelowPrice { sku } => write!(f, "product {}: cost >= price", sku),
            Violation::OrderOutsideWindow { order_id } => {
                write!(f, "order {}: timestamp outside window", order_id)
            }
            Violation::UnknownCustomer {
                order_id,
                customer_id,
            } => write!(f, "order {}: unknown customer {}", order_id, customer_id),
            Violation::UnknownOrder { table, order_id } => {
                write!(f, "{}: unknown order {}", table, order_id)
            }
            Violation::UnknownSku {
                table,
                order_id,
                sku,
            } => write!(f, "{}: order {} references unknown sku {}", table, order_id, sku),
            Violation::ItemCountOutOfRange { order_id, count } => {
                write!(f, "order {}: {} line items", order_id, count)
            }
            Violation::UnpricedItem { order_id, sku } => {
                write!(f, "order {}: item {} has no price/cost", order_id, sku)
            }
            Violation::PriceDrift { order_id, sku } => {
                write!(f, "order {}: item {} price differs from catalog", order_id, sku)
            }
            Violation::ShipmentCount { order_id, count } => {
                write!(f, "order {}: {} shipments, expected 1", order_id, count)
            }
            Violation::ShippedBeforeOrder { order_id } => {
                write!(f, "order {}: shipped before it was placed", order_id)
            }
            Violation::DeliveredNotAfterShip { order_id } => {
                write!(f, "order {}: delivered_ts not after ship_ts", order_id)
            }
            Violation::DuplicateReturn { order_id } => {
                write!(f, "order {}: more than one return", order_id)
            }
            Violation::ReturnSkuNotInOrder { order_id, sku } => {
                write!(f, "order {}: returned sku {} was not ordered", order_id, sku)
            }
            Violation::ReturnQtyOutOfRange { order_id, qty } => {
                write!(f, "order {}: return qty {} out of range", order_id, qty)
            }
            Violation::ReturnBeforeOrder { order_id } => {
                write!(f, "order {}: return dated before order", order_id)
            }
        }
    }
}

/// Outcome of an integrity check.
#[derive(Debug, Clone, Default)]
pub struct IntegrityReport {
    /// Every violation found, in check order.
    pub violations: Vec<Violation>,
}

impl IntegrityReport {
    /// Check if no violations were found.
    pub fn is_ok(&self) -> bool {
        self.violations.is_empty()
    }

    /// Number of violations.
    pub fn len(&self) -> usize {
        self.violations.len()
    }

    /// Check if the report is empty.
    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }
}

/// Validates a dataset against the generation invariants.
#[derive(Debug, Clone)]
pub struct IntegrityChecker {
    window: TimeWindow,
    last_signup: NaiveDate,
    max_items: usize,
}

impl IntegrityChecker {
    /// Checker for datasets produced with `config`.
    pub fn from_config(config: &SeedConfig) -> Result<Self> {
        let window = config.window()?;
        let span = config.customers.signup_span_days;
        let last_signup = TimeDelta::try_days(span)
            .and_then(|days| window.start_date().checked_add_signed(days))
            .ok_or_else(|| {
                SeedError::generation(format!("signup span of {} days is out of range", span))
            })?;

        Ok(Self {
            window,
            last_signup,
            max_items: config.orders.max_items as usize,
        })
    }

    /// Run every check.
    pub fn check(&self, dataset: &Dataset) -> IntegrityReport {
        let mut report = IntegrityReport::default();
        let out = &mut report.violations;

        self.check_customers(dataset, out);
        let catalog = self.check_products(dataset, out);
        let orders = self.check_orders(dataset, out);
        let items = self.check_items(dataset, &orders, &catalog, out);
        self.check_shipments(dataset, &orders, out);
        self.check_returns(dataset, &orders, &items, out);

        report
    }

    fn check_customers(&self, dataset: &Dataset, out: &mut Vec<Violation>) {
        let first = self.window.start_date();
        let last = self.last_signup;
        for (position, c) in dataset.customers.iter().enumerate() {
            if c.customer_id != position as u64 + 1 {
                out.push(Violation::SparseIds {
                    table: "customers",
                    position,
                    id: c.customer_id,
                });
            }
            if c.signup_date < first || c.signup_date > last {
                out.push(Violation::SignupOutOfRange {
                    customer_id: c.customer_id,
                });
            }
        }
    }

    fn check_products<'a>(
        &self,
        dataset: &'a Dataset,
        out: &mut Vec<Violation>,
    ) -> HashMap<&'a str, (f64, f64)> {
        let mut catalog = HashMap::with_capacity(dataset.products.len());
        for p in &dataset.products {
            if p.cost >= p.price {
                out.push(Violation::CostNotBelowPrice { sku: p.sku.clone() });
            }
            catalog.insert(p.sku.as_str(), (p.price, p.cost));
        }
        catalog
    }

    fn check_orders<'a>(
        &self,
        dataset: &'a Dataset,
        out: &mut Vec<Violation>,
    ) -> HashMap<u64, &'a Order> {
        let customers = dataset.customers.len() as u64;
        let mut orders = HashMap::with_capacity(dataset.orders.len());
        for (position, o) in dataset.orders.iter().enumerate() {
            if o.order_id != position as u64 + 1 {
                out.push(Violation::SparseIds {
                    table: "orders",
                    position,
                    id: o.order_id,
                });
            }
            if !self.window.contains(o.order_ts) {
                out.push(Violation::OrderOutsideWindow {
                    order_id: o.order_id,
                });
            }
            // Customer ids are dense, so range membership is resolvability
            if o.customer_id == 0 || o.customer_id > customers {
                out.push(Violation::UnknownCustomer {
                    order_id: o.order_id,
                    customer_id: o.customer_id,
                });
            }
            orders.insert(o.order_id, o);
        }
        orders
    }

    fn check_items<'a>(
        &self,
        dataset: &'a Dataset,
        orders: &HashMap<u64, &Order>,
        catalog: &HashMap<&str, (f64, f64)>,
        out: &mut Vec<Violation>,
    ) -> HashMap<u64, Vec<&'a OrderItem>> {
        let mut by_order: HashMap<u64, Vec<&OrderItem>> = HashMap::new();
        for item in &dataset.order_items {
            if !orders.contains_key(&item.order_id) {
                out.push(Violation::UnknownOrder {
                    table: "order_items",
                    order_id: item.order_id,
                });
            }
            match (catalog.get(item.sku.as_str()), item.unit_price, item.unit_cost) {
                (None, _, _) => out.push(Violation::UnknownSku {
                    table: "order_items",
                    order_id: item.order_id,
                    sku: item.sku.clone(),
                }),
                (Some(&(price, cost)), Some(unit_price), Some(unit_cost)) => {
                    if price != unit_price || cost != unit_cost {
                        out.push(Violation::PriceDrift {
                            order_id: item.order_id,
                            sku: item.sku.clone(),
                        });
                    }
                }
                (Some(_), _, _) => out.push(Violation::UnpricedItem {
                    order_id: item.order_id,
                    sku: item.sku.clone(),
                }),
            }
            by_order.entry(item.order_id).or_default().push(item);
        }

        for o in &dataset.orders {
            let count = by_order.get(&o.order_id).map_or(0, Vec::len);
            if count == 0 || count > self.max_items {
                out.push(Violation::ItemCountOutOfRange {
                    order_id: o.order_id,
                    count,
                });
            }
        }
        by_order
    }

    fn check_shipments(
        &self,
        dataset: &Dataset,
        orders: &HashMap<u64, &Order>,
        out: &mut Vec<Violation>,
    ) {
        let mut counts: HashMap<u64, usize> = HashMap::with_capacity(dataset.shipments.len());
        for s in &dataset.shipments {
            *counts.entry(s.order_id).or_default() += 1;
            match orders.get(&s.order_id) {
                Some(order) if s.ship_ts < order.order_ts => {
                    out.push(Violation::ShippedBeforeOrder {
                        order_id: s.order_id,
                    });
                }
                Some(_) => {}
                None => out.push(Violation::UnknownOrder {
                    table: "shipments",
                    order_id: s.order_id,
                }),
            }
            if matches!(s.delivered_ts, Some(delivered) if delivered <= s.ship_ts) {
                out.push(Violation::DeliveredNotAfterShip {
                    order_id: s.order_id,
                });
            }
        }

        for o in &dataset.orders {
            let count = counts.get(&o.order_id).copied().unwrap_or(0);
            if count != 1 {
                out.push(Violation::ShipmentCount {
                    order_id: o.order_id,
                    count,
                });
            }
        }
    }

    fn check_returns(
        &self,
        dataset: &Dataset,
        orders: &HashMap<u64, &Order>,
        items: &HashMap<u64, Vec<&OrderItem>>,
        out: &mut Vec<Violation>,
    ) {
        let mut seen = HashSet::with_capacity(dataset.returns.len());
        for r in &dataset.returns {
            if !seen.insert(r.order_id) {
                out.push(Violation::DuplicateReturn {
                    order_id: r.order_id,
                });
            }

            let Some(order) = orders.get(&r.order_id) else {
                out.push(Violation::UnknownOrder {
                    table: "returns",
                    order_id: r.order_id,
                });
                continue;
            };
            if r.return_ts < order.order_ts.date() {
                out.push(Violation::ReturnBeforeOrder {
                    order_id: r.order_id,
                });
            }

            let max_qty = items
                .get(&r.order_id)
                .into_iter()
                .flatten()
                .filter(|i| i.sku == r.sku)
                .map(|i| i.qty)
                .max();
            match max_qty {
                None => out.push(Violation::ReturnSkuNotInOrder {
                    order_id: r.order_id,
                    sku: r.sku.clone(),
                }),
                Some(ordered) if r.qty == 0 || r.qty > ordered => {
                    out.push(Violation::ReturnQtyOutOfRange {
                        order_id: r.order_id,
                        qty: r.qty,
                    });
                }
                Some(_) => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factory::SeedPipeline;
    use crate::types::ReturnRecord;

    fn generated() -> (SeedConfig, Dataset) {
        let mut config = SeedConfig::default();
        config.customers.count = 40;
        config.products.count = 25;
        config.orders.count = 400;
        let dataset = SeedPipeline::new(config.clone()).unwrap().run().unwrap().dataset;
        (config, dataset)
    }

    #[test]
    fn test_generated_dataset_is_clean() {
        let (config, dataset) = generated();
        let report = IntegrityChecker::from_config(&config).unwrap().check(&dataset);
        assert!(report.is_ok(), "{:?}", report.violations);
    }

    #[test]
    fn test_detects_duplicate_return_and_foreign_sku() {
        let (config, mut dataset) = generated();
        let first = dataset.returns[0].clone();
        dataset.returns.push(first.clone());
        dataset.returns.push(ReturnRecord {
            sku: "SKU9999".into(),
            order_id: 1,
            ..first
        });

        let report = IntegrityChecker::from_config(&config).unwrap().check(&dataset);
        assert!(report
            .violations
            .iter()
            .any(|v| matches!(v, Violation::DuplicateReturn { .. })));
        assert!(report
            .violations
            .iter()
            .any(|v| matches!(v, Violation::ReturnSkuNotInOrder { .. })));
    }

    #[test]
    fn test_detects_shipment_problems() {
        let (config, mut dataset) = generated();
        let s = &mut dataset.shipments[0];
        s.delivered_ts = Some(s.ship_ts);
        dataset.shipments.pop();

        let report = IntegrityChecker::from_config(&config).unwrap().check(&dataset);
        assert!(report
            .violations
            .iter()
            .any(|v| matches!(v, Violation::DeliveredNotAfterShip { .. })));
        assert!(report
            .violations
            .iter()
            .any(|v| matches!(v, Violation::ShipmentCount { count: 0, .. })));
    }

    #[test]
    fn test_detects_unpriced_and_cost_violations() {
        let (config, mut dataset) = generated();
        dataset.order_items[0].unit_cost = None;
        dataset.products[0].cost = dataset.products[0].price;

        let report = IntegrityChecker::from_config(&config).unwrap().check(&dataset);
        assert!(report
            .violations
            .iter()
            .any(|v| matches!(v, Violation::UnpricedItem { .. })));
        assert!(report
            .violations
            .iter()
            .any(|v| matches!(v, Violation::CostNotBelowPrice { .. })));
        assert!(!report.violations[0].to_string().is_empty());
    }

    #[test]
    fn test_unrepresentable_config_is_an_error() {
        let mut config = SeedConfig::default();
        config.customers.signup_span_days = i64::MAX;
        assert!(IntegrityChecker::from_config(&config).is_err());
    }
}
