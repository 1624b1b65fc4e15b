//! Shipment generation, one shipment per order.

use crate::config::ShipmentConfig;
use crate::error::Result;
use crate::types::{Carrier, Order, Shipment};
use crate::window::plus_days;
use rand::Rng;

/// Generator for the shipments table.
#[derive(Debug, Clone)]
pub struct ShipmentGenerator {
    in_transit_rate: f64,
    max_ship_delay_days: i64,
    min_transit_days: i64,
    max_transit_days: i64,
}

impl ShipmentGenerator {
    /// Create a shipment generator.
    pub fn new(config: &ShipmentConfig) -> Self {
        let min_transit_days = config.min_transit_days.max(1);
        Self {
            in_transit_rate: config.in_transit_rate,
            max_ship_delay_days: config.max_ship_delay_days.max(0),
            min_transit_days,
            max_transit_days: config.max_transit_days.max(min_transit_days),
        }
    }

    /// Generate exactly one shipment for every order, in order.
    ///
    /// Fails if a ship or delivery date falls outside the calendar range.
    pub fn generate(&self, orders: &[Order], rng: &mut impl Rng) -> Result<Vec<Shipment>> {
        orders
            .iter()
            .map(|order| self.generate_shipment(order, rng))
            .collect()
    }

    fn generate_shipment(&self, order: &Order, rng: &mut impl Rng) -> Result<Shipment> {
        let ship_ts = plus_days(order.order_ts, rng.gen_range(0..=self.max_ship_delay_days))?;

        let in_transit = rng.gen::<f64>() < self.in_transit_rate;
        let delivered_ts = if in_transit {
            None
        } else {
            let transit = rng.gen_range(self.min_transit_days..=self.max_transit_days);
            Some(plus_days(ship_ts, transit)?)
        };

        let carrier = Carrier::ALL[rng.gen_range(0..Carrier::ALL.len())];

        Ok(Shipment {
            order_id: order.order_id,
            carrier,
            ship_ts,
            delivered_ts,
        })
    }
}
