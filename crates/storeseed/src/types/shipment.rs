//! Shipment types.

use chrono::NaiveDateTime;

/// Shipping carrier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Carrier {
    /// UPS.
    #[default]
    Ups,
    /// FedEx.
    FedEx,
    /// Estes freight.
    Estes,
    /// XPO logistics.
    Xpo,
}

impl Carrier {
    /// All carriers, in draw order.
    pub const ALL: [Carrier; 4] = [Carrier::Ups, Carrier::FedEx, Carrier::Estes, Carrier::Xpo];

    /// Get display name.
    pub fn name(&self) -> &'static str {
        match self {
            Carrier::Ups => "UPS",
            Carrier::FedEx => "FedEx",
            Carrier::Estes => "Estes",
            Carrier::Xpo => "XPO",
        }
    }
}

impl std::fmt::Display for Carrier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A row of the shipments table. Exactly one per order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shipment {
    /// Shipped order.
    pub order_id: u64,
    /// Carrier handling the shipment.
    pub carrier: Carrier,
    /// When the shipment left.
    pub ship_ts: NaiveDateTime,
    /// Delivery time; `None` while in transit.
    pub delivered_ts: Option<NaiveDateTime>,
}

impl Shipment {
    /// Check if the shipment has no recorded delivery yet.
    pub fn is_in_transit(&self) -> bool {
        self.delivered_ts.is_none()
    }
}
