//! Return types.

use chrono::NaiveDate;

/// Why an item came back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ReturnReason {
    /// Arrived damaged.
    #[default]
    Damaged,
    /// Wrong item shipped.
    WrongItem,
    /// Customer changed their mind.
    BuyerRemorse,
}

impl ReturnReason {
    /// All reasons, in draw order.
    pub const ALL: [ReturnReason; 3] = [
        ReturnReason::Damaged,
        ReturnReason::WrongItem,
        ReturnReason::BuyerRemorse,
    ];

    /// Get display name.
    pub fn name(&self) -> &'static str {
        match self {
            ReturnReason::Damaged => "Damaged",
            ReturnReason::WrongItem => "Wrong item",
            ReturnReason::BuyerRemorse => "Buyer remorse",
        }
    }
}

impl std::fmt::Display for ReturnReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A row of the returns table. At most one per order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReturnRecord {
    /// Order the returned item belongs to.
    pub order_id: u64,
    /// Returned product; one of the order's line items.
    pub sku: String,
    /// Units returned, at least 1.
    pub qty: u32,
    /// Return reason.
    pub reason: ReturnReason,
    /// Date the return was received.
    pub return_ts: NaiveDate,
}
