//! Customer types.

use chrono::NaiveDate;

/// Sales region of a customer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Region {
    /// West.
    #[default]
    West,
    /// Midwest.
    Midwest,
    /// South.
    South,
    /// Northeast.
    Northeast,
}

impl Region {
    /// All regions, in draw order.
    pub const ALL: [Region; 4] = [
        Region::West,
        Region::Midwest,
        Region::South,
        Region::Northeast,
    ];

    /// Get display name.
    pub fn name(&self) -> &'static str {
        match self {
            Region::West => "West",
            Region::Midwest => "Midwest",
            Region::South => "South",
            Region::Northeast => "Northeast",
        }
    }
}

impl std::fmt::Display for Region {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Customer segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Segment {
    /// Individual consumers.
    #[default]
    Consumer,
    /// Small and medium businesses.
    Smb,
    /// Enterprise accounts.
    Enterprise,
}

impl Segment {
    /// All segments with their relative draw weights (6:3:1).
    pub const WEIGHTED: [(Segment, u32); 3] = [
        (Segment::Consumer, 6),
        (Segment::Smb, 3),
        (Segment::Enterprise, 1),
    ];

    /// Get display name.
    pub fn name(&self) -> &'static str {
        match self {
            Segment::Consumer => "Consumer",
            Segment::Smb => "SMB",
            Segment::Enterprise => "Enterprise",
        }
    }
}

impl std::fmt::Display for Segment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A row of the customers table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Customer {
    /// Dense identifier starting at 1.
    pub customer_id: u64,
    /// Sales region.
    pub region: Region,
    /// Customer segment.
    pub segment: Segment,
    /// Signup date, within the first part of the generation window.
    pub signup_date: NaiveDate,
}
