//! Product catalog types.

/// Product category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Category {
    /// Doors.
    #[default]
    Doors,
    /// Door frames.
    Frames,
    /// Hinges, locks and handles.
    Hardware,
    /// Everything else.
    Accessories,
}

impl Category {
    /// All categories with their relative draw weights (4:3:2:1).
    pub const WEIGHTED: [(Category, u32); 4] = [
        (Category::Doors, 4),
        (Category::Frames, 3),
        (Category::Hardware, 2),
        (Category::Accessories, 1),
    ];

    /// Get display name.
    pub fn name(&self) -> &'static str {
        match self {
            Category::Doors => "Doors",
            Category::Frames => "Frames",
            Category::Hardware => "Hardware",
            Category::Accessories => "Accessories",
        }
    }

    /// List price the category's products are scattered around.
    pub fn base_price(&self) -> f64 {
        match self {
            Category::Doors => 400.0,
            Category::Frames => 250.0,
            Category::Hardware => 60.0,
            Category::Accessories => 25.0,
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A row of the products table.
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    /// SKU code, `SKU0001` upwards.
    pub sku: String,
    /// Product category.
    pub category: Category,
    /// Unit list price, two decimals.
    pub price: f64,
    /// Unit cost, two decimals; always below `price`.
    pub cost: f64,
}

/// Format a 1-based catalog index as a SKU code.
pub fn sku_code(index: u32) -> String {
    format!("SKU{:04}", index)
}
