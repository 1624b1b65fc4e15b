//! Row types for the six generated tables.

mod customer;
mod order;
mod product;
mod returns;
mod shipment;

pub use customer::{Customer, Region, Segment};
pub use order::{Order, OrderItem, OrderLine};
pub use product::{sku_code, Category, Product};
pub use returns::{ReturnReason, ReturnRecord};
pub use shipment::{Carrier, Shipment};
