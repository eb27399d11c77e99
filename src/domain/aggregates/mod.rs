//! Aggregates module
pub mod product;
pub mod catalog;
pub mod cart;
pub mod listing;

pub use product::Product;
pub use catalog::{Catalog, CATEGORIES};
pub use cart::{Cart, CartLine};
pub use listing::SellListing;
