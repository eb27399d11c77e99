//! Product Aggregate

use serde::Serialize;
use crate::domain::value_objects::Money;

/// Stock level below which a product is flagged as running out.
pub const LOW_STOCK_THRESHOLD: u32 = 10;

/// A listed product. Fields are fixed once the product enters the catalog.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Product {
    id: String,
    name: String,
    price: Money,
    image: String,
    category: String,
    description: String,
    rating: f32,
    stock: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    seller: Option<String>,
}

impl Product {
    pub fn create(id: impl Into<String>, name: impl Into<String>, price: Money, category: impl Into<String>) -> Self {
        Self {
            id: id.into(), name: name.into(), price, image: String::new(), category: category.into(),
            description: String::new(), rating: 0.0, stock: 0, seller: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self { self.description = description.into(); self }
    pub fn with_image(mut self, image: impl Into<String>) -> Self { self.image = image.into(); self }
    pub fn with_rating(mut self, rating: f32) -> Self { self.rating = rating.clamp(0.0, 5.0); self }
    pub fn with_stock(mut self, stock: u32) -> Self { self.stock = stock; self }
    pub fn with_seller(mut self, seller: impl Into<String>) -> Self { self.seller = Some(seller.into()); self }

    pub fn id(&self) -> &str { &self.id }
    pub fn name(&self) -> &str { &self.name }
    pub fn price(&self) -> &Money { &self.price }
    pub fn image(&self) -> &str { &self.image }
    pub fn category(&self) -> &str { &self.category }
    pub fn description(&self) -> &str { &self.description }
    pub fn rating(&self) -> f32 { self.rating }
    pub fn stock(&self) -> u32 { self.stock }
    pub fn seller(&self) -> Option<&str> { self.seller.as_deref() }
    pub fn is_low_stock(&self) -> bool { self.stock < LOW_STOCK_THRESHOLD }
}
