//! Catalog Aggregate

use rust_decimal::Decimal;
use crate::domain::aggregates::Product;
use crate::domain::events::{CatalogEvent, StoreEvent};
use crate::domain::value_objects::{CategoryFilter, Money};
use crate::{Result, ShopError};

/// Concrete categories a product may be listed under, in selector order.
pub const CATEGORIES: [&str; 7] = ["Electronics", "Fashion", "Audio", "Home", "Sports", "Furniture", "Food"];

#[derive(Clone, Debug, Default)]
pub struct Catalog {
    products: Vec<Product>,
    events: Vec<StoreEvent>,
}

impl Catalog {
    /// Builds a catalog, rejecting duplicate product ids.
    pub fn new(products: Vec<Product>) -> Result<Self> {
        let mut catalog = Self::default();
        for product in products {
            if catalog.get(product.id()).is_some() {
                return Err(ShopError::DuplicateProduct(product.id().to_string()));
            }
            catalog.products.push(product);
        }
        Ok(catalog)
    }

    /// The launch catalog.
    pub fn seeded() -> Self {
        Self { products: seed_products(), events: vec![] }
    }

    pub fn products(&self) -> &[Product] { &self.products }
    pub fn len(&self) -> usize { self.products.len() }
    pub fn is_empty(&self) -> bool { self.products.is_empty() }
    pub fn get(&self, id: &str) -> Option<&Product> { self.products.iter().find(|p| p.id() == id) }

    /// Selector entries: `All` followed by every concrete category.
    pub fn categories() -> Vec<&'static str> {
        std::iter::once(CategoryFilter::ALL_LABEL).chain(CATEGORIES).collect()
    }

    pub fn is_known_category(category: &str) -> bool { CATEGORIES.contains(&category) }

    /// Products in the selected category whose name contains `query`, ignoring case.
    /// Keeps catalog order.
    pub fn filter(&self, category: &CategoryFilter, query: &str) -> Vec<&Product> {
        let needle = query.to_lowercase();
        self.products
            .iter()
            .filter(|p| category.matches(p.category()))
            .filter(|p| p.name().to_lowercase().contains(&needle))
            .collect()
    }

    /// Adds a fresh listing ahead of existing products.
    pub fn list(&mut self, product: Product) -> Result<&Product> {
        if self.get(product.id()).is_some() {
            return Err(ShopError::DuplicateProduct(product.id().to_string()));
        }
        self.raise_event(StoreEvent::Catalog(CatalogEvent::ProductListed {
            product_id: product.id().to_string(),
            seller: product.seller().map(str::to_string),
        }));
        self.products.insert(0, product);
        Ok(&self.products[0])
    }

    pub fn take_events(&mut self) -> Vec<StoreEvent> { std::mem::take(&mut self.events) }
    fn raise_event(&mut self, e: StoreEvent) { self.events.push(e); }
}

fn seed_products() -> Vec<Product> {
    let usd = |cents: i64| Money::usd(Decimal::new(cents, 2));
    vec![
        Product::create("1", "Lumix Professional Camera", usd(129999), "Electronics")
            .with_image("https://picsum.photos/seed/camera/600/600")
            .with_description("Capture stunning visuals with advanced mirrorless technology.")
            .with_rating(4.8)
            .with_stock(15),
        Product::create("2", "Premium Leather Boots", usd(18950), "Fashion")
            .with_image("https://picsum.photos/seed/boots/600/600")
            .with_description("Durable and stylish boots handcrafted from top-grain leather.")
            .with_rating(4.5)
            .with_stock(24),
        Product::create("3", "Smart Noise-Cancelling Headphones", usd(34900), "Audio")
            .with_image("https://picsum.photos/seed/headphones/600/600")
            .with_description("Immersive sound quality with active noise cancellation technology.")
            .with_rating(4.9)
            .with_stock(42),
        Product::create("4", "Mechanical Gaming Keyboard", usd(12000), "Electronics")
            .with_image("https://picsum.photos/seed/keyboard/600/600")
            .with_description("RGB mechanical keyboard with tactile blue switches.")
            .with_rating(4.7)
            .with_stock(12),
        Product::create("5", "Minimalist Wall Clock", usd(4599), "Home")
            .with_image("https://picsum.photos/seed/clock/600/600")
            .with_description("Sleek design that fits perfectly in any modern living room.")
            .with_rating(4.2)
            .with_stock(55),
        Product::create("6", "Hydration Sports Bottle", usd(2495), "Sports")
            .with_image("https://picsum.photos/seed/bottle/600/600")
            .with_description("Insulated stainless steel bottle that keeps drinks cold for 24 hours.")
            .with_rating(4.6)
            .with_stock(100),
        Product::create("7", "Ergonomic Office Chair", usd(45000), "Furniture")
            .with_image("https://picsum.photos/seed/chair/600/600")
            .with_description("Premium support for long working hours with adjustable lumbar support.")
            .with_rating(4.8)
            .with_stock(8),
        Product::create("8", "Gourmet Coffee Beans", usd(1800), "Food")
            .with_image("https://picsum.photos/seed/coffee/600/600")
            .with_description("Ethically sourced medium roast with notes of chocolate and citrus.")
            .with_rating(4.9)
            .with_stock(200),
    ]
}
