//! "Sell a product" listing form

use std::str::FromStr;

use rand::{distributions::Alphanumeric, Rng};
use rust_decimal::Decimal;
use serde::Deserialize;
use validator::Validate;

use crate::domain::aggregates::{Catalog, Product};
use crate::domain::value_objects::Money;
use crate::{Result, ShopError, User, MISSING_FIELDS};

const LISTING_ID_LEN: usize = 9;
const LISTING_RATING: f32 = 5.0;
const LISTING_STOCK: u32 = 1;

fn default_category() -> String { "Electronics".to_string() }

#[derive(Clone, Debug, Deserialize, Validate)]
pub struct SellListing {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(length(min = 1))]
    pub price: String,
    #[serde(default = "default_category")]
    pub category: String,
    #[validate(length(min = 1))]
    pub description: String,
    #[serde(default)]
    #[validate(url)]
    pub image: Option<String>,
}

impl SellListing {
    /// Validates the form and turns it into a product owned by `seller`.
    pub fn into_product(mut self, seller: &User) -> Result<Product> {
        self.name = self.name.trim().to_string();
        self.description = self.description.trim().to_string();
        self.image = self.image.map(|i| i.trim().to_string()).filter(|i| !i.is_empty());
        self.validate().map_err(|_| ShopError::Validation(MISSING_FIELDS.to_string()))?;

        let price = Decimal::from_str(self.price.trim())
            .ok()
            .filter(|p| p.is_sign_positive() && !p.is_zero())
            .ok_or_else(|| ShopError::Validation("Please enter a valid price.".to_string()))?;
        if !Catalog::is_known_category(&self.category) {
            return Err(ShopError::Validation(format!("Unknown category: {}", self.category)));
        }

        let image = self.image.unwrap_or_else(|| format!("https://picsum.photos/seed/{}/600/600", self.name));
        Ok(Product::create(listing_id(), self.name, Money::usd(price), self.category)
            .with_description(self.description)
            .with_image(image)
            .with_rating(LISTING_RATING)
            .with_stock(LISTING_STOCK)
            .with_seller(seller.username.clone()))
    }
}

fn listing_id() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(LISTING_ID_LEN)
        .map(|c| char::from(c).to_ascii_lowercase())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seller() -> User { User { username: "pablo".into(), email: "pablo@example.com".into() } }

    fn form() -> SellListing {
        SellListing {
            name: "Vintage Lamp".into(),
            price: "29.90".into(),
            category: "Home".into(),
            description: "Warm brass lamp.".into(),
            image: None,
        }
    }

    #[test]
    fn test_listing_defaults() {
        let p = form().into_product(&seller()).unwrap();
        assert_eq!(p.id().len(), 9);
        assert_eq!(p.seller(), Some("pablo"));
        assert_eq!(p.rating(), 5.0);
        assert_eq!(p.stock(), 1);
        assert_eq!(p.price().amount(), Decimal::new(2990, 2));
        assert_eq!(p.image(), "https://picsum.photos/seed/Vintage Lamp/600/600");
    }

    #[test]
    fn test_blank_image_uses_placeholder() {
        let mut f = form();
        f.image = Some("  ".into());
        let p = f.into_product(&seller()).unwrap();
        assert!(p.image().starts_with("https://picsum.photos/seed/"));
    }

    #[test]
    fn test_missing_name_is_rejected() {
        let mut f = form();
        f.name = "   ".into();
        match f.into_product(&seller()) {
            Err(ShopError::Validation(msg)) => assert_eq!(msg, MISSING_FIELDS),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn test_bad_price_and_category() {
        let mut f = form();
        f.price = "free".into();
        assert!(matches!(f.into_product(&seller()), Err(ShopError::Validation(_))));
        let mut f = form();
        f.price = "-3".into();
        assert!(matches!(f.into_product(&seller()), Err(ShopError::Validation(_))));
        let mut f = form();
        f.category = "All".into();
        assert!(matches!(f.into_product(&seller()), Err(ShopError::Validation(_))));
    }
}
