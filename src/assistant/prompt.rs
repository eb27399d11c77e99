//! Fixed texts and prompt builders for the shopping assistant.

use crate::domain::aggregates::Product;

pub const STORE_NAME: &str = "ShopOrbit";

pub const GREETING: &str = "Hi! I am your Official ShopOrbit Agent. Ready to help you upgrade your tech rig with the best components and software. What are we building today?";

/// Reply recorded when the generator call fails.
pub const FALLBACK_REPLY: &str = "I'm having a bit of trouble connecting to my brain right now. Please try again!";

/// Reply recorded when the generator answers with nothing.
pub const EMPTY_REPLY: &str = "Sorry, my hardware data connection flickered. Please repeat that.";

pub const PITCH_FALLBACK: &str = "The perfect addition to your collection.";

/// Prefix marking the preamble when it travels as an ordinary user turn.
pub const PREAMBLE_PREFIX: &str = "System context: ";

/// Behavioral instructions describing the store and its catalog.
pub fn preamble(catalog: &[Product]) -> String {
    let listing = catalog
        .iter()
        .map(|p| format!("{} ({})", p.name(), p.price()))
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "You are a helpful and friendly shopping assistant for \"{STORE_NAME}\". \
         You help customers find products from our catalog. \
         Our current catalog: {listing}. \
         If a user asks for recommendations, suggest products from our list. \
         Be concise, helpful, and informative. \
         Always try to be persuasive but honest about product features."
    )
}

pub fn pitch_prompt(product_name: &str) -> String {
    format!("Give a one-sentence clever sales pitch for a product called \"{product_name}\".")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::aggregates::Catalog;

    #[test]
    fn test_preamble_lists_catalog_prices() {
        let text = preamble(Catalog::seeded().products());
        assert!(text.contains("\"ShopOrbit\""));
        assert!(text.contains("Lumix Professional Camera ($1299.99), Premium Leather Boots ($189.5)"));
        assert!(text.contains("Gourmet Coffee Beans ($18)."));
    }

    #[test]
    fn test_pitch_prompt_quotes_name() {
        assert_eq!(
            pitch_prompt("Wall Clock"),
            "Give a one-sentence clever sales pitch for a product called \"Wall Clock\"."
        );
    }
}
