//! Cart Aggregate

use chrono::{DateTime, Utc};
use serde::Serialize;
use crate::domain::aggregates::Product;
use crate::domain::events::{CartEvent, StoreEvent};
use crate::domain::value_objects::{Money, Quantity};

#[derive(Clone, Debug, Serialize)]
pub struct Cart {
    lines: Vec<CartLine>,
    total: Money,
    item_count: u32,
    currency: String,
    updated_at: DateTime<Utc>,
    #[serde(skip)]
    events: Vec<StoreEvent>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CartLine {
    pub product: Product,
    pub quantity: Quantity,
}

impl CartLine {
    pub fn line_total(&self) -> Money { self.product.price().multiply(self.quantity.value()) }
}

impl Cart {
    pub fn new(currency: &str) -> Self {
        Self {
            lines: vec![], total: Money::zero(currency), item_count: 0,
            currency: currency.to_string(), updated_at: Utc::now(), events: vec![],
        }
    }

    pub fn lines(&self) -> &[CartLine] { &self.lines }
    pub fn total(&self) -> &Money { &self.total }
    pub fn item_count(&self) -> u32 { self.item_count }
    pub fn line_count(&self) -> usize { self.lines.len() }
    pub fn is_empty(&self) -> bool { self.lines.is_empty() }
    pub fn line(&self, product_id: &str) -> Option<&CartLine> { self.lines.iter().find(|l| l.product.id() == product_id) }

    /// Bumps the existing line for this product, or opens a new one at quantity 1.
    pub fn add(&mut self, product: &Product) {
        if let Some(existing) = self.lines.iter_mut().find(|l| l.product.id() == product.id()) {
            existing.quantity = existing.quantity.increment();
        } else {
            self.lines.push(CartLine { product: product.clone(), quantity: Quantity::ONE });
        }
        self.raise_event(StoreEvent::Cart(CartEvent::LineAdded { product_id: product.id().to_string() }));
        self.recalculate();
    }

    /// Unknown ids are ignored.
    pub fn adjust(&mut self, product_id: &str, delta: i64) {
        if let Some(line) = self.lines.iter_mut().find(|l| l.product.id() == product_id) {
            line.quantity = line.quantity.adjust(delta);
            self.recalculate();
        }
    }

    /// Unknown ids are ignored.
    pub fn remove(&mut self, product_id: &str) {
        let before = self.lines.len();
        self.lines.retain(|l| l.product.id() != product_id);
        if self.lines.len() != before {
            self.raise_event(StoreEvent::Cart(CartEvent::LineRemoved { product_id: product_id.to_string() }));
            self.recalculate();
        }
    }

    pub fn clear(&mut self) {
        self.lines.clear();
        self.raise_event(StoreEvent::Cart(CartEvent::Cleared));
        self.recalculate();
    }

    /// Takes paid quantities out of the cart. Lines added or raised since the
    /// snapshot was taken keep whatever was not paid for.
    pub fn settle(&mut self, paid: &[CartLine]) {
        for settled in paid {
            let id = settled.product.id();
            let Some(line) = self.lines.iter_mut().find(|l| l.product.id() == id) else { continue };
            if line.quantity.value() > settled.quantity.value() {
                line.quantity = Quantity::new(line.quantity.value() - settled.quantity.value());
            } else {
                self.lines.retain(|l| l.product.id() != id);
                self.raise_event(StoreEvent::Cart(CartEvent::LineRemoved { product_id: id.to_string() }));
            }
        }
        if self.lines.is_empty() {
            self.raise_event(StoreEvent::Cart(CartEvent::Cleared));
        }
        self.recalculate();
    }

    pub fn take_events(&mut self) -> Vec<StoreEvent> { std::mem::take(&mut self.events) }
    fn raise_event(&mut self, e: StoreEvent) { self.events.push(e); }

    fn recalculate(&mut self) {
        self.total = self.lines.iter().fold(Money::zero(&self.currency), |acc, l| acc.add(&l.line_total()).unwrap_or(acc));
        self.item_count = self.lines.iter().map(|l| l.quantity.value()).sum();
        self.updated_at = Utc::now();
    }
}

impl Default for Cart { fn default() -> Self { Self::new("USD") } }

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn product(id: &str, cents: i64) -> Product {
        Product::create(id, format!("Item {id}"), Money::usd(Decimal::new(cents, 2)), "Home")
    }

    #[test]
    fn test_add_same_product_merges() {
        let mut cart = Cart::default();
        let p = product("P1", 1000);
        cart.add(&p);
        cart.add(&p);
        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.lines()[0].quantity.value(), 2);
        assert_eq!(cart.item_count(), 2);
    }

    #[test]
    fn test_decrement_floors_at_one() {
        let mut cart = Cart::default();
        cart.add(&product("P1", 1000));
        cart.adjust("P1", -1);
        assert_eq!(cart.line("P1").unwrap().quantity.value(), 1);
        cart.adjust("P1", -5);
        assert_eq!(cart.item_count(), 1);
    }

    #[test]
    fn test_total_is_sum_of_price_times_quantity() {
        let mut cart = Cart::default();
        let a = product("A", 1000);
        let b = product("B", 2550);
        cart.add(&a);
        cart.add(&a);
        cart.add(&b);
        assert_eq!(cart.total().amount(), Decimal::new(4550, 2));
        assert_eq!(cart.item_count(), 3);
        cart.adjust("B", 2);
        assert_eq!(cart.total().amount(), Decimal::new(9650, 2));
    }

    #[test]
    fn test_remove_and_unknown_ids() {
        let mut cart = Cart::default();
        cart.add(&product("A", 500));
        cart.adjust("missing", 3);
        cart.remove("missing");
        assert_eq!(cart.line_count(), 1);
        cart.remove("A");
        assert!(cart.is_empty());
        assert!(cart.total().is_zero());
    }

    #[test]
    fn test_clear_resets_count() {
        let mut cart = Cart::default();
        cart.add(&product("A", 500));
        cart.add(&product("B", 700));
        cart.clear();
        assert!(cart.lines().is_empty());
        assert_eq!(cart.item_count(), 0);
        assert!(cart.total().is_zero());
    }

    #[test]
    fn test_settle_keeps_unpaid_quantities() {
        let mut cart = Cart::default();
        let coffee = product("C", 1800);
        cart.add(&coffee);
        let paid = cart.lines().to_vec();
        cart.add(&coffee);
        cart.add(&product("K", 12000));
        cart.settle(&paid);
        assert_eq!(cart.line("C").unwrap().quantity.value(), 1);
        assert_eq!(cart.line_count(), 2);
        assert_eq!(cart.total().amount(), Decimal::new(13800, 2));

        let paid = cart.lines().to_vec();
        cart.settle(&paid);
        assert!(cart.is_empty());
        assert_eq!(cart.item_count(), 0);
    }

    #[test]
    fn test_events_drained() {
        let mut cart = Cart::default();
        cart.add(&product("A", 500));
        cart.remove("A");
        let events = cart.take_events();
        assert_eq!(events.len(), 2);
        assert!(cart.take_events().is_empty());
    }
}
