//! Storefront façade.
//!
//! Owns the catalog, the cart and the signed-in user, and applies the rules
//! that span them: only signed-in shoppers may add to the cart or list
//! products, and checkout takes the paid lines out of the cart once payment
//! clears.

use serde::Serialize;

use crate::auth::LoginForm;
use crate::domain::aggregates::{Cart, CartLine, Catalog, Product, SellListing};
use crate::domain::events::{CartEvent, SessionEvent, StoreEvent};
use crate::domain::value_objects::{CategoryFilter, Money};
use crate::payment::PaymentReceipt;
use crate::persistence::IdentityStore;
use crate::{Result, ShopError, User};

pub const ORDER_PLACED: &str = "Order placed successfully! Thank you for shopping.";

#[derive(Clone, Debug, Serialize)]
pub struct OrderConfirmation {
    pub receipt: PaymentReceipt,
    pub item_count: u32,
    pub message: &'static str,
}

pub struct Storefront {
    catalog: Catalog,
    cart: Cart,
    user: Option<User>,
    identity: IdentityStore,
    checkout_pending: bool,
    events: Vec<StoreEvent>,
}

/// Cart contents frozen at the start of a payment.
#[derive(Clone, Debug)]
pub struct PendingCheckout {
    lines: Vec<CartLine>,
    amount: Money,
}

impl PendingCheckout {
    pub fn amount(&self) -> &Money { &self.amount }
    pub fn item_count(&self) -> u32 { self.lines.iter().map(|l| l.quantity.value()).sum() }
}

impl Storefront {
    /// Opens the store over the given catalog, restoring any remembered user.
    pub fn open(catalog: Catalog, identity: IdentityStore) -> Self {
        let user = identity.load();
        if let Some(u) = &user {
            tracing::info!(username = %u.username, "restored signed-in user");
        }
        Self { catalog, cart: Cart::default(), user, identity, checkout_pending: false, events: vec![] }
    }

    pub fn catalog(&self) -> &Catalog { &self.catalog }
    pub fn cart(&self) -> &Cart { &self.cart }
    pub fn user(&self) -> Option<&User> { self.user.as_ref() }

    pub fn browse(&self, category: &CategoryFilter, query: &str) -> Vec<&Product> {
        self.catalog.filter(category, query)
    }

    pub fn product(&self, id: &str) -> Result<&Product> {
        self.catalog.get(id).ok_or_else(|| ShopError::ProductNotFound(id.to_string()))
    }

    pub fn login(&mut self, form: LoginForm) -> Result<&User> {
        let user = form.authenticate()?;
        self.identity.save(&user)?;
        self.raise_event(StoreEvent::Session(SessionEvent::SignedIn { username: user.username.clone() }));
        self.flush_events();
        Ok(&*self.user.insert(user))
    }

    pub fn logout(&mut self) -> Result<()> {
        self.identity.clear()?;
        if let Some(user) = self.user.take() {
            self.raise_event(StoreEvent::Session(SessionEvent::SignedOut { username: user.username }));
        }
        self.flush_events();
        Ok(())
    }

    pub fn add_to_cart(&mut self, product_id: &str) -> Result<&Cart> {
        if self.user.is_none() {
            return Err(ShopError::LoginRequired);
        }
        let product = self.catalog.get(product_id).ok_or_else(|| ShopError::ProductNotFound(product_id.to_string()))?;
        self.cart.add(product);
        self.flush_events();
        Ok(&self.cart)
    }

    pub fn adjust_quantity(&mut self, product_id: &str, delta: i64) -> &Cart {
        self.cart.adjust(product_id, delta);
        &self.cart
    }

    pub fn remove_from_cart(&mut self, product_id: &str) -> &Cart {
        self.cart.remove(product_id);
        self.flush_events();
        &self.cart
    }

    pub fn list_product(&mut self, listing: SellListing) -> Result<&Product> {
        let seller = self.user.as_ref().ok_or(ShopError::LoginRequired)?;
        let product = listing.into_product(seller)?;
        let id = self.catalog.list(product)?.id().to_string();
        self.flush_events();
        self.product(&id)
    }

    pub fn is_checkout_pending(&self) -> bool { self.checkout_pending }

    /// Freezes the current lines for payment. Refused on an empty cart or
    /// while an earlier payment is still being processed.
    pub fn begin_checkout(&mut self) -> Result<PendingCheckout> {
        if self.checkout_pending {
            return Err(ShopError::CheckoutInProgress);
        }
        if self.cart.is_empty() {
            return Err(ShopError::EmptyCart);
        }
        self.checkout_pending = true;
        Ok(PendingCheckout { lines: self.cart.lines().to_vec(), amount: self.cart.total().clone() })
    }

    /// Settles a paid order. Only the paid lines leave the cart.
    pub fn complete_checkout(&mut self, pending: PendingCheckout, receipt: PaymentReceipt) -> OrderConfirmation {
        self.cart.settle(&pending.lines);
        self.checkout_pending = false;
        self.raise_event(StoreEvent::Cart(CartEvent::CheckedOut {
            order_id: receipt.order_id.to_string(),
            total: receipt.amount.clone(),
        }));
        self.flush_events();
        OrderConfirmation { receipt, item_count: pending.item_count(), message: ORDER_PLACED }
    }

    fn raise_event(&mut self, e: StoreEvent) { self.events.push(e); }

    fn flush_events(&mut self) {
        let mut events = std::mem::take(&mut self.events);
        events.extend(self.catalog.take_events());
        events.extend(self.cart.take_events());
        for event in events {
            tracing::info!(?event, "store event");
        }
    }
}
