//! Domain events
use crate::domain::value_objects::Money;

#[derive(Clone, Debug, PartialEq)]
pub enum StoreEvent {
    Catalog(CatalogEvent),
    Cart(CartEvent),
    Session(SessionEvent),
}

#[derive(Clone, Debug, PartialEq)]
pub enum CatalogEvent {
    ProductListed { product_id: String, seller: Option<String> },
}

#[derive(Clone, Debug, PartialEq)]
pub enum CartEvent {
    LineAdded { product_id: String },
    LineRemoved { product_id: String },
    CheckedOut { order_id: String, total: Money },
    Cleared,
}

#[derive(Clone, Debug, PartialEq)]
pub enum SessionEvent {
    SignedIn { username: String },
    SignedOut { username: String },
}
