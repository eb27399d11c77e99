//! ShopOrbit Storefront
//!
//! Headless demo storefront. Everything is simulated and held in memory.
//!
//! ## Features
//! - Product catalog browsing by category and name
//! - Shopping cart with live totals
//! - Simulated checkout and login
//! - "Sell a product" listings
//! - Shopping assistant backed by a generative text API

pub mod api;
pub mod assistant;
pub mod auth;
pub mod config;
pub mod domain;
pub mod payment;
pub mod persistence;
pub mod storefront;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use domain::aggregates::{Cart, CartLine, Catalog, Product, SellListing};
pub use domain::value_objects::{CategoryFilter, Money, Quantity};
pub use storefront::Storefront;

/// Inline message shown when a form is submitted with required fields left blank.
pub const MISSING_FIELDS: &str = "Please fill in all fields.";

// =============================================================================
// Core Types
// =============================================================================

/// Locally signed-in shopper. Never verified against a server.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub username: String,
    pub email: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Model,
}

/// One entry in the assistant transcript.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: ChatRole,
    pub text: String,
    pub at: DateTime<Utc>,
}

impl ChatTurn {
    pub fn user(text: impl Into<String>) -> Self {
        Self { role: ChatRole::User, text: text.into(), at: Utc::now() }
    }

    pub fn model(text: impl Into<String>) -> Self {
        Self { role: ChatRole::Model, text: text.into(), at: Utc::now() }
    }
}

// =============================================================================
// Error Types
// =============================================================================

#[derive(Error, Debug)]
pub enum ShopError {
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    #[error("{0}")]
    Validation(String),

    #[error("Please log in to continue")]
    LoginRequired,

    #[error("Cart is empty")]
    EmptyCart,

    #[error("Product already listed: {0}")]
    DuplicateProduct(String),

    #[error("Assistant is still answering the previous message")]
    AssistantBusy,

    #[error("Payment is already being processed")]
    CheckoutInProgress,

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Storage error: {0}")]
    StorageError(String),
}

pub type Result<T> = std::result::Result<T, ShopError>;
