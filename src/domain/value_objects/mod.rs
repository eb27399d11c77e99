//! Value Objects for the storefront

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Money value object
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Money { amount: Decimal, currency: String }

impl Money {
    pub fn new(amount: Decimal, currency: &str) -> Self { Self { amount, currency: currency.to_string() } }
    pub fn usd(amount: Decimal) -> Self { Self::new(amount, "USD") }
    pub fn zero(currency: &str) -> Self { Self::new(Decimal::ZERO, currency) }
    pub fn amount(&self) -> Decimal { self.amount }
    pub fn currency(&self) -> &str { &self.currency }
    pub fn is_zero(&self) -> bool { self.amount.is_zero() }
    pub fn add(&self, other: &Money) -> Result<Money, MoneyError> {
        if self.currency != other.currency { return Err(MoneyError::CurrencyMismatch); }
        Ok(Money::new(self.amount + other.amount, &self.currency))
    }
    pub fn multiply(&self, qty: u32) -> Money { Money::new(self.amount * Decimal::from(qty), &self.currency) }
}

impl Default for Money { fn default() -> Self { Self::zero("USD") } }

/// Renders as a price tag, dropping trailing zeros (`$189.5`, `$349`).
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.currency.as_str() {
            "USD" => write!(f, "${}", self.amount.normalize()),
            other => write!(f, "{} {}", self.amount.normalize(), other),
        }
    }
}

#[derive(Debug, Clone)] pub enum MoneyError { CurrencyMismatch }
impl std::error::Error for MoneyError {}
impl fmt::Display for MoneyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "Currency mismatch") }
}

/// Cart line quantity. Never drops below one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Quantity(u32);

impl Quantity {
    pub const ONE: Quantity = Quantity(1);

    pub fn new(value: u32) -> Self { Self(value.max(1)) }
    pub fn value(&self) -> u32 { self.0 }
    pub fn increment(&self) -> Self { Self(self.0.saturating_add(1)) }

    /// Applies a signed delta, flooring the result at one.
    pub fn adjust(&self, delta: i64) -> Self {
        let next = (i64::from(self.0) + delta).clamp(1, i64::from(u32::MAX));
        Self(next as u32)
    }
}

impl Default for Quantity { fn default() -> Self { Self::ONE } }

/// Category selector for catalog browsing.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    #[default]
    All,
    Named(String),
}

impl CategoryFilter {
    pub const ALL_LABEL: &'static str = "All";

    /// Parses a selector value. `"All"`, blank and missing all mean no filtering.
    pub fn parse(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            None | Some("") => Self::All,
            Some(v) if v.eq_ignore_ascii_case(Self::ALL_LABEL) => Self::All,
            Some(v) => Self::Named(v.to_string()),
        }
    }

    pub fn matches(&self, category: &str) -> bool {
        match self {
            Self::All => true,
            Self::Named(name) => name == category,
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self { Self::All => write!(f, "{}", Self::ALL_LABEL), Self::Named(n) => write!(f, "{}", n) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn test_money_add() {
        let a = Money::usd(Decimal::new(100, 0));
        let b = Money::usd(Decimal::new(50, 0));
        assert_eq!(a.add(&b).unwrap().amount(), Decimal::new(150, 0));
    }
    #[test]
    fn test_money_currency_mismatch() {
        let a = Money::usd(Decimal::ONE);
        let b = Money::new(Decimal::ONE, "EUR");
        assert!(a.add(&b).is_err());
    }
    #[test]
    fn test_money_display() {
        assert_eq!(Money::usd(Decimal::new(18950, 2)).to_string(), "$189.5");
        assert_eq!(Money::usd(Decimal::new(34900, 2)).to_string(), "$349");
        assert_eq!(Money::usd(Decimal::new(129999, 2)).to_string(), "$1299.99");
    }
    #[test]
    fn test_quantity_floor() {
        assert_eq!(Quantity::ONE.adjust(-1), Quantity::ONE);
        assert_eq!(Quantity::new(3).adjust(-10).value(), 1);
        assert_eq!(Quantity::new(2).adjust(1).value(), 3);
        assert_eq!(Quantity::new(0).value(), 1);
    }
    #[test]
    fn test_category_filter_parse() {
        assert_eq!(CategoryFilter::parse(None), CategoryFilter::All);
        assert_eq!(CategoryFilter::parse(Some("All")), CategoryFilter::All);
        assert_eq!(CategoryFilter::parse(Some(" ")), CategoryFilter::All);
        assert_eq!(CategoryFilter::parse(Some("Audio")), CategoryFilter::Named("Audio".into()));
        assert!(CategoryFilter::All.matches("Food"));
        assert!(!CategoryFilter::Named("Audio".into()).matches("audio"));
    }
}
