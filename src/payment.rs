//! Simulated payment acceptance.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::domain::value_objects::Money;

pub const DEFAULT_PAYMENT_DELAY: Duration = Duration::from_millis(2000);

/// Stands in for a payment provider: waits, then always approves.
#[derive(Clone, Debug)]
pub struct PaymentSimulator {
    delay: Duration,
}

#[derive(Clone, Debug, Serialize)]
pub struct PaymentReceipt {
    pub order_id: Uuid,
    pub amount: Money,
    pub paid_at: DateTime<Utc>,
}

impl PaymentSimulator {
    pub fn new(delay: Duration) -> Self { Self { delay } }

    pub async fn pay(&self, amount: Money) -> PaymentReceipt {
        tracing::info!(%amount, delay_ms = self.delay.as_millis() as u64, "processing simulated payment");
        tokio::time::sleep(self.delay).await;
        let receipt = PaymentReceipt { order_id: Uuid::new_v4(), amount, paid_at: Utc::now() };
        tracing::info!(order_id = %receipt.order_id, "simulated payment approved");
        receipt
    }
}

impl Default for PaymentSimulator { fn default() -> Self { Self::new(DEFAULT_PAYMENT_DELAY) } }

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[tokio::test]
    async fn test_payment_waits_then_approves() {
        let payments = PaymentSimulator::new(Duration::from_millis(20));
        let started = std::time::Instant::now();
        let receipt = payments.pay(Money::usd(Decimal::new(4550, 2))).await;
        assert!(started.elapsed() >= Duration::from_millis(20));
        assert_eq!(receipt.amount.amount(), Decimal::new(4550, 2));
    }
}
