// ── Payment domain types ──

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use url::Url;

use super::entity_id::EntityId;

/// An external payment-gateway order created for one booking attempt.
///
/// Held only in workflow state. Once the order is observed paid or the
/// poller times out, it is not reused: a retry needs a fresh order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentOrder {
    pub razorpay_order_id: String,
    pub payment_url: Url,
    pub amount: Decimal,
    pub booking_id: EntityId,
}

/// Status reported by `GET payment/status/{order_id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentStatus {
    Paid,
    Pending,
    /// Anything else the gateway reports (`"attempted"`, `"created"`, ...).
    Other(String),
}

impl PaymentStatus {
    pub fn is_paid(&self) -> bool {
        matches!(self, Self::Paid)
    }
}

impl From<&str> for PaymentStatus {
    fn from(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "paid" => Self::Paid,
            "pending" => Self::Pending,
            other => Self::Other(other.to_owned()),
        }
    }
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Paid => f.write_str("paid"),
            Self::Pending => f.write_str("pending"),
            Self::Other(s) => f.write_str(s),
        }
    }
}
