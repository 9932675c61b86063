// ── Booking domain types ──

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use super::entity_id::EntityId;
use crate::expiry::BookingExpiry;

/// Lifecycle state of a booking. Transitions are driven by the backend;
/// the client only reflects them.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, Default,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum BookingStatus {
    #[default]
    Pending,
    Active,
    Completed,
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum PaymentMethod {
    Razorpay,
    Cash,
}

/// Contact details of the seeker who made a booking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Guest {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
}

/// The canonical Booking type.
///
/// Built either from a bare booking row (`bookings/user/{id}/`) or from a
/// payment row with the booking expanded (`payments/user/{id}`); the
/// payment-derived fields are `None` in the first case.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
    pub id: EntityId,
    pub apartment_id: Option<EntityId>,
    pub user_id: Option<EntityId>,
    pub start_date: DateTime<Utc>,
    pub end_date: Option<DateTime<Utc>>,
    pub status: BookingStatus,
    pub amount: Option<Decimal>,
    pub payment_id: Option<String>,
    pub payment_method: Option<PaymentMethod>,

    // Display extras carried by the payment view
    pub apartment_title: Option<String>,
    pub guest: Option<Guest>,
}

impl Booking {
    /// Payment deadline derived from the start date.
    pub fn expiry(&self) -> BookingExpiry {
        BookingExpiry::from_start(self.start_date)
    }

    /// Whole days between check-in and check-out, rounded up.
    /// `None` when the backend did not report a check-out date.
    pub fn stay_days(&self) -> Option<i64> {
        let end = self.end_date?;
        let secs = (end - self.start_date).num_seconds().abs();
        Some((secs + 86_399) / 86_400)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn booking(start: DateTime<Utc>, end: Option<DateTime<Utc>>) -> Booking {
        Booking {
            id: "bk-1".into(),
            apartment_id: None,
            user_id: None,
            start_date: start,
            end_date: end,
            status: BookingStatus::Active,
            amount: None,
            payment_id: None,
            payment_method: None,
            apartment_title: None,
            guest: None,
        }
    }

    #[test]
    fn stay_days_rounds_partial_days_up() {
        let start = Utc.with_ymd_and_hms(2024, 3, 1, 15, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2024, 3, 5, 11, 0, 0).unwrap();
        assert_eq!(booking(start, Some(end)).stay_days(), Some(4));
        assert_eq!(booking(start, None).stay_days(), None);
    }

    #[test]
    fn status_parses_case_insensitively() {
        assert_eq!("Active".parse::<BookingStatus>().unwrap(), BookingStatus::Active);
        assert_eq!(BookingStatus::Cancelled.to_string(), "cancelled");
    }
}
