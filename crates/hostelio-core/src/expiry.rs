// ── Booking expiry policy ──
//
// A booking must be paid within 30 days of its start date. The deadline is
// derived on demand and never stored.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

/// Calendar days between a booking's start and its payment deadline.
pub const PAYMENT_WINDOW_DAYS: i64 = 30;

const MILLIS_PER_DAY: i64 = 86_400_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BookingExpiry {
    pub start_date: DateTime<Utc>,
    pub deadline: DateTime<Utc>,
}

impl BookingExpiry {
    pub fn from_start(start_date: DateTime<Utc>) -> Self {
        Self {
            start_date,
            deadline: payment_deadline(start_date),
        }
    }

    /// Whole days until the deadline, rounded up. Negative once it has
    /// passed.
    pub fn days_remaining(&self, now: DateTime<Utc>) -> i64 {
        days_remaining(self.deadline, now)
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.deadline
    }
}

pub fn payment_deadline(start_date: DateTime<Utc>) -> DateTime<Utc> {
    start_date + Duration::days(PAYMENT_WINDOW_DAYS)
}

/// `ceil(deadline − now)` in days, unclamped.
pub fn days_remaining(deadline: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    let millis = (deadline - now).num_milliseconds();
    -(-millis).div_euclid(MILLIS_PER_DAY)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
    }

    #[test]
    fn deadline_is_thirty_days_after_start() {
        for start in [at(2024, 1, 1, 0), at(2024, 2, 15, 13), at(2023, 12, 31, 23)] {
            assert_eq!(payment_deadline(start) - start, Duration::days(30));
        }
        assert_eq!(payment_deadline(at(2024, 2, 15, 0)), at(2024, 3, 16, 0));
    }

    #[test]
    fn partial_days_round_up() {
        let expiry = BookingExpiry::from_start(at(2024, 1, 1, 0));
        assert_eq!(expiry.days_remaining(at(2024, 1, 1, 0)), 30);
        assert_eq!(expiry.days_remaining(at(2024, 1, 1, 1)), 30);
        assert_eq!(expiry.days_remaining(at(2024, 1, 30, 23)), 1);
        assert_eq!(expiry.days_remaining(at(2024, 1, 31, 0)), 0);
    }

    #[test]
    fn past_deadline_goes_negative() {
        let expiry = BookingExpiry::from_start(at(2024, 1, 1, 0));
        assert_eq!(expiry.days_remaining(at(2024, 2, 2, 0)), -2);
        assert_eq!(expiry.days_remaining(at(2024, 2, 1, 12)), -1);
        assert!(expiry.is_expired(at(2024, 1, 31, 0)));
    }
}
