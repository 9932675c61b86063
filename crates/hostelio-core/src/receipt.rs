// ── Booking confirmation document ──
//
// A printable confirmation assembled from a booking view and rendered as
// plain text.

use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::model::{Booking, BookingStatus, Guest};

pub const COMPANY_NAME: &str = "Hostelio";
pub const COMPANY_ADDRESS: &str =
    "Industrial Development Area, Muppathadam Rd, Edayar, Kochi, Kerala 683110";
pub const COMPANY_CONTACT: &str = "+91 478 2839756 | bookings@hostelio.com";

pub const TERMS: [&str; 5] = [
    "1. Check-in time is from 3:00 PM, and check-out time is by 11:00 AM.",
    "2. A valid ID is required at check-in.",
    "3. No smoking allowed inside the accommodations.",
    "4. Pets are not permitted without prior approval.",
    "5. Cancellations must be made 48 hours prior to arrival for a full refund.",
];

const NOT_AVAILABLE: &str = "N/A";
const RULE_WIDTH: usize = 72;

#[derive(Debug, Clone, Serialize)]
pub struct BookingConfirmation {
    pub reference: String,
    pub status: BookingStatus,
    pub guest: Option<Guest>,
    pub property: String,
    pub check_in: DateTime<Utc>,
    pub check_out: Option<DateTime<Utc>>,
    pub duration_days: Option<i64>,
    pub payment_method: Option<String>,
    pub payment_id: Option<String>,
    pub total_amount: Option<Decimal>,
}

impl BookingConfirmation {
    pub fn from_booking(booking: &Booking) -> Self {
        let property = booking
            .apartment_title
            .clone()
            .or_else(|| booking.apartment_id.as_ref().map(ToString::to_string))
            .unwrap_or_else(|| NOT_AVAILABLE.to_owned());
        Self {
            reference: booking.id.to_string(),
            status: booking.status,
            guest: booking.guest.clone(),
            property,
            check_in: booking.start_date,
            check_out: booking.end_date,
            duration_days: booking.stay_days(),
            payment_method: booking.payment_method.map(|m| m.to_string()),
            payment_id: booking.payment_id.clone(),
            total_amount: booking.amount,
        }
    }

    /// `Booking-<first 8 characters of the reference>.txt`
    pub fn file_name(&self) -> String {
        let short: String = self.reference.chars().take(8).collect();
        format!("Booking-{short}.txt")
    }

    pub fn to_text(&self) -> String {
        self.to_string()
    }
}

fn format_date(dt: &DateTime<Utc>) -> String {
    dt.format("%B %-d, %Y, %I:%M %p").to_string()
}

/// Two decimal places, e.g. `INR 2500.00`.
pub fn format_amount(mut amount: Decimal) -> String {
    amount.rescale(2);
    format!("INR {amount}")
}

fn or_na(value: Option<&str>) -> &str {
    value.unwrap_or(NOT_AVAILABLE)
}

fn heading(f: &mut fmt::Formatter<'_>, title: &str) -> fmt::Result {
    writeln!(f)?;
    writeln!(f, "{title}")?;
    writeln!(f, "{}", "-".repeat(title.len()))
}

impl fmt::Display for BookingConfirmation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "=".repeat(RULE_WIDTH);
        writeln!(f, "{rule}")?;
        writeln!(f, "{COMPANY_NAME:^RULE_WIDTH$}")?;
        writeln!(f, "{COMPANY_ADDRESS:^RULE_WIDTH$}")?;
        writeln!(f, "{COMPANY_CONTACT:^RULE_WIDTH$}")?;
        writeln!(f, "{rule}")?;
        writeln!(f, "{:^RULE_WIDTH$}", "BOOKING CONFIRMATION")?;
        writeln!(f, "{:^RULE_WIDTH$}", format!("Reference: {}", self.reference))?;
        writeln!(
            f,
            "{:^RULE_WIDTH$}",
            format!("[ {} ]", self.status.to_string().to_uppercase())
        )?;

        heading(f, "Guest Information")?;
        let guest = self.guest.as_ref();
        writeln!(f, "Name:  {}", or_na(guest.map(|g| g.name.as_str())))?;
        writeln!(f, "Email: {}", or_na(guest.map(|g| g.email.as_str())))?;
        writeln!(f, "Phone: {}", or_na(guest.and_then(|g| g.phone.as_deref())))?;

        heading(f, "Accommodation Details")?;
        writeln!(f, "Property: {}", self.property)?;

        heading(f, "Booking Period")?;
        writeln!(f, "Check-in:  {}", format_date(&self.check_in))?;
        let check_out = self.check_out.as_ref().map(format_date);
        writeln!(f, "Check-out: {}", or_na(check_out.as_deref()))?;
        match self.duration_days {
            Some(days) => writeln!(f, "Duration:  {days} days")?,
            None => writeln!(f, "Duration:  {NOT_AVAILABLE}")?,
        }

        heading(f, "Payment Information")?;
        writeln!(f, "Method:       {}", or_na(self.payment_method.as_deref()))?;
        writeln!(f, "Payment ID:   {}", or_na(self.payment_id.as_deref()))?;
        let total = self.total_amount.map(format_amount);
        writeln!(f, "Total Amount: {}", or_na(total.as_deref()))?;
        writeln!(f, "Booking Date: {}", format_date(&self.check_in))?;

        heading(f, "Terms & Conditions")?;
        for term in TERMS {
            writeln!(f, "{term}")?;
        }

        writeln!(f)?;
        writeln!(f, "{rule}")?;
        writeln!(
            f,
            "Thank you for choosing {COMPANY_NAME}. We look forward to hosting you!"
        )
    }
}
