// Wire schemas for the marketplace backend.
//
// These mirror the JSON the backend actually sends, with every field the
// backend may omit marked `#[serde(default)]`. Conversion into canonical
// domain types happens in `hostelio-core`.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Identifiers arrive as UUID strings, Firebase UIDs, or integer primary
/// keys depending on the table. They are kept as strings at this layer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct RawId(pub String);

impl<'de> Deserialize<'de> for RawId {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Str(String),
            Int(i64),
        }
        Ok(match Repr::deserialize(deserializer)? {
            Repr::Str(s) => Self(s),
            Repr::Int(i) => Self(i.to_string()),
        })
    }
}

impl std::fmt::Display for RawId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RawId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

// ── Authentication ───────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub(crate) struct LoginRequest<'a> {
    pub email: &'a str,
    /// The backend reads the password from this field name.
    pub password_hash: &'a str,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub access: String,
    #[serde(default)]
    pub refresh: Option<String>,
    #[serde(default)]
    pub user_id: Option<RawId>,
    #[serde(default)]
    pub id: Option<RawId>,
    #[serde(default)]
    pub admin_id: Option<RawId>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

/// A new seeker or owner account. The password travels separately.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub email: String,
    pub phone: String,
    pub name: String,
    pub role: crate::auth::Role,
}

#[derive(Debug, Serialize)]
pub(crate) struct SignupRequest<'a> {
    pub email: &'a str,
    pub phone: &'a str,
    pub password_hash: &'a str,
    pub name: &'a str,
    pub user_type: crate::auth::Role,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SignupResponse {
    #[serde(default)]
    pub message: Option<String>,
    /// Auth UID of the created account.
    #[serde(default)]
    pub user_id: Option<RawId>,
}

// ── Users ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UserRecord {
    pub id: RawId,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub user_type: Option<String>,
    #[serde(default)]
    pub is_active: Option<bool>,
    #[serde(default)]
    pub bio: Option<String>,
    /// Blank or malformed dates read as unset.
    #[serde(default, deserialize_with = "lenient_date")]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(default)]
    pub upi_id: Option<String>,
}

fn lenient_date<'de, D: serde::Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<NaiveDate>, D::Error> {
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.and_then(|s| NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok()))
}

/// Body of `PUT update-profile/`. Unset fields are left untouched.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProfileUpdateRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upi_id: Option<String>,
}

// ── Apartments ───────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApartmentRecord {
    pub apartment_id: RawId,
    #[serde(default)]
    pub owner: Option<RawId>,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub latitude: Option<Decimal>,
    #[serde(default)]
    pub longitude: Option<Decimal>,
    pub rent: Decimal,
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(default)]
    pub room_sharing_type: Option<String>,
    #[serde(default)]
    pub bhk: Option<String>,
    #[serde(default)]
    pub parking_available: bool,
    #[serde(default)]
    pub rating: Option<Decimal>,
    #[serde(default)]
    pub total_beds: Option<u32>,
    #[serde(default)]
    pub available_beds: Option<u32>,
    #[serde(default)]
    pub hostel_type: Option<String>,
    #[serde(default)]
    pub food: Vec<RawId>,
}

/// `GET apartment/by-owner/{owner_id}/` wraps its list.
#[derive(Debug, Clone, Deserialize)]
pub struct OwnerApartments {
    #[serde(default)]
    pub total_apartments: Option<u32>,
    #[serde(default)]
    pub apartments: Vec<ApartmentRecord>,
}

// ── Bookings ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct CreateBookingRequest {
    pub user: String,
    pub apartment: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checkout_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateBookingResponse {
    pub booking_id: RawId,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BookingRecord {
    pub booking_id: RawId,
    pub apartment: RawId,
    pub user: RawId,
    pub booking_date: DateTime<Utc>,
    #[serde(default)]
    pub checkout_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub status: Option<String>,
}

// ── Payments ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct PaymentLinkRequest {
    pub user_id: String,
    pub apartment_id: String,
    pub amount: Decimal,
    pub booking_id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PaymentLinkResponse {
    pub payment_url: String,
    pub razorpay_order_id: String,
    #[serde(default)]
    pub transaction_id: Option<String>,
    #[serde(default)]
    pub payment_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PaymentStatusResponse {
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
}

/// Nested apartment summary inside a payment detail row.
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentApartment {
    #[serde(default)]
    pub apartment_id: Option<RawId>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub rent: Option<Decimal>,
}

/// Nested booking inside a payment detail row.
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentBooking {
    pub booking_id: RawId,
    pub booking_date: DateTime<Utc>,
    #[serde(default)]
    pub checkout_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub status: Option<String>,
}

/// Nested guest inside a payment detail row.
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentUser {
    #[serde(default)]
    pub id: Option<RawId>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
}

/// One row of `GET payments/user/{id}`: a payment with its booking,
/// apartment, and guest expanded.
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentDetail {
    #[serde(default)]
    pub payment_id: Option<RawId>,
    pub booking: PaymentBooking,
    pub apartment: PaymentApartment,
    pub user: PaymentUser,
    pub amount: Decimal,
    #[serde(default)]
    pub razorpay_order_id: Option<String>,
    #[serde(default)]
    pub razorpay_payment_id: Option<String>,
    #[serde(default)]
    pub payment_status: Option<String>,
    #[serde(default)]
    pub payment_method: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UserPayments {
    #[serde(default)]
    pub total_payments: Option<u32>,
    #[serde(default)]
    pub payments: Vec<PaymentDetail>,
}

// ── Chat ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ChatRecord {
    #[serde(default)]
    pub chat_id: Option<RawId>,
    pub sender: RawId,
    pub receiver: RawId,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub(crate) struct SendMessageRequest<'a> {
    pub message: &'a str,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SendMessageResponse {
    pub data: ChatRecord,
}

// ── Wishlist ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WishlistRecord {
    pub wishlist_id: RawId,
    #[serde(default)]
    pub user: Option<RawId>,
    pub apartment: RawId,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

// ── Admin ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HostelApprovalRecord {
    #[serde(default)]
    pub approval_id: Option<RawId>,
    pub apartment: RawId,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub comments: Option<String>,
}
