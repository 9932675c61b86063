// ── API-to-domain type conversions ──
//
// Bridges raw `hostelio_api::models` response types into canonical
// `hostelio_core::model` domain types. Each `From` impl parses strings into
// strong types and drops values the backend sends in unexpected shapes.

use std::str::FromStr;

use tracing::debug;

use hostelio_api::Role;
use hostelio_api::models::{
    ApartmentRecord, BookingRecord, ChatRecord, HostelApprovalRecord, PaymentDetail, UserRecord,
    WishlistRecord,
};

use crate::model::{
    Apartment, ApprovalStatus, Booking, BookingStatus, ChatMessage, EntityId, GeoPoint, Guest,
    HostelApproval, PaymentMethod, UserAccount, WishlistItem,
};

// ── Helpers ────────────────────────────────────────────────────────

/// Parse an optional enum-valued string, logging and dropping unknown values.
fn parse_opt<T: FromStr>(field: &'static str, raw: Option<&str>) -> Option<T> {
    let raw = raw.map(str::trim).filter(|s| !s.is_empty())?;
    match raw.parse() {
        Ok(v) => Some(v),
        Err(_) => {
            debug!(field, value = raw, "unrecognised value, ignoring");
            None
        }
    }
}

fn booking_status(raw: Option<&str>) -> BookingStatus {
    parse_opt("status", raw).unwrap_or_default()
}

// ── Apartment ──────────────────────────────────────────────────────

impl From<ApartmentRecord> for Apartment {
    fn from(r: ApartmentRecord) -> Self {
        let coordinates = match (r.latitude, r.longitude) {
            (Some(latitude), Some(longitude)) => Some(GeoPoint {
                latitude,
                longitude,
            }),
            _ => None,
        };
        Self {
            id: r.apartment_id.into(),
            owner_id: r.owner.map(EntityId::from),
            title: r.title,
            description: r.description.filter(|d| !d.is_empty()),
            location: r.location,
            coordinates,
            rent: r.rent,
            duration: parse_opt("duration", r.duration.as_deref()),
            room_sharing: parse_opt("room_sharing_type", r.room_sharing_type.as_deref()),
            bhk: parse_opt("bhk", r.bhk.as_deref()),
            parking_available: r.parking_available,
            rating: r.rating,
            total_beds: r.total_beds,
            available_beds: r.available_beds,
            hostel_type: parse_opt("hostel_type", r.hostel_type.as_deref()),
            food_ids: r.food.into_iter().map(EntityId::from).collect(),
        }
    }
}

// ── Booking ────────────────────────────────────────────────────────

impl From<BookingRecord> for Booking {
    fn from(r: BookingRecord) -> Self {
        Self {
            id: r.booking_id.into(),
            apartment_id: Some(r.apartment.into()),
            user_id: Some(r.user.into()),
            start_date: r.booking_date,
            end_date: r.checkout_date,
            status: booking_status(r.status.as_deref()),
            amount: None,
            payment_id: None,
            payment_method: None,
            apartment_title: None,
            guest: None,
        }
    }
}

/// A payment row carries its booking, apartment, and guest expanded; the
/// booking view is assembled from all four.
impl From<PaymentDetail> for Booking {
    fn from(p: PaymentDetail) -> Self {
        let payment_id = p
            .razorpay_payment_id
            .filter(|s| !s.is_empty())
            .or_else(|| p.payment_id.map(|id| id.0));
        Self {
            id: p.booking.booking_id.into(),
            apartment_id: p.apartment.apartment_id.map(EntityId::from),
            user_id: p.user.id.map(EntityId::from),
            start_date: p.booking.booking_date,
            end_date: p.booking.checkout_date,
            status: booking_status(p.booking.status.as_deref()),
            amount: Some(p.amount),
            payment_id,
            payment_method: parse_opt::<PaymentMethod>("payment_method", p.payment_method.as_deref()),
            apartment_title: Some(p.apartment.title).filter(|t| !t.is_empty()),
            guest: Some(Guest {
                name: p.user.name,
                email: p.user.email,
                phone: p.user.phone,
            }),
        }
    }
}

// ── Chat ───────────────────────────────────────────────────────────

impl From<ChatRecord> for ChatMessage {
    fn from(r: ChatRecord) -> Self {
        Self {
            id: r.chat_id.map(EntityId::from),
            sender: r.sender.into(),
            receiver: r.receiver.into(),
            message: r.message,
            sent_at: r.timestamp,
        }
    }
}

// ── Accounts ───────────────────────────────────────────────────────

fn role_from_user_type(raw: Option<&str>) -> Option<Role> {
    match raw?.trim().to_ascii_lowercase().as_str() {
        "owner" | "hostel_owner" => Some(Role::Owner),
        "admin" => Some(Role::Admin),
        "user" | "seeker" | "customer" => Some(Role::Seeker),
        other => {
            debug!(user_type = other, "unrecognised user type");
            None
        }
    }
}

impl From<UserRecord> for UserAccount {
    fn from(r: UserRecord) -> Self {
        Self {
            id: r.id.into(),
            uid: r.user_id.filter(|s| !s.is_empty()),
            name: r.name,
            email: r.email,
            phone: r.phone.filter(|s| !s.is_empty()),
            role: role_from_user_type(r.user_type.as_deref()),
            active: r.is_active.unwrap_or(true),
            bio: r.bio.filter(|s| !s.trim().is_empty()),
            date_of_birth: r.date_of_birth,
            upi_id: r.upi_id.filter(|s| !s.trim().is_empty()),
        }
    }
}

impl From<WishlistRecord> for WishlistItem {
    fn from(r: WishlistRecord) -> Self {
        Self {
            id: r.wishlist_id.into(),
            apartment_id: r.apartment.into(),
            added_at: r.created_at,
        }
    }
}

impl From<HostelApprovalRecord> for HostelApproval {
    fn from(r: HostelApprovalRecord) -> Self {
        Self {
            id: r.approval_id.map(EntityId::from),
            apartment_id: r.apartment.into(),
            status: parse_opt::<ApprovalStatus>("status", r.status.as_deref()).unwrap_or_default(),
            comments: r.comments.filter(|c| !c.is_empty()),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::model::{Bhk, HostelType};
    use crate::pricing::DurationPreset;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn apartment_enums_are_parsed() {
        let rec: ApartmentRecord = serde_json::from_value(json!({
            "apartment_id": "4f1c2b8e-8a6e-4c57-9d7b-1f2e3a4b5c6d",
            "title": "Sunrise PG",
            "location": "Kakkanad, Kochi",
            "latitude": "10.0159",
            "longitude": "76.3419",
            "rent": "500.00",
            "duration": "long-term",
            "bhk": "2BHK",
            "hostel_type": "girls",
            "room_sharing_type": "dormitory"
        }))
        .unwrap();
        let apt = Apartment::from(rec);
        assert!(apt.id.as_uuid().is_some());
        assert_eq!(apt.duration, Some(DurationPreset::LongTerm));
        assert_eq!(apt.bhk, Some(Bhk::Two));
        assert_eq!(apt.hostel_type, Some(HostelType::Girls));
        assert_eq!(apt.room_sharing, None);
        assert!(apt.coordinates.is_some());
    }

    #[test]
    fn payment_row_becomes_booking_view() {
        let detail: PaymentDetail = serde_json::from_value(json!({
            "payment_id": "pay-1",
            "amount": "2500.00",
            "payment_method": "razorpay",
            "razorpay_payment_id": "pay_N5x1",
            "booking": {
                "booking_id": "b3a4c2d1-1111-2222-3333-444455556666",
                "booking_date": "2024-03-01T00:00:00Z",
                "checkout_date": "2024-03-05T00:00:00Z",
                "status": "active"
            },
            "apartment": { "title": "Sunrise PG" },
            "user": { "name": "Asha", "email": "asha@example.com" }
        }))
        .unwrap();
        let booking = Booking::from(detail);
        assert_eq!(booking.status, BookingStatus::Active);
        assert_eq!(booking.payment_id.as_deref(), Some("pay_N5x1"));
        assert_eq!(booking.payment_method, Some(PaymentMethod::Razorpay));
        assert_eq!(booking.apartment_title.as_deref(), Some("Sunrise PG"));
        assert_eq!(booking.guest.unwrap().name, "Asha");
    }

    #[test]
    fn unknown_booking_status_defaults_to_pending() {
        let rec: BookingRecord = serde_json::from_value(json!({
            "booking_id": "bk-1",
            "apartment": "apt-1",
            "user": 7,
            "booking_date": "2024-03-01T00:00:00Z",
            "status": "on-hold"
        }))
        .unwrap();
        assert_eq!(Booking::from(rec).status, BookingStatus::Pending);
    }

    #[test]
    fn blank_profile_fields_read_as_unset() {
        let rec: UserRecord = serde_json::from_value(json!({
            "id": 12,
            "name": "Ravi Menon",
            "email": "ravi@example.com",
            "user_type": "owner",
            "bio": "  ",
            "date_of_birth": "",
            "upi_id": "ravi@okhdfc"
        }))
        .unwrap();
        let account = UserAccount::from(rec);
        assert_eq!(account.role, Some(Role::Owner));
        assert_eq!(account.bio, None);
        assert_eq!(account.date_of_birth, None);
        assert_eq!(account.upi_id.as_deref(), Some("ravi@okhdfc"));
    }

    #[test]
    fn user_type_maps_to_role() {
        assert_eq!(role_from_user_type(Some("Owner")), Some(Role::Owner));
        assert_eq!(role_from_user_type(Some("user")), Some(Role::Seeker));
        assert_eq!(role_from_user_type(None), None);
    }
}
