// ── Owner dashboard ──
//
// One snapshot of everything an owner manages: live listings, listings
// waiting for approval, bookings received, and the tenants behind them.

use std::collections::HashMap;

use serde::Serialize;

use crate::model::{Apartment, Booking, EntityId, UserAccount};

#[derive(Debug, Clone, Default, Serialize)]
pub struct OwnerDashboard {
    pub listed: Vec<Apartment>,
    /// Only the signed-in owner's own listings.
    pub pending: Vec<Apartment>,
    pub bookings: Vec<Booking>,
    pub tenants: HashMap<EntityId, UserAccount>,
}

impl OwnerDashboard {
    pub fn new(
        listed: Vec<Apartment>,
        pending: Vec<Apartment>,
        bookings: Vec<Booking>,
        tenants: Vec<UserAccount>,
    ) -> Self {
        Self {
            listed,
            pending,
            bookings,
            tenants: tenants.into_iter().map(|t| (t.id.clone(), t)).collect(),
        }
    }

    /// Display name of whoever made `booking`, falling back to the raw
    /// user id when the tenant list does not cover them.
    pub fn tenant_name(&self, booking: &Booking) -> Option<String> {
        let user = booking.user_id.as_ref()?;
        Some(
            self.tenants
                .get(user)
                .map_or_else(|| user.to_string(), |t| t.name.clone()),
        )
    }

    /// Title of the listing a booking belongs to, when it is one of ours.
    pub fn listing_title(&self, booking: &Booking) -> Option<&str> {
        let apartment = booking.apartment_id.as_ref()?;
        self.listed
            .iter()
            .chain(&self.pending)
            .find(|a| &a.id == apartment)
            .map(|a| a.title.as_str())
    }
}
