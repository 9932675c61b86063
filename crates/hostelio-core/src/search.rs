// ── Apartment search filter ──
//
// Client-side narrowing of an already-fetched listing. Unset criteria
// match everything.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::model::{Apartment, Bhk, HostelType, RoomSharing};
use crate::pricing::DurationPreset;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchFilter {
    /// Case-insensitive match against title or location.
    pub text: Option<String>,
    pub rent_min: Option<Decimal>,
    pub rent_max: Option<Decimal>,
    pub duration: Option<DurationPreset>,
    pub room_sharing: Option<RoomSharing>,
    /// `Some(true)` keeps only listings with parking.
    pub parking: Option<bool>,
    pub hostel_type: Option<HostelType>,
    pub bhk: Option<Bhk>,
}

impl SearchFilter {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Overlay `update`, keeping current values for fields it leaves unset.
    pub fn merge(&mut self, update: SearchFilter) {
        let SearchFilter {
            text,
            rent_min,
            rent_max,
            duration,
            room_sharing,
            parking,
            hostel_type,
            bhk,
        } = update;
        if text.is_some() {
            self.text = text;
        }
        self.rent_min = rent_min.or(self.rent_min);
        self.rent_max = rent_max.or(self.rent_max);
        self.duration = duration.or(self.duration);
        self.room_sharing = room_sharing.or(self.room_sharing);
        self.parking = parking.or(self.parking);
        self.hostel_type = hostel_type.or(self.hostel_type);
        self.bhk = bhk.or(self.bhk);
    }

    pub fn matches(&self, apt: &Apartment) -> bool {
        if let Some(text) = self.text.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
            let needle = text.to_lowercase();
            if !apt.title.to_lowercase().contains(&needle)
                && !apt.location.to_lowercase().contains(&needle)
            {
                return false;
            }
        }
        if self.rent_min.is_some_and(|min| apt.rent < min) {
            return false;
        }
        if self.rent_max.is_some_and(|max| apt.rent > max) {
            return false;
        }
        if self.duration.is_some() && apt.duration != self.duration {
            return false;
        }
        if self.room_sharing.is_some() && apt.room_sharing != self.room_sharing {
            return false;
        }
        if self.parking == Some(true) && !apt.parking_available {
            return false;
        }
        if self.hostel_type.is_some() && apt.hostel_type != self.hostel_type {
            return false;
        }
        if self.bhk.is_some() && apt.bhk != self.bhk {
            return false;
        }
        true
    }

    pub fn apply<'a>(&self, apartments: &'a [Apartment]) -> Vec<&'a Apartment> {
        apartments.iter().filter(|a| self.matches(a)).collect()
    }
}
