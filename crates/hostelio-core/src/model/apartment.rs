// ── Apartment domain types ──

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use super::entity_id::EntityId;
use crate::pricing::DurationPreset;

/// Whether rooms are private or shared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum RoomSharing {
    Private,
    Shared,
}

/// Flat size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum Bhk {
    #[serde(rename = "1BHK")]
    #[strum(serialize = "1BHK", serialize = "1")]
    One,
    #[serde(rename = "2BHK")]
    #[strum(serialize = "2BHK", serialize = "2")]
    Two,
    #[serde(rename = "3BHK")]
    #[strum(serialize = "3BHK", serialize = "3")]
    Three,
}

/// Which residents a hostel accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum HostelType {
    Boys,
    Girls,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: Decimal,
    pub longitude: Decimal,
}

/// The canonical Apartment (listing) type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Apartment {
    pub id: EntityId,
    pub owner_id: Option<EntityId>,
    pub title: String,
    pub description: Option<String>,
    pub location: String,
    pub coordinates: Option<GeoPoint>,
    /// Nightly rent.
    pub rent: Decimal,
    pub duration: Option<DurationPreset>,
    pub room_sharing: Option<RoomSharing>,
    pub bhk: Option<Bhk>,
    pub parking_available: bool,
    pub rating: Option<Decimal>,
    pub total_beds: Option<u32>,
    pub available_beds: Option<u32>,
    pub hostel_type: Option<HostelType>,
    pub food_ids: Vec<EntityId>,
}

impl Apartment {
    /// `true` when the listing reports at least one free bed, or does not
    /// track beds at all.
    pub fn has_vacancy(&self) -> bool {
        self.available_beds.is_none_or(|n| n > 0)
    }
}

/// Review state of a listing awaiting admin approval.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, Default,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ApprovalStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HostelApproval {
    pub id: Option<EntityId>,
    pub apartment_id: EntityId,
    pub status: ApprovalStatus,
    pub comments: Option<String>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn listing(total: Option<u32>, free: Option<u32>) -> Apartment {
        Apartment {
            id: EntityId::from("apt-1"),
            owner_id: None,
            title: "Sunrise PG".into(),
            description: None,
            location: "Kochi".into(),
            coordinates: None,
            rent: Decimal::from(450),
            duration: None,
            room_sharing: None,
            bhk: None,
            parking_available: false,
            rating: None,
            total_beds: total,
            available_beds: free,
            hostel_type: None,
            food_ids: Vec::new(),
        }
    }

    #[test]
    fn vacancy_follows_free_beds() {
        assert!(listing(Some(4), Some(1)).has_vacancy());
        assert!(!listing(Some(4), Some(0)).has_vacancy());
        assert!(listing(None, None).has_vacancy());
    }

    #[test]
    fn bhk_accepts_bare_digits() {
        assert_eq!("2".parse::<Bhk>().unwrap(), Bhk::Two);
        assert_eq!("3bhk".parse::<Bhk>().unwrap(), Bhk::Three);
    }
}
