// ── Account and wishlist domain types ──

use chrono::{DateTime, NaiveDate, Utc};
use hostelio_api::Role;
use serde::{Deserialize, Serialize};

use super::entity_id::EntityId;

/// A registered marketplace user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserAccount {
    pub id: EntityId,
    /// External auth UID, when the backend exposes one.
    pub uid: Option<String>,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub role: Option<Role>,
    pub active: bool,
    pub bio: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    /// Where owners receive rent.
    pub upi_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WishlistItem {
    pub id: EntityId,
    pub apartment_id: EntityId,
    pub added_at: Option<DateTime<Utc>>,
}
