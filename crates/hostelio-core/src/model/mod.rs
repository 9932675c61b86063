// ── Domain model ──
//
// Canonical types consumed by the CLI. Wire shapes from `hostelio-api`
// are converted into these in `crate::convert`.

pub mod account;
pub mod apartment;
pub mod booking;
pub mod chat;
pub mod entity_id;
pub mod payment;

pub use account::{UserAccount, WishlistItem};
pub use apartment::{
    Apartment, ApprovalStatus, Bhk, GeoPoint, HostelApproval, HostelType, RoomSharing,
};
pub use booking::{Booking, BookingStatus, Guest, PaymentMethod};
pub use chat::ChatMessage;
pub use entity_id::EntityId;
pub use payment::{PaymentOrder, PaymentStatus};
