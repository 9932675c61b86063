//! Booking workflow and domain layer between `hostelio-api` and front ends.
//!
//! - **[`Marketplace`]**: Facade owning the HTTP client and the current
//!   [`Session`]. Converts wire records into domain types and vends the
//!   background pollers.
//!
//! - **Payment confirmation** ([`payment`]): [`PaymentPoller`] watches a
//!   gateway order on a fixed cadence until it is paid or a ceiling
//!   elapses, delivering exactly one outcome; [`PaymentTracker`] holds the
//!   single in-flight order of a checkout.
//!
//! - **Pricing & expiry** ([`pricing`], [`expiry`]): Inclusive night
//!   counting, duration presets, and the 30-day payment deadline.
//!
//! - **Checkout** ([`checkout`]): Booking creation followed by
//!   payment-link creation.
//!
//! - **Accounts** ([`profile`], [`dashboard`]): Signup and profile checks
//!   run before the backend is contacted; [`OwnerDashboard`] gathers an
//!   owner's listings and the bookings made against them in one call.
//!
//! - **Chat** ([`messaging`]): [`ChatPoller`] refreshes a conversation in
//!   the background and posts [`ChatEvent`]s over a channel.
//!
//! - **Domain model** ([`model`]): Canonical types (`Apartment`,
//!   `Booking`, `PaymentOrder`, ...) with [`EntityId`] covering both UUID
//!   and opaque backend keys.

pub mod checkout;
pub mod config;
pub mod convert;
pub mod dashboard;
pub mod error;
pub mod expiry;
pub mod marketplace;
pub mod messaging;
pub mod model;
pub mod payment;
pub mod pricing;
pub mod profile;
pub mod receipt;
pub mod search;
pub mod session;

// ── Primary re-exports ──────────────────────────────────────────────
pub use checkout::{Checkout, CheckoutRequest};
pub use config::{ClientConfig, PollSettings, TlsVerification};
pub use dashboard::OwnerDashboard;
pub use error::CoreError;
pub use expiry::BookingExpiry;
pub use marketplace::Marketplace;
pub use messaging::{ChatEvent, ChatPoller, ChatSubscription, MessageSource};
pub use payment::{PaymentPoller, PaymentState, PaymentStatusSource, PaymentTracker, PollerHandle};
pub use pricing::{DateSelection, DurationPreset, Quote};
pub use profile::{ProfileChanges, SignupForm};
pub use receipt::BookingConfirmation;
pub use search::SearchFilter;
pub use session::{Session, SessionStore, StoredSession};

pub use hostelio_api::Role;

// Re-export model types at the crate root for ergonomics.
pub use model::{
    Apartment, ApprovalStatus, Bhk, Booking, BookingStatus, ChatMessage, EntityId, GeoPoint, Guest,
    HostelApproval, HostelType, PaymentMethod, PaymentOrder, PaymentStatus, RoomSharing,
    UserAccount, WishlistItem,
};
