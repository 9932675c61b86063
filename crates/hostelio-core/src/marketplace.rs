// ── Marketplace facade ──
//
// Single entry point for front ends: owns the HTTP client and the current
// session, converts wire records into domain types, and vends the payment
// and chat pollers.

use std::sync::Arc;

use arc_swap::ArcSwapOption;
use secrecy::SecretString;
use tracing::{debug, info};

use hostelio_api::{ApiClient, Role};

use crate::checkout::{self, Checkout, CheckoutRequest};
use crate::config::ClientConfig;
use crate::dashboard::OwnerDashboard;
use crate::error::CoreError;
use crate::messaging::ChatPoller;
use crate::model::{
    Apartment, Booking, ChatMessage, EntityId, HostelApproval, PaymentStatus, UserAccount,
    WishlistItem,
};
use crate::payment::{PaymentPoller, PaymentStatusSource};
use crate::pricing::DateSelection;
use crate::profile::{ProfileChanges, SignupForm};
use crate::session::Session;

/// Cheaply cloneable handle to one marketplace backend.
#[derive(Clone)]
pub struct Marketplace {
    inner: Arc<MarketplaceInner>,
}

struct MarketplaceInner {
    config: ClientConfig,
    client: Arc<ApiClient>,
    session: ArcSwapOption<Session>,
}

impl Marketplace {
    pub fn new(config: ClientConfig) -> Result<Self, CoreError> {
        let client = ApiClient::new(config.api_url.clone(), &config.transport())?;
        Ok(Self::with_client(config, client))
    }

    /// Wrap an already-built client (tests, custom transports).
    pub fn with_client(config: ClientConfig, client: ApiClient) -> Self {
        Self {
            inner: Arc::new(MarketplaceInner {
                config,
                client: Arc::new(client),
                session: ArcSwapOption::empty(),
            }),
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }

    pub fn client(&self) -> &Arc<ApiClient> {
        &self.inner.client
    }

    // ── Session lifecycle ────────────────────────────────────────────

    /// Log in and adopt the resulting session.
    pub async fn login(
        &self,
        role: Role,
        email: &str,
        password: &SecretString,
    ) -> Result<Arc<Session>, CoreError> {
        let resp = self.inner.client.login(role, email, password).await?;
        let has_primary_key = resp.id.is_some() || resp.admin_id.is_some();
        let mut session = Session::from_login(role, resp)?;
        self.inner.client.set_token(session.access.clone());

        // User logins may only report the auth UID; the numeric key that
        // booking and payment routes expect comes from the profile.
        if !has_primary_key && role != Role::Admin {
            match self.inner.client.profile().await {
                Ok(profile) => session.user_id = EntityId::from(profile.id),
                Err(e) => debug!(error = %e, "profile lookup failed, keeping auth uid"),
            }
        }

        info!(%role, user_id = %session.user_id, "logged in");
        let session = Arc::new(session);
        self.inner.session.store(Some(Arc::clone(&session)));
        Ok(session)
    }

    /// Adopt a previously stored session without contacting the backend.
    pub fn resume(&self, session: Session) {
        debug!(role = %session.role, user_id = %session.user_id, "resuming session");
        self.inner.client.set_token(session.access.clone());
        self.inner.session.store(Some(Arc::new(session)));
    }

    pub fn logout(&self) {
        self.inner.client.clear_token();
        self.inner.session.store(None);
    }

    pub fn session(&self) -> Option<Arc<Session>> {
        self.inner.session.load_full()
    }

    pub fn require_session(&self) -> Result<Arc<Session>, CoreError> {
        self.session().ok_or_else(|| CoreError::AuthenticationFailed {
            message: "not logged in".into(),
        })
    }

    fn my_id(&self) -> Result<String, CoreError> {
        Ok(self.require_session()?.user_id.to_string())
    }

    // ── Accounts ─────────────────────────────────────────────────────

    /// Register a seeker or owner account. Does not log in.
    ///
    /// Returns the backend's id for the new user when it reports one.
    pub async fn signup(&self, form: &SignupForm) -> Result<Option<EntityId>, CoreError> {
        let account = form.validate()?;
        let resp = self.inner.client.signup(&account, &form.password).await?;
        let user_id = resp.user_id.map(EntityId::from);
        info!(role = %account.role, email = %account.email, "account registered");
        Ok(user_id)
    }

    /// Apply profile changes for the signed-in user, checked against `today`.
    pub async fn update_profile(
        &self,
        changes: &ProfileChanges,
        today: chrono::NaiveDate,
    ) -> Result<UserAccount, CoreError> {
        let request = changes.validate(today)?;
        self.require_session()?;
        let updated = self.inner.client.update_profile(&request).await?;
        debug!(user_id = %updated.id, "profile updated");
        Ok(updated.into())
    }

    // ── Apartments ───────────────────────────────────────────────────

    /// Listings visible to seekers.
    pub async fn approved_apartments(&self) -> Result<Vec<Apartment>, CoreError> {
        let raw = self.inner.client.list_approved_apartments().await?;
        Ok(raw.into_iter().map(Apartment::from).collect())
    }

    /// Every listing, approved or not.
    pub async fn all_apartments(&self) -> Result<Vec<Apartment>, CoreError> {
        let raw = self.inner.client.list_apartments().await?;
        Ok(raw.into_iter().map(Apartment::from).collect())
    }

    pub async fn apartment(&self, id: &EntityId) -> Result<Apartment, CoreError> {
        match self.inner.client.get_apartment(&id.to_string()).await {
            Ok(raw) => Ok(raw.into()),
            Err(hostelio_api::Error::NotFound { .. }) => Err(not_found("apartment", id)),
            Err(e) => Err(e.into()),
        }
    }

    /// Listings owned by `owner`, or by the logged-in user.
    pub async fn owner_apartments(
        &self,
        owner: Option<&EntityId>,
    ) -> Result<Vec<Apartment>, CoreError> {
        let owner = match owner {
            Some(id) => id.to_string(),
            None => self.my_id()?,
        };
        let raw = self.inner.client.list_owner_apartments(&owner).await?;
        Ok(raw.into_iter().map(Apartment::from).collect())
    }

    // ── Owner dashboard ──────────────────────────────────────────────

    /// Bookings made against the signed-in owner's listings.
    pub async fn received_bookings(&self) -> Result<Vec<Booking>, CoreError> {
        self.require_session()?;
        let raw = self.inner.client.list_received_bookings().await?;
        Ok(raw.into_iter().map(Booking::from).collect())
    }

    /// The signed-in owner's listings still waiting for approval.
    ///
    /// The backend route is shared by all owners, so rows belonging to
    /// someone else are dropped here.
    pub async fn owner_pending_apartments(&self) -> Result<Vec<Apartment>, CoreError> {
        let me = self.require_session()?.user_id.clone();
        let raw = self.inner.client.list_owner_pending_apartments().await?;
        Ok(raw
            .into_iter()
            .map(Apartment::from)
            .filter(|a| a.owner_id.as_ref() == Some(&me))
            .collect())
    }

    /// Accounts that have booked with the signed-in owner.
    pub async fn tenants(&self) -> Result<Vec<UserAccount>, CoreError> {
        self.require_session()?;
        let raw = self.inner.client.list_tenants().await?;
        Ok(raw.into_iter().map(UserAccount::from).collect())
    }

    /// Listings, pending listings, received bookings, and tenants, fetched
    /// concurrently.
    pub async fn owner_dashboard(&self) -> Result<OwnerDashboard, CoreError> {
        let (listed, pending, bookings, tenants) = tokio::try_join!(
            self.owner_apartments(None),
            self.owner_pending_apartments(),
            self.received_bookings(),
            self.tenants(),
        )?;
        debug!(
            listed = listed.len(),
            pending = pending.len(),
            bookings = bookings.len(),
            "owner dashboard loaded"
        );
        Ok(OwnerDashboard::new(listed, pending, bookings, tenants))
    }

    // ── Bookings ─────────────────────────────────────────────────────

    /// The logged-in user's bookings with payment details expanded.
    pub async fn booking_history(&self) -> Result<Vec<Booking>, CoreError> {
        let me = self.my_id()?;
        let resp = self.inner.client.list_user_payments(&me).await?;
        Ok(resp.payments.into_iter().map(Booking::from).collect())
    }

    /// Bare booking rows for a user.
    pub async fn user_bookings(&self, user: Option<&EntityId>) -> Result<Vec<Booking>, CoreError> {
        let user = match user {
            Some(id) => id.to_string(),
            None => self.my_id()?,
        };
        let raw = self.inner.client.list_user_bookings(&user).await?;
        Ok(raw.into_iter().map(Booking::from).collect())
    }

    /// Bookings made against one listing (owner view).
    pub async fn apartment_bookings(&self, apartment: &EntityId) -> Result<Vec<Booking>, CoreError> {
        let raw = self
            .inner
            .client
            .list_apartment_bookings(&apartment.to_string())
            .await?;
        Ok(raw.into_iter().map(Booking::from).collect())
    }

    /// Look a booking up by id, preferring the payment-expanded view.
    pub async fn booking(&self, id: &EntityId) -> Result<Booking, CoreError> {
        if let Some(found) = self.booking_history().await?.into_iter().find(|b| &b.id == id) {
            return Ok(found);
        }
        self.user_bookings(None)
            .await?
            .into_iter()
            .find(|b| &b.id == id)
            .ok_or_else(|| not_found("booking", id))
    }

    // ── Checkout & payments ──────────────────────────────────────────

    /// Book `apartment` for the selected dates and create its payment link.
    pub async fn checkout(
        &self,
        apartment: &EntityId,
        selection: DateSelection,
    ) -> Result<Checkout, CoreError> {
        let session = self.require_session()?;
        let listing = self.apartment(apartment).await?;
        let request = CheckoutRequest {
            user_id: session.user_id.clone(),
            apartment_id: listing.id,
            rent: listing.rent,
            selection,
        };
        checkout::start_checkout(&self.inner.client, &request).await
    }

    pub async fn payment_status(&self, order_id: &str) -> Result<PaymentStatus, CoreError> {
        self.inner.client.fetch_status(order_id).await
    }

    /// A poller paced by this backend's configuration.
    pub fn payment_poller(&self) -> PaymentPoller<ApiClient> {
        PaymentPoller::new(Arc::clone(&self.inner.client), self.inner.config.payment_poll)
    }

    // ── Chat ─────────────────────────────────────────────────────────

    pub async fn conversation(&self, other: &EntityId) -> Result<Vec<ChatMessage>, CoreError> {
        let raw = self.inner.client.conversation_with(&other.to_string()).await?;
        Ok(raw.into_iter().map(ChatMessage::from).collect())
    }

    pub async fn send_message(
        &self,
        receiver: &EntityId,
        message: &str,
    ) -> Result<ChatMessage, CoreError> {
        if message.trim().is_empty() {
            return Err(CoreError::validation("message is empty"));
        }
        let raw = self
            .inner
            .client
            .send_message(&receiver.to_string(), message)
            .await?;
        Ok(raw.into())
    }

    pub fn chat_poller(&self) -> ChatPoller<ApiClient> {
        ChatPoller::new(
            Arc::clone(&self.inner.client),
            self.inner.config.chat_poll_interval,
        )
    }

    // ── Wishlist ─────────────────────────────────────────────────────

    pub async fn wishlist(&self) -> Result<Vec<WishlistItem>, CoreError> {
        let raw = self.inner.client.list_wishlist().await?;
        Ok(raw.into_iter().map(WishlistItem::from).collect())
    }

    pub async fn add_to_wishlist(&self, apartment: &EntityId) -> Result<(), CoreError> {
        Ok(self
            .inner
            .client
            .add_to_wishlist(&apartment.to_string())
            .await?)
    }

    pub async fn remove_from_wishlist(&self, apartment: &EntityId) -> Result<(), CoreError> {
        Ok(self
            .inner
            .client
            .remove_from_wishlist(&apartment.to_string())
            .await?)
    }

    // ── Administration ───────────────────────────────────────────────

    pub async fn pending_apartments(&self) -> Result<Vec<Apartment>, CoreError> {
        let raw = self.inner.client.list_pending_apartments().await?;
        Ok(raw.into_iter().map(Apartment::from).collect())
    }

    pub async fn approve_apartment(&self, apartment: &EntityId) -> Result<HostelApproval, CoreError> {
        let echoed = self
            .inner
            .client
            .approve_apartment(&apartment.to_string())
            .await?;
        info!(%apartment, "listing approved");
        Ok(echoed.map_or_else(
            || HostelApproval {
                id: None,
                apartment_id: apartment.clone(),
                status: crate::model::ApprovalStatus::Approved,
                comments: None,
            },
            HostelApproval::from,
        ))
    }

    pub async fn users(&self) -> Result<Vec<UserAccount>, CoreError> {
        let raw = self.inner.client.list_users().await?;
        Ok(raw.into_iter().map(UserAccount::from).collect())
    }

    pub async fn profile(&self) -> Result<UserAccount, CoreError> {
        Ok(self.inner.client.profile().await?.into())
    }
}

fn not_found(entity_type: &str, id: &EntityId) -> CoreError {
    CoreError::NotFound {
        entity_type: entity_type.into(),
        identifier: id.to_string(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn marketplace(server: &MockServer) -> Marketplace {
        let base = url::Url::parse(&format!("{}/api/", server.uri())).unwrap();
        let client = ApiClient::with_client(reqwest::Client::new(), base.clone()).unwrap();
        Marketplace::with_client(ClientConfig::new(base), client)
    }

    #[tokio::test]
    async fn login_resolves_numeric_id_from_profile() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/login/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "access": "tok-1",
                "refresh": "ref-1",
                "user_id": "0b8e3c51-9f1d-4c2b-8f3e-2a1d4c5b6e7f",
                "email": "asha@example.com",
                "name": "Asha"
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/user/profile/"))
            .and(header("authorization", "Bearer tok-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": 7,
                "user_id": "0b8e3c51-9f1d-4c2b-8f3e-2a1d4c5b6e7f",
                "name": "Asha",
                "email": "asha@example.com"
            })))
            .mount(&server)
            .await;

        let market = marketplace(&server).await;
        let password: SecretString = "hunter2".to_string().into();
        let session = market
            .login(Role::Seeker, "asha@example.com", &password)
            .await
            .unwrap();
        assert_eq!(session.user_id.to_string(), "7");
        assert!(market.client().has_token());

        market.logout();
        assert!(market.session().is_none());
        assert!(!market.client().has_token());
    }

    #[tokio::test]
    async fn history_requires_session() {
        let server = MockServer::start().await;
        let market = marketplace(&server).await;
        let err = market.booking_history().await.unwrap_err();
        assert!(matches!(err, CoreError::AuthenticationFailed { .. }));
    }

    #[tokio::test]
    async fn missing_apartment_is_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/apartments/apt-x/"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({"error": "Not found"})))
            .mount(&server)
            .await;

        let market = marketplace(&server).await;
        let err = market.apartment(&"apt-x".into()).await.unwrap_err();
        match err {
            CoreError::NotFound {
                entity_type,
                identifier,
            } => {
                assert_eq!(entity_type, "apartment");
                assert_eq!(identifier, "apt-x");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    fn owner_session() -> Session {
        serde_json::from_value::<crate::session::StoredSession>(json!({
            "role": "owner",
            "user_id": "12",
            "access": "tok-owner"
        }))
        .unwrap()
        .into()
    }

    #[tokio::test]
    async fn weak_password_never_reaches_backend() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/signup/"))
            .respond_with(ResponseTemplate::new(201))
            .expect(0)
            .mount(&server)
            .await;

        let market = marketplace(&server).await;
        let form = SignupForm {
            email: "ravi@example.com".into(),
            phone: "9000000001".into(),
            name: "Ravi".into(),
            role: Role::Owner,
            password: "password".to_string().into(),
            confirmation: "password".to_string().into(),
        };
        let err = market.signup(&form).await.unwrap_err();
        assert!(matches!(err, CoreError::ValidationFailed { .. }));
    }

    #[tokio::test]
    async fn signup_returns_new_user_id() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/signup/"))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "message": "User created successfully",
                "user_id": "fb-uid-9"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let market = marketplace(&server).await;
        let form = SignupForm {
            email: "ravi@example.com".into(),
            phone: "90000 00001".into(),
            name: "Ravi".into(),
            role: Role::Owner,
            password: "S3cure!pass".to_string().into(),
            confirmation: "S3cure!pass".to_string().into(),
        };
        let id = market.signup(&form).await.unwrap();
        assert_eq!(id, Some(EntityId::from("fb-uid-9")));
        assert!(market.session().is_none());
    }

    #[tokio::test]
    async fn profile_update_requires_session() {
        let server = MockServer::start().await;
        let market = marketplace(&server).await;
        let changes = ProfileChanges {
            bio: Some("Runs two PGs in Kakkanad".into()),
            ..ProfileChanges::default()
        };
        let today = chrono::NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let err = market.update_profile(&changes, today).await.unwrap_err();
        assert!(matches!(err, CoreError::AuthenticationFailed { .. }));
    }

    #[tokio::test]
    async fn dashboard_keeps_only_own_pending_listings() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/apartment/by-owner/12/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "total_apartments": 1,
                "apartments": [{
                    "apartment_id": "apt-1",
                    "owner": 12,
                    "title": "Sunrise PG",
                    "location": "Kakkanad",
                    "rent": "500.00"
                }]
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/pending_apartments_for_owner/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                { "apartment_id": "apt-2", "owner": 12, "title": "Harbour Hostel", "rent": "650.00" },
                { "apartment_id": "apt-3", "owner": 40, "title": "Not Mine", "rent": "300.00" }
            ])))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/get-all-received-booking"))
            .and(header("authorization", "Bearer tok-owner"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {
                    "booking_id": "bk-1",
                    "apartment": "apt-1",
                    "user": 7,
                    "booking_date": "2024-03-01T00:00:00Z",
                    "status": "active"
                },
                {
                    "booking_id": "bk-2",
                    "apartment": "apt-1",
                    "user": 8,
                    "booking_date": "2024-04-01T00:00:00Z",
                    "status": "pending"
                }
            ])))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/get-all-tenants/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                { "id": 7, "name": "Asha", "email": "asha@example.com" }
            ])))
            .mount(&server)
            .await;

        let market = marketplace(&server).await;
        market.resume(owner_session());
        let dash = market.owner_dashboard().await.unwrap();

        assert_eq!(dash.listed.len(), 1);
        assert_eq!(dash.pending.len(), 1);
        assert_eq!(dash.pending[0].title, "Harbour Hostel");
        assert_eq!(dash.tenant_name(&dash.bookings[0]).as_deref(), Some("Asha"));
        assert_eq!(dash.tenant_name(&dash.bookings[1]).as_deref(), Some("8"));
        assert_eq!(dash.listing_title(&dash.bookings[0]), Some("Sunrise PG"));
    }
}
