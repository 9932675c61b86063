#![allow(clippy::unwrap_used)]
// Integration tests for `ApiClient` using wiremock.

use pretty_assertions::assert_eq;
use serde_json::json;
use url::Url;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use hostelio_api::models::{
    CreateBookingRequest, NewAccount, PaymentLinkRequest, ProfileUpdateRequest,
};
use hostelio_api::{ApiClient, Error, Role};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, ApiClient) {
    let server = MockServer::start().await;
    let base_url = Url::parse(&format!("{}/api/", server.uri())).unwrap();
    let client = ApiClient::with_client(reqwest::Client::new(), base_url).unwrap();
    (server, client)
}

// ── Authentication tests ────────────────────────────────────────────

#[tokio::test]
async fn test_login_success() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/login/"))
        .and(body_json(json!({
            "email": "asha@example.com",
            "password_hash": "hunter2"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access": "access-token",
            "refresh": "refresh-token",
            "user_id": "fb-uid-1",
            "email": "asha@example.com",
            "name": "Asha"
        })))
        .mount(&server)
        .await;

    let secret: secrecy::SecretString = "hunter2".to_string().into();
    let resp = client
        .login(Role::Seeker, "asha@example.com", &secret)
        .await
        .unwrap();
    assert_eq!(resp.access, "access-token");
    assert_eq!(resp.name.as_deref(), Some("Asha"));
}

#[tokio::test]
async fn test_login_failure_maps_to_authentication() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/login-admin/"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({"error": "Invalid email or password"})),
        )
        .mount(&server)
        .await;

    let secret: secrecy::SecretString = "wrong".to_string().into();
    let result = client.login(Role::Admin, "root@example.com", &secret).await;
    assert!(
        matches!(result, Err(Error::Authentication { .. })),
        "expected Authentication error, got: {result:?}"
    );
}

#[tokio::test]
async fn test_signup_sends_role_as_user_type() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/signup/"))
        .and(body_json(json!({
            "email": "ravi@example.com",
            "phone": "+919000000001",
            "password_hash": "S3cure!pass",
            "name": "Ravi Menon",
            "user_type": "owner"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "message": "User created successfully",
            "user_id": "fb-uid-9"
        })))
        .mount(&server)
        .await;

    let account = NewAccount {
        email: "ravi@example.com".into(),
        phone: "+919000000001".into(),
        name: "Ravi Menon".into(),
        role: Role::Owner,
    };
    let secret: secrecy::SecretString = "S3cure!pass".to_string().into();
    let resp = client.signup(&account, &secret).await.unwrap();
    assert_eq!(resp.user_id.unwrap().0, "fb-uid-9");
}

#[tokio::test]
async fn test_signup_conflict_is_validation_error() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/signup/"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": "The user with the provided email already exists (EMAIL_EXISTS)."
        })))
        .mount(&server)
        .await;

    let account = NewAccount {
        email: "asha@example.com".into(),
        phone: "+919000000002".into(),
        name: "Asha".into(),
        role: Role::Seeker,
    };
    let secret: secrecy::SecretString = "S3cure!pass".to_string().into();
    let err = client.signup(&account, &secret).await.unwrap_err();
    assert!(
        matches!(err, Error::Validation { ref message, .. } if message.contains("EMAIL_EXISTS")),
        "unexpected error: {err:?}"
    );
}

#[tokio::test]
async fn test_update_profile_sends_only_set_fields() {
    let (server, client) = setup().await;

    Mock::given(method("PUT"))
        .and(path("/api/update-profile/"))
        .and(header("authorization", "Bearer tok-owner"))
        .and(body_json(json!({ "upi_id": "ravi@okhdfc" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 12,
            "name": "Ravi Menon",
            "email": "ravi@example.com",
            "bio": "",
            "date_of_birth": "1990-04-02",
            "upi_id": "ravi@okhdfc"
        })))
        .mount(&server)
        .await;

    client.set_token("tok-owner".to_string().into());
    let update = ProfileUpdateRequest {
        upi_id: Some("ravi@okhdfc".into()),
        ..ProfileUpdateRequest::default()
    };
    let profile = client.update_profile(&update).await.unwrap();
    assert_eq!(profile.upi_id.as_deref(), Some("ravi@okhdfc"));
    assert_eq!(profile.date_of_birth.unwrap().to_string(), "1990-04-02");
}

#[tokio::test]
async fn test_bearer_token_is_attached() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/wishlist/get-item"))
        .and(header("authorization", "Bearer tok-123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "wishlist_id": "8d4a0f7e-0c0b-4d8e-9a57-5d1f0b3e2a11",
            "user": 7,
            "apartment": "4f1c2b8e-8a6e-4c57-9d7b-1f2e3a4b5c6d",
            "created_at": "2025-02-19T07:13:00Z"
        }])))
        .mount(&server)
        .await;

    client.set_token("tok-123".to_string().into());
    let items = client.list_wishlist().await.unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].apartment.0, "4f1c2b8e-8a6e-4c57-9d7b-1f2e3a4b5c6d");
}

#[tokio::test]
async fn test_unauthorized_is_session_expired() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/user/profile/"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "detail": "Given token not valid for any token type"
        })))
        .mount(&server)
        .await;

    let result = client.profile().await;
    assert!(matches!(result, Err(Error::SessionExpired)));
}

// ── Booking & payment tests ─────────────────────────────────────────

#[tokio::test]
async fn test_create_booking() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/booking/create/"))
        .and(body_json(json!({"user": "7", "apartment": "apt-1"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "message": "Booking created successfully",
            "booking_id": "b3a4c2d1-1111-2222-3333-444455556666"
        })))
        .mount(&server)
        .await;

    let resp = client
        .create_booking(&CreateBookingRequest {
            user: "7".into(),
            apartment: "apt-1".into(),
            checkout_date: None,
        })
        .await
        .unwrap();
    assert_eq!(resp.booking_id.0, "b3a4c2d1-1111-2222-3333-444455556666");
}

#[tokio::test]
async fn test_create_booking_validation_errors() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/booking/create/"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "apartment": ["Invalid pk \"apt-x\" - object does not exist."]
        })))
        .mount(&server)
        .await;

    let err = client
        .create_booking(&CreateBookingRequest {
            user: "7".into(),
            apartment: "apt-x".into(),
            checkout_date: None,
        })
        .await
        .unwrap_err();
    let fields = err.field_errors().unwrap();
    assert!(fields.contains_key("apartment"));
}

#[tokio::test]
async fn test_create_payment_link() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/payment/url/"))
        .and(body_json(json!({
            "user_id": "7",
            "apartment_id": "apt-1",
            "amount": "2500",
            "booking_id": "bk-1"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "payment_url": "https://rzp.io/i/abc123",
            "razorpay_order_id": "order_N5x1",
            "transaction_id": "tx-1",
            "payment_id": "pay-1",
            "booking_id": "bk-1"
        })))
        .mount(&server)
        .await;

    let resp = client
        .create_payment_link(&PaymentLinkRequest {
            user_id: "7".into(),
            apartment_id: "apt-1".into(),
            amount: "2500".parse().unwrap(),
            booking_id: "bk-1".into(),
        })
        .await
        .unwrap();
    assert_eq!(resp.payment_url, "https://rzp.io/i/abc123");
    assert_eq!(resp.razorpay_order_id, "order_N5x1");
}

#[tokio::test]
async fn test_payment_status() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/payment/status/order_N5x1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "Payment pending",
            "status": "pending"
        })))
        .mount(&server)
        .await;

    let resp = client.payment_status("order_N5x1").await.unwrap();
    assert_eq!(resp.status, "pending");
}

#[tokio::test]
async fn test_payment_status_server_error_is_transient() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/payment/status/order_bad"))
        .respond_with(
            ResponseTemplate::new(500).set_body_json(json!({"error": "gateway unreachable"})),
        )
        .mount(&server)
        .await;

    let err = client.payment_status("order_bad").await.unwrap_err();
    assert!(err.is_transient());
    assert!(err.to_string().contains("gateway unreachable"));
}

#[tokio::test]
async fn test_list_user_payments() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/payments/user/7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "total_payments": 1,
            "payments": [{
                "payment_id": "pay-1",
                "amount": "2500.00",
                "payment_method": "razorpay",
                "razorpay_payment_id": "pay_N5x1",
                "booking": {
                    "booking_id": "bk-1",
                    "booking_date": "2024-03-01T00:00:00Z",
                    "checkout_date": "2024-03-05T00:00:00Z",
                    "status": "active"
                },
                "apartment": { "title": "Sunrise PG" },
                "user": { "name": "Asha", "email": "asha@example.com", "phone": "+91 90000 00000" }
            }]
        })))
        .mount(&server)
        .await;

    let resp = client.list_user_payments("7").await.unwrap();
    assert_eq!(resp.payments.len(), 1);
    assert_eq!(resp.payments[0].apartment.title, "Sunrise PG");
    assert_eq!(resp.payments[0].booking.status.as_deref(), Some("active"));
}

// ── Chat tests ──────────────────────────────────────────────────────

#[tokio::test]
async fn test_empty_conversation_is_not_an_error() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/chat/get-all-send-received-messages-with/12"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "message": "No messages sent or received with this user."
        })))
        .mount(&server)
        .await;

    let messages = client.conversation_with("12").await.unwrap();
    assert!(messages.is_empty());
}

#[tokio::test]
async fn test_owner_apartments_unwraps_envelope() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/apartment/by-owner/12/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "owner_id": "12",
            "total_apartments": 1,
            "apartments": [{
                "apartment_id": "apt-1",
                "title": "Sunrise PG",
                "location": "Kochi",
                "rent": 500
            }]
        })))
        .mount(&server)
        .await;

    let apartments = client.list_owner_apartments("12").await.unwrap();
    assert_eq!(apartments.len(), 1);
    assert_eq!(apartments[0].title, "Sunrise PG");
}

// ── Owner dashboard tests ───────────────────────────────────────────

#[tokio::test]
async fn test_owner_dashboard_endpoints() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/get-all-received-booking"))
        .and(header("authorization", "Bearer tok-owner"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "booking_id": "bk-1",
            "apartment": "apt-1",
            "user": 7,
            "booking_date": "2024-03-01T00:00:00Z",
            "checkout_date": "2024-03-05T00:00:00Z",
            "status": "active"
        }])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/pending_apartments_for_owner/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "apartment_id": "apt-2",
            "owner": 12,
            "title": "Harbour Hostel",
            "location": "Fort Kochi",
            "rent": "650.00"
        }])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/get-all-tenants/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "id": 7,
            "name": "Asha",
            "email": "asha@example.com",
            "user_type": "seeker"
        }])))
        .mount(&server)
        .await;

    client.set_token("tok-owner".to_string().into());
    let bookings = client.list_received_bookings().await.unwrap();
    assert_eq!(bookings.len(), 1);
    assert_eq!(bookings[0].user.0, "7");

    let pending = client.list_owner_pending_apartments().await.unwrap();
    assert_eq!(pending[0].owner.as_ref().unwrap().0, "12");

    let tenants = client.list_tenants().await.unwrap();
    assert_eq!(tenants[0].name, "Asha");
}

// ── Admin tests ─────────────────────────────────────────────────────

#[tokio::test]
async fn test_approve_apartment_reads_echoed_record() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/approve-hostel/apt-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "Hostel approved",
            "data": { "approval_id": 4, "apartment": "apt-1", "status": "approved" }
        })))
        .mount(&server)
        .await;

    let record = client.approve_apartment("apt-1").await.unwrap().unwrap();
    assert_eq!(record.status.as_deref(), Some("approved"));
}
