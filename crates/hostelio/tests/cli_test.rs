//! Integration tests for the `hostelio` CLI binary.
//!
//! Argument parsing, help output, shell completions, and error exit codes
//! run without any backend; the remaining tests point the binary at a
//! wiremock server.
#![allow(clippy::unwrap_used)]

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a [`Command`] for the `hostelio` binary with env isolation.
///
/// Clears all `HOSTELIO_*` env vars and points config directories at a
/// nonexistent path so tests never touch the user's real configuration.
fn hostelio_cmd() -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("hostelio");
    cmd.env("HOME", "/tmp/hostelio-cli-test-nonexistent")
        .env("XDG_CONFIG_HOME", "/tmp/hostelio-cli-test-nonexistent")
        .env_remove("HOSTELIO_PROFILE")
        .env_remove("HOSTELIO_API_URL")
        .env_remove("HOSTELIO_TOKEN")
        .env_remove("HOSTELIO_USER_ID")
        .env_remove("HOSTELIO_OUTPUT")
        .env_remove("HOSTELIO_INSECURE")
        .env_remove("HOSTELIO_TIMEOUT");
    cmd
}

/// Concatenate stdout + stderr from a command output for flexible matching.
fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

fn api_url(server: &MockServer) -> String {
    format!("{}/api/", server.uri())
}

fn apartment_json(id: &str, title: &str, rent: &str) -> serde_json::Value {
    json!({
        "apartment_id": id,
        "title": title,
        "location": "Kochi",
        "rent": rent,
        "duration": "short-term",
        "room_sharing_type": "shared",
        "parking_available": true
    })
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let output = hostelio_cmd().output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    let text = combined_output(&output);
    assert!(text.contains("Usage"), "Expected 'Usage' in output:\n{text}");
}

#[test]
fn test_help_flag() {
    hostelio_cmd().arg("--help").assert().success().stdout(
        predicate::str::contains("hostel")
            .and(predicate::str::contains("apartments"))
            .and(predicate::str::contains("book"))
            .and(predicate::str::contains("payments")),
    );
}

#[test]
fn test_version_flag() {
    hostelio_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("hostelio"));
}

// ── Shell completions ───────────────────────────────────────────────

#[test]
fn test_completions_bash() {
    hostelio_cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty().not());
}

// ── Error exit codes ────────────────────────────────────────────────

#[test]
fn test_missing_api_url_is_reported() {
    let output = hostelio_cmd().args(["apartments", "list"]).output().unwrap();
    assert_eq!(output.status.code(), Some(1));
    let text = combined_output(&output);
    assert!(text.contains("config init"), "Expected setup hint:\n{text}");
}

#[test]
fn test_bookings_without_session_is_auth_error() {
    let output = hostelio_cmd()
        .args(["--api-url", "http://127.0.0.1:9/api/", "bookings", "list"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(3), "Expected auth exit code");
    let text = combined_output(&output);
    assert!(text.contains("hostelio login"), "Expected login hint:\n{text}");
}

#[test]
fn test_quote_rejects_malformed_date() {
    let output = hostelio_cmd()
        .args([
            "--api-url",
            "http://127.0.0.1:9/api/",
            "quote",
            "apt-1",
            "--start",
            "01/02/2024",
            "--duration",
            "short-term",
        ])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_quote_requires_checkout_or_preset() {
    let output = hostelio_cmd()
        .args([
            "--api-url",
            "http://127.0.0.1:9/api/",
            "quote",
            "apt-1",
            "--start",
            "2024-01-01",
        ])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
    assert!(combined_output(&output).contains("--duration"));
}

#[test]
fn test_profile_update_rejects_bad_upi_before_network() {
    let output = hostelio_cmd()
        .args(["--api-url", "http://127.0.0.1:9/api/", "--token", "tok", "--user-id", "12"])
        .args(["profile", "update", "--upi", "not a upi"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2), "{}", combined_output(&output));
    assert!(combined_output(&output).contains("UPI"));
}

#[test]
fn test_approve_without_terminal_requires_yes() {
    let output = hostelio_cmd()
        .args(["--api-url", "http://127.0.0.1:9/api/", "--token", "tok"])
        .args(["admin", "approve", "apt-1"])
        .write_stdin("")
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2), "{}", combined_output(&output));
    assert!(combined_output(&output).contains("--yes"));
}

// ── Against a mock backend ──────────────────────────────────────────

#[tokio::test(flavor = "multi_thread")]
async fn test_apartments_list_filters_client_side() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/apartments/approved/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            apartment_json("apt-1", "Sunrise PG", "450.00"),
            apartment_json("apt-2", "Harbour Hostel", "900.00"),
        ])))
        .mount(&server)
        .await;

    let output = hostelio_cmd()
        .args(["--api-url", &api_url(&server), "-o", "plain"])
        .args(["apartments", "list", "--rent-max", "500"])
        .output()
        .unwrap();
    assert!(output.status.success(), "{}", combined_output(&output));
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "apt-1");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_quote_prices_inclusive_nights() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/apartments/apt-1/"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(apartment_json("apt-1", "Sunrise PG", "500")),
        )
        .mount(&server)
        .await;

    let output = hostelio_cmd()
        .args(["--api-url", &api_url(&server), "-o", "json"])
        .args(["quote", "apt-1", "--start", "2024-01-01", "--end", "2024-01-05"])
        .output()
        .unwrap();
    assert!(output.status.success(), "{}", combined_output(&output));
    let quote: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(quote["nights"], 5);
    assert_eq!(quote["amount"], "2500");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_payment_status_uses_token() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/payment/status/order_N5x1"))
        .and(header("authorization", "Bearer tok-123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "paid",
            "message": "Payment successful"
        })))
        .mount(&server)
        .await;

    hostelio_cmd()
        .args(["--api-url", &api_url(&server), "--token", "tok-123", "--user-id", "7"])
        .args(["-o", "plain", "payments", "status", "order_N5x1"])
        .assert()
        .success()
        .stdout(predicate::str::diff("paid\n"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_missing_apartment_exits_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/apartments/nope/"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"detail": "Not found."})))
        .mount(&server)
        .await;

    let output = hostelio_cmd()
        .args(["--api-url", &api_url(&server), "apartments", "get", "nope"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(4));
    assert!(combined_output(&output).contains("apartments list"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_signup_reads_password_from_stdin() {
    let server = MockServer::start().await;
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
        .expect(1)
        .mount(&server)
        .await;

    hostelio_cmd()
        .args(["--api-url", &api_url(&server), "signup", "--password-stdin"])
        .args(["-e", "ravi@example.com", "-n", "Ravi Menon"])
        .args(["--phone", "+91 90000 00001", "--role", "owner"])
        .write_stdin("S3cure!pass\n")
        .assert()
        .success()
        .stdout(predicate::str::diff("fb-uid-9\n"))
        .stderr(predicate::str::contains("hostelio login -e ravi@example.com"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_signup_weak_password_is_usage_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/signup/"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;

    let output = hostelio_cmd()
        .args(["--api-url", &api_url(&server), "signup", "--password-stdin"])
        .args(["-e", "ravi@example.com", "-n", "Ravi", "--phone", "9000000001"])
        .write_stdin("password\n")
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2), "{}", combined_output(&output));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_profile_update_sends_put() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api/update-profile/"))
        .and(header("authorization", "Bearer tok-owner"))
        .and(body_json(json!({ "upi_id": "ravi@okhdfc" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 12,
            "name": "Ravi Menon",
            "email": "ravi@example.com",
            "upi_id": "ravi@okhdfc"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let output = hostelio_cmd()
        .args(["--api-url", &api_url(&server), "--token", "tok-owner", "--user-id", "12"])
        .args(["-o", "json", "profile", "update", "--upi", "ravi@okhdfc"])
        .output()
        .unwrap();
    assert!(output.status.success(), "{}", combined_output(&output));
    let profile: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(profile["upi_id"], "ravi@okhdfc");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_owner_dashboard_names_tenants() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/apartment/by-owner/12/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "total_apartments": 1,
            "apartments": [apartment_json("apt-1", "Sunrise PG", "500.00")]
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/pending_apartments_for_owner/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;
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
        .and(path("/api/get-all-tenants/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 7, "name": "Asha", "email": "asha@example.com" }
        ])))
        .mount(&server)
        .await;

    let output = hostelio_cmd()
        .args(["--api-url", &api_url(&server), "--token", "tok-owner", "--user-id", "12"])
        .args(["owner", "dashboard"])
        .output()
        .unwrap();
    assert!(output.status.success(), "{}", combined_output(&output));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Bookings received"), "{stdout}");
    assert!(stdout.contains("Asha"), "{stdout}");
    assert!(stdout.contains("Sunrise PG"), "{stdout}");
}
