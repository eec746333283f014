//! CLI integration tests against a mock API.

mod common;

use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use common::{read_session, run_cli, run_cli_success, session_file};

async fn store_tokens(home: &std::path::Path, api_url: &str, access: &str, refresh: &str) {
    run_cli_success(
        &[
            "session",
            "set",
            "--access-token",
            access,
            "--refresh-token",
            refresh,
        ],
        home,
        api_url,
    )
    .await;
}

#[tokio::test(flavor = "multi_thread")]
async fn session_set_show_clear() {
    let server = MockServer::start().await;
    let home = TempDir::new().unwrap();

    let stdout = run_cli_success(&["session", "show"], home.path(), &server.uri()).await;
    assert!(stdout.contains("accessToken: not set"));

    store_tokens(home.path(), &server.uri(), "T1", "R1").await;

    let stdout = run_cli_success(&["session", "show"], home.path(), &server.uri()).await;
    assert!(stdout.contains("accessToken: set"));
    assert!(stdout.contains("refreshToken: set"));
    assert!(!stdout.contains("T1"));
    assert!(!stdout.contains("R1"));

    run_cli_success(&["session", "clear"], home.path(), &server.uri()).await;
    assert_eq!(read_session(home.path()), json!({}));
}

#[tokio::test(flavor = "multi_thread")]
async fn request_sends_stored_bearer() {
    let server = MockServer::start().await;
    let home = TempDir::new().unwrap();
    store_tokens(home.path(), &server.uri(), "T1", "R1").await;

    Mock::given(method("GET"))
        .and(path("/users/me"))
        .and(header("authorization", "Bearer T1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"name": "Ada"})))
        .expect(1)
        .mount(&server)
        .await;

    let stdout =
        run_cli_success(&["request", "get", "/users/me"], home.path(), &server.uri()).await;
    let body: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(body["name"], "Ada");
}

#[tokio::test(flavor = "multi_thread")]
async fn refresh_updates_session_file() {
    let server = MockServer::start().await;
    let home = TempDir::new().unwrap();
    store_tokens(home.path(), &server.uri(), "T1", "R1").await;

    Mock::given(method("POST"))
        .and(path("/items"))
        .and(header("authorization", "Bearer T1"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/auth/refresh"))
        .and(header("authorization", "Bearer R1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"accessToken": "T2"})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/items"))
        .and(header("authorization", "Bearer T2"))
        .and(body_partial_json(json!({"title": "hammock"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": 7})))
        .expect(1)
        .mount(&server)
        .await;

    let stdout = run_cli_success(
        &["request", "post", "/items", "--data", r#"{"title":"hammock"}"#],
        home.path(),
        &server.uri(),
    )
    .await;
    assert!(stdout.contains("\"id\": 7"));

    let session = read_session(home.path());
    assert_eq!(session["accessToken"], "T2");
    assert_eq!(session["refreshToken"], "R1");
}

#[tokio::test(flavor = "multi_thread")]
async fn failed_refresh_clears_session() {
    let server = MockServer::start().await;
    let home = TempDir::new().unwrap();
    store_tokens(home.path(), &server.uri(), "T1", "R1").await;

    Mock::given(method("GET"))
        .and(path("/users/me"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/auth/refresh"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": "InvalidToken",
            "message": "refresh token revoked"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let output = run_cli(&["request", "get", "/users/me"], home.path(), &server.uri()).await;
    assert!(!output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Session expired"), "stderr: {}", stderr);
    assert_eq!(read_session(home.path()), json!({}));
}

#[tokio::test(flavor = "multi_thread")]
async fn signup_validation_failure_sends_nothing() {
    let server = MockServer::start().await;
    let home = TempDir::new().unwrap();

    Mock::given(method("POST"))
        .and(path("/early-access/signup"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let output = run_cli(
        &[
            "signup",
            "--category",
            "host",
            "--name",
            "Ada",
            "--email",
            "ada@example.com",
            "--phone",
            "555-0100",
        ],
        home.path(),
        &server.uri(),
    )
    .await;

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Please select your location from the dropdown"));
}

#[tokio::test(flavor = "multi_thread")]
async fn signup_success_prints_thank_you_path() {
    let server = MockServer::start().await;
    let home = TempDir::new().unwrap();

    Mock::given(method("POST"))
        .and(path("/early-access/signup"))
        .and(body_partial_json(json!({
            "category": "service_host",
            "serviceHostData": {"services": ["Yoga"], "serviceAreas": ["Ubud"], "pincodes": ["80571"]}
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"ok": true})))
        .expect(1)
        .mount(&server)
        .await;

    let stdout = run_cli_success(
        &[
            "signup",
            "--category",
            "service_host",
            "--name",
            "Ada",
            "--email",
            "ada@example.com",
            "--phone",
            "555-0100",
            "--service",
            "Yoga",
            "--service-area",
            "Ubud",
            "--pincode",
            "80571",
        ],
        home.path(),
        &server.uri(),
    )
    .await;

    assert!(stdout.contains("Successfully signed up for early access!"));
    assert!(stdout.contains("/thank-you?category=service_host"));
    assert!(!session_file(home.path()).exists());
}

#[tokio::test(flavor = "multi_thread")]
async fn duplicate_signup_reports_conflict() {
    let server = MockServer::start().await;
    let home = TempDir::new().unwrap();

    Mock::given(method("POST"))
        .and(path("/early-access/signup"))
        .respond_with(ResponseTemplate::new(409))
        .mount(&server)
        .await;

    let output = run_cli(
        &[
            "signup",
            "--name",
            "Ada",
            "--email",
            "ada@example.com",
            "--phone",
            "555-0100",
        ],
        home.path(),
        &server.uri(),
    )
    .await;

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("already registered"));
}
