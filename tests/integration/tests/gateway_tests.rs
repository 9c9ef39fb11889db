//! Gateway integration tests
//!
//! Each test starts its own gateway in test mode with an in-memory
//! account store, so no external services are needed.
//!
//! Run with: cargo test -p integration-tests --test gateway_tests

use std::time::Duration;

use integration_tests::{
    config_with, reply_data, reply_error_kind, Credentials, TestServer,
};
use reqwest::StatusCode;
use serde_json::json;

// ============================================================================
// HTTP
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health").await.expect("Request failed");
    assert_eq!(response.status(), StatusCode::OK);
}

// ============================================================================
// Registration and login
// ============================================================================

#[tokio::test]
async fn test_register_returns_token() {
    let server = TestServer::start().await.unwrap();
    let mut client = server.connect().await.unwrap();
    let creds = Credentials::unique();

    let reply = client.request("register", creds.payload()).await.unwrap();
    let token = reply_data(&reply).unwrap()["token"].as_str().unwrap();
    assert!(!token.is_empty());

    let reply = client.request("isLoggedIn", json!({})).await.unwrap();
    assert_eq!(reply_data(&reply).unwrap()["loggedIn"], true);
}

#[tokio::test]
async fn test_register_duplicate_email() {
    let server = TestServer::start().await.unwrap();
    let creds = Credentials::unique();

    let mut first = server.connect().await.unwrap();
    reply_data(&first.request("register", creds.payload()).await.unwrap()).unwrap();

    let mut second = server.connect().await.unwrap();
    let reply = second.request("register", creds.payload()).await.unwrap();
    assert_eq!(reply_error_kind(&reply), Some("ACCOUNT_ALREADY_EXISTS"));
}

#[tokio::test]
async fn test_register_validation_errors() {
    let server = TestServer::start().await.unwrap();
    let mut client = server.connect().await.unwrap();

    let reply = client
        .request("register", json!({ "email": "a@b.com" }))
        .await
        .unwrap();
    assert_eq!(reply_error_kind(&reply), Some("MISSING_ARGUMENTS"));

    let reply = client
        .request("register", json!({ "email": "a@b.com", "password": "short" }))
        .await
        .unwrap();
    assert_eq!(reply_error_kind(&reply), Some("LENGTH"));

    let reply = client
        .request("register", json!({ "email": "not-an-email", "password": "longenough" }))
        .await
        .unwrap();
    assert_eq!(reply_error_kind(&reply), Some("REQUIRED_EMAIL"));
}

#[tokio::test]
async fn test_login_flow() {
    let server = TestServer::start().await.unwrap();
    let creds = Credentials::unique();

    let mut owner = server.connect().await.unwrap();
    reply_data(&owner.request("register", creds.payload()).await.unwrap()).unwrap();
    owner.close().await.unwrap();

    let mut client = server.connect().await.unwrap();

    let reply = client
        .request("login", Credentials::unique().payload())
        .await
        .unwrap();
    assert_eq!(reply_error_kind(&reply), Some("ACCOUNT_DOESNT_EXIST"));

    let reply = client
        .request("login", creds.with_password("WrongPass123").payload())
        .await
        .unwrap();
    assert_eq!(reply_error_kind(&reply), Some("INVALID_PASSWORD"));

    let reply = client.request("login", creds.payload()).await.unwrap();
    assert!(reply_data(&reply).unwrap()["token"].is_string());

    let reply = client.request("login", creds.payload()).await.unwrap();
    assert_eq!(reply_error_kind(&reply), Some("MUST_BE_LOGGED_OUT"));
}

#[tokio::test]
async fn test_login_token_on_new_connection() {
    let server = TestServer::start().await.unwrap();
    let creds = Credentials::unique();

    let mut first = server.connect().await.unwrap();
    let reply = first.request("register", creds.payload()).await.unwrap();
    let token = reply_data(&reply).unwrap()["token"]
        .as_str()
        .unwrap()
        .to_string();
    let reply = first.request("fetchProfileId", json!({})).await.unwrap();
    let profile_id = reply_data(&reply).unwrap()["profileId"].clone();

    let mut second = server.connect().await.unwrap();
    let reply = second
        .request("loginToken", json!({ "token": "bogus" }))
        .await
        .unwrap();
    assert_eq!(reply_error_kind(&reply), Some("INVALID_REGEX"));

    // Token-shaped but not signed by this server
    let reply = second
        .request("loginToken", json!({ "token": "aaa.bbb.ccc" }))
        .await
        .unwrap();
    assert_eq!(reply_error_kind(&reply), Some("INVALID_TOKEN"));

    let reply = second
        .request("loginToken", json!({ "token": token }))
        .await
        .unwrap();
    reply_data(&reply).unwrap();

    let reply = second.request("fetchProfileId", json!({})).await.unwrap();
    assert_eq!(reply_data(&reply).unwrap()["profileId"], profile_id);
}

#[tokio::test]
async fn test_new_login_is_pushed_to_other_connections() {
    let server = TestServer::start().await.unwrap();
    let creds = Credentials::unique();

    let mut first = server.connect().await.unwrap();
    reply_data(&first.request("register", creds.payload()).await.unwrap()).unwrap();

    let mut second = server.connect().await.unwrap();
    reply_data(&second.request("login", creds.payload()).await.unwrap()).unwrap();

    let push = first.next_push().await.unwrap();
    assert_eq!(push["event"], "newLogin");

    // The connection that logged in is not told about itself
    assert!(!second.has_push_within(Duration::from_millis(200)).await);
}

// ============================================================================
// Session state
// ============================================================================

#[tokio::test]
async fn test_logged_in_gate() {
    let server = TestServer::start().await.unwrap();
    let mut client = server.connect().await.unwrap();

    let reply = client.request("logout", json!({})).await.unwrap();
    assert_eq!(reply_error_kind(&reply), Some("MUST_BE_LOGGED_IN"));

    let reply = client.request("fetchProfileId", json!({})).await.unwrap();
    assert_eq!(reply_error_kind(&reply), Some("MUST_BE_LOGGED_IN"));

    reply_data(
        &client
            .request("register", Credentials::unique().payload())
            .await
            .unwrap(),
    )
    .unwrap();
    reply_data(&client.request("logout", json!({})).await.unwrap()).unwrap();

    let reply = client.request("isLoggedIn", json!({})).await.unwrap();
    assert_eq!(reply_data(&reply).unwrap()["loggedIn"], false);

    let reply = client.request("logout", json!({})).await.unwrap();
    assert_eq!(reply_error_kind(&reply), Some("MUST_BE_LOGGED_IN"));
}

#[tokio::test]
async fn test_fetch_profile_data() {
    let server = TestServer::start().await.unwrap();
    let owner_creds = Credentials::unique();

    let mut owner = server.connect().await.unwrap();
    reply_data(&owner.request("register", owner_creds.payload()).await.unwrap()).unwrap();
    let reply = owner.request("fetchProfileId", json!({})).await.unwrap();
    let profile_id = reply_data(&reply).unwrap()["profileId"].clone();

    let reply = owner
        .request("fetchProfileData", json!({ "profileId": profile_id }))
        .await
        .unwrap();
    let profile = &reply_data(&reply).unwrap()["profileData"];
    assert_eq!(profile["email"], owner_creds.email.as_str());
    assert!(profile["username"].is_string());
    assert!(profile["creationDate"].is_string());

    let mut other = server.connect().await.unwrap();
    reply_data(
        &other
            .request("register", Credentials::unique().payload())
            .await
            .unwrap(),
    )
    .unwrap();
    let reply = other
        .request("fetchProfileData", json!({ "profileId": profile_id }))
        .await
        .unwrap();
    let profile = &reply_data(&reply).unwrap()["profileData"];
    assert!(profile.get("email").is_none());

    let reply = other
        .request(
            "fetchProfileData",
            json!({ "profileId": "00000000-0000-4000-8000-000000000000" }),
        )
        .await
        .unwrap();
    assert_eq!(reply_error_kind(&reply), Some("PROFILE_NOT_FOUND"));
}

// ============================================================================
// Protocol
// ============================================================================

#[tokio::test]
async fn test_unknown_event_with_ack() {
    let server = TestServer::start().await.unwrap();
    let mut client = server.connect().await.unwrap();

    let reply = client.request("doesNotExist", json!({})).await.unwrap();
    assert_eq!(reply_error_kind(&reply), Some("UNKNOWN"));
}

#[tokio::test]
async fn test_malformed_frame_keeps_connection_open() {
    let server = TestServer::start().await.unwrap();
    let mut client = server.connect().await.unwrap();

    client.send_text("this is not json".to_string()).await.unwrap();
    client.send_text(json!({ "data": {} }).to_string()).await.unwrap();
    client.emit("isLoggedIn", json!({})).await.unwrap();

    let reply = client.request("isLoggedIn", json!({})).await.unwrap();
    assert_eq!(reply_data(&reply).unwrap()["loggedIn"], false);
}

#[tokio::test]
async fn test_events_are_rate_limited_outside_test_mode() {
    let config = config_with(&[("TEST_MODE", "false"), ("JWT_SECRET", "integration-test-secret")])
        .unwrap();
    let server = TestServer::start_with_config(config).await.unwrap();
    let mut client = server.connect().await.unwrap();

    // Anonymous connections get 10 points and every event costs 5
    for _ in 0..2 {
        let reply = client.request("isLoggedIn", json!({})).await.unwrap();
        reply_data(&reply).unwrap();
    }
    let reply = client.request("isLoggedIn", json!({})).await.unwrap();
    assert_eq!(reply_error_kind(&reply), Some("RATELIMITED"));

    // Budgets are per connection
    let mut other = server.connect().await.unwrap();
    let reply = other.request("isLoggedIn", json!({})).await.unwrap();
    reply_data(&reply).unwrap();
}

#[tokio::test]
async fn test_idle_connection_is_closed() {
    let config = config_with(&[("CONNECT_TIMEOUT_MS", "300")]).unwrap();
    let server = TestServer::start_with_config(config).await.unwrap();
    let mut client = server.connect().await.unwrap();

    // Not polling the socket means server pings go unanswered
    tokio::time::sleep(Duration::from_millis(1500)).await;
    assert!(client.closed_within(Duration::from_secs(2)).await);
}
