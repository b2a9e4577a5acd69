//! Helpers shared across endpoint tests.

use axum_test::TestServer;
use rusqlite::Connection;
use serde_json::json;

use crate::{AppState, auth::TokenResponse, routing::build_router};

pub const TEST_EMAIL: &str = "test@test.com";
pub const TEST_PASSWORD: &str = "correcthorsebatterystaple";

const TEST_JWT_SECRET: &str = "a test secret that must not leave this file";

/// Create a test server backed by a fresh in-memory database.
pub fn new_test_server() -> TestServer {
    let connection = Connection::open_in_memory().expect("Could not open in-memory database.");
    let state =
        AppState::new(connection, TEST_JWT_SECRET).expect("Could not create app state.");

    TestServer::new(build_router(state))
}

/// Register the default test user.
pub async fn register_test_user(server: &TestServer) {
    server
        .post("/register")
        .json(&json!({ "email": TEST_EMAIL, "password": TEST_PASSWORD }))
        .await
        .assert_status_success();
}

/// Register `email` and sign them in, returning a bearer token.
pub async fn sign_up_user(server: &TestServer, email: &str, password: &str) -> String {
    server
        .post("/register")
        .json(&json!({ "email": email, "password": password }))
        .await
        .assert_status_success();

    let response = server
        .post("/token")
        .form(&[("username", email), ("password", password)])
        .await;

    response.assert_status_ok();
    response.json::<TokenResponse>().access_token
}

/// Register the default test user and sign them in, returning a bearer token.
pub async fn register_and_sign_in(server: &TestServer) -> String {
    sign_up_user(server, TEST_EMAIL, TEST_PASSWORD).await
}
