//! Registration and the current-user endpoint.

use std::str::FromStr;

use axum::{Json, extract::State, http::StatusCode};
use email_address::EmailAddress;
use serde::{Deserialize, Serialize};

use crate::{AppState, Error, PasswordHash, auth::AuthenticatedUser};

use super::{db::create_user, domain::UserID, domain::UserProfile};

/// The JSON body of a registration request.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    /// The email to register with. Must not already be registered.
    #[serde(default)]
    pub email: Option<String>,
    /// The password to sign in with.
    #[serde(default)]
    pub password: Option<String>,
    /// An optional display name.
    #[serde(default)]
    pub full_name: Option<String>,
}

/// The JSON body returned for a successful registration.
#[derive(Debug, Serialize, Deserialize)]
pub struct RegisterResponse {
    /// The new user's ID.
    pub id: UserID,
    /// The email the user registered with.
    pub email: String,
}

/// Handler for registration requests.
///
/// # Errors
///
/// This function will return an error if:
/// - the email or password is missing or empty,
/// - the email is not a valid email address,
/// - the email is already registered,
/// - or an internal error occurred while hashing the password.
pub async fn register_endpoint(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>), Error> {
    let email = payload
        .email
        .filter(|email| !email.is_empty())
        .ok_or(Error::MissingCredentials)?;
    let password = payload
        .password
        .filter(|password| !password.is_empty())
        .ok_or(Error::MissingCredentials)?;

    EmailAddress::from_str(&email).map_err(|_| Error::InvalidEmail(email.clone()))?;

    let password_hash = PasswordHash::from_raw_password(&password, PasswordHash::DEFAULT_COST)?;

    let connection = state.db_connection.lock().map_err(|_| Error::DatabaseLock)?;
    let user = create_user(&email, password_hash, payload.full_name.as_deref(), &connection)?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            id: user.id,
            email: user.email,
        }),
    ))
}

/// Handler that returns the authenticated user's profile.
pub async fn get_current_user_endpoint(
    AuthenticatedUser(user): AuthenticatedUser,
) -> Json<UserProfile> {
    Json(user.into())
}

#[cfg(test)]
mod register_tests {
    use axum::http::StatusCode;
    use serde_json::json;

    use crate::test_utils::{TEST_EMAIL, TEST_PASSWORD, new_test_server, register_test_user};

    use super::RegisterResponse;

    #[tokio::test]
    async fn register_returns_201_with_id_and_email() {
        let server = new_test_server();

        let response = server
            .post("/register")
            .json(&json!({
                "email": TEST_EMAIL,
                "password": TEST_PASSWORD,
                "full_name": "Test User",
            }))
            .await;

        response.assert_status(StatusCode::CREATED);

        let body = response.json::<RegisterResponse>();
        assert_eq!(body.email, TEST_EMAIL);
        assert!(body.id.as_i64() > 0);
    }

    #[tokio::test]
    async fn register_fails_with_missing_password() {
        let server = new_test_server();

        server
            .post("/register")
            .json(&json!({ "email": TEST_EMAIL }))
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn register_fails_with_invalid_email() {
        let server = new_test_server();

        server
            .post("/register")
            .json(&json!({ "email": "not an email", "password": TEST_PASSWORD }))
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn register_fails_on_duplicate_email_regardless_of_password() {
        let server = new_test_server();
        register_test_user(&server).await;

        server
            .post("/register")
            .json(&json!({ "email": TEST_EMAIL, "password": "a different password" }))
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }
}
