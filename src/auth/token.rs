//! Issuing and validating JSON Web Tokens.

use axum::{Form, Json, extract::State};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, TokenData, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};

use crate::{AppState, Error, user::get_user_by_email};

/// How long issued access tokens remain valid.
///
/// Expiry is the only invalidation mechanism, there is no revocation list.
pub const TOKEN_DURATION: Duration = Duration::minutes(30);

/// The contents of a JSON Web Token.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// The email of the user the token was issued to.
    pub sub: String,
    /// The expiry time of the token as a unix timestamp.
    pub exp: usize,
    /// The time the token was issued as a unix timestamp.
    pub iat: usize,
}

/// Create a signed token asserting the identity `email`, valid for
/// [TOKEN_DURATION].
///
/// # Errors
///
/// This function will return an error if the token could not be signed.
pub fn encode_token(email: &str, encoding_key: &EncodingKey) -> Result<String, Error> {
    encode_token_with_duration(email, TOKEN_DURATION, encoding_key)
}

fn encode_token_with_duration(
    email: &str,
    duration: Duration,
    encoding_key: &EncodingKey,
) -> Result<String, Error> {
    let now = OffsetDateTime::now_utc();
    let claims = Claims {
        sub: email.to_string(),
        exp: (now + duration).unix_timestamp() as usize,
        iat: now.unix_timestamp() as usize,
    };

    encode(&Header::default(), &claims, encoding_key)
        .map_err(|error| Error::TokenCreation(error.to_string()))
}

/// Validate a token's signature and expiry and return its claims.
///
/// # Errors
///
/// Returns [Error::InvalidToken] if the token is malformed, the signature
/// does not match, or the expiry has passed.
pub fn decode_token(token: &str, decoding_key: &DecodingKey) -> Result<Claims, Error> {
    decode::<Claims>(token, decoding_key, &Validation::default())
        .map(|TokenData { claims, .. }| claims)
        .map_err(|_| Error::InvalidToken)
}

/// The form body of a token request, OAuth2 password-grant style.
#[derive(Debug, Deserialize)]
pub struct TokenRequest {
    /// The email the user registered with.
    pub username: String,
    /// The user's password.
    pub password: String,
}

/// A freshly issued access token.
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    /// The signed bearer token.
    pub access_token: String,
    /// Always "bearer".
    pub token_type: String,
}

/// Handler for token requests (sign-in).
///
/// # Errors
///
/// This function will return an error if:
/// - the email does not belong to a registered user,
/// - the password is not correct,
/// - or an internal error occurred when verifying the password or signing
///   the token.
pub async fn issue_token_endpoint(
    State(state): State<AppState>,
    Form(credentials): Form<TokenRequest>,
) -> Result<Json<TokenResponse>, Error> {
    let user = {
        let connection = state.db_connection.lock().map_err(|_| Error::DatabaseLock)?;

        match get_user_by_email(&credentials.username, &connection) {
            Ok(user) => user,
            // Respond the same way for an unknown email and a wrong password.
            Err(Error::NotFound) => return Err(Error::InvalidCredentials),
            Err(error) => return Err(error),
        }
    };

    let password_is_correct = user
        .password_hash
        .verify(&credentials.password)
        .map_err(|error| Error::HashingError(error.to_string()))?;

    if !password_is_correct {
        return Err(Error::InvalidCredentials);
    }

    let access_token = encode_token(&user.email, state.encoding_key())?;

    Ok(Json(TokenResponse {
        access_token,
        token_type: "bearer".to_string(),
    }))
}


#[cfg(test)]
mod sign_in_tests {
    use axum::http::StatusCode;

    use crate::test_utils::{TEST_EMAIL, TEST_PASSWORD, new_test_server, register_test_user};

    use super::TokenResponse;

    #[tokio::test]
    async fn sign_in_succeeds_with_valid_credentials() {
        let server = new_test_server();
        register_test_user(&server).await;

        let response = server
            .post("/token")
            .form(&[("username", TEST_EMAIL), ("password", TEST_PASSWORD)])
            .await;

        response.assert_status_ok();

        let body = response.json::<TokenResponse>();
        assert_eq!(body.token_type, "bearer");
        assert!(!body.access_token.is_empty());
    }

    #[tokio::test]
    async fn sign_in_fails_with_wrong_password() {
        let server = new_test_server();
        register_test_user(&server).await;

        server
            .post("/token")
            .form(&[("username", TEST_EMAIL), ("password", "not the password")])
            .await
            .assert_status(StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn sign_in_fails_with_unknown_email() {
        let server = new_test_server();

        server
            .post("/token")
            .form(&[("username", "nobody@nowhere.com"), ("password", "hunter2")])
            .await
            .assert_status(StatusCode::UNAUTHORIZED);
    }
}
