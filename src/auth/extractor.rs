//! An axum extractor that resolves the bearer token on a request to the
//! authenticated user.

use axum::{
    RequestPartsExt,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Bearer},
};

use crate::{
    Error,
    state::AuthState,
    user::{User, get_user_by_email},
};

use super::token::decode_token;

/// The user who made the current request.
///
/// Extracting this type validates the `Authorization: Bearer` header and
/// looks up the user named by the token's subject claim. Handlers that take
/// an `AuthenticatedUser` therefore reject unauthenticated requests with
/// 401 before they run.
pub struct AuthenticatedUser(pub User);

impl<S> FromRequestParts<S> for AuthenticatedUser
where
    AuthState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) = parts
            .extract::<TypedHeader<Authorization<Bearer>>>()
            .await
            .map_err(|_| Error::InvalidToken)?;

        let state = AuthState::from_ref(state);
        let claims = decode_token(bearer.token(), &state.decoding_key)?;

        let connection = state.db_connection.lock().map_err(|_| Error::DatabaseLock)?;

        match get_user_by_email(&claims.sub, &connection) {
            Ok(user) => Ok(Self(user)),
            // A valid token may outlive its account, e.g. the user row was
            // deleted after the token was issued.
            Err(Error::NotFound) => Err(Error::InvalidToken),
            Err(error) => Err(error),
        }
    }
}

#[cfg(test)]
mod extractor_tests {
    use axum::http::StatusCode;

    use crate::test_utils::{new_test_server, register_and_sign_in};

    #[tokio::test]
    async fn request_with_valid_token_succeeds() {
        let server = new_test_server();
        let token = register_and_sign_in(&server).await;

        server
            .get("/users/me")
            .authorization_bearer(token)
            .await
            .assert_status_ok();
    }

    #[tokio::test]
    async fn request_with_missing_header_is_unauthorized() {
        let server = new_test_server();

        server
            .get("/users/me")
            .await
            .assert_status(StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn request_with_garbage_token_is_unauthorized() {
        let server = new_test_server();

        server
            .get("/users/me")
            .authorization_bearer("not.a.token")
            .await
            .assert_status(StatusCode::UNAUTHORIZED);
    }
}
