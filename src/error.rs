//! Defines the app level error type and its conversion to JSON error responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The registration payload was missing an email or password.
    #[error("email and password are required")]
    MissingCredentials,

    /// The registration payload contained a string that is not a valid email
    /// address.
    #[error("\"{0}\" is not a valid email address")]
    InvalidEmail(String),

    /// The email address is already registered to another user.
    #[error("email already registered")]
    DuplicateEmail,

    /// The user provided an invalid combination of email and password.
    #[error("incorrect username or password")]
    InvalidCredentials,

    /// The bearer token is missing, malformed, expired, or does not refer to
    /// a registered user.
    #[error("invalid or expired bearer token")]
    InvalidToken,

    /// An access token could not be created.
    ///
    /// The inner string should only be logged on the server, not sent to the
    /// client.
    #[error("could not create an access token: {0}")]
    TokenCreation(String),

    /// A date field contained text that could not be parsed as a calendar
    /// date.
    #[error("could not parse \"{0}\" as a date in the format YYYY-MM-DD")]
    InvalidDate(String),

    /// An extra payment was requested with a missing, zero, or negative
    /// amount.
    #[error("payment amount must be a number greater than zero")]
    InvalidAmount,

    /// The requested resource was not found.
    ///
    /// This error is also returned when the resource exists but belongs to
    /// another user, so that callers cannot probe for other users' records.
    #[error("the requested resource could not be found")]
    NotFound,

    /// An unexpected error occurred with the underlying hashing library.
    ///
    /// The error string should only be logged for debugging on the server.
    #[error("hashing failed: {0}")]
    HashingError(String),

    /// Could not acquire the database lock.
    #[error("could not acquire the database lock")]
    DatabaseLock,

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            // Code 2067 occurs when a UNIQUE constraint failed.
            rusqlite::Error::SqliteFailure(sql_error, Some(ref desc))
                if sql_error.extended_code == 2067 && desc.contains("user.email") =>
            {
                Error::DuplicateEmail
            }
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => Error::SqlError(error),
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status_code, error_message) = match self {
            Error::MissingCredentials
            | Error::InvalidEmail(_)
            | Error::DuplicateEmail
            | Error::InvalidDate(_)
            | Error::InvalidAmount => (StatusCode::BAD_REQUEST, self.to_string()),
            Error::InvalidCredentials | Error::InvalidToken => {
                (StatusCode::UNAUTHORIZED, self.to_string())
            }
            Error::NotFound => (StatusCode::NOT_FOUND, self.to_string()),
            // Everything else is an internal fault whose detail stays in the
            // server logs.
            error => {
                tracing::error!("An unexpected error occurred: {error}");

                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status_code, body).into_response()
    }
}

#[cfg(test)]
mod error_tests {
    use axum::{http::StatusCode, response::IntoResponse};

    use super::Error;

    #[test]
    fn not_found_maps_to_404() {
        let response = Error::NotFound.into_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn auth_errors_map_to_401() {
        assert_eq!(
            Error::InvalidCredentials.into_response().status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            Error::InvalidToken.into_response().status(),
            StatusCode::UNAUTHORIZED
        );
    }

    #[test]
    fn validation_errors_map_to_400() {
        assert_eq!(
            Error::InvalidDate("oops".to_string()).into_response().status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            Error::InvalidAmount.into_response().status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            Error::DuplicateEmail.into_response().status(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn sql_error_is_hidden_from_the_client() {
        let response = Error::SqlError(rusqlite::Error::InvalidQuery).into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn query_returned_no_rows_becomes_not_found() {
        let error: Error = rusqlite::Error::QueryReturnedNoRows.into();

        assert_eq!(error, Error::NotFound);
    }
}
