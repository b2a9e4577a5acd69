//! Endpoints for listing and creating transactions.

use axum::{Json, extract::State};

use crate::{AppState, Error, auth::AuthenticatedUser};

use super::{
    db::{create_transaction, get_transactions_by_user},
    domain::{NewTransaction, Transaction},
};

/// Handler that lists the authenticated user's transactions.
pub async fn get_transactions_endpoint(
    State(state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
) -> Result<Json<Vec<Transaction>>, Error> {
    let connection = state.db_connection.lock().map_err(|_| Error::DatabaseLock)?;

    get_transactions_by_user(user.id, &connection).map(Json)
}

/// Handler that creates a transaction owned by the authenticated user.
///
/// Responds with 400 if the date text cannot be parsed as a calendar date.
pub async fn create_transaction_endpoint(
    State(state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Json(new_transaction): Json<NewTransaction>,
) -> Result<Json<Transaction>, Error> {
    let data = new_transaction.parse()?;

    let connection = state.db_connection.lock().map_err(|_| Error::DatabaseLock)?;

    create_transaction(data, user.id, &connection).map(Json)
}
