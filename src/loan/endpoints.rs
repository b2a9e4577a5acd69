//! Endpoints for listing, creating, and deleting loans.

use axum::{
    Json,
    extract::{Path, State},
};
use serde_json::{Value, json};

use crate::{AppState, DatabaseID, Error, auth::AuthenticatedUser};

use super::{
    db::{create_loan, delete_loan, get_loans_by_user},
    domain::{Loan, NewLoan},
};

/// Handler that lists the authenticated user's loans.
pub async fn get_loans_endpoint(
    State(state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
) -> Result<Json<Vec<Loan>>, Error> {
    let connection = state.db_connection.lock().map_err(|_| Error::DatabaseLock)?;

    get_loans_by_user(user.id, &connection).map(Json)
}

/// Handler that creates a loan owned by the authenticated user.
///
/// The loan is always stored as active. A missing `remaining_balance` defaults
/// to the loan amount.
pub async fn create_loan_endpoint(
    State(state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Json(new_loan): Json<NewLoan>,
) -> Result<Json<Loan>, Error> {
    let loan_data = new_loan.parse()?;
    let connection = state.db_connection.lock().map_err(|_| Error::DatabaseLock)?;

    create_loan(loan_data, user.id, &connection).map(Json)
}

/// Handler that deletes one of the authenticated user's loans.
///
/// Responds with 404 if the loan does not exist or belongs to another user.
pub async fn delete_loan_endpoint(
    State(state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(loan_id): Path<DatabaseID>,
) -> Result<Json<Value>, Error> {
    let connection = state.db_connection.lock().map_err(|_| Error::DatabaseLock)?;

    delete_loan(loan_id, user.id, &connection)?;

    Ok(Json(json!({ "message": "Loan deleted" })))
}
