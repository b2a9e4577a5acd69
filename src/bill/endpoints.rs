//! Endpoints for listing, creating, and paying bills.

use axum::{
    Json,
    extract::{Path, State},
};
use serde_json::{Value, json};

use crate::{AppState, DatabaseID, Error, auth::AuthenticatedUser};

use super::{
    db::{create_bill, get_bills_by_user, pay_bill},
    domain::{Bill, NewBill},
};

/// Handler that lists the authenticated user's bills.
pub async fn get_bills_endpoint(
    State(state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
) -> Result<Json<Vec<Bill>>, Error> {
    let connection = state.db_connection.lock().map_err(|_| Error::DatabaseLock)?;

    get_bills_by_user(user.id, &connection).map(Json)
}

/// Handler that creates a bill owned by the authenticated user.
///
/// Responds with 400 if the due date text cannot be parsed as a calendar
/// date.
pub async fn create_bill_endpoint(
    State(state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Json(new_bill): Json<NewBill>,
) -> Result<Json<Bill>, Error> {
    let data = new_bill.parse()?;

    let connection = state.db_connection.lock().map_err(|_| Error::DatabaseLock)?;

    create_bill(data, user.id, &connection).map(Json)
}

/// Handler that marks one of the authenticated user's bills as paid.
///
/// Paying an already paid bill succeeds without changing anything. Responds
/// with 404 if the bill does not exist or belongs to another user.
pub async fn pay_bill_endpoint(
    State(state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(bill_id): Path<DatabaseID>,
) -> Result<Json<Value>, Error> {
    let connection = state.db_connection.lock().map_err(|_| Error::DatabaseLock)?;

    pay_bill(bill_id, user.id, &connection)?;

    Ok(Json(json!({ "ok": true })))
}
