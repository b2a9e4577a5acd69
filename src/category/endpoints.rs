//! Endpoints for listing, creating, and deleting categories.

use axum::{
    Json,
    extract::{Path, State},
};
use serde_json::{Value, json};

use crate::{AppState, DatabaseID, Error, auth::AuthenticatedUser};

use super::{
    db::{create_category, delete_category, get_categories_by_user},
    domain::{Category, NewCategory},
};

/// Handler that lists the authenticated user's categories.
pub async fn get_categories_endpoint(
    State(state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
) -> Result<Json<Vec<Category>>, Error> {
    let connection = state.db_connection.lock().map_err(|_| Error::DatabaseLock)?;

    get_categories_by_user(user.id, &connection).map(Json)
}

/// Handler that creates a category owned by the authenticated user.
pub async fn create_category_endpoint(
    State(state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Json(new_category): Json<NewCategory>,
) -> Result<Json<Category>, Error> {
    let connection = state.db_connection.lock().map_err(|_| Error::DatabaseLock)?;

    create_category(new_category, user.id, &connection).map(Json)
}

/// Handler that deletes one of the authenticated user's categories.
///
/// Responds with 404 if the category does not exist or belongs to another
/// user.
pub async fn delete_category_endpoint(
    State(state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(category_id): Path<DatabaseID>,
) -> Result<Json<Value>, Error> {
    let connection = state.db_connection.lock().map_err(|_| Error::DatabaseLock)?;

    delete_category(category_id, user.id, &connection)?;

    Ok(Json(json!({ "ok": true })))
}
