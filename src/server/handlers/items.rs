//! Line-item ledger handlers.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde_json::{Value, json};
use std::sync::Arc;
use uuid::Uuid;

use crate::ledger::ItemUpdate;

use super::super::state::AppState;
use super::failure;

/// Handle POST /api/receipt/items - append a new empty item.
pub async fn add(State(state): State<Arc<AppState>>) -> Json<Value> {
    let mut session = state.session.write().await;
    let id = session.add_item();
    Json(json!({
        "success": true,
        "id": id,
        "items": session.data().items.items(),
        "total": session.total(),
    }))
}

/// Handle PATCH /api/receipt/items/:id - apply one field update.
///
/// The body is the update itself, e.g. `{"unit_price": 2000}` or
/// `{"description": "Iuran"}` or `{"quantity": 3}`.
pub async fn update(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(update): Json<ItemUpdate>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let mut session = state.session.write().await;
    session.update_item(id, update).map_err(|e| failure(&e))?;
    Ok(Json(json!({
        "success": true,
        "item": session.data().items.get(id),
        "total": session.total(),
    })))
}

/// Handle DELETE /api/receipt/items/:id - remove an item.
///
/// Removing the last remaining item is rejected with 409 and the
/// user-facing notice; the ledger is left unchanged.
pub async fn remove(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let mut session = state.session.write().await;
    session.remove_item(id).map_err(|e| failure(&e))?;
    Ok(Json(json!({
        "success": true,
        "items": session.data().items.items(),
        "total": session.total(),
    })))
}
