//! Receipt document handlers: state, details, preview, print, share.

use axum::{
    Json,
    extract::State,
    http::{StatusCode, header},
    response::IntoResponse,
};
use chrono::Local;
use serde_json::{Value, json};
use std::sync::Arc;

use crate::document::{DetailsUpdate, receipt_number};
use crate::session::NoticeKind;

use super::super::state::AppState;
use super::failure;

/// Handle GET /api/receipt - the full document state.
pub async fn get(State(state): State<Arc<AppState>>) -> Json<Value> {
    let session = state.session.read().await;
    Json(json!({
        "receipt": session.data(),
        "total": session.total(),
        "receipt_number": receipt_number(Local::now().date_naive()),
        "missing_fields": session.data().missing_fields(),
    }))
}

/// Handle PUT /api/receipt/details - set identity/date/method/note fields.
pub async fn details(
    State(state): State<Arc<AppState>>,
    Json(update): Json<DetailsUpdate>,
) -> Json<Value> {
    let mut session = state.session.write().await;
    session.update_details(update);
    Json(json!({"success": true, "missing_fields": session.data().missing_fields()}))
}

/// Handle GET /api/receipt/preview - render the receipt as text.
pub async fn preview(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, (StatusCode, Json<Value>)> {
    let session = state.session.read().await;
    let text = session
        .preview(Local::now().date_naive())
        .map_err(|e| failure(&e))?;
    Ok((
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        text,
    ))
}

/// Handle POST /api/receipt/print - delegate to the host print facility.
pub async fn print(State(state): State<Arc<AppState>>) -> Json<Value> {
    let mut session = state.session.write().await;
    let mut facility = state.print.lock().await;
    let notice = session.print(facility.as_mut());
    Json(json!({"success": notice.kind == NoticeKind::Info, "notice": notice}))
}

/// Handle POST /api/receipt/share - delegate to the host share facility.
pub async fn share(State(state): State<Arc<AppState>>) -> Json<Value> {
    let mut session = state.session.write().await;
    let mut facility = state.share.lock().await;
    let notice = session.share(facility.as_mut());
    Json(json!({"success": notice.kind == NoticeKind::Info, "notice": notice}))
}
