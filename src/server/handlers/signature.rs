//! Signature and logo handlers.

use axum::{
    Json,
    extract::{Multipart, State},
    http::StatusCode,
};
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::Arc;

use crate::signature::Point;

use super::super::state::AppState;
use super::failure;

/// One completed drawing gesture: the points of a single press-to-release
/// interaction, in viewport coordinates.
#[derive(Debug, Deserialize)]
pub struct GestureForm {
    pub points: Vec<Point>,
    /// On-screen top-left of the drawing surface, for coordinate mapping.
    #[serde(default)]
    pub origin: Option<Point>,
}

/// Handle POST /api/signature/strokes - apply one completed gesture.
pub async fn strokes(
    State(state): State<Arc<AppState>>,
    Json(form): Json<GestureForm>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let mut session = state.session.write().await;
    if let Some(origin) = form.origin {
        session.pad_mut().set_origin(origin.x, origin.y);
    }
    let notice = session
        .apply_gesture(&form.points)
        .map_err(|e| failure(&e))?;
    Ok(Json(json!({
        "success": true,
        "notice": notice,
        "signature": session.data().payer_signature,
    })))
}

/// Handle DELETE /api/signature - clear the signature.
pub async fn clear(State(state): State<Arc<AppState>>) -> Json<Value> {
    let mut session = state.session.write().await;
    let notice = session.clear_signature();
    Json(json!({
        "success": true,
        "notice": notice,
        "signature": session.data().payer_signature,
    }))
}

/// Handle POST /api/signature/upload - store an uploaded signature image.
pub async fn upload(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let (bytes, mime) = read_image_field(multipart).await?;
    let mut session = state.session.write().await;
    let notice = session
        .apply_uploaded_signature(&bytes, &mime)
        .map_err(|e| failure(&e))?;
    Ok(Json(json!({
        "success": true,
        "notice": notice,
        "signature": session.data().payer_signature,
    })))
}

/// Handle POST /api/logo/upload - store an uploaded letterhead logo.
pub async fn logo(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let (bytes, mime) = read_image_field(multipart).await?;
    let mut session = state.session.write().await;
    let notice = session.set_logo(&bytes, &mime).map_err(|e| failure(&e))?;
    Ok(Json(json!({"success": true, "notice": notice})))
}

/// Extract the `image` field from a multipart upload.
async fn read_image_field(
    mut multipart: Multipart,
) -> Result<(Vec<u8>, String), (StatusCode, Json<Value>)> {
    while let Some(field) = multipart.next_field().await.map_err(|e| {
        (
            StatusCode::BAD_REQUEST,
            Json(json!({"success": false, "error": format!("Multipart error: {}", e)})),
        )
    })? {
        if field.name() != Some("image") {
            continue;
        }
        let mime = field
            .content_type()
            .unwrap_or("image/png")
            .to_string();
        let bytes = field.bytes().await.map_err(|e| {
            (
                StatusCode::BAD_REQUEST,
                Json(json!({"success": false, "error": format!("Failed to read image: {}", e)})),
            )
        })?;
        return Ok((bytes.to_vec(), mime));
    }

    Err((
        StatusCode::BAD_REQUEST,
        Json(json!({"success": false, "error": "No image field found"})),
    ))
}
