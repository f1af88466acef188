//! HTTP handlers for the receipt form API.

pub mod items;
pub mod receipt;
pub mod signature;

use axum::Json;
use axum::http::StatusCode;
use serde_json::{Value, json};

use crate::error::KuitansiError;
use crate::session::Notice;

/// Map an operation error to its HTTP status and JSON body with the
/// user-facing notice.
pub(crate) fn failure(err: &KuitansiError) -> (StatusCode, Json<Value>) {
    let status = match err {
        KuitansiError::LastItem => StatusCode::CONFLICT,
        KuitansiError::UnknownItem(_) => StatusCode::NOT_FOUND,
        KuitansiError::EmptyGesture
        | KuitansiError::ImageDecode(_)
        | KuitansiError::Incomplete(_)
        | KuitansiError::InvalidDocument(_) => StatusCode::BAD_REQUEST,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (
        status,
        Json(json!({"success": false, "notice": Notice::for_error(err)})),
    )
}
