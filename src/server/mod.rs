//! # HTTP Server for the Receipt Form
//!
//! Exposes the receipt form operations as a JSON API and serves the
//! embedded form frontend.
//!
//! ## Usage
//!
//! ```bash
//! kuitansi serve --listen 0.0.0.0:8080
//! ```
//!
//! Then open http://localhost:8080 in a browser to fill in the receipt.

mod handlers;
mod state;
mod static_files;

pub use state::{AppState, HostPrint, HostShare, ServerConfig};

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{delete, get, patch, post, put},
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::error::KuitansiError;

/// Upload size limit for signature/logo images (10 MB).
const UPLOAD_LIMIT: usize = 10 * 1024 * 1024;

/// Start the HTTP server.
///
/// ## Example
///
/// ```no_run
/// use kuitansi::server::{serve, ServerConfig};
///
/// # async fn example() -> Result<(), kuitansi::KuitansiError> {
/// let config = ServerConfig {
///     listen_addr: "0.0.0.0:8080".to_string(),
/// };
///
/// serve(config).await?;
/// # Ok(())
/// # }
/// ```
pub async fn serve(config: ServerConfig) -> Result<(), KuitansiError> {
    let app_state = Arc::new(AppState::new(config.clone()));
    let app = router(app_state);

    info!("Kuitansi HTTP server starting");
    info!(addr = %config.listen_addr, "listening");
    info!("Open http://{}/ in your browser", config.listen_addr);

    let listener = tokio::net::TcpListener::bind(&config.listen_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Build the router over shared state. Split out so tests can drive the
/// API without binding a socket.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        // Frontend
        .route("/", get(static_files::index_handler))
        .route("/assets/*path", get(static_files::asset_handler))
        // Receipt document
        .route("/api/receipt", get(handlers::receipt::get))
        .route("/api/receipt/details", put(handlers::receipt::details))
        .route("/api/receipt/preview", get(handlers::receipt::preview))
        .route("/api/receipt/print", post(handlers::receipt::print))
        .route("/api/receipt/share", post(handlers::receipt::share))
        // Line items
        .route("/api/receipt/items", post(handlers::items::add))
        .route(
            "/api/receipt/items/:id",
            patch(handlers::items::update).delete(handlers::items::remove),
        )
        // Signature and logo
        .route("/api/signature/strokes", post(handlers::signature::strokes))
        .route("/api/signature", delete(handlers::signature::clear))
        .route(
            "/api/signature/upload",
            post(handlers::signature::upload).layer(DefaultBodyLimit::max(UPLOAD_LIMIT)),
        )
        .route(
            "/api/logo/upload",
            post(handlers::signature::logo).layer(DefaultBodyLimit::max(UPLOAD_LIMIT)),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
