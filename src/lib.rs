//! # Kuitansi - Receipt Generator
//!
//! Kuitansi is a Rust library and HTTP service for building payment
//! receipts ("kuitansi") with itemized amounts and a handwritten or
//! uploaded payer signature. It provides:
//!
//! - **Line-item ledger**: ordered billable items with a derived total,
//!   recomputed synchronously on every mutation
//! - **Signature capture**: a raster surface that turns pointer gestures
//!   into freehand strokes and exports them as PNG
//! - **Receipt rendering**: a pure projection from document state to a
//!   fixed-width text receipt
//! - **Form server**: an axum JSON API plus embedded frontend
//!
//! ## Quick Start
//!
//! ```
//! use chrono::NaiveDate;
//! use kuitansi::document::DetailsUpdate;
//! use kuitansi::ledger::{ItemUpdate, SequentialSource};
//! use kuitansi::session::ReceiptSession;
//! use kuitansi::signature::Point;
//!
//! let today = NaiveDate::from_ymd_opt(2026, 8, 7).unwrap();
//! let mut session = ReceiptSession::new(Box::new(SequentialSource::default()), today);
//!
//! // Fill in the form
//! session.update_details(DetailsUpdate {
//!     from: Some("Budi Santoso".into()),
//!     receiver: Some("Sari Dewi".into()),
//!     receiver_npa: Some("24.0093".into()),
//!     ..Default::default()
//! });
//! let id = session.data().items.items()[0].id;
//! session.update_item(id, ItemUpdate::UnitPrice(150_000.0))?;
//!
//! // Sign and render
//! session.apply_gesture(&[Point::new(10.0, 10.0), Point::new(50.0, 50.0)])?;
//! let receipt = session.preview(today)?;
//! assert!(receipt.contains("Rp 150.000"));
//!
//! # Ok::<(), kuitansi::KuitansiError>(())
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`ledger`] | Line items and the derived total |
//! | [`signature`] | Freehand signature capture surface |
//! | [`document`] | Receipt document state |
//! | [`render`] | Text receipt projection |
//! | [`format`] | Indonesian currency/date formatting |
//! | [`session`] | Editing session, notices, print/share delegation |
//! | [`server`] | HTTP API and embedded frontend |
//! | [`error`] | Error types |

pub mod document;
pub mod error;
pub mod format;
pub mod ledger;
pub mod render;
pub mod server;
pub mod session;
pub mod signature;

// Re-exports for convenience
pub use document::ReceiptData;
pub use error::KuitansiError;
pub use ledger::Ledger;
pub use session::ReceiptSession;
pub use signature::SignaturePad;
