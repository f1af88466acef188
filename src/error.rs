//! # Error Types
//!
//! This module defines error types used throughout the kuitansi library.

use thiserror::Error;
use uuid::Uuid;

/// Main error type for kuitansi operations
#[derive(Debug, Error)]
pub enum KuitansiError {
    /// Removing the last remaining line item is rejected
    #[error("cannot remove the last remaining item")]
    LastItem,

    /// No line item with the given identifier
    #[error("no item with id {0}")]
    UnknownItem(Uuid),

    /// A signature gesture was submitted without any points
    #[error("gesture contained no points")]
    EmptyGesture,

    /// An uploaded image could not be decoded
    #[error("image decode failed: {0}")]
    ImageDecode(String),

    /// Signature export failed to encode
    #[error("image encode failed: {0}")]
    ImageEncode(String),

    /// The host environment has no share facility
    #[error("sharing is not supported in this environment")]
    ShareUnsupported,

    /// The host share facility reported a failure
    #[error("share failed: {0}")]
    ShareFailed(String),

    /// The host print facility reported a failure
    #[error("print failed: {0}")]
    PrintFailed(String),

    /// Required receipt fields are missing
    #[error("missing required fields: {0}")]
    Incomplete(String),

    /// A receipt document could not be parsed
    #[error("invalid document: {0}")]
    InvalidDocument(String),

    /// I/O error wrapper
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
