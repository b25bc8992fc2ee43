//! Shared response envelope types for API handlers.
//!
//! All successful responses use a `{ "success": true, "data": ... }`
//! envelope; failures are rendered by [`crate::error::AppError`] with a
//! `success: false` flag and a machine-readable `code`.

use serde::Serialize;

/// Standard `{ "success": true, "data": T }` response envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub success: bool,
    pub data: T,
}

impl<T: Serialize> DataResponse<T> {
    pub fn new(data: T) -> Self {
        Self { success: true, data }
    }
}

/// `{ "success": true, "message": ... }` envelope for operations with no
/// data payload (deletes, restores, purges).
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}
