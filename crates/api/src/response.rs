//! Shared response envelope types for API handlers.
//!
//! All list/detail responses use a `{ "data": ... }` envelope per project
//! conventions; delete-style endpoints answer with a `{ "success": true }`
//! flag. Use these instead of ad-hoc `serde_json::json!` literals to get
//! compile-time type safety and consistent serialization.

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

/// Standard `{ "success": bool }` envelope for delete-style endpoints.
#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    pub fn ok() -> Self {
        Self { success: true }
    }
}
