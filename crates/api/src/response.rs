//! Shared response envelope types for API handlers.
//!
//! Season endpoints use the `{ "data": ... }` envelope. The cell endpoints
//! return the bare shapes the grid UI reads.

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

/// `{ "success": true }` acknowledgement for a single-cell write.
#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}
