//! Season entity model.

use putting_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `seasons` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Season {
    pub id: DbId,
    /// External identifier used by clients, e.g. `season6`.
    pub season_id: String,
    pub title: String,
    pub description: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
