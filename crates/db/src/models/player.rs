//! Player entity model.

use putting_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `players` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Player {
    pub id: DbId,
    pub name: String,
    pub display_order: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A player's membership in one season, joined with the player name.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SeasonPlayer {
    pub player_id: DbId,
    pub name: String,
    /// Grid column of the player in this season.
    pub display_order: i32,
}
