//! Weekly score models.

use putting_core::store::StoredScore;
use putting_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `scores` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Score {
    pub id: DbId,
    pub season_id: DbId,
    pub player_id: DbId,
    pub week: i32,
    pub score: Option<f64>,
    pub is_formula: bool,
    pub formula_text: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A score joined with its player's name.
#[derive(Debug, Clone, FromRow)]
pub struct ScoreWithPlayer {
    pub player_name: String,
    pub week: i32,
    pub score: Option<f64>,
    pub is_formula: bool,
    pub formula_text: Option<String>,
}

impl From<ScoreWithPlayer> for StoredScore {
    fn from(row: ScoreWithPlayer) -> Self {
        StoredScore {
            player_name: row.player_name,
            week: row.week,
            score: row.score,
            is_formula: row.is_formula,
            formula_text: row.formula_text,
        }
    }
}
