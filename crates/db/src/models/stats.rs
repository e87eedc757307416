//! Read-only season statistics.

use serde::Serialize;
use sqlx::FromRow;

/// Per-player summary of a season's plain weekly scores and stored aggregates.
///
/// Formula weeks and blank weeks are not counted.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PlayerSeasonStats {
    pub player_name: String,
    pub display_order: i32,
    pub weeks_played: i64,
    pub average: Option<f64>,
    pub lowest: Option<f64>,
    pub highest: Option<f64>,
    pub sum: Option<f64>,
    /// Stored `total` aggregate.
    pub total: Option<f64>,
    /// Stored `total_minus_two_lowest` aggregate.
    pub total_minus_two_lowest: Option<f64>,
}
