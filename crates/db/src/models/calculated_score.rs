//! Calculated aggregate models.

use putting_core::cell_key::CalculationType;
use putting_core::store::StoredAggregate;
use putting_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `calculated_scores` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CalculatedScore {
    pub id: DbId,
    pub season_id: DbId,
    pub player_id: DbId,
    /// `total` or `total_minus_two_lowest`.
    pub calculation_type: String,
    pub value: f64,
    pub calculated_at: Timestamp,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// An aggregate joined with its player's name.
#[derive(Debug, Clone, FromRow)]
pub struct CalculatedScoreWithPlayer {
    pub player_name: String,
    pub calculation_type: String,
    pub value: f64,
}

impl CalculatedScoreWithPlayer {
    /// Convert to the domain shape. `None` for an unrecognised type.
    pub fn into_stored(self) -> Option<StoredAggregate> {
        let calculation_type = CalculationType::parse(&self.calculation_type)?;
        Some(StoredAggregate {
            player_name: self.player_name,
            calculation_type,
            value: self.value,
        })
    }
}
