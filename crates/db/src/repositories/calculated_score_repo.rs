//! Repository for the `calculated_scores` table.

use putting_core::cell_key::CalculationType;
use putting_core::types::DbId;
use sqlx::PgConnection;

use crate::models::calculated_score::{CalculatedScore, CalculatedScoreWithPlayer};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, season_id, player_id, calculation_type, value, calculated_at, \
                       created_at, updated_at";

/// Provides data access for stored season aggregates.
pub struct CalculatedScoreRepo;

impl CalculatedScoreRepo {
    /// Insert or replace one aggregate, stamping `calculated_at`.
    pub async fn upsert(
        conn: &mut PgConnection,
        season: DbId,
        player: DbId,
        calculation_type: CalculationType,
        value: f64,
    ) -> Result<CalculatedScore, sqlx::Error> {
        let query = format!(
            "INSERT INTO calculated_scores (season_id, player_id, calculation_type, value) \
             VALUES ($1, $2, $3, $4) \
             ON CONFLICT (season_id, player_id, calculation_type) DO UPDATE SET \
                value = EXCLUDED.value, \
                calculated_at = NOW(), \
                updated_at = NOW() \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CalculatedScore>(&query)
            .bind(season)
            .bind(player)
            .bind(calculation_type.as_str())
            .bind(value)
            .fetch_one(&mut *conn)
            .await
    }

    /// Delete one aggregate.
    ///
    /// Returns `true` if a row was removed.
    pub async fn delete(
        conn: &mut PgConnection,
        season: DbId,
        player: DbId,
        calculation_type: CalculationType,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "DELETE FROM calculated_scores \
             WHERE season_id = $1 AND player_id = $2 AND calculation_type = $3",
        )
        .bind(season)
        .bind(player)
        .bind(calculation_type.as_str())
        .execute(&mut *conn)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// All aggregates of a season joined with player names.
    pub async fn list_for_season(
        conn: &mut PgConnection,
        season: DbId,
    ) -> Result<Vec<CalculatedScoreWithPlayer>, sqlx::Error> {
        sqlx::query_as::<_, CalculatedScoreWithPlayer>(
            "SELECT p.name AS player_name, c.calculation_type, c.value \
             FROM calculated_scores c \
             JOIN players p ON p.id = c.player_id \
             WHERE c.season_id = $1 \
             ORDER BY p.id, c.calculation_type",
        )
        .bind(season)
        .fetch_all(&mut *conn)
        .await
    }
}
