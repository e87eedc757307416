//! Repository for the `scores` table.

use putting_core::store::ScoreWrite;
use putting_core::types::DbId;
use sqlx::PgConnection;

use crate::models::score::{Score, ScoreWithPlayer};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, season_id, player_id, week, score, is_formula, formula_text, \
                       created_at, updated_at";

/// Provides data access for weekly scores.
pub struct ScoreRepo;

impl ScoreRepo {
    /// Insert or replace the score for (season, player, week).
    pub async fn upsert(
        conn: &mut PgConnection,
        season: DbId,
        player: DbId,
        write: &ScoreWrite,
    ) -> Result<Score, sqlx::Error> {
        let query = format!(
            "INSERT INTO scores (season_id, player_id, week, score, is_formula, formula_text) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             ON CONFLICT (season_id, player_id, week) DO UPDATE SET \
                score = EXCLUDED.score, \
                is_formula = EXCLUDED.is_formula, \
                formula_text = EXCLUDED.formula_text, \
                updated_at = NOW() \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Score>(&query)
            .bind(season)
            .bind(player)
            .bind(i32::from(write.week))
            .bind(write.score)
            .bind(write.is_formula)
            .bind(write.formula_text.as_deref())
            .fetch_one(&mut *conn)
            .await
    }

    /// Delete the score for (season, player, week).
    ///
    /// Returns `true` if a row was removed.
    pub async fn delete(
        conn: &mut PgConnection,
        season: DbId,
        player: DbId,
        week: u8,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "DELETE FROM scores WHERE season_id = $1 AND player_id = $2 AND week = $3",
        )
        .bind(season)
        .bind(player)
        .bind(i32::from(week))
        .execute(&mut *conn)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Non-formula, non-null scores of one player, ordered by week.
    pub async fn plain_scores(
        conn: &mut PgConnection,
        season: DbId,
        player: DbId,
    ) -> Result<Vec<f64>, sqlx::Error> {
        sqlx::query_scalar::<_, f64>(
            "SELECT score FROM scores \
             WHERE season_id = $1 AND player_id = $2 \
               AND NOT is_formula AND score IS NOT NULL \
             ORDER BY week",
        )
        .bind(season)
        .bind(player)
        .fetch_all(&mut *conn)
        .await
    }

    /// All scores of a season joined with player names.
    pub async fn list_for_season(
        conn: &mut PgConnection,
        season: DbId,
    ) -> Result<Vec<ScoreWithPlayer>, sqlx::Error> {
        sqlx::query_as::<_, ScoreWithPlayer>(
            "SELECT p.name AS player_name, s.week, s.score, s.is_formula, s.formula_text \
             FROM scores s \
             JOIN players p ON p.id = s.player_id \
             WHERE s.season_id = $1 \
             ORDER BY p.id, s.week",
        )
        .bind(season)
        .fetch_all(&mut *conn)
        .await
    }
}
