//! Read-only statistics over `scores` and `calculated_scores`.

use putting_core::types::DbId;
use sqlx::PgPool;

use crate::models::stats::PlayerSeasonStats;

/// Provides season summary queries.
pub struct StatsRepo;

impl StatsRepo {
    /// Summarise every season member's plain weekly scores, with their
    /// stored aggregates, in display order.
    pub async fn season_stats(
        pool: &PgPool,
        season: DbId,
    ) -> Result<Vec<PlayerSeasonStats>, sqlx::Error> {
        sqlx::query_as::<_, PlayerSeasonStats>(
            "SELECT \
                p.name AS player_name, \
                sp.display_order, \
                COUNT(s.score) AS weeks_played, \
                AVG(s.score) AS average, \
                MIN(s.score) AS lowest, \
                MAX(s.score) AS highest, \
                SUM(s.score) AS sum, \
                (SELECT c.value FROM calculated_scores c \
                  WHERE c.season_id = sp.season_id AND c.player_id = sp.player_id \
                    AND c.calculation_type = 'total') AS total, \
                (SELECT c.value FROM calculated_scores c \
                  WHERE c.season_id = sp.season_id AND c.player_id = sp.player_id \
                    AND c.calculation_type = 'total_minus_two_lowest') AS total_minus_two_lowest \
             FROM season_players sp \
             JOIN players p ON p.id = sp.player_id \
             LEFT JOIN scores s \
                ON s.season_id = sp.season_id AND s.player_id = sp.player_id \
               AND NOT s.is_formula AND s.score IS NOT NULL \
             WHERE sp.season_id = $1 \
             GROUP BY sp.season_id, sp.player_id, p.name, sp.display_order \
             ORDER BY sp.display_order, sp.player_id",
        )
        .bind(season)
        .fetch_all(pool)
        .await
    }
}
