//! Repository for the `seasons` and `season_players` tables.

use putting_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::models::player::SeasonPlayer;
use crate::models::season::Season;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, season_id, title, description, created_at, updated_at";

/// Provides data access for seasons and their rosters.
pub struct SeasonRepo;

impl SeasonRepo {
    /// List all seasons in creation order.
    pub async fn list(pool: &PgPool) -> Result<Vec<Season>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM seasons ORDER BY id ASC");
        sqlx::query_as::<_, Season>(&query).fetch_all(pool).await
    }

    /// Find a season by its external identifier (e.g. `season6`).
    pub async fn find_by_season_id(
        pool: &PgPool,
        season_id: &str,
    ) -> Result<Option<Season>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM seasons WHERE season_id = $1");
        sqlx::query_as::<_, Season>(&query)
            .bind(season_id)
            .fetch_optional(pool)
            .await
    }

    /// Resolve an external season identifier to its internal ID.
    pub async fn find_id(
        conn: &mut PgConnection,
        season_id: &str,
    ) -> Result<Option<DbId>, sqlx::Error> {
        sqlx::query_scalar::<_, DbId>("SELECT id FROM seasons WHERE season_id = $1")
            .bind(season_id)
            .fetch_optional(&mut *conn)
            .await
    }

    /// Create missing memberships for `roster`, using the roster index as
    /// display order. Existing memberships are left untouched and names
    /// without a player row are ignored.
    pub async fn ensure_players(
        conn: &mut PgConnection,
        season: DbId,
        roster: &[&str],
    ) -> Result<(), sqlx::Error> {
        let mut created = 0;
        for (order, name) in roster.iter().enumerate() {
            created += sqlx::query(
                "INSERT INTO season_players (season_id, player_id, display_order) \
                 SELECT $1, p.id, $3 FROM players p WHERE p.name = $2 \
                 ON CONFLICT (season_id, player_id) DO NOTHING",
            )
            .bind(season)
            .bind(*name)
            .bind(order as i32)
            .execute(&mut *conn)
            .await?
            .rows_affected();
        }
        if created > 0 {
            tracing::debug!(season, created, "Created season memberships");
        }
        Ok(())
    }

    /// List the season's players in display order.
    pub async fn list_players(
        pool: &PgPool,
        season: DbId,
    ) -> Result<Vec<SeasonPlayer>, sqlx::Error> {
        sqlx::query_as::<_, SeasonPlayer>(
            "SELECT sp.player_id, p.name, sp.display_order \
             FROM season_players sp \
             JOIN players p ON p.id = sp.player_id \
             WHERE sp.season_id = $1 \
             ORDER BY sp.display_order, p.id",
        )
        .bind(season)
        .fetch_all(pool)
        .await
    }

    /// Player IDs with a membership in the season, in display order.
    pub async fn player_ids(
        conn: &mut PgConnection,
        season: DbId,
    ) -> Result<Vec<DbId>, sqlx::Error> {
        sqlx::query_scalar::<_, DbId>(
            "SELECT player_id FROM season_players \
             WHERE season_id = $1 \
             ORDER BY display_order, player_id",
        )
        .bind(season)
        .fetch_all(&mut *conn)
        .await
    }
}
