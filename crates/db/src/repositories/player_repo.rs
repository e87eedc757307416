//! Repository for the `players` table.

use putting_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::models::player::Player;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, display_order, created_at, updated_at";

/// Provides read operations for players.
pub struct PlayerRepo;

impl PlayerRepo {
    /// List all players in global display order.
    pub async fn list(pool: &PgPool) -> Result<Vec<Player>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM players ORDER BY display_order, id");
        sqlx::query_as::<_, Player>(&query).fetch_all(pool).await
    }

    /// Find a player by exact name.
    pub async fn find_by_name(pool: &PgPool, name: &str) -> Result<Option<Player>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM players WHERE name = $1");
        sqlx::query_as::<_, Player>(&query)
            .bind(name)
            .fetch_optional(pool)
            .await
    }

    /// Resolve a player name to its internal ID.
    pub async fn find_id(conn: &mut PgConnection, name: &str) -> Result<Option<DbId>, sqlx::Error> {
        sqlx::query_scalar::<_, DbId>("SELECT id FROM players WHERE name = $1")
            .bind(name)
            .fetch_optional(&mut *conn)
            .await
    }
}
