//! Transactional [`ScoreStore`] backed by PostgreSQL.

use putting_core::cell_key::CalculationType;
use putting_core::store::{ScoreStore, ScoreWrite, StoredAggregate, StoredScore};
use putting_core::types::DbId;
use sqlx::{PgPool, Postgres, Transaction};

use crate::models::calculated_score::CalculatedScoreWithPlayer;
use crate::repositories::{CalculatedScoreRepo, PlayerRepo, ScoreRepo, SeasonRepo};

/// A [`ScoreStore`] that runs every operation inside one transaction.
///
/// Nothing is visible to other connections until [`PgScoreStore::commit`].
/// Dropping the store without committing rolls the transaction back.
pub struct PgScoreStore {
    tx: Transaction<'static, Postgres>,
}

impl PgScoreStore {
    /// Open a transaction on the pool.
    pub async fn begin(pool: &PgPool) -> Result<Self, sqlx::Error> {
        Ok(Self {
            tx: pool.begin().await?,
        })
    }

    /// Commit every write made through this store.
    pub async fn commit(self) -> Result<(), sqlx::Error> {
        self.tx.commit().await
    }
}

impl ScoreStore for PgScoreStore {
    type Error = sqlx::Error;

    async fn find_season(&mut self, season_id: &str) -> Result<Option<DbId>, sqlx::Error> {
        SeasonRepo::find_id(&mut self.tx, season_id).await
    }

    async fn find_player(&mut self, name: &str) -> Result<Option<DbId>, sqlx::Error> {
        PlayerRepo::find_id(&mut self.tx, name).await
    }

    async fn ensure_season_players(
        &mut self,
        season: DbId,
        roster: &[&str],
    ) -> Result<(), sqlx::Error> {
        SeasonRepo::ensure_players(&mut self.tx, season, roster).await
    }

    async fn season_player_ids(&mut self, season: DbId) -> Result<Vec<DbId>, sqlx::Error> {
        SeasonRepo::player_ids(&mut self.tx, season).await
    }

    async fn upsert_score(
        &mut self,
        season: DbId,
        player: DbId,
        write: &ScoreWrite,
    ) -> Result<(), sqlx::Error> {
        ScoreRepo::upsert(&mut self.tx, season, player, write).await?;
        Ok(())
    }

    async fn delete_score(
        &mut self,
        season: DbId,
        player: DbId,
        week: u8,
    ) -> Result<bool, sqlx::Error> {
        ScoreRepo::delete(&mut self.tx, season, player, week).await
    }

    async fn upsert_calculated(
        &mut self,
        season: DbId,
        player: DbId,
        calculation_type: CalculationType,
        value: f64,
    ) -> Result<(), sqlx::Error> {
        CalculatedScoreRepo::upsert(&mut self.tx, season, player, calculation_type, value).await?;
        Ok(())
    }

    async fn delete_calculated(
        &mut self,
        season: DbId,
        player: DbId,
        calculation_type: CalculationType,
    ) -> Result<bool, sqlx::Error> {
        CalculatedScoreRepo::delete(&mut self.tx, season, player, calculation_type).await
    }

    async fn plain_scores(&mut self, season: DbId, player: DbId) -> Result<Vec<f64>, sqlx::Error> {
        ScoreRepo::plain_scores(&mut self.tx, season, player).await
    }

    async fn load_season(
        &mut self,
        season: DbId,
    ) -> Result<(Vec<StoredScore>, Vec<StoredAggregate>), sqlx::Error> {
        let scores = ScoreRepo::list_for_season(&mut self.tx, season)
            .await?
            .into_iter()
            .map(StoredScore::from)
            .collect();

        let aggregates = CalculatedScoreRepo::list_for_season(&mut self.tx, season)
            .await?
            .into_iter()
            .filter_map(CalculatedScoreWithPlayer::into_stored)
            .collect();

        Ok((scores, aggregates))
    }
}
