//! Persistence seam used by the batch writer.
//!
//! [`ScoreStore`] lists exactly the storage operations the scoring model
//! needs. The PostgreSQL implementation lives in `putting-db`; tests use an
//! in-memory implementation.

use std::future::Future;

use crate::cell_key::CalculationType;
use crate::types::DbId;

/// A weekly score write, keyed by (season, player, week).
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreWrite {
    /// 1-based week number (1..=10).
    pub week: u8,
    /// Numeric value; `None` when blank or not a number.
    pub score: Option<f64>,
    pub is_formula: bool,
    /// Formula source, present only when `is_formula` is set.
    pub formula_text: Option<String>,
}

/// A stored weekly score joined with its player name.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredScore {
    pub player_name: String,
    pub week: i32,
    pub score: Option<f64>,
    pub is_formula: bool,
    pub formula_text: Option<String>,
}

/// A stored aggregate joined with its player name.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredAggregate {
    pub player_name: String,
    pub calculation_type: CalculationType,
    pub value: f64,
}

/// Storage operations required by the cell-grid scoring model.
///
/// Every write is an upsert or delete on a natural key, so repeating an
/// operation leaves at most one row per key.
pub trait ScoreStore: Send {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Internal id of the season with external id `season_id`.
    fn find_season(
        &mut self,
        season_id: &str,
    ) -> impl Future<Output = Result<Option<DbId>, Self::Error>> + Send;

    /// Internal id of the player named `name`.
    fn find_player(
        &mut self,
        name: &str,
    ) -> impl Future<Output = Result<Option<DbId>, Self::Error>> + Send;

    /// Create any missing season memberships for `roster`, using the roster
    /// index as display order. Names with no player row are ignored.
    fn ensure_season_players(
        &mut self,
        season: DbId,
        roster: &[&str],
    ) -> impl Future<Output = Result<(), Self::Error>> + Send;

    /// Player ids with a membership in the season, in display order.
    fn season_player_ids(
        &mut self,
        season: DbId,
    ) -> impl Future<Output = Result<Vec<DbId>, Self::Error>> + Send;

    fn upsert_score(
        &mut self,
        season: DbId,
        player: DbId,
        write: &ScoreWrite,
    ) -> impl Future<Output = Result<(), Self::Error>> + Send;

    /// Returns `true` if a row was removed.
    fn delete_score(
        &mut self,
        season: DbId,
        player: DbId,
        week: u8,
    ) -> impl Future<Output = Result<bool, Self::Error>> + Send;

    fn upsert_calculated(
        &mut self,
        season: DbId,
        player: DbId,
        calculation_type: CalculationType,
        value: f64,
    ) -> impl Future<Output = Result<(), Self::Error>> + Send;

    /// Returns `true` if a row was removed.
    fn delete_calculated(
        &mut self,
        season: DbId,
        player: DbId,
        calculation_type: CalculationType,
    ) -> impl Future<Output = Result<bool, Self::Error>> + Send;

    /// Non-formula, non-null weekly scores of a player, ordered by week.
    fn plain_scores(
        &mut self,
        season: DbId,
        player: DbId,
    ) -> impl Future<Output = Result<Vec<f64>, Self::Error>> + Send;

    /// All weekly scores and aggregates stored for the season.
    fn load_season(
        &mut self,
        season: DbId,
    ) -> impl Future<Output = Result<(Vec<StoredScore>, Vec<StoredAggregate>), Self::Error>> + Send;
}
