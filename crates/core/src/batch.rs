//! Cell edits and aggregate recomputation over a [`ScoreStore`].
//!
//! Two write paths touch `calculated_scores`:
//!
//! 1. **Manual override**: an edit on row 10 or 11 stores the given value
//!    directly.
//! 2. **Recompute**: any weekly edit marks the player dirty, and both
//!    aggregates are recomputed from the stored weekly scores.
//!
//! Within one batch every override is written before any recompute, so the
//! recomputed value always wins for a player whose weeks were also edited.

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;

use crate::aggregate::{aggregate, Aggregate};
use crate::cell::{format_number, number_or_zero, parse_number, Cell, CellMap};
use crate::cell_key::{decode, encode, CalculationType, CellAddress, RowKind, WEEK_ROWS};
use crate::error::CoreError;
use crate::roster::{column_of, roster_for_season};
use crate::store::{ScoreStore, ScoreWrite, StoredAggregate, StoredScore};
use crate::types::DbId;

/// Failure of a cell operation.
#[derive(Debug, thiserror::Error)]
pub enum BatchError<E: std::error::Error + 'static> {
    /// The request was rejected before anything was written.
    #[error(transparent)]
    Rejected(#[from] CoreError),

    /// The storage backend failed.
    #[error("Storage error: {0}")]
    Storage(#[source] E),
}

/// Result of [`apply_batch`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BatchOutcome {
    /// Number of keys that decoded for the season.
    pub accepted: usize,
    /// Keys that did not decode and were skipped, in key order.
    pub skipped: Vec<String>,
    /// Players whose aggregates were recomputed, in player id order.
    pub recomputed: Vec<String>,
}

/// An edit whose key decoded and whose player exists.
struct PlannedEdit<'a> {
    address: CellAddress,
    player_id: DbId,
    cell: &'a Cell,
}

/// Build the score row written for a weekly edit.
pub fn score_write(week: u8, cell: &Cell) -> ScoreWrite {
    ScoreWrite {
        week,
        score: parse_number(&cell.value),
        is_formula: cell.is_formula,
        formula_text: cell.is_formula.then(|| cell.value.clone()),
    }
}

async fn require_season<S: ScoreStore>(
    store: &mut S,
    season_id: &str,
) -> Result<DbId, BatchError<S::Error>> {
    store
        .find_season(season_id)
        .await
        .map_err(BatchError::Storage)?
        .ok_or_else(|| CoreError::UnknownSeason(season_id.to_string()).into())
}

async fn require_player<S: ScoreStore>(
    store: &mut S,
    name: &str,
) -> Result<DbId, BatchError<S::Error>> {
    store
        .find_player(name)
        .await
        .map_err(BatchError::Storage)?
        .ok_or_else(|| CoreError::UnknownPlayer(name.to_string()).into())
}

/// Look up the season and make sure its roster memberships exist.
async fn prepare_season<S: ScoreStore>(
    store: &mut S,
    season_id: &str,
) -> Result<DbId, BatchError<S::Error>> {
    let season = require_season(store, season_id).await?;
    store
        .ensure_season_players(season, roster_for_season(season_id))
        .await
        .map_err(BatchError::Storage)?;
    Ok(season)
}

/// Recompute and store both aggregates for one player.
pub async fn recompute_player<S: ScoreStore>(
    store: &mut S,
    season: DbId,
    player: DbId,
) -> Result<Aggregate, S::Error> {
    let scores = store.plain_scores(season, player).await?;
    let agg = aggregate(&scores);
    store
        .upsert_calculated(season, player, CalculationType::Total, agg.total)
        .await?;
    store
        .upsert_calculated(
            season,
            player,
            CalculationType::TotalMinusTwoLowest,
            agg.dropped,
        )
        .await?;
    Ok(agg)
}

/// Apply a batch of cell edits for one season.
///
/// Keys that do not decode are skipped and reported in
/// [`BatchOutcome::skipped`]. An unknown season or player rejects the whole
/// batch before the first score or aggregate is written.
pub async fn apply_batch<S: ScoreStore>(
    store: &mut S,
    season_id: &str,
    edits: &CellMap,
) -> Result<BatchOutcome, BatchError<S::Error>> {
    let season = prepare_season(store, season_id).await?;

    // Decode everything and resolve players before writing.
    let mut skipped = Vec::new();
    let mut planned = Vec::with_capacity(edits.len());
    let mut player_ids: HashMap<&'static str, DbId> = HashMap::new();

    for (key, cell) in edits {
        let address = match decode(key, season_id) {
            Ok(address) => address,
            Err(err) => {
                tracing::debug!(season_id, cell_key = %key, error = %err, "Skipping cell edit");
                skipped.push(key.clone());
                continue;
            }
        };
        let player_id = match player_ids.get(address.player_name) {
            Some(id) => *id,
            None => {
                let id = require_player(store, address.player_name).await?;
                player_ids.insert(address.player_name, id);
                id
            }
        };
        planned.push(PlannedEdit {
            address,
            player_id,
            cell,
        });
    }

    // Manual overrides first.
    for edit in &planned {
        if let Some(calculation_type) = edit.address.kind.calculation_type() {
            store
                .upsert_calculated(
                    season,
                    edit.player_id,
                    calculation_type,
                    number_or_zero(&edit.cell.value),
                )
                .await
                .map_err(BatchError::Storage)?;
        }
    }

    // Weekly scores.
    let mut dirty: BTreeMap<DbId, &'static str> = BTreeMap::new();
    for edit in &planned {
        if let RowKind::Week(week) = edit.address.kind {
            store
                .upsert_score(season, edit.player_id, &score_write(week, edit.cell))
                .await
                .map_err(BatchError::Storage)?;
            dirty.insert(edit.player_id, edit.address.player_name);
        }
    }

    // Recompute last so it dominates any override above.
    let mut recomputed = Vec::with_capacity(dirty.len());
    for (player_id, name) in dirty {
        recompute_player(store, season, player_id)
            .await
            .map_err(BatchError::Storage)?;
        recomputed.push(name.to_string());
    }

    tracing::info!(
        season_id,
        accepted = planned.len(),
        skipped = skipped.len(),
        recomputed = recomputed.len(),
        "Cell batch applied",
    );

    Ok(BatchOutcome {
        accepted: planned.len(),
        skipped,
        recomputed,
    })
}

/// Apply a single cell edit.
///
/// Unlike [`apply_batch`], a malformed key is an error. A weekly edit
/// recomputes the player's aggregates.
pub async fn apply_cell<S: ScoreStore>(
    store: &mut S,
    season_id: &str,
    cell_key: &str,
    cell: &Cell,
) -> Result<CellAddress, BatchError<S::Error>> {
    let address = decode(cell_key, season_id)?;
    let season = prepare_season(store, season_id).await?;
    let player = require_player(store, address.player_name).await?;

    match address.kind {
        RowKind::Week(week) => {
            store
                .upsert_score(season, player, &score_write(week, cell))
                .await
                .map_err(BatchError::Storage)?;
            recompute_player(store, season, player)
                .await
                .map_err(BatchError::Storage)?;
        }
        RowKind::Total | RowKind::TotalMinusTwoLowest => {
            if let Some(calculation_type) = address.kind.calculation_type() {
                let value = number_or_zero(&cell.value);
                store
                    .upsert_calculated(season, player, calculation_type, value)
                    .await
                    .map_err(BatchError::Storage)?;
            }
        }
        RowKind::Unclassified => {}
    }

    Ok(address)
}

/// Delete the stored row behind a cell.
///
/// Returns `true` if a row was removed. Removing a weekly score recomputes
/// the player's aggregates.
pub async fn delete_cell<S: ScoreStore>(
    store: &mut S,
    season_id: &str,
    cell_key: &str,
) -> Result<bool, BatchError<S::Error>> {
    let address = decode(cell_key, season_id)?;
    let season = require_season(store, season_id).await?;
    let player = require_player(store, address.player_name).await?;

    let deleted = match address.kind {
        RowKind::Week(week) => {
            let deleted = store
                .delete_score(season, player, week)
                .await
                .map_err(BatchError::Storage)?;
            if deleted {
                recompute_player(store, season, player)
                    .await
                    .map_err(BatchError::Storage)?;
            }
            deleted
        }
        RowKind::Total => store
            .delete_calculated(season, player, CalculationType::Total)
            .await
            .map_err(BatchError::Storage)?,
        RowKind::TotalMinusTwoLowest => store
            .delete_calculated(season, player, CalculationType::TotalMinusTwoLowest)
            .await
            .map_err(BatchError::Storage)?,
        RowKind::Unclassified => false,
    };

    Ok(deleted)
}

/// Recompute the aggregates of every player in the season.
///
/// Returns the number of players recomputed.
pub async fn recompute_season<S: ScoreStore>(
    store: &mut S,
    season_id: &str,
) -> Result<usize, BatchError<S::Error>> {
    let season = prepare_season(store, season_id).await?;
    let players = store
        .season_player_ids(season)
        .await
        .map_err(BatchError::Storage)?;

    for &player in &players {
        recompute_player(store, season, player)
            .await
            .map_err(BatchError::Storage)?;
    }

    tracing::info!(season_id, players = players.len(), "Season aggregates recomputed");
    Ok(players.len())
}

/// Build the wire cell map for a season from stored rows.
///
/// Weekly scores land on rows 0-9 and aggregates on rows 10-11, in the
/// column of the player's roster index. Rows for players outside the
/// season roster, or weeks outside 1-10, are ignored.
pub fn cells_from_rows(
    season_id: &str,
    scores: &[StoredScore],
    aggregates: &[StoredAggregate],
) -> CellMap {
    let mut cells = CellMap::new();

    for score in scores {
        let Some(col) = column_of(season_id, &score.player_name) else {
            continue;
        };
        if !(1..=WEEK_ROWS as i32).contains(&score.week) {
            continue;
        }
        let value = match (score.score, &score.formula_text) {
            (Some(v), _) => format_number(v),
            (None, Some(text)) if score.is_formula => text.clone(),
            _ => String::new(),
        };
        cells.insert(
            encode((score.week - 1) as u32, col),
            Cell {
                value,
                is_formula: score.is_formula,
            },
        );
    }

    for agg in aggregates {
        let Some(col) = column_of(season_id, &agg.player_name) else {
            continue;
        };
        cells.insert(
            encode(agg.calculation_type.row(), col),
            Cell::plain(format_number(agg.value)),
        );
    }

    cells
}

/// Read the full cell map of a season. An unknown season yields an empty map.
pub async fn load_cell_map<S: ScoreStore>(
    store: &mut S,
    season_id: &str,
) -> Result<CellMap, S::Error> {
    let Some(season) = store.find_season(season_id).await? else {
        return Ok(CellMap::new());
    };
    let (scores, aggregates) = store.load_season(season).await?;
    Ok(cells_from_rows(season_id, &scores, &aggregates))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use assert_matches::assert_matches;

    use super::*;
    use crate::roster::SEASONS;

    /// In-memory store keyed exactly like the relational unique constraints.
    #[derive(Default)]
    struct MemoryStore {
        seasons: HashMap<String, DbId>,
        players: HashMap<String, DbId>,
        memberships: BTreeMap<(DbId, DbId), i32>,
        scores: BTreeMap<(DbId, DbId, u8), ScoreWrite>,
        calculated: HashMap<(DbId, DbId, CalculationType), f64>,
        writes: usize,
    }

    impl MemoryStore {
        fn seeded() -> Self {
            let mut store = Self::default();
            for (i, season) in SEASONS.iter().enumerate() {
                store.seasons.insert(season.season_id.to_string(), i as DbId + 1);
            }
            let names = ["Hunter", "Trevor", "Konner", "Silas", "Jason", "Brad", "Tyler", "Graham"];
            for (i, name) in names.iter().enumerate() {
                store.players.insert(name.to_string(), i as DbId + 1);
            }
            store
        }

        fn player_name(&self, id: DbId) -> String {
            self.players
                .iter()
                .find(|(_, v)| **v == id)
                .map(|(k, _)| k.clone())
                .unwrap()
        }

        fn aggregate_of(&self, season_id: &str, player: &str) -> (Option<f64>, Option<f64>) {
            let season = self.seasons[season_id];
            let player = self.players[player];
            (
                self.calculated
                    .get(&(season, player, CalculationType::Total))
                    .copied(),
                self.calculated
                    .get(&(season, player, CalculationType::TotalMinusTwoLowest))
                    .copied(),
            )
        }
    }

    #[derive(Debug, thiserror::Error)]
    #[error("memory store failure")]
    struct MemoryError;

    impl ScoreStore for MemoryStore {
        type Error = MemoryError;

        async fn find_season(&mut self, season_id: &str) -> Result<Option<DbId>, MemoryError> {
            Ok(self.seasons.get(season_id).copied())
        }

        async fn find_player(&mut self, name: &str) -> Result<Option<DbId>, MemoryError> {
            Ok(self.players.get(name).copied())
        }

        async fn ensure_season_players(
            &mut self,
            season: DbId,
            roster: &[&str],
        ) -> Result<(), MemoryError> {
            for (order, name) in roster.iter().enumerate() {
                if let Some(&player) = self.players.get(*name) {
                    self.memberships.entry((season, player)).or_insert(order as i32);
                }
            }
            Ok(())
        }

        async fn season_player_ids(&mut self, season: DbId) -> Result<Vec<DbId>, MemoryError> {
            let mut members: Vec<_> = self
                .memberships
                .iter()
                .filter(|((s, _), _)| *s == season)
                .map(|((_, p), order)| (*order, *p))
                .collect();
            members.sort();
            Ok(members.into_iter().map(|(_, p)| p).collect())
        }

        async fn upsert_score(
            &mut self,
            season: DbId,
            player: DbId,
            write: &ScoreWrite,
        ) -> Result<(), MemoryError> {
            self.writes += 1;
            self.scores.insert((season, player, write.week), write.clone());
            Ok(())
        }

        async fn delete_score(
            &mut self,
            season: DbId,
            player: DbId,
            week: u8,
        ) -> Result<bool, MemoryError> {
            Ok(self.scores.remove(&(season, player, week)).is_some())
        }

        async fn upsert_calculated(
            &mut self,
            season: DbId,
            player: DbId,
            calculation_type: CalculationType,
            value: f64,
        ) -> Result<(), MemoryError> {
            self.writes += 1;
            self.calculated.insert((season, player, calculation_type), value);
            Ok(())
        }

        async fn delete_calculated(
            &mut self,
            season: DbId,
            player: DbId,
            calculation_type: CalculationType,
        ) -> Result<bool, MemoryError> {
            Ok(self
                .calculated
                .remove(&(season, player, calculation_type))
                .is_some())
        }

        async fn plain_scores(
            &mut self,
            season: DbId,
            player: DbId,
        ) -> Result<Vec<f64>, MemoryError> {
            Ok(self
                .scores
                .iter()
                .filter(|((s, p, _), w)| *s == season && *p == player && !w.is_formula)
                .filter_map(|(_, w)| w.score)
                .collect())
        }

        async fn load_season(
            &mut self,
            season: DbId,
        ) -> Result<(Vec<StoredScore>, Vec<StoredAggregate>), MemoryError> {
            let scores = self
                .scores
                .iter()
                .filter(|((s, _, _), _)| *s == season)
                .map(|((_, p, week), w)| StoredScore {
                    player_name: self.player_name(*p),
                    week: i32::from(*week),
                    score: w.score,
                    is_formula: w.is_formula,
                    formula_text: w.formula_text.clone(),
                })
                .collect();
            let aggregates = self
                .calculated
                .iter()
                .filter(|((s, _, _), _)| *s == season)
                .map(|((_, p, ct), v)| StoredAggregate {
                    player_name: self.player_name(*p),
                    calculation_type: *ct,
                    value: *v,
                })
                .collect();
            Ok((scores, aggregates))
        }
    }

    fn edits(entries: &[(&str, Cell)]) -> CellMap {
        entries
            .iter()
            .map(|(k, c)| (k.to_string(), c.clone()))
            .collect()
    }

    fn week_edits(col: usize, scores: &[&str]) -> CellMap {
        scores
            .iter()
            .enumerate()
            .map(|(row, s)| (encode(row as u32, col), Cell::plain(*s)))
            .collect()
    }

    #[tokio::test]
    async fn full_season_drops_two_lowest() {
        let mut store = MemoryStore::seeded();
        let batch = week_edits(0, &["10", "10", "10", "10", "10", "10", "10", "10", "1", "1"]);

        let outcome = apply_batch(&mut store, "season6", &batch).await.unwrap();
        assert_eq!(outcome.accepted, 10);
        assert!(outcome.skipped.is_empty());
        assert_eq!(outcome.recomputed, vec!["Hunter".to_string()]);
        assert_eq!(store.aggregate_of("season6", "Hunter"), (Some(84.0), Some(82.0)));
    }

    #[tokio::test]
    async fn applying_twice_is_idempotent() {
        let mut store = MemoryStore::seeded();
        let batch = edits(&[
            ("0-0", Cell::plain("7")),
            ("1-0", Cell::plain("3")),
            ("2-0", Cell::plain("9")),
            ("0-3", Cell::plain("4")),
            ("11-2", Cell::plain("50")),
        ]);

        apply_batch(&mut store, "season5", &batch).await.unwrap();
        let once = store.calculated.clone();
        let scores_once = store.scores.clone();

        apply_batch(&mut store, "season5", &batch).await.unwrap();
        assert_eq!(store.calculated, once);
        assert_eq!(store.scores, scores_once);
    }

    #[tokio::test]
    async fn malformed_keys_are_listed_and_skipped() {
        let mut store = MemoryStore::seeded();
        let batch = edits(&[
            ("0-0", Cell::plain("5")),
            ("0-99", Cell::plain("5")),
            ("bogus", Cell::plain("5")),
        ]);

        let outcome = apply_batch(&mut store, "season1", &batch).await.unwrap();
        assert_eq!(outcome.accepted, 1);
        assert_eq!(outcome.skipped, vec!["0-99".to_string(), "bogus".to_string()]);
        assert_eq!(store.scores.len(), 1);
    }

    #[tokio::test]
    async fn recompute_wins_over_override_in_same_batch() {
        let mut store = MemoryStore::seeded();
        let batch = edits(&[
            ("0-1", Cell::plain("6")),
            ("1-1", Cell::plain("4")),
            ("10-1", Cell::plain("999")),
            ("11-1", Cell::plain("999")),
        ]);

        apply_batch(&mut store, "season6", &batch).await.unwrap();
        assert_eq!(store.aggregate_of("season6", "Trevor"), (Some(10.0), Some(0.0)));
    }

    #[tokio::test]
    async fn override_without_weekly_edit_is_kept() {
        let mut store = MemoryStore::seeded();
        let batch = edits(&[("10-2", Cell::plain("42")), ("11-2", Cell::plain("oops"))]);

        let outcome = apply_batch(&mut store, "season6", &batch).await.unwrap();
        assert_eq!(outcome.accepted, 2);
        assert!(outcome.recomputed.is_empty());
        assert_eq!(store.aggregate_of("season6", "Konner"), (Some(42.0), Some(0.0)));
    }

    #[tokio::test]
    async fn later_recompute_replaces_earlier_override() {
        let mut store = MemoryStore::seeded();
        apply_batch(&mut store, "season6", &edits(&[("10-0", Cell::plain("500"))]))
            .await
            .unwrap();
        apply_batch(&mut store, "season6", &edits(&[("0-0", Cell::plain("8"))]))
            .await
            .unwrap();
        assert_eq!(store.aggregate_of("season6", "Hunter"), (Some(8.0), Some(8.0)));
    }

    #[tokio::test]
    async fn formula_and_blank_weeks_are_excluded_from_recompute() {
        let mut store = MemoryStore::seeded();
        let batch = edits(&[
            ("0-0", Cell::plain("10")),
            ("1-0", Cell::formula("=A1*2")),
            ("2-0", Cell::plain("")),
            ("3-0", Cell::plain("5")),
            ("4-0", Cell::plain("1")),
        ]);

        apply_batch(&mut store, "season6", &batch).await.unwrap();
        assert_eq!(store.aggregate_of("season6", "Hunter"), (Some(16.0), Some(10.0)));

        let season = store.seasons["season6"];
        let player = store.players["Hunter"];
        let formula = &store.scores[&(season, player, 2)];
        assert!(formula.is_formula);
        assert_eq!(formula.score, None);
        assert_eq!(formula.formula_text.as_deref(), Some("=A1*2"));
        assert_eq!(store.scores[&(season, player, 3)].score, None);
    }

    #[tokio::test]
    async fn weekly_score_keeps_leading_number() {
        let mut store = MemoryStore::seeded();
        let batch = edits(&[("0-0", Cell::plain("12pts")), ("1-0", Cell::plain("DNP"))]);

        apply_batch(&mut store, "season6", &batch).await.unwrap();

        let season = store.seasons["season6"];
        let player = store.players["Hunter"];
        assert_eq!(store.scores[&(season, player, 1)].score, Some(12.0));
        assert_eq!(store.scores[&(season, player, 2)].score, None);
        assert_eq!(store.aggregate_of("season6", "Hunter"), (Some(12.0), Some(12.0)));
    }

    #[tokio::test]
    async fn unknown_season_writes_nothing() {
        let mut store = MemoryStore::seeded();
        let result = apply_batch(&mut store, "season99", &week_edits(0, &["1"])).await;
        assert_matches!(result, Err(BatchError::Rejected(CoreError::UnknownSeason(_))));
        assert_eq!(store.writes, 0);
    }

    #[tokio::test]
    async fn unknown_player_aborts_before_writes() {
        let mut store = MemoryStore::seeded();
        store.players.remove("Graham");
        let batch = edits(&[("0-0", Cell::plain("3")), ("0-5", Cell::plain("4"))]);

        let result = apply_batch(&mut store, "season6", &batch).await;
        assert_matches!(
            result,
            Err(BatchError::Rejected(CoreError::UnknownPlayer(name))) if name == "Graham"
        );
        assert_eq!(store.writes, 0);
    }

    #[tokio::test]
    async fn unclassified_rows_are_accepted_without_writes() {
        let mut store = MemoryStore::seeded();
        let outcome = apply_batch(&mut store, "season6", &edits(&[("14-0", Cell::plain("3"))]))
            .await
            .unwrap();
        assert_eq!(outcome.accepted, 1);
        assert_eq!(store.writes, 0);
    }

    #[tokio::test]
    async fn batch_creates_season_memberships() {
        let mut store = MemoryStore::seeded();
        apply_batch(&mut store, "season1", &CellMap::new()).await.unwrap();
        let season = store.seasons["season1"];
        assert_eq!(store.season_player_ids(season).await.unwrap().len(), 6);
        assert_eq!(store.memberships[&(season, store.players["Brad"])], 5);
    }

    #[tokio::test]
    async fn single_cell_rejects_malformed_key() {
        let mut store = MemoryStore::seeded();
        let result = apply_cell(&mut store, "season6", "9-9", &Cell::plain("1")).await;
        assert_matches!(result, Err(BatchError::Rejected(CoreError::MalformedKey(_))));
    }

    #[tokio::test]
    async fn single_cell_week_edit_recomputes() {
        let mut store = MemoryStore::seeded();
        apply_cell(&mut store, "season6", "0-4", &Cell::plain("12")).await.unwrap();
        apply_cell(&mut store, "season6", "1-4", &Cell::plain("3")).await.unwrap();
        assert_eq!(store.aggregate_of("season6", "Jason"), (Some(15.0), Some(0.0)));

        apply_cell(&mut store, "season6", "10-4", &Cell::plain("100")).await.unwrap();
        assert_eq!(store.aggregate_of("season6", "Jason").0, Some(100.0));
    }

    #[tokio::test]
    async fn delete_reports_removal_and_recomputes() {
        let mut store = MemoryStore::seeded();
        apply_batch(&mut store, "season6", &week_edits(1, &["5", "6", "7"]))
            .await
            .unwrap();

        assert!(delete_cell(&mut store, "season6", "2-1").await.unwrap());
        assert!(!delete_cell(&mut store, "season6", "2-1").await.unwrap());
        assert_eq!(store.aggregate_of("season6", "Trevor"), (Some(11.0), Some(0.0)));

        assert!(delete_cell(&mut store, "season6", "10-1").await.unwrap());
        assert_eq!(store.aggregate_of("season6", "Trevor").0, None);
        assert!(!delete_cell(&mut store, "season6", "12-1").await.unwrap());
    }

    #[tokio::test]
    async fn recompute_season_covers_all_members() {
        let mut store = MemoryStore::seeded();
        let season = store.seasons["season1"];
        let hunter = store.players["Hunter"];
        store.scores.insert((season, hunter, 1), score_write(1, &Cell::plain("4")));

        let count = recompute_season(&mut store, "season1").await.unwrap();
        assert_eq!(count, 6);
        assert_eq!(store.aggregate_of("season1", "Hunter"), (Some(4.0), Some(4.0)));
        assert_eq!(store.aggregate_of("season1", "Brad"), (Some(0.0), Some(0.0)));
    }

    #[tokio::test]
    async fn load_round_trips_through_storage() {
        let mut store = MemoryStore::seeded();
        let batch = edits(&[
            ("0-0", Cell::plain("10")),
            ("1-0", Cell::formula("=A1+5")),
            ("0-7", Cell::plain("2.5")),
        ]);
        apply_batch(&mut store, "season6", &batch).await.unwrap();

        let cells = load_cell_map(&mut store, "season6").await.unwrap();
        assert_eq!(cells["0-0"], Cell::plain("10"));
        assert_eq!(cells["1-0"], Cell::formula("=A1+5"));
        assert_eq!(cells["0-7"], Cell::plain("2.5"));
        assert_eq!(cells["10-0"], Cell::plain("10"));
        assert_eq!(cells["11-7"], Cell::plain("2.5"));
    }

    #[tokio::test]
    async fn load_unknown_season_is_empty() {
        let mut store = MemoryStore::seeded();
        assert!(load_cell_map(&mut store, "nope").await.unwrap().is_empty());
    }

    #[test]
    fn rows_outside_roster_are_ignored() {
        let scores = vec![
            StoredScore {
                player_name: "Graham".into(),
                week: 1,
                score: Some(3.0),
                is_formula: false,
                formula_text: None,
            },
            StoredScore {
                player_name: "Hunter".into(),
                week: 11,
                score: Some(3.0),
                is_formula: false,
                formula_text: None,
            },
            StoredScore {
                player_name: "Hunter".into(),
                week: 2,
                score: None,
                is_formula: false,
                formula_text: None,
            },
        ];
        let aggregates = vec![StoredAggregate {
            player_name: "Graham".into(),
            calculation_type: CalculationType::Total,
            value: 3.0,
        }];

        let cells = cells_from_rows("season1", &scores, &aggregates);
        assert_eq!(cells.len(), 1);
        assert_eq!(cells["1-0"], Cell::plain(""));
    }
}
