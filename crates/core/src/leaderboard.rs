//! Leaderboard ranking from a resolved season grid.

use serde::Serialize;

use crate::cell::CellMap;
use crate::cell_key::DROPS_ROW;
use crate::resolver::GridResolver;
use crate::roster::roster_for_season;

/// One ranked player.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeaderboardEntry {
    /// 1-based position. Players with equal scores share a rank.
    pub rank: usize,
    pub name: String,
    /// Drops score (total minus the two lowest weeks).
    pub score: f64,
    /// Grid column of the player in this season.
    pub col_index: usize,
}

/// Rank every roster player by their resolved drops score, highest first.
///
/// Ties keep roster order and share the rank of the first tied player.
pub fn rank_players(cells: &CellMap, season_id: &str) -> Vec<LeaderboardEntry> {
    let resolver = GridResolver::new(cells);

    let mut entries: Vec<LeaderboardEntry> = roster_for_season(season_id)
        .iter()
        .enumerate()
        .map(|(col, name)| LeaderboardEntry {
            rank: 0,
            name: (*name).to_string(),
            score: resolver.resolve_number(DROPS_ROW, col),
            col_index: col,
        })
        .collect();

    // Stable sort: equal scores stay in roster order.
    entries.sort_by(|a, b| b.score.total_cmp(&a.score));

    let mut previous: Option<f64> = None;
    let mut rank = 0;
    for (i, entry) in entries.iter_mut().enumerate() {
        if previous != Some(entry.score) {
            rank = i + 1;
            previous = Some(entry.score);
        }
        entry.rank = rank;
    }

    entries
}
