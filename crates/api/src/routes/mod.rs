pub mod cells;
pub mod health;
pub mod seasons;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /cells                              fetch season cells (GET), upsert one cell (POST)
/// /cells/batch                        upsert a batch of cells (POST)
/// /cells/{cell_key}                   delete one cell (DELETE)
///
/// /seasons                            list seasons
/// /seasons/{season_id}/players        season roster
/// /seasons/{season_id}/grid           resolved display grid
/// /seasons/{season_id}/leaderboard    ranked drops scores
/// /seasons/{season_id}/stats          per-player statistics
/// /seasons/{season_id}/recalculate    recompute all aggregates (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/cells", cells::router())
        .nest("/seasons", seasons::router())
}
