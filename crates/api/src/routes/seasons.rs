//! Route definitions for season views.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::seasons;
use crate::state::AppState;

/// Season routes mounted at `/seasons`.
///
/// ```text
/// GET  /                          -> list_seasons
/// GET  /{season_id}/players       -> list_players
/// GET  /{season_id}/grid          -> get_grid
/// GET  /{season_id}/leaderboard   -> get_leaderboard
/// GET  /{season_id}/stats         -> get_stats
/// POST /{season_id}/recalculate   -> recalculate
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(seasons::list_seasons))
        .route("/{season_id}/players", get(seasons::list_players))
        .route("/{season_id}/grid", get(seasons::get_grid))
        .route("/{season_id}/leaderboard", get(seasons::get_leaderboard))
        .route("/{season_id}/stats", get(seasons::get_stats))
        .route("/{season_id}/recalculate", post(seasons::recalculate))
}
