//! Handlers for season views: roster, resolved grid, leaderboard and stats.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use putting_core::batch;
use putting_core::leaderboard::rank_players;
use putting_core::resolver::GridResolver;
use putting_core::roster::roster_for_season;
use putting_db::models::season::Season;
use putting_db::repositories::{SeasonRepo, StatsRepo};
use putting_db::store::PgScoreStore;
use putting_db::DbPool;
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::handlers::cells::load_cells;
use crate::response::DataResponse;
use crate::state::AppState;

/// Resolved display grid of a season.
#[derive(Debug, Serialize)]
pub struct GridView {
    pub season_id: String,
    /// Column headers in grid order.
    pub players: Vec<&'static str>,
    /// `rows[row][col]`, twelve rows of display strings.
    pub rows: Vec<Vec<String>>,
}

/// Result of a season-wide recompute.
#[derive(Debug, Serialize)]
pub struct RecalculateResponse {
    pub season_id: String,
    pub players_recomputed: usize,
}

async fn find_season(pool: &DbPool, season_id: &str) -> AppResult<Season> {
    SeasonRepo::find_by_season_id(pool, season_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Season '{season_id}' not found")))
}

/// GET /api/v1/seasons
pub async fn list_seasons(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let seasons = SeasonRepo::list(state.db()?).await?;
    Ok(Json(DataResponse { data: seasons }))
}

/// GET /api/v1/seasons/{season_id}/players
///
/// Season members in grid column order.
pub async fn list_players(
    State(state): State<AppState>,
    Path(season_id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let pool = state.db()?;
    let season = find_season(pool, &season_id).await?;
    let players = SeasonRepo::list_players(pool, season.id).await?;
    Ok(Json(DataResponse { data: players }))
}

/// GET /api/v1/seasons/{season_id}/grid
///
/// Every cell of the season resolved for display: formulas evaluated and
/// the two aggregate rows computed from the weekly cells.
pub async fn get_grid(
    State(state): State<AppState>,
    Path(season_id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let pool = state.db()?;
    find_season(pool, &season_id).await?;

    let cells = load_cells(pool, &season_id).await?;
    let players = roster_for_season(&season_id).to_vec();
    let rows = GridResolver::new(&cells).resolve_grid(players.len());

    Ok(Json(DataResponse {
        data: GridView {
            season_id,
            players,
            rows,
        },
    }))
}

/// GET /api/v1/seasons/{season_id}/leaderboard
///
/// Players ranked by resolved drops score, highest first.
pub async fn get_leaderboard(
    State(state): State<AppState>,
    Path(season_id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let pool = state.db()?;
    find_season(pool, &season_id).await?;

    let cells = load_cells(pool, &season_id).await?;
    let entries = rank_players(&cells, &season_id);
    Ok(Json(DataResponse { data: entries }))
}

/// GET /api/v1/seasons/{season_id}/stats
pub async fn get_stats(
    State(state): State<AppState>,
    Path(season_id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let pool = state.db()?;
    let season = find_season(pool, &season_id).await?;
    let stats = StatsRepo::season_stats(pool, season.id).await?;
    Ok(Json(DataResponse { data: stats }))
}

/// POST /api/v1/seasons/{season_id}/recalculate
///
/// Recompute both stored aggregates for every season member from their
/// plain weekly scores.
pub async fn recalculate(
    State(state): State<AppState>,
    Path(season_id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let pool = state.db()?;

    let mut store = PgScoreStore::begin(pool).await?;
    let players_recomputed = batch::recompute_season(&mut store, &season_id).await?;
    store.commit().await?;

    tracing::info!(%season_id, players_recomputed, "Season recalculated");

    Ok(Json(DataResponse {
        data: RecalculateResponse {
            season_id,
            players_recomputed,
        },
    }))
}
