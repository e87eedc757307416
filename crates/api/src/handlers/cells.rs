//! Handlers for the sparse cell-map API.
//!
//! The grid UI exchanges whole season maps of `"row-col"` keys. Writes go
//! through one [`PgScoreStore`] transaction per request so a batch commits
//! fully or not at all.

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use putting_core::batch::{self, BatchOutcome};
use putting_core::cell::{Cell, CellMap};
use putting_db::store::PgScoreStore;
use putting_db::DbPool;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::query::SeasonQuery;
use crate::response::SuccessResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response bodies
// ---------------------------------------------------------------------------

/// Body of `POST /cells`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpsertCellRequest {
    pub cell_key: Option<String>,
    #[serde(default)]
    pub value: String,
    #[serde(default)]
    pub is_formula: bool,
    pub season_id: Option<String>,
}

/// Body of `POST /cells/batch`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchRequest {
    pub season_id: Option<String>,
    pub cells: Option<CellMap>,
}

/// Response of `POST /cells/batch`.
#[derive(Debug, Serialize)]
pub struct BatchResponse {
    pub success: bool,
    /// Number of keys that decoded for the season.
    pub count: usize,
    /// Keys that did not decode for the season.
    pub skipped: Vec<String>,
}

/// Response of `DELETE /cells/{cell_key}`.
#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub success: bool,
    pub deleted: bool,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Read a season's stored cells. Unknown seasons yield an empty map.
pub(crate) async fn load_cells(pool: &DbPool, season_id: &str) -> AppResult<CellMap> {
    let mut store = PgScoreStore::begin(pool).await?;
    Ok(batch::load_cell_map(&mut store, season_id).await?)
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/cells?season=
///
/// Fetch every stored cell of the season. Returns `{}` when storage is not
/// configured or the season is unknown.
pub async fn get_cells(
    State(state): State<AppState>,
    Query(params): Query<SeasonQuery>,
) -> AppResult<Json<CellMap>> {
    let season_id = state.season_or_default(params.season);

    let Some(pool) = &state.pool else {
        tracing::debug!(%season_id, "Storage not configured, returning empty cell map");
        return Ok(Json(CellMap::new()));
    };

    let cells = load_cells(pool, &season_id).await?;
    Ok(Json(cells))
}

/// POST /api/v1/cells
///
/// Upsert one cell. A weekly edit recomputes the player's aggregates.
pub async fn upsert_cell(
    State(state): State<AppState>,
    Json(input): Json<UpsertCellRequest>,
) -> AppResult<impl IntoResponse> {
    let pool = state.db()?;
    let cell_key = input
        .cell_key
        .filter(|k| !k.is_empty())
        .ok_or_else(|| AppError::BadRequest("cellKey is required".into()))?;
    let season_id = state.season_or_default(input.season_id);
    let cell = Cell {
        value: input.value,
        is_formula: input.is_formula,
    };

    let mut store = PgScoreStore::begin(pool).await?;
    let address = batch::apply_cell(&mut store, &season_id, &cell_key, &cell).await?;
    store.commit().await?;

    tracing::info!(
        %season_id,
        cell_key = %cell_key,
        player = address.player_name,
        "Cell saved",
    );

    Ok(Json(SuccessResponse { success: true }))
}

/// POST /api/v1/cells/batch
///
/// Upsert a batch of cells and recompute the aggregates of every player
/// whose weekly scores changed. Keys that do not decode are skipped and
/// listed in the response.
pub async fn upsert_batch(
    State(state): State<AppState>,
    Json(input): Json<BatchRequest>,
) -> AppResult<impl IntoResponse> {
    let pool = state.db()?;
    let cells = input
        .cells
        .ok_or_else(|| AppError::BadRequest("cells object is required".into()))?;
    let season_id = state.season_or_default(input.season_id);

    let mut store = PgScoreStore::begin(pool).await?;
    let BatchOutcome {
        accepted,
        skipped,
        recomputed,
    } = batch::apply_batch(&mut store, &season_id, &cells).await?;
    store.commit().await?;

    tracing::info!(
        %season_id,
        accepted,
        skipped = skipped.len(),
        recomputed = ?recomputed,
        "Cell batch saved",
    );

    Ok(Json(BatchResponse {
        success: true,
        count: accepted,
        skipped,
    }))
}

/// DELETE /api/v1/cells/{cell_key}?season=
///
/// Delete the stored row behind one cell. `deleted` is `false` when there
/// was nothing to remove.
pub async fn delete_cell(
    State(state): State<AppState>,
    Path(cell_key): Path<String>,
    Query(params): Query<SeasonQuery>,
) -> AppResult<impl IntoResponse> {
    let pool = state.db()?;
    let season_id = state.season_or_default(params.season);

    let mut store = PgScoreStore::begin(pool).await?;
    let deleted = batch::delete_cell(&mut store, &season_id, &cell_key).await?;
    store.commit().await?;

    tracing::info!(%season_id, cell_key = %cell_key, deleted, "Cell deleted");

    Ok(Json(DeleteResponse {
        success: true,
        deleted,
    }))
}
