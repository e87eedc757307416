//! Route definitions for the sparse cell-map API used by the grid UI.

use axum::routing::{delete, get, post};
use axum::Router;

use crate::handlers::cells;
use crate::state::AppState;

/// Cell routes mounted at `/cells`.
///
/// ```text
/// GET    /             -> get_cells
/// POST   /             -> upsert_cell
/// POST   /batch        -> upsert_batch
/// DELETE /{cell_key}   -> delete_cell
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(cells::get_cells).post(cells::upsert_cell))
        .route("/batch", post(cells::upsert_batch))
        .route("/{cell_key}", delete(cells::delete_cell))
}
