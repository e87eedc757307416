//! HTTP-level tests for the cell-map endpoints.

mod common;

use axum::http::StatusCode;
use common::{body_json, delete, get, post_json};
use serde_json::json;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Batch writes
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn batch_then_read_returns_cells_and_aggregates(pool: PgPool) {
    let mut cells = serde_json::Map::new();
    for (row, score) in ["10", "10", "10", "10", "10", "10", "10", "10", "1", "1"]
        .iter()
        .enumerate()
    {
        cells.insert(format!("{row}-0"), json!({"value": score, "isFormula": false}));
    }

    let app = common::build_test_app(Some(pool.clone()));
    let response = post_json(
        app,
        "/api/v1/cells/batch",
        json!({"seasonId": "season6", "cells": cells}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["count"], 10);
    assert_eq!(body["skipped"], json!([]));

    let app = common::build_test_app(Some(pool));
    let response = get(app, "/api/v1/cells?season=season6").await;
    assert_eq!(response.status(), StatusCode::OK);
    let map = body_json(response).await;
    assert_eq!(map["0-0"], json!({"value": "10", "isFormula": false}));
    assert_eq!(map["10-0"]["value"], "84");
    assert_eq!(map["11-0"]["value"], "82");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn batch_lists_skipped_keys(pool: PgPool) {
    let app = common::build_test_app(Some(pool));
    let response = post_json(
        app,
        "/api/v1/cells/batch",
        json!({
            "seasonId": "season1",
            "cells": {
                "0-0": {"value": "4", "isFormula": false},
                "0-6": {"value": "4", "isFormula": false},
                "x-y": {"value": "4", "isFormula": false}
            }
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["count"], 1);
    assert_eq!(body["skipped"], json!(["0-6", "x-y"]));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn batch_without_cells_is_400(pool: PgPool) {
    let app = common::build_test_app(Some(pool));
    let response = post_json(app, "/api/v1/cells/batch", json!({"seasonId": "season6"})).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "cells object is required");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn batch_for_unknown_season_writes_nothing(pool: PgPool) {
    let app = common::build_test_app(Some(pool.clone()));
    let response = post_json(
        app,
        "/api/v1/cells/batch",
        json!({"seasonId": "season9", "cells": {"0-0": {"value": "3"}}}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "INVALID_SEASON_OR_PLAYER");

    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM scores")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 0);
}

// ---------------------------------------------------------------------------
// Single-cell writes
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn single_cell_defaults_to_current_season(pool: PgPool) {
    let app = common::build_test_app(Some(pool.clone()));
    let response = post_json(
        app,
        "/api/v1/cells",
        json!({"cellKey": "0-6", "value": "7", "isFormula": false}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({"success": true}));

    let app = common::build_test_app(Some(pool));
    let map = body_json(get(app, "/api/v1/cells").await).await;
    assert_eq!(map["0-6"]["value"], "7");
    assert_eq!(map["10-6"]["value"], "7");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn single_cell_formula_round_trips(pool: PgPool) {
    let app = common::build_test_app(Some(pool.clone()));
    post_json(
        app,
        "/api/v1/cells",
        json!({"cellKey": "1-2", "value": "=A1+5", "isFormula": true, "seasonId": "season5"}),
    )
    .await;

    let app = common::build_test_app(Some(pool));
    let map = body_json(get(app, "/api/v1/cells?season=season5").await).await;
    assert_eq!(map["1-2"], json!({"value": "=A1+5", "isFormula": true}));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn single_cell_rejects_bad_input(pool: PgPool) {
    let app = common::build_test_app(Some(pool.clone()));
    let response = post_json(app, "/api/v1/cells", json!({"value": "1"})).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "cellKey is required");

    let app = common::build_test_app(Some(pool.clone()));
    let response = post_json(
        app,
        "/api/v1/cells",
        json!({"cellKey": "0-9", "value": "1", "seasonId": "season6"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "INVALID_CELL_KEY");

    let app = common::build_test_app(Some(pool));
    let response = post_json(
        app,
        "/api/v1/cells",
        json!({"cellKey": "0-0", "value": "1", "seasonId": "season0"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "INVALID_SEASON_OR_PLAYER");
}

// ---------------------------------------------------------------------------
// Deletes
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn delete_reports_whether_a_row_was_removed(pool: PgPool) {
    let app = common::build_test_app(Some(pool.clone()));
    post_json(
        app,
        "/api/v1/cells/batch",
        json!({"seasonId": "season2", "cells": {"3-1": {"value": "6"}, "4-1": {"value": "2"}}}),
    )
    .await;

    let app = common::build_test_app(Some(pool.clone()));
    let response = delete(app, "/api/v1/cells/3-1?season=season2").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({"success": true, "deleted": true}));

    let app = common::build_test_app(Some(pool.clone()));
    let response = delete(app, "/api/v1/cells/3-1?season=season2").await;
    assert_eq!(body_json(response).await["deleted"], false);

    let app = common::build_test_app(Some(pool.clone()));
    let map = body_json(get(app, "/api/v1/cells?season=season2").await).await;
    assert!(map.get("3-1").is_none());
    assert_eq!(map["10-1"]["value"], "2");

    let app = common::build_test_app(Some(pool));
    let response = delete(app, "/api/v1/cells/bad?season=season2").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn unknown_season_reads_as_empty(pool: PgPool) {
    let app = common::build_test_app(Some(pool));
    let response = get(app, "/api/v1/cells?season=season77").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({}));
}
