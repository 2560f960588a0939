//! Integration tests for etude-api HTTP endpoints
//!
//! Drives the full router against an in-memory database: routing, JSON
//! binding, status codes and the error envelope.

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use serde_json::{json, Value};
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use tower::util::ServiceExt; // for `oneshot`

use etude_api::{build_router, AppState};
use etude_common::config::ServiceConfig;
use etude_common::db::init::init_schema;

/// Test helper: in-memory database with the full schema and a small catalog
async fn setup_test_db() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Should create in-memory database");

    init_schema(&pool).await.expect("Should initialize schema");

    let songs = [
        (1, "Morning Song", "Ann", "Pops", 2),
        (2, "Evening Song", "Bob", "Rock", 5),
        (3, "Night Song", "Cal", "Anime", 5),
    ];
    for (id, title, artist, genre, difficulty) in songs {
        sqlx::query(
            "INSERT INTO songs (id, title, artist, genre, base_difficulty, thumbnail)
             VALUES (?, ?, ?, ?, ?, 'thumb.png')",
        )
        .bind(id)
        .bind(title)
        .bind(artist)
        .bind(genre)
        .bind(difficulty)
        .execute(&pool)
        .await
        .unwrap();
    }

    sqlx::query("INSERT INTO sheets (song_id, difficulty, sheet) VALUES (1, 3, 'sheet-data')")
        .execute(&pool)
        .await
        .unwrap();

    pool
}

/// Test helper: app with test state
fn setup_app(db: SqlitePool) -> axum::Router {
    let state = AppState::new(db, ServiceConfig::default());
    build_router(state)
}

/// Test helper: request without a body
fn test_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

/// Test helper: request with a JSON body
fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Test helper: extract JSON body from response
async fn extract_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .expect("Should read body");
    serde_json::from_slice(&bytes).expect("Should parse JSON")
}

// =============================================================================
// Health
// =============================================================================

#[tokio::test]
async fn test_health_endpoint() {
    let app = setup_app(setup_test_db().await);

    let response = app.oneshot(test_request("GET", "/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["module"], "etude-api");
    assert!(body["version"].is_string());
}

// =============================================================================
// Catalog: search and select
// =============================================================================

#[tokio::test]
async fn test_search_by_keyword_records_history() {
    let db = setup_test_db().await;
    let app = setup_app(db);

    let request = json_request(
        "POST",
        "/search",
        json!({"search_category": "keyword", "text": "Song"}),
    );
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body.as_array().unwrap().len(), 3);

    // The search results landed in the history log
    let response = app
        .oneshot(test_request("GET", "/history/searches?limit=10"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let history = extract_json(response.into_body()).await;
    assert_eq!(history.as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_search_by_genre() {
    let app = setup_app(setup_test_db().await);

    let request = json_request(
        "POST",
        "/search",
        json!({"search_category": "genre", "genre": "Anime"}),
    );
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["music_id"], 3);
}

#[tokio::test]
async fn test_select_returns_song_with_sheets() {
    let app = setup_app(setup_test_db().await);

    let response = app
        .oneshot(json_request("POST", "/select", json!({"music_id": 1})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["title"], "Morning Song");
    assert_eq!(body["genre"], "Pops");
    assert_eq!(body["sheets"][0]["sheet"], "sheet-data");
}

#[tokio::test]
async fn test_select_missing_song_is_404() {
    let app = setup_app(setup_test_db().await);

    let response = app
        .oneshot(json_request("POST", "/select", json!({"music_id": 99})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["error"]["code"], "NOT_FOUND");
}

// =============================================================================
// Favorites
// =============================================================================

#[tokio::test]
async fn test_favorites_add_list_and_replace_flow() {
    let app = setup_app(setup_test_db().await);

    for id in [2, 1] {
        let response = app
            .clone()
            .oneshot(json_request("POST", "/favorites", json!({"music_id": id})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    let response = app.clone().oneshot(test_request("GET", "/favorites")).await.unwrap();
    let body = extract_json(response.into_body()).await;
    let ids: Vec<i64> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["music_id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![2, 1]);

    // Wholesale replace via PUT
    let response = app
        .clone()
        .oneshot(json_request("PUT", "/favorites", json!({"music_ids": [3, 2]})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.oneshot(test_request("GET", "/favorites")).await.unwrap();
    let body = extract_json(response.into_body()).await;
    let ids: Vec<i64> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["music_id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![3, 2]);
}

#[tokio::test]
async fn test_favorites_duplicate_add_is_409() {
    let app = setup_app(setup_test_db().await);

    let response = app
        .clone()
        .oneshot(json_request("POST", "/favorites", json!({"music_id": 1})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(json_request("POST", "/favorites", json!({"music_id": 1})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["error"]["code"], "CONFLICT");
}

#[tokio::test]
async fn test_favorites_non_positive_id_is_400() {
    let app = setup_app(setup_test_db().await);

    let response = app
        .oneshot(json_request("POST", "/favorites", json!({"music_id": 0})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// =============================================================================
// Difficulty overrides
// =============================================================================

#[tokio::test]
async fn test_difficulty_settings_set_get_and_clear() {
    let app = setup_app(setup_test_db().await);

    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            "/music/1/difficulty-settings",
            json!([{"measure": 4, "difficulty": 2}, {"measure": 1, "difficulty": 5}]),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(test_request("GET", "/music/1/difficulty-settings"))
        .await
        .unwrap();
    let body = extract_json(response.into_body()).await;
    // Ordered by measure ascending
    assert_eq!(body, json!([{"measure": 1, "difficulty": 5}, {"measure": 4, "difficulty": 2}]));

    // Empty body clears
    let response = app
        .clone()
        .oneshot(json_request("PUT", "/music/1/difficulty-settings", json!([])))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(test_request("GET", "/music/1/difficulty-settings"))
        .await
        .unwrap();
    let body = extract_json(response.into_body()).await;
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_difficulty_settings_rejects_non_positive_id() {
    let app = setup_app(setup_test_db().await);

    let response = app
        .oneshot(test_request("GET", "/music/0/difficulty-settings"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// =============================================================================
// Proficiency
// =============================================================================

#[tokio::test]
async fn test_proficiency_get_and_put_roundtrip() {
    let app = setup_app(setup_test_db().await);

    let response = app.clone().oneshot(test_request("GET", "/proficiency")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = extract_json(response.into_body()).await;
    assert_eq!(body, json!(0.0));

    let response = app
        .clone()
        .oneshot(json_request("PUT", "/proficiency", json!({"proficiency": 4.6})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.oneshot(test_request("GET", "/proficiency")).await.unwrap();
    let body = extract_json(response.into_body()).await;
    assert_eq!(body, json!(4.6));
}

#[tokio::test]
async fn test_calculate_rejects_malformed_pitch_pairs() {
    let app = setup_app(setup_test_db().await);

    let response = app
        .oneshot(json_request(
            "POST",
            "/proficiency/calculate",
            json!({"audio": [0.1, 0.2], "difficulty": 3, "correct_pitches": [[440.0]]}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["error"]["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn test_calculate_unreachable_scoring_service_is_502() {
    let db = setup_test_db().await;
    // Point the scoring client at a port nothing listens on
    let config = ServiceConfig {
        scoring_url: "http://127.0.0.1:9".to_string(),
        ..ServiceConfig::default()
    };
    let app = build_router(AppState::new(db, config));

    let response = app
        .oneshot(json_request(
            "POST",
            "/proficiency/calculate",
            json!({"audio": [0.1], "difficulty": 1, "correct_pitches": [[440.0, 0.5]]}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["error"]["code"], "UPSTREAM_ERROR");
}

// =============================================================================
// Recommendations
// =============================================================================

#[tokio::test]
async fn test_proficiency_recommendations_respect_window() {
    let app = setup_app(setup_test_db().await);

    // Gauge at 5.0: with tolerance 0 only the two difficulty-5 songs match
    let response = app
        .clone()
        .oneshot(json_request("PUT", "/proficiency", json!({"proficiency": 5.0})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(test_request("GET", "/recommendations/proficiency?count=5&tolerance=0"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    let ids: Vec<i64> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["music_id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids.len(), 2);
    for id in ids {
        assert!(id == 2 || id == 3);
    }
}
