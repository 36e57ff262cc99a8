//! Integration tests for the myeongsik record endpoints.
//!
//! Covers the authentication short-circuits (empty list for anonymous
//! callers, 401 on mutations), the body-addressed delete contract, and
//! ownership scoping end to end.

mod common;

use axum::http::{Method, StatusCode};
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;

fn record_body(name: &str) -> serde_json::Value {
    json!({
        "name": name,
        "birth_day": "1990-03-15",
        "birth_time": "06:30:00",
        "calendar": "solar",
        "gender": "male",
    })
}

// ---------------------------------------------------------------------------
// Listing
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn list_without_session_returns_empty_array(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = common::get(app, "/api/v1/myeongsik", None).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = common::body_json(response).await;
    assert_eq!(json["data"], json!([]));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn list_with_garbage_token_returns_empty_array(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = common::get(app, "/api/v1/myeongsik", Some("not-a-jwt")).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = common::body_json(response).await;
    assert_eq!(json["data"], json!([]));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_then_list_newest_first(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = common::mint_token(Uuid::new_v4());

    for name in ["첫째", "둘째"] {
        let response = common::send_json(
            app.clone(),
            Method::POST,
            "/api/v1/myeongsik",
            &record_body(name),
            Some(&token),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let response = common::get(app, "/api/v1/myeongsik", Some(&token)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = common::body_json(response).await;

    let names: Vec<_> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["name"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(names, vec!["둘째", "첫째"]);
}

// ---------------------------------------------------------------------------
// Creation
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_without_session_is_401(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = common::send_json(
        app,
        Method::POST,
        "/api/v1/myeongsik",
        &record_body("익명"),
        None,
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = common::body_json(response).await;
    assert_eq!(json["code"], "UNAUTHORIZED");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_with_unknown_calendar_is_400(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = common::mint_token(Uuid::new_v4());

    let mut body = record_body("기록");
    body["calendar"] = json!("julian");

    let response = common::send_json(
        app,
        Method::POST,
        "/api/v1/myeongsik",
        &body,
        Some(&token),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = common::body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

// ---------------------------------------------------------------------------
// Body-addressed delete
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn body_delete_reports_success_and_hides_record(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = common::mint_token(Uuid::new_v4());

    let created = common::send_json(
        app.clone(),
        Method::POST,
        "/api/v1/myeongsik",
        &record_body("기록"),
        Some(&token),
    )
    .await;
    let id = common::body_json(created).await["data"]["id"].as_i64().unwrap();

    let response = common::send_json(
        app.clone(),
        Method::POST,
        "/api/v1/myeongsik/delete",
        &json!({ "id": id }),
        Some(&token),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = common::body_json(response).await;
    assert_eq!(json["success"], true);

    let listed = common::get(app, "/api/v1/myeongsik", Some(&token)).await;
    assert_eq!(common::body_json(listed).await["data"], json!([]));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn body_delete_without_session_is_401(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = common::send_json(
        app,
        Method::POST,
        "/api/v1/myeongsik/delete",
        &json!({ "id": 1 }),
        None,
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn delete_never_touches_another_owners_record(pool: PgPool) {
    let app = common::build_test_app(pool);
    let alice = common::mint_token(Uuid::new_v4());
    let bob = common::mint_token(Uuid::new_v4());

    let created = common::send_json(
        app.clone(),
        Method::POST,
        "/api/v1/myeongsik",
        &record_body("앨리스"),
        Some(&alice),
    )
    .await;
    let id = common::body_json(created).await["data"]["id"].as_i64().unwrap();

    // Bob's body-addressed delete and hard delete both miss.
    let response = common::send_json(
        app.clone(),
        Method::POST,
        "/api/v1/myeongsik/delete",
        &json!({ "id": id }),
        Some(&bob),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response =
        common::delete(app.clone(), &format!("/api/v1/myeongsik/{id}"), Some(&bob)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // Alice still sees her record.
    let listed = common::get(app, "/api/v1/myeongsik", Some(&alice)).await;
    let json = common::body_json(listed).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);
}

// ---------------------------------------------------------------------------
// Restore / hard delete / update
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn restore_brings_back_soft_deleted_record(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = common::mint_token(Uuid::new_v4());

    let created = common::send_json(
        app.clone(),
        Method::POST,
        "/api/v1/myeongsik",
        &record_body("기록"),
        Some(&token),
    )
    .await;
    let id = common::body_json(created).await["data"]["id"].as_i64().unwrap();

    common::send_json(
        app.clone(),
        Method::POST,
        "/api/v1/myeongsik/delete",
        &json!({ "id": id }),
        Some(&token),
    )
    .await;

    let response = common::send_json(
        app.clone(),
        Method::POST,
        &format!("/api/v1/myeongsik/{id}/restore"),
        &json!({}),
        Some(&token),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let listed = common::get(app, "/api/v1/myeongsik", Some(&token)).await;
    let json = common::body_json(listed).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn hard_delete_cannot_be_restored(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = common::mint_token(Uuid::new_v4());

    let created = common::send_json(
        app.clone(),
        Method::POST,
        "/api/v1/myeongsik",
        &record_body("기록"),
        Some(&token),
    )
    .await;
    let id = common::body_json(created).await["data"]["id"].as_i64().unwrap();

    let response =
        common::delete(app.clone(), &format!("/api/v1/myeongsik/{id}"), Some(&token)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = common::send_json(
        app,
        Method::POST,
        &format!("/api/v1/myeongsik/{id}/restore"),
        &json!({}),
        Some(&token),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn update_renames_and_refiles_record(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = common::mint_token(Uuid::new_v4());

    let created = common::send_json(
        app.clone(),
        Method::POST,
        "/api/v1/myeongsik",
        &record_body("기록"),
        Some(&token),
    )
    .await;
    let id = common::body_json(created).await["data"]["id"].as_i64().unwrap();

    let response = common::send_json(
        app,
        Method::PUT,
        &format!("/api/v1/myeongsik/{id}"),
        &json!({ "name": "새이름", "folder": "가족" }),
        Some(&token),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = common::body_json(response).await;
    assert_eq!(json["data"]["name"], "새이름");
    assert_eq!(json["data"]["folder"], "가족");
}
