//! HTTP-level integration tests for screen ordering, child reconciliation and
//! removal.

mod common;

use axum::http::StatusCode;
use common::{body_json, create_interview, create_screen, delete, get, put_json, screen_orders};
use serde_json::json;
use sqlx::PgPool;

fn titles_and_orders(pairs: &[(&str, i64)]) -> Vec<(String, i64)> {
    pairs.iter().map(|(t, o)| (t.to_string(), *o)).collect()
}

// ---------------------------------------------------------------------------
// Screen ordering
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_first_screen_gets_order_one(pool: PgPool) {
    let interview_id = create_interview(&pool, "Intake").await;

    let screen = create_screen(&pool, &interview_id, "Welcome", None).await;

    assert_eq!(screen["order"], 1);
    assert_eq!(screen["is_in_starting_state"], false);
    assert!(screen["starting_state_order"].is_null());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_screen_without_order_is_appended(pool: PgPool) {
    let interview_id = create_interview(&pool, "Intake").await;
    create_screen(&pool, &interview_id, "A", None).await;
    create_screen(&pool, &interview_id, "B", None).await;

    let screen = create_screen(&pool, &interview_id, "C", None).await;

    assert_eq!(screen["order"], 3);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_append_at_max_plus_one_leaves_siblings_alone(pool: PgPool) {
    let interview_id = create_interview(&pool, "Intake").await;
    create_screen(&pool, &interview_id, "A", None).await;
    create_screen(&pool, &interview_id, "B", None).await;

    create_screen(&pool, &interview_id, "C", Some(3)).await;

    assert_eq!(
        screen_orders(&pool, &interview_id).await,
        titles_and_orders(&[("A", 1), ("B", 2), ("C", 3)])
    );
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_mid_insert_shifts_later_screens(pool: PgPool) {
    let interview_id = create_interview(&pool, "Intake").await;
    create_screen(&pool, &interview_id, "One", None).await;
    create_screen(&pool, &interview_id, "Two", None).await;
    create_screen(&pool, &interview_id, "Three", None).await;

    let inserted = create_screen(&pool, &interview_id, "New", Some(2)).await;

    assert_eq!(inserted["order"], 2);
    assert_eq!(
        screen_orders(&pool, &interview_id).await,
        titles_and_orders(&[("One", 1), ("New", 2), ("Two", 3), ("Three", 4)])
    );
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_insert_at_front_shifts_every_screen(pool: PgPool) {
    let interview_id = create_interview(&pool, "Intake").await;
    create_screen(&pool, &interview_id, "A", None).await;
    create_screen(&pool, &interview_id, "B", None).await;

    create_screen(&pool, &interview_id, "Front", Some(1)).await;

    assert_eq!(
        screen_orders(&pool, &interview_id).await,
        titles_and_orders(&[("Front", 1), ("A", 2), ("B", 3)])
    );
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_orphan_order_is_rejected_without_changes(pool: PgPool) {
    let interview_id = create_interview(&pool, "Intake").await;
    create_screen(&pool, &interview_id, "A", None).await;
    create_screen(&pool, &interview_id, "B", None).await;
    create_screen(&pool, &interview_id, "C", None).await;

    let app = common::build_test_app(pool.clone());
    let response = common::post_json(
        app,
        "/api/interview_screens",
        json!({ "interview_id": interview_id, "title": "Orphan", "order": 7 }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "INVALID_ORDER");
    assert_eq!(
        screen_orders(&pool, &interview_id).await,
        titles_and_orders(&[("A", 1), ("B", 2), ("C", 3)])
    );
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_screen_for_missing_interview_is_rejected(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = common::post_json(
        app,
        "/api/interview_screens",
        json!({ "interview_id": uuid::Uuid::new_v4(), "title": "Lost" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "CONSTRAINT_VIOLATION");
}

// ---------------------------------------------------------------------------
// Reads
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_get_screen_includes_empty_children(pool: PgPool) {
    let interview_id = create_interview(&pool, "Intake").await;
    let screen = create_screen(&pool, &interview_id, "Welcome", None).await;
    let id = screen["id"].as_str().unwrap();

    let app = common::build_test_app(pool);
    let response = get(app, &format!("/api/interview_screens/{id}")).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["title"], "Welcome");
    assert_eq!(json["entries"], json!([]));
    assert_eq!(json["actions"], json!([]));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_get_nonexistent_screen_returns_404(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(
        app,
        &format!("/api/interview_screens/{}", uuid::Uuid::new_v4()),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["code"], "NOT_FOUND");
}

// ---------------------------------------------------------------------------
// Update: child reconciliation
// ---------------------------------------------------------------------------

fn entry(id: Option<&str>, order: i32, name: &str) -> serde_json::Value {
    json!({
        "id": id,
        "order": order,
        "name": name,
        "prompt": format!("{name} prompt"),
        "response_key": name.to_lowercase(),
        "response_type": "text",
    })
}

async fn put_screen(pool: &PgPool, id: &str, body: serde_json::Value) -> axum::response::Response {
    let app = common::build_test_app(pool.clone());
    put_json(app, &format!("/api/interview_screens/{id}"), body).await
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_update_reconciles_entries(pool: PgPool) {
    let interview_id = create_interview(&pool, "Intake").await;
    let screen = create_screen(&pool, &interview_id, "Contact", None).await;
    let screen_id = screen["id"].as_str().unwrap();

    let response = put_screen(
        &pool,
        screen_id,
        json!({
            "title": "Contact",
            "actions": [],
            "entries": [entry(None, 1, "A"), entry(None, 2, "B")],
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let a_id = json["entries"][0]["id"].as_str().unwrap().to_string();
    let b_id = json["entries"][1]["id"].as_str().unwrap().to_string();

    // B moves to the front, A is dropped, C is added.
    let response = put_screen(
        &pool,
        screen_id,
        json!({
            "title": "Contact details",
            "actions": [],
            "entries": [entry(Some(&b_id), 1, "B"), entry(None, 2, "C")],
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["title"], "Contact details");
    let entries = json["entries"].as_array().unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0]["id"], b_id.as_str());
    assert_eq!(entries[0]["order"], 1);
    assert_eq!(entries[1]["name"], "C");
    assert_eq!(entries[1]["order"], 2);
    assert!(entries.iter().all(|e| e["id"] != a_id.as_str()));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_update_swaps_action_orders(pool: PgPool) {
    let interview_id = create_interview(&pool, "Intake").await;
    let screen = create_screen(&pool, &interview_id, "Branch", None).await;
    let screen_id = screen["id"].as_str().unwrap();

    let response = put_screen(
        &pool,
        screen_id,
        json!({
            "title": "Branch",
            "entries": [],
            "actions": [
                { "order": 1, "action_type": "push", "action_payload": "first" },
                { "order": 2, "action_type": "milestone", "action_payload": "second" },
            ],
        }),
    )
    .await;
    let json = body_json(response).await;
    let first = json["actions"][0]["id"].as_str().unwrap().to_string();
    let second = json["actions"][1]["id"].as_str().unwrap().to_string();

    let response = put_screen(
        &pool,
        screen_id,
        json!({
            "title": "Branch",
            "entries": [],
            "actions": [
                { "id": second, "order": 1, "action_type": "milestone", "action_payload": "second" },
                { "id": first, "order": 2, "action_type": "push", "action_payload": "first" },
            ],
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["actions"][0]["id"], second.as_str());
    assert_eq!(json["actions"][1]["id"], first.as_str());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_update_rejects_gapped_entry_orders(pool: PgPool) {
    let interview_id = create_interview(&pool, "Intake").await;
    let screen = create_screen(&pool, &interview_id, "Contact", None).await;
    let screen_id = screen["id"].as_str().unwrap();

    let response = put_screen(
        &pool,
        screen_id,
        json!({
            "title": "Renamed",
            "actions": [],
            "entries": [entry(None, 1, "A"), entry(None, 3, "B")],
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "INVALID_ORDER");

    // Nothing from the rejected request was applied.
    let app = common::build_test_app(pool);
    let json = body_json(get(app, &format!("/api/interview_screens/{screen_id}")).await).await;
    assert_eq!(json["title"], "Contact");
    assert_eq!(json["entries"], json!([]));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_update_rejects_duplicate_child_ids(pool: PgPool) {
    let interview_id = create_interview(&pool, "Intake").await;
    let screen = create_screen(&pool, &interview_id, "Contact", None).await;
    let screen_id = screen["id"].as_str().unwrap();
    let dup = uuid::Uuid::new_v4().to_string();

    let response = put_screen(
        &pool,
        screen_id,
        json!({
            "title": "Contact",
            "actions": [],
            "entries": [entry(Some(&dup), 1, "A"), entry(Some(&dup), 2, "B")],
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_update_rejects_unknown_response_type(pool: PgPool) {
    let interview_id = create_interview(&pool, "Intake").await;
    let screen = create_screen(&pool, &interview_id, "Contact", None).await;
    let screen_id = screen["id"].as_str().unwrap();

    let mut bad = entry(None, 1, "A");
    bad["response_type"] = json!("colour");
    let response = put_screen(
        &pool,
        screen_id,
        json!({ "title": "Renamed", "actions": [], "entries": [bad] }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "CONSTRAINT_VIOLATION");

    // The title change earlier in the same transaction is rolled back.
    let app = common::build_test_app(pool);
    let json = body_json(get(app, &format!("/api/interview_screens/{screen_id}")).await).await;
    assert_eq!(json["title"], "Contact");
    assert_eq!(json["entries"], json!([]));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_update_nonexistent_screen_returns_404(pool: PgPool) {
    let response = put_screen(
        &pool,
        &uuid::Uuid::new_v4().to_string(),
        json!({ "title": "Ghost", "actions": [], "entries": [] }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_update_nonexistent_screen_with_gapped_entries_returns_404(pool: PgPool) {
    let response = put_screen(
        &pool,
        &uuid::Uuid::new_v4().to_string(),
        json!({
            "title": "Ghost",
            "actions": [],
            "entries": [entry(None, 1, "A"), entry(None, 3, "B")],
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Delete
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_delete_screen_closes_gap(pool: PgPool) {
    let interview_id = create_interview(&pool, "Intake").await;
    create_screen(&pool, &interview_id, "A", None).await;
    let middle = create_screen(&pool, &interview_id, "B", None).await;
    create_screen(&pool, &interview_id, "C", None).await;

    let app = common::build_test_app(pool.clone());
    let response = delete(
        app,
        &format!("/api/interview_screens/{}", middle["id"].as_str().unwrap()),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert_eq!(
        screen_orders(&pool, &interview_id).await,
        titles_and_orders(&[("A", 1), ("C", 2)])
    );
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_delete_nonexistent_screen_returns_404(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = delete(
        app,
        &format!("/api/interview_screens/{}", uuid::Uuid::new_v4()),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
