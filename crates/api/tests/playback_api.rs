//! HTTP-level integration tests for play reporting, play-triggered
//! retirement, the play history audit trail, and the manual expiry sweep.

mod common;

use axum::http::StatusCode;
use chrono::{Duration, Utc};
use common::{body_json, get, get_authed, patch_json_authed, post_authed, post_json, put_json_authed};
use sqlx::PgPool;

async fn queue_membership_count(pool: &PgPool, id: i64) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM queue_entries WHERE content_item_id = $1")
        .bind(id)
        .fetch_one(pool)
        .await
        .unwrap()
}

/// POST one completed play report for `id` and return the response body.
async fn play(pool: &PgPool, id: i64) -> serde_json::Value {
    let started = Utc::now() - Duration::seconds(10);
    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        &format!("/api/v1/content/{id}/play"),
        serde_json::json!({
            "started_at": started.to_rfc3339(),
            "completed_at": Utc::now().to_rfc3339(),
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await["data"].clone()
}

async fn fetch_item(pool: &PgPool, id: i64) -> serde_json::Value {
    let app = common::build_test_app(pool.clone());
    let response = get(app, &format!("/api/v1/content/{id}")).await;
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await["data"].clone()
}

// ---------------------------------------------------------------------------
// Play reporting
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_play_report_bumps_count(pool: PgPool) {
    let id = common::create_admin_item(&pool, "promo.jpg").await;

    let data = play(&pool, id).await;
    assert_eq!(data["play_count"], 1);
    assert_eq!(data["auto_deleted"], false);
    assert_eq!(data["reached_cap"], false);

    let data = play(&pool, id).await;
    assert_eq!(data["play_count"], 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_play_report_with_inverted_interval_rejected(pool: PgPool) {
    let id = common::create_admin_item(&pool, "promo.jpg").await;

    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        &format!("/api/v1/content/{id}/play"),
        serde_json::json!({
            "started_at": Utc::now().to_rfc3339(),
            "completed_at": (Utc::now() - Duration::minutes(5)).to_rfc3339(),
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_play_report_for_retired_item_returns_409(pool: PgPool) {
    let id = common::create_admin_item(&pool, "promo.jpg").await;

    let app = common::build_test_app(pool.clone());
    let response = patch_json_authed(
        app,
        &format!("/api/v1/content/{id}"),
        serde_json::json!({"display_status": "completed"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    // The display raced the removal; the count must not move.
    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        &format!("/api/v1/content/{id}/play"),
        serde_json::json!({
            "started_at": Utc::now().to_rfc3339(),
            "completed_at": Utc::now().to_rfc3339(),
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let item = fetch_item(&pool, id).await;
    assert_eq!(item["play_count"], 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_play_report_for_missing_item_returns_404(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/content/999999/play",
        serde_json::json!({
            "started_at": Utc::now().to_rfc3339(),
            "completed_at": Utc::now().to_rfc3339(),
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Play-triggered retirement
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_paid_one_shot_retires_after_first_play(pool: PgPool) {
    // Priced customer item, no repeat schedule: one play and it is gone.
    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        "/api/v1/content",
        serde_json::json!({
            "file_name": "sunset.jpg",
            "content_type": "image/jpeg",
            "storage_path": "uploads/sunset.jpg",
            "price_cents": 500,
            "pricing_option_id": 1,
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let id = body_json(response).await["data"]["id"].as_i64().unwrap();
    common::approve_and_pay(&pool, id).await;
    assert_eq!(queue_membership_count(&pool, id).await, 1);

    let data = play(&pool, id).await;
    assert_eq!(data["play_count"], 1);
    assert_eq!(data["auto_deleted"], true);

    let item = fetch_item(&pool, id).await;
    assert_eq!(item["display_status"], "completed");
    assert_eq!(item["completion_cause"], "paid_single_play");
    assert_eq!(item["system_completed"], true);
    assert_eq!(queue_membership_count(&pool, id).await, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_admin_content_never_retired_by_playback(pool: PgPool) {
    let id = common::create_admin_item(&pool, "promo.jpg").await;

    let app = common::build_test_app(pool.clone());
    patch_json_authed(
        app,
        &format!("/api/v1/content/{id}"),
        serde_json::json!({"max_plays": 2, "auto_complete_after_play": true}),
    )
    .await;

    play(&pool, id).await;
    let data = play(&pool, id).await;
    assert_eq!(data["reached_cap"], true);
    assert_eq!(data["auto_deleted"], false);

    let item = fetch_item(&pool, id).await;
    assert_eq!(item["display_status"], "queued");
    assert!(item["completion_cause"].is_null());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_cap_alone_is_advisory(pool: PgPool) {
    // Free customer item with a cap of 1 but no auto-complete: the cap flag
    // comes back but the item stays in the rotation.
    let id = common::create_customer_item(&pool, "sunset.jpg").await;
    common::approve_and_pay(&pool, id).await;

    let app = common::build_test_app(pool.clone());
    patch_json_authed(
        app,
        &format!("/api/v1/content/{id}"),
        serde_json::json!({"max_plays": 1}),
    )
    .await;

    let data = play(&pool, id).await;
    assert_eq!(data["reached_cap"], true);
    assert_eq!(data["auto_deleted"], false);

    let item = fetch_item(&pool, id).await;
    assert_eq!(item["display_status"], "queued");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_repeat_item_completes_at_cap_when_configured(pool: PgPool) {
    let id = common::create_customer_item(&pool, "sunset.jpg").await;
    common::approve_and_pay(&pool, id).await;

    // Repeat class via per-day frequency, capped at 2 with auto-complete.
    let app = common::build_test_app(pool.clone());
    let response = put_json_authed(
        app,
        &format!("/api/v1/content/{id}/schedule"),
        serde_json::json!({"repeat_frequency_per_day": 4}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let app = common::build_test_app(pool.clone());
    patch_json_authed(
        app,
        &format!("/api/v1/content/{id}"),
        serde_json::json!({"max_plays": 2, "auto_complete_after_play": true}),
    )
    .await;

    let data = play(&pool, id).await;
    assert_eq!(data["reached_cap"], false);

    let data = play(&pool, id).await;
    assert_eq!(data["reached_cap"], true);

    let item = fetch_item(&pool, id).await;
    assert_eq!(item["display_status"], "completed");
    assert_eq!(item["completion_cause"], "play_cap");
    assert_eq!(queue_membership_count(&pool, id).await, 0);
}

// ---------------------------------------------------------------------------
// Play history
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_play_history_listing(pool: PgPool) {
    let id = common::create_admin_item(&pool, "promo.jpg").await;
    play(&pool, id).await;
    play(&pool, id).await;

    let app = common::build_test_app(pool);
    let response = get_authed(app, &format!("/api/v1/content/{id}/plays")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let plays = json["data"].as_array().unwrap();
    assert_eq!(plays.len(), 2);
    // Newest first.
    assert_eq!(plays[0]["play_number"], 2);
    assert_eq!(plays[1]["play_number"], 1);
    assert_eq!(plays[0]["file_name"], "promo.jpg");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_play_history_requires_operator_key(pool: PgPool) {
    let id = common::create_admin_item(&pool, "promo.jpg").await;

    let app = common::build_test_app(pool);
    let response = get(app, &format!("/api/v1/content/{id}/plays")).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_play_history_survives_deletion(pool: PgPool) {
    let id = common::create_admin_item(&pool, "promo.jpg").await;
    play(&pool, id).await;

    let app = common::build_test_app(pool.clone());
    let response = common::delete_authed(app, &format!("/api/v1/content/{id}")).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let app = common::build_test_app(pool);
    let response = get_authed(app, &format!("/api/v1/content/{id}/plays")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);
}

// ---------------------------------------------------------------------------
// Manual expiry sweep
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_sweep_retires_expired_window(pool: PgPool) {
    let id = common::create_admin_item(&pool, "promo.jpg").await;

    let app = common::build_test_app(pool.clone());
    let response = put_json_authed(
        app,
        &format!("/api/v1/content/{id}/schedule"),
        serde_json::json!({
            "scheduled_start": (Utc::now() - Duration::hours(2)).to_rfc3339(),
            "scheduled_end": (Utc::now() - Duration::hours(1)).to_rfc3339(),
            "auto_delete_after_end": true,
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let app = common::build_test_app(pool.clone());
    let response = post_authed(app, "/api/v1/admin/sweep").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["swept"], 1);

    let item = fetch_item(&pool, id).await;
    assert_eq!(item["display_status"], "completed");
    assert_eq!(item["completion_cause"], "schedule_expired");
    assert_eq!(queue_membership_count(&pool, id).await, 0);

    // A second pass finds nothing.
    let app = common::build_test_app(pool);
    let response = post_authed(app, "/api/v1/admin/sweep").await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["swept"], 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_sweep_leaves_unexpired_windows_alone(pool: PgPool) {
    let id = common::create_admin_item(&pool, "promo.jpg").await;

    let app = common::build_test_app(pool.clone());
    put_json_authed(
        app,
        &format!("/api/v1/content/{id}/schedule"),
        serde_json::json!({
            "scheduled_start": (Utc::now() - Duration::hours(1)).to_rfc3339(),
            "scheduled_end": (Utc::now() + Duration::hours(1)).to_rfc3339(),
            "auto_delete_after_end": true,
        }),
    )
    .await;

    let app = common::build_test_app(pool.clone());
    let response = post_authed(app, "/api/v1/admin/sweep").await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["swept"], 0);

    let item = fetch_item(&pool, id).await;
    assert_eq!(item["display_status"], "queued");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_sweep_requires_operator_key(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = common::post(app, "/api/v1/admin/sweep").await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
