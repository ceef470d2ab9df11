//! REST API tests against a running dashboard.
//!
//! These tests require:
//! - A migrated `PostgreSQL` database (sb-cli migrate)
//! - The admin server running (cargo run -p storeboard-admin)
//! - Direct access to the server, bypassing the identity proxy, so the test
//!   can set the user header itself
//!
//! Run with: cargo test -p storeboard-integration-tests -- --ignored

#![allow(clippy::unwrap_used, clippy::expect_used)]

use reqwest::StatusCode;
use serde_json::json;
use storeboard_client::transport::fetch;
use storeboard_client::{ApiRequest, Transport, TransportError};
use storeboard_core::records::Store;
use storeboard_integration_tests::{admin_base_url, live_transport, live_user_id, unique};

#[tokio::test]
#[ignore = "Requires running admin server"]
async fn test_health() {
    let resp = reqwest::get(format!("{}/health", admin_base_url()))
        .await
        .expect("Failed to reach server");
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
#[ignore = "Requires running admin server"]
async fn test_mutation_without_user_is_unauthorized() {
    let transport = live_transport(None);
    let err = transport
        .send(
            ApiRequest::post("/api/stores")
                .json(&json!({"name": "Nope"}))
                .unwrap(),
        )
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(401));
}

#[tokio::test]
#[ignore = "Requires running admin server"]
async fn test_billboard_lifecycle_and_delete_conflict() {
    let transport = live_transport(Some(&live_user_id()));

    let store: Store = fetch(
        &*transport,
        ApiRequest::post("/api/stores")
            .json(&json!({"name": unique("Store")}))
            .unwrap(),
    )
    .await
    .expect("Failed to create store");

    // Validation runs on the server too.
    let invalid = transport
        .send(
            ApiRequest::post(format!("/api/{}/colors", store.id))
                .json(&json!({"name": "Green", "value": "00ff00"}))
                .unwrap(),
        )
        .await
        .unwrap_err();
    assert!(matches!(invalid, TransportError::Status { status: 400, ref body } if body.contains("valid hex code")));

    let billboard = transport
        .send(
            ApiRequest::post(format!("/api/{}/billboards", store.id))
                .json(&json!({"label": "Summer", "imageUrl": "https://x/img.png"}))
                .unwrap(),
        )
        .await
        .expect("Failed to create billboard");
    let billboard_id = billboard["id"].as_str().unwrap().to_string();

    let category = transport
        .send(
            ApiRequest::post(format!("/api/{}/categories", store.id))
                .json(&json!({"name": "Tops", "billboardId": billboard_id}))
                .unwrap(),
        )
        .await
        .expect("Failed to create category");
    let category_id = category["id"].as_str().unwrap().to_string();

    // Public read needs no user.
    let public = live_transport(None)
        .send(ApiRequest::get(format!("/api/{}/billboards/{billboard_id}", store.id)))
        .await
        .expect("Public read failed");
    assert_eq!(public["label"], "Summer");

    // The category still points at the billboard.
    let conflict = transport
        .send(ApiRequest::delete(format!("/api/{}/billboards/{billboard_id}", store.id)))
        .await
        .unwrap_err();
    assert_eq!(conflict.status(), Some(409));

    // Another user does not own the store.
    let stranger = live_transport(Some("user_someone_else"))
        .send(ApiRequest::delete(format!("/api/{}/categories/{category_id}", store.id)))
        .await
        .unwrap_err();
    assert_eq!(stranger.status(), Some(403));

    for path in [
        format!("/api/{}/categories/{category_id}", store.id),
        format!("/api/{}/billboards/{billboard_id}", store.id),
        format!("/api/stores/{}", store.id),
    ] {
        transport
            .send(ApiRequest::delete(path.clone()))
            .await
            .unwrap_or_else(|e| panic!("DELETE {path} failed: {e}"));
    }
}
