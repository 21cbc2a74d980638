//! Shared test helpers for API integration tests.
#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::{TimeZone, Utc};
use dreamquest_core::clock::Clock;
use dreamquest_job_store::InMemoryJobStore;
use dreamquest_test_support::{FixedClock, RecordingDispatcher};
use http_body_util::BodyExt;
use tower::ServiceExt;

use dreamquest_api::build_router;
use dreamquest_api::state::AppState;

/// Fixed timestamp used across all integration tests.
pub fn fixed_clock() -> Arc<dyn Clock> {
    Arc::new(FixedClock(Utc.with_ymd_and_hms(2026, 3, 1, 9, 30, 0).unwrap()))
}

/// Everything a test needs to drive the app and inspect what it did.
pub struct TestApp {
    pub clock: Arc<dyn Clock>,
    pub store: Arc<InMemoryJobStore>,
    pub dispatcher: Arc<RecordingDispatcher>,
}

impl TestApp {
    /// Creates an app over an empty in-memory store and a recording queue.
    pub fn new() -> Self {
        let clock = fixed_clock();
        Self {
            store: Arc::new(InMemoryJobStore::new(Arc::clone(&clock))),
            dispatcher: Arc::new(RecordingDispatcher::new()),
            clock,
        }
    }

    /// Builds the full router, the same way `main.rs` does.
    pub fn router(&self) -> Router {
        let app_state = AppState::new(
            Arc::clone(&self.clock),
            self.store.clone(),
            self.dispatcher.clone(),
        );
        build_router(app_state)
    }
}

/// Send a POST request with a JSON body and return the response.
pub async fn post_json(
    app: Router,
    uri: &str,
    body: &serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}

/// Send a GET request and return the response.
pub async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}
