//! Routes for the Job Submission bounded context.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{Json, Router, routing::get, routing::post};
use serde::Serialize;
use tracing::{info, instrument};
use uuid::Uuid;

use dreamquest_core::blueprint::Blueprint;
use dreamquest_core::job::{JobInput, JobStage};
use dreamquest_submission::application::query_handlers::{self, JobStatusView};
use dreamquest_submission::application::command_handlers;
use dreamquest_submission::domain::commands;

use crate::error::ApiError;
use crate::state::AppState;

/// Response body returned when a job is accepted.
#[derive(Debug, Serialize)]
pub struct SubmitJobResponse {
    /// The new job's identifier.
    pub job_id: Uuid,
    /// Always `queued`.
    pub status: JobStage,
}

/// POST /v1/jobs
#[instrument(skip(state, input))]
async fn submit_job(
    State(state): State<AppState>,
    Json(input): Json<JobInput>,
) -> Result<(StatusCode, Json<SubmitJobResponse>), ApiError> {
    let command = commands::SubmitJob {
        correlation_id: Uuid::new_v4(),
        input,
    };

    info!(correlation_id = %command.correlation_id, "handling submit_job command");

    let record = command_handlers::handle_submit_job(
        &command,
        state.clock.as_ref(),
        &*state.store,
        &*state.dispatcher,
    )
    .await?;

    Ok((
        StatusCode::ACCEPTED,
        Json(SubmitJobResponse {
            job_id: record.job_id(),
            status: record.stage(),
        }),
    ))
}

/// GET /v1/jobs/{job_id}
#[instrument(skip(state))]
async fn get_job(
    State(state): State<AppState>,
    Path(job_id): Path<Uuid>,
) -> Result<Json<JobStatusView>, ApiError> {
    let view = query_handlers::get_job_status(job_id, &*state.store).await?;
    Ok(Json(view))
}

/// GET /v1/jobs/{job_id}/blueprint
#[instrument(skip(state))]
async fn get_job_blueprint(
    State(state): State<AppState>,
    Path(job_id): Path<Uuid>,
) -> Result<Json<Blueprint>, ApiError> {
    let blueprint = query_handlers::get_job_blueprint(job_id, &*state.store).await?;
    Ok(Json(blueprint))
}

/// Returns the router for job submission and polling.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/v1/jobs", post(submit_job))
        .route("/v1/jobs/{job_id}", get(get_job))
        .route("/v1/jobs/{job_id}/blueprint", get(get_job_blueprint))
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::Request;
    use chrono::{TimeZone, Utc};
    use dreamquest_core::dispatch::JobDispatcher;
    use dreamquest_core::job::{JobRecord, JobResult, Length, Mood, OutputType, Style};
    use dreamquest_core::store::JobStore;
    use dreamquest_test_support::{
        FailingDispatcher, FailingJobStore, FixedClock, RecordingDispatcher, RecordingJobStore,
    };
    use serde_json::Value;
    use tower::ServiceExt;

    const DREAM: &str = "I was flying over a magical forest at night.";

    fn app_state_with(store: Arc<dyn JobStore>, dispatcher: Arc<dyn JobDispatcher>) -> AppState {
        let clock = Arc::new(FixedClock(Utc.with_ymd_and_hms(2026, 3, 1, 9, 30, 0).unwrap()));
        AppState::new(clock, store, dispatcher)
    }

    fn ready_record() -> JobRecord {
        let now = Utc.with_ymd_and_hms(2026, 3, 1, 9, 30, 0).unwrap();
        let mut record = JobRecord::queued(
            Uuid::new_v4(),
            JobInput {
                dream_text: Some(DREAM.to_owned()),
                audio_url: None,
                output_type: OutputType::Game,
                style: Style::Lowpoly,
                mood: Mood::Mystic,
                length: Length::Short,
                user_id: None,
            },
            now,
        );
        record.advance(JobStage::Analyzing, now).unwrap();
        record.advance(JobStage::Generating, now).unwrap();
        record.advance(JobStage::Building, now).unwrap();
        record
            .complete(
                JobResult::Game {
                    webgl_url: "/webgl/x/index.html".to_owned(),
                    blueprint: Blueprint::fallback(Style::Lowpoly, Mood::Mystic),
                },
                now,
            )
            .unwrap();
        record
    }

    fn post_jobs(body: &Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/v1/jobs")
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(body).unwrap()))
            .unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder()
            .method("GET")
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    }

    async fn json_body(response: axum::response::Response) -> Value {
        let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&body_bytes).unwrap()
    }

    #[tokio::test]
    async fn test_submit_job_returns_202_and_enqueues() {
        // Arrange
        let store = Arc::new(RecordingJobStore::new());
        let dispatcher = Arc::new(RecordingDispatcher::new());
        let app = router().with_state(app_state_with(store.clone(), dispatcher.clone()));
        let body = serde_json::json!({
            "dream_text": DREAM,
            "output_type": "game",
            "style": "lowpoly",
            "mood": "mystic",
            "length": "short",
        });

        // Act
        let response = app.oneshot(post_jobs(&body)).await.unwrap();

        // Assert
        assert_eq!(response.status(), StatusCode::ACCEPTED);
        let json = json_body(response).await;
        assert_eq!(json["status"], "queued");
        let job_id = Uuid::parse_str(json["job_id"].as_str().unwrap()).unwrap();
        assert_eq!(dispatcher.dispatched(), vec![job_id]);
        assert_eq!(store.latest(job_id).unwrap().stage(), JobStage::Queued);
    }

    #[tokio::test]
    async fn test_submit_job_returns_400_for_short_text() {
        // Arrange
        let store = Arc::new(RecordingJobStore::new());
        let app = router().with_state(app_state_with(
            store.clone(),
            Arc::new(RecordingDispatcher::new()),
        ));
        let body = serde_json::json!({
            "dream_text": "Too short.",
            "style": "toon",
            "mood": "calm",
            "length": "short",
        });

        // Act
        let response = app.oneshot(post_jobs(&body)).await.unwrap();

        // Assert
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = json_body(response).await;
        assert_eq!(json["error"], "validation_error");
        assert!(store.writes().is_empty());
    }

    #[tokio::test]
    async fn test_submit_job_returns_422_for_unknown_style() {
        // Arrange
        let app = router().with_state(app_state_with(
            Arc::new(RecordingJobStore::new()),
            Arc::new(RecordingDispatcher::new()),
        ));
        let body = serde_json::json!({
            "dream_text": DREAM,
            "style": "watercolor",
            "mood": "calm",
            "length": "short",
        });

        // Act
        let response = app.oneshot(post_jobs(&body)).await.unwrap();

        // Assert: Axum returns 422 for deserialization failures.
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_submit_job_returns_500_when_queue_is_down() {
        // Arrange
        let app = router().with_state(app_state_with(
            Arc::new(RecordingJobStore::new()),
            Arc::new(FailingDispatcher),
        ));
        let body = serde_json::json!({
            "dream_text": DREAM,
            "style": "toon",
            "mood": "calm",
            "length": "short",
        });

        // Act
        let response = app.oneshot(post_jobs(&body)).await.unwrap();

        // Assert
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let json = json_body(response).await;
        assert_eq!(json["error"], "infrastructure_error");
    }

    #[tokio::test]
    async fn test_get_job_returns_status_view() {
        // Arrange
        let record = ready_record();
        let job_id = record.job_id();
        let app = router().with_state(app_state_with(
            Arc::new(RecordingJobStore::with_record(record)),
            Arc::new(RecordingDispatcher::new()),
        ));

        // Act
        let response = app.oneshot(get(&format!("/v1/jobs/{job_id}"))).await.unwrap();

        // Assert
        assert_eq!(response.status(), StatusCode::OK);
        let json = json_body(response).await;
        assert_eq!(json["job_id"], job_id.to_string());
        assert_eq!(json["status"], "ready");
        assert_eq!(json["progress"], 100);
        assert_eq!(json["result"]["webgl_url"], "/webgl/x/index.html");
        assert!(json.get("error").is_none());
    }

    #[tokio::test]
    async fn test_get_job_returns_404_for_unknown_job() {
        // Arrange
        let app = router().with_state(app_state_with(
            Arc::new(RecordingJobStore::new()),
            Arc::new(RecordingDispatcher::new()),
        ));

        // Act
        let response = app
            .oneshot(get(&format!("/v1/jobs/{}", Uuid::new_v4())))
            .await
            .unwrap();

        // Assert
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let json = json_body(response).await;
        assert_eq!(json["error"], "job_not_found");
    }

    #[tokio::test]
    async fn test_get_job_returns_500_when_store_fails() {
        // Arrange
        let app = router().with_state(app_state_with(
            Arc::new(FailingJobStore),
            Arc::new(RecordingDispatcher::new()),
        ));

        // Act
        let response = app
            .oneshot(get(&format!("/v1/jobs/{}", Uuid::new_v4())))
            .await
            .unwrap();

        // Assert
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_get_job_blueprint_returns_blueprint() {
        // Arrange
        let record = ready_record();
        let job_id = record.job_id();
        let app = router().with_state(app_state_with(
            Arc::new(RecordingJobStore::with_record(record)),
            Arc::new(RecordingDispatcher::new()),
        ));

        // Act
        let response = app
            .oneshot(get(&format!("/v1/jobs/{job_id}/blueprint")))
            .await
            .unwrap();

        // Assert
        assert_eq!(response.status(), StatusCode::OK);
        let json = json_body(response).await;
        assert_eq!(json["world"], "forest");
        assert_eq!(json["style"], "lowpoly");
    }

    #[tokio::test]
    async fn test_get_job_returns_400_for_malformed_id() {
        // Arrange
        let app = router().with_state(app_state_with(
            Arc::new(RecordingJobStore::new()),
            Arc::new(RecordingDispatcher::new()),
        ));

        // Act
        let response = app.oneshot(get("/v1/jobs/not-a-uuid")).await.unwrap();

        // Assert
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
