use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::domain::{ApplicantId, FacilityId, Roster};
use super::repository::RosterRepository;
use super::service::{AllocationService, AllocationServiceError};

/// Body for a preference submission.
#[derive(Debug, Clone, Deserialize)]
pub struct PreferenceSubmission {
    pub preferences: Vec<FacilityId>,
}

/// Router builder exposing HTTP endpoints for allocation runs and applicant outcomes.
pub fn allocation_router<R>(service: Arc<AllocationService<R>>) -> Router
where
    R: RosterRepository + 'static,
{
    Router::new()
        .route("/api/v1/allocation/runs", post(run_handler::<R>))
        .route("/api/v1/allocation/runs/latest", get(latest_run_handler::<R>))
        .route("/api/v1/allocation/summary", get(summary_handler::<R>))
        .route("/api/v1/allocation/simulate", post(simulate_handler::<R>))
        .route(
            "/api/v1/applicants/:applicant_id",
            get(applicant_handler::<R>),
        )
        .route(
            "/api/v1/applicants/:applicant_id/preferences",
            put(preferences_handler::<R>),
        )
        .with_state(service)
}

pub(crate) async fn run_handler<R>(State(service): State<Arc<AllocationService<R>>>) -> Response
where
    R: RosterRepository + 'static,
{
    match service.run_allocation() {
        Ok(record) => (StatusCode::OK, axum::Json(record)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn latest_run_handler<R>(
    State(service): State<Arc<AllocationService<R>>>,
) -> Response
where
    R: RosterRepository + 'static,
{
    match service.last_run() {
        Some(record) => (StatusCode::OK, axum::Json(record)).into_response(),
        None => {
            let payload = json!({ "error": "no allocation run has completed yet" });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn summary_handler<R>(
    State(service): State<Arc<AllocationService<R>>>,
) -> Response
where
    R: RosterRepository + 'static,
{
    match service.summary() {
        Ok(summary) => (StatusCode::OK, axum::Json(summary)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn simulate_handler<R>(
    State(service): State<Arc<AllocationService<R>>>,
    payload: Result<axum::Json<Roster>, JsonRejection>,
) -> Response
where
    R: RosterRepository + 'static,
{
    let roster = match payload {
        Ok(axum::Json(roster)) => roster,
        Err(rejection) => {
            let payload = json!({ "error": rejection.body_text() });
            return (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response();
        }
    };

    match service.simulate(roster) {
        Ok(outcome) => (StatusCode::OK, axum::Json(outcome)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn applicant_handler<R>(
    State(service): State<Arc<AllocationService<R>>>,
    Path(applicant_id): Path<String>,
) -> Response
where
    R: RosterRepository + 'static,
{
    match service.applicant_outcome(&ApplicantId(applicant_id)) {
        Ok(view) => (StatusCode::OK, axum::Json(view)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn preferences_handler<R>(
    State(service): State<Arc<AllocationService<R>>>,
    Path(applicant_id): Path<String>,
    axum::Json(submission): axum::Json<PreferenceSubmission>,
) -> Response
where
    R: RosterRepository + 'static,
{
    let id = ApplicantId(applicant_id);
    let result = service
        .submit_preferences(&id, submission.preferences)
        .and_then(|_| service.applicant_outcome(&id));

    match result {
        Ok(view) => (StatusCode::OK, axum::Json(view)).into_response(),
        Err(err) => error_response(err),
    }
}

fn error_response(err: AllocationServiceError) -> Response {
    let status = match err {
        AllocationServiceError::Validation(_) | AllocationServiceError::Preference(_) => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        AllocationServiceError::ApplicantNotFound(_) => StatusCode::NOT_FOUND,
        AllocationServiceError::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };

    let payload = json!({ "error": err.to_string() });
    (status, axum::Json(payload)).into_response()
}
