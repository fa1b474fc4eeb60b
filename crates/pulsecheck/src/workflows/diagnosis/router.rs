use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::domain::{Answer, AssessmentId};
use super::repository::{DiagnosisRepository, EventPublisher, RepositoryError};
use super::service::{DiagnosisService, DiagnosisServiceError};

/// Router builder exposing HTTP endpoints for submission and retrieval.
pub fn diagnosis_router<R, E>(service: Arc<DiagnosisService<R, E>>) -> Router
where
    R: DiagnosisRepository + 'static,
    E: EventPublisher + 'static,
{
    Router::new()
        .route("/api/v1/diagnosis", post(submit_handler::<R, E>))
        .route(
            "/api/v1/diagnosis/:assessment_id",
            get(result_handler::<R, E>),
        )
        .with_state(service)
}

#[derive(Debug, Deserialize)]
pub struct DiagnosisRequest {
    pub answers: Vec<Answer>,
}

pub(crate) async fn submit_handler<R, E>(
    State(service): State<Arc<DiagnosisService<R, E>>>,
    axum::Json(request): axum::Json<DiagnosisRequest>,
) -> Response
where
    R: DiagnosisRepository + 'static,
    E: EventPublisher + 'static,
{
    match service.submit(request.answers) {
        Ok(record) => (StatusCode::CREATED, axum::Json(record.view())).into_response(),
        Err(DiagnosisServiceError::Intake(error)) => {
            let payload = json!({
                "error": error.to_string(),
            });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
        Err(DiagnosisServiceError::Repository(RepositoryError::Conflict)) => {
            let payload = json!({
                "error": "assessment already exists",
            });
            (StatusCode::CONFLICT, axum::Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({
                "error": other.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn result_handler<R, E>(
    State(service): State<Arc<DiagnosisService<R, E>>>,
    Path(assessment_id): Path<String>,
) -> Response
where
    R: DiagnosisRepository + 'static,
    E: EventPublisher + 'static,
{
    let id = AssessmentId(assessment_id);
    match service.get(&id) {
        Ok(record) => (StatusCode::OK, axum::Json(record.view())).into_response(),
        Err(DiagnosisServiceError::Repository(RepositoryError::NotFound)) => {
            let payload = json!({
                "assessment_id": id.0,
                "error": "assessment not found",
            });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({
                "error": other.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}
