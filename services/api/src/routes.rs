use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;

use pulsecheck::error::AppError;
use pulsecheck::workflows::diagnosis::{
    diagnosis_router, Answer, DiagnosisEngine, DiagnosisRepository, DiagnosisResult,
    DiagnosisService, DiagnosisServiceError, EventPublisher, IntakeGuard, MessageCatalog,
    MessageEngine, Questionnaire, ScoreBand,
};

#[derive(Debug, Deserialize)]
pub(crate) struct DiagnosisPreviewRequest {
    pub(crate) answers: Vec<Answer>,
}

#[derive(Debug, Serialize)]
pub(crate) struct DiagnosisPreviewResponse {
    pub(crate) result: DiagnosisResult,
    pub(crate) band: ScoreBand,
    pub(crate) messages: Vec<String>,
}

pub(crate) fn with_diagnosis_routes<R, E>(service: Arc<DiagnosisService<R, E>>) -> axum::Router
where
    R: DiagnosisRepository + 'static,
    E: EventPublisher + 'static,
{
    diagnosis_router(service)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route(
            "/api/v1/diagnosis/preview",
            axum::routing::post(preview_endpoint),
        )
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

/// Stateless scoring: classify a sheet and select messages without
/// touching storage.
pub(crate) async fn preview_endpoint(
    Json(payload): Json<DiagnosisPreviewRequest>,
) -> Result<Json<DiagnosisPreviewResponse>, AppError> {
    let questionnaire = Questionnaire::standard();
    let engine = DiagnosisEngine::new(questionnaire.clone());
    let messages = MessageEngine::new(MessageCatalog::standard(), questionnaire);

    let sheet = IntakeGuard::default()
        .sheet_from_answers(&payload.answers)
        .map_err(DiagnosisServiceError::from)?;

    let result = engine.classify_sheet(&sheet);
    let band = ScoreBand::from_total(result.total_score);
    let selected = messages.select_from_sheet(&result, &sheet);

    Ok(Json(DiagnosisPreviewResponse {
        result,
        band,
        messages: selected,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pulsecheck::workflows::diagnosis::{AnswerValue, DiagnosisLabel, QuestionId};

    fn answers(values: [u8; 12]) -> Vec<Answer> {
        values
            .iter()
            .enumerate()
            .map(|(index, &points)| Answer {
                question_id: QuestionId::new(index as u8 + 1).expect("index within sheet"),
                value: AnswerValue::try_from(points).expect("valid answer points"),
            })
            .collect()
    }

    #[tokio::test]
    async fn preview_endpoint_scores_without_storing() {
        let request = DiagnosisPreviewRequest {
            answers: answers([8, 6, 3, 8, 8, 8, 6, 6, 6, 3, 3, 3]),
        };

        let Json(body) = preview_endpoint(Json(request)).await.expect("preview runs");

        assert_eq!(body.result.total_score, 71);
        assert_eq!(body.band, ScoreBand::Mid);
        assert!(!body.messages.is_empty() && body.messages.len() <= 3);
    }

    #[tokio::test]
    async fn preview_endpoint_flags_zero_sheets() {
        let request = DiagnosisPreviewRequest {
            answers: answers([0; 12]),
        };

        let Json(body) = preview_endpoint(Json(request)).await.expect("preview runs");

        assert!(body.result.is_zero_score);
        assert_eq!(body.result.label, DiagnosisLabel::Beginner);
        assert_eq!(body.band, ScoreBand::Low);
    }

    #[tokio::test]
    async fn preview_endpoint_rejects_duplicate_answers() {
        let request = DiagnosisPreviewRequest {
            answers: vec![
                Answer {
                    question_id: QuestionId::new(1).expect("valid id"),
                    value: AnswerValue::Consistently,
                },
                Answer {
                    question_id: QuestionId::new(1).expect("valid id"),
                    value: AnswerValue::NotYet,
                },
            ],
        };

        let error = preview_endpoint(Json(request))
            .await
            .expect_err("duplicates must fail");

        assert!(matches!(error, AppError::Assessment(_)));
    }
}
