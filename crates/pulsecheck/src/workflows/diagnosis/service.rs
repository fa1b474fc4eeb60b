use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;

use super::domain::{Answer, AssessmentId, DiagnosisResult};
use super::intake::{IntakeGuard, IntakeViolation};
use super::messages::{MessageCatalog, MessageEngine};
use super::questionnaire::Questionnaire;
use super::repository::{
    AnalyticsEvent, DiagnosisRecord, DiagnosisRepository, EventError, EventPublisher,
    RepositoryError,
};
use super::scoring::DiagnosisEngine;

/// Event name published once a submission is stored.
pub const COMPLETED_EVENT: &str = "diagnosis_completed";

/// Service composing the intake guard, scorer, message engine, and storage.
pub struct DiagnosisService<R, E> {
    guard: IntakeGuard,
    engine: DiagnosisEngine,
    messages: MessageEngine,
    repository: Arc<R>,
    events: Arc<E>,
}

static ASSESSMENT_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_assessment_id() -> AssessmentId {
    let id = ASSESSMENT_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    AssessmentId(format!("diag-{id:06}"))
}

impl<R, E> DiagnosisService<R, E>
where
    R: DiagnosisRepository + 'static,
    E: EventPublisher + 'static,
{
    pub fn new(
        repository: Arc<R>,
        events: Arc<E>,
        catalog: MessageCatalog,
        questionnaire: Questionnaire,
    ) -> Self {
        let engine = DiagnosisEngine::new(questionnaire.clone());
        let messages = MessageEngine::new(catalog, questionnaire);

        Self {
            guard: IntakeGuard,
            engine,
            messages,
            repository,
            events,
        }
    }

    /// Score a submission without persisting anything.
    pub fn preview(
        &self,
        answers: &[Answer],
    ) -> Result<(DiagnosisResult, Vec<String>), DiagnosisServiceError> {
        let sheet = self.guard.sheet_from_answers(answers)?;
        let result = self.engine.classify_sheet(&sheet);
        let messages = self.messages.select_from_sheet(&result, &sheet);
        Ok((result, messages))
    }

    /// Score a submission, persist the record, and emit the completion
    /// event.
    pub fn submit(&self, answers: Vec<Answer>) -> Result<DiagnosisRecord, DiagnosisServiceError> {
        let (result, messages) = self.preview(&answers)?;

        let record = DiagnosisRecord {
            assessment_id: next_assessment_id(),
            answers,
            result,
            messages,
            submitted_at: Utc::now(),
        };

        let stored = self.repository.insert(record)?;

        let mut details = BTreeMap::new();
        details.insert("label".to_string(), stored.result.label.to_string());
        details.insert(
            "total_score".to_string(),
            stored.result.total_score.to_string(),
        );
        self.events.publish(AnalyticsEvent {
            name: COMPLETED_EVENT.to_string(),
            assessment_id: stored.assessment_id.clone(),
            details,
        })?;

        Ok(stored)
    }

    /// Fetch a stored assessment for API responses.
    pub fn get(
        &self,
        assessment_id: &AssessmentId,
    ) -> Result<DiagnosisRecord, DiagnosisServiceError> {
        let record = self
            .repository
            .fetch(assessment_id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(record)
    }
}

/// Error raised by the diagnosis service.
#[derive(Debug, thiserror::Error)]
pub enum DiagnosisServiceError {
    #[error(transparent)]
    Intake(#[from] IntakeViolation),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    Event(#[from] EventError),
}
