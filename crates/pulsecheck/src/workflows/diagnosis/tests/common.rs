use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex};

use serde_json::Value;

use crate::workflows::diagnosis::domain::{
    Answer, AnswerValue, AssessmentId, DiagnosisLabel, QuestionId,
};
use crate::workflows::diagnosis::messages::{
    Condition, ConditionField, ConditionGroup, ConditionLogic, ConditionOperator, MessageCatalog,
    MessageEngine, MessageRule, Severity,
};
use crate::workflows::diagnosis::questionnaire::Questionnaire;
use crate::workflows::diagnosis::repository::{
    AnalyticsEvent, DiagnosisRecord, DiagnosisRepository, EventError, EventPublisher,
    RepositoryError,
};
use crate::workflows::diagnosis::router::diagnosis_router;
use crate::workflows::diagnosis::{DiagnosisEngine, DiagnosisService};

pub(super) fn question(raw: u8) -> QuestionId {
    QuestionId::new(raw).expect("question id within sheet")
}

pub(super) fn answer(question_id: u8, points: u8) -> Answer {
    Answer {
        question_id: question(question_id),
        value: AnswerValue::try_from(points).expect("valid answer points"),
    }
}

/// Twelve answers in question order, one value per question.
pub(super) fn answers(values: [u8; 12]) -> Vec<Answer> {
    values
        .iter()
        .enumerate()
        .map(|(index, &points)| answer(index as u8 + 1, points))
        .collect()
}

pub(super) fn engine() -> DiagnosisEngine {
    DiagnosisEngine::new(Questionnaire::standard())
}

pub(super) fn message_engine() -> MessageEngine {
    MessageEngine::new(MessageCatalog::standard(), Questionnaire::standard())
}

pub(super) fn full_headlines() -> BTreeMap<DiagnosisLabel, String> {
    DiagnosisLabel::all()
        .map(|label| (label, format!("headline for {}", label.code())))
        .collect()
}

pub(super) fn question_condition(
    question_id: u8,
    operator: ConditionOperator,
    value: i16,
) -> Condition {
    Condition {
        field: ConditionField::Question(question(question_id)),
        operator,
        value,
    }
}

pub(super) fn simple_rule(
    id: &str,
    base_priority: f64,
    severity: Severity,
    conditions: Vec<Condition>,
    text: &str,
) -> MessageRule {
    MessageRule {
        id: id.to_string(),
        base_priority,
        severity,
        conditions: ConditionGroup {
            logic: ConditionLogic::And,
            conditions,
        },
        text: text.to_string(),
        enabled: true,
    }
}

pub(super) fn custom_engine(rules: Vec<MessageRule>) -> MessageEngine {
    let catalog =
        MessageCatalog::new("test", full_headlines(), rules).expect("test catalog is valid");
    MessageEngine::new(catalog, Questionnaire::standard())
}

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    pub(super) records: Arc<Mutex<HashMap<AssessmentId, DiagnosisRecord>>>,
}

impl DiagnosisRepository for MemoryRepository {
    fn insert(&self, record: DiagnosisRecord) -> Result<DiagnosisRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&record.assessment_id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.assessment_id.clone(), record.clone());
        Ok(record)
    }

    fn fetch(&self, id: &AssessmentId) -> Result<Option<DiagnosisRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn recent(&self, limit: usize) -> Result<Vec<DiagnosisRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        let mut records: Vec<DiagnosisRecord> = guard.values().cloned().collect();
        records.sort_by(|a, b| b.submitted_at.cmp(&a.submitted_at));
        records.truncate(limit);
        Ok(records)
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryEvents {
    events: Arc<Mutex<Vec<AnalyticsEvent>>>,
}

impl MemoryEvents {
    pub(super) fn events(&self) -> Vec<AnalyticsEvent> {
        self.events.lock().expect("event mutex poisoned").clone()
    }
}

impl EventPublisher for MemoryEvents {
    fn publish(&self, event: AnalyticsEvent) -> Result<(), EventError> {
        self.events
            .lock()
            .expect("event mutex poisoned")
            .push(event);
        Ok(())
    }
}

pub(super) struct UnavailableRepository;

impl DiagnosisRepository for UnavailableRepository {
    fn insert(&self, _record: DiagnosisRecord) -> Result<DiagnosisRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: &AssessmentId) -> Result<Option<DiagnosisRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn recent(&self, _limit: usize) -> Result<Vec<DiagnosisRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) fn build_service() -> (
    DiagnosisService<MemoryRepository, MemoryEvents>,
    Arc<MemoryRepository>,
    Arc<MemoryEvents>,
) {
    let repository = Arc::new(MemoryRepository::default());
    let events = Arc::new(MemoryEvents::default());
    let service = DiagnosisService::new(
        repository.clone(),
        events.clone(),
        MessageCatalog::standard(),
        Questionnaire::standard(),
    );
    (service, repository, events)
}

pub(super) fn diagnosis_router_with_service(
    service: DiagnosisService<MemoryRepository, MemoryEvents>,
) -> axum::Router {
    diagnosis_router(Arc::new(service))
}

pub(super) async fn read_json_body(response: axum::response::Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
