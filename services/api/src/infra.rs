use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

use pulsecheck::workflows::diagnosis::{
    AnalyticsEvent, Answer, AnswerValue, AssessmentId, DiagnosisRecord, DiagnosisRepository,
    EventError, EventPublisher, QuestionId, RepositoryError,
};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryDiagnosisRepository {
    records: Arc<Mutex<HashMap<AssessmentId, DiagnosisRecord>>>,
}

impl DiagnosisRepository for InMemoryDiagnosisRepository {
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
pub(crate) struct InMemoryEventPublisher {
    events: Arc<Mutex<Vec<AnalyticsEvent>>>,
}

impl EventPublisher for InMemoryEventPublisher {
    fn publish(&self, event: AnalyticsEvent) -> Result<(), EventError> {
        let mut guard = self.events.lock().expect("event mutex poisoned");
        guard.push(event);
        Ok(())
    }
}

impl InMemoryEventPublisher {
    pub(crate) fn events(&self) -> Vec<AnalyticsEvent> {
        self.events.lock().expect("event mutex poisoned").clone()
    }
}

/// Parse a comma-separated list of answer values ("8,6,3,...") into
/// answers for questions 1..N in order.
pub(crate) fn parse_answer_values(raw: &str) -> Result<Vec<Answer>, String> {
    let mut answers = Vec::new();
    for (index, token) in raw.split(',').enumerate() {
        if index >= QuestionId::COUNT {
            return Err(format!(
                "too many values: the sheet has {} questions",
                QuestionId::COUNT
            ));
        }

        let points = token
            .trim()
            .parse::<u8>()
            .map_err(|err| format!("failed to parse '{}' as an answer value ({err})", token.trim()))?;
        let value = AnswerValue::try_from(points).map_err(|err| err.to_string())?;
        let question_id = QuestionId::new(index as u8 + 1)
            .ok_or_else(|| format!("question index {} out of range", index + 1))?;

        answers.push(Answer { question_id, value });
    }

    Ok(answers)
}
