use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::domain::{Answer, AssessmentId, AxisScores, DiagnosisLabel, DiagnosisResult};

/// Repository record for one stored assessment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagnosisRecord {
    pub assessment_id: AssessmentId,
    pub answers: Vec<Answer>,
    pub result: DiagnosisResult,
    pub messages: Vec<String>,
    pub submitted_at: DateTime<Utc>,
}

impl DiagnosisRecord {
    pub fn view(&self) -> DiagnosisView {
        DiagnosisView {
            assessment_id: self.assessment_id.clone(),
            label: self.result.label,
            total_score: self.result.total_score,
            normalized_scores: self.result.normalized_scores,
            messages: self.messages.clone(),
            submitted_at: self.submitted_at,
        }
    }
}

/// Storage abstraction so the service module can be exercised in isolation.
pub trait DiagnosisRepository: Send + Sync {
    fn insert(&self, record: DiagnosisRecord) -> Result<DiagnosisRecord, RepositoryError>;
    fn fetch(&self, id: &AssessmentId) -> Result<Option<DiagnosisRecord>, RepositoryError>;
    fn recent(&self, limit: usize) -> Result<Vec<DiagnosisRecord>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Trait describing outbound analytics hooks fired when an assessment
/// completes.
pub trait EventPublisher: Send + Sync {
    fn publish(&self, event: AnalyticsEvent) -> Result<(), EventError>;
}

/// Event payload so routes/tests can assert integration boundaries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyticsEvent {
    pub name: String,
    pub assessment_id: AssessmentId,
    pub details: BTreeMap<String, String>,
}

/// Event dispatch error.
#[derive(Debug, thiserror::Error)]
pub enum EventError {
    #[error("event transport unavailable: {0}")]
    Transport(String),
}

/// Client-facing projection of a stored assessment.
#[derive(Debug, Clone, Serialize)]
pub struct DiagnosisView {
    pub assessment_id: AssessmentId,
    pub label: DiagnosisLabel,
    pub total_score: u8,
    pub normalized_scores: AxisScores,
    pub messages: Vec<String>,
    pub submitted_at: DateTime<Utc>,
}
