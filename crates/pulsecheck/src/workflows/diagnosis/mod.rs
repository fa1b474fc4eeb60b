//! Assessment intake, scoring, and feedback selection for the
//! twelve-question creator operations questionnaire.
//!
//! The scorer and the message engine are pure, synchronous computations:
//! each call operates on its own inputs plus read-only configuration (the
//! questionnaire and the message catalog), so concurrent scoring needs no
//! synchronization.

pub mod domain;
mod intake;
pub mod messages;
pub mod questionnaire;
pub mod repository;
pub mod router;
mod scoring;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    Answer, AnswerSheet, AnswerValue, AssessmentId, Axis, AxisPair, AxisScores, DiagnosisLabel,
    DiagnosisResult, InvalidAnswerValue, InvalidLabelCode, InvalidQuestionId, QuestionId,
};
pub use intake::{IntakeGuard, IntakeViolation};
pub use messages::{
    CatalogError, Condition, ConditionField, ConditionGroup, ConditionLogic, ConditionOperator,
    MessageCatalog, MessageEngine, MessageRule, ScoreBand, Severity, UnknownConditionField,
};
pub use questionnaire::Questionnaire;
pub use repository::{
    AnalyticsEvent, DiagnosisRecord, DiagnosisRepository, DiagnosisView, EventError,
    EventPublisher, RepositoryError,
};
pub use router::{diagnosis_router, DiagnosisRequest};
pub use scoring::{DiagnosisEngine, AXIS_RAW_MAX, EXCELLENT_FLOOR};
pub use service::{DiagnosisService, DiagnosisServiceError, COMPLETED_EVENT};
