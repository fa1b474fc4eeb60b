use super::common::*;
use crate::workflows::diagnosis::domain::AssessmentId;
use crate::workflows::diagnosis::repository::{DiagnosisRepository, RepositoryError};
use crate::workflows::diagnosis::{
    DiagnosisServiceError, IntakeViolation, COMPLETED_EVENT,
};

#[test]
fn submit_stores_the_record_and_publishes_the_event() {
    let (service, repository, events) = build_service();

    let record = service
        .submit(answers([8, 6, 3, 8, 8, 8, 6, 6, 6, 3, 3, 3]))
        .expect("submission succeeds");

    assert_eq!(record.result.total_score, 71);
    assert!(!record.messages.is_empty());

    let stored = repository
        .fetch(&record.assessment_id)
        .expect("repository reachable")
        .expect("record stored");
    assert_eq!(stored.result, record.result);

    let published = events.events();
    assert_eq!(published.len(), 1);
    assert_eq!(published[0].name, COMPLETED_EVENT);
    assert_eq!(published[0].assessment_id, record.assessment_id);
    assert_eq!(
        published[0].details.get("total_score").map(String::as_str),
        Some("71")
    );
}

#[test]
fn submissions_receive_distinct_ids() {
    let (service, _, _) = build_service();

    let first = service.submit(answers([6; 12])).expect("first succeeds");
    let second = service.submit(answers([6; 12])).expect("second succeeds");

    assert_ne!(first.assessment_id, second.assessment_id);
}

#[test]
fn preview_does_not_persist_or_publish() {
    let (service, repository, events) = build_service();

    let (result, messages) = service
        .preview(&answers([3; 12]))
        .expect("preview succeeds");

    assert_eq!(result.total_score, 38);
    assert!(!messages.is_empty());
    assert!(repository.recent(10).expect("repository reachable").is_empty());
    assert!(events.events().is_empty());
}

#[test]
fn submit_rejects_duplicate_answers() {
    let (service, repository, _) = build_service();

    let error = service
        .submit(vec![answer(1, 8), answer(1, 6)])
        .expect_err("duplicates must fail");

    assert!(matches!(
        error,
        DiagnosisServiceError::Intake(IntakeViolation::DuplicateQuestion { .. })
    ));
    assert!(repository.recent(10).expect("repository reachable").is_empty());
}

#[test]
fn get_unknown_assessment_is_not_found() {
    let (service, _, _) = build_service();

    let error = service
        .get(&AssessmentId("diag-missing".to_string()))
        .expect_err("missing record must fail");

    assert!(matches!(
        error,
        DiagnosisServiceError::Repository(RepositoryError::NotFound)
    ));
}

#[test]
fn repository_failures_propagate() {
    use crate::workflows::diagnosis::messages::MessageCatalog;
    use crate::workflows::diagnosis::questionnaire::Questionnaire;
    use crate::workflows::diagnosis::DiagnosisService;
    use std::sync::Arc;

    let service = DiagnosisService::new(
        Arc::new(UnavailableRepository),
        Arc::new(MemoryEvents::default()),
        MessageCatalog::standard(),
        Questionnaire::standard(),
    );

    let error = service
        .submit(answers([6; 12]))
        .expect_err("offline repository must fail");

    assert!(matches!(
        error,
        DiagnosisServiceError::Repository(RepositoryError::Unavailable(_))
    ));
}
