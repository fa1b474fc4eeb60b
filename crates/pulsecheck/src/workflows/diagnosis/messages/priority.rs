use super::super::domain::{AnswerSheet, AnswerValue, DiagnosisResult};
use super::super::questionnaire::Questionnaire;
use super::rules::{ConditionField, MessageRule};

const QUESTION_DEFICIT_WEIGHT: f64 = 3.0;
const AXIS_DEFICIT_WEIGHT: f64 = 0.1;

/// Boost a rule's configured priority by how far below target the answers
/// behind its question conditions actually are. Rules without question
/// conditions keep their base priority.
pub(crate) fn adjusted_priority(
    rule: &MessageRule,
    result: &DiagnosisResult,
    sheet: &AnswerSheet,
    questionnaire: &Questionnaire,
) -> f64 {
    let mut question_deficit = 0.0;
    let mut axis_deficit = 0.0;
    let mut question_conditions = 0usize;

    for condition in &rule.conditions.conditions {
        if let ConditionField::Question(question) = condition.field {
            question_deficit += f64::from(AnswerValue::MAX_POINTS - sheet.points(question));
            let axis = questionnaire.axis_for(question);
            axis_deficit += f64::from(100 - result.normalized_scores.get(axis));
            question_conditions += 1;
        }
    }

    if question_conditions == 0 {
        return rule.base_priority;
    }

    let count = question_conditions as f64;
    rule.base_priority
        + QUESTION_DEFICIT_WEIGHT * (question_deficit / count)
        + AXIS_DEFICIT_WEIGHT * (axis_deficit / count)
}
