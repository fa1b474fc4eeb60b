mod label;

use super::domain::{Answer, AnswerSheet, AxisScores, DiagnosisResult, QuestionId};
use super::questionnaire::Questionnaire;

/// Points available per axis: three questions, eight points each.
pub const AXIS_RAW_MAX: u8 = 24;

/// Every normalized score at or above this floor marks the excellent
/// special case.
pub const EXCELLENT_FLOOR: u8 = 85;

/// Stateless scorer applying the questionnaire assignment table to an
/// answer sheet.
pub struct DiagnosisEngine {
    questionnaire: Questionnaire,
}

impl DiagnosisEngine {
    pub fn new(questionnaire: Questionnaire) -> Self {
        Self { questionnaire }
    }

    pub fn questionnaire(&self) -> &Questionnaire {
        &self.questionnaire
    }

    /// Score and classify a submission. Total over any input: unanswered
    /// questions score zero, a repeated question id keeps its last value.
    pub fn classify(&self, answers: &[Answer]) -> DiagnosisResult {
        self.classify_sheet(&AnswerSheet::from_answers(answers))
    }

    pub fn classify_sheet(&self, sheet: &AnswerSheet) -> DiagnosisResult {
        let raw_scores = self.aggregate(sheet);
        let normalized_scores = normalize(&raw_scores);
        let total_score = total(&normalized_scores);

        let is_zero_score = raw_scores.values().into_iter().all(|score| score == 0);
        let is_excellent = normalized_scores
            .values()
            .into_iter()
            .all(|score| score >= EXCELLENT_FLOOR);

        let lowest_axis = label::lowest_axis(&raw_scores, &normalized_scores);
        let label = label::assign(&normalized_scores, lowest_axis, is_zero_score, is_excellent);

        DiagnosisResult {
            raw_scores,
            normalized_scores,
            total_score,
            label,
            is_zero_score,
            is_excellent,
            lowest_axis,
        }
    }

    fn aggregate(&self, sheet: &AnswerSheet) -> AxisScores {
        let mut scores = AxisScores::default();
        for question in QuestionId::all() {
            scores.add(self.questionnaire.axis_for(question), sheet.points(question));
        }
        scores
    }
}

fn normalize(raw: &AxisScores) -> AxisScores {
    let mut normalized = AxisScores::default();
    for (axis, score) in raw.iter() {
        normalized.set(axis, scale(score));
    }
    normalized
}

fn scale(raw: u8) -> u8 {
    ((f64::from(raw) / f64::from(AXIS_RAW_MAX)) * 100.0).round() as u8
}

fn total(normalized: &AxisScores) -> u8 {
    let sum: u16 = normalized.values().into_iter().map(u16::from).sum();
    (f64::from(sum) / 4.0).round() as u8
}
