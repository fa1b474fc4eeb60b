mod catalog;
mod priority;
mod rules;

pub use catalog::{CatalogError, MessageCatalog};
pub use rules::{
    Condition, ConditionField, ConditionGroup, ConditionLogic, ConditionOperator, MessageRule,
    Severity, UnknownConditionField,
};

use serde::{Deserialize, Serialize};

use super::domain::{Answer, AnswerSheet, DiagnosisResult};
use super::questionnaire::Questionnaire;
use priority::adjusted_priority;
use rules::group_holds;

/// Coarse bucket of the total score. The high band suppresses
/// critical-severity callouts: once overall performance is strong, those
/// warnings discourage more than they help.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreBand {
    High,
    Mid,
    Low,
}

impl ScoreBand {
    pub const HIGH_FLOOR: u8 = 80;
    pub const MID_FLOOR: u8 = 60;

    pub fn from_total(total_score: u8) -> Self {
        if total_score >= Self::HIGH_FLOOR {
            Self::High
        } else if total_score >= Self::MID_FLOOR {
            Self::Mid
        } else {
            Self::Low
        }
    }
}

/// Callouts appended after the headline.
const MAX_CALLOUTS: usize = 2;

/// Stateless selector pairing the validated catalog with the
/// questionnaire's question/axis assignment.
pub struct MessageEngine {
    catalog: MessageCatalog,
    questionnaire: Questionnaire,
}

impl MessageEngine {
    pub fn new(catalog: MessageCatalog, questionnaire: Questionnaire) -> Self {
        Self {
            catalog,
            questionnaire,
        }
    }

    pub fn catalog(&self) -> &MessageCatalog {
        &self.catalog
    }

    /// Select the headline plus up to two callouts for a result. The first
    /// entry is always the headline for the result's label.
    pub fn select(&self, result: &DiagnosisResult, answers: &[Answer]) -> Vec<String> {
        self.select_from_sheet(result, &AnswerSheet::from_answers(answers))
    }

    pub fn select_from_sheet(
        &self,
        result: &DiagnosisResult,
        sheet: &AnswerSheet,
    ) -> Vec<String> {
        let band = ScoreBand::from_total(result.total_score);

        let mut matched: Vec<(f64, &MessageRule)> = self
            .catalog
            .rules()
            .iter()
            .filter(|rule| rule.enabled)
            .filter(|rule| group_holds(&rule.conditions, result, sheet))
            .filter(|rule| !(band == ScoreBand::High && rule.severity == Severity::Critical))
            .map(|rule| {
                (
                    adjusted_priority(rule, result, sheet, &self.questionnaire),
                    rule,
                )
            })
            .collect();

        // Stable sort keeps definition order on exact priority ties.
        matched.sort_by(|a, b| b.0.total_cmp(&a.0));

        let mut messages = Vec::with_capacity(1 + MAX_CALLOUTS);
        messages.push(self.catalog.headline(result.label).to_string());
        messages.extend(
            matched
                .iter()
                .take(MAX_CALLOUTS)
                .map(|(_, rule)| rule.text.clone()),
        );
        messages
    }
}
