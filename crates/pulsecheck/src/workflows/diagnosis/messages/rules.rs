use serde::{Deserialize, Serialize};

use super::super::domain::{AnswerSheet, Axis, DiagnosisResult, QuestionId};

/// Field a condition reads: the overall score, one question's raw answer,
/// or one axis' normalized score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ConditionField {
    TotalScore,
    Question(QuestionId),
    Axis(Axis),
}

#[derive(Debug, thiserror::Error)]
#[error("unknown condition field '{0}'")]
pub struct UnknownConditionField(pub String);

impl ConditionField {
    pub fn code(self) -> String {
        match self {
            Self::TotalScore => "total_score".to_string(),
            Self::Question(question) => format!("q{}", question.get()),
            Self::Axis(axis) => axis.label().to_string(),
        }
    }

    pub fn parse(code: &str) -> Result<Self, UnknownConditionField> {
        if code == "total_score" {
            return Ok(Self::TotalScore);
        }

        if let Some(rest) = code.strip_prefix('q') {
            if let Ok(raw) = rest.parse::<u8>() {
                return QuestionId::new(raw)
                    .map(Self::Question)
                    .ok_or_else(|| UnknownConditionField(code.to_string()));
            }
        }

        Axis::from_label(code)
            .map(Self::Axis)
            .ok_or_else(|| UnknownConditionField(code.to_string()))
    }
}

impl TryFrom<String> for ConditionField {
    type Error = UnknownConditionField;

    fn try_from(code: String) -> Result<Self, Self::Error> {
        Self::parse(&code)
    }
}

impl From<ConditionField> for String {
    fn from(field: ConditionField) -> Self {
        field.code()
    }
}

/// Comparison applied between the resolved field value and the configured
/// threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConditionOperator {
    Equals,
    NotEquals,
    GreaterThan,
    LessThan,
    GreaterThanOrEqual,
    LessThanOrEqual,
}

impl ConditionOperator {
    pub(crate) fn compare(self, left: i16, right: i16) -> bool {
        match self {
            Self::Equals => left == right,
            Self::NotEquals => left != right,
            Self::GreaterThan => left > right,
            Self::LessThan => left < right,
            Self::GreaterThanOrEqual => left >= right,
            Self::LessThanOrEqual => left <= right,
        }
    }
}

/// Single comparison inside a rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Condition {
    pub field: ConditionField,
    pub operator: ConditionOperator,
    pub value: i16,
}

/// How a group combines its conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ConditionLogic {
    And,
    Or,
}

/// Conditions combined under one logic operator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConditionGroup {
    pub logic: ConditionLogic,
    pub conditions: Vec<Condition>,
}

/// Whether a callout may be shown to a respondent in the high band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Standard,
    Critical,
}

/// Declarative callout rule: static configuration, never computed at
/// runtime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageRule {
    pub id: String,
    pub base_priority: f64,
    pub severity: Severity,
    pub conditions: ConditionGroup,
    pub text: String,
    pub enabled: bool,
}

pub(crate) fn field_value(
    field: ConditionField,
    result: &DiagnosisResult,
    sheet: &AnswerSheet,
) -> i16 {
    match field {
        ConditionField::TotalScore => i16::from(result.total_score),
        ConditionField::Question(question) => i16::from(sheet.points(question)),
        ConditionField::Axis(axis) => i16::from(result.normalized_scores.get(axis)),
    }
}

pub(crate) fn condition_holds(
    condition: &Condition,
    result: &DiagnosisResult,
    sheet: &AnswerSheet,
) -> bool {
    condition
        .operator
        .compare(field_value(condition.field, result, sheet), condition.value)
}

pub(crate) fn group_holds(
    group: &ConditionGroup,
    result: &DiagnosisResult,
    sheet: &AnswerSheet,
) -> bool {
    match group.logic {
        ConditionLogic::And => group
            .conditions
            .iter()
            .all(|condition| condition_holds(condition, result, sheet)),
        ConditionLogic::Or => group
            .conditions
            .iter()
            .any(|condition| condition_holds(condition, result, sheet)),
    }
}
