use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier wrapper for stored assessments.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AssessmentId(pub String);

/// Question identifier, restricted to the twelve-question sheet.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "u8", into = "u8")]
pub struct QuestionId(u8);

#[derive(Debug, thiserror::Error)]
#[error("question id must fall within 1..=12, got {0}")]
pub struct InvalidQuestionId(pub u8);

impl QuestionId {
    pub const COUNT: usize = 12;

    pub const fn new(raw: u8) -> Option<Self> {
        if raw >= 1 && raw <= Self::COUNT as u8 {
            Some(Self(raw))
        } else {
            None
        }
    }

    pub const fn get(self) -> u8 {
        self.0
    }

    pub(crate) const fn index(self) -> usize {
        (self.0 - 1) as usize
    }

    pub fn all() -> impl Iterator<Item = Self> {
        (1..=Self::COUNT as u8).map(Self)
    }
}

impl TryFrom<u8> for QuestionId {
    type Error = InvalidQuestionId;

    fn try_from(raw: u8) -> Result<Self, Self::Error> {
        Self::new(raw).ok_or(InvalidQuestionId(raw))
    }
}

impl From<QuestionId> for u8 {
    fn from(id: QuestionId) -> Self {
        id.0
    }
}

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Q{}", self.0)
    }
}

/// Weighted answer option. Every question offers the same four choices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum AnswerValue {
    NotYet = 0,
    Sometimes = 3,
    Mostly = 6,
    Consistently = 8,
}

impl AnswerValue {
    pub const MAX_POINTS: u8 = 8;

    pub const fn points(self) -> u8 {
        self as u8
    }
}

#[derive(Debug, thiserror::Error)]
#[error("answer value must be one of 0, 3, 6, or 8, got {0}")]
pub struct InvalidAnswerValue(pub u8);

impl TryFrom<u8> for AnswerValue {
    type Error = InvalidAnswerValue;

    fn try_from(raw: u8) -> Result<Self, Self::Error> {
        match raw {
            0 => Ok(Self::NotYet),
            3 => Ok(Self::Sometimes),
            6 => Ok(Self::Mostly),
            8 => Ok(Self::Consistently),
            other => Err(InvalidAnswerValue(other)),
        }
    }
}

impl From<AnswerValue> for u8 {
    fn from(value: AnswerValue) -> Self {
        value.points()
    }
}

/// A single submitted answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer {
    pub question_id: QuestionId,
    pub value: AnswerValue,
}

/// The four scoring axes, three questions each.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Axis {
    Strategy,
    Production,
    Improvement,
    Continuity,
}

impl Axis {
    pub const ALL: [Axis; 4] = [
        Axis::Strategy,
        Axis::Production,
        Axis::Improvement,
        Axis::Continuity,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Axis::Strategy => "strategy",
            Axis::Production => "production",
            Axis::Improvement => "improvement",
            Axis::Continuity => "continuity",
        }
    }

    pub const fn display_name(self) -> &'static str {
        match self {
            Axis::Strategy => "Strategy",
            Axis::Production => "Production",
            Axis::Improvement => "Improvement",
            Axis::Continuity => "Continuity",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|axis| axis.label() == label)
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Unordered pair of distinct axes backing the mixed labels. The pair is
/// stored in canonical axis order regardless of construction order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AxisPair {
    first: Axis,
    second: Axis,
}

impl AxisPair {
    pub fn new(a: Axis, b: Axis) -> Option<Self> {
        match a.cmp(&b) {
            std::cmp::Ordering::Less => Some(Self { first: a, second: b }),
            std::cmp::Ordering::Greater => Some(Self { first: b, second: a }),
            std::cmp::Ordering::Equal => None,
        }
    }

    pub const fn axes(self) -> (Axis, Axis) {
        (self.first, self.second)
    }
}

/// Scores keyed by axis. The same shape carries raw sums (0-24) and
/// normalized scores (0-100).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AxisScores {
    pub strategy: u8,
    pub production: u8,
    pub improvement: u8,
    pub continuity: u8,
}

impl AxisScores {
    pub const fn get(&self, axis: Axis) -> u8 {
        match axis {
            Axis::Strategy => self.strategy,
            Axis::Production => self.production,
            Axis::Improvement => self.improvement,
            Axis::Continuity => self.continuity,
        }
    }

    pub fn set(&mut self, axis: Axis, score: u8) {
        match axis {
            Axis::Strategy => self.strategy = score,
            Axis::Production => self.production = score,
            Axis::Improvement => self.improvement = score,
            Axis::Continuity => self.continuity = score,
        }
    }

    pub fn add(&mut self, axis: Axis, points: u8) {
        self.set(axis, self.get(axis) + points);
    }

    pub const fn values(&self) -> [u8; 4] {
        [
            self.strategy,
            self.production,
            self.improvement,
            self.continuity,
        ]
    }

    pub fn iter(&self) -> impl Iterator<Item = (Axis, u8)> + '_ {
        Axis::ALL.into_iter().map(|axis| (axis, self.get(axis)))
    }
}

/// Closed set of diagnosis outcomes: one zero-state label, one excellent
/// label, four single-weakness labels, and six mixed labels.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub enum DiagnosisLabel {
    Beginner,
    Balanced,
    Weakness(Axis),
    Mixed(AxisPair),
}

#[derive(Debug, thiserror::Error)]
#[error("unknown diagnosis label code '{0}'")]
pub struct InvalidLabelCode(pub String);

impl DiagnosisLabel {
    pub const COUNT: usize = 12;

    /// Every label in the closed variant set, in a stable order.
    pub fn all() -> impl Iterator<Item = Self> {
        let weaknesses = Axis::ALL.into_iter().map(Self::Weakness);
        let mixes = Axis::ALL.into_iter().enumerate().flat_map(|(i, a)| {
            Axis::ALL
                .into_iter()
                .skip(i + 1)
                .filter_map(move |b| AxisPair::new(a, b))
                .map(Self::Mixed)
        });
        [Self::Beginner, Self::Balanced]
            .into_iter()
            .chain(weaknesses)
            .chain(mixes)
    }

    pub fn code(self) -> String {
        match self {
            Self::Beginner => "beginner".to_string(),
            Self::Balanced => "balanced".to_string(),
            Self::Weakness(axis) => axis.label().to_string(),
            Self::Mixed(pair) => {
                let (first, second) = pair.axes();
                format!("{}_{}", first.label(), second.label())
            }
        }
    }

    pub fn parse(code: &str) -> Result<Self, InvalidLabelCode> {
        match code {
            "beginner" => return Ok(Self::Beginner),
            "balanced" => return Ok(Self::Balanced),
            _ => {}
        }

        if let Some((left, right)) = code.split_once('_') {
            let first = Axis::from_label(left);
            let second = Axis::from_label(right);
            if let (Some(first), Some(second)) = (first, second) {
                if let Some(pair) = AxisPair::new(first, second) {
                    return Ok(Self::Mixed(pair));
                }
            }
            return Err(InvalidLabelCode(code.to_string()));
        }

        Axis::from_label(code)
            .map(Self::Weakness)
            .ok_or_else(|| InvalidLabelCode(code.to_string()))
    }
}

impl TryFrom<String> for DiagnosisLabel {
    type Error = InvalidLabelCode;

    fn try_from(code: String) -> Result<Self, Self::Error> {
        Self::parse(&code)
    }
}

impl From<DiagnosisLabel> for String {
    fn from(label: DiagnosisLabel) -> Self {
        label.code()
    }
}

impl fmt::Display for DiagnosisLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.code())
    }
}

/// Output of the scorer/classifier for one completed sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagnosisResult {
    pub raw_scores: AxisScores,
    pub normalized_scores: AxisScores,
    pub total_score: u8,
    pub label: DiagnosisLabel,
    pub is_zero_score: bool,
    pub is_excellent: bool,
    pub lowest_axis: Axis,
}

/// Dense per-question view of a submission. A question that was never
/// answered scores zero; a question answered twice keeps the last value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AnswerSheet {
    points: [u8; QuestionId::COUNT],
}

impl AnswerSheet {
    pub fn from_answers(answers: &[Answer]) -> Self {
        let mut points = [0u8; QuestionId::COUNT];
        for answer in answers {
            points[answer.question_id.index()] = answer.value.points();
        }
        Self { points }
    }

    pub const fn points(&self, question: QuestionId) -> u8 {
        self.points[question.index()]
    }
}
