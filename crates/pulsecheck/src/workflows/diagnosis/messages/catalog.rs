use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use super::super::domain::{Axis, AxisPair, DiagnosisLabel, QuestionId};
use super::rules::{
    Condition, ConditionField, ConditionGroup, ConditionLogic, ConditionOperator, MessageRule,
    Severity,
};

/// Configuration faults detected while building a catalog. These surface at
/// load time, never during a scoring call.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("no headline message configured for label '{label}'")]
    MissingHeadline { label: DiagnosisLabel },
    #[error("rule '{rule_id}' has an empty condition group")]
    EmptyConditions { rule_id: String },
    #[error("rule id '{rule_id}' is defined more than once")]
    DuplicateRuleId { rule_id: String },
}

/// Static message configuration: exactly one headline per label plus the
/// ordered callout rules. Validated on construction and read-only
/// afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MessageCatalog {
    version: String,
    headlines: BTreeMap<DiagnosisLabel, String>,
    rules: Vec<MessageRule>,
}

impl MessageCatalog {
    pub fn new(
        version: impl Into<String>,
        headlines: BTreeMap<DiagnosisLabel, String>,
        rules: Vec<MessageRule>,
    ) -> Result<Self, CatalogError> {
        for label in DiagnosisLabel::all() {
            if !headlines.contains_key(&label) {
                return Err(CatalogError::MissingHeadline { label });
            }
        }

        let mut seen = BTreeSet::new();
        for rule in &rules {
            if rule.conditions.conditions.is_empty() {
                return Err(CatalogError::EmptyConditions {
                    rule_id: rule.id.clone(),
                });
            }
            if !seen.insert(rule.id.clone()) {
                return Err(CatalogError::DuplicateRuleId {
                    rule_id: rule.id.clone(),
                });
            }
        }

        Ok(Self {
            version: version.into(),
            headlines,
            rules,
        })
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn headline(&self, label: DiagnosisLabel) -> &str {
        self.headlines
            .get(&label)
            .map(String::as_str)
            .expect("headline table validated at construction")
    }

    pub fn rules(&self) -> &[MessageRule] {
        &self.rules
    }

    /// Built-in catalog shipped with the service.
    pub fn standard() -> Self {
        let mut headlines = BTreeMap::new();
        headlines.insert(
            DiagnosisLabel::Beginner,
            "You are at the starting line with every direction still open. Build the first small piece of structure and grow from there.".to_string(),
        );
        headlines.insert(
            DiagnosisLabel::Balanced,
            "Excellent work. Your operation is strong on all four axes; keep the improvement loop turning.".to_string(),
        );
        headlines.insert(
            DiagnosisLabel::Weakness(Axis::Strategy),
            "Who you are posting for has not been pinned down yet. Start with audience targeting.".to_string(),
        );
        headlines.insert(
            DiagnosisLabel::Weakness(Axis::Production),
            "The drive is there but the production system is not. Templates and habits will make this lighter.".to_string(),
        );
        headlines.insert(
            DiagnosisLabel::Weakness(Axis::Improvement),
            "Effort is going in but not converting into results. Close the review loop to change that.".to_string(),
        );
        headlines.insert(
            DiagnosisLabel::Weakness(Axis::Continuity),
            "Right now the operation only works when you push. With a routine in place it runs without the strain.".to_string(),
        );
        headlines.insert(
            mixed(Axis::Strategy, Axis::Production),
            "Strategy and production are both running low. Start with audience targeting and a reusable template.".to_string(),
        );
        headlines.insert(
            mixed(Axis::Strategy, Axis::Improvement),
            "Strategy and improvement are both running low. Pin down the audience and establish a review loop.".to_string(),
        );
        headlines.insert(
            mixed(Axis::Strategy, Axis::Continuity),
            "Strategy and continuity are both running low. Set the direction first, then build the routine that keeps you moving.".to_string(),
        );
        headlines.insert(
            mixed(Axis::Production, Axis::Improvement),
            "Production and improvement are both running low. Put a template and a review loop in place together.".to_string(),
        );
        headlines.insert(
            mixed(Axis::Production, Axis::Continuity),
            "Production and continuity are both running low. You need a sustainable routine and a reusable format.".to_string(),
        );
        headlines.insert(
            mixed(Axis::Improvement, Axis::Continuity),
            "Improvement and continuity are both running low. Check what works and build the routine that repeats it.".to_string(),
        );

        let rules = vec![
            question_rule(
                "q6-zero",
                100.0,
                Severity::Critical,
                6,
                0,
                "Without a template or a content stock, every post is built from scratch and drains time.",
            ),
            question_rule(
                "q7-zero",
                95.0,
                Severity::Critical,
                7,
                0,
                "No review loop exists yet, so effort is not compounding into results.",
            ),
            question_rule(
                "q10-zero",
                95.0,
                Severity::Critical,
                10,
                0,
                "Without a fixed posting routine, every session starts with hesitation and consistency suffers.",
            ),
            question_rule(
                "q6-low",
                85.0,
                Severity::Standard,
                6,
                3,
                "Drafting still takes longer than it should. Templating the format can cut the time in half.",
            ),
            question_rule(
                "q8-zero",
                80.0,
                Severity::Critical,
                8,
                0,
                "Wins cannot be explained yet, so results depend on luck rather than repetition.",
            ),
            question_rule(
                "q9-zero",
                75.0,
                Severity::Standard,
                9,
                0,
                "Successes are not being reproduced, so results stay unstable.",
            ),
            question_rule(
                "q11-zero",
                100.0,
                Severity::Critical,
                11,
                0,
                "There is no setup that carries posting through busy days, so each one starts from zero. Build one repeatable flow first.",
            ),
            question_rule(
                "q12-zero",
                90.0,
                Severity::Critical,
                12,
                0,
                "The operation runs on willpower, which makes it hard to sustain.",
            ),
        ];

        Self::new("1.0.0", headlines, rules).expect("standard catalog covers every label")
    }
}

fn mixed(a: Axis, b: Axis) -> DiagnosisLabel {
    DiagnosisLabel::Mixed(AxisPair::new(a, b).expect("distinct axes"))
}

fn question_rule(
    id: &str,
    base_priority: f64,
    severity: Severity,
    question: u8,
    points: i16,
    text: &str,
) -> MessageRule {
    MessageRule {
        id: id.to_string(),
        base_priority,
        severity,
        conditions: ConditionGroup {
            logic: ConditionLogic::And,
            conditions: vec![Condition {
                field: ConditionField::Question(
                    QuestionId::new(question).expect("catalog question id in range"),
                ),
                operator: ConditionOperator::Equals,
                value: points,
            }],
        },
        text: text.to_string(),
        enabled: true,
    }
}
