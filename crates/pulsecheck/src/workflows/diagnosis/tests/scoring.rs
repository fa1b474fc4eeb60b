use super::common::*;
use crate::workflows::diagnosis::domain::Axis;
use crate::workflows::diagnosis::questionnaire::Questionnaire;

#[test]
fn questionnaire_assigns_three_questions_per_axis() {
    let questionnaire = Questionnaire::standard();

    for axis in Axis::ALL {
        assert_eq!(questionnaire.questions_for(axis).count(), 3);
    }
    assert_eq!(questionnaire.axis_for(question(1)), Axis::Strategy);
    assert_eq!(questionnaire.axis_for(question(6)), Axis::Production);
    assert_eq!(questionnaire.axis_for(question(9)), Axis::Improvement);
    assert_eq!(questionnaire.axis_for(question(12)), Axis::Continuity);
    assert!(!questionnaire.prompt(question(5)).is_empty());
}

#[test]
fn axis_scores_follow_question_groups() {
    // Q1-3 strategy 8+6+3=17 -> 71, Q4-6 production 24 -> 100,
    // Q7-9 improvement 18 -> 75, Q10-12 continuity 9 -> 38.
    let answers = answers([8, 6, 3, 8, 8, 8, 6, 6, 6, 3, 3, 3]);

    let result = engine().classify(&answers);

    assert_eq!(result.raw_scores.strategy, 17);
    assert_eq!(result.raw_scores.production, 24);
    assert_eq!(result.raw_scores.improvement, 18);
    assert_eq!(result.raw_scores.continuity, 9);
    assert_eq!(result.normalized_scores.strategy, 71);
    assert_eq!(result.normalized_scores.production, 100);
    assert_eq!(result.normalized_scores.improvement, 75);
    assert_eq!(result.normalized_scores.continuity, 38);
    assert_eq!(result.total_score, 71);
}

#[test]
fn all_zero_answers_score_zero_everywhere() {
    let result = engine().classify(&answers([0; 12]));

    assert_eq!(result.raw_scores.values(), [0, 0, 0, 0]);
    assert_eq!(result.normalized_scores.values(), [0, 0, 0, 0]);
    assert_eq!(result.total_score, 0);
    assert!(result.is_zero_score);
}

#[test]
fn all_top_answers_score_one_hundred_everywhere() {
    let result = engine().classify(&answers([8; 12]));

    assert_eq!(result.normalized_scores.values(), [100, 100, 100, 100]);
    assert_eq!(result.total_score, 100);
    assert!(result.is_excellent);
}

#[test]
fn normalization_rounds_half_up() {
    // strategy 8+8+6=22 -> 91.67 -> 92; continuity 3+3+3=9 -> 37.5 -> 38.
    let result = engine().classify(&answers([8, 8, 6, 8, 8, 8, 8, 8, 8, 3, 3, 3]));

    assert_eq!(result.normalized_scores.strategy, 92);
    assert_eq!(result.normalized_scores.continuity, 38);
}

#[test]
fn total_score_averages_the_four_axes() {
    // (100 + 75 + 38 + 0) / 4 = 53.25 -> 53.
    let result = engine().classify(&answers([8, 8, 8, 6, 6, 6, 3, 3, 3, 0, 0, 0]));

    assert_eq!(result.total_score, 53);
}

#[test]
fn missing_answers_default_to_zero() {
    let answers = vec![
        answer(1, 8),
        answer(2, 8),
        answer(3, 8),
        answer(4, 8),
        answer(5, 8),
        answer(6, 8),
    ];

    let result = engine().classify(&answers);

    assert_eq!(result.normalized_scores.strategy, 100);
    assert_eq!(result.normalized_scores.production, 100);
    assert_eq!(result.normalized_scores.improvement, 0);
    assert_eq!(result.normalized_scores.continuity, 0);
    assert!(!result.is_zero_score);
}

#[test]
fn answer_order_does_not_matter() {
    let shuffled = vec![
        answer(12, 8),
        answer(1, 0),
        answer(6, 6),
        answer(3, 3),
        answer(9, 8),
        answer(2, 0),
        answer(11, 8),
        answer(4, 6),
        answer(7, 8),
        answer(5, 6),
        answer(8, 8),
        answer(10, 8),
    ];

    let result = engine().classify(&shuffled);

    assert_eq!(result.normalized_scores.strategy, 13);
    assert_eq!(result.normalized_scores.production, 75);
    assert_eq!(result.normalized_scores.improvement, 100);
    assert_eq!(result.normalized_scores.continuity, 100);
    assert_eq!(result.lowest_axis, Axis::Strategy);
}

#[test]
fn repeated_question_keeps_the_last_value() {
    let duplicated = vec![answer(1, 8), answer(1, 3)];

    let result = engine().classify(&duplicated);

    assert_eq!(result.raw_scores.strategy, 3);
}

#[test]
fn empty_submission_is_a_zero_score() {
    let result = engine().classify(&[]);

    assert!(result.is_zero_score);
    assert_eq!(result.total_score, 0);
}
