use super::domain::{Answer, AnswerSheet, QuestionId};

/// Validation errors raised by the intake guard.
#[derive(Debug, thiserror::Error)]
pub enum IntakeViolation {
    #[error("submission answers {question} more than once")]
    DuplicateQuestion { question: QuestionId },
    #[error("submission carries {count} answers for a twelve-question sheet")]
    TooManyAnswers { count: usize },
}

/// Guard producing a dense answer sheet from an inbound submission.
///
/// The engines themselves tolerate missing and repeated question ids
/// (missing scores zero, the last repeat wins); the guard enforces the
/// stricter contract at the service boundary.
#[derive(Debug, Clone, Copy, Default)]
pub struct IntakeGuard;

impl IntakeGuard {
    pub fn sheet_from_answers(&self, answers: &[Answer]) -> Result<AnswerSheet, IntakeViolation> {
        if answers.len() > QuestionId::COUNT {
            return Err(IntakeViolation::TooManyAnswers {
                count: answers.len(),
            });
        }

        let mut seen = [false; QuestionId::COUNT];
        for answer in answers {
            let slot = &mut seen[answer.question_id.index()];
            if *slot {
                return Err(IntakeViolation::DuplicateQuestion {
                    question: answer.question_id,
                });
            }
            *slot = true;
        }

        Ok(AnswerSheet::from_answers(answers))
    }
}
