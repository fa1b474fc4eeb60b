use super::domain::{Axis, QuestionId};

const STANDARD_ASSIGNMENTS: [Axis; QuestionId::COUNT] = [
    Axis::Strategy,
    Axis::Strategy,
    Axis::Strategy,
    Axis::Production,
    Axis::Production,
    Axis::Production,
    Axis::Improvement,
    Axis::Improvement,
    Axis::Improvement,
    Axis::Continuity,
    Axis::Continuity,
    Axis::Continuity,
];

const STANDARD_PROMPTS: [&str; QuestionId::COUNT] = [
    "Can you clearly describe who your posts are meant to reach?",
    "Can you name three changes or insights a follower gains from your content?",
    "Can you state in one line what sets you apart from other creators?",
    "When you sit down to post right now, do topic ideas come without hesitation?",
    "Do you have a template you reuse every time you draft a post?",
    "Can you produce a single post quickly and without it feeling like a burden?",
    "After publishing, do you look at the numbers and ask why a post did well or poorly?",
    "Have you changed an upcoming post based on what the numbers told you?",
    "Do you deliberately try to reproduce the elements of posts that performed?",
    "Does your drafting and publishing follow a fixed routine?",
    "On a busy day, is there a setup that lets you post without stopping to think?",
    "Does posting feel like a natural habit rather than something you push through?",
];

/// Static question catalog: twelve prompts, three per axis. The assignment
/// table is plain data so the question/axis boundary can be tested on its
/// own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Questionnaire {
    assignments: [Axis; QuestionId::COUNT],
    prompts: [&'static str; QuestionId::COUNT],
}

impl Questionnaire {
    pub fn standard() -> Self {
        Self {
            assignments: STANDARD_ASSIGNMENTS,
            prompts: STANDARD_PROMPTS,
        }
    }

    pub fn axis_for(&self, question: QuestionId) -> Axis {
        self.assignments[question.index()]
    }

    pub fn prompt(&self, question: QuestionId) -> &'static str {
        self.prompts[question.index()]
    }

    pub fn questions_for(&self, axis: Axis) -> impl Iterator<Item = QuestionId> + '_ {
        QuestionId::all().filter(move |question| self.axis_for(*question) == axis)
    }
}

impl Default for Questionnaire {
    fn default() -> Self {
        Self::standard()
    }
}
