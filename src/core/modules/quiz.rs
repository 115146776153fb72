//! Multiple-choice quiz: select → check → advance, one question at a time.

use log::debug;

use super::{ModuleKind, ModuleSignal, Reward, Runner};
use crate::core::content::Question;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizInput {
    Select(usize),
    Check,
    Advance,
}

/// Outcome of the last check, shown until the learner advances.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Correct,
    Wrong,
}

#[derive(Debug, Clone, PartialEq)]
pub struct QuizRunner {
    questions: Vec<Question>,
    current_index: usize,
    selected: Option<usize>,
    checked: bool,
    score: u32,
    verdict: Option<Verdict>,
    finished: bool,
}

impl QuizRunner {
    /// `questions` must not be empty; `LessonModule::start` guarantees it.
    pub fn new(questions: Vec<Question>) -> Self {
        Self {
            questions,
            current_index: 0,
            selected: None,
            checked: false,
            score: 0,
            verdict: None,
            finished: false,
        }
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn current(&self) -> &Question {
        &self.questions[self.current_index]
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn is_checked(&self) -> bool {
        self.checked
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn verdict(&self) -> Option<Verdict> {
        self.verdict
    }

    /// Fraction of questions already behind the learner.
    pub fn progress(&self) -> f64 {
        if self.questions.is_empty() {
            return 0.0;
        }
        self.current_index as f64 / self.questions.len() as f64
    }
}

impl Runner for QuizRunner {
    type Input = QuizInput;

    fn kind(&self) -> ModuleKind {
        ModuleKind::Quiz
    }

    fn handle(&mut self, input: QuizInput) -> ModuleSignal {
        if self.finished || self.questions.is_empty() {
            return ModuleSignal::Idle;
        }
        match input {
            QuizInput::Select(option) => {
                if !self.checked && option < self.current().options.len() {
                    self.selected = Some(option);
                }
                ModuleSignal::Idle
            }
            QuizInput::Check => {
                let Some(selected) = self.selected else {
                    return ModuleSignal::Idle;
                };
                if self.checked {
                    return ModuleSignal::Idle;
                }
                self.checked = true;
                if selected == self.current().correct_index {
                    self.score += 1;
                    self.verdict = Some(Verdict::Correct);
                } else {
                    self.verdict = Some(Verdict::Wrong);
                }
                debug!(
                    "Quiz question {} checked: {:?}, score {}",
                    self.current_index, self.verdict, self.score
                );
                ModuleSignal::Idle
            }
            QuizInput::Advance => {
                if !self.checked {
                    return ModuleSignal::Idle;
                }
                self.checked = false;
                self.selected = None;
                self.verdict = None;
                if self.current_index + 1 == self.questions.len() {
                    self.finished = true;
                    ModuleSignal::Completed(Reward::Score(self.score))
                } else {
                    self.current_index += 1;
                    ModuleSignal::Idle
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::content::QuestionKind;

    fn q(id: &str, correct_index: usize) -> Question {
        Question {
            id: id.into(),
            text: format!("{id}?"),
            options: vec!["A".into(), "B".into(), "C".into()],
            correct_index,
            kind: QuestionKind::MultipleChoice,
        }
    }

    #[test]
    fn test_one_right_one_wrong_scores_one() {
        let mut quiz = QuizRunner::new(vec![q("1", 0), q("2", 2)]);

        quiz.handle(QuizInput::Select(0));
        quiz.handle(QuizInput::Check);
        assert_eq!(quiz.verdict(), Some(Verdict::Correct));
        assert_eq!(quiz.handle(QuizInput::Advance), ModuleSignal::Idle);

        quiz.handle(QuizInput::Select(1));
        quiz.handle(QuizInput::Check);
        assert_eq!(quiz.verdict(), Some(Verdict::Wrong));
        assert_eq!(
            quiz.handle(QuizInput::Advance),
            ModuleSignal::Completed(Reward::Score(1))
        );
    }

    #[test]
    fn test_check_requires_selection() {
        let mut quiz = QuizRunner::new(vec![q("1", 0)]);
        quiz.handle(QuizInput::Check);
        assert!(!quiz.is_checked());
        assert_eq!(quiz.handle(QuizInput::Advance), ModuleSignal::Idle);
        assert_eq!(quiz.current_index(), 0);
    }

    #[test]
    fn test_select_is_frozen_after_check() {
        let mut quiz = QuizRunner::new(vec![q("1", 1), q("2", 1)]);
        quiz.handle(QuizInput::Select(0));
        quiz.handle(QuizInput::Check);
        quiz.handle(QuizInput::Select(1));
        assert_eq!(quiz.selected(), Some(0));
        // A second check must not re-score.
        quiz.handle(QuizInput::Check);
        assert_eq!(quiz.score(), 0);
    }

    #[test]
    fn test_out_of_range_selection_is_ignored() {
        let mut quiz = QuizRunner::new(vec![q("1", 0)]);
        quiz.handle(QuizInput::Select(7));
        assert_eq!(quiz.selected(), None);
    }

    #[test]
    fn test_score_bounded_by_question_count() {
        let questions: Vec<Question> = (0..5).map(|i| q(&i.to_string(), 1)).collect();
        let mut quiz = QuizRunner::new(questions);
        let mut outcome = ModuleSignal::Idle;
        for _ in 0..5 {
            quiz.handle(QuizInput::Select(1));
            quiz.handle(QuizInput::Check);
            quiz.handle(QuizInput::Check);
            outcome = quiz.handle(QuizInput::Advance);
        }
        assert_eq!(outcome, ModuleSignal::Completed(Reward::Score(5)));
        assert_eq!(quiz.handle(QuizInput::Select(0)), ModuleSignal::Idle);
    }

    #[test]
    fn test_progress_tracks_current_index() {
        let mut quiz = QuizRunner::new(vec![q("1", 0), q("2", 0)]);
        assert_eq!(quiz.progress(), 0.0);
        quiz.handle(QuizInput::Select(0));
        quiz.handle(QuizInput::Check);
        quiz.handle(QuizInput::Advance);
        assert_eq!(quiz.progress(), 0.5);
    }
}
