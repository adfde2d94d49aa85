//! Grading engine.
//!
//! Turns each question's input into a [`Verdict`] and [`Points`], and sums a
//! whole quiz into a [`ScoreSummary`]. Grading is stateless: every pass
//! recomputes verdicts from the current input only.

use crate::model::{Question, QuestionKind, Quiz, Verdict};
use crate::normalize::normalize_text;
use crate::report::{CheckResult, ScoreSummary};
use crate::scoring::{CheckboxPolicy, Points};
use crate::traits::{NoopObserver, QuizObserver};

/// Grades questions under a checkbox policy.
#[derive(Debug, Clone, Copy, Default)]
pub struct Grader {
    policy: CheckboxPolicy,
}

impl Grader {
    pub fn new(policy: CheckboxPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &CheckboxPolicy {
        &self.policy
    }

    /// Whether the question has any input at all. Not the same as correct.
    pub fn is_answered(&self, question: &Question) -> bool {
        match &question.kind {
            QuestionKind::Text => !normalize_text(question.input.text()).is_empty(),
            QuestionKind::Radio | QuestionKind::Checkbox => !question.input.selected().is_empty(),
            QuestionKind::Unsupported(_) => false,
        }
    }

    /// Grade one question and overwrite its verdict.
    ///
    /// Unsupported kinds are worth zero and keep their verdict.
    pub fn grade_question(&self, question: &mut Question) -> Points {
        let points = question.points;

        let (verdict, scored) = match &question.kind {
            QuestionKind::Radio => {
                // Options are mutually exclusive; only the first selection counts.
                let ok = question
                    .input
                    .selected()
                    .first()
                    .is_some_and(|v| !v.is_empty() && *v == question.answer_key);
                binary(ok, points)
            }
            QuestionKind::Text => {
                let typed = normalize_text(question.input.text());
                let ok = !typed.is_empty() && question.accepted_answers().contains(&typed);
                binary(ok, points)
            }
            QuestionKind::Checkbox => {
                let scored = self.policy.score(
                    question.input.selected(),
                    question.answer_tokens(),
                    points,
                );
                let ratio = scored.ratio();
                let verdict = if ratio >= self.policy.correct_threshold {
                    Verdict::Correct
                } else if ratio > 0.0 {
                    Verdict::Partial
                } else {
                    Verdict::Wrong
                };
                (verdict, scored)
            }
            QuestionKind::Unsupported(kind) => {
                tracing::debug!(id = question.id, %kind, "skipping unsupported question");
                return Points::zero(points);
            }
        };

        question.verdict = verdict;
        tracing::debug!(
            id = question.id,
            %verdict,
            earned = scored.earned,
            max = scored.max,
            "graded question"
        );
        scored
    }

    /// Reveal and grade every question, then total the points.
    ///
    /// Unanswered questions grade like any other and score zero.
    pub fn check(&self, questions: &mut [Question], observer: &dyn QuizObserver) -> CheckResult {
        let mut points = Vec::with_capacity(questions.len());
        let mut earned_total = 0.0;
        let mut max_total = 0.0;

        for question in questions.iter_mut() {
            if !question.visible {
                question.visible = true;
                observer.on_reveal(question.id);
            }

            let scored = self.grade_question(question);
            observer.on_verdict(question.id, question.verdict, &scored);
            earned_total += scored.earned;
            max_total += scored.max;
            points.push(scored);
        }

        let summary = ScoreSummary::new(earned_total, max_total);
        tracing::info!(
            earned = summary.earned_total,
            max = summary.max_total,
            percent = summary.percent,
            "quiz checked"
        );
        observer.on_checked(&summary);
        CheckResult { points, summary }
    }

    /// Totals of [`Grader::check`].
    pub fn grade_all(
        &self,
        questions: &mut [Question],
        observer: &dyn QuizObserver,
    ) -> ScoreSummary {
        self.check(questions, observer).summary
    }

    /// Clear every question and hide all but the lowest id.
    pub fn reset(&self, questions: &mut [Question], observer: &dyn QuizObserver) {
        let first = questions.iter().map(|q| q.id).min();
        for question in questions.iter_mut() {
            question.clear();
            question.visible = Some(question.id) == first;
        }
        tracing::info!(questions = questions.len(), "quiz reset");
        observer.on_reset();
    }
}

fn binary(ok: bool, points: f64) -> (Verdict, Points) {
    if ok {
        (Verdict::Correct, Points::new(points, points))
    } else {
        (Verdict::Wrong, Points::zero(points))
    }
}

/// [`Grader::is_answered`] under the default policy.
pub fn is_answered(question: &Question) -> bool {
    Grader::default().is_answered(question)
}

/// [`Grader::grade_question`] under the default policy.
pub fn grade_question(question: &mut Question) -> Points {
    Grader::default().grade_question(question)
}

/// [`Grader::grade_all`] under the default policy, without notifications.
pub fn grade_all(questions: &mut [Question]) -> ScoreSummary {
    Grader::default().grade_all(questions, &NoopObserver)
}

/// [`Grader::reset`] without notifications.
pub fn reset(questions: &mut [Question]) {
    Grader::default().reset(questions, &NoopObserver)
}

impl Quiz {
    /// Grade the whole quiz.
    pub fn check(&mut self, grader: &Grader, observer: &dyn QuizObserver) -> CheckResult {
        grader.check(self.questions_mut(), observer)
    }

    /// Return the quiz to its untouched state.
    pub fn reset(&mut self, observer: &dyn QuizObserver) {
        Grader::default().reset(self.questions_mut(), observer)
    }
}
