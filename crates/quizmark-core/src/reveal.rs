//! Progressive reveal.
//!
//! A quiz starts with only its first question visible. Answering a visible
//! question reveals the next one; nothing is hidden again until a reset.

use crate::engine::Grader;
use crate::error::QuizError;
use crate::model::{Question, QuestionId, Quiz, UserInput};
use crate::traits::QuizObserver;

impl Grader {
    /// Highest question id that should be visible for the given inputs.
    ///
    /// Every question up to and including the first unanswered one (in id
    /// order) is visible. `None` for an empty slice.
    pub fn reveal_frontier(&self, questions: &[Question]) -> Option<QuestionId> {
        let mut ordered: Vec<&Question> = questions.iter().collect();
        ordered.sort_by_key(|q| q.id);

        ordered
            .iter()
            .find(|q| !self.is_answered(q))
            .or(ordered.last())
            .map(|q| q.id)
    }
}

/// [`Grader::reveal_frontier`] with the default grader.
pub fn reveal_frontier(questions: &[Question]) -> Option<QuestionId> {
    Grader::default().reveal_frontier(questions)
}

impl Quiz {
    /// Store the user's input for a question, revealing the next question
    /// if this one is visible and now answered.
    ///
    /// Input on a hidden question is stored but reveals nothing.
    ///
    /// Returns the id of the question that became visible, if any.
    pub fn record_input(
        &mut self,
        id: QuestionId,
        input: UserInput,
        grader: &Grader,
        observer: &dyn QuizObserver,
    ) -> Result<Option<QuestionId>, QuizError> {
        let question = self
            .question_mut(id)
            .ok_or(QuizError::UnknownQuestion(id))?;
        question.input = input;
        if !question.visible || !grader.is_answered(question) {
            return Ok(None);
        }

        let Some(next) = id.checked_add(1).and_then(|n| self.question_mut(n)) else {
            return Ok(None);
        };
        if next.visible {
            return Ok(None);
        }
        next.visible = true;
        tracing::debug!(id = next.id, "question revealed");
        observer.on_reveal(next.id);
        Ok(Some(next.id))
    }

    /// Ids of the currently visible questions, in order.
    pub fn visible_ids(&self) -> Vec<QuestionId> {
        self.questions()
            .iter()
            .filter(|q| q.visible)
            .map(|q| q.id)
            .collect()
    }
}
