//! Quiz structure errors.
//!
//! Grading itself never fails; these cover authored content the loader
//! cannot turn into a consistent quiz.

use thiserror::Error;

use crate::model::QuestionId;

/// Errors raised while assembling a quiz or applying answers to it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuizError {
    /// Two questions share an id.
    #[error("duplicate question id: {0}")]
    DuplicateQuestion(QuestionId),

    /// Question ids start at 1.
    #[error("question ids must be positive")]
    ZeroQuestionId,

    /// An answer refers to a question the quiz does not have.
    #[error("unknown question id: {0}")]
    UnknownQuestion(QuestionId),

    /// An answers table key is not a question number.
    #[error("invalid question id in answers: '{0}'")]
    InvalidQuestionId(String),
}
