//! quizmark-core: grading engine, scoring and quiz loading.
//!
//! This crate defines the question model, the text normalizer and checkbox
//! scorer, and the grading engine that turns user input into verdicts and a
//! total score.

pub mod config;
pub mod engine;
pub mod error;
pub mod model;
pub mod normalize;
pub mod parser;
pub mod report;
pub mod reveal;
pub mod scoring;
pub mod traits;

pub use engine::{grade_all, grade_question, is_answered, reset, Grader};
pub use error::QuizError;
pub use model::{Question, QuestionId, QuestionKind, Quiz, UserInput, Verdict};
pub use normalize::normalize_text;
pub use report::{CheckResult, GradeReport, ScoreSummary};
pub use reveal::reveal_frontier;
pub use scoring::{score_checkbox, CheckboxPolicy, Points};
pub use traits::{NoopObserver, QuizObserver};
