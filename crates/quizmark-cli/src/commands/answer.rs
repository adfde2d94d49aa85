//! The `quizmark answer` command.

use std::path::PathBuf;

use anyhow::{Context, Result};

use quizmark_core::QuizError;

pub fn execute(quiz_path: PathBuf, question_id: u32) -> Result<()> {
    let quiz = quizmark_core::parser::parse_quiz(&quiz_path)?;
    let question = quiz
        .question(question_id)
        .ok_or(QuizError::UnknownQuestion(question_id))
        .with_context(|| format!("in quiz: {}", quiz_path.display()))?;

    match question.answer_hint() {
        Some(hint) => println!("{hint}"),
        None => println!("No answer text for question {question_id}."),
    }

    Ok(())
}
