//! TOML quiz and answers parser.
//!
//! Loads quizzes from TOML files and directories, answer sheets from TOML
//! files, and validates quizzes for authoring mistakes.

use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::engine::Grader;
use crate::error::QuizError;
use crate::model::{
    coerce_points, sanitize_points, Question, QuestionId, QuestionKind, Quiz, UserInput,
};
use crate::traits::QuizObserver;

/// Intermediate TOML structure for quiz files.
#[derive(Debug, Deserialize)]
struct TomlQuizFile {
    quiz: TomlQuizHeader,
    #[serde(default)]
    questions: Vec<TomlQuestion>,
}

#[derive(Debug, Deserialize)]
struct TomlQuizHeader {
    id: String,
    name: String,
    #[serde(default)]
    description: String,
}

#[derive(Debug, Deserialize)]
struct TomlQuestion {
    id: QuestionId,
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    points: Option<TomlPoints>,
    #[serde(default, alias = "answers", alias = "correct")]
    answer: Option<TomlAnswer>,
    #[serde(default)]
    title: String,
    #[serde(default)]
    reveal: Option<String>,
}

/// Authors write points as numbers or strings.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum TomlPoints {
    Int(i64),
    Float(f64),
    Text(String),
}

impl TomlPoints {
    fn coerce(&self) -> f64 {
        match self {
            TomlPoints::Int(n) => sanitize_points(*n as f64),
            TomlPoints::Float(f) => sanitize_points(*f),
            TomlPoints::Text(s) => coerce_points(Some(s)),
        }
    }
}

/// An answer key is a comma-separated string or a list of tokens.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum TomlAnswer {
    One(String),
    Many(Vec<String>),
}

impl TomlAnswer {
    fn into_key(self) -> String {
        match self {
            TomlAnswer::One(s) => s,
            TomlAnswer::Many(v) => v.join(","),
        }
    }
}

/// Answer sheet file.
#[derive(Debug, Deserialize)]
struct TomlAnswersFile {
    #[serde(default)]
    answers: BTreeMap<String, UserInput>,
}

/// Parse a single TOML file into a `Quiz`.
pub fn parse_quiz(path: &Path) -> Result<Quiz> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read quiz file: {}", path.display()))?;

    parse_quiz_str(&content, path)
}

/// Parse a TOML string into a `Quiz` (useful for testing).
pub fn parse_quiz_str(content: &str, source_path: &Path) -> Result<Quiz> {
    let parsed: TomlQuizFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    let questions = parsed
        .questions
        .into_iter()
        .map(|q| {
            let mut question = Question::new(
                q.id,
                QuestionKind::from(q.kind),
                q.answer.map(TomlAnswer::into_key).unwrap_or_default(),
            )
            .with_title(q.title);
            question.points = q.points.as_ref().map_or(1.0, TomlPoints::coerce);
            question.reveal = q.reveal;
            question
        })
        .collect();

    let quiz = Quiz::new(parsed.quiz.id, parsed.quiz.name, questions)
        .with_context(|| format!("invalid quiz: {}", source_path.display()))?
        .with_description(parsed.quiz.description);
    Ok(quiz)
}

/// Recursively load all `.toml` quiz files from a directory.
pub fn load_quiz_directory(dir: &Path) -> Result<Vec<Quiz>> {
    let mut quizzes = Vec::new();

    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }

    let mut entries = std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
        .collect::<std::io::Result<Vec<_>>>()?;
    entries.sort_by_key(|e| e.path());

    for entry in entries {
        let path = entry.path();

        if path.is_dir() {
            quizzes.extend(load_quiz_directory(&path)?);
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            match parse_quiz(&path) {
                Ok(quiz) => quizzes.push(quiz),
                Err(e) => {
                    tracing::warn!("skipping {}: {:#}", path.display(), e);
                }
            }
        }
    }

    Ok(quizzes)
}

/// Parse an answer sheet file.
pub fn parse_answers(path: &Path) -> Result<BTreeMap<QuestionId, UserInput>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read answers file: {}", path.display()))?;

    parse_answers_str(&content, path)
}

/// Parse an answer sheet from a TOML string.
pub fn parse_answers_str(
    content: &str,
    source_path: &Path,
) -> Result<BTreeMap<QuestionId, UserInput>> {
    let parsed: TomlAnswersFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    parsed
        .answers
        .into_iter()
        .map(|(key, input)| -> Result<(QuestionId, UserInput)> {
            let id = key
                .trim()
                .parse::<QuestionId>()
                .map_err(|_| QuizError::InvalidQuestionId(key.clone()))?;
            Ok((id, input))
        })
        .collect()
}

/// Feed an answer sheet into a quiz in question order, as a user filling
/// the form top to bottom would.
pub fn apply_answers(
    quiz: &mut Quiz,
    answers: &BTreeMap<QuestionId, UserInput>,
    grader: &Grader,
    observer: &dyn QuizObserver,
) -> Result<(), QuizError> {
    for (&id, input) in answers {
        quiz.record_input(id, input.clone(), grader, observer)?;
    }
    Ok(())
}

/// A warning from quiz validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// The question id (if applicable).
    pub question_id: Option<QuestionId>,
    /// Warning message.
    pub message: String,
}

impl ValidationWarning {
    fn question(id: QuestionId, message: impl Into<String>) -> Self {
        Self {
            question_id: Some(id),
            message: message.into(),
        }
    }
}

/// Validate a quiz for common authoring issues.
pub fn validate_quiz(quiz: &Quiz) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    if quiz.is_empty() {
        warnings.push(ValidationWarning {
            question_id: None,
            message: "quiz has no questions".into(),
        });
        return warnings;
    }

    // Progressive reveal walks ids one by one; a gap strands later questions
    let mut expected = 1;
    for q in quiz.questions() {
        if q.id != expected {
            warnings.push(ValidationWarning::question(
                q.id,
                format!(
                    "question ids are not contiguous: expected {expected}, found {}",
                    q.id
                ),
            ));
        }
        expected = q.id + 1;
    }

    for q in quiz.questions() {
        if let QuestionKind::Unsupported(kind) = &q.kind {
            warnings.push(ValidationWarning::question(
                q.id,
                format!("unsupported question type '{kind}' will always score 0"),
            ));
            continue;
        }

        if q.points == 0.0 {
            warnings.push(ValidationWarning::question(
                q.id,
                "points are not a positive number; question is worth 0",
            ));
        }

        if q.answer_key.trim().is_empty() {
            warnings.push(ValidationWarning::question(
                q.id,
                "answer key is empty; question can never be answered correctly",
            ));
            continue;
        }

        match q.kind {
            QuestionKind::Radio if q.answer_key.contains(',') => {
                warnings.push(ValidationWarning::question(
                    q.id,
                    "radio answer key contains a comma; it is matched as one literal value",
                ));
            }
            QuestionKind::Checkbox => {
                let mut seen = HashSet::new();
                for token in q.answer_tokens() {
                    if !seen.insert(token) {
                        warnings.push(ValidationWarning::question(
                            q.id,
                            format!("duplicate answer token: {token}"),
                        ));
                    }
                }
            }
            _ => {}
        }
    }

    warnings
}
