//! Core data model types for quizmark.
//!
//! A [`Quiz`] is an ordered collection of [`Question`] records. The UI layer
//! writes each question's [`UserInput`]; grading writes its [`Verdict`].

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::QuizError;
use crate::normalize::normalize_text;

/// Question identifier. Positive, unique, defines display order.
pub type QuestionId = u32;

/// The kind of a question, fixed when it is authored.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum QuestionKind {
    /// Single choice; graded by exact literal match.
    Radio,
    /// Free text; graded after normalization against accepted answers.
    Text,
    /// Multiple choice; graded with partial credit.
    Checkbox,
    /// A type string this engine does not grade. Never answered,
    /// always worth zero.
    Unsupported(String),
}

impl From<&str> for QuestionKind {
    fn from(s: &str) -> Self {
        match s {
            "radio" => QuestionKind::Radio,
            "text" => QuestionKind::Text,
            "checkbox" => QuestionKind::Checkbox,
            other => QuestionKind::Unsupported(other.to_string()),
        }
    }
}

impl From<String> for QuestionKind {
    fn from(s: String) -> Self {
        QuestionKind::from(s.as_str())
    }
}

impl From<QuestionKind> for String {
    fn from(kind: QuestionKind) -> Self {
        kind.to_string()
    }
}

impl fmt::Display for QuestionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuestionKind::Radio => write!(f, "radio"),
            QuestionKind::Text => write!(f, "text"),
            QuestionKind::Checkbox => write!(f, "checkbox"),
            QuestionKind::Unsupported(name) => write!(f, "{name}"),
        }
    }
}

/// Outcome of the last grading pass on a question.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    #[default]
    Unanswered,
    Wrong,
    Partial,
    Correct,
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Unanswered => write!(f, "unanswered"),
            Verdict::Wrong => write!(f, "wrong"),
            Verdict::Partial => write!(f, "partial"),
            Verdict::Correct => write!(f, "correct"),
        }
    }
}

/// What the user currently has selected or typed for a question.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UserInput {
    /// Typed text, or the value of a single selected option.
    Text(String),
    /// Values of every selected option.
    Choices(Vec<String>),
    #[default]
    Empty,
}

impl UserInput {
    /// Selected option values, in input order.
    pub fn selected(&self) -> Vec<&str> {
        match self {
            UserInput::Text(v) => vec![v.as_str()],
            UserInput::Choices(vs) => vs.iter().map(String::as_str).collect(),
            UserInput::Empty => Vec::new(),
        }
    }

    /// The typed text. A one-element list counts as that element.
    pub fn text(&self) -> Option<&str> {
        match self {
            UserInput::Text(v) => Some(v.as_str()),
            UserInput::Choices(vs) if vs.len() == 1 => Some(vs[0].as_str()),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            UserInput::Text(_) => false,
            UserInput::Choices(vs) => vs.is_empty(),
            UserInput::Empty => true,
        }
    }
}

impl From<&str> for UserInput {
    fn from(s: &str) -> Self {
        UserInput::Text(s.to_string())
    }
}

impl From<Vec<&str>> for UserInput {
    fn from(vs: Vec<&str>) -> Self {
        UserInput::Choices(vs.into_iter().map(str::to_string).collect())
    }
}

/// Coerce an authored point value.
///
/// Missing, empty and zero values fall back to 1. Anything that is not a
/// positive finite number is worth 0.
pub fn coerce_points(raw: Option<&str>) -> f64 {
    match raw.map(str::trim) {
        None | Some("") => 1.0,
        Some(s) => s.parse::<f64>().map(sanitize_points).unwrap_or(0.0),
    }
}

/// Apply the point fallback rules to an already numeric value.
pub fn sanitize_points(value: f64) -> f64 {
    if value == 0.0 {
        1.0
    } else if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

fn default_points() -> f64 {
    1.0
}

fn deserialize_points<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    f64::deserialize(deserializer).map(sanitize_points)
}

/// One graded unit of a quiz.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub id: QuestionId,
    pub kind: QuestionKind,
    /// Maximum points for this question.
    #[serde(default = "default_points", deserialize_with = "deserialize_points")]
    pub points: f64,
    /// Raw answer key as authored.
    #[serde(default)]
    pub answer_key: String,
    /// Prompt shown to the user.
    #[serde(default)]
    pub title: String,
    /// Authored text shown when the user asks for the answer.
    #[serde(default)]
    pub reveal: Option<String>,
    #[serde(default)]
    pub input: UserInput,
    #[serde(default)]
    pub verdict: Verdict,
    #[serde(default)]
    pub visible: bool,
}

impl Question {
    pub fn new(id: QuestionId, kind: QuestionKind, answer_key: impl Into<String>) -> Self {
        Self {
            id,
            kind,
            points: default_points(),
            answer_key: answer_key.into(),
            title: String::new(),
            reveal: None,
            input: UserInput::Empty,
            verdict: Verdict::Unanswered,
            visible: false,
        }
    }

    pub fn with_points(mut self, points: f64) -> Self {
        self.points = sanitize_points(points);
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_reveal(mut self, reveal: impl Into<String>) -> Self {
        self.reveal = Some(reveal.into());
        self
    }

    pub fn with_input(mut self, input: impl Into<UserInput>) -> Self {
        self.input = input.into();
        self
    }

    /// Comma-separated answer key tokens, trimmed, empties dropped.
    pub fn answer_tokens(&self) -> Vec<&str> {
        self.answer_key
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .collect()
    }

    /// Normalized accepted answers for a text question.
    pub fn accepted_answers(&self) -> Vec<String> {
        self.answer_key
            .split(',')
            .map(|a| normalize_text(Some(a)))
            .collect()
    }

    /// The "show answer" line for this question, if one was authored.
    pub fn answer_hint(&self) -> Option<String> {
        self.reveal
            .as_deref()
            .map(|text| format!("Bonne réponse : {text}"))
    }

    /// Clear input and verdict back to the untouched state.
    pub fn clear(&mut self) {
        self.input = UserInput::Empty;
        self.verdict = Verdict::Unanswered;
    }
}

/// An ordered set of questions.
///
/// Deserialization goes through [`Quiz::new`], so the id checks apply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawQuiz")]
pub struct Quiz {
    pub id: String,
    pub name: String,
    pub description: String,
    questions: Vec<Question>,
}

impl Quiz {
    /// Build a quiz, ordering questions by id.
    ///
    /// Only the first question starts out visible.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        mut questions: Vec<Question>,
    ) -> Result<Self, QuizError> {
        questions.sort_by_key(|q| q.id);
        for pair in questions.windows(2) {
            if pair[0].id == pair[1].id {
                return Err(QuizError::DuplicateQuestion(pair[0].id));
            }
        }
        if questions.first().is_some_and(|q| q.id == 0) {
            return Err(QuizError::ZeroQuestionId);
        }

        for (idx, q) in questions.iter_mut().enumerate() {
            q.visible = idx == 0;
        }

        Ok(Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            questions,
        })
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Questions in id order.
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn questions_mut(&mut self) -> &mut [Question] {
        &mut self.questions
    }

    pub fn question(&self, id: QuestionId) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == id)
    }

    pub fn question_mut(&mut self, id: QuestionId) -> Option<&mut Question> {
        self.questions.iter_mut().find(|q| q.id == id)
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Sum of every question's points.
    pub fn max_points(&self) -> f64 {
        self.questions.iter().map(|q| q.points).sum()
    }
}

#[derive(Deserialize)]
struct RawQuiz {
    id: String,
    name: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    questions: Vec<Question>,
}

impl TryFrom<RawQuiz> for Quiz {
    type Error = QuizError;

    fn try_from(raw: RawQuiz) -> Result<Self, Self::Error> {
        // A saved session keeps its reveal state; a fresh one shows the first question.
        let shown: Vec<QuestionId> = raw
            .questions
            .iter()
            .filter(|q| q.visible)
            .map(|q| q.id)
            .collect();

        let mut quiz =
            Quiz::new(raw.id, raw.name, raw.questions)?.with_description(raw.description);
        if !shown.is_empty() {
            for q in quiz.questions_mut() {
                q.visible = shown.contains(&q.id);
            }
        }
        Ok(quiz)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_display_and_parse() {
        assert_eq!(QuestionKind::from("radio"), QuestionKind::Radio);
        assert_eq!(QuestionKind::from("text"), QuestionKind::Text);
        assert_eq!(QuestionKind::from("checkbox"), QuestionKind::Checkbox);
        assert_eq!(
            QuestionKind::from("slider"),
            QuestionKind::Unsupported("slider".into())
        );
        assert_eq!(QuestionKind::Checkbox.to_string(), "checkbox");
        assert_eq!(QuestionKind::Unsupported("slider".into()).to_string(), "slider");
    }

    #[test]
    fn points_coercion() {
        assert_eq!(coerce_points(None), 1.0);
        assert_eq!(coerce_points(Some("")), 1.0);
        assert_eq!(coerce_points(Some("0")), 1.0);
        assert_eq!(coerce_points(Some(" 2.5 ")), 2.5);
        assert_eq!(coerce_points(Some("abc")), 0.0);
        assert_eq!(coerce_points(Some("-3")), 0.0);
        assert_eq!(coerce_points(Some("inf")), 0.0);
        assert_eq!(coerce_points(Some("NaN")), 0.0);
    }

    #[test]
    fn answer_tokens_trim_and_drop_empties() {
        let q = Question::new(1, QuestionKind::Checkbox, " a, b ,,c ,");
        assert_eq!(q.answer_tokens(), vec!["a", "b", "c"]);
        assert!(Question::new(2, QuestionKind::Checkbox, "")
            .answer_tokens()
            .is_empty());
    }

    #[test]
    fn accepted_answers_are_normalized() {
        let q = Question::new(1, QuestionKind::Text, "Café, THÉ ,eau");
        assert_eq!(q.accepted_answers(), vec!["cafe", "the", "eau"]);
    }

    #[test]
    fn answer_hint_format() {
        let q = Question::new(1, QuestionKind::Radio, "Paris").with_reveal("Paris");
        assert_eq!(q.answer_hint().as_deref(), Some("Bonne réponse : Paris"));
        assert!(Question::new(2, QuestionKind::Radio, "x").answer_hint().is_none());
    }

    #[test]
    fn user_input_accessors() {
        assert_eq!(UserInput::from("x").selected(), vec!["x"]);
        assert_eq!(UserInput::from(vec!["a", "b"]).selected(), vec!["a", "b"]);
        assert!(UserInput::Empty.selected().is_empty());
        assert!(UserInput::Choices(vec![]).is_empty());
        assert_eq!(UserInput::from("typed").text(), Some("typed"));
        assert_eq!(UserInput::from(vec!["a"]).text(), Some("a"));
        assert_eq!(UserInput::from(vec!["a", "b"]).text(), None);
        assert_eq!(UserInput::Choices(vec![]).text(), None);
    }

    #[test]
    fn user_input_from_json() {
        let text: UserInput = serde_json::from_str(r#""Paris""#).unwrap();
        assert_eq!(text, UserInput::Text("Paris".into()));
        let many: UserInput = serde_json::from_str(r#"["a","b"]"#).unwrap();
        assert_eq!(many, UserInput::Choices(vec!["a".into(), "b".into()]));
        let empty: UserInput = serde_json::from_str("null").unwrap();
        assert_eq!(empty, UserInput::Empty);
    }

    #[test]
    fn quiz_orders_questions_and_shows_first() {
        let quiz = Quiz::new(
            "q",
            "Quiz",
            vec![
                Question::new(3, QuestionKind::Text, "c"),
                Question::new(1, QuestionKind::Radio, "a"),
                Question::new(2, QuestionKind::Checkbox, "b"),
            ],
        )
        .unwrap();
        let ids: Vec<_> = quiz.questions().iter().map(|q| q.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert!(quiz.question(1).unwrap().visible);
        assert!(!quiz.question(2).unwrap().visible);
        assert!(!quiz.question(3).unwrap().visible);
    }

    #[test]
    fn quiz_rejects_duplicate_and_zero_ids() {
        let dup = Quiz::new(
            "q",
            "Quiz",
            vec![
                Question::new(1, QuestionKind::Text, "a"),
                Question::new(1, QuestionKind::Text, "b"),
            ],
        );
        assert_eq!(dup.unwrap_err(), QuizError::DuplicateQuestion(1));

        let zero = Quiz::new("q", "Quiz", vec![Question::new(0, QuestionKind::Text, "a")]);
        assert_eq!(zero.unwrap_err(), QuizError::ZeroQuestionId);
    }

    #[test]
    fn deserialized_quiz_is_validated() {
        let json = r#"{
            "id": "q", "name": "Quiz",
            "questions": [
                {"id": 2, "kind": "radio", "answer_key": "a"},
                {"id": 2, "kind": "text", "answer_key": "b"},
                {"id": 0, "kind": "text", "answer_key": "c"}
            ]
        }"#;
        let err = serde_json::from_str::<Quiz>(json).unwrap_err();
        assert!(err.to_string().contains("duplicate question id: 2"));

        let json = r#"{"id": "q", "name": "Quiz", "questions": [{"id": 0, "kind": "text"}]}"#;
        assert!(serde_json::from_str::<Quiz>(json).is_err());
    }

    #[test]
    fn deserialized_quiz_is_sorted_with_first_visible() {
        let json = r#"{
            "id": "q", "name": "Quiz", "description": "d",
            "questions": [
                {"id": 3, "kind": "text", "answer_key": "c"},
                {"id": 1, "kind": "radio", "answer_key": "a"}
            ]
        }"#;
        let quiz: Quiz = serde_json::from_str(json).unwrap();
        let ids: Vec<_> = quiz.questions().iter().map(|q| q.id).collect();
        assert_eq!(ids, vec![1, 3]);
        assert!(quiz.question(1).unwrap().visible);
        assert!(!quiz.question(3).unwrap().visible);
        assert_eq!(quiz.description, "d");
    }

    #[test]
    fn quiz_json_round_trip_keeps_reveal_state() {
        let mut quiz = Quiz::new(
            "q",
            "Quiz",
            vec![
                Question::new(1, QuestionKind::Radio, "a"),
                Question::new(2, QuestionKind::Radio, "b"),
                Question::new(3, QuestionKind::Radio, "c"),
            ],
        )
        .unwrap();
        quiz.question_mut(2).unwrap().visible = true;

        let json = serde_json::to_string(&quiz).unwrap();
        let back: Quiz = serde_json::from_str(&json).unwrap();
        assert_eq!(back, quiz);
    }

    #[test]
    fn deserialized_points_follow_coercion_rules() {
        let points = |json: &str| serde_json::from_str::<Question>(json).unwrap().points;
        assert_eq!(points(r#"{"id": 1, "kind": "checkbox", "points": -4.0}"#), 0.0);
        assert_eq!(points(r#"{"id": 1, "kind": "radio", "points": 0}"#), 1.0);
        assert_eq!(points(r#"{"id": 1, "kind": "radio"}"#), 1.0);
        assert_eq!(points(r#"{"id": 1, "kind": "radio", "points": 2.5}"#), 2.5);
    }

    #[test]
    fn deserialized_negative_points_cannot_go_below_zero() {
        let json = r#"{
            "id": "q", "name": "Quiz",
            "questions": [
                {"id": 1, "kind": "checkbox", "points": -2.0, "answer_key": "a, b",
                 "input": ["a", "b"]}
            ]
        }"#;
        let mut quiz: Quiz = serde_json::from_str(json).unwrap();
        let summary = crate::engine::grade_all(quiz.questions_mut());
        assert_eq!(summary.earned_total, 0.0);
        assert_eq!(summary.max_total, 0.0);
        assert_eq!(summary.to_string(), "0 point(s) sur 0 (0%)");
    }

    #[test]
    fn max_points_sums_questions() {
        let quiz = Quiz::new(
            "q",
            "Quiz",
            vec![
                Question::new(1, QuestionKind::Radio, "a").with_points(2.0),
                Question::new(2, QuestionKind::Checkbox, "b").with_points(1.5),
            ],
        )
        .unwrap();
        assert_eq!(quiz.max_points(), 3.5);
    }
}
