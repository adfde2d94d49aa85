//! Score summary and grade report types.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::{QuestionId, Quiz, Verdict};
use crate::scoring::Points;

/// Totals of a full check.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreSummary {
    pub earned_total: f64,
    pub max_total: f64,
    /// `earned_total / max_total` as a rounded percentage, 0 for an empty quiz.
    pub percent: u32,
}

impl ScoreSummary {
    pub fn new(earned_total: f64, max_total: f64) -> Self {
        let percent = if max_total > 0.0 {
            ((earned_total / max_total) * 100.0).round() as u32
        } else {
            0
        };
        Self {
            earned_total,
            max_total,
            percent,
        }
    }
}

/// The user-facing score line, e.g. `2.5 point(s) sur 4 (63%)`.
impl fmt::Display for ScoreSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} point(s) sur {} ({}%)",
            self.earned_total, self.max_total, self.percent
        )
    }
}

/// Everything a full check produced.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckResult {
    /// One entry per question, in question order.
    pub points: Vec<Points>,
    pub summary: ScoreSummary,
}

/// Result of one question in a report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionResult {
    pub id: QuestionId,
    pub kind: String,
    #[serde(default)]
    pub title: String,
    pub verdict: Verdict,
    pub earned: f64,
    pub max: f64,
    /// Only filled when hints were requested.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

/// Summary of the quiz that was graded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizSummary {
    pub id: String,
    pub name: String,
    pub question_count: usize,
}

/// A complete grading run over one quiz.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GradeReport {
    /// Unique report identifier.
    pub id: Uuid,
    /// When the quiz was checked.
    pub created_at: DateTime<Utc>,
    pub quiz: QuizSummary,
    pub questions: Vec<QuestionResult>,
    pub summary: ScoreSummary,
}

impl GradeReport {
    /// Build a report from a quiz and the result of checking it.
    pub fn new(quiz: &Quiz, checked: &CheckResult, hints: bool) -> Self {
        let questions = quiz
            .questions()
            .iter()
            .zip(&checked.points)
            .map(|(q, p)| QuestionResult {
                id: q.id,
                kind: q.kind.to_string(),
                title: q.title.clone(),
                verdict: q.verdict,
                earned: p.earned,
                max: p.max,
                hint: if hints { q.answer_hint() } else { None },
            })
            .collect();

        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            quiz: QuizSummary {
                id: quiz.id.clone(),
                name: quiz.name.clone(),
                question_count: quiz.len(),
            },
            questions,
            summary: checked.summary,
        }
    }

    /// Number of questions with the given verdict.
    pub fn count(&self, verdict: Verdict) -> usize {
        self.questions.iter().filter(|q| q.verdict == verdict).count()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Plain text rendering: one line per question, then the score line.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!("{}\n\n", self.quiz.name));
        for q in &self.questions {
            out.push_str(&format!(
                "  Q{} [{}] {} ({}/{})\n",
                q.id, q.kind, q.verdict, q.earned, q.max
            ));
            if let Some(hint) = &q.hint {
                out.push_str(&format!("      {hint}\n"));
            }
        }
        out.push_str(&format!("\n{}\n", self.summary));
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Grader;
    use crate::model::{Question, QuestionKind};
    use crate::traits::NoopObserver;

    #[test]
    fn summary_display_contract() {
        assert_eq!(
            ScoreSummary::new(1.0, 1.0).to_string(),
            "1 point(s) sur 1 (100%)"
        );
        assert_eq!(
            ScoreSummary::new(2.5, 4.0).to_string(),
            "2.5 point(s) sur 4 (63%)"
        );
        assert_eq!(
            ScoreSummary::new(0.0, 0.0).to_string(),
            "0 point(s) sur 0 (0%)"
        );
    }

    #[test]
    fn percent_rounds_half_up() {
        assert_eq!(ScoreSummary::new(1.0, 8.0).percent, 13);
        assert_eq!(ScoreSummary::new(1.0, 3.0).percent, 33);
        assert_eq!(ScoreSummary::new(2.0, 3.0).percent, 67);
    }

    fn graded_quiz() -> (Quiz, CheckResult) {
        let mut quiz = Quiz::new(
            "geo",
            "Géographie",
            vec![
                Question::new(1, QuestionKind::Radio, "Paris")
                    .with_reveal("Paris")
                    .with_input("Paris"),
                Question::new(2, QuestionKind::Checkbox, "a,b").with_points(2.0),
            ],
        )
        .unwrap();
        let checked = quiz.check(&Grader::default(), &NoopObserver);
        (quiz, checked)
    }

    #[test]
    fn report_from_checked_quiz() {
        let (quiz, checked) = graded_quiz();
        let report = GradeReport::new(&quiz, &checked, true);

        assert_eq!(report.quiz.question_count, 2);
        assert_eq!(report.count(Verdict::Correct), 1);
        assert_eq!(report.count(Verdict::Wrong), 1);
        assert_eq!(
            report.questions[0].hint.as_deref(),
            Some("Bonne réponse : Paris")
        );
        assert!(report.questions[1].hint.is_none());

        let text = report.to_text();
        assert!(text.contains("Q1 [radio] correct (1/1)"));
        assert!(text.contains("Q2 [checkbox] wrong (0/2)"));
        assert!(text.contains("1 point(s) sur 3 (33%)"));
    }

    #[test]
    fn report_json_omits_hints_when_not_requested() {
        let (quiz, checked) = graded_quiz();
        let report = GradeReport::new(&quiz, &checked, false);
        let json = report.to_json().unwrap();
        assert!(!json.contains("\"hint\""));
        let parsed: GradeReport = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.summary.percent, 33);
        assert_eq!(parsed.questions[0].verdict, Verdict::Correct);
    }
}
