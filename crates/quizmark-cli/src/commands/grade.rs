//! The `quizmark grade` command.

use std::path::PathBuf;

use anyhow::Result;

use quizmark_core::config::load_config_from;
use quizmark_core::parser;
use quizmark_core::{GradeReport, Points, QuestionId, QuizObserver, ScoreSummary, Verdict};

/// Logs engine events while an answer sheet is replayed.
struct TraceObserver;

impl QuizObserver for TraceObserver {
    fn on_reveal(&self, id: QuestionId) {
        tracing::debug!("revealed question {id}");
    }

    fn on_verdict(&self, id: QuestionId, verdict: Verdict, points: &Points) {
        tracing::debug!("question {id}: {verdict} ({}/{})", points.earned, points.max);
    }

    fn on_checked(&self, summary: &ScoreSummary) {
        tracing::debug!("checked: {summary}");
    }

    fn on_reset(&self) {}
}

pub fn execute(
    quiz_path: PathBuf,
    answers_path: PathBuf,
    format: Option<String>,
    hints: bool,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let format = format.unwrap_or_else(|| config.default_format.clone());
    let hints = hints || config.show_hints;
    let grader = config.grader();

    let mut quiz = parser::parse_quiz(&quiz_path)?;
    let answers = parser::parse_answers(&answers_path)?;

    parser::apply_answers(&mut quiz, &answers, &grader, &TraceObserver)?;
    let checked = quiz.check(&grader, &TraceObserver);
    let report = GradeReport::new(&quiz, &checked, hints);

    match format.as_str() {
        "json" => println!("{}", report.to_json()?),
        "table" => print_table(&report),
        "text" => print!("{}", report.to_text()),
        other => anyhow::bail!("unknown format: {other} (expected text, table or json)"),
    }

    Ok(())
}

fn print_table(report: &GradeReport) {
    use comfy_table::{Cell, Table};

    let mut table = Table::new();
    let mut header = vec!["#", "Type", "Question", "Verdict", "Points"];
    let with_hints = report.questions.iter().any(|q| q.hint.is_some());
    if with_hints {
        header.push("Answer");
    }
    table.set_header(header);

    for q in &report.questions {
        let mut row = vec![
            Cell::new(q.id),
            Cell::new(&q.kind),
            Cell::new(&q.title),
            Cell::new(q.verdict),
            Cell::new(format!("{}/{}", q.earned, q.max)),
        ];
        if with_hints {
            row.push(Cell::new(q.hint.as_deref().unwrap_or("")));
        }
        table.add_row(row);
    }

    println!("{}\n", report.quiz.name);
    println!("{table}");
    println!("\n{}", report.summary);
}
