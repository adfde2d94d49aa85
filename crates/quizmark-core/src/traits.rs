//! Notification seam between the grading engine and a UI layer.

use crate::model::{QuestionId, Verdict};
use crate::report::ScoreSummary;
use crate::scoring::Points;

/// Receives state changes as the engine makes them.
///
/// A UI can either implement this to be told about reveals and verdicts, or
/// ignore it and poll the question records after each call.
pub trait QuizObserver {
    /// A hidden question became visible.
    fn on_reveal(&self, id: QuestionId);
    /// A question was graded.
    fn on_verdict(&self, id: QuestionId, verdict: Verdict, points: &Points);
    /// A full check finished.
    fn on_checked(&self, summary: &ScoreSummary);
    /// Every question was cleared.
    fn on_reset(&self);
}

/// Observer that ignores everything.
pub struct NoopObserver;

impl QuizObserver for NoopObserver {
    fn on_reveal(&self, _: QuestionId) {}
    fn on_verdict(&self, _: QuestionId, _: Verdict, _: &Points) {}
    fn on_checked(&self, _: &ScoreSummary) {}
    fn on_reset(&self) {}
}
