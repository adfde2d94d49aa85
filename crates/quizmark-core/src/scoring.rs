//! Point values and the checkbox partial-credit policy.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// Points earned on a question against the points available.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Points {
    pub earned: f64,
    pub max: f64,
}

impl Points {
    pub fn new(earned: f64, max: f64) -> Self {
        Self { earned, max }
    }

    /// No credit on a question worth `max`.
    pub fn zero(max: f64) -> Self {
        Self { earned: 0.0, max }
    }

    /// `earned / max`, or 0 when the question is worth nothing.
    pub fn ratio(&self) -> f64 {
        if self.max > 0.0 {
            self.earned / self.max
        } else {
            0.0
        }
    }
}

/// Partial-credit rules for multi-select questions.
///
/// Each selected value outside the answer key costs `penalty_per_wrong`
/// of the ratio, up to `max_penalty`. A question whose earned ratio
/// reaches `correct_threshold` counts as fully correct.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CheckboxPolicy {
    #[serde(default = "default_penalty_per_wrong")]
    pub penalty_per_wrong: f64,
    #[serde(default = "default_max_penalty")]
    pub max_penalty: f64,
    #[serde(default = "default_correct_threshold")]
    pub correct_threshold: f64,
}

fn default_penalty_per_wrong() -> f64 {
    0.25
}
fn default_max_penalty() -> f64 {
    0.5
}
fn default_correct_threshold() -> f64 {
    0.999
}

impl Default for CheckboxPolicy {
    fn default() -> Self {
        Self {
            penalty_per_wrong: default_penalty_per_wrong(),
            max_penalty: default_max_penalty(),
            correct_threshold: default_correct_threshold(),
        }
    }
}

impl CheckboxPolicy {
    /// Score a set of selected values against the answer key.
    ///
    /// Both sides are treated as sets. An empty key never scores above 0.
    /// `earned` is rounded to two decimals and never exceeds `max_points`.
    pub fn score<'a, S, C>(&self, selected: S, correct_set: C, max_points: f64) -> Points
    where
        S: IntoIterator<Item = &'a str>,
        C: IntoIterator<Item = &'a str>,
    {
        let selected: HashSet<&str> = selected.into_iter().collect();
        let correct: HashSet<&str> = correct_set.into_iter().collect();

        let good = selected.iter().filter(|v| correct.contains(*v)).count();
        let bad = selected.len() - good;

        let mut ratio = if correct.is_empty() {
            0.0
        } else {
            good as f64 / correct.len() as f64
        };
        if bad > 0 {
            ratio -= self.max_penalty.min(bad as f64 * self.penalty_per_wrong);
        }
        let ratio = ratio.clamp(0.0, 1.0);

        let earned = round_cents(ratio * max_points).min(max_points);
        Points::new(earned.max(0.0), max_points)
    }
}

/// Score a checkbox question with the default policy.
pub fn score_checkbox<'a, S, C>(selected: S, correct_set: C, max_points: f64) -> Points
where
    S: IntoIterator<Item = &'a str>,
    C: IntoIterator<Item = &'a str>,
{
    CheckboxPolicy::default().score(selected, correct_set, max_points)
}

/// Round to two decimal places, halves away from zero.
fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
