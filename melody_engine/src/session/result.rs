use serde::{Deserialize, Serialize};

use crate::gameplay::score::ScoreBoard;
use crate::gameplay::words::WordTracker;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// Every note resolved.
    Completed,
    /// Boss health reached zero.
    Victory,
    /// Ended early; counters are a partial summary only.
    Aborted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Serialize, Deserialize)]
pub enum Grade {
    D,
    C,
    B,
    A,
    S,
}

impl Grade {
    fn from_accuracy(accuracy: f32) -> Self {
        if accuracy >= 95.0 {
            Grade::S
        } else if accuracy >= 90.0 {
            Grade::A
        } else if accuracy >= 80.0 {
            Grade::B
        } else if accuracy >= 70.0 {
            Grade::C
        } else {
            Grade::D
        }
    }
}

/// Immutable terminal snapshot of a session, built once from the
/// final counters and handed to external persistence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionResult {
    pub outcome: Outcome,
    pub score: u64,
    pub max_combo: u32,
    pub perfect_count: u32,
    pub good_count: u32,
    pub ok_count: u32,
    pub miss_count: u32,
    pub total_notes: usize,
    /// Weighted accuracy percentage (perfect 100, good 75, ok 50).
    pub accuracy: f32,
    /// 0-3, from score against the all-perfect maximum.
    pub stars: u8,
    /// `None` when aborted: a partial run has no definitive grade.
    pub grade: Option<Grade>,
    pub words: Vec<String>,
    pub duration_ms: f64,
    pub full_combo: bool,
    pub all_perfect: bool,
}

const STAR_THRESHOLDS: [f64; 3] = [0.50, 0.70, 0.90];

pub(crate) fn build_result(
    outcome: Outcome,
    score: &ScoreBoard,
    words: &WordTracker,
    duration_ms: f64,
) -> SessionResult {
    let stars = if score.max_possible_score() == 0 {
        0
    } else {
        let fraction = score.score() as f64 / score.max_possible_score() as f64;
        STAR_THRESHOLDS.iter().filter(|&&t| fraction >= t).count() as u8
    };
    let accuracy = score.accuracy_percent();
    let grade = match outcome {
        Outcome::Aborted => None,
        Outcome::Completed | Outcome::Victory => Some(Grade::from_accuracy(accuracy)),
    };
    SessionResult {
        outcome,
        score: score.score(),
        max_combo: score.max_combo(),
        perfect_count: score.perfect_count(),
        good_count: score.good_count(),
        ok_count: score.ok_count(),
        miss_count: score.miss_count(),
        total_notes: score.total_notes(),
        accuracy,
        stars,
        grade,
        words: words.words(),
        duration_ms,
        full_combo: score.miss_count() == 0,
        all_perfect: score.miss_count() == 0
            && score.good_count() == 0
            && score.ok_count() == 0,
    }
}
