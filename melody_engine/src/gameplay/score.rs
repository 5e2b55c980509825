use crate::gameplay::note::Rating;

/// Combo thresholds mapped to score multipliers, ascending. The
/// multiplier for a combo is the value of the highest threshold
/// reached, 1.0 below the first. Product-tuning numbers, kept as
/// configuration rather than hard-coded.
#[derive(Debug, Clone, PartialEq)]
pub struct MultiplierTable {
    steps: Vec<(u32, f32)>,
}

impl Default for MultiplierTable {
    fn default() -> Self {
        Self::new(vec![(10, 1.25), (20, 1.5), (30, 1.75), (50, 2.0)])
    }
}

impl MultiplierTable {
    /// Steps must be strictly ascending in both threshold and value
    /// so the multiplier is monotonic in combo.
    pub fn new(steps: Vec<(u32, f32)>) -> Self {
        debug_assert!(steps
            .windows(2)
            .all(|w| w[0].0 < w[1].0 && w[0].1 <= w[1].1));
        Self { steps }
    }

    /// Pure function of combo: the score stream is replayable from
    /// the hit/miss sequence alone.
    pub fn multiplier_for(&self, combo: u32) -> f32 {
        self.steps
            .iter()
            .rev()
            .find(|(threshold, _)| combo >= *threshold)
            .map(|(_, m)| *m)
            .unwrap_or(1.0)
    }
}

/// Points granted for one processed hit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitScore {
    pub points: u64,
    pub combo: u32,
    pub multiplier: f32,
    pub multiplier_changed: bool,
    /// Set when this hit landed exactly on a milestone boundary.
    pub milestone: Option<u32>,
}

pub const DEFAULT_MILESTONE_STEP: u32 = 10;

/// Score, combo and multiplier state for one session.
pub struct ScoreBoard {
    table: MultiplierTable,
    milestone_step: u32,
    score: u64,
    combo: u32,
    max_combo: u32,
    multiplier: f32,
    perfect_count: u32,
    good_count: u32,
    ok_count: u32,
    miss_count: u32,
    total_notes: usize,
    max_possible_score: u64,
}

impl ScoreBoard {
    pub fn new(total_notes: usize, table: MultiplierTable) -> Self {
        let max_possible_score = max_possible_score(total_notes, &table);
        Self {
            table,
            milestone_step: DEFAULT_MILESTONE_STEP,
            score: 0,
            combo: 0,
            max_combo: 0,
            multiplier: 1.0,
            perfect_count: 0,
            good_count: 0,
            ok_count: 0,
            miss_count: 0,
            total_notes,
            max_possible_score,
        }
    }

    /// Applies a successful hit: combo up, multiplier from the step
    /// table, points = floor(base × multiplier). The floor is
    /// deliberate and explicit.
    pub fn process_hit(&mut self, rating: Rating) -> HitScore {
        debug_assert!(rating.is_hit(), "misses go through process_miss");
        match rating {
            Rating::Perfect => self.perfect_count += 1,
            Rating::Good => self.good_count += 1,
            Rating::Ok => self.ok_count += 1,
            Rating::Miss => {}
        }

        self.combo += 1;
        self.max_combo = self.max_combo.max(self.combo);

        let old_multiplier = self.multiplier;
        self.multiplier = self.table.multiplier_for(self.combo);

        let points = (rating.base_score() as f64 * self.multiplier as f64).floor() as u64;
        self.score += points;

        let milestone = (self.milestone_step > 0 && self.combo % self.milestone_step == 0)
            .then_some(self.combo);

        HitScore {
            points,
            combo: self.combo,
            multiplier: self.multiplier,
            multiplier_changed: self.multiplier != old_multiplier,
            milestone,
        }
    }

    /// Applies a miss: combo and multiplier reset, score untouched.
    /// Returns the combo that was lost.
    pub fn process_miss(&mut self) -> u32 {
        self.miss_count += 1;
        let lost = self.combo;
        self.combo = 0;
        self.multiplier = 1.0;
        lost
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn combo(&self) -> u32 {
        self.combo
    }

    pub fn max_combo(&self) -> u32 {
        self.max_combo
    }

    pub fn multiplier(&self) -> f32 {
        self.multiplier
    }

    pub fn perfect_count(&self) -> u32 {
        self.perfect_count
    }

    pub fn good_count(&self) -> u32 {
        self.good_count
    }

    pub fn ok_count(&self) -> u32 {
        self.ok_count
    }

    pub fn miss_count(&self) -> u32 {
        self.miss_count
    }

    pub fn total_notes(&self) -> usize {
        self.total_notes
    }

    pub fn max_possible_score(&self) -> u64 {
        self.max_possible_score
    }

    /// Notes resolved so far, hit or missed.
    pub fn resolved_count(&self) -> u32 {
        self.perfect_count + self.good_count + self.ok_count + self.miss_count
    }

    /// Weighted accuracy percentage over all resolved notes: a
    /// perfect counts 100, a good 75, an ok 50, a miss 0.
    pub fn accuracy_percent(&self) -> f32 {
        let resolved = self.resolved_count();
        if resolved == 0 {
            return 100.0;
        }
        let weighted = self.perfect_count as f32 * 100.0
            + self.good_count as f32 * 75.0
            + self.ok_count as f32 * 50.0;
        weighted / resolved as f32
    }
}

/// Score of an all-perfect run through the same escalation table.
/// Star thresholds are fractions of this value.
pub fn max_possible_score(total_notes: usize, table: &MultiplierTable) -> u64 {
    let mut score = 0u64;
    for combo in 1..=total_notes as u32 {
        let multiplier = table.multiplier_for(combo);
        score += (Rating::Perfect.base_score() as f64 * multiplier as f64).floor() as u64;
    }
    score
}
