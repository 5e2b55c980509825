use crate::gameplay::note::{ActiveNote, NoteState, Rating};

/// Half-width tolerance bands in milliseconds, ascending, upper
/// bounds inclusive. An offset inside `perfect_ms` rates Perfect
/// even when it also fits the wider bands: first match wins.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimingWindows {
    pub perfect_ms: f64,
    pub good_ms: f64,
    pub ok_ms: f64,
}

impl Default for TimingWindows {
    fn default() -> Self {
        Self::normal()
    }
}

impl TimingWindows {
    pub fn normal() -> Self {
        Self {
            perfect_ms: 50.0,
            good_ms: 100.0,
            ok_ms: 200.0,
        }
    }

    /// Forgiving windows for young players.
    pub fn relaxed() -> Self {
        Self {
            perfect_ms: 80.0,
            good_ms: 150.0,
            ok_ms: 220.0,
        }
    }

    pub fn strict() -> Self {
        Self {
            perfect_ms: 30.0,
            good_ms: 60.0,
            ok_ms: 100.0,
        }
    }

    /// Pure classification of a signed timing delta. `None` means the
    /// input is a stray tap: no note consumed, no penalty.
    pub fn classify(&self, delta_ms: f64) -> Option<Rating> {
        let abs = delta_ms.abs();
        if abs <= self.perfect_ms {
            Some(Rating::Perfect)
        } else if abs <= self.good_ms {
            Some(Rating::Good)
        } else if abs <= self.ok_ms {
            Some(Rating::Ok)
        } else {
            None
        }
    }
}

/// A classified hit, handed to the score/word consumers.
#[derive(Debug, Clone)]
pub struct HitJudgment {
    pub note: ActiveNote,
    pub rating: Rating,
    pub delta_ms: f64,
}

/// Owns the active-note set and resolves it: input matching on one
/// side, the grace-window miss sweep on the other.
pub struct HitDetector {
    windows: TimingWindows,
    /// Extra time past the target before an unmatched note becomes a miss.
    grace_ms: f64,
    /// How long a resolved note lingers in the set for display purposes.
    cleanup_ms: f64,
    active: Vec<ActiveNote>,
}

pub const DEFAULT_GRACE_MS: f64 = 300.0;
pub const DEFAULT_CLEANUP_MS: f64 = 500.0;

impl HitDetector {
    pub fn new(windows: TimingWindows, grace_ms: f64) -> Self {
        Self {
            windows,
            grace_ms,
            cleanup_ms: DEFAULT_CLEANUP_MS,
            active: Vec::new(),
        }
    }

    pub fn windows(&self) -> TimingWindows {
        self.windows
    }

    pub fn grace_ms(&self) -> f64 {
        self.grace_ms
    }

    /// Takes ownership of a freshly spawned note.
    pub fn add(&mut self, note: ActiveNote) {
        debug_assert_eq!(note.state, NoteState::Spawning);
        self.active.push(note);
    }

    /// Promotes `Spawning` notes to `Falling`. Called once per tick
    /// before inputs are drained, so a note spawned this tick is
    /// already matchable.
    pub fn advance(&mut self) {
        for note in &mut self.active {
            if note.state == NoteState::Spawning {
                note.state = NoteState::Falling;
            }
        }
    }

    /// Matches a tap against the nearest eligible note on the lane.
    ///
    /// Eligible: `Falling` and within the widest tolerance band.
    /// Nearest by absolute delta; ties go to the earlier target time.
    /// Returns `None` for stray taps (silently ignored, no penalty).
    pub fn check_hit(&mut self, lane: u8, input_ms: f64) -> Option<HitJudgment> {
        let mut best: Option<usize> = None;
        for (i, note) in self.active.iter().enumerate() {
            if note.state != NoteState::Falling || note.lane != lane {
                continue;
            }
            let abs = note.timing_offset(input_ms).abs();
            if abs > self.windows.ok_ms {
                continue;
            }
            best = match best {
                None => Some(i),
                Some(j) => {
                    let other = &self.active[j];
                    let other_abs = other.timing_offset(input_ms).abs();
                    if abs < other_abs
                        || (abs == other_abs && note.target_time_ms < other.target_time_ms)
                    {
                        Some(i)
                    } else {
                        Some(j)
                    }
                }
            };
        }

        let idx = best?;
        let delta_ms = self.active[idx].timing_offset(input_ms);
        // Within ok_ms by construction, so this always classifies.
        let rating = self.windows.classify(delta_ms)?;
        self.active[idx].mark_hit(input_ms, rating);
        Some(HitJudgment {
            note: self.active[idx].clone(),
            rating,
            delta_ms,
        })
    }

    /// Marks every `Falling` note whose grace window has elapsed as
    /// missed. Results are ordered by target time so score updates
    /// stay deterministic.
    pub fn sweep_misses(&mut self, song_ms: f64) -> Vec<ActiveNote> {
        let mut missed = Vec::new();
        for note in &mut self.active {
            if note.state == NoteState::Falling
                && song_ms > note.target_time_ms + self.grace_ms
            {
                note.mark_missed(song_ms);
                missed.push(note.clone());
            }
        }
        missed.sort_by(|a, b| a.target_time_ms.total_cmp(&b.target_time_ms));
        missed
    }

    /// Destroys resolved notes once their display delay has elapsed.
    pub fn cleanup(&mut self, song_ms: f64) {
        let cleanup_ms = self.cleanup_ms;
        self.active.retain(|note| match note.resolved_at_ms {
            Some(resolved) if song_ms >= resolved + cleanup_ms => false,
            _ => true,
        });
    }

    /// Notes not yet resolved to hit or missed.
    pub fn unresolved_count(&self) -> usize {
        self.active
            .iter()
            .filter(|n| !n.state.is_terminal())
            .count()
    }

    /// Read-only snapshot for event emission and rendering layers.
    pub fn active_notes(&self) -> &[ActiveNote] {
        &self.active
    }

    pub fn clear(&mut self) {
        self.active.clear();
    }
}
