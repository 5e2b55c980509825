use melody_chart::{Chart, NoteDef};

use crate::gameplay::note::ActiveNote;

pub const DEFAULT_LOOK_AHEAD_MS: f64 = 2000.0;

/// Walks the chart in target-time order and decides, each tick, which
/// notes become active. A definition spawns exactly once, the first
/// tick where `song_ms >= target_ms - look_ahead_ms`.
pub struct NoteSpawner {
    /// (original chart index, definition), sorted by target time.
    sequence: Vec<(usize, NoteDef)>,
    cursor: usize,
    next_id: u64,
    look_ahead_ms: f64,
    /// Presentation-only travel-rate scale carried on spawn events.
    speed_factor: f32,
    all_spawned_reported: bool,
}

impl NoteSpawner {
    pub fn new(chart: &Chart, look_ahead_ms: f64, speed_factor: f32) -> Self {
        let mut sequence: Vec<(usize, NoteDef)> = chart
            .notes
            .iter()
            .cloned()
            .enumerate()
            .collect();
        // Stable: equal-time notes keep chart order.
        sequence.sort_by(|a, b| a.1.time_secs.total_cmp(&b.1.time_secs));
        Self {
            sequence,
            cursor: 0,
            next_id: 0,
            look_ahead_ms,
            speed_factor,
            all_spawned_reported: false,
        }
    }

    /// Emits every note now due, in chart order. The returned notes
    /// are in `Spawning` state and belong to the hit detector next.
    pub fn poll(&mut self, song_ms: f64) -> Vec<ActiveNote> {
        let mut spawned = Vec::new();
        while self.cursor < self.sequence.len() {
            let (def_index, def) = &self.sequence[self.cursor];
            if def.time_ms() - self.look_ahead_ms > song_ms {
                break;
            }
            spawned.push(ActiveNote::spawn(self.next_id, *def_index, def, song_ms));
            self.next_id += 1;
            self.cursor += 1;
        }
        spawned
    }

    /// True exactly once, on the first call after the last definition
    /// has been emitted. The session uses it to know no further
    /// spawns are coming.
    pub fn take_all_spawned(&mut self) -> bool {
        if self.all_spawned_reported || self.cursor < self.sequence.len() {
            return false;
        }
        self.all_spawned_reported = true;
        true
    }

    pub fn all_spawned(&self) -> bool {
        self.cursor >= self.sequence.len()
    }

    pub fn total(&self) -> usize {
        self.sequence.len()
    }

    pub fn spawned(&self) -> usize {
        self.cursor
    }

    pub fn remaining(&self) -> usize {
        self.sequence.len() - self.cursor
    }

    pub fn look_ahead_ms(&self) -> f64 {
        self.look_ahead_ms
    }

    pub fn speed_factor(&self) -> f32 {
        self.speed_factor
    }
}
