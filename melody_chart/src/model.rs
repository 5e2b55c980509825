use serde::{Deserialize, Serialize};

use crate::error::ChartError;

pub const DEFAULT_LANE_COUNT: u8 = 4;

/// Padding appended after the last note so the song does not cut off
/// the moment the final note resolves.
pub const CHART_TAIL_SECS: f32 = 2.0;

pub const MIN_BPM: u32 = 60;
pub const MAX_BPM: u32 = 240;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoteKind {
    Tap,
    Hold,
    Special,
}

impl Default for NoteKind {
    fn default() -> Self {
        NoteKind::Tap
    }
}

/// One note of a lesson chart. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoteDef {
    /// Symbolic pitch name ("do", "re", "mi", ...).
    pub pitch: String,
    /// Target hit time from song start, in seconds.
    pub time_secs: f32,
    /// Lane index, 0-based, must be below `Chart::lane_count`.
    pub lane: u8,
    #[serde(default = "default_duration")]
    pub duration_secs: f32,
    /// Optional vocabulary word collected on a successful hit.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub word: Option<String>,
    #[serde(default)]
    pub kind: NoteKind,
}

fn default_duration() -> f32 {
    0.5
}

impl NoteDef {
    pub fn tap(pitch: &str, time_secs: f32, lane: u8) -> Self {
        Self {
            pitch: pitch.to_string(),
            time_secs,
            lane,
            duration_secs: default_duration(),
            word: None,
            kind: NoteKind::Tap,
        }
    }

    pub fn with_word(mut self, word: &str) -> Self {
        self.word = Some(word.to_string());
        self
    }

    pub fn with_kind(mut self, kind: NoteKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn time_ms(&self) -> f64 {
        self.time_secs as f64 * 1000.0
    }

    pub fn duration_ms(&self) -> f64 {
        self.duration_secs as f64 * 1000.0
    }

    pub fn end_time_secs(&self) -> f32 {
        self.time_secs + self.duration_secs
    }

    pub fn has_word(&self) -> bool {
        self.word.as_deref().is_some_and(|w| !w.is_empty())
    }
}

/// An immutable lesson chart: the full note sequence plus tempo.
/// Produced by an external loader; the engine only reads it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chart {
    pub id: String,
    pub title: String,
    /// Beats per minute, `MIN_BPM..=MAX_BPM`.
    pub bpm: u32,
    #[serde(default = "default_lane_count")]
    pub lane_count: u8,
    pub notes: Vec<NoteDef>,
}

fn default_lane_count() -> u8 {
    DEFAULT_LANE_COUNT
}

impl Chart {
    pub fn total_notes(&self) -> usize {
        self.notes.len()
    }

    /// Chart length in seconds: end of the last note plus a fixed tail.
    pub fn duration_secs(&self) -> f32 {
        self.notes
            .iter()
            .map(|n| n.end_time_secs())
            .fold(0.0f32, f32::max)
            + CHART_TAIL_SECS
    }

    pub fn beat_interval_ms(&self) -> f64 {
        60_000.0 / self.bpm as f64
    }

    /// Rejects malformed charts before any gameplay component is wired.
    pub fn validate(&self) -> Result<(), ChartError> {
        if self.notes.is_empty() {
            return Err(ChartError::Empty);
        }
        if self.bpm < MIN_BPM || self.bpm > MAX_BPM {
            return Err(ChartError::InvalidBpm { bpm: self.bpm });
        }
        for (index, note) in self.notes.iter().enumerate() {
            if note.lane >= self.lane_count {
                return Err(ChartError::LaneOutOfRange {
                    index,
                    lane: note.lane,
                    lane_count: self.lane_count,
                });
            }
            if !note.time_secs.is_finite() || note.time_secs < 0.0 {
                return Err(ChartError::InvalidTime {
                    index,
                    time_secs: note.time_secs,
                });
            }
            if !note.duration_secs.is_finite() || note.duration_secs < 0.0 {
                return Err(ChartError::InvalidDuration {
                    index,
                    duration_secs: note.duration_secs,
                });
            }
        }
        Ok(())
    }
}
