use melody_chart::{NoteDef, NoteKind};

/// Quality of a resolved note. `Miss` is produced only by the grace
/// sweep, never by classifying an input (inputs outside every window
/// are strays and consume nothing).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rating {
    Perfect,
    Good,
    Ok,
    Miss,
}

impl Rating {
    pub fn base_score(self) -> u32 {
        match self {
            Rating::Perfect => 100,
            Rating::Good => 75,
            Rating::Ok => 50,
            Rating::Miss => 0,
        }
    }

    pub fn is_hit(self) -> bool {
        self != Rating::Miss
    }
}

/// Lifecycle of a spawned note.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteState {
    /// Created by the spawner, not yet promoted by the detector.
    Spawning,
    /// Visible and eligible for matching.
    Falling,
    Hit,
    Missed,
    /// Terminal and past the cleanup delay; about to leave the set.
    Destroyed,
}

impl NoteState {
    pub fn is_terminal(self) -> bool {
        matches!(self, NoteState::Hit | NoteState::Missed | NoteState::Destroyed)
    }
}

/// Runtime instance of a chart note. Exactly one exists per
/// `NoteDef` over a session; it lives in the hit detector's active
/// set until resolved and cleaned up.
#[derive(Debug, Clone)]
pub struct ActiveNote {
    /// Unique per spawn within a session.
    pub id: u64,
    /// Index of the backing definition in the chart.
    pub def_index: usize,
    pub pitch: String,
    pub lane: u8,
    pub kind: NoteKind,
    pub word: Option<String>,
    pub target_time_ms: f64,
    pub spawn_time_ms: f64,
    pub state: NoteState,
    pub hit_time_ms: Option<f64>,
    pub rating: Option<Rating>,
    pub resolved_at_ms: Option<f64>,
}

impl ActiveNote {
    pub fn spawn(id: u64, def_index: usize, def: &NoteDef, spawn_time_ms: f64) -> Self {
        Self {
            id,
            def_index,
            pitch: def.pitch.clone(),
            lane: def.lane,
            kind: def.kind,
            word: def.word.clone(),
            target_time_ms: def.time_ms(),
            spawn_time_ms,
            state: NoteState::Spawning,
            hit_time_ms: None,
            rating: None,
            resolved_at_ms: None,
        }
    }

    /// Signed timing offset: negative = early, positive = late.
    pub fn timing_offset(&self, time_ms: f64) -> f64 {
        time_ms - self.target_time_ms
    }

    pub fn has_word(&self) -> bool {
        self.word.as_deref().is_some_and(|w| !w.is_empty())
    }

    pub(crate) fn mark_hit(&mut self, hit_time_ms: f64, rating: Rating) {
        debug_assert_eq!(self.state, NoteState::Falling, "note classified twice");
        self.state = NoteState::Hit;
        self.hit_time_ms = Some(hit_time_ms);
        self.rating = Some(rating);
        self.resolved_at_ms = Some(hit_time_ms);
    }

    pub(crate) fn mark_missed(&mut self, song_time_ms: f64) {
        debug_assert_eq!(self.state, NoteState::Falling, "note classified twice");
        self.state = NoteState::Missed;
        self.rating = Some(Rating::Miss);
        self.resolved_at_ms = Some(song_time_ms);
    }
}
