/// Song-time clock, driven entirely by host-supplied wall time.
///
/// The host calls `update(now_ms)` once per tick; every query then
/// reads the value computed at that instant. Pausing freezes song
/// time, resuming continues from the frozen value regardless of how
/// much wall time passed in between. `stop` halts the clock but
/// keeps the last value so the caller decides when to reset.
#[derive(Debug)]
pub struct SongClock {
    state: ClockState,
    /// Song-time advance per wall millisecond. 1.0 for gameplay;
    /// tooling may run faster.
    rate: f64,
    beat_interval_ms: f64,
    song_ms: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum ClockState {
    Stopped,
    Running {
        anchor_wall_ms: f64,
        anchor_song_ms: f64,
    },
    Paused,
}

impl SongClock {
    pub fn new(bpm: u32) -> Self {
        Self {
            state: ClockState::Stopped,
            rate: 1.0,
            beat_interval_ms: 60_000.0 / bpm as f64,
            song_ms: 0.0,
        }
    }

    pub fn with_rate(mut self, rate: f64) -> Self {
        self.rate = rate;
        self
    }

    /// Begins (or continues after `stop`) from the current song value.
    /// No-op while already running or paused; a paused clock resumes
    /// only through `resume`.
    pub fn start(&mut self, now_ms: f64) {
        if self.state == ClockState::Stopped {
            self.state = ClockState::Running {
                anchor_wall_ms: now_ms,
                anchor_song_ms: self.song_ms,
            };
        }
    }

    /// Freezes song time. Idempotent: pausing a non-running clock
    /// does nothing.
    pub fn pause(&mut self, now_ms: f64) {
        if let ClockState::Running { .. } = self.state {
            self.update(now_ms);
            self.state = ClockState::Paused;
        }
    }

    /// Continues from the frozen value with no drift and no catch-up.
    /// Idempotent: resuming a clock that is not paused does nothing.
    pub fn resume(&mut self, now_ms: f64) {
        if self.state == ClockState::Paused {
            self.state = ClockState::Running {
                anchor_wall_ms: now_ms,
                anchor_song_ms: self.song_ms,
            };
        }
    }

    /// Halts without resetting song time to zero.
    pub fn stop(&mut self) {
        self.state = ClockState::Stopped;
    }

    pub fn reset(&mut self) {
        self.state = ClockState::Stopped;
        self.song_ms = 0.0;
    }

    /// Recomputes song time from wall time. No-op unless running.
    pub fn update(&mut self, now_ms: f64) {
        if let ClockState::Running {
            anchor_wall_ms,
            anchor_song_ms,
        } = self.state
        {
            self.song_ms = anchor_song_ms + (now_ms - anchor_wall_ms) * self.rate;
        }
    }

    /// Song time as of the last `update` (or pause point).
    pub fn song_time_ms(&self) -> f64 {
        self.song_ms
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state, ClockState::Running { .. })
    }

    pub fn is_paused(&self) -> bool {
        self.state == ClockState::Paused
    }

    pub fn beat_interval_ms(&self) -> f64 {
        self.beat_interval_ms
    }

    /// Whole beats elapsed since song start.
    pub fn beat_number(&self) -> i64 {
        (self.song_ms / self.beat_interval_ms).floor() as i64
    }

    /// Position within the current beat, 0..1.
    pub fn beat_progress(&self) -> f64 {
        let beat = self.song_ms / self.beat_interval_ms;
        beat - beat.floor()
    }
}
