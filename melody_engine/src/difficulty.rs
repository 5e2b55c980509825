use crate::gameplay::judge::{TimingWindows, DEFAULT_GRACE_MS};
use crate::gameplay::score::MultiplierTable;
use crate::gameplay::spawner::DEFAULT_LOOK_AHEAD_MS;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Difficulty {
    Beginner,
    Easy,
    Normal,
    Hard,
    Expert,
}

impl Difficulty {
    fn index(self) -> u32 {
        match self {
            Difficulty::Beginner => 0,
            Difficulty::Easy => 1,
            Difficulty::Normal => 2,
            Difficulty::Hard => 3,
            Difficulty::Expert => 4,
        }
    }

    pub fn config(self) -> DifficultyConfig {
        // Notes travel faster at higher levels; the spawn horizon
        // shrinks to match so on-screen density stays constant.
        let speed_factor = 1.0 + 0.2 * self.index() as f32;
        let windows = match self {
            Difficulty::Beginner | Difficulty::Easy => TimingWindows::relaxed(),
            Difficulty::Normal => TimingWindows::normal(),
            Difficulty::Hard | Difficulty::Expert => TimingWindows::strict(),
        };
        DifficultyConfig {
            windows,
            grace_ms: DEFAULT_GRACE_MS,
            look_ahead_ms: DEFAULT_LOOK_AHEAD_MS / speed_factor as f64,
            speed_factor,
            countdown_secs: 3,
            multiplier_table: MultiplierTable::default(),
        }
    }
}

/// Everything tunable about a session. `Difficulty::config` provides
/// presets; sessions accept hand-built configs too.
#[derive(Debug, Clone, PartialEq)]
pub struct DifficultyConfig {
    pub windows: TimingWindows,
    pub grace_ms: f64,
    pub look_ahead_ms: f64,
    /// Presentation-only travel rate; song time is never scaled by it.
    pub speed_factor: f32,
    /// 0 skips the countdown and starts playing immediately.
    pub countdown_secs: u32,
    pub multiplier_table: MultiplierTable,
}

impl Default for DifficultyConfig {
    fn default() -> Self {
        Difficulty::Normal.config()
    }
}
