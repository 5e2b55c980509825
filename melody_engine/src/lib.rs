//! Rhythm-gameplay engine: turns an immutable chart into a live,
//! tick-driven session with hit detection, scoring and a phase
//! state machine. The engine owns no clock source, threads or I/O;
//! the host drives it by calling `GameSession::tick` with wall time
//! and feeding tap events through the input queue.

pub mod difficulty;
pub mod gameplay;
pub mod input;
pub mod session;
pub mod time;

pub use difficulty::{Difficulty, DifficultyConfig};
pub use gameplay::judge::{HitDetector, HitJudgment, TimingWindows};
pub use gameplay::note::{ActiveNote, NoteState, Rating};
pub use gameplay::score::{MultiplierTable, ScoreBoard};
pub use gameplay::spawner::NoteSpawner;
pub use gameplay::words::{CollectedWord, WordTracker};
pub use input::events::InputEvent;
pub use input::InputQueue;
pub use session::coordinator::{BossConfig, GameEvent, GameSession, Mode};
pub use session::phase::Phase;
pub use session::result::{Grade, Outcome, SessionResult};
pub use time::clock::SongClock;
