use crossbeam_channel::{unbounded, Receiver, Sender};
use log::{debug, info};

use melody_chart::{Chart, ChartError};

use crate::difficulty::DifficultyConfig;
use crate::gameplay::judge::HitDetector;
use crate::gameplay::note::{ActiveNote, Rating};
use crate::gameplay::score::ScoreBoard;
use crate::gameplay::spawner::NoteSpawner;
use crate::gameplay::words::WordTracker;
use crate::input::events::InputEvent;
use crate::input::InputQueue;
use crate::session::phase::{Phase, PhaseMachine};
use crate::session::result::{build_result, Outcome, SessionResult};
use crate::time::clock::SongClock;

/// How a session is won.
#[derive(Debug, Clone, PartialEq)]
pub enum Mode {
    /// Resolve every note in the chart.
    Lesson,
    /// Drain the boss's health with successful hits; victory may
    /// arrive before the chart runs out.
    BossBattle(BossConfig),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BossConfig {
    pub max_health: u32,
    pub perfect_damage: u32,
    pub good_damage: u32,
    pub ok_damage: u32,
}

impl BossConfig {
    pub fn with_health(max_health: u32) -> Self {
        Self {
            max_health,
            perfect_damage: 10,
            good_damage: 7,
            ok_damage: 5,
        }
    }

    fn damage_for(&self, rating: Rating) -> u32 {
        match rating {
            Rating::Perfect => self.perfect_damage,
            Rating::Good => self.good_damage,
            Rating::Ok => self.ok_damage,
            Rating::Miss => 0,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct BossState {
    health: u32,
    max_health: u32,
}

/// The merged outbound event stream. One tagged enum instead of
/// listener interfaces: consumers match on what they care about and
/// ignore the rest.
#[derive(Debug, Clone)]
pub enum GameEvent {
    PhaseChanged { from: Phase, to: Phase },
    CountdownTick { seconds_remaining: u32 },
    NoteSpawned { note: ActiveNote, speed_factor: f32 },
    AllNotesSpawned,
    NoteHit { note: ActiveNote, rating: Rating, delta_ms: f64 },
    NoteMissed { note: ActiveNote },
    ScoreChanged { score: u64, points_added: u64 },
    ComboChanged { combo: u32 },
    MultiplierChanged { multiplier: f32 },
    ComboMilestone { combo: u32 },
    WordCollected { word: String, quality: Rating },
    Beat { beat_number: i64 },
    BossDamaged { health: u32, max_health: u32, damage: u32 },
    SessionEnded { result: SessionResult },
}

/// One play-through of a chart. Wires clock, spawner, detector,
/// score board, word tracker and phase machine together; performs no
/// gameplay logic of its own beyond sequencing calls and re-emitting
/// their results as events.
///
/// All state advances inside `tick(now_ms)` on the caller's thread.
/// Tap events may be submitted from anywhere; they are queued and
/// drained at the next tick boundary.
pub struct GameSession {
    chart: Chart,
    config: DifficultyConfig,
    mode: Mode,

    clock: SongClock,
    spawner: NoteSpawner,
    detector: HitDetector,
    score: ScoreBoard,
    words: WordTracker,
    phase: PhaseMachine,
    boss: Option<BossState>,

    inputs: InputQueue,
    events_tx: Sender<GameEvent>,
    events_rx: Receiver<GameEvent>,

    countdown_remaining: u32,
    next_countdown_at_ms: Option<f64>,
    last_beat: i64,
    result: Option<SessionResult>,
}

impl GameSession {
    /// Validates the chart, then wires a fresh set of components.
    /// Nothing is constructed for a malformed chart.
    pub fn new(chart: Chart, config: DifficultyConfig, mode: Mode) -> Result<Self, ChartError> {
        chart.validate()?;

        let (events_tx, events_rx) = unbounded();
        let mut session = Self {
            clock: SongClock::new(chart.bpm),
            spawner: NoteSpawner::new(&chart, config.look_ahead_ms, config.speed_factor),
            detector: HitDetector::new(config.windows, config.grace_ms),
            score: ScoreBoard::new(chart.total_notes(), config.multiplier_table.clone()),
            words: WordTracker::new(),
            phase: PhaseMachine::new(),
            boss: match &mode {
                Mode::Lesson => None,
                Mode::BossBattle(cfg) => Some(BossState {
                    health: cfg.max_health,
                    max_health: cfg.max_health,
                }),
            },
            inputs: InputQueue::new(),
            events_tx,
            events_rx,
            countdown_remaining: 0,
            next_countdown_at_ms: None,
            last_beat: -1,
            result: None,
            chart,
            config,
            mode,
        };
        info!(
            "session created: chart '{}', {} notes",
            session.chart.id,
            session.chart.total_notes()
        );
        session.transition(Phase::Loading);
        Ok(session)
    }

    // ── control surface ────────────────────────────────────────────

    /// Readiness signal: moves into the countdown, or straight into
    /// play when the countdown is configured away. Ignored unless
    /// the session is freshly loaded.
    pub fn start(&mut self, now_ms: f64) {
        if self.phase.current() != Phase::Loading {
            debug!("start ignored in phase {:?}", self.phase.current());
            return;
        }
        if self.config.countdown_secs == 0 {
            self.begin_playing(now_ms);
        } else {
            self.countdown_remaining = self.config.countdown_secs;
            self.next_countdown_at_ms = Some(now_ms + 1000.0);
            self.transition(Phase::Countdown);
            self.emit(GameEvent::CountdownTick {
                seconds_remaining: self.countdown_remaining,
            });
        }
    }

    pub fn pause(&mut self, now_ms: f64) {
        if self.transition(Phase::Paused).is_some() {
            self.clock.pause(now_ms);
        }
    }

    pub fn resume(&mut self, now_ms: f64) {
        if self.phase.current() != Phase::Paused {
            return;
        }
        if self.transition(Phase::Playing).is_some() {
            self.clock.resume(now_ms);
        }
    }

    /// Ends the session early. From any active phase this aborts
    /// with a partial summary; once over, it is a no-op.
    pub fn end(&mut self, _now_ms: f64) {
        if !self.phase.current().is_active() {
            return;
        }
        if self.transition(Phase::Aborted).is_some() {
            self.clock.stop();
            self.finish(Outcome::Aborted);
        }
    }

    /// Discards all session state and re-wires from the stored chart
    /// and config. Nothing carries over; a retry can never inherit
    /// score or combo from the previous run.
    pub fn restart(&mut self) {
        info!("session restart: chart '{}'", self.chart.id);
        let from = self.phase.current();
        self.clock = SongClock::new(self.chart.bpm);
        self.spawner =
            NoteSpawner::new(&self.chart, self.config.look_ahead_ms, self.config.speed_factor);
        self.detector = HitDetector::new(self.config.windows, self.config.grace_ms);
        self.score = ScoreBoard::new(self.chart.total_notes(), self.config.multiplier_table.clone());
        self.words = WordTracker::new();
        self.boss = match &self.mode {
            Mode::Lesson => None,
            Mode::BossBattle(cfg) => Some(BossState {
                health: cfg.max_health,
                max_health: cfg.max_health,
            }),
        };
        self.inputs = InputQueue::new();
        self.phase = PhaseMachine::new();
        self.countdown_remaining = 0;
        self.next_countdown_at_ms = None;
        self.last_beat = -1;
        self.result = None;
        self.emit(GameEvent::PhaseChanged {
            from,
            to: Phase::Idle,
        });
        self.transition(Phase::Loading);
    }

    /// Queues a tap. Safe from any thread; never fails, never
    /// penalizes — taps landing in the wrong phase are discarded at
    /// the next drain.
    pub fn submit_input(&self, lane: u8, time_ms: f64) {
        self.inputs.push(InputEvent::new(lane, time_ms));
    }

    /// Handle for input-producing threads.
    pub fn input_sender(&self) -> Sender<InputEvent> {
        self.inputs.sender()
    }

    /// Advances the whole session. The host calls this at a regular
    /// cadence; nothing moves between calls.
    pub fn tick(&mut self, now_ms: f64) {
        match self.phase.current() {
            Phase::Countdown => self.tick_countdown(now_ms),
            Phase::Playing => self.tick_playing(now_ms),
            _ => {
                // Inputs raced a phase transition; drop them.
                while self.inputs.pop().is_some() {}
            }
        }
    }

    // ── read surface ───────────────────────────────────────────────

    pub fn events(&self) -> Receiver<GameEvent> {
        self.events_rx.clone()
    }

    pub fn phase(&self) -> Phase {
        self.phase.current()
    }

    pub fn score(&self) -> u64 {
        self.score.score()
    }

    pub fn combo(&self) -> u32 {
        self.score.combo()
    }

    pub fn max_combo(&self) -> u32 {
        self.score.max_combo()
    }

    pub fn multiplier(&self) -> f32 {
        self.score.multiplier()
    }

    pub fn song_time_ms(&self) -> f64 {
        self.clock.song_time_ms()
    }

    /// Snapshot of the active-note set; the set itself is owned by
    /// the detector and never mutated from outside.
    pub fn active_notes(&self) -> &[ActiveNote] {
        self.detector.active_notes()
    }

    pub fn boss_health(&self) -> Option<(u32, u32)> {
        self.boss.map(|b| (b.health, b.max_health))
    }

    pub fn result(&self) -> Option<&SessionResult> {
        self.result.as_ref()
    }

    pub fn chart(&self) -> &Chart {
        &self.chart
    }

    // ── tick pipeline ──────────────────────────────────────────────

    fn tick_countdown(&mut self, now_ms: f64) {
        // Stray taps during the countdown are meaningless.
        while self.inputs.pop().is_some() {}

        while let Some(deadline) = self.next_countdown_at_ms {
            if now_ms < deadline {
                break;
            }
            self.countdown_remaining -= 1;
            if self.countdown_remaining == 0 {
                self.next_countdown_at_ms = None;
                self.begin_playing(deadline);
            } else {
                self.next_countdown_at_ms = Some(deadline + 1000.0);
                self.emit(GameEvent::CountdownTick {
                    seconds_remaining: self.countdown_remaining,
                });
            }
        }
    }

    fn begin_playing(&mut self, now_ms: f64) {
        if self.transition(Phase::Playing).is_some() {
            self.clock.start(now_ms);
        }
    }

    fn tick_playing(&mut self, now_ms: f64) {
        self.clock.update(now_ms);
        let song_ms = self.clock.song_time_ms();

        // Spawns first, so a note due this tick is already matchable
        // when the queued inputs drain.
        for note in self.spawner.poll(song_ms) {
            self.emit(GameEvent::NoteSpawned {
                note: note.clone(),
                speed_factor: self.spawner.speed_factor(),
            });
            self.detector.add(note);
        }
        if self.spawner.take_all_spawned() {
            self.emit(GameEvent::AllNotesSpawned);
        }
        self.detector.advance();

        while let Some(event) = self.inputs.pop() {
            // A hit may end the session (boss victory) mid-drain;
            // anything still queued is then stale.
            if self.phase.current() != Phase::Playing {
                break;
            }
            self.handle_input(event);
        }
        if self.phase.current() != Phase::Playing {
            return;
        }

        for note in self.detector.sweep_misses(song_ms) {
            let lost = self.score.process_miss();
            self.emit(GameEvent::NoteMissed { note });
            if lost > 0 {
                self.emit(GameEvent::ComboChanged { combo: 0 });
                self.emit(GameEvent::MultiplierChanged { multiplier: 1.0 });
            }
        }

        self.detector.cleanup(song_ms);
        self.emit_beats();

        if self.spawner.all_spawned() && self.detector.unresolved_count() == 0 {
            self.clock.stop();
            if self.transition(Phase::Completed).is_some() {
                self.finish(Outcome::Completed);
            }
        }
    }

    fn handle_input(&mut self, event: InputEvent) {
        let Some(judgment) = self.detector.check_hit(event.lane, event.time_ms) else {
            return;
        };

        let hit = self.score.process_hit(judgment.rating);
        self.emit(GameEvent::NoteHit {
            note: judgment.note.clone(),
            rating: judgment.rating,
            delta_ms: judgment.delta_ms,
        });
        self.emit(GameEvent::ScoreChanged {
            score: self.score.score(),
            points_added: hit.points,
        });
        self.emit(GameEvent::ComboChanged { combo: hit.combo });
        if hit.multiplier_changed {
            self.emit(GameEvent::MultiplierChanged {
                multiplier: hit.multiplier,
            });
        }
        if let Some(combo) = hit.milestone {
            self.emit(GameEvent::ComboMilestone { combo });
        }

        if let Some(collected) = self.words.process_hit(&judgment.note, judgment.rating) {
            self.emit(GameEvent::WordCollected {
                word: collected.word,
                quality: collected.quality,
            });
        }

        if let Mode::BossBattle(cfg) = &self.mode {
            let damage = cfg.damage_for(judgment.rating);
            if let Some(boss) = &mut self.boss {
                boss.health = boss.health.saturating_sub(damage);
                let (health, max_health) = (boss.health, boss.max_health);
                self.emit(GameEvent::BossDamaged {
                    health,
                    max_health,
                    damage,
                });
                if health == 0 {
                    self.clock.stop();
                    if self.transition(Phase::Completed).is_some() {
                        self.finish(Outcome::Victory);
                    }
                }
            }
        }
    }

    fn emit_beats(&mut self) {
        let beat = self.clock.beat_number();
        if beat > self.last_beat {
            self.last_beat = beat;
            self.emit(GameEvent::Beat { beat_number: beat });
        }
    }

    fn finish(&mut self, outcome: Outcome) {
        let result = build_result(outcome, &self.score, &self.words, self.clock.song_time_ms());
        info!(
            "session over: {:?}, score {}, max combo {}",
            result.outcome, result.score, result.max_combo
        );
        self.result = Some(result.clone());
        self.emit(GameEvent::SessionEnded { result });
    }

    fn transition(&mut self, to: Phase) -> Option<(Phase, Phase)> {
        let changed = self.phase.transition_to(to);
        if let Some((from, to)) = changed {
            self.emit(GameEvent::PhaseChanged { from, to });
        }
        changed
    }

    fn emit(&self, event: GameEvent) {
        let _ = self.events_tx.send(event);
    }
}
