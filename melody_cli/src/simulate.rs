use std::{fs, path::Path};

use anyhow::Context;
use serde::Deserialize;

use melody_chart::Chart;
use melody_engine::{BossConfig, Difficulty, GameEvent, GameSession, InputEvent, Mode};

/// One tick of the headless driver, matching a 60 fps frontend.
const STEP_MS: f64 = 16.0;

pub struct SimOptions {
    pub difficulty: Difficulty,
    pub autoplay: bool,
    pub taps: Option<Vec<InputEvent>>,
    pub boss_health: Option<u32>,
    pub json_only: bool,
}

#[derive(Debug, Deserialize)]
struct TapSpec {
    lane: u8,
    time_ms: f64,
}

pub fn load_taps(path: &Path) -> anyhow::Result<Vec<InputEvent>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read: {}", path.display()))?;
    let specs: Vec<TapSpec> = serde_json::from_str(&text)
        .with_context(|| format!("failed to parse taps: {}", path.display()))?;
    Ok(specs
        .into_iter()
        .map(|t| InputEvent::new(t.lane, t.time_ms))
        .collect())
}

/// Drives a session with a fixed step and synthetic wall time. Wall
/// and song time coincide because the clock starts at zero and the
/// countdown is disabled, so tap timestamps double as the submit
/// schedule.
pub fn run_simulation(chart: Chart, options: SimOptions) -> anyhow::Result<()> {
    let mut taps: Vec<InputEvent> = if options.autoplay {
        chart
            .notes
            .iter()
            .map(|n| InputEvent::new(n.lane, n.time_ms()))
            .collect()
    } else {
        options.taps.unwrap_or_default()
    };
    taps.sort_by(|a, b| a.time_ms.total_cmp(&b.time_ms));

    let mut config = options.difficulty.config();
    config.countdown_secs = 0;

    let mode = match options.boss_health {
        Some(health) => Mode::BossBattle(BossConfig::with_health(health)),
        None => Mode::Lesson,
    };

    let deadline_ms = chart.duration_secs() as f64 * 1000.0 + config.grace_ms + 5_000.0;
    let mut session = GameSession::new(chart, config, mode)?;
    let events = session.events();

    session.start(0.0);

    let mut now_ms = 0.0;
    let mut next_tap = 0usize;
    while !session.phase().is_over() && now_ms <= deadline_ms {
        while next_tap < taps.len() && taps[next_tap].time_ms <= now_ms {
            session.submit_input(taps[next_tap].lane, taps[next_tap].time_ms);
            next_tap += 1;
        }
        session.tick(now_ms);
        if !options.json_only {
            for event in events.try_iter() {
                print_event(now_ms, &event);
            }
        }
        now_ms += STEP_MS;
    }

    let result = session
        .result()
        .context("session never finished; chart may never resolve")?;
    if options.json_only {
        println!("{}", serde_json::to_string_pretty(result)?);
    } else {
        println!();
        println!(
            "{:?}: score {} ({} stars), max combo {}, accuracy {:.1}%",
            result.outcome, result.score, result.stars, result.max_combo, result.accuracy
        );
        println!(
            "  perfect {} / good {} / ok {} / miss {}  of {} notes",
            result.perfect_count,
            result.good_count,
            result.ok_count,
            result.miss_count,
            result.total_notes
        );
        if let Some(grade) = result.grade {
            println!("  grade {:?}", grade);
        }
        if !result.words.is_empty() {
            println!("  words: {}", result.words.join(", "));
        }
    }

    Ok(())
}

fn print_event(now_ms: f64, event: &GameEvent) {
    match event {
        GameEvent::PhaseChanged { from, to } => {
            println!("[{:8.0}] phase {:?} -> {:?}", now_ms, from, to);
        }
        GameEvent::CountdownTick { seconds_remaining } => {
            println!("[{:8.0}] countdown {}", now_ms, seconds_remaining);
        }
        GameEvent::NoteHit {
            note,
            rating,
            delta_ms,
        } => {
            println!(
                "[{:8.0}] hit   lane {} {:?} ({:+.1}ms) '{}'",
                now_ms, note.lane, rating, delta_ms, note.pitch
            );
        }
        GameEvent::NoteMissed { note } => {
            println!(
                "[{:8.0}] miss  lane {} '{}' (target {:.0}ms)",
                now_ms, note.lane, note.pitch, note.target_time_ms
            );
        }
        GameEvent::ComboMilestone { combo } => {
            println!("[{:8.0}] combo milestone {}", now_ms, combo);
        }
        GameEvent::MultiplierChanged { multiplier } => {
            println!("[{:8.0}] multiplier x{:.2}", now_ms, multiplier);
        }
        GameEvent::WordCollected { word, quality } => {
            println!("[{:8.0}] word '{}' ({:?})", now_ms, word, quality);
        }
        GameEvent::BossDamaged {
            health,
            max_health,
            damage,
        } => {
            println!(
                "[{:8.0}] boss -{} ({}/{})",
                now_ms, damage, health, max_health
            );
        }
        GameEvent::AllNotesSpawned => {
            println!("[{:8.0}] all notes spawned", now_ms);
        }
        GameEvent::SessionEnded { .. } => {}
        // Spawns, beats and per-hit score deltas are too chatty for
        // the timeline.
        GameEvent::NoteSpawned { .. }
        | GameEvent::Beat { .. }
        | GameEvent::ScoreChanged { .. }
        | GameEvent::ComboChanged { .. } => {}
    }
}
