use melody_engine::SongClock;

#[test]
fn test_clock_follows_wall_time() {
    let mut clock = SongClock::new(120);
    clock.start(10_000.0);

    clock.update(10_000.0);
    assert!((clock.song_time_ms() - 0.0).abs() < 1e-9);

    // 250ms of wall time -> 250ms of song time at rate 1.0.
    clock.update(10_250.0);
    assert!((clock.song_time_ms() - 250.0).abs() < 1e-9);
}

#[test]
fn test_pause_freezes_and_resume_continues_without_drift() {
    let mut clock = SongClock::new(120);
    clock.start(0.0);
    clock.update(5_000.0);
    assert!((clock.song_time_ms() - 5_000.0).abs() < 1e-9);

    // Pause at wall 5_000 (song 5_000), then let 3 seconds of wall
    // time pass. Song time must not move.
    clock.pause(5_000.0);
    clock.update(8_000.0);
    assert!((clock.song_time_ms() - 5_000.0).abs() < 1e-9);
    assert!(clock.is_paused());

    // Resume at wall 8_000. Song continues from 5_000, so wall
    // 8_500 is song 5_500: no jump, no catch-up.
    clock.resume(8_000.0);
    clock.update(8_500.0);
    assert!((clock.song_time_ms() - 5_500.0).abs() < 1e-9);
}

#[test]
fn test_pause_and_resume_are_idempotent() {
    let mut clock = SongClock::new(120);

    // Pausing a stopped clock does nothing.
    clock.pause(100.0);
    assert!(!clock.is_paused());

    // Resuming a running clock does nothing.
    clock.start(0.0);
    clock.resume(50.0);
    clock.update(100.0);
    assert!((clock.song_time_ms() - 100.0).abs() < 1e-9);

    // Double pause keeps the first freeze point.
    clock.pause(100.0);
    clock.pause(400.0);
    assert!((clock.song_time_ms() - 100.0).abs() < 1e-9);
}

#[test]
fn test_stop_keeps_value_and_start_continues() {
    let mut clock = SongClock::new(120);
    clock.start(0.0);
    clock.update(2_000.0);
    clock.stop();

    // Stopped: updates are ignored, value is kept.
    clock.update(9_000.0);
    assert!((clock.song_time_ms() - 2_000.0).abs() < 1e-9);
    assert!(!clock.is_running());

    // Starting again continues from the kept value.
    clock.start(10_000.0);
    clock.update(10_100.0);
    assert!((clock.song_time_ms() - 2_100.0).abs() < 1e-9);

    clock.reset();
    assert!((clock.song_time_ms() - 0.0).abs() < 1e-9);
}

#[test]
fn test_start_while_running_is_ignored() {
    let mut clock = SongClock::new(120);
    clock.start(0.0);
    clock.update(1_000.0);

    // A second start must not re-anchor the clock.
    clock.start(1_000.0);
    clock.update(2_000.0);
    assert!((clock.song_time_ms() - 2_000.0).abs() < 1e-9);
}

#[test]
fn test_beat_tracking_at_120_bpm() {
    // 120 bpm -> 500ms per beat.
    let mut clock = SongClock::new(120);
    assert!((clock.beat_interval_ms() - 500.0).abs() < 1e-9);

    clock.start(0.0);
    clock.update(0.0);
    assert_eq!(clock.beat_number(), 0);

    clock.update(499.0);
    assert_eq!(clock.beat_number(), 0);
    assert!((clock.beat_progress() - 0.998).abs() < 1e-6);

    clock.update(500.0);
    assert_eq!(clock.beat_number(), 1);

    clock.update(1_250.0);
    assert_eq!(clock.beat_number(), 2);
    assert!((clock.beat_progress() - 0.5).abs() < 1e-9);
}

#[test]
fn test_scaled_rate_for_tooling() {
    // Double-speed clock: 100ms of wall time is 200ms of song time.
    let mut clock = SongClock::new(120).with_rate(2.0);
    clock.start(0.0);
    clock.update(100.0);
    assert!((clock.song_time_ms() - 200.0).abs() < 1e-9);
}
