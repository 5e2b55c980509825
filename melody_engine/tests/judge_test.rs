use melody_chart::NoteDef;
use melody_engine::{ActiveNote, HitDetector, NoteState, Rating, TimingWindows};

fn falling_note(id: u64, time_secs: f32, lane: u8) -> ActiveNote {
    ActiveNote::spawn(id, id as usize, &NoteDef::tap("do", time_secs, lane), 0.0)
}

/// Detector with the standard 50/100/200 windows and a 300ms grace,
/// pre-loaded with the given notes already promoted to `Falling`.
fn detector_with(notes: Vec<ActiveNote>) -> HitDetector {
    let mut detector = HitDetector::new(TimingWindows::normal(), 300.0);
    for note in notes {
        detector.add(note);
    }
    detector.advance();
    detector
}

#[test]
fn test_window_boundaries_are_inclusive() {
    let windows = TimingWindows::normal();

    // Exactly on the perfect edge (50ms) still rates Perfect.
    assert_eq!(windows.classify(50.0), Some(Rating::Perfect));
    assert_eq!(windows.classify(-50.0), Some(Rating::Perfect));
    assert_eq!(windows.classify(50.001), Some(Rating::Good));

    assert_eq!(windows.classify(100.0), Some(Rating::Good));
    assert_eq!(windows.classify(100.001), Some(Rating::Ok));

    assert_eq!(windows.classify(200.0), Some(Rating::Ok));
    assert_eq!(windows.classify(200.001), None);
    assert_eq!(windows.classify(0.0), Some(Rating::Perfect));
}

#[test]
fn test_perfect_hit() {
    // Note at 1.0s, tap at 1_012ms -> +12ms -> Perfect.
    let mut detector = detector_with(vec![falling_note(0, 1.0, 1)]);
    let judgment = detector.check_hit(1, 1_012.0).expect("should match");
    assert_eq!(judgment.rating, Rating::Perfect);
    assert!((judgment.delta_ms - 12.0).abs() < 1e-9);
    assert_eq!(judgment.note.state, NoteState::Hit);
    assert_eq!(detector.unresolved_count(), 0);
}

#[test]
fn test_early_ok_hit() {
    // Note at 1.0s, tap at 850ms -> -150ms -> Ok (early).
    let mut detector = detector_with(vec![falling_note(0, 1.0, 1)]);
    let judgment = detector.check_hit(1, 850.0).expect("should match");
    assert_eq!(judgment.rating, Rating::Ok);
    assert!((judgment.delta_ms + 150.0).abs() < 1e-9);
}

#[test]
fn test_stray_tap_consumes_nothing() {
    let mut detector = detector_with(vec![falling_note(0, 1.0, 1)]);

    // 250ms early is outside the widest window: no judgment, and
    // the note is still matchable afterwards.
    assert!(detector.check_hit(1, 750.0).is_none());
    assert_eq!(detector.unresolved_count(), 1);

    // Wrong lane is a stray too.
    assert!(detector.check_hit(2, 1_000.0).is_none());

    let judgment = detector.check_hit(1, 1_000.0).expect("still matchable");
    assert_eq!(judgment.rating, Rating::Perfect);
}

#[test]
fn test_nearest_note_wins() {
    // Two lane-1 notes at 1.0s and 1.3s. A tap at 1_200ms is 200ms
    // late for the first and 100ms early for the second: the second
    // is nearer and must be the one consumed.
    let mut detector = detector_with(vec![falling_note(0, 1.0, 1), falling_note(1, 1.3, 1)]);

    let judgment = detector.check_hit(1, 1_200.0).expect("should match");
    assert_eq!(judgment.note.id, 1);
    assert_eq!(judgment.rating, Rating::Good);

    // The first note is untouched and still pending.
    assert_eq!(detector.unresolved_count(), 1);
}

#[test]
fn test_equidistant_tie_goes_to_earlier_note() {
    // Notes at 1.0s and 1.2s; a tap at 1_100ms is exactly 100ms from
    // both. The earlier target wins.
    let mut detector = detector_with(vec![falling_note(0, 1.0, 1), falling_note(1, 1.2, 1)]);

    let judgment = detector.check_hit(1, 1_100.0).expect("should match");
    assert_eq!(judgment.note.id, 0);
}

#[test]
fn test_note_is_consumed_once() {
    let mut detector = detector_with(vec![falling_note(0, 1.0, 1)]);

    detector.check_hit(1, 1_000.0).expect("first tap matches");
    // The same note cannot be hit again.
    assert!(detector.check_hit(1, 1_010.0).is_none());
}

#[test]
fn test_spawning_notes_are_not_matchable_until_advanced() {
    let mut detector = HitDetector::new(TimingWindows::normal(), 300.0);
    detector.add(falling_note(0, 1.0, 1));

    // Still `Spawning`: invisible to matching.
    assert!(detector.check_hit(1, 1_000.0).is_none());

    detector.advance();
    assert!(detector.check_hit(1, 1_000.0).is_some());
}

#[test]
fn test_miss_sweep_honors_grace_window() {
    let mut detector = detector_with(vec![falling_note(0, 1.0, 1)]);

    // Target 1_000 + grace 300 = 1_300. At exactly 1_300 the note
    // still stands; it becomes a miss only strictly past that.
    assert!(detector.sweep_misses(1_300.0).is_empty());

    let missed = detector.sweep_misses(1_301.0);
    assert_eq!(missed.len(), 1);
    assert_eq!(missed[0].rating, Some(Rating::Miss));
    assert_eq!(detector.unresolved_count(), 0);

    // A later sweep does not report the same note again.
    assert!(detector.sweep_misses(2_000.0).is_empty());
}

#[test]
fn test_miss_sweep_reports_in_target_order() {
    // Loaded out of order on purpose.
    let mut detector = detector_with(vec![
        falling_note(0, 2.0, 1),
        falling_note(1, 1.0, 2),
        falling_note(2, 1.5, 3),
    ]);

    let missed = detector.sweep_misses(10_000.0);
    let targets: Vec<f64> = missed.iter().map(|n| n.target_time_ms).collect();
    assert_eq!(targets, vec![1_000.0, 1_500.0, 2_000.0]);
}

#[test]
fn test_cleanup_removes_resolved_notes_after_delay() {
    let mut detector = detector_with(vec![falling_note(0, 1.0, 1)]);
    detector.check_hit(1, 1_000.0).expect("should match");

    // Resolved at 1_000; the default display delay is 500ms.
    detector.cleanup(1_400.0);
    assert_eq!(detector.active_notes().len(), 1);

    detector.cleanup(1_500.0);
    assert!(detector.active_notes().is_empty());
}

#[test]
fn test_relaxed_windows_accept_a_wider_tap() {
    // +130ms: Ok under the normal windows, Good under the relaxed
    // ones (80/150/220).
    let mut normal = detector_with(vec![falling_note(0, 1.0, 1)]);
    let judgment = normal.check_hit(1, 1_130.0).expect("should match");
    assert_eq!(judgment.rating, Rating::Ok);

    let mut relaxed = HitDetector::new(TimingWindows::relaxed(), 300.0);
    relaxed.add(falling_note(0, 1.0, 1));
    relaxed.advance();
    let judgment = relaxed.check_hit(1, 1_130.0).expect("should match");
    assert_eq!(judgment.rating, Rating::Good);
}
