pub mod error;
pub mod model;

pub use error::ChartError;
pub use model::{Chart, NoteDef, NoteKind};

#[cfg(test)]
mod tests {
    use super::model::*;
    use super::ChartError;

    fn simple_chart() -> Chart {
        Chart {
            id: "lesson_01".to_string(),
            title: "First Steps".to_string(),
            bpm: 100,
            lane_count: 4,
            notes: vec![
                NoteDef::tap("do", 1.0, 0),
                NoteDef::tap("re", 1.5, 1).with_word("cat"),
                NoteDef::tap("mi", 2.0, 2),
            ],
        }
    }

    #[test]
    fn test_chart_serialization() {
        let chart = simple_chart();

        let json = serde_json::to_string(&chart).expect("failed to serialize chart");
        let back: Chart = serde_json::from_str(&json).expect("failed to deserialize chart");

        assert_eq!(back.id, "lesson_01");
        assert_eq!(back.notes.len(), 3);
        assert_eq!(back.notes[1].word.as_deref(), Some("cat"));
        assert_eq!(back.notes[0].kind, NoteKind::Tap);
    }

    #[test]
    fn test_defaults_fill_in_when_omitted() {
        // A minimal note as an external lesson loader would emit it.
        let json = r#"{
            "id": "x", "title": "x", "bpm": 120,
            "notes": [{ "pitch": "do", "time_secs": 0.5, "lane": 0 }]
        }"#;
        let chart: Chart = serde_json::from_str(json).expect("parse");

        assert_eq!(chart.lane_count, 4);
        assert_eq!(chart.notes[0].duration_secs, 0.5);
        assert_eq!(chart.notes[0].kind, NoteKind::Tap);
        assert!(chart.notes[0].word.is_none());
    }

    #[test]
    fn test_validate_accepts_well_formed_chart() {
        assert!(simple_chart().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_chart() {
        let mut chart = simple_chart();
        chart.notes.clear();
        assert!(matches!(chart.validate(), Err(ChartError::Empty)));
    }

    #[test]
    fn test_validate_rejects_lane_out_of_range() {
        let mut chart = simple_chart();
        chart.notes[1].lane = 4;
        match chart.validate() {
            Err(ChartError::LaneOutOfRange { index, lane, lane_count }) => {
                assert_eq!(index, 1);
                assert_eq!(lane, 4);
                assert_eq!(lane_count, 4);
            }
            other => panic!("expected LaneOutOfRange, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_rejects_non_finite_and_negative_times() {
        let mut chart = simple_chart();
        chart.notes[0].time_secs = f32::NAN;
        assert!(matches!(chart.validate(), Err(ChartError::InvalidTime { index: 0, .. })));

        let mut chart = simple_chart();
        chart.notes[2].time_secs = -0.25;
        assert!(matches!(chart.validate(), Err(ChartError::InvalidTime { index: 2, .. })));
    }

    #[test]
    fn test_validate_rejects_negative_duration() {
        let mut chart = simple_chart();
        chart.notes[0].duration_secs = -1.0;
        assert!(matches!(chart.validate(), Err(ChartError::InvalidDuration { index: 0, .. })));
    }

    #[test]
    fn test_validate_rejects_bad_bpm() {
        let mut chart = simple_chart();
        chart.bpm = 0;
        assert!(matches!(chart.validate(), Err(ChartError::InvalidBpm { bpm: 0 })));

        chart.bpm = 500;
        assert!(matches!(chart.validate(), Err(ChartError::InvalidBpm { bpm: 500 })));
    }

    #[test]
    fn test_duration_includes_tail() {
        let chart = simple_chart();
        // Last note ends at 2.0 + 0.5, plus the 2 s tail.
        assert!((chart.duration_secs() - 4.5).abs() < 1e-6);
        assert_eq!(chart.beat_interval_ms(), 600.0);
    }
}
