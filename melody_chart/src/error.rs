use thiserror::Error;

/// Why a chart was rejected at session creation. The caller must fix
/// the chart and retry; nothing is wired when validation fails.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ChartError {
    #[error("chart has no notes")]
    Empty,

    #[error("bpm {bpm} outside supported range {min}..={max}", min = crate::model::MIN_BPM, max = crate::model::MAX_BPM)]
    InvalidBpm { bpm: u32 },

    #[error("note {index}: lane {lane} out of range (chart has {lane_count} lanes)")]
    LaneOutOfRange {
        index: usize,
        lane: u8,
        lane_count: u8,
    },

    #[error("note {index}: target time {time_secs} is not a finite non-negative number")]
    InvalidTime { index: usize, time_secs: f32 },

    #[error("note {index}: duration {duration_secs} is not a finite non-negative number")]
    InvalidDuration { index: usize, duration_secs: f32 },
}
