/// A single player tap: which lane, and when in song time it landed.
/// The host translates device timestamps into song milliseconds
/// before submitting.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InputEvent {
    pub lane: u8,
    pub time_ms: f64,
}

impl InputEvent {
    pub fn new(lane: u8, time_ms: f64) -> Self {
        Self { lane, time_ms }
    }
}
