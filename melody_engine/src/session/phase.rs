use log::debug;

/// Session lifecycle. One-directional except Playing ⇄ Paused;
/// `restart` replaces the whole machine instead of rewinding it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Idle,
    Loading,
    Countdown,
    Playing,
    Paused,
    Completed,
    Aborted,
}

impl Phase {
    pub fn is_active(self) -> bool {
        matches!(self, Phase::Countdown | Phase::Playing | Phase::Paused)
    }

    pub fn is_over(self) -> bool {
        matches!(self, Phase::Completed | Phase::Aborted)
    }

    pub fn can_transition(from: Phase, to: Phase) -> bool {
        match from {
            Phase::Idle => to == Phase::Loading,
            Phase::Loading => matches!(to, Phase::Countdown | Phase::Playing),
            Phase::Countdown => matches!(to, Phase::Playing | Phase::Aborted),
            Phase::Playing => matches!(to, Phase::Paused | Phase::Completed | Phase::Aborted),
            Phase::Paused => matches!(to, Phase::Playing | Phase::Aborted),
            Phase::Completed | Phase::Aborted => false,
        }
    }
}

/// Tracks the current phase and gates transitions. Illegal requests
/// are expected races between UI and engine, so they are logged and
/// ignored rather than surfaced as errors.
#[derive(Debug)]
pub struct PhaseMachine {
    current: Phase,
    previous: Phase,
}

impl PhaseMachine {
    pub fn new() -> Self {
        Self {
            current: Phase::Idle,
            previous: Phase::Idle,
        }
    }

    pub fn current(&self) -> Phase {
        self.current
    }

    pub fn previous(&self) -> Phase {
        self.previous
    }

    /// Returns `(from, to)` when the transition happened.
    pub fn transition_to(&mut self, to: Phase) -> Option<(Phase, Phase)> {
        if self.current == to {
            return None;
        }
        if !Phase::can_transition(self.current, to) {
            debug!("ignoring invalid phase transition {:?} -> {:?}", self.current, to);
            return None;
        }
        let from = self.current;
        self.previous = from;
        self.current = to;
        debug!("phase {:?} -> {:?}", from, to);
        Some((from, to))
    }
}

impl Default for PhaseMachine {
    fn default() -> Self {
        Self::new()
    }
}
