pub mod events;

use self::events::InputEvent;
use crossbeam_channel::{unbounded, Receiver, Sender};

/// Queue between asynchronous tap sources and the tick loop. Taps
/// may arrive from any thread; the session drains them at the next
/// tick boundary so all engine state mutates on one timeline.
pub struct InputQueue {
    sender: Sender<InputEvent>,
    receiver: Receiver<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        let (sender, receiver) = unbounded();
        Self { sender, receiver }
    }

    pub fn push(&self, event: InputEvent) {
        let _ = self.sender.send(event);
    }

    /// Non-blocking. Returns `None` when the queue is empty.
    pub fn pop(&self) -> Option<InputEvent> {
        self.receiver.try_recv().ok()
    }

    /// A clonable handle for input-producing threads.
    pub fn sender(&self) -> Sender<InputEvent> {
        self.sender.clone()
    }
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new()
    }
}
