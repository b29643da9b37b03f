//! Event bus for broadcasting simulation events

use crate::event::FireworkEvent;

/// A simple event queue that the simulation pushes to and the player drains
pub struct EventBus {
    events: Vec<FireworkEvent>,
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl EventBus {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Push an event onto the bus
    pub fn push(&mut self, event: FireworkEvent) {
        self.events.push(event);
    }

    /// Drain all events from the bus, returning them
    pub fn drain(&mut self) -> Vec<FireworkEvent> {
        std::mem::take(&mut self.events)
    }
}
