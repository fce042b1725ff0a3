//! Plugin lifecycle around the tracker.
//!
//! Mirrors how a client plugin is driven: `start_up` registers the overlay,
//! events are dispatched one at a time, `shut_down` unregisters and resets.

use crate::event_models::GameEvent;
use crate::host::GameHost;
use crate::overlay::{self, OverlayLine};
use crate::tracker::Tracker;

#[derive(Debug, Clone)]
pub struct CannonDamagePlugin {
    tracker: Tracker,
    overlay_registered: bool,
}

impl CannonDamagePlugin {
    pub fn new(host: &impl GameHost) -> Self {
        Self {
            tracker: Tracker::new(host),
            overlay_registered: false,
        }
    }

    pub fn start_up(&mut self) {
        tracing::info!("Cannon Damage plugin started");
        self.overlay_registered = true;
    }

    pub fn shut_down(&mut self, host: &impl GameHost) {
        tracing::info!("Cannon Damage plugin stopped");
        self.overlay_registered = false;
        self.tracker.reset(host);
    }

    pub fn dispatch(&mut self, event: &GameEvent, host: &impl GameHost) {
        self.tracker.handle_event(event, host);
    }

    pub fn overlay(&self, host: &impl GameHost) -> Option<Vec<OverlayLine>> {
        if !self.overlay_registered {
            return None;
        }
        overlay::render(&self.tracker, host.now_ms())
    }

    pub fn is_running(&self) -> bool {
        self.overlay_registered
    }

    pub fn tracker(&self) -> &Tracker {
        &self.tracker
    }

    pub fn tracker_mut(&mut self) -> &mut Tracker {
        &mut self.tracker
    }
}
