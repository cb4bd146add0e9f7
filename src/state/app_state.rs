//! Viewer state (pure).
//!
//! Couples the gesture store with the ingestor and the bits of UI state the
//! renderer needs. Everything here is driven by explicit calls from the event
//! loop, so it is testable without a terminal.

use crate::ingest::LineIngestor;
use crate::model::KeyAction;
use crate::source::Incoming;
use crate::state::GestureStateStore;
use rand::Rng;
use tracing::debug;

/// What the event loop should do after handling an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Keep running.
    Continue,
    /// Exit the viewer.
    Quit,
}

/// All mutable viewer state, owned by the event loop thread.
#[derive(Debug)]
pub struct AppState {
    store: GestureStateStore,
    ingestor: LineIngestor,
    decay_factor: f64,
    /// Frames rendered so far; drives the string animation phase.
    pub frame_count: u64,
    /// Whether the trigger legend overlay is shown.
    pub help_visible: bool,
}

impl AppState {
    /// Fresh state with the given per-frame decay factor.
    pub fn new(decay_factor: f64) -> Self {
        Self {
            store: GestureStateStore::new(),
            ingestor: LineIngestor::new(),
            decay_factor,
            frame_count: 0,
            help_visible: false,
        }
    }

    /// Read-only access to the gesture store.
    pub fn store(&self) -> &GestureStateStore {
        &self.store
    }

    /// Read-only access to the ingestor.
    pub fn ingestor(&self) -> &LineIngestor {
        &self.ingestor
    }

    /// Configured per-frame decay factor.
    pub fn decay_factor(&self) -> f64 {
        self.decay_factor
    }

    /// Feed transport input into the store. Returns gestures registered.
    ///
    /// A lost link discards the unfinished line so it cannot swallow the first
    /// line of the next connection.
    pub fn ingest<I>(&mut self, items: I) -> usize
    where
        I: IntoIterator<Item = Incoming>,
    {
        let mut registered = 0;
        for item in items {
            match item {
                Incoming::Text(text) => registered += self.ingestor.feed(&text, &mut self.store),
                Incoming::LinkLost => self.ingestor.discard_pending(),
            }
        }
        registered
    }

    /// Advance one frame: decay velocity and bump the frame counter.
    pub fn tick(&mut self) {
        self.store.decay(self.decay_factor);
        self.frame_count = self.frame_count.wrapping_add(1);
    }

    /// Apply a key action.
    pub fn apply<R: Rng + ?Sized>(&mut self, action: KeyAction, rng: &mut R) -> Flow {
        match action {
            KeyAction::Fire(trigger) => {
                let velocity = trigger.sample_velocity(rng);
                debug!(?trigger, velocity, "Simulated trigger");
                self.store.register_state(trigger.gesture_name(), velocity);
            }
            KeyAction::Help => self.help_visible = !self.help_visible,
            KeyAction::Quit => return Flow::Quit,
        }
        Flow::Continue
    }
}
