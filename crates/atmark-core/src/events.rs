//! Typed overlay events.
//!
//! The event vocabulary is a closed enum and [`EventBus`] is a typed
//! publish/subscribe channel, so hosts cannot subscribe to a misspelled
//! event. Emission order follows subscription order; consumers must treat a
//! repeated `Open` with identical payload as an update, not a new session.

use serde::{Deserialize, Serialize};

use crate::document::EditorId;
use crate::trigger::TriggerKind;

/// Notifications from the plugin state machine to the UI layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum OverlayEvent {
    /// Open the suggestion panel, or update it if already open.
    Open {
        query: String,
        kind: TriggerKind,
        editor: EditorId,
    },
    /// Close the suggestion panel.
    Close,
}

/// Handle for removing a subscription from the bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&OverlayEvent)>;

/// Single-threaded fan-out channel for [`OverlayEvent`].
#[derive(Default)]
pub struct EventBus {
    next_id: u64,
    listeners: Vec<(SubscriptionId, Listener)>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, listener: impl FnMut(&OverlayEvent) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Removes a subscription. Unknown ids are ignored.
    pub fn unsubscribe(&mut self, id: SubscriptionId) {
        self.listeners.retain(|(existing, _)| *existing != id);
    }

    pub fn emit(&mut self, event: &OverlayEvent) {
        for (_, listener) in &mut self.listeners {
            listener(event);
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.listeners.len()
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("subscribers", &self.listeners.len())
            .finish()
    }
}
