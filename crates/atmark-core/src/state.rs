//! Plugin state machine.
//!
//! [`MentionPlugin`] owns the per-document derived trigger state. The host
//! editor calls [`apply_transaction`](MentionPlugin::apply_transaction)
//! after every transaction that changed the selection or text; the plugin
//! re-derives [`MatchState`] from the buffer and notifies the UI layer over
//! its event bus. It is a reducer: it never mutates the document itself,
//! and any error while deriving state collapses to `Idle`; the overlay
//! closing is always preferred over interrupting the edit session.

use tracing::{debug, warn};

use crate::document::{DocumentBuffer, EditorId};
use crate::error::Result;
use crate::events::{EventBus, OverlayEvent, SubscriptionId};
use crate::trigger::{TriggerConfig, TriggerMatch, TriggerMatcher};

/// Derived trigger state for one document.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum MatchState {
    #[default]
    Idle,
    Matching(TriggerMatch),
}

impl MatchState {
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Matching(_))
    }

    pub fn matched(&self) -> Option<&TriggerMatch> {
        match self {
            Self::Matching(found) => Some(found),
            Self::Idle => None,
        }
    }
}

/// Optional transaction issued by the host after each state evaluation.
///
/// Must be trigger-neutral: the plugin guards against re-entrant
/// evaluation, so a follow-up that edits the buffer will not cascade into
/// another follow-up.
pub type FollowUpFn = Box<dyn FnMut(&MatchState, &mut dyn DocumentBuffer)>;

/// The trigger-detection plugin for one editor.
pub struct MentionPlugin {
    editor: EditorId,
    matcher: TriggerMatcher,
    state: MatchState,
    bus: EventBus,
    follow_up: Option<FollowUpFn>,
    in_follow_up: bool,
}

impl MentionPlugin {
    pub fn new(editor: EditorId, config: TriggerConfig) -> Result<Self> {
        Ok(Self {
            editor,
            matcher: TriggerMatcher::new(config)?,
            state: MatchState::Idle,
            bus: EventBus::new(),
            follow_up: None,
            in_follow_up: false,
        })
    }

    /// Registers a follow-up transaction hook, replacing any existing one.
    pub fn with_follow_up(mut self, hook: FollowUpFn) -> Self {
        self.follow_up = Some(hook);
        self
    }

    pub fn editor(&self) -> EditorId {
        self.editor
    }

    pub fn state(&self) -> &MatchState {
        &self.state
    }

    pub fn subscribe(
        &mut self,
        listener: impl FnMut(&OverlayEvent) + 'static,
    ) -> SubscriptionId {
        self.bus.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) {
        self.bus.unsubscribe(id);
    }

    /// Re-derives trigger state after a document transaction and emits the
    /// resulting open/close notification.
    ///
    /// Emission is unconditional per evaluation; consumers treat repeated
    /// opens as updates, so duplicates are harmless by contract.
    pub fn apply_transaction(&mut self, buffer: &mut dyn DocumentBuffer) -> &MatchState {
        if self.in_follow_up {
            // A follow-up transaction is being applied; it is
            // trigger-neutral by contract, so keep the current state.
            return &self.state;
        }

        self.state = self.derive_state(buffer);

        match &self.state {
            MatchState::Matching(found) if !found.query_text.is_empty() => {
                debug!(
                    kind = found.kind.as_str(),
                    query = %found.query_text,
                    "trigger active"
                );
                self.bus.emit(&OverlayEvent::Open {
                    query: found.query_text.clone(),
                    kind: found.kind,
                    editor: self.editor,
                });
            }
            // Idle, or a bare trigger with no query yet: nothing to
            // suggest, so the panel closes.
            _ => self.bus.emit(&OverlayEvent::Close),
        }

        if let Some(mut hook) = self.follow_up.take() {
            self.in_follow_up = true;
            hook(&self.state, buffer);
            self.in_follow_up = false;
            self.follow_up = Some(hook);
        }

        &self.state
    }

    fn derive_state(&self, buffer: &dyn DocumentBuffer) -> MatchState {
        let selection = buffer.selection();
        if !selection.is_collapsed() {
            return MatchState::Idle;
        }

        let block = match buffer.resolve_block(selection.from) {
            Ok(block) => block,
            Err(err) => {
                // Resolution failure is "no match", never fatal.
                warn!(%err, "cursor resolution failed, treating as no match");
                return MatchState::Idle;
            }
        };

        match self.matcher.match_at(&block) {
            Some(found) => MatchState::Matching(found),
            None => MatchState::Idle,
        }
    }
}

impl std::fmt::Debug for MentionPlugin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MentionPlugin")
            .field("editor", &self.editor)
            .field("state", &self.state)
            .field("has_follow_up", &self.follow_up.is_some())
            .finish()
    }
}
