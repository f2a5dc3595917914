//! Overlay controller.
//!
//! [`OverlayController`] owns the UI-side half of the engine: one
//! [`OverlaySession`] per open panel, the candidate list and its keyboard
//! focus, the staleness check on provider responses, and the commit that
//! writes the chosen candidate back into the document. It consumes the
//! plugin's events through [`handle_event`](OverlayController::handle_event)
//! and never talks to the document except to read slices and apply the one
//! atomic replace-range edit.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use atmark_core::{
    AtmarkError, Candidate, DocumentBuffer, MatchState, OverlayEvent, Result, TextRange,
    TriggerMatch,
};

use crate::list::{ListCursor, OverlayKey};
use crate::position::{
    DeviceClass, PanelSize, Position, SelectionGeometry, Viewport, compute_position,
};

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// What Enter does when no pre-existing selection has to be collapsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnterPolicy {
    /// Commit the focused candidate, if one is focused.
    #[default]
    CommitFocused,
    /// Never commit on Enter; the panel just closes.
    CollapseOnly,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct OverlayConfig {
    pub enter_policy: EnterPolicy,
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// State scoped to one open overlay, built on open and dropped on close.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverlaySession {
    /// The match recorded when the overlay opened. Commit uses this range,
    /// not the live cursor, so late-arriving suggestions stay correct.
    pub matched: TriggerMatch,
    /// Query text at open; Escape restores it.
    pub initial_value: String,
    /// A non-empty selection span that pre-existed the overlay, if any.
    /// Enter collapses the cursor to its end instead of committing.
    pub initial_selection: Option<TextRange>,
    /// Document text covered by the recorded range at open, used to detect
    /// that the range has since changed kind.
    recorded_text: String,
}

/// Measured page-space bounds of the rendered panel, for outside-click
/// detection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PanelBounds {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl PanelBounds {
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.left
            && x < self.left + self.width
            && y >= self.top
            && y < self.top + self.height
    }
}

/// Wholesale snapshot of the overlay for rendering. Rebuilt, never patched,
/// so stale candidate lists cannot survive a range change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverlayState {
    pub active: bool,
    pub matched: Option<TriggerMatch>,
    pub candidates: Vec<Candidate>,
    /// In `[-1, candidates.len()]`; `-1` and `candidates.len()` both render
    /// no visual focus.
    pub focused_index: isize,
}

/// What the controller did with a key, so the host knows whether to let the
/// editor see it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    /// Not consumed; the editor should handle it natively.
    Ignored,
    /// Consumed; focus moved or nothing to do.
    Handled,
    /// Consumed; a candidate was committed and the overlay closed.
    Committed,
    /// Consumed; the overlay closed without committing.
    Closed,
}

// ---------------------------------------------------------------------------
// Controller
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct OverlayController {
    config: OverlayConfig,
    session: Option<OverlaySession>,
    candidates: Vec<Candidate>,
    cursor: ListCursor,
}

impl OverlayController {
    pub fn new(config: OverlayConfig) -> Self {
        Self {
            config,
            session: None,
            candidates: Vec::new(),
            cursor: ListCursor::new(),
        }
    }

    pub fn is_open(&self) -> bool {
        self.session.is_some()
    }

    pub fn session(&self) -> Option<&OverlaySession> {
        self.session.as_ref()
    }

    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    /// The query a provider fetch should be issued for, when open.
    pub fn query(&self) -> Option<&str> {
        self.session
            .as_ref()
            .map(|session| session.matched.query_text.as_str())
    }

    /// Current snapshot for rendering.
    pub fn state(&self) -> OverlayState {
        OverlayState {
            active: self.is_open(),
            matched: self.session.as_ref().map(|session| session.matched.clone()),
            candidates: self.candidates.clone(),
            focused_index: self.cursor.index(),
        }
    }

    // -----------------------------------------------------------------------
    // Event intake
    // -----------------------------------------------------------------------

    /// Feeds one plugin event, with the plugin state it was emitted from.
    pub fn handle_event(
        &mut self,
        event: &OverlayEvent,
        state: &MatchState,
        buffer: &dyn DocumentBuffer,
    ) {
        match event {
            OverlayEvent::Open { .. } => match state.matched() {
                Some(found) => self.open_session(found, buffer),
                // An open with no matching state means the state machine
                // already moved on; treat it as close.
                None => self.close_session(),
            },
            OverlayEvent::Close => self.close_session(),
        }
    }

    fn open_session(&mut self, matched: &TriggerMatch, buffer: &dyn DocumentBuffer) {
        if let Some(session) = &self.session {
            if session.matched == *matched {
                // Duplicate open is an update; keep focus where it is.
                return;
            }
        }

        let selection = buffer.selection();
        let initial_selection = (!selection.is_collapsed()).then(|| selection.range());
        let recorded_text = buffer.slice(matched.range).unwrap_or_default();

        debug!(
            kind = matched.kind.as_str(),
            query = %matched.query_text,
            "overlay session opened"
        );

        self.session = Some(OverlaySession {
            matched: matched.clone(),
            initial_value: matched.query_text.clone(),
            initial_selection,
            recorded_text,
        });
        self.candidates.clear();
        self.cursor = ListCursor::new();
    }

    fn close_session(&mut self) {
        if self.session.take().is_some() {
            debug!("overlay session closed");
        }
        self.candidates.clear();
        self.cursor = ListCursor::new();
    }

    // -----------------------------------------------------------------------
    // Provider responses
    // -----------------------------------------------------------------------

    /// Applies a provider result for the query it was issued with.
    ///
    /// A response whose query no longer matches the live session is stale
    /// and dropped. A provider failure becomes an empty candidate list; the
    /// overlay stays open so the user is not interrupted mid-typing.
    pub fn apply_result(&mut self, query: &str, result: anyhow::Result<Vec<Candidate>>) {
        let Some(session) = &self.session else {
            debug!(%query, "response after close, dropped");
            return;
        };
        if session.matched.query_text != query {
            warn!(
                %query,
                current = %session.matched.query_text,
                "stale provider response dropped"
            );
            return;
        }

        match result {
            Ok(candidates) => {
                self.candidates = candidates;
            }
            Err(err) => {
                warn!(%err, "suggestion provider failed, showing empty list");
                self.candidates.clear();
            }
        }
        self.cursor.clamp(self.candidates.len());
    }

    // -----------------------------------------------------------------------
    // Keyboard
    // -----------------------------------------------------------------------

    pub fn handle_key(&mut self, key: OverlayKey, buffer: &mut dyn DocumentBuffer) -> KeyOutcome {
        if self.session.is_none() {
            return KeyOutcome::Ignored;
        }

        match key {
            // Modified arrows are left for native selection extension.
            OverlayKey::ArrowUp { shift: true }
            | OverlayKey::ArrowDown { shift: true }
            | OverlayKey::Tab { shift: true } => KeyOutcome::Ignored,

            OverlayKey::ArrowUp { shift: false } => {
                self.cursor.step_prev();
                KeyOutcome::Handled
            }
            OverlayKey::ArrowDown { shift: false } | OverlayKey::Tab { shift: false } => {
                self.cursor.step_next(self.candidates.len());
                KeyOutcome::Handled
            }
            OverlayKey::Enter => self.on_enter(buffer),
            OverlayKey::Escape => self.on_escape(buffer),
        }
    }

    fn on_enter(&mut self, buffer: &mut dyn DocumentBuffer) -> KeyOutcome {
        let Some(session) = self.session.as_ref() else {
            return KeyOutcome::Ignored;
        };

        // A pre-existing selection span makes Enter a collapse, not a
        // commit.
        if let Some(span) = session.initial_selection {
            if let Err(err) = buffer.set_caret(span.to) {
                warn!(%err, "could not collapse to selection end");
            }
            buffer.focus();
            self.close_session();
            return KeyOutcome::Closed;
        }

        if self.config.enter_policy == EnterPolicy::CommitFocused {
            if let Some(row) = self.cursor.focused(self.candidates.len()) {
                let title = self.candidates[row].title.clone();
                return match self.commit(buffer, &title) {
                    Ok(()) => KeyOutcome::Committed,
                    Err(_) => KeyOutcome::Closed,
                };
            }
        }

        self.close_session();
        KeyOutcome::Closed
    }

    fn on_escape(&mut self, buffer: &mut dyn DocumentBuffer) -> KeyOutcome {
        let Some(session) = self.session.as_mut() else {
            return KeyOutcome::Ignored;
        };

        if !session.initial_value.is_empty() {
            session.matched.query_text = session.initial_value.clone();
            if let Err(err) = buffer.set_caret(session.matched.range.to) {
                warn!(%err, "could not move caret to match end");
            }
            buffer.focus();
        }
        self.close_session();
        KeyOutcome::Closed
    }

    // -----------------------------------------------------------------------
    // Commit
    // -----------------------------------------------------------------------

    /// Replaces the recorded match range with `title` plus a trailing
    /// space, in one atomic edit, then closes and refocuses the editor.
    ///
    /// The range recorded at open is re-validated against the live
    /// document; if the text there changed kind, the edit is rejected and
    /// only the close happens.
    pub fn commit(&mut self, buffer: &mut dyn DocumentBuffer, title: &str) -> Result<()> {
        let Some(session) = self.session.take() else {
            return Err(AtmarkError::InvalidRange("no open overlay session".into()));
        };
        self.candidates.clear();
        self.cursor = ListCursor::new();

        let range = session.matched.range;
        let live = buffer.slice(range).map_err(|err| {
            warn!(%err, "commit range unreadable, edit rejected");
            err
        })?;
        if live.chars().next() != session.recorded_text.chars().next() {
            warn!(
                from = range.from,
                to = range.to,
                "commit range no longer starts with its trigger, edit rejected"
            );
            return Err(AtmarkError::InvalidRange(format!(
                "range {}..{} changed kind since open",
                range.from, range.to
            )));
        }

        buffer.replace_range(range, &format!("{title} "))?;
        buffer.focus();
        debug!(%title, "candidate committed");
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Pointer
    // -----------------------------------------------------------------------

    /// Host-reported pointer-down in page coordinates. Returns true if the
    /// overlay closed. An unmeasured panel counts as outside.
    pub fn handle_pointer_down(&mut self, x: f64, y: f64, panel: Option<PanelBounds>) -> bool {
        if self.session.is_none() {
            return false;
        }
        if let Some(bounds) = panel {
            if bounds.contains(x, y) {
                return false;
            }
        }
        self.close_session();
        true
    }

    /// Pointer hover over row `row` moves keyboard focus there.
    pub fn focus_candidate(&mut self, row: usize) {
        self.cursor.focus(row, self.candidates.len());
    }

    // -----------------------------------------------------------------------
    // Positioning
    // -----------------------------------------------------------------------

    /// Panel placement for the current session, or the hidden sentinel.
    pub fn position(
        &self,
        geometry: &dyn SelectionGeometry,
        panel: PanelSize,
        viewport: &Viewport,
        device: DeviceClass,
    ) -> Position {
        match &self.session {
            Some(session) => compute_position(
                true,
                session.matched.range,
                geometry,
                panel,
                viewport,
                device,
            ),
            None => Position::HIDDEN,
        }
    }
}
