//! Atmark Overlay - The suggestion panel's UI-side engine
//!
//! Consumes the events and match state produced by `atmark-core` and owns
//! everything the floating panel needs:
//!
//! - `compute_position` / `Position` - Panel placement from selection
//!   geometry, with touch-device bottom pinning and viewport clamping
//! - `ListCursor` / `OverlayKey` - Keyboard-driven candidate focus
//! - `OverlayController` - Session lifecycle, staleness-checked provider
//!   responses, commit, and outside-click dismissal
//!
//! No GUI toolkit appears here: geometry, panel measurement, and pointer
//! events arrive through host-provided capabilities.

mod list;
mod overlay;
mod position;

pub use list::*;
pub use overlay::*;
pub use position::*;
