//! Overlay positioning.
//!
//! Computes where the floating suggestion panel goes, from the screen-space
//! geometry of the matched range. Geometry arrives through the
//! [`SelectionGeometry`] capability; a lookup can routinely fail (node
//! detached, offset offscreen) and resolves to the hidden sentinel, never an
//! error. Callers must not render when `visible` is false.

use serde::{Deserialize, Serialize};
use tracing::debug;

use atmark_core::TextRange;

/// Minimum distance kept between the panel and the viewport's top/left
/// edges, and the gap between the matched text and the panel below it.
pub const MARGIN: f64 = 5.0;

/// Screen placement for the panel, in page coordinates.
///
/// `visible = false` means "do not render", distinct from coordinates that
/// merely fall outside the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub left: f64,
    pub top: f64,
    /// Horizontal center the host should align a directional indicator to.
    /// Decoupled from the clamped `left` so the indicator stays correct
    /// when the panel itself was nudged back on-screen.
    pub offset: f64,
    pub visible: bool,
}

impl Position {
    /// The do-not-render sentinel. Parked far off-screen so a host that
    /// renders it anyway shows nothing.
    pub const HIDDEN: Position = Position {
        left: -1000.0,
        top: 0.0,
        offset: 0.0,
        visible: false,
    };
}

/// Viewport-relative bounding rectangle of one caret position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CaretRect {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

/// Measured size of the suggestion panel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PanelSize {
    pub width: f64,
    pub height: f64,
}

impl PanelSize {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    fn is_measured(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }
}

/// Viewport metrics supplied by the host.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    /// `None` when the host cannot measure a usable height (e.g. during a
    /// virtual-keyboard transition).
    pub height: Option<f64>,
    pub scroll_x: f64,
    pub scroll_y: f64,
}

/// Pointer vs touch input. On touch devices the virtual keyboard makes
/// selection-relative placement unreliable, so the panel pins to the bottom
/// of the viewport instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviceClass {
    Pointer,
    Touch,
}

/// Host capability: screen geometry for a document offset.
///
/// Returns `None` when the offset cannot be measured. Failure here is a
/// routine outcome, not an exceptional one.
pub trait SelectionGeometry {
    fn caret_rect(&self, offset: usize) -> Option<CaretRect>;
}

/// Computes the panel position for the matched `range`.
///
/// Returns [`Position::HIDDEN`] whenever a precondition fails: inactive
/// overlay, unmeasured panel, or unavailable geometry.
pub fn compute_position(
    active: bool,
    range: TextRange,
    geometry: &dyn SelectionGeometry,
    panel: PanelSize,
    viewport: &Viewport,
    device: DeviceClass,
) -> Position {
    if !active || !panel.is_measured() {
        return Position::HIDDEN;
    }

    // Mobile: stick the panel to the bottom of the viewport, above the
    // virtual keyboard, ignoring selection geometry entirely.
    if device == DeviceClass::Touch {
        if let Some(height) = viewport.height {
            return Position {
                left: 0.0,
                top: height,
                offset: 0.0,
                visible: true,
            };
        }
    }

    let (Some(from_rect), Some(to_rect)) =
        (geometry.caret_rect(range.from), geometry.caret_rect(range.to))
    else {
        debug!(from = range.from, to = range.to, "caret geometry unavailable");
        return Position::HIDDEN;
    };

    // Min/max both rects so the bounds are right even when "from" renders
    // after "to" visually (bidirectional text).
    let bounds_left = from_rect.left.min(to_rect.left);
    let bounds_bottom = from_rect.bottom.max(to_rect.bottom);

    // Anchor at the start of the match, just below the typed text, kept a
    // margin away from the viewport edges.
    let left = bounds_left.max(MARGIN);
    let top = (bounds_bottom + MARGIN).max(MARGIN);

    // Indicator center, computed before scroll conversion and from the
    // clamped anchor.
    let offset = left + panel.width / 2.0;

    Position {
        left: (left + viewport.scroll_x).round(),
        top: (top + viewport.scroll_y).round(),
        offset: offset.round(),
        visible: true,
    }
}

#[cfg(test)]
mod tests;
