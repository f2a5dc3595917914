//! Keyboard-driven list focus.
//!
//! [`ListCursor`] tracks which candidate row holds keyboard focus. The index
//! ranges over `[-1, len]`: `-1` is "nothing focused above the list" and
//! `len` is "past the last item". Both render no visual focus, and the
//! ceiling means repeated ArrowDown walks off the bottom instead of
//! wrapping.

use serde::{Deserialize, Serialize};

/// Keyboard input relevant to the open overlay. Shift-modified arrows are
/// reported so the controller can leave them to native selection extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "key", rename_all = "snake_case")]
pub enum OverlayKey {
    ArrowUp { shift: bool },
    ArrowDown { shift: bool },
    Tab { shift: bool },
    Enter,
    Escape,
}

/// Focused-index state for one overlay session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListCursor {
    index: isize,
}

impl ListCursor {
    /// A fresh cursor with nothing focused.
    pub fn new() -> Self {
        Self { index: -1 }
    }

    pub fn index(&self) -> isize {
        self.index
    }

    /// The focused row, if the index addresses an actual item.
    pub fn focused(&self, len: usize) -> Option<usize> {
        if self.index >= 0 && (self.index as usize) < len {
            Some(self.index as usize)
        } else {
            None
        }
    }

    /// Moves focus up one row, flooring at `-1`.
    pub fn step_prev(&mut self) {
        self.index = (self.index - 1).max(-1);
    }

    /// Moves focus down one row, ceilinged at `len` ("past the last item").
    pub fn step_next(&mut self, len: usize) {
        self.index = (self.index + 1).min(len as isize);
    }

    /// Focuses a specific row (pointer hover).
    pub fn focus(&mut self, row: usize, len: usize) {
        if row < len {
            self.index = row as isize;
        }
    }

    /// Re-clamps after the candidate list was replaced.
    pub fn clamp(&mut self, len: usize) {
        self.index = self.index.clamp(-1, len as isize);
    }
}

impl Default for ListCursor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_arrow_down_sequence_clamps_past_last() {
        // Two candidates: -1 -> 0 -> 1 -> 2, then stays at 2.
        let mut cursor = ListCursor::new();
        let mut seen = vec![cursor.index()];
        for _ in 0..3 {
            cursor.step_next(2);
            seen.push(cursor.index());
        }
        assert_eq!(seen, vec![-1, 0, 1, 2]);

        cursor.step_next(2);
        assert_eq!(cursor.index(), 2);
        assert_eq!(cursor.focused(2), None);
    }

    #[test]
    fn test_arrow_up_floors_at_minus_one() {
        let mut cursor = ListCursor::new();
        cursor.step_next(2);
        assert_eq!(cursor.index(), 0);
        cursor.step_prev();
        assert_eq!(cursor.index(), -1);
        cursor.step_prev();
        assert_eq!(cursor.index(), -1);
        assert_eq!(cursor.focused(2), None);
    }

    #[test]
    fn test_focused_addresses_real_rows_only() {
        let mut cursor = ListCursor::new();
        assert_eq!(cursor.focused(3), None);
        cursor.step_next(3);
        assert_eq!(cursor.focused(3), Some(0));
    }

    #[test]
    fn test_pointer_focus_ignores_out_of_range_rows() {
        let mut cursor = ListCursor::new();
        cursor.focus(1, 3);
        assert_eq!(cursor.index(), 1);
        cursor.focus(7, 3);
        assert_eq!(cursor.index(), 1);
    }

    #[test]
    fn test_clamp_after_shorter_candidate_list() {
        let mut cursor = ListCursor::new();
        for _ in 0..5 {
            cursor.step_next(5);
        }
        assert_eq!(cursor.index(), 5);
        cursor.clamp(2);
        assert_eq!(cursor.index(), 2);
    }
}
