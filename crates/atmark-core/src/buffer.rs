//! In-memory reference implementation of [`DocumentBuffer`].
//!
//! [`MemoryBuffer`] keeps a plain-text document in a rope with blocks
//! separated by newlines, tracks a selection, and applies the atomic
//! replace-range edit the commit path needs. It exists for unit tests and
//! headless hosts; real editors implement [`DocumentBuffer`] over their own
//! document model.
//!
//! All offsets are character offsets. Ropey's char-indexed APIs make the
//! conversion bookkeeping trivial compared to byte addressing, which matters
//! once embeds (multi-byte placeholder chars) appear mid-paragraph.

use ropey::Rope;

use crate::document::{BlockContext, DocumentBuffer, INLINE_PLACEHOLDER, Selection, TextRange};
use crate::error::{AtmarkError, Result};

/// A plain-text, newline-blocked document buffer.
///
/// Every block is top level (`depth == 1`); tests exercising nested-block
/// suppression stub [`DocumentBuffer`] directly instead.
#[derive(Debug, Clone)]
pub struct MemoryBuffer {
    rope: Rope,
    selection: Selection,
    focused: bool,
}

impl MemoryBuffer {
    pub fn new() -> Self {
        Self {
            rope: Rope::new(),
            selection: Selection::caret(0),
            focused: false,
        }
    }

    /// Builds a buffer from `text` with the caret at the end, as if the
    /// user had just typed it.
    pub fn from_text(text: &str) -> Self {
        let rope = Rope::from_str(text);
        let end = rope.len_chars();
        Self {
            rope,
            selection: Selection::caret(end),
            focused: false,
        }
    }

    /// Inserts `text` at the selection, replacing it if non-collapsed.
    pub fn insert(&mut self, text: &str) -> Result<()> {
        self.replace_range(self.selection.range(), text)
    }

    /// Inserts one non-text inline node at the selection.
    pub fn insert_embed(&mut self) -> Result<()> {
        self.insert(&INLINE_PLACEHOLDER.to_string())
    }

    /// Sets a (possibly non-collapsed) selection.
    pub fn select(&mut self, from: usize, to: usize) -> Result<()> {
        self.check_offset(from)?;
        self.check_offset(to)?;
        self.selection = Selection::span(from, to);
        Ok(())
    }

    pub fn text(&self) -> String {
        self.rope.to_string()
    }

    /// Whether [`focus`](DocumentBuffer::focus) has been called since the
    /// buffer was created.
    pub fn is_focused(&self) -> bool {
        self.focused
    }

    fn check_offset(&self, offset: usize) -> Result<()> {
        if offset > self.rope.len_chars() {
            return Err(AtmarkError::Document(format!(
                "offset {offset} out of bounds (len {})",
                self.rope.len_chars()
            )));
        }
        Ok(())
    }

    fn check_range(&self, range: TextRange) -> Result<()> {
        if range.from > range.to {
            return Err(AtmarkError::InvalidRange(format!(
                "inverted range {}..{}",
                range.from, range.to
            )));
        }
        self.check_offset(range.to)
    }
}

impl Default for MemoryBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentBuffer for MemoryBuffer {
    fn selection(&self) -> Selection {
        self.selection
    }

    fn resolve_block(&self, offset: usize) -> Result<BlockContext> {
        self.check_offset(offset)?;
        let line = self.rope.char_to_line(offset);
        let start = self.rope.line_to_char(line);
        let prefix = self.rope.slice(start..offset).to_string();
        Ok(BlockContext::new(start, 1, prefix))
    }

    fn slice(&self, range: TextRange) -> Result<String> {
        self.check_range(range)?;
        Ok(self.rope.slice(range.from..range.to).to_string())
    }

    fn replace_range(&mut self, range: TextRange, text: &str) -> Result<()> {
        self.check_range(range)?;
        self.rope.remove(range.from..range.to);
        self.rope.insert(range.from, text);
        self.selection = Selection::caret(range.from + text.chars().count());
        Ok(())
    }

    fn set_caret(&mut self, offset: usize) -> Result<()> {
        self.check_offset(offset)?;
        self.selection = Selection::caret(offset);
        Ok(())
    }

    fn focus(&mut self) {
        self.focused = true;
    }

    fn len(&self) -> usize {
        self.rope.len_chars()
    }
}
