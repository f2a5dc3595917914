//! Document-model boundary.
//!
//! Atmark never owns document content. The hosting editor exposes its text
//! buffer through the [`DocumentBuffer`] trait: resolving offsets to block
//! context, reading slices, and applying the single atomic
//! replace-range-and-move-caret edit that a commit needs. Everything here is
//! addressed in linear character offsets into the document text.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::Result;

/// Placeholder substituted for non-text inline content (embeds, images)
/// when reading block text, so offsets stay stable. U+FFFC is not a word
/// character, so it always terminates a trigger run.
pub const INLINE_PLACEHOLDER: char = '\u{FFFC}';

/// A half-open span `[from, to)` of character offsets in the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TextRange {
    pub from: usize,
    pub to: usize,
}

impl TextRange {
    /// Creates a new range. `from` must not exceed `to`.
    pub fn new(from: usize, to: usize) -> Self {
        debug_assert!(from <= to, "range start {from} exceeds end {to}");
        Self { from, to }
    }

    pub fn len(&self) -> usize {
        self.to - self.from
    }

    pub fn is_empty(&self) -> bool {
        self.from == self.to
    }

    pub fn contains(&self, offset: usize) -> bool {
        offset >= self.from && offset < self.to
    }
}

/// The editor's current selection, in character offsets.
///
/// A collapsed selection (`from == to`) is a caret. Trigger detection only
/// ever runs against a collapsed selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub from: usize,
    pub to: usize,
}

impl Selection {
    pub fn caret(offset: usize) -> Self {
        Self {
            from: offset,
            to: offset,
        }
    }

    pub fn span(from: usize, to: usize) -> Self {
        Self { from, to }
    }

    pub fn is_collapsed(&self) -> bool {
        self.from == self.to
    }

    pub fn range(&self) -> TextRange {
        TextRange::new(self.from.min(self.to), self.from.max(self.to))
    }
}

/// The cursor's block, resolved by the document model.
///
/// `prefix` is the block's text from its start up to the cursor, with block
/// boundaries mapped to `\n` and non-text inline content mapped to
/// [`INLINE_PLACEHOLDER`], so `start + prefix.chars().count()` equals the
/// cursor offset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockContext {
    /// Absolute offset of the first character inside the block.
    pub start: usize,
    /// Nesting depth; `1` is top level. Nested containers (tables,
    /// call-outs) report a greater depth and suppress triggering.
    pub depth: usize,
    /// Block text from `start` up to the cursor.
    pub prefix: String,
}

impl BlockContext {
    pub fn new(start: usize, depth: usize, prefix: impl Into<String>) -> Self {
        Self {
            start,
            depth,
            prefix: prefix.into(),
        }
    }

    /// The absolute cursor offset this context was resolved for.
    pub fn cursor(&self) -> usize {
        self.start + self.prefix.chars().count()
    }
}

/// Identity of one editor instance, carried on open events so a host with
/// several editors can route suggestions to the right panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EditorId(Uuid);

impl EditorId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for EditorId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for EditorId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Abstraction over the hosting editor's text buffer.
///
/// The engine reads the document through this trait and mutates it through
/// exactly one operation, [`replace_range`](DocumentBuffer::replace_range).
/// Implementations are expected to apply that edit as a single undoable
/// transaction.
pub trait DocumentBuffer {
    /// The current selection.
    fn selection(&self) -> Selection;

    /// Resolves an offset to its block context. Fails when the offset does
    /// not address a position in the document; callers treat failure as
    /// "no match", never as fatal.
    fn resolve_block(&self, offset: usize) -> Result<BlockContext>;

    /// Reads the document text covered by `range`, with the same
    /// substitutions as [`BlockContext::prefix`].
    fn slice(&self, range: TextRange) -> Result<String>;

    /// Replaces `range` with `text` in one atomic edit and leaves a
    /// collapsed selection immediately after the inserted text.
    fn replace_range(&mut self, range: TextRange, text: &str) -> Result<()>;

    /// Moves the caret to `offset`, collapsing any selection.
    fn set_caret(&mut self, offset: usize) -> Result<()>;

    /// Restores keyboard focus to the editor. Default is a no-op for
    /// buffers with no focus notion.
    fn focus(&mut self) {}

    /// Total document length in characters.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
