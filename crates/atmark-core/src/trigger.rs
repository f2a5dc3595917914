//! Trigger detection.
//!
//! [`TriggerMatcher`] is a pure function over the cursor's block prefix: it
//! recognizes an `@mention` or `#tag` run ending exactly at the cursor and
//! reports the absolute document range it spans. No state, no side effects;
//! the plugin state machine re-runs it after every transaction.

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::document::{BlockContext, TextRange};
use crate::error::{AtmarkError, Result};

/// Upper bound on the scanned block prefix, in characters. Longer prefixes
/// are trimmed from the left so matching stays O(1) in document size.
pub const MAX_MATCH: usize = 500;

/// Which trigger pattern matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriggerKind {
    Mention,
    Tag,
}

impl TriggerKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mention => "mention",
            Self::Tag => "tag",
        }
    }
}

/// A recognized trigger pattern at the cursor.
///
/// Invariant: the document slice at `range` begins with exactly one trigger
/// character followed by `query_text`. Recomputed fresh on every edit and
/// never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriggerMatch {
    pub range: TextRange,
    pub kind: TriggerKind,
    /// Characters after the trigger character. Empty means the user just
    /// typed the bare trigger; that is a valid match, distinct from "no
    /// trigger".
    pub query_text: String,
}

/// Trigger characters and matching options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriggerConfig {
    pub mention_trigger: char,
    pub hashtag_trigger: char,
    /// Whether a mention may span two space-separated word runs
    /// (`@Jane Doe`). Hashtags never allow spaces.
    pub allow_space: bool,
}

impl Default for TriggerConfig {
    fn default() -> Self {
        Self {
            mention_trigger: '@',
            hashtag_trigger: '#',
            allow_space: false,
        }
    }
}

/// Compiled trigger patterns.
///
/// Both patterns are anchored to end at the cursor and must be preceded by
/// start-of-text or whitespace. At most one can match a given prefix: the
/// two trigger characters are distinct by construction.
#[derive(Debug)]
pub struct TriggerMatcher {
    mention: Regex,
    tag: Regex,
}

impl TriggerMatcher {
    pub fn new(config: TriggerConfig) -> Result<Self> {
        if config.mention_trigger == config.hashtag_trigger {
            return Err(AtmarkError::Configuration(format!(
                "mention and hashtag triggers must differ, both are {:?}",
                config.mention_trigger
            )));
        }

        let mention_trigger = regex::escape(&config.mention_trigger.to_string());
        let hashtag_trigger = regex::escape(&config.hashtag_trigger.to_string());

        let mention = if config.allow_space {
            format!(r"(^|\s){mention_trigger}([\w\-+]+\s?[\w\-+]*)$")
        } else {
            format!(r"(^|\s){mention_trigger}([\w\-+]*)$")
        };
        let tag = format!(r"(^|\s){hashtag_trigger}([\w\-]*)$");

        Ok(Self {
            mention: compile(&mention)?,
            tag: compile(&tag)?,
        })
    }

    /// Matches the trigger pattern ending at the cursor described by
    /// `block`, returning absolute document offsets. `None` when no pattern
    /// ends at the cursor or the cursor is not at top-level block depth.
    pub fn match_at(&self, block: &BlockContext) -> Option<TriggerMatch> {
        if block.depth != 1 {
            return None;
        }

        // Bound the scanned prefix, trimming from the left.
        let total_chars = block.prefix.chars().count();
        let trimmed = total_chars.saturating_sub(MAX_MATCH);
        let prefix: &str = if trimmed > 0 {
            let byte_start = block
                .prefix
                .char_indices()
                .nth(trimmed)
                .map(|(i, _)| i)
                .unwrap_or(0);
            &block.prefix[byte_start..]
        } else {
            &block.prefix
        };

        let (captures, kind) = if let Some(captures) = self.mention.captures(prefix) {
            (captures, TriggerKind::Mention)
        } else if let Some(captures) = self.tag.captures(prefix) {
            (captures, TriggerKind::Tag)
        } else {
            return None;
        };

        let whole = captures.get(0)?;
        // The captured lead is either empty (start of text) or one
        // whitespace char; a captured space is not part of the match.
        let lead_chars = captures
            .get(1)
            .map(|lead| lead.as_str().chars().count())
            .unwrap_or(0);

        let match_start = prefix[..whole.start()].chars().count() + lead_chars;
        let match_len = whole.as_str().chars().count() - lead_chars;

        let from = block.start + trimmed + match_start;
        let to = from + match_len;

        Some(TriggerMatch {
            range: TextRange::new(from, to),
            kind,
            query_text: captures.get(2).map_or(String::new(), |q| q.as_str().to_string()),
        })
    }
}

fn compile(pattern: &str) -> Result<Regex> {
    Regex::new(pattern)
        .map_err(|err| AtmarkError::Configuration(format!("bad trigger pattern: {err}")))
}

#[cfg(test)]
mod tests;
