//! Atmark Core - Trigger detection and suggestion state for a rich-text editor
//!
//! This crate owns the document-side half of the Atmark engine. It defines:
//!
//! - `DocumentBuffer` - Trait over the hosting editor's text buffer
//! - `TriggerMatcher` - Pure `@mention` / `#tag` detection at the cursor
//! - `MentionPlugin` - Per-document state machine driven by transactions
//! - `EventBus` / `OverlayEvent` - Typed notifications to the UI layer
//! - `SuggestionProvider` - Async boundary to the candidate backend
//! - `MemoryBuffer` - In-memory reference buffer for tests and headless use

mod buffer;
mod document;
mod error;
mod events;
mod provider;
mod state;
mod trigger;

pub use buffer::*;
pub use document::*;
pub use error::*;
pub use events::*;
pub use provider::*;
pub use state::*;
pub use trigger::*;
