//! Suggestion-provider boundary.
//!
//! Candidate lookup is external: the engine hands the provider the current
//! query text and trigger kind, and the provider answers with an ordered
//! candidate list at some later point. Responses stay keyed to the query
//! that produced them so the overlay can discard stale answers: the user
//! may have kept typing, or closed the panel, before the result arrived.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::trigger::TriggerKind;

/// One selectable suggestion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub title: String,
    pub subtitle: Option<String>,
    /// Opaque handle to an avatar/image resource; rendering is the host's
    /// concern.
    pub image_ref: Option<String>,
}

impl Candidate {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            subtitle: None,
            image_ref: None,
        }
    }

    pub fn with_subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = Some(subtitle.into());
        self
    }

    pub fn with_image_ref(mut self, image_ref: impl Into<String>) -> Self {
        self.image_ref = Some(image_ref.into());
        self
    }
}

/// A provider answer, keyed to the query that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderResponse {
    pub query: String,
    pub candidates: Vec<Candidate>,
}

impl ProviderResponse {
    pub fn new(query: impl Into<String>, candidates: Vec<Candidate>) -> Self {
        Self {
            query: query.into(),
            candidates,
        }
    }

    pub fn empty(query: impl Into<String>) -> Self {
        Self::new(query, Vec::new())
    }
}

/// Asynchronous source of candidates for the current query.
///
/// Fire-and-forget from the engine's perspective: there is no cancellation
/// primitive, only the staleness check on the overlay side. A failed fetch
/// is treated as zero candidates, never as a crash.
#[async_trait(?Send)]
pub trait SuggestionProvider {
    async fn fetch(&self, query: &str, kind: TriggerKind) -> anyhow::Result<Vec<Candidate>>;
}
