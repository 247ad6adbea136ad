//! Knowledge lookup domain models.

use serde::{Deserialize, Serialize};

/// A single titled result with its fetched snippet, before any translation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupCandidate {
    pub title: String,
    pub snippet: String,
}

impl LookupCandidate {
    pub fn new(title: impl Into<String>, snippet: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            snippet: snippet.into(),
        }
    }
}

/// Result of fetching the summary of one title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SummaryOutcome {
    /// The title resolved to a single page. `title` is the resolved page
    /// title, which may differ from the requested one after redirects.
    Found { title: String, summary: String },
    /// The title resolved to several distinct topics; `options` lists them in
    /// source order.
    Disambiguation { options: Vec<String> },
    /// No page exists for the title.
    Missing,
}

/// Everything one lookup call produced.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupOutcome {
    /// Candidates that survived the per-title policies, in source order.
    pub candidates: Vec<LookupCandidate>,
    /// Titles the search call returned, whether or not a snippet could be
    /// fetched for them. Empty when the search itself failed or found nothing.
    pub related_titles: Vec<String>,
}

impl LookupOutcome {
    pub fn empty() -> Self {
        Self::default()
    }

    /// The authoritative answer: the first surviving candidate.
    pub fn best(&self) -> Option<&LookupCandidate> {
        self.candidates.first()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }
}
