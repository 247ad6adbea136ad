//! Knowledge source trait definition.

use async_trait::async_trait;

use crate::error::Result;
use crate::knowledge::SummaryOutcome;
use crate::language::LanguageCode;

/// An encyclopedic search-and-summary service.
///
/// The success / disambiguation / missing trichotomy is carried by
/// [`SummaryOutcome`]; `Err` is reserved for transport and protocol failures.
#[async_trait]
pub trait KnowledgeSource: Send + Sync {
    /// Languages this source can be queried in natively.
    fn languages(&self) -> Vec<LanguageCode>;

    /// Searches for `query` and returns up to `limit` titles, most relevant
    /// first.
    async fn search(&self, query: &str, language: LanguageCode, limit: usize)
    -> Result<Vec<String>>;

    /// Fetches a summary of `title` bounded to `sentences` sentences.
    async fn fetch_summary(
        &self,
        title: &str,
        language: LanguageCode,
        sentences: usize,
    ) -> Result<SummaryOutcome>;
}
