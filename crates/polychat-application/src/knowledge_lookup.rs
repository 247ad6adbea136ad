//! Knowledge lookup with per-title failure policies.
//!
//! Wraps a [`KnowledgeSource`] and turns a query into an ordered list of
//! candidates. Nothing here fails: a failed search is reported exactly like
//! a search without results, and a title whose summary cannot be fetched is
//! dropped without affecting the others.

use std::sync::Arc;

use polychat_core::knowledge::{KnowledgeSource, LookupCandidate, LookupOutcome, SummaryOutcome};
use polychat_core::language::LanguageCode;

#[derive(Clone)]
pub struct KnowledgeLookup {
    source: Arc<dyn KnowledgeSource>,
    default_language: LanguageCode,
    result_limit: usize,
    summary_sentences: usize,
}

impl KnowledgeLookup {
    pub fn new(
        source: Arc<dyn KnowledgeSource>,
        default_language: LanguageCode,
        result_limit: usize,
        summary_sentences: usize,
    ) -> Self {
        Self {
            source,
            default_language,
            result_limit,
            summary_sentences,
        }
    }

    pub fn default_language(&self) -> LanguageCode {
        self.default_language
    }

    pub fn result_limit(&self) -> usize {
        self.result_limit
    }

    /// Language the source is actually queried in for `language`.
    pub fn source_language(&self, language: LanguageCode) -> LanguageCode {
        if self.source.languages().contains(&language) {
            language
        } else {
            self.default_language
        }
    }

    pub fn supports(&self, language: LanguageCode) -> bool {
        self.source.languages().contains(&language)
    }

    /// Candidates for `query`, most relevant first.
    pub async fn search(
        &self,
        query: &str,
        language: LanguageCode,
        limit: usize,
    ) -> Vec<LookupCandidate> {
        self.lookup(query, language, limit).await.candidates
    }

    /// Snippet of the first surviving candidate.
    pub async fn search_best(&self, query: &str, language: LanguageCode) -> Option<String> {
        self.search(query, language, self.result_limit)
            .await
            .into_iter()
            .next()
            .map(|candidate| candidate.snippet)
    }

    /// Summary of a single title, applying the disambiguation policy.
    pub async fn summary(
        &self,
        title: &str,
        language: LanguageCode,
        sentences: usize,
    ) -> Option<String> {
        let language = self.source_language(language);
        self.fetch_candidate(title, language, sentences)
            .await
            .map(|candidate| candidate.snippet)
    }

    /// Searches and fetches up to `limit` candidates, also reporting the raw
    /// titles the search returned.
    pub async fn lookup(&self, query: &str, language: LanguageCode, limit: usize) -> LookupOutcome {
        let query = query.trim();
        if query.is_empty() {
            return LookupOutcome::empty();
        }

        let language = self.source_language(language);
        let titles = match self.source.search(query, language, limit).await {
            Ok(titles) => titles,
            Err(err) => {
                tracing::warn!(error = %err, %language, query, "Knowledge search failed");
                return LookupOutcome::empty();
            }
        };

        let mut candidates = Vec::new();
        for title in titles.iter().take(limit) {
            if let Some(candidate) = self
                .fetch_candidate(title, language, self.summary_sentences)
                .await
            {
                candidates.push(candidate);
            }
        }

        tracing::debug!(
            %language,
            query,
            titles = titles.len(),
            candidates = candidates.len(),
            "Knowledge lookup finished"
        );

        LookupOutcome {
            candidates,
            related_titles: titles.into_iter().take(limit).collect(),
        }
    }

    /// Fetches one title. A disambiguation is retried once against its first
    /// option; every other outcome that is not a summary drops the title.
    async fn fetch_candidate(
        &self,
        title: &str,
        language: LanguageCode,
        sentences: usize,
    ) -> Option<LookupCandidate> {
        match self.source.fetch_summary(title, language, sentences).await {
            Ok(SummaryOutcome::Found { title, summary }) => {
                Some(LookupCandidate::new(title, summary))
            }
            Ok(SummaryOutcome::Disambiguation { options }) => {
                let first = options.into_iter().next()?;
                self.fetch_disambiguated(title, &first, language, sentences)
                    .await
            }
            Ok(SummaryOutcome::Missing) => {
                tracing::debug!(title, %language, "No page for title, skipping");
                None
            }
            Err(err) => {
                tracing::warn!(error = %err, title, %language, "Summary fetch failed, skipping");
                None
            }
        }
    }

    async fn fetch_disambiguated(
        &self,
        original: &str,
        option: &str,
        language: LanguageCode,
        sentences: usize,
    ) -> Option<LookupCandidate> {
        tracing::debug!(original, option, %language, "Resolving disambiguation");
        match self.source.fetch_summary(option, language, sentences).await {
            Ok(SummaryOutcome::Found { title, summary }) => {
                Some(LookupCandidate::new(title, summary))
            }
            Ok(_) => {
                tracing::debug!(original, option, "Disambiguation option unusable, skipping");
                None
            }
            Err(err) => {
                tracing::warn!(error = %err, original, option, "Disambiguation retry failed");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use polychat_core::PolychatError;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Scripted source: search results and summaries keyed by text.
    #[derive(Default)]
    struct ScriptedSource {
        results: HashMap<String, Vec<String>>,
        summaries: HashMap<String, SummaryOutcome>,
        failing_titles: Vec<String>,
        fail_search: bool,
        searches: Mutex<Vec<(String, LanguageCode)>>,
        fetches: Mutex<Vec<String>>,
    }

    impl ScriptedSource {
        fn with_results(mut self, query: &str, titles: &[&str]) -> Self {
            self.results.insert(
                query.to_string(),
                titles.iter().map(|t| t.to_string()).collect(),
            );
            self
        }

        fn with_summary(mut self, title: &str, summary: &str) -> Self {
            self.summaries.insert(
                title.to_string(),
                SummaryOutcome::Found {
                    title: title.to_string(),
                    summary: summary.to_string(),
                },
            );
            self
        }

        fn with_outcome(mut self, title: &str, outcome: SummaryOutcome) -> Self {
            self.summaries.insert(title.to_string(), outcome);
            self
        }

        fn fetches(&self) -> Vec<String> {
            self.fetches.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl KnowledgeSource for ScriptedSource {
        fn languages(&self) -> Vec<LanguageCode> {
            vec![LanguageCode::English, LanguageCode::Hindi]
        }

        async fn search(
            &self,
            query: &str,
            language: LanguageCode,
            limit: usize,
        ) -> Result<Vec<String>, PolychatError> {
            self.searches
                .lock()
                .unwrap()
                .push((query.to_string(), language));
            if self.fail_search {
                return Err(PolychatError::transport("scripted", "connection reset"));
            }
            Ok(self
                .results
                .get(query)
                .cloned()
                .unwrap_or_default()
                .into_iter()
                .take(limit)
                .collect())
        }

        async fn fetch_summary(
            &self,
            title: &str,
            _language: LanguageCode,
            _sentences: usize,
        ) -> Result<SummaryOutcome, PolychatError> {
            self.fetches.lock().unwrap().push(title.to_string());
            if self.failing_titles.iter().any(|t| t == title) {
                return Err(PolychatError::http("scripted", 500, "boom"));
            }
            Ok(self
                .summaries
                .get(title)
                .cloned()
                .unwrap_or(SummaryOutcome::Missing))
        }
    }

    fn lookup(source: Arc<ScriptedSource>) -> KnowledgeLookup {
        KnowledgeLookup::new(source, LanguageCode::English, 3, 3)
    }

    #[tokio::test]
    async fn test_candidates_keep_source_order() {
        let source = Arc::new(
            ScriptedSource::default()
                .with_results("einstein", &["Albert Einstein", "Einstein family"])
                .with_summary("Albert Einstein", "A physicist.")
                .with_summary("Einstein family", "A family."),
        );
        let candidates = lookup(source).search("einstein", LanguageCode::English, 3).await;
        assert_eq!(
            candidates,
            vec![
                LookupCandidate::new("Albert Einstein", "A physicist."),
                LookupCandidate::new("Einstein family", "A family."),
            ]
        );
    }

    #[tokio::test]
    async fn test_disambiguation_retries_first_option_only() {
        let source = Arc::new(
            ScriptedSource::default()
                .with_results("mercury", &["Mercury"])
                .with_outcome(
                    "Mercury",
                    SummaryOutcome::Disambiguation {
                        options: vec!["Mercury (planet)".into(), "Mercury (element)".into()],
                    },
                )
                .with_summary("Mercury (planet)", "The smallest planet.")
                .with_summary("Mercury (element)", "A chemical element."),
        );
        let candidates = lookup(source.clone())
            .search("mercury", LanguageCode::English, 3)
            .await;

        assert_eq!(
            candidates,
            vec![LookupCandidate::new("Mercury (planet)", "The smallest planet.")]
        );
        assert_eq!(source.fetches(), vec!["Mercury", "Mercury (planet)"]);
    }

    #[tokio::test]
    async fn test_failed_disambiguation_retry_drops_title() {
        let source = Arc::new(
            ScriptedSource::default()
                .with_results("mercury", &["Mercury", "Freddie Mercury"])
                .with_outcome(
                    "Mercury",
                    SummaryOutcome::Disambiguation {
                        options: vec!["Mercury (planet)".into(), "Mercury (element)".into()],
                    },
                )
                .with_summary("Freddie Mercury", "A singer."),
        );
        let outcome = lookup(source.clone())
            .lookup("mercury", LanguageCode::English, 3)
            .await;

        assert_eq!(
            outcome.candidates,
            vec![LookupCandidate::new("Freddie Mercury", "A singer.")]
        );
        assert_eq!(
            source.fetches(),
            vec!["Mercury", "Mercury (planet)", "Freddie Mercury"]
        );
    }

    #[tokio::test]
    async fn test_disambiguation_without_options_drops_title() {
        let source = Arc::new(
            ScriptedSource::default()
                .with_results("x", &["X"])
                .with_outcome("X", SummaryOutcome::Disambiguation { options: vec![] }),
        );
        let outcome = lookup(source.clone()).lookup("x", LanguageCode::English, 3).await;
        assert!(outcome.candidates.is_empty());
        assert_eq!(outcome.related_titles, vec!["X".to_string()]);
        assert_eq!(source.fetches(), vec!["X"]);
    }

    #[tokio::test]
    async fn test_bad_titles_do_not_abort_batch() {
        let mut source = ScriptedSource::default()
            .with_results("q", &["Broken", "Absent", "Good"])
            .with_summary("Good", "Works.");
        source.failing_titles.push("Broken".to_string());
        let source = Arc::new(source);

        let outcome = lookup(source.clone()).lookup("q", LanguageCode::English, 3).await;
        assert_eq!(outcome.candidates, vec![LookupCandidate::new("Good", "Works.")]);
        assert_eq!(outcome.related_titles.len(), 3);
        assert_eq!(source.fetches(), vec!["Broken", "Absent", "Good"]);
    }

    #[tokio::test]
    async fn test_search_failure_is_empty() {
        let source = Arc::new(ScriptedSource {
            fail_search: true,
            ..ScriptedSource::default()
        });
        let outcome = lookup(source.clone()).lookup("q", LanguageCode::English, 3).await;
        assert_eq!(outcome, LookupOutcome::empty());
        assert!(source.fetches().is_empty());
    }

    #[tokio::test]
    async fn test_unsupported_language_queries_default() {
        let source = Arc::new(ScriptedSource::default());
        let lookup = lookup(source.clone());
        lookup.search("q", LanguageCode::Telugu, 3).await;
        lookup.search("q", LanguageCode::Hindi, 3).await;
        assert_eq!(
            *source.searches.lock().unwrap(),
            vec![
                ("q".to_string(), LanguageCode::English),
                ("q".to_string(), LanguageCode::Hindi)
            ]
        );
    }

    #[tokio::test]
    async fn test_limit_bounds_fetches() {
        let source = Arc::new(
            ScriptedSource::default()
                .with_results("q", &["A", "B", "C", "D"])
                .with_summary("A", "a")
                .with_summary("B", "b")
                .with_summary("C", "c")
                .with_summary("D", "d"),
        );
        let candidates = lookup(source.clone()).search("q", LanguageCode::English, 2).await;
        assert_eq!(candidates.len(), 2);
        assert_eq!(source.fetches(), vec!["A", "B"]);
    }

    #[tokio::test]
    async fn test_search_best_and_summary() {
        let source = Arc::new(
            ScriptedSource::default()
                .with_results("einstein", &["Albert Einstein"])
                .with_summary("Albert Einstein", "A physicist.")
                .with_outcome(
                    "Einstein (disambiguation)",
                    SummaryOutcome::Disambiguation {
                        options: vec!["Albert Einstein".into()],
                    },
                ),
        );
        let lookup = lookup(source);
        assert_eq!(
            lookup.search_best("einstein", LanguageCode::English).await,
            Some("A physicist.".to_string())
        );
        assert_eq!(lookup.search_best("nothing", LanguageCode::English).await, None);
        assert_eq!(
            lookup
                .summary("Einstein (disambiguation)", LanguageCode::English, 2)
                .await,
            Some("A physicist.".to_string())
        );
        assert_eq!(lookup.summary("Nope", LanguageCode::English, 2).await, None);
    }

    #[tokio::test]
    async fn test_blank_query_skips_source() {
        let source = Arc::new(ScriptedSource::default());
        let outcome = lookup(source.clone()).lookup("   ", LanguageCode::English, 3).await;
        assert!(outcome.is_empty());
        assert!(source.searches.lock().unwrap().is_empty());
    }
}
