//! Wikipedia knowledge source backed by the MediaWiki Action API.
//!
//! - search: `list=search`
//! - summary: `prop=extracts|pageprops` with `exintro`, `explaintext` and
//!   `exsentences`; `pageprops.disambiguation` marks a disambiguation page,
//!   `missing` marks an absent one
//! - disambiguation options: `action=parse&prop=wikitext` of that page, one
//!   option per bullet line in page order

use async_trait::async_trait;
use polychat_core::PolychatError;
use polychat_core::config::{HttpSettings, LookupSettings};
use polychat_core::knowledge::{KnowledgeSource, SummaryOutcome};
use polychat_core::language::LanguageCode;
use reqwest::Client;
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::http;

const SERVICE: &str = "Wikipedia";

/// Link prefixes that point outside the article namespace.
const NON_ARTICLE_PREFIXES: &[&str] = &[
    "category", "file", "image", "media", "special", "template", "help", "portal",
    "wikipedia", "wiktionary", "wikt", "user", "talk", "draft",
];

/// [`KnowledgeSource`] implementation for the Wikipedia language editions.
#[derive(Clone)]
pub struct WikipediaSource {
    client: Client,
    /// API URL template containing `{lang}`.
    api_url: String,
    languages: Vec<LanguageCode>,
}

impl WikipediaSource {
    pub fn new(client: Client, api_url: impl Into<String>, languages: Vec<LanguageCode>) -> Self {
        Self {
            client,
            api_url: api_url.into(),
            languages,
        }
    }

    /// Builds a source with its own timeout-bounded client.
    pub fn from_settings(
        lookup: &LookupSettings,
        http_settings: &HttpSettings,
        languages: Vec<LanguageCode>,
    ) -> Result<Self, PolychatError> {
        Ok(Self::new(
            http::build_client(http_settings)?,
            lookup.wikipedia_api_url.clone(),
            languages,
        ))
    }

    fn endpoint(&self, language: LanguageCode) -> String {
        self.api_url.replace("{lang}", language.code())
    }

    async fn api_get<T: DeserializeOwned>(
        &self,
        language: LanguageCode,
        action: &str,
        params: &[(&str, String)],
    ) -> Result<T, PolychatError> {
        let mut query = vec![
            ("action", action.to_string()),
            ("format", "json".to_string()),
            ("formatversion", "2".to_string()),
        ];
        query.extend(params.iter().cloned());
        http::get_json(&self.client, SERVICE, &self.endpoint(language), &query).await
    }

    async fn query(
        &self,
        language: LanguageCode,
        params: &[(&str, String)],
    ) -> Result<QueryResponse, PolychatError> {
        self.api_get(language, "query", params).await
    }

    /// Options listed on a disambiguation page, in page order.
    async fn disambiguation_options(
        &self,
        title: &str,
        language: LanguageCode,
    ) -> Result<Vec<String>, PolychatError> {
        let response: ParseResponse = self
            .api_get(
                language,
                "parse",
                &[
                    ("page", title.to_string()),
                    ("prop", "wikitext".to_string()),
                    ("redirects", "1".to_string()),
                ],
            )
            .await?;

        let options = listed_options(response)?;
        tracing::debug!(title, %language, options = options.len(), "Disambiguation options");
        Ok(options)
    }
}

#[async_trait]
impl KnowledgeSource for WikipediaSource {
    fn languages(&self) -> Vec<LanguageCode> {
        self.languages.clone()
    }

    async fn search(
        &self,
        query: &str,
        language: LanguageCode,
        limit: usize,
    ) -> Result<Vec<String>, PolychatError> {
        tracing::debug!(%language, query, limit, "Searching Wikipedia");
        let response = self
            .query(
                language,
                &[
                    ("list", "search".to_string()),
                    ("srsearch", query.to_string()),
                    ("srlimit", limit.to_string()),
                    ("srprop", String::new()),
                ],
            )
            .await?;

        search_titles(response, limit)
    }

    async fn fetch_summary(
        &self,
        title: &str,
        language: LanguageCode,
        sentences: usize,
    ) -> Result<SummaryOutcome, PolychatError> {
        tracing::debug!(%language, title, sentences, "Fetching Wikipedia summary");
        let response = self
            .query(
                language,
                &[
                    ("prop", "extracts|pageprops".to_string()),
                    ("titles", title.to_string()),
                    ("redirects", "1".to_string()),
                    ("exintro", "1".to_string()),
                    ("explaintext", "1".to_string()),
                    ("exsentences", sentences.to_string()),
                    ("ppprop", "disambiguation".to_string()),
                ],
            )
            .await?;

        match classify_page(response)? {
            PageKind::Article { title, extract } => Ok(SummaryOutcome::Found {
                title,
                summary: extract,
            }),
            PageKind::Missing => Ok(SummaryOutcome::Missing),
            PageKind::Disambiguation { title } => {
                let options = self.disambiguation_options(&title, language).await?;
                Ok(SummaryOutcome::Disambiguation { options })
            }
        }
    }
}

#[derive(Debug, Deserialize)]
struct QueryResponse {
    #[serde(default)]
    query: Option<QueryBody>,
    #[serde(default)]
    error: Option<ApiError>,
}

#[derive(Debug, Default, Deserialize)]
struct QueryBody {
    #[serde(default)]
    search: Vec<SearchHit>,
    #[serde(default)]
    pages: Vec<Page>,
}

#[derive(Debug, Deserialize)]
struct SearchHit {
    title: String,
}

#[derive(Debug, Deserialize)]
struct Page {
    title: String,
    #[serde(default)]
    missing: bool,
    #[serde(default)]
    invalid: bool,
    #[serde(default)]
    extract: Option<String>,
    #[serde(default)]
    pageprops: Option<PageProps>,
}

#[derive(Debug, Deserialize)]
struct PageProps {
    #[serde(default)]
    disambiguation: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct ParseResponse {
    #[serde(default)]
    parse: Option<ParseBody>,
    #[serde(default)]
    error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
struct ParseBody {
    #[serde(default)]
    wikitext: String,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    code: String,
    #[serde(default)]
    info: String,
}

#[derive(Debug, PartialEq)]
enum PageKind {
    Article { title: String, extract: String },
    Disambiguation { title: String },
    Missing,
}

fn api_error(error: ApiError) -> PolychatError {
    PolychatError::parse(SERVICE, format!("{}: {}", error.code, error.info))
}

fn search_titles(response: QueryResponse, limit: usize) -> Result<Vec<String>, PolychatError> {
    if let Some(error) = response.error {
        return Err(api_error(error));
    }

    Ok(response
        .query
        .map(|q| q.search)
        .unwrap_or_default()
        .into_iter()
        .map(|hit| hit.title)
        .take(limit)
        .collect())
}

fn classify_page(response: QueryResponse) -> Result<PageKind, PolychatError> {
    if let Some(error) = response.error {
        return Err(api_error(error));
    }

    let Some(page) = response
        .query
        .and_then(|q| q.pages.into_iter().next())
    else {
        return Ok(PageKind::Missing);
    };

    if page.missing || page.invalid {
        return Ok(PageKind::Missing);
    }

    let is_disambiguation = page
        .pageprops
        .as_ref()
        .is_some_and(|props| props.disambiguation.is_some());
    if is_disambiguation {
        return Ok(PageKind::Disambiguation { title: page.title });
    }

    match page.extract {
        Some(extract) if !extract.trim().is_empty() => Ok(PageKind::Article {
            title: page.title,
            extract: extract.trim().to_string(),
        }),
        _ => Ok(PageKind::Missing),
    }
}

fn listed_options(response: ParseResponse) -> Result<Vec<String>, PolychatError> {
    if let Some(error) = response.error {
        return Err(api_error(error));
    }
    let wikitext = response.parse.map(|p| p.wikitext).unwrap_or_default();
    Ok(bullet_links(&wikitext))
}

/// First article link of every bullet line, in order, without duplicates.
fn bullet_links(wikitext: &str) -> Vec<String> {
    let mut options: Vec<String> = Vec::new();
    for line in wikitext.lines() {
        let line = line.trim_start();
        if !line.starts_with('*') {
            continue;
        }
        if let Some(target) = first_article_link(line) {
            if !options.contains(&target) {
                options.push(target);
            }
        }
    }
    options
}

fn first_article_link(line: &str) -> Option<String> {
    let mut rest = line;
    while let Some(start) = rest.find("[[") {
        let after = &rest[start + 2..];
        let end = after.find("]]")?;
        if let Some(target) = article_target(&after[..end]) {
            return Some(target);
        }
        rest = &after[end + 2..];
    }
    None
}

/// Normalized target of `[[Target|label]]`, or `None` for links outside the
/// article namespace and same-page anchors.
fn article_target(link: &str) -> Option<String> {
    let target = link.split('|').next()?.trim();
    if target.starts_with(':') || target.starts_with('#') {
        return None;
    }
    if let Some((prefix, _)) = target.split_once(':') {
        let prefix = prefix.trim().to_ascii_lowercase();
        if NON_ARTICLE_PREFIXES.contains(&prefix.as_str()) {
            return None;
        }
    }

    let target = target.split('#').next().unwrap_or(target).trim();
    let target = target.replace('_', " ");
    let mut chars = target.chars();
    let first = chars.next()?;
    Some(first.to_uppercase().chain(chars).collect())
}
