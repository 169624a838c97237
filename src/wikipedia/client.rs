/// Wikipedia HTTP client implementation.
///
/// This module provides `WikipediaClient` for making synchronous requests to the
/// MediaWiki search API, along with a builder for configuration.
use std::time::Duration;

use serde::Deserialize;
use tracing::debug;

use crate::oracle::{OracleError, PhraseOracle, RetryPolicy, TitleSearch, retry_with_backoff};

const DEFAULT_API_URL: &str = "https://en.wikipedia.org/w/api.php";
const DEFAULT_USER_AGENT: &str = concat!("aska/", env!("CARGO_PKG_VERSION"));

/// Which part of a page the search matches against (`srwhat`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchMode {
    /// Backend default ranking, the same one the search box uses.
    Title,
    /// Full-text search over page bodies.
    Text,
    /// Near-exact title match only.
    NearMatch,
}

impl SearchMode {
    fn srwhat(self) -> Option<&'static str> {
        match self {
            Self::Title => None,
            Self::Text => Some("text"),
            Self::NearMatch => Some("nearmatch"),
        }
    }
}

/// Builder for constructing `WikipediaClient` instances.
///
/// # Examples
///
/// ```
/// use aska::wikipedia::WikipediaClientBuilder;
///
/// let client = WikipediaClientBuilder::new()
///     .base_url("https://en.wikipedia.org/w/api.php")
///     .build()
///     .expect("Failed to create client");
/// ```
#[derive(Debug, Default)]
pub struct WikipediaClientBuilder {
    base_url: Option<String>,
    user_agent: Option<String>,
    retry: Option<RetryPolicy>,
    timeout: Option<Duration>,
}

impl WikipediaClientBuilder {
    /// Creates a new `WikipediaClientBuilder` with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the `api.php` endpoint URL.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Sets the User-Agent header. MediaWiki rejects anonymous agents.
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// Sets the retry schedule for transient failures.
    pub fn retry(mut self, policy: RetryPolicy) -> Self {
        self.retry = Some(policy);
        self
    }

    /// Sets the per-request timeout (default 30s).
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Builds the `WikipediaClient` with the configured settings.
    ///
    /// # Environment Variables
    ///
    /// If `base_url()` was not called, this method will check the
    /// `WIKIPEDIA_API_URL` environment variable. If not set, it defaults to
    /// the English Wikipedia endpoint.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::InvalidUrl` if the URL does not parse, or
    /// `OracleError::Network` if the HTTP client cannot be created.
    pub fn build(self) -> Result<WikipediaClient, OracleError> {
        let base_url = match self.base_url {
            Some(url) => url,
            None => std::env::var("WIKIPEDIA_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string()),
        };

        reqwest::Url::parse(&base_url)
            .map_err(|e| OracleError::InvalidUrl(format!("{}: {}", base_url, e)))?;

        let client = reqwest::blocking::Client::builder()
            .user_agent(self.user_agent.unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()))
            .timeout(self.timeout.unwrap_or(Duration::from_secs(30)))
            .connect_timeout(Duration::from_secs(5))
            .build()
            .map_err(OracleError::Network)?;

        Ok(WikipediaClient {
            client,
            base_url,
            retry: self.retry.unwrap_or_default(),
        })
    }
}

/// Synchronous client for the MediaWiki search API.
///
/// It should be constructed using `WikipediaClientBuilder`.
pub struct WikipediaClient {
    client: reqwest::blocking::Client,
    base_url: String,
    retry: RetryPolicy,
}

impl WikipediaClient {
    /// Returns the API endpoint this client queries.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns `true` if some page title is a near-exact match for `query`.
    pub fn has_near_match(&self, query: &str) -> Result<bool, OracleError> {
        let hits = self.search(query, None, SearchMode::NearMatch)?;
        debug!(query, found = !hits.is_empty(), "near-match check");
        Ok(!hits.is_empty())
    }

    /// Ranked page titles for `query`, at most `limit` of them.
    pub fn find_titles_by_query(&self, query: &str, limit: usize) -> Result<Vec<String>, OracleError> {
        if limit == 0 {
            return Ok(Vec::new());
        }
        self.search(query, Some(limit), SearchMode::Title)
    }

    /// Page titles whose body text matches `query`, at most `limit` of them.
    pub fn find_titles_by_text(&self, query: &str, limit: usize) -> Result<Vec<String>, OracleError> {
        if limit == 0 {
            return Ok(Vec::new());
        }
        self.search(query, Some(limit), SearchMode::Text)
    }

    fn search(
        &self,
        query: &str,
        limit: Option<usize>,
        mode: SearchMode,
    ) -> Result<Vec<String>, OracleError> {
        // MediaWiki rejects an empty srsearch outright
        if query.trim().is_empty() {
            return Ok(Vec::new());
        }

        let params = search_params(query, limit, mode);

        retry_with_backoff(&self.retry, || {
            let response = self
                .client
                .get(&self.base_url)
                .query(&params)
                .send()
                .map_err(OracleError::from_transport)?;

            let status = response.status();
            if !status.is_success() {
                return Err(OracleError::Http {
                    status: status.as_u16(),
                });
            }

            let body = response.text().map_err(OracleError::from_transport)?;
            parse_search_response(&body)
        })
    }
}

impl PhraseOracle for WikipediaClient {
    fn phrase_exists(&self, text: &str) -> Result<bool, OracleError> {
        self.has_near_match(text)
    }
}

impl TitleSearch for WikipediaClient {
    fn search_titles(&self, text: &str, limit: usize) -> Result<Vec<String>, OracleError> {
        self.find_titles_by_query(text, limit)
    }
}

fn search_params(query: &str, limit: Option<usize>, mode: SearchMode) -> Vec<(&'static str, String)> {
    let mut params = vec![
        ("action", "query".to_string()),
        ("format", "json".to_string()),
        ("list", "search".to_string()),
        ("srprop", String::new()),
        ("srsearch", query.to_string()),
    ];
    if let Some(limit) = limit {
        params.push(("srlimit", limit.to_string()));
    }
    if let Some(srwhat) = mode.srwhat() {
        params.push(("srwhat", srwhat.to_string()));
    }
    params
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    query: Option<SearchQuery>,
    error: Option<ApiErrorBody>,
}

#[derive(Debug, Deserialize)]
struct SearchQuery {
    #[serde(default)]
    search: Vec<SearchHit>,
}

#[derive(Debug, Deserialize)]
struct SearchHit {
    title: String,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    code: String,
    #[serde(default)]
    info: String,
}

/// Extracts the ordered hit titles from a `list=search` response body.
fn parse_search_response(body: &str) -> Result<Vec<String>, OracleError> {
    let response: SearchResponse = serde_json::from_str(body).map_err(OracleError::Serialization)?;

    if let Some(error) = response.error {
        return Err(OracleError::Api {
            message: format!("{}: {}", error.code, error.info),
        });
    }

    let query = response.query.ok_or_else(|| OracleError::Api {
        message: "Missing 'query' field in API response".to_string(),
    })?;

    Ok(query.search.into_iter().map(|hit| hit.title).collect())
}
