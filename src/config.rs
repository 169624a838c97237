/// Matcher configuration read from the environment.
///
/// Backend endpoints are configured on their client builders
/// (`WIKIPEDIA_API_URL`, `CORENLP_URL`); this covers the matching knobs.
use crate::matcher::NounFilter;
use crate::models::SearchBudget;

/// Configuration for a matching run.
///
/// Parsed from environment variables at call time with fallback defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatcherConfig {
    /// Total candidate titles to return (default 10).
    pub budget: SearchBudget,
    /// Whether proper nouns count as noun chunks (default true).
    pub include_proper_nouns: bool,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            budget: SearchBudget::default(),
            include_proper_nouns: true,
        }
    }
}

impl MatcherConfig {
    /// Parses configuration from environment variables.
    ///
    /// Falls back to defaults when env vars are not set or invalid.
    ///
    /// # Environment Variables
    ///
    /// - `ASKA_N_SEARCHES` (positive integer, default 10): candidate titles per query
    /// - `ASKA_INCLUDE_PROPER_NOUNS` (bool, default true): keep `NNP`/`NNPS` chunks
    ///
    /// # Examples
    ///
    /// ```
    /// use aska::config::MatcherConfig;
    ///
    /// let config = MatcherConfig::from_env();
    /// assert!(config.budget.n_searches() > 0);
    /// ```
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let budget = std::env::var("ASKA_N_SEARCHES")
            .ok()
            .and_then(|s| s.trim().parse::<usize>().ok())
            .and_then(SearchBudget::from_count)
            .unwrap_or(defaults.budget);

        let include_proper_nouns = std::env::var("ASKA_INCLUDE_PROPER_NOUNS")
            .ok()
            .and_then(|s| parse_bool(&s))
            .unwrap_or(defaults.include_proper_nouns);

        Self {
            budget,
            include_proper_nouns,
        }
    }

    pub fn noun_filter(&self) -> NounFilter {
        NounFilter {
            include_proper_nouns: self.include_proper_nouns,
        }
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
