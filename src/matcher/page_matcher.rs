use std::sync::Arc;

use thiserror::Error;
use tracing::info;

use crate::models::{CandidateList, SearchBudget};
use crate::normalizer::{NormalizeOptions, QueryNormalizer};
use crate::oracle::{EntityTagger, OracleError, PhraseOracle, PosTagger, TitleSearch};

use super::allocator::allocate_searches;
use super::chunk_filter::{NounFilter, collect_chunks, filter_noun_chunks};
use super::decomposer::PhraseDecomposer;
use super::segmenter::segment_entity_runs;

/// Raised when a `PageMatcherBuilder` is missing a collaborator.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BuildError {
    #[error("{0} must be set before build()")]
    Missing(&'static str),
}

/// Builder for constructing `PageMatcher` instances.
#[derive(Default)]
pub struct PageMatcherBuilder {
    entity_tagger: Option<Arc<dyn EntityTagger>>,
    pos_tagger: Option<Arc<dyn PosTagger>>,
    phrase_oracle: Option<Arc<dyn PhraseOracle>>,
    title_search: Option<Arc<dyn TitleSearch>>,
    noun_filter: NounFilter,
    normalize: NormalizeOptions,
}

impl PageMatcherBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entity_tagger(mut self, tagger: Arc<dyn EntityTagger>) -> Self {
        self.entity_tagger = Some(tagger);
        self
    }

    pub fn pos_tagger(mut self, tagger: Arc<dyn PosTagger>) -> Self {
        self.pos_tagger = Some(tagger);
        self
    }

    pub fn phrase_oracle(mut self, oracle: Arc<dyn PhraseOracle>) -> Self {
        self.phrase_oracle = Some(oracle);
        self
    }

    pub fn title_search(mut self, search: Arc<dyn TitleSearch>) -> Self {
        self.title_search = Some(search);
        self
    }

    pub fn noun_filter(mut self, filter: NounFilter) -> Self {
        self.noun_filter = filter;
        self
    }

    /// Normalization applied by `match_query`.
    pub fn normalize_options(mut self, options: NormalizeOptions) -> Self {
        self.normalize = options;
        self
    }

    /// Builds the `PageMatcher`.
    ///
    /// # Errors
    ///
    /// Returns `BuildError::Missing` naming the first oracle that was not set.
    pub fn build(self) -> Result<PageMatcher, BuildError> {
        Ok(PageMatcher {
            entity_tagger: self.entity_tagger.ok_or(BuildError::Missing("entity_tagger"))?,
            pos_tagger: self.pos_tagger.ok_or(BuildError::Missing("pos_tagger"))?,
            phrase_oracle: self.phrase_oracle.ok_or(BuildError::Missing("phrase_oracle"))?,
            title_search: self.title_search.ok_or(BuildError::Missing("title_search"))?,
            noun_filter: self.noun_filter,
            normalize: self.normalize,
        })
    }
}

/// Everything one query produced, stage by stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchOutcome {
    /// Normalized query tokens
    pub tokens: Vec<String>,
    /// Noun chunks that received a share of the search budget
    pub chunks: Vec<String>,
    /// Deduplicated candidate titles, best first
    pub candidates: CandidateList,
}

/// Maps a question to a short list of candidate knowledge-base titles.
///
/// Holds no per-query state, so one matcher can serve independent queries
/// from several threads.
pub struct PageMatcher {
    entity_tagger: Arc<dyn EntityTagger>,
    pos_tagger: Arc<dyn PosTagger>,
    phrase_oracle: Arc<dyn PhraseOracle>,
    title_search: Arc<dyn TitleSearch>,
    noun_filter: NounFilter,
    normalize: NormalizeOptions,
}

impl PageMatcher {
    /// Splits query tokens into noun chunks.
    ///
    /// Runs are segmented by entity class, multi-token runs are decomposed
    /// into verified phrases, and the concatenated chunks are noun-filtered.
    pub fn get_chunks(&self, tokens: &[String]) -> Result<Vec<String>, OracleError> {
        let runs = segment_entity_runs(tokens, self.entity_tagger.as_ref())?;
        let decomposer = PhraseDecomposer::new(self.phrase_oracle.as_ref());
        let chunks = collect_chunks(&runs, &decomposer)?;
        filter_noun_chunks(chunks, self.pos_tagger.as_ref(), self.noun_filter)
    }

    /// Spends `budget` across `chunks` and the whole query.
    pub fn get_relevant_searches(
        &self,
        tokens: &[String],
        chunks: &[String],
        budget: SearchBudget,
    ) -> Result<CandidateList, OracleError> {
        allocate_searches(tokens, chunks, budget, self.title_search.as_ref())
    }

    /// Runs chunking and search allocation on already-normalized tokens.
    pub fn match_tokens(&self, tokens: Vec<String>, budget: SearchBudget) -> Result<MatchOutcome, OracleError> {
        let chunks = self.get_chunks(&tokens)?;
        info!(tokens = tokens.len(), chunks = chunks.len(), "chunked query");

        let candidates = self.get_relevant_searches(&tokens, &chunks, budget)?;
        info!(candidates = candidates.len(), n_searches = budget.n_searches(), "matched query");

        Ok(MatchOutcome {
            tokens,
            chunks,
            candidates,
        })
    }

    /// Normalizes `query` and matches it.
    pub fn match_query(&self, query: &str, budget: SearchBudget) -> Result<MatchOutcome, OracleError> {
        let tokens = QueryNormalizer::process_query(query, &self.normalize);
        self.match_tokens(tokens, budget)
    }
}
