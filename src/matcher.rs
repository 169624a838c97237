//! Query decomposition and candidate-title search.
//!
//! The pipeline runs in four stages, each behind an injected oracle:
//!
//! 1. [`segment_entity_runs`] splits the normalized tokens into alternating
//!    entity and non-entity runs (one NER call).
//! 2. [`PhraseDecomposer`] searches each multi-token run for the coarsest
//!    grouping into phrases the knowledge base confirms.
//! 3. [`filter_noun_chunks`] keeps the chunks the POS tagger calls nouns.
//! 4. [`allocate_searches`] spends the search budget across the noun chunks
//!    and the whole query, returning a deduplicated candidate list.
//!
//! [`PageMatcher`] wires the stages together.
//!
//! # Examples
//!
//! ```no_run
//! use std::sync::Arc;
//! use aska::corenlp::CoreNlpClientBuilder;
//! use aska::matcher::PageMatcherBuilder;
//! use aska::models::SearchBudget;
//! use aska::wikipedia::WikipediaClientBuilder;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let nlp = Arc::new(CoreNlpClientBuilder::new().build()?);
//! let wiki = Arc::new(WikipediaClientBuilder::new().build()?);
//!
//! let matcher = PageMatcherBuilder::new()
//!     .entity_tagger(nlp.clone())
//!     .pos_tagger(nlp)
//!     .phrase_oracle(wiki.clone())
//!     .title_search(wiki)
//!     .build()?;
//!
//! let outcome = matcher.match_query("Where was Barack Obama born?", SearchBudget::default())?;
//! for title in outcome.candidates.titles() {
//!     println!("{title}");
//! }
//! # Ok(())
//! # }
//! ```

mod allocator;
mod chunk_filter;
mod decomposer;
mod page_matcher;
mod segmenter;
#[cfg(test)]
pub(crate) mod test_support;

pub use allocator::allocate_searches;
pub use chunk_filter::{NounFilter, collect_chunks, filter_noun_chunks};
pub use decomposer::PhraseDecomposer;
pub use page_matcher::{BuildError, MatchOutcome, PageMatcher, PageMatcherBuilder};
pub use segmenter::{group_runs, segment_entity_runs};
