//! Evaluation harness for the page matcher.
//!
//! Scores the matcher against a corpus of questions labelled with the page
//! title that answers them: a hit is a question whose label appears among
//! the candidate titles.

use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::matcher::PageMatcher;
use crate::models::SearchBudget;
use crate::oracle::OracleError;

/// How often progress is logged while evaluating.
const PROGRESS_EVERY: usize = 25;

/// Test corpus entry structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorpusEntry {
    /// The natural-language question.
    pub question: String,
    /// Title of the page that answers it.
    pub label: String,
}

/// A question whose label was not among the candidates.
#[derive(Debug, Clone)]
pub struct EvalFailure {
    pub question: String,
    pub label: String,
    pub chunks: Vec<String>,
    pub searches: Vec<String>,
}

/// Aggregate result of an evaluation run.
#[derive(Debug, Clone, Default)]
pub struct EvalReport {
    pub total: usize,
    pub hits: usize,
    pub failures: Vec<EvalFailure>,
}

impl EvalReport {
    /// Fraction of questions whose label was found (0.0 for an empty corpus).
    pub fn accuracy(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.hits as f64 / self.total as f64
        }
    }
}

/// Loads the evaluation corpus.
///
/// # Arguments
///
/// * `corpus_path` - Optional path to corpus file. If None, uses
///   `tests/fixtures/page_corpus.json` in the crate directory.
pub fn load_corpus(corpus_path: Option<PathBuf>) -> anyhow::Result<Vec<CorpusEntry>> {
    let path = corpus_path.unwrap_or_else(|| {
        PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("tests")
            .join("fixtures")
            .join("page_corpus.json")
    });

    let content = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read corpus {}", path.display()))?;
    let entries: Vec<CorpusEntry> = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse corpus {}", path.display()))?;
    Ok(entries)
}

/// Runs every corpus question through `matcher`.
///
/// # Errors
///
/// The first oracle failure stops the run; a partially scored corpus would
/// misstate accuracy.
pub fn evaluate(
    matcher: &PageMatcher,
    entries: &[CorpusEntry],
    budget: SearchBudget,
) -> Result<EvalReport, OracleError> {
    let mut report = EvalReport {
        total: entries.len(),
        ..Default::default()
    };

    for (index, entry) in entries.iter().enumerate() {
        if index % PROGRESS_EVERY == 0 {
            info!("Evaluating: [{}]/[{}]", index, entries.len());
        }

        let outcome = matcher.match_query(&entry.question, budget)?;
        if outcome.candidates.contains(&entry.label) {
            report.hits += 1;
        } else {
            warn!(question = %entry.question, label = %entry.label, "label not among candidates");
            report.failures.push(EvalFailure {
                question: entry.question.clone(),
                label: entry.label.clone(),
                chunks: outcome.chunks,
                searches: outcome.candidates.into_titles(),
            });
        }
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::Arc;

    use crate::matcher::PageMatcherBuilder;
    use crate::matcher::test_support::{
        MockEntityTagger, MockPhraseOracle, MockPosTagger, MockTitleSearch, UnavailableOracle,
    };

    fn entry(question: &str, label: &str) -> CorpusEntry {
        CorpusEntry {
            question: question.to_string(),
            label: label.to_string(),
        }
    }

    fn matcher(search: MockTitleSearch) -> PageMatcher {
        PageMatcherBuilder::new()
            .entity_tagger(Arc::new(MockEntityTagger::new(&[])))
            .pos_tagger(Arc::new(MockPosTagger::new(&[], "NN")))
            .phrase_oracle(Arc::new(MockPhraseOracle::new(&[])))
            .title_search(Arc::new(search))
            .build()
            .unwrap()
    }

    #[test]
    fn accuracy_counts_labels_found_among_candidates() {
        let search = MockTitleSearch::new(&[
            ("heresy", &["Heresy", "Christian heresy"]),
            ("photosynthesis", &["Photosynthesis"]),
        ]);
        let entries = vec![
            entry("What is heresy?", "Christian heresy"),
            entry("What is photosynthesis?", "Chlorophyll"),
        ];

        let report = evaluate(&matcher(search), &entries, SearchBudget::default()).unwrap();

        assert_eq!(report.total, 2);
        assert_eq!(report.hits, 1);
        assert!((report.accuracy() - 0.5).abs() < f64::EPSILON);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].label, "Chlorophyll");
        assert_eq!(report.failures[0].searches, vec!["Photosynthesis"]);
    }

    #[test]
    fn empty_corpus_has_zero_accuracy() {
        let report = evaluate(&matcher(MockTitleSearch::new(&[])), &[], SearchBudget::default()).unwrap();
        assert_eq!(report.accuracy(), 0.0);
    }

    #[test]
    fn oracle_failure_stops_evaluation() {
        let matcher = PageMatcherBuilder::new()
            .entity_tagger(Arc::new(UnavailableOracle))
            .pos_tagger(Arc::new(UnavailableOracle))
            .phrase_oracle(Arc::new(UnavailableOracle))
            .title_search(Arc::new(UnavailableOracle))
            .build()
            .unwrap();

        let result = evaluate(&matcher, &[entry("Who is Obama?", "Barack Obama")], SearchBudget::default());
        assert!(result.is_err());
    }

    #[test]
    fn load_corpus_reads_custom_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"[{{"question": "Who wrote Hamlet?", "label": "Hamlet"}}]"#).unwrap();

        let entries = load_corpus(Some(file.path().to_path_buf())).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].label, "Hamlet");
    }

    #[test]
    fn load_corpus_rejects_malformed_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "question,label").unwrap();

        assert!(load_corpus(Some(file.path().to_path_buf())).is_err());
    }

    #[test]
    fn default_corpus_parses() {
        let entries = load_corpus(None).unwrap();
        assert!(!entries.is_empty());
        assert!(entries.iter().all(|e| !e.question.is_empty() && !e.label.is_empty()));
    }
}
