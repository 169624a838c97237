//! Chunk collection across runs and noun filtering.

use tracing::debug;

use crate::models::{EntityRun, PosTag};
use crate::oracle::{OracleError, PosTagger};

use super::decomposer::PhraseDecomposer;

/// Which part-of-speech categories count as nouns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NounFilter {
    /// Keep proper nouns (`NNP`, `NNPS`) as well as common nouns.
    pub include_proper_nouns: bool,
}

impl Default for NounFilter {
    fn default() -> Self {
        Self {
            include_proper_nouns: true,
        }
    }
}

impl NounFilter {
    pub fn accepts(&self, tag: &PosTag) -> bool {
        tag.is_noun() && (self.include_proper_nouns || !tag.is_proper_noun())
    }
}

/// Concatenates the chunks of every run in query order.
///
/// Single-token runs contribute their token directly; only longer runs go
/// through the decomposer.
pub fn collect_chunks(
    runs: &[EntityRun],
    decomposer: &PhraseDecomposer<'_>,
) -> Result<Vec<String>, OracleError> {
    let mut chunks = Vec::new();
    for run in runs {
        if run.is_singleton() {
            chunks.extend(run.tokens().iter().cloned());
        } else {
            chunks.extend(decomposer.decompose(run)?.into_texts());
        }
    }
    Ok(chunks)
}

/// Keeps the chunks whose aggregate part-of-speech tag is a noun.
///
/// The tagger is called once for the whole list. Order is preserved and
/// rejected chunks are dropped.
pub fn filter_noun_chunks(
    chunks: Vec<String>,
    tagger: &dyn PosTagger,
    filter: NounFilter,
) -> Result<Vec<String>, OracleError> {
    if chunks.is_empty() {
        return Ok(chunks);
    }

    let tagged = tagger.tag_pos(&chunks)?;
    if tagged.len() != chunks.len() {
        return Err(OracleError::Misaligned {
            expected: chunks.len(),
            actual: tagged.len(),
        });
    }

    let total = chunks.len();
    let nouns: Vec<String> = chunks
        .into_iter()
        .zip(tagged)
        .filter(|(_, (_, tag))| filter.accepts(tag))
        .map(|(chunk, _)| chunk)
        .collect();

    debug!(total, kept = nouns.len(), "filtered noun chunks");
    Ok(nouns)
}
