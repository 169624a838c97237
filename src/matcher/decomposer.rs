//! Recursive phrase decomposition of a single entity run.
//!
//! The search enumerates every contiguous group of two or more remaining
//! tokens, keeps the groups the knowledge base confirms, and recurses on what
//! is left. A confirmed group's tokens are removed by value: the first
//! remaining occurrence of each word goes, once per word. Among all successful branches the one with the fewest chunks wins
//! (first in enumeration order on ties), so fewer, longer verified phrases are
//! preferred over many short ones. When nothing merges, every remaining token
//! becomes its own chunk.
//!
//! The search is exponential in the run length. Oracle answers are memoized by
//! phrase text for the duration of one `decompose` call, which removes repeated
//! checks across branches without changing the result.

use std::collections::HashMap;

use tracing::debug;

use crate::models::{Chunk, Chunking, EntityRun};
use crate::oracle::{OracleError, PhraseOracle};

/// A remaining token and its position in the query.
#[derive(Debug, Clone, Copy)]
struct Slot<'t> {
    position: usize,
    token: &'t str,
}

/// Finds the coarsest verified chunking of a run.
pub struct PhraseDecomposer<'o> {
    oracle: &'o dyn PhraseOracle,
}

impl<'o> PhraseDecomposer<'o> {
    pub fn new(oracle: &'o dyn PhraseOracle) -> Self {
        Self { oracle }
    }

    /// Decomposes `run` into chunks reported in query order.
    ///
    /// # Errors
    ///
    /// Any oracle failure aborts the whole decomposition; it is never read
    /// as "phrase does not exist".
    pub fn decompose(&self, run: &EntityRun) -> Result<Chunking, OracleError> {
        self.decompose_tokens(run.tokens(), run.start())
    }

    /// Decomposes raw tokens whose first token sits at query position `offset`.
    pub fn decompose_tokens(&self, tokens: &[String], offset: usize) -> Result<Chunking, OracleError> {
        let remaining: Vec<Slot<'_>> = tokens
            .iter()
            .enumerate()
            .map(|(i, token)| Slot {
                position: offset + i,
                token: token.as_str(),
            })
            .collect();

        let mut search = Search {
            oracle: self.oracle,
            verdicts: HashMap::new(),
            oracle_calls: 0,
        };
        let chunks = search.recurse(&remaining, Vec::new())?;

        debug!(
            tokens = tokens.len(),
            chunks = chunks.len(),
            oracle_calls = search.oracle_calls,
            distinct_phrases = search.verdicts.len(),
            "decomposed run"
        );

        Ok(Chunking::from_chunks(chunks))
    }
}

/// State for one decomposition call.
struct Search<'o> {
    oracle: &'o dyn PhraseOracle,
    verdicts: HashMap<String, bool>,
    oracle_calls: usize,
}

impl Search<'_> {
    /// Each branch receives its own copy of `chunks` and a freshly built
    /// remaining list, so no branch observes another's state.
    fn recurse(&mut self, remaining: &[Slot<'_>], mut chunks: Vec<Chunk>) -> Result<Vec<Chunk>, OracleError> {
        match remaining {
            [] => return Ok(chunks),
            [only] => {
                chunks.push(Chunk::singleton(only.token, only.position));
                return Ok(chunks);
            }
            _ => {}
        }

        let mut best: Option<Vec<Chunk>> = None;

        for start in 0..remaining.len() {
            for end in start + 1..remaining.len() {
                let group = &remaining[start..=end];
                let words: Vec<&str> = group.iter().map(|slot| slot.token).collect();
                let phrase = words.join(" ");

                if !self.exists(&phrase)? {
                    continue;
                }

                let (rest, first_position) = remove_by_value(remaining, &words);

                let mut branch = chunks.clone();
                branch.push(Chunk::new(&words, first_position.unwrap_or(group[0].position)));
                let result = self.recurse(&rest, branch)?;

                if best.as_ref().is_none_or(|b| result.len() < b.len()) {
                    best = Some(result);
                }
            }
        }

        match best {
            Some(result) => Ok(result),
            None => {
                chunks.extend(
                    remaining
                        .iter()
                        .map(|slot| Chunk::singleton(slot.token, slot.position)),
                );
                Ok(chunks)
            }
        }
    }

    fn exists(&mut self, phrase: &str) -> Result<bool, OracleError> {
        if let Some(&verdict) = self.verdicts.get(phrase) {
            return Ok(verdict);
        }
        self.oracle_calls += 1;
        let verdict = self.oracle.phrase_exists(phrase)?;
        self.verdicts.insert(phrase.to_string(), verdict);
        Ok(verdict)
    }
}

/// Removes the first remaining slot holding each of `words`, keeping the
/// order of what is left.
///
/// A duplicated token is removed once per occurrence in `words`, so the slot
/// consumed may sit outside the matched group. Returns the leftover slots and
/// the earliest query position consumed.
fn remove_by_value<'t>(remaining: &[Slot<'t>], words: &[&str]) -> (Vec<Slot<'t>>, Option<usize>) {
    let mut rest = remaining.to_vec();
    let mut first_position: Option<usize> = None;

    for word in words {
        if let Some(index) = rest.iter().position(|slot| slot.token == *word) {
            let position = rest.remove(index).position;
            first_position = Some(first_position.map_or(position, |p| p.min(position)));
        }
    }

    (rest, first_position)
}
