use crate::models::{EntityClass, PosTag};

use super::OracleError;

/// Named-entity tagging oracle.
pub trait EntityTagger: Send + Sync {
    /// Tags every token in one call.
    ///
    /// The result has the same length and order as `tokens`.
    fn tag_entities(&self, tokens: &[String]) -> Result<Vec<(String, EntityClass)>, OracleError>;
}

/// Part-of-speech tagging oracle.
pub trait PosTagger: Send + Sync {
    /// Tags every item in one call, one aggregate tag per item even when the
    /// item is a multi-word phrase.
    fn tag_pos(&self, items: &[String]) -> Result<Vec<(String, PosTag)>, OracleError>;
}

/// Knowledge-base phrase existence check.
pub trait PhraseOracle: Send + Sync {
    /// Returns `true` iff the knowledge base has a near-exact title match for `text`.
    fn phrase_exists(&self, text: &str) -> Result<bool, OracleError>;
}

/// Ranked knowledge-base title search.
pub trait TitleSearch: Send + Sync {
    /// Returns at most `limit` titles, best match first.
    fn search_titles(&self, text: &str, limit: usize) -> Result<Vec<String>, OracleError>;
}
