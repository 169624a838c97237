//! Mock oracles shared by the matcher unit tests.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use crate::models::{EntityClass, PosTag};
use crate::oracle::{EntityTagger, OracleError, PhraseOracle, PosTagger, TitleSearch};

pub fn tokens(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| w.to_string()).collect()
}

/// Tags listed words as entities, everything else as non-entity.
pub struct MockEntityTagger {
    pub entities: HashSet<String>,
}

impl MockEntityTagger {
    pub fn new(entities: &[&str]) -> Self {
        Self {
            entities: entities.iter().map(|e| e.to_string()).collect(),
        }
    }
}

impl EntityTagger for MockEntityTagger {
    fn tag_entities(&self, tokens: &[String]) -> Result<Vec<(String, EntityClass)>, OracleError> {
        Ok(tokens
            .iter()
            .map(|t| {
                let class = if self.entities.contains(t) {
                    EntityClass::Entity
                } else {
                    EntityClass::NonEntity
                };
                (t.clone(), class)
            })
            .collect())
    }
}

/// Returns a fixed tag per item, `default_tag` for unknown items.
pub struct MockPosTagger {
    pub tags: HashMap<String, String>,
    pub default_tag: String,
    pub calls: Mutex<usize>,
}

impl MockPosTagger {
    pub fn new(tags: &[(&str, &str)], default_tag: &str) -> Self {
        Self {
            tags: tags
                .iter()
                .map(|(item, tag)| (item.to_string(), tag.to_string()))
                .collect(),
            default_tag: default_tag.to_string(),
            calls: Mutex::new(0),
        }
    }
}

impl PosTagger for MockPosTagger {
    fn tag_pos(&self, items: &[String]) -> Result<Vec<(String, PosTag)>, OracleError> {
        *self.calls.lock().unwrap() += 1;
        Ok(items
            .iter()
            .map(|item| {
                let tag = self.tags.get(item).unwrap_or(&self.default_tag);
                (item.clone(), PosTag::new(tag.as_str()))
            })
            .collect())
    }
}

/// Confirms exactly the listed phrases and records every query.
pub struct MockPhraseOracle {
    pub phrases: HashSet<String>,
    pub calls: Mutex<Vec<String>>,
}

impl MockPhraseOracle {
    pub fn new(phrases: &[&str]) -> Self {
        Self {
            phrases: phrases.iter().map(|p| p.to_string()).collect(),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

impl PhraseOracle for MockPhraseOracle {
    fn phrase_exists(&self, text: &str) -> Result<bool, OracleError> {
        self.calls.lock().unwrap().push(text.to_string());
        Ok(self.phrases.contains(text))
    }
}

/// Serves canned result lists per query text, truncated to the limit.
pub struct MockTitleSearch {
    pub results: HashMap<String, Vec<String>>,
    pub calls: Mutex<Vec<(String, usize)>>,
}

impl MockTitleSearch {
    pub fn new(results: &[(&str, &[&str])]) -> Self {
        Self {
            results: results
                .iter()
                .map(|(query, titles)| (query.to_string(), tokens(titles)))
                .collect(),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<(String, usize)> {
        self.calls.lock().unwrap().clone()
    }
}

impl TitleSearch for MockTitleSearch {
    fn search_titles(&self, text: &str, limit: usize) -> Result<Vec<String>, OracleError> {
        self.calls.lock().unwrap().push((text.to_string(), limit));
        let mut titles = self.results.get(text).cloned().unwrap_or_default();
        titles.truncate(limit);
        Ok(titles)
    }
}

/// Every call fails as if the backend were down.
pub struct UnavailableOracle;

impl UnavailableOracle {
    fn error() -> OracleError {
        OracleError::Http { status: 503 }
    }
}

impl EntityTagger for UnavailableOracle {
    fn tag_entities(&self, _tokens: &[String]) -> Result<Vec<(String, EntityClass)>, OracleError> {
        Err(Self::error())
    }
}

impl PosTagger for UnavailableOracle {
    fn tag_pos(&self, _items: &[String]) -> Result<Vec<(String, PosTag)>, OracleError> {
        Err(Self::error())
    }
}

impl PhraseOracle for UnavailableOracle {
    fn phrase_exists(&self, _text: &str) -> Result<bool, OracleError> {
        Err(Self::error())
    }
}

impl TitleSearch for UnavailableOracle {
    fn search_titles(&self, _text: &str, _limit: usize) -> Result<Vec<String>, OracleError> {
        Err(Self::error())
    }
}
