//! Query normalization ahead of matching.
//!
//! Turns a raw question into the ordered token list the matcher consumes:
//! possessives stripped, ASCII punctuation removed, English stopwords
//! dropped, whitespace tokenized. Token case is preserved because the entity
//! tagger relies on capitalization.

/// English stopwords (the NLTK list).
const STOPWORDS: &[&str] = &[
    "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "you're", "you've",
    "you'll", "you'd", "your", "yours", "yourself", "yourselves", "he", "him", "his", "himself",
    "she", "she's", "her", "hers", "herself", "it", "it's", "its", "itself", "they", "them",
    "their", "theirs", "themselves", "what", "which", "who", "whom", "this", "that", "that'll",
    "these", "those", "am", "is", "are", "was", "were", "be", "been", "being", "have", "has",
    "had", "having", "do", "does", "did", "doing", "a", "an", "the", "and", "but", "if", "or",
    "because", "as", "until", "while", "of", "at", "by", "for", "with", "about", "against",
    "between", "into", "through", "during", "before", "after", "above", "below", "to", "from",
    "up", "down", "in", "out", "on", "off", "over", "under", "again", "further", "then", "once",
    "here", "there", "when", "where", "why", "how", "all", "any", "both", "each", "few", "more",
    "most", "other", "some", "such", "no", "nor", "not", "only", "own", "same", "so", "than",
    "too", "very", "s", "t", "can", "will", "just", "don", "don't", "should", "should've", "now",
    "d", "ll", "m", "o", "re", "ve", "y", "ain", "aren", "aren't", "couldn", "couldn't", "didn",
    "didn't", "doesn", "doesn't", "hadn", "hadn't", "hasn", "hasn't", "haven", "haven't", "isn",
    "isn't", "ma", "mightn", "mightn't", "mustn", "mustn't", "needn", "needn't", "shan", "shan't",
    "shouldn", "shouldn't", "wasn", "wasn't", "weren", "weren't", "won", "won't", "wouldn",
    "wouldn't",
];

/// Which normalization steps to apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NormalizeOptions {
    pub remove_possessive: bool,
    pub remove_punctuation: bool,
    pub remove_stopwords: bool,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            remove_possessive: true,
            remove_punctuation: true,
            remove_stopwords: true,
        }
    }
}

pub struct QueryNormalizer;

impl QueryNormalizer {
    /// Normalizes and tokenizes a query.
    ///
    /// # Examples
    ///
    /// ```
    /// use aska::normalizer::{NormalizeOptions, QueryNormalizer};
    ///
    /// let tokens = QueryNormalizer::process_query(
    ///     "What is Obama's birthplace?",
    ///     &NormalizeOptions::default(),
    /// );
    /// assert_eq!(tokens, vec!["Obama", "birthplace"]);
    /// ```
    #[must_use]
    pub fn process_query(query: &str, options: &NormalizeOptions) -> Vec<String> {
        query
            .split_whitespace()
            .map(|word| {
                let word = if options.remove_possessive {
                    strip_possessive(word)
                } else {
                    word.to_string()
                };
                if options.remove_punctuation {
                    word.chars().filter(|c| !c.is_ascii_punctuation()).collect()
                } else {
                    word
                }
            })
            .filter(|word| !word.is_empty())
            .filter(|word| !(options.remove_stopwords && Self::is_stopword(word)))
            .collect()
    }

    /// Case-insensitive stopword check.
    pub fn is_stopword(word: &str) -> bool {
        let lower = word.to_lowercase();
        STOPWORDS.contains(&lower.as_str())
    }
}

/// Strips a trailing `'s`, or the apostrophe of a plural possessive (`s'`).
///
/// Trailing punctuation after the possessive ("Einstein's?") is kept.
fn strip_possessive(word: &str) -> String {
    let trimmed = word.trim_end_matches(|c: char| c.is_ascii_punctuation() && c != '\'');
    let suffix = &word[trimmed.len()..];

    let stem = ["'s", "\u{2019}s"]
        .iter()
        .find_map(|marker| trimmed.strip_suffix(marker))
        .or_else(|| {
            ["'", "\u{2019}"].iter().find_map(|marker| {
                trimmed
                    .strip_suffix(marker)
                    .filter(|stem| stem.ends_with('s'))
            })
        });

    match stem {
        Some(stem) => format!("{stem}{suffix}"),
        None => word.to_string(),
    }
}
