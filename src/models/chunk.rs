use std::fmt;

/// A group of one or more run tokens rendered as a single phrase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    text: String,
    token_count: usize,
    start: usize,
}

impl Chunk {
    /// Joins `tokens` with single spaces. `start` is the query position of the
    /// earliest token in the group.
    pub fn new(tokens: &[&str], start: usize) -> Self {
        Self {
            text: tokens.join(" "),
            token_count: tokens.len(),
            start,
        }
    }

    pub fn singleton(token: &str, start: usize) -> Self {
        Self::new(&[token], start)
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn token_count(&self) -> usize {
        self.token_count
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn is_singleton(&self) -> bool {
        self.token_count == 1
    }

    /// True for chunks that were verified against the knowledge base.
    pub fn is_phrase(&self) -> bool {
        self.token_count >= 2
    }

    pub fn into_text(self) -> String {
        self.text
    }
}

impl fmt::Display for Chunk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// A full partition of one entity run into chunks, in query order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Chunking {
    chunks: Vec<Chunk>,
}

impl Chunking {
    /// Orders `chunks` by the query position of their first token.
    pub fn from_chunks(mut chunks: Vec<Chunk>) -> Self {
        chunks.sort_by_key(Chunk::start);
        Self { chunks }
    }

    pub fn chunks(&self) -> &[Chunk] {
        &self.chunks
    }

    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// Total number of run tokens covered by this chunking.
    pub fn token_count(&self) -> usize {
        self.chunks.iter().map(Chunk::token_count).sum()
    }

    pub fn texts(&self) -> Vec<&str> {
        self.chunks.iter().map(Chunk::text).collect()
    }

    pub fn into_texts(self) -> Vec<String> {
        self.chunks.into_iter().map(Chunk::into_text).collect()
    }
}

impl IntoIterator for Chunking {
    type Item = Chunk;
    type IntoIter = std::vec::IntoIter<Chunk>;

    fn into_iter(self) -> Self::IntoIter {
        self.chunks.into_iter()
    }
}
