use std::collections::HashSet;

/// Ordered, duplicate-free list of candidate titles with a fixed capacity.
///
/// The first insertion of a title wins; later duplicates are ignored and so
/// are insertions once the list is full.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CandidateList {
    titles: Vec<String>,
    seen: HashSet<String>,
    capacity: usize,
}

impl CandidateList {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            titles: Vec::with_capacity(capacity),
            seen: HashSet::with_capacity(capacity),
            capacity,
        }
    }

    /// Appends `title` unless it is already present or the list is full.
    ///
    /// Returns `true` if the title was accepted.
    pub fn push(&mut self, title: impl Into<String>) -> bool {
        if self.is_full() {
            return false;
        }
        let title = title.into();
        if !self.seen.insert(title.clone()) {
            return false;
        }
        self.titles.push(title);
        true
    }

    pub fn contains(&self, title: &str) -> bool {
        self.seen.contains(title)
    }

    pub fn is_full(&self) -> bool {
        self.titles.len() >= self.capacity
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.titles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.titles.is_empty()
    }

    pub fn titles(&self) -> &[String] {
        &self.titles
    }

    pub fn into_titles(self) -> Vec<String> {
        self.titles
    }
}
