use std::num::NonZeroUsize;

/// Result quota for one search allocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchBudget {
    n_searches: NonZeroUsize,
}

impl SearchBudget {
    pub fn new(n_searches: NonZeroUsize) -> Self {
        Self { n_searches }
    }

    /// Returns `None` for a zero budget.
    pub fn from_count(n_searches: usize) -> Option<Self> {
        NonZeroUsize::new(n_searches).map(Self::new)
    }

    pub fn n_searches(self) -> usize {
        self.n_searches.get()
    }

    /// Whether the budget is large enough to give every chunk a slice and
    /// still leave room for the whole-query search.
    pub fn splits_across(self, n_chunks: usize) -> bool {
        self.n_searches.get() > n_chunks + 1
    }

    /// Titles each chunk may contribute; the extra share belongs to the
    /// whole-query search.
    pub fn per_chunk_quota(self, n_chunks: usize) -> usize {
        self.n_searches.get() / (n_chunks + 1)
    }
}

impl Default for SearchBudget {
    fn default() -> Self {
        Self::new(NonZeroUsize::new(10).unwrap_or(NonZeroUsize::MIN))
    }
}
