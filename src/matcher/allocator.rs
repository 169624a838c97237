//! Search budget allocation across noun chunks.

use tracing::debug;

use crate::models::{CandidateList, SearchBudget};
use crate::oracle::{OracleError, TitleSearch};

/// Assembles up to `budget.n_searches()` unique candidate titles.
///
/// When the budget splits across the chunks, each chunk is searched once and
/// may contribute `per_chunk_quota` titles not seen before; the whole query
/// is then searched once to fill the remaining slots. Otherwise the chunks
/// are ignored and the whole-query results are returned.
///
/// Empty `query_tokens` yield an empty list without any search.
///
/// # Errors
///
/// Any search failure aborts the allocation; no partial list is returned.
pub fn allocate_searches(
    query_tokens: &[String],
    chunks: &[String],
    budget: SearchBudget,
    search: &dyn TitleSearch,
) -> Result<CandidateList, OracleError> {
    let n_searches = budget.n_searches();
    let mut candidates = CandidateList::with_capacity(n_searches);

    if query_tokens.is_empty() {
        return Ok(candidates);
    }

    let query = query_tokens.join(" ");

    if !budget.splits_across(chunks.len()) {
        debug!(n_searches, chunks = chunks.len(), "budget too small to split, searching whole query");
        for title in search.search_titles(&query, n_searches)? {
            candidates.push(title);
        }
        return Ok(candidates);
    }

    let quota = budget.per_chunk_quota(chunks.len());
    for chunk in chunks {
        let mut accepted = 0;
        for title in search.search_titles(chunk, n_searches)? {
            if accepted >= quota {
                break;
            }
            if candidates.push(title) {
                accepted += 1;
            }
        }
        debug!(chunk = chunk.as_str(), accepted, quota, "chunk searched");
    }

    for title in search.search_titles(&query, n_searches)? {
        if candidates.is_full() {
            break;
        }
        candidates.push(title);
    }

    debug!(n_searches, found = candidates.len(), "allocated searches");
    Ok(candidates)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matcher::test_support::{MockTitleSearch, UnavailableOracle, tokens};

    fn budget(n: usize) -> SearchBudget {
        SearchBudget::from_count(n).unwrap()
    }

    #[test]
    fn chunk_quota_then_whole_query_fill() {
        let search = MockTitleSearch::new(&[
            ("heresy", &["A", "B"]),
            ("what is heresy", &["A", "C", "D"]),
        ]);
        let query = tokens(&["what", "is", "heresy"]);

        let result = allocate_searches(&query, &tokens(&["heresy"]), budget(3), &search).unwrap();

        assert_eq!(result.titles(), ["A", "C", "D"]);
    }

    #[test]
    fn small_budget_returns_whole_query_search() {
        let search = MockTitleSearch::new(&[("q r s", &["X", "Y"])]);
        let query = tokens(&["q", "r", "s"]);

        let result = allocate_searches(&query, &tokens(&["q", "r", "s"]), budget(2), &search).unwrap();

        assert_eq!(result.titles(), ["X", "Y"]);
        assert_eq!(search.calls(), vec![("q r s".to_string(), 2)]);
    }

    #[test]
    fn budget_equal_to_chunks_plus_one_does_not_split() {
        let search = MockTitleSearch::new(&[("a b", &["W"]), ("a", &["Z"])]);
        let result = allocate_searches(&tokens(&["a", "b"]), &tokens(&["a", "b"]), budget(3), &search).unwrap();

        assert_eq!(result.titles(), ["W"]);
        assert_eq!(search.calls().len(), 1);
    }

    #[test]
    fn duplicates_across_chunks_do_not_consume_quota() {
        let search = MockTitleSearch::new(&[
            ("rome", &["Rome", "Roman Empire", "Vatican"]),
            ("empire", &["Roman Empire", "Rome", "Empire", "British Empire"]),
            ("rome empire", &["Roman Empire", "Holy Roman Empire", "Byzantine Empire"]),
        ]);
        let query = tokens(&["rome", "empire"]);

        // quota = 9 / 3 = 3
        let result = allocate_searches(&query, &tokens(&["rome", "empire"]), budget(9), &search).unwrap();

        assert_eq!(
            result.titles(),
            [
                "Rome",
                "Roman Empire",
                "Vatican",
                "Empire",
                "British Empire",
                "Holy Roman Empire",
                "Byzantine Empire"
            ]
        );
    }

    #[test]
    fn result_never_exceeds_budget() {
        let many: Vec<String> = (0..20).map(|i| format!("T{i}")).collect();
        let many: Vec<&str> = many.iter().map(String::as_str).collect();
        let search = MockTitleSearch::new(&[("x", &many[..10]), ("x y", &many[5..])]);

        let result = allocate_searches(&tokens(&["x", "y"]), &tokens(&["x"]), budget(6), &search).unwrap();

        assert_eq!(result.len(), 6);
        assert_eq!(result.titles(), ["T0", "T1", "T2", "T5", "T6", "T7"]);
    }

    #[test]
    fn every_search_is_made_once_with_full_limit() {
        let search = MockTitleSearch::new(&[]);
        allocate_searches(&tokens(&["a", "b"]), &tokens(&["a", "b"]), budget(10), &search).unwrap();

        assert_eq!(
            search.calls(),
            vec![
                ("a".to_string(), 10),
                ("b".to_string(), 10),
                ("a b".to_string(), 10)
            ]
        );
    }

    #[test]
    fn short_supply_yields_a_short_list() {
        let search = MockTitleSearch::new(&[("a", &["A"]), ("a b", &["A"])]);
        let result = allocate_searches(&tokens(&["a", "b"]), &tokens(&["a"]), budget(10), &search).unwrap();

        assert_eq!(result.titles(), ["A"]);
    }

    #[test]
    fn empty_query_searches_nothing() {
        let result = allocate_searches(&[], &[], budget(5), &UnavailableOracle).unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn search_failure_propagates() {
        let result = allocate_searches(&tokens(&["a"]), &[], budget(5), &UnavailableOracle);
        assert!(matches!(result, Err(OracleError::Http { status: 503 })));
    }
}
