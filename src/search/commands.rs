use crate::types::ResultItem;

/// Engine priority assigned to the category stub that seeds a search round.
pub const CATEGORY_SEED_PRIORITY: f64 = 100.0;

/// Priority distance of the seed; zero marks it as query context, not a hit.
pub const CATEGORY_SEED_PRIORITY_DISTANCE: f64 = 0.0;

/// Commands understood by the background search worker.
#[derive(Debug)]
pub enum SearchCommand {
    /// Run a category search round for the given seed.
    Seed(SeedQuery),
    /// Stop the background worker thread.
    Shutdown,
}

/// One category search round, seeded the way the engine expects.
#[derive(Debug, Clone)]
pub struct SeedQuery {
    /// Correlates the eventual completion with the issuing round.
    pub id: u64,
    /// Synthetic category-level item establishing the query context.
    pub item: ResultItem,
    pub priority: f64,
    pub priority_distance: f64,
}

impl SeedQuery {
    /// Seed a round with the fixed category-context priorities.
    #[must_use]
    pub fn new(id: u64, item: ResultItem) -> Self {
        Self {
            id,
            item,
            priority: CATEGORY_SEED_PRIORITY,
            priority_distance: CATEGORY_SEED_PRIORITY_DISTANCE,
        }
    }
}

/// Payload delivered back to the screen when a search round settles.
#[derive(Debug, Clone)]
pub struct SearchCompletion {
    /// Id of the round this completion answers.
    pub query_id: u64,
    /// Final phrase the engine resolved for the round.
    pub phrase: String,
    /// Ordered results, absent when the engine delivered none.
    pub results: Option<Vec<ResultItem>>,
    pub result_count: usize,
}

impl SearchCompletion {
    /// Completion carrying an ordered result list.
    #[must_use]
    pub fn new(query_id: u64, phrase: impl Into<String>, results: Vec<ResultItem>) -> Self {
        let result_count = results.len();
        Self {
            query_id,
            phrase: phrase.into(),
            results: Some(results),
            result_count,
        }
    }

    /// Completion for a round that produced nothing.
    #[must_use]
    pub fn empty(query_id: u64, phrase: impl Into<String>) -> Self {
        Self {
            query_id,
            phrase: phrase.into(),
            results: None,
            result_count: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Category;

    #[test]
    fn seeds_carry_the_fixed_priorities() {
        let category = Category::new("fuel", "Fuel", "fuel");
        let seed = SeedQuery::new(3, ResultItem::category_seed(&category));
        assert_eq!(seed.id, 3);
        assert_eq!(seed.priority, CATEGORY_SEED_PRIORITY);
        assert_eq!(seed.priority_distance, CATEGORY_SEED_PRIORITY_DISTANCE);
    }

    #[test]
    fn empty_completions_report_zero_results() {
        let completion = SearchCompletion::empty(1, "fuel near me");
        assert_eq!(completion.result_count, 0);
        assert!(completion.results.is_none());
    }
}
