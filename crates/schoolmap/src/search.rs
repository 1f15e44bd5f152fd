//! # Search / Filter Engine
//!
//! Derives the visible list from the collection and the filter state.
//!
//! A school is visible when both hold:
//! 1. the query is empty, or the lowercased name contains the lowercased query
//!    as a plain substring (no tokenizing, no patterns);
//! 2. no category is selected, or the school's category is selected.
//!
//! Collection order is kept as is. No ranking, no sort.

use crate::collection::CollectionManager;
use crate::filter::FilterState;
use crate::model::{Category, School};

pub fn matches_query(school: &School, query_lower: &str) -> bool {
    query_lower.is_empty() || school.name.to_lowercase().contains(query_lower)
}

pub fn matches_categories(school: &School, categories: &[Category]) -> bool {
    categories.is_empty() || categories.contains(&school.category)
}

pub fn filter<'a>(schools: &'a [School], query: &str, categories: &[Category]) -> Vec<&'a School> {
    let query_lower = query.to_lowercase();
    schools
        .iter()
        .filter(|s| matches_query(s, &query_lower) && matches_categories(s, categories))
        .collect()
}

/// Memoized derived view.
///
/// Recomputes only when the collection or the filter state has moved on
/// since the last call, tracked by their revision counters.
#[derive(Debug, Default)]
pub struct ViewCache {
    key: Option<(u64, u64)>,
    view: Vec<School>,
    recomputes: u64,
}

impl ViewCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&mut self, collection: &CollectionManager, filters: &FilterState) -> &[School] {
        let key = (collection.revision(), filters.revision());
        if self.key != Some(key) {
            self.view = filter(collection.schools(), filters.query(), filters.categories())
                .into_iter()
                .cloned()
                .collect();
            self.key = Some(key);
            self.recomputes += 1;
        }
        &self.view
    }

    /// How many times the view has been rebuilt.
    pub fn recomputes(&self) -> u64 {
        self.recomputes
    }
}
