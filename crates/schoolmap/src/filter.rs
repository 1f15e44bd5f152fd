//! Session-scoped search text and category selection.
//!
//! Never persisted: a new session starts with an empty query and no category
//! restriction.

use crate::error::Result;
use crate::model::Category;
use crate::observe::{SubscriptionId, Subscribers};
use std::fmt;

#[derive(Default)]
pub struct FilterState {
    query: String,
    // Toggle order, no duplicates.
    categories: Vec<Category>,
    revision: u64,
    subscribers: Subscribers<FilterState>,
}

impl fmt::Debug for FilterState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilterState")
            .field("query", &self.query)
            .field("categories", &self.categories)
            .field("revision", &self.revision)
            .finish()
    }
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: FnMut(&FilterState) + Send + 'static,
    {
        self.subscribers.subscribe(callback)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.subscribers.unsubscribe(id)
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Active categories in the order they were switched on.
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn is_active(&self, category: Category) -> bool {
        self.categories.contains(&category)
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Replace the query verbatim. No trimming.
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
        self.changed();
    }

    pub fn toggle_category(&mut self, category: Category) {
        if let Some(pos) = self.categories.iter().position(|c| *c == category) {
            self.categories.remove(pos);
        } else {
            self.categories.push(category);
        }
        self.changed();
    }

    /// Toggle by display name, e.g. "General Education".
    pub fn toggle_category_str(&mut self, label: &str) -> Result<()> {
        let category = label.parse()?;
        self.toggle_category(category);
        Ok(())
    }

    pub fn clear_categories(&mut self) {
        self.categories.clear();
        self.changed();
    }

    /// Reset both the query and the categories.
    pub fn clear(&mut self) {
        self.query.clear();
        self.categories.clear();
        self.changed();
    }

    fn changed(&mut self) {
        self.revision += 1;
        // Callbacks borrow the state, so the list is moved out while they run.
        let mut subscribers = std::mem::take(&mut self.subscribers);
        subscribers.notify(self);
        self.subscribers = subscribers;
    }
}
