//! Application state for the payroll compliance API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::config::RuleLoader;
use crate::store::BatchStore;

/// Shared application state.
///
/// Contains resources that are shared across all request handlers: the
/// loaded rule tables and the batch store.
#[derive(Clone)]
pub struct AppState {
    rules: Arc<RuleLoader>,
    store: Arc<BatchStore>,
}

impl AppState {
    /// Creates a new application state with the given rule loader and an
    /// empty batch store.
    pub fn new(rules: RuleLoader) -> Self {
        Self {
            rules: Arc::new(rules),
            store: Arc::new(BatchStore::new()),
        }
    }

    /// Returns a reference to the rule loader.
    pub fn rules(&self) -> &RuleLoader {
        &self.rules
    }

    /// Returns a reference to the batch store.
    pub fn store(&self) -> &BatchStore {
        &self.store
    }
}
