// SPDX-License-Identifier: GPL-3.0-only

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use catalog_contracts::{CatalogError, CatalogStore};
use catalog_types::Catalog;

/// One `find_most_recent` call seen by a [`RecordingStore`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lookup {
    pub node: String,
    pub source: String,
}

/// Store wrapper that records every lookup and can fail chosen sources
pub struct RecordingStore<S> {
    inner: S,
    lookups: Mutex<Vec<Lookup>>,
    failures: Mutex<HashMap<String, CatalogError>>,
}

impl<S: CatalogStore> RecordingStore<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            lookups: Mutex::new(Vec::new()),
            failures: Mutex::new(HashMap::new()),
        }
    }

    /// Make every lookup of `source` fail with `error`.
    pub fn fail_source(&self, source: &str, error: CatalogError) {
        self.failures
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(source.to_string(), error);
    }

    pub fn lookups(&self) -> Vec<Lookup> {
        self.lookups
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of lookups of `source`, across nodes.
    pub fn lookup_count(&self, source: &str) -> usize {
        self.lookups
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|lookup| lookup.source == source)
            .count()
    }

    pub fn sources_looked_up(&self) -> Vec<String> {
        self.lookups()
            .into_iter()
            .map(|lookup| lookup.source)
            .collect()
    }
}

#[async_trait]
impl<S: CatalogStore> CatalogStore for RecordingStore<S> {
    async fn find_most_recent(
        &self,
        node_id: &str,
        source: &str,
    ) -> Result<Option<Catalog>, CatalogError> {
        self.lookups
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Lookup {
                node: node_id.to_string(),
                source: source.to_string(),
            });

        let failure = self
            .failures
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(source)
            .cloned();
        if let Some(error) = failure {
            return Err(error);
        }

        self.inner.find_most_recent(node_id, source).await
    }
}
