// SPDX-License-Identifier: GPL-3.0-only

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;
use catalog_contracts::{CatalogError, CatalogStore};
use catalog_types::Catalog;
use serde_json::Value;
use uuid::Uuid;

/// In-process catalog store keeping every recorded snapshot
#[derive(Debug, Default)]
pub struct MemoryCatalogStore {
    catalogs: RwLock<HashMap<(String, String), Vec<Catalog>>>,
}

impl MemoryCatalogStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, catalog: Catalog) {
        let key = (catalog.node.clone(), catalog.source.clone());
        self.catalogs
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(key)
            .or_default()
            .push(catalog);
    }

    /// Record a snapshot stamped with the current time and return its id.
    pub fn record(&self, node_id: &str, source: &str, data: Value) -> Uuid {
        let catalog = Catalog::new(node_id, source, data);
        let id = catalog.id;
        self.insert(catalog);
        id
    }

    /// Number of snapshots held across all nodes and sources.
    pub fn len(&self) -> usize {
        self.catalogs
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .map(Vec::len)
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl CatalogStore for MemoryCatalogStore {
    async fn find_most_recent(
        &self,
        node_id: &str,
        source: &str,
    ) -> Result<Option<Catalog>, CatalogError> {
        let catalogs = self.catalogs.read().unwrap_or_else(PoisonError::into_inner);
        Ok(catalogs
            .get(&(node_id.to_string(), source.to_string()))
            .and_then(|snapshots| snapshots.iter().max_by_key(|catalog| catalog.created_at))
            .cloned())
    }
}
