// SPDX-License-Identifier: GPL-3.0-only

use std::sync::Arc;

use async_trait::async_trait;

use catalog_types::Catalog;

use crate::CatalogError;

/// Read access to recorded catalogs
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Most recently recorded snapshot of `source` for `node_id`, if any.
    async fn find_most_recent(
        &self,
        node_id: &str,
        source: &str,
    ) -> Result<Option<Catalog>, CatalogError>;
}

#[async_trait]
impl<T: CatalogStore + ?Sized> CatalogStore for Arc<T> {
    async fn find_most_recent(
        &self,
        node_id: &str,
        source: &str,
    ) -> Result<Option<Catalog>, CatalogError> {
        (**self).find_most_recent(node_id, source).await
    }
}
