// SPDX-License-Identifier: GPL-3.0-only

//! Catalog store backed by a directory of JSON files
//!
//! Layout: `<root>/<node>/<source>.json`, one file per node and source holding
//! the catalog payload. The snapshot time is the file modification time.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use catalog_contracts::{CatalogError, CatalogErrorKind, CatalogStore};
use catalog_types::Catalog;
use chrono::{DateTime, Utc};

#[derive(Debug, Clone)]
pub struct JsonDirCatalogStore {
    root: PathBuf,
}

impl JsonDirCatalogStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// File holding `source` for `node_id`.
    pub fn catalog_path(&self, node_id: &str, source: &str) -> Result<PathBuf, CatalogError> {
        validate_component("node id", node_id)?;
        validate_component("source", source)?;
        Ok(self.root.join(node_id).join(format!("{source}.json")))
    }
}

fn validate_component(what: &str, value: &str) -> Result<(), CatalogError> {
    if value.is_empty()
        || value == "."
        || value == ".."
        || value.contains(['/', '\\', '\0'])
    {
        return Err(CatalogError::new(
            CatalogErrorKind::InvalidInput,
            format!("invalid {what} {value:?}"),
        ));
    }
    Ok(())
}

#[async_trait]
impl CatalogStore for JsonDirCatalogStore {
    async fn find_most_recent(
        &self,
        node_id: &str,
        source: &str,
    ) -> Result<Option<Catalog>, CatalogError> {
        let path = self.catalog_path(node_id, source)?;

        let raw = match tokio::fs::read(&path).await {
            Ok(raw) => raw,
            Err(error) if error.kind() == ErrorKind::NotFound => {
                tracing::debug!("No catalog file at {}", path.display());
                return Ok(None);
            }
            Err(error) => {
                return Err(CatalogError::new(
                    CatalogErrorKind::Unavailable,
                    format!("failed to read {}: {error}", path.display()),
                ));
            }
        };

        let data = serde_json::from_slice(&raw).map_err(|error| {
            CatalogError::new(
                CatalogErrorKind::Malformed,
                format!("invalid JSON in {}: {error}", path.display()),
            )
        })?;

        let created_at = match tokio::fs::metadata(&path).await.and_then(|meta| meta.modified()) {
            Ok(modified) => DateTime::<Utc>::from(modified),
            Err(_) => Utc::now(),
        };

        Ok(Some(Catalog::recorded_at(node_id, source, data, created_at)))
    }
}
